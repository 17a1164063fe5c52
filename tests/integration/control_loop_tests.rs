//! Integration tests for the sample → classify → select → play pipeline
//! in blocking playback mode.
//!
//! Ticks are driven off the mock's fake clock: each tick advances it by
//! the tick period, and blocking playback advances it further through
//! `DelayNs`, exactly as the real loop would experience it.

use crate::mock_hw::{LogSink, MockHardware, ScriptedOverride, ToneCall};

use plantsong::app::commands::AppCommand;
use plantsong::app::events::{AppEvent, StatusReport};
use plantsong::app::selector::SelectionSource;
use plantsong::app::service::AppService;
use plantsong::classify::{LightState, MoistureState, PlantCondition};
use plantsong::config::EngineConfig;
use plantsong::error::{OverrideError, SensorError};
use plantsong::melody::library;
use plantsong::melody::sequencer::TrackId;
use plantsong::melody::{PatternName, playback_duration_ms};
use plantsong::sensors::Channel;

const TICK_MS: u64 = 2_000;

fn make_app(moisture: u16, light: u16) -> (AppService, MockHardware, LogSink) {
    let config = EngineConfig {
        startup_sequence: false,
        ..EngineConfig::default()
    };
    let mut app = AppService::new(config);
    let mut hw = MockHardware::new(moisture, light);
    let mut sink = LogSink::new();
    app.start(hw.now_ms, &mut hw, &mut sink);
    (app, hw, sink)
}

/// Advance one period and tick; returns the reported status.
fn step(
    app: &mut AppService,
    hw: &mut MockHardware,
    source: &mut ScriptedOverride,
    sink: &mut LogSink,
) -> StatusReport {
    hw.advance(TICK_MS);
    let now = hw.now_ms;
    app.tick(now, hw, source, sink)
}

fn run(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut LogSink,
    ticks: usize,
) -> StatusReport {
    let mut source = ScriptedOverride::none();
    let mut last = None;
    for _ in 0..ticks {
        last = Some(step(app, hw, &mut source, sink));
    }
    last.expect("at least one tick")
}

fn melodies_started(sink: &LogSink) -> Vec<TrackId> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::MelodyStarted(id) => Some(*id),
            _ => None,
        })
        .collect()
}

// ── End-to-end scenarios ─────────────────────────────────────

#[test]
fn dry_bright_plant_is_stressed_and_plays_alert() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    let report = run(&mut app, &mut hw, &mut sink, 5);

    assert_eq!(report.filtered.moisture, 500);
    assert_eq!(report.filtered.light, 4000);
    assert_eq!(report.classification.moisture, MoistureState::Dry);
    assert_eq!(report.classification.light, LightState::Bright);
    assert_eq!(report.classification.overall, PlantCondition::Stressed);
    assert_eq!(report.selection.pattern, PatternName::Alert);
    assert_eq!(report.health, "NEEDS ATTENTION");
    assert!(report.filter_warmed_up);

    assert_eq!(melodies_started(&sink), vec![TrackId::Pattern(PatternName::Alert)]);
}

#[test]
fn healthy_plant_converges_to_happy() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    let report = run(&mut app, &mut hw, &mut sink, 5);

    assert_eq!(report.filtered.moisture, 2000);
    assert_eq!(report.filtered.light, 3500);
    assert_eq!(report.classification.overall, PlantCondition::Happy);
    assert_eq!(report.selection.pattern, PatternName::Happy);
    assert_eq!(report.health, "THRIVING");
}

#[test]
fn warm_up_bias_shows_on_first_tick() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    let report = run(&mut app, &mut hw, &mut sink, 1);

    assert_eq!(report.filtered.moisture, 400);
    assert_eq!(report.filtered.light, 700);
    assert_eq!(report.classification.overall, PlantCondition::Stressed);
    assert!(!report.filter_warmed_up);
}

#[test]
fn one_status_per_tick() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    run(&mut app, &mut hw, &mut sink, 7);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Status(_))), 7);
    assert_eq!(app.tick_count(), 7);
    assert_eq!(hw.reads, 14);
}

// ── Melody cadence ───────────────────────────────────────────

#[test]
fn blocking_melody_lasts_sum_of_holds_and_gaps() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    run(&mut app, &mut hw, &mut sink, 4);
    assert!(hw.tones().is_empty());

    let before = hw.now_ms + TICK_MS;
    run(&mut app, &mut hw, &mut sink, 1);

    let expected = playback_duration_ms(library::HAPPY, 20);
    assert_eq!(expected, 3260);
    assert_eq!(hw.now_ms - before, u64::from(expected));
    assert!(hw.is_silent());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::MelodyFinished(_))), 1);
}

#[test]
fn silent_before_first_note_and_after_last() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    run(&mut app, &mut hw, &mut sink, 5);

    let first_tone = hw
        .calls
        .iter()
        .position(|c| matches!(c, ToneCall::Tone { .. }))
        .expect("melody played");
    assert!(first_tone > 0);
    assert!(matches!(hw.calls[first_tone - 1], ToneCall::Silence { .. }));
    assert!(matches!(hw.calls[first_tone], ToneCall::Tone { at_ms: 10_000, hz: 523 }));
    assert!(hw.is_silent());
}

#[test]
fn alert_tones_match_library() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    run(&mut app, &mut hw, &mut sink, 5);

    let expected: Vec<u16> = library::ALERT
        .iter()
        .filter(|n| !n.is_rest())
        .map(|n| n.frequency_hz)
        .collect();
    assert_eq!(hw.tones(), expected);
}

#[test]
fn cadence_counts_from_when_the_melody_fired() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    // Tick 5 (t=10 000) fires and plays 1 740 ms, so the interval counts
    // from 11 740.  Later ticks land on 13 740 .. 19 740 (not due) and
    // 21 740 (due).
    run(&mut app, &mut hw, &mut sink, 9);
    assert_eq!(melodies_started(&sink).len(), 1);
    run(&mut app, &mut hw, &mut sink, 1);
    assert_eq!(melodies_started(&sink).len(), 2);
    assert_eq!(app.state().last_melody_ms(), 21_740 + 1_740);
}

#[test]
fn interval_restarts_after_blocking_playback_ends() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    let mut source = ScriptedOverride::none();
    let mut started_at = Vec::new();
    for _ in 0..10 {
        let before = melodies_started(&sink).len();
        let now = hw.now_ms + TICK_MS;
        step(&mut app, &mut hw, &mut source, &mut sink);
        if melodies_started(&sink).len() > before {
            started_at.push(now);
        }
    }
    // HAPPY lasts 3 260 ms: the 21 260 tick is only 8 s after it ended.
    assert_eq!(started_at, vec![10_000, 23_260]);
    assert!(melodies_started(&sink)
        .iter()
        .all(|id| *id == TrackId::Pattern(PatternName::Happy)));
}

#[test]
fn late_tick_fires_only_once() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    let mut source = ScriptedOverride::none();
    hw.advance(35_000);
    let now = hw.now_ms;
    app.tick(now, &mut hw, &mut source, &mut sink);
    app.tick(now + 1, &mut hw, &mut source, &mut sink);
    assert_eq!(melodies_started(&sink).len(), 1);
}

// ── Override precedence ──────────────────────────────────────

#[test]
fn valid_override_wins_over_policy() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    let mut source = ScriptedOverride::new(vec![Ok(Some("ALERT"))]);
    let report = step(&mut app, &mut hw, &mut source, &mut sink);

    assert_eq!(report.selection.pattern, PatternName::Alert);
    assert_eq!(report.selection.source, SelectionSource::Override);
    assert_eq!(source.polls, 1);

    // The next answer is "none": back to policy.
    let report = step(&mut app, &mut hw, &mut source, &mut sink);
    assert_eq!(report.selection.source, SelectionSource::Policy);
}

#[test]
fn unknown_override_is_reported_and_ignored() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    run(&mut app, &mut hw, &mut sink, 4);
    let mut source = ScriptedOverride::new(vec![Ok(Some("BOGUS"))]);
    let report = step(&mut app, &mut hw, &mut source, &mut sink);

    assert_eq!(report.selection.pattern, PatternName::Happy);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::OverrideRejected { name: Some(n), error: OverrideError::UnknownPattern }
            if n.as_str() == "BOGUS"
    )));
}

#[test]
fn override_timeout_degrades_to_policy() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    let mut source = ScriptedOverride::new(vec![Err(OverrideError::TimedOut)]);
    let report = step(&mut app, &mut hw, &mut source, &mut sink);
    assert_eq!(report.selection.pattern, PatternName::Alert);
    assert_eq!(report.selection.source, SelectionSource::Policy);
}

#[test]
fn overridden_melody_is_what_plays() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    let mut source = ScriptedOverride::new(vec![Ok(None); 4]
        .into_iter()
        .chain([Ok(Some("HAPPY"))])
        .collect());
    for _ in 0..5 {
        step(&mut app, &mut hw, &mut source, &mut sink);
    }
    assert_eq!(melodies_started(&sink), vec![TrackId::Pattern(PatternName::Happy)]);
}

// ── Sensor range ─────────────────────────────────────────────

#[test]
fn out_of_range_reading_is_flagged_but_used() {
    let (mut app, mut hw, mut sink) = make_app(5000, 2000);
    let report = run(&mut app, &mut hw, &mut sink, 1);

    assert_eq!(report.raw.moisture_raw, 5000);
    assert_eq!(report.filtered.moisture, 1000);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::SensorWarning(SensorError::OutOfRange { channel: Channel::Moisture, raw: 5000, .. })
    )));
}

// ── Condition changes ────────────────────────────────────────

#[test]
fn condition_change_events_follow_the_filter() {
    let (mut app, mut hw, mut sink) = make_app(2000, 3500);
    run(&mut app, &mut hw, &mut sink, 5);

    let changes: Vec<(PlantCondition, PlantCondition)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ConditionChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (PlantCondition::Neutral, PlantCondition::Stressed),
            (PlantCondition::Stressed, PlantCondition::Happy),
        ]
    );
}

// ── Commands ─────────────────────────────────────────────────

#[test]
fn muted_engine_keeps_cadence_but_stays_quiet() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    let now = hw.now_ms;
    app.handle_command(AppCommand::SetMuted(true), now, &mut hw, &mut sink);
    hw.clear_calls();

    run(&mut app, &mut hw, &mut sink, 5);
    assert!(hw.tones().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MelodySkipped(PatternName::Alert))),
        1
    );
    assert_eq!(app.state().last_melody_ms(), 10_000);

    let now = hw.now_ms;
    app.handle_command(AppCommand::SetMuted(false), now, &mut hw, &mut sink);
    assert!(!app.is_muted());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::MuteChanged(_))), 2);
}

#[test]
fn play_now_plays_immediately_and_restarts_cadence() {
    let (mut app, mut hw, mut sink) = make_app(500, 4000);
    run(&mut app, &mut hw, &mut sink, 2);

    let now = hw.now_ms;
    app.handle_command(AppCommand::PlayNow, now, &mut hw, &mut sink);
    assert_eq!(melodies_started(&sink).len(), 1);
    assert_eq!(app.state().last_melody_ms(), 4_000 + 1_740);
    assert!(hw.is_silent());

    // Ticks every 2 s from 5 740: first due tick is 15 740.
    run(&mut app, &mut hw, &mut sink, 4);
    assert_eq!(melodies_started(&sink).len(), 1);
    run(&mut app, &mut hw, &mut sink, 1);
    assert_eq!(melodies_started(&sink).len(), 2);
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn startup_chime_and_config_report() {
    let mut app = AppService::new(EngineConfig::default());
    let mut hw = MockHardware::new(0, 0);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);

    assert_eq!(hw.now_ms, 2_100);
    assert_eq!(hw.tones(), vec![262, 294, 330, 349, 392, 440, 494, 523]);
    assert!(hw.is_silent());
    assert_eq!(melodies_started(&sink), vec![TrackId::Startup]);

    let report = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::ConfigReport(r) => Some(*r),
            _ => None,
        })
        .expect("config reported");
    assert_eq!(report.moisture_dry_threshold, 1500);
    assert_eq!(report.light_bright_threshold, 3000);
    assert_eq!(report.window_size, 5);
    assert_eq!(report.melody_interval_secs, 10);
}
