//! Integration tests for cooperative playback: melodies advance between
//! ticks instead of blocking them.

use crate::mock_hw::{LogSink, MockHardware, ScriptedOverride};

use plantsong::app::commands::AppCommand;
use plantsong::app::events::AppEvent;
use plantsong::app::service::AppService;
use plantsong::config::{EngineConfig, PlaybackMode};
use plantsong::melody::library;
use plantsong::melody::sequencer::{Step, TrackId};
use plantsong::melody::{PatternName, playback_duration_ms};

fn cooperative(startup_sequence: bool) -> EngineConfig {
    EngineConfig {
        playback_mode: PlaybackMode::Cooperative,
        startup_sequence,
        ..EngineConfig::default()
    }
}

/// Poll playback until it finishes, jumping the clock to each deadline.
/// Returns the elapsed time.
fn drain(app: &mut AppService, hw: &mut MockHardware, sink: &mut LogSink) -> u64 {
    let start = hw.now_ms;
    for _ in 0..1_000 {
        let wait = app.next_playback_deadline_ms(hw.now_ms);
        hw.advance(u64::from(wait));
        let now = hw.now_ms;
        match app.poll_playback(now, hw, sink) {
            Step::Finished(_) | Step::Idle => return hw.now_ms - start,
            Step::Holding | Step::Advanced => {}
        }
    }
    panic!("playback never finished");
}

/// Five ticks at 2 s with happy readings; the fifth starts the melody.
fn tick_until_melody(app: &mut AppService, hw: &mut MockHardware, sink: &mut LogSink) {
    let mut source = ScriptedOverride::none();
    for _ in 0..5 {
        hw.advance(2_000);
        let now = hw.now_ms;
        app.tick(now, hw, &mut source, sink);
    }
}

#[test]
fn tick_returns_while_melody_plays() {
    let mut app = AppService::new(cooperative(false));
    let mut hw = MockHardware::new(2000, 3500);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);

    tick_until_melody(&mut app, &mut hw, &mut sink);
    assert_eq!(hw.now_ms, 10_000, "tick must not block");
    assert!(app.is_playing());
    assert_eq!(hw.tones(), vec![library::HAPPY[0].frequency_hz]);

    let elapsed = drain(&mut app, &mut hw, &mut sink);
    assert_eq!(elapsed, u64::from(playback_duration_ms(library::HAPPY, 20)));
    assert!(hw.is_silent());
    assert!(!app.is_playing());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MelodyFinished(TrackId::Pattern(PatternName::Happy)))),
        1
    );
}

#[test]
fn sensing_continues_during_playback() {
    let mut app = AppService::new(cooperative(false));
    let mut hw = MockHardware::new(2000, 3500);
    let mut sink = LogSink::new();
    let mut source = ScriptedOverride::none();
    app.start(0, &mut hw, &mut sink);
    tick_until_melody(&mut app, &mut hw, &mut sink);

    // HAPPY runs longer than one tick period; tick again mid-melody.
    let reads_before = hw.reads;
    hw.advance(2_000);
    let now = hw.now_ms;
    let report = app.tick(now, &mut hw, &mut source, &mut sink);
    assert_eq!(hw.reads, reads_before + 2);
    assert!(report.playback.active);
    assert_eq!(report.playback.track, Some(TrackId::Pattern(PatternName::Happy)));
}

#[test]
fn stop_melody_silences_immediately() {
    let mut app = AppService::new(cooperative(false));
    let mut hw = MockHardware::new(2000, 3500);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);
    tick_until_melody(&mut app, &mut hw, &mut sink);
    assert!(!hw.is_silent());

    let now = hw.now_ms;
    app.handle_command(AppCommand::StopMelody, now, &mut hw, &mut sink);
    assert!(hw.is_silent());
    assert!(!app.is_playing());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::MelodyPreempted(_))), 1);
}

#[test]
fn muting_mid_melody_preempts_it() {
    let mut app = AppService::new(cooperative(false));
    let mut hw = MockHardware::new(2000, 3500);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);
    tick_until_melody(&mut app, &mut hw, &mut sink);

    let now = hw.now_ms;
    app.handle_command(AppCommand::SetMuted(true), now, &mut hw, &mut sink);
    assert!(hw.is_silent());
    assert!(app.is_muted());
    assert!(!app.is_playing());
}

#[test]
fn startup_chime_is_queued_not_blocking() {
    let mut app = AppService::new(cooperative(true));
    let mut hw = MockHardware::new(0, 0);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);

    assert_eq!(hw.now_ms, 0);
    assert_eq!(hw.tones(), vec![library::STARTUP[0].frequency_hz]);
    assert_eq!(app.playback().track, Some(TrackId::Startup));

    let elapsed = drain(&mut app, &mut hw, &mut sink);
    assert_eq!(elapsed, 2_100);
    assert_eq!(hw.tones().len(), library::STARTUP.len());
}

#[test]
fn new_melody_preempts_unfinished_one() {
    let mut app = AppService::new(cooperative(true));
    let mut hw = MockHardware::new(500, 4000);
    let mut sink = LogSink::new();
    app.start(0, &mut hw, &mut sink);

    // PlayNow while the startup chime is still going.
    hw.advance(100);
    let now = hw.now_ms;
    app.handle_command(AppCommand::PlayNow, now, &mut hw, &mut sink);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MelodyPreempted(TrackId::Startup))),
        1
    );
    assert_eq!(app.playback().track, Some(TrackId::Pattern(PatternName::Relaxed)));
}
