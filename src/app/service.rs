//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the engine state, the melody sequencer and the
//! configuration.  It exposes a hardware-agnostic API; all I/O flows
//! through port traits injected at call sites, so the whole control loop
//! runs against mock adapters in tests.
//!
//! ```text
//!      SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                     │          AppService          │
//! PatternOverride ──▶ │ filter · classify · select   │
//!                     │ cadence · sequencer          │
//!   TonePort+Delay ◀──└──────────────────────────────┘
//! ```
//!
//! One [`tick`](AppService::tick) performs, in order: sample, range check,
//! filter, classify, select, report, and the melody cadence check.  In
//! [`PlaybackMode::Blocking`] a due melody plays to completion inside the
//! tick.  In [`PlaybackMode::Cooperative`] it is started and then advanced
//! by [`poll_playback`](AppService::poll_playback) between ticks.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::classify::{Thresholds, classify};
use crate::config::{EngineConfig, PlaybackMode};
use crate::melody::PatternName;
use crate::melody::sequencer::{MelodySequencer, PlaybackState, Step, Track, TrackId};

use super::commands::AppCommand;
use super::events::{AppEvent, ConfigReport, StatusReport};
use super::ports::{EventSink, OverrideContext, PatternOverride, SensorPort, TonePort};
use super::selector::select_pattern;
use super::state::EngineState;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: EngineConfig,
    thresholds: Thresholds,
    state: EngineState,
    sequencer: MelodySequencer,
    muted: bool,
}

impl AppService {
    /// Construct the service.  An invalid `config` is replaced by the
    /// defaults (with a warning).  Nothing is emitted until [`start`].
    ///
    /// [`start`]: AppService::start
    pub fn new(config: EngineConfig) -> Self {
        let config = config.validated_or_default();
        let thresholds = config.thresholds();
        let state = EngineState::new(&config);
        Self {
            config,
            thresholds,
            state,
            sequencer: MelodySequencer::new(),
            muted: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the configuration, silence the buzzer and run the startup
    /// chime (if enabled).  Blocking mode plays the chime here; cooperative
    /// mode queues it and returns immediately.
    pub fn start(
        &mut self,
        now_ms: u64,
        hw: &mut (impl TonePort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        self.state.uptime_ms = now_ms;
        hw.silence();

        sink.emit(&AppEvent::Started(self.config.playback_mode));
        sink.emit(&AppEvent::ConfigReport(self.config_report()));
        info!(
            "AppService started ({:?}, window {}, melody every {} ms)",
            self.config.playback_mode, self.config.window_size, self.config.melody_interval_ms
        );

        if self.config.startup_sequence {
            self.play(Track::startup(), now_ms, hw, sink);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle and return the status it reported.
    ///
    /// `hw` satisfies [`SensorPort`], [`TonePort`] and [`DelayNs`] at once,
    /// which avoids a double mutable borrow while keeping the port
    /// boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + TonePort + DelayNs),
        source: &mut impl PatternOverride,
        sink: &mut impl EventSink,
    ) -> StatusReport {
        self.state.tick_count += 1;
        self.state.uptime_ms = now_ms;

        // 1. Sample.  Out-of-range values are reported but still used.
        let sample = hw.read_sample();
        for err in sample.range_warnings(self.config.adc_max) {
            warn!("{}", err);
            sink.emit(&AppEvent::SensorWarning(err));
        }
        self.state.last_sample = sample;

        // 2. Filter and classify
        let filtered = self.state.filter.filter(sample);
        self.state.last_filtered = filtered;

        let classification = classify(&filtered, &self.thresholds);
        let previous = self.state.classification.overall;
        self.state.classification = classification;
        if classification.overall != previous {
            sink.emit(&AppEvent::ConditionChanged {
                from: previous,
                to: classification.overall,
            });
        }

        // 3. Select: override first, local policy otherwise
        let ctx = OverrideContext {
            sample,
            classification,
            uptime_ms: now_ms,
        };
        let requested = match source.poll_override(&ctx) {
            Ok(name) => name,
            Err(error) => {
                debug!("Override source failed: {}", error);
                sink.emit(&AppEvent::OverrideRejected { name: None, error });
                None
            }
        };
        let (selection, rejected) = select_pattern(
            classification.overall,
            classification.moisture,
            requested.as_deref(),
        );
        if let Some(error) = rejected {
            warn!("Ignoring override {:?}: {}", requested.as_deref(), error);
            sink.emit(&AppEvent::OverrideRejected {
                name: requested,
                error,
            });
        }
        self.state.selection = selection;

        // 4. Report
        let report = self.status_report();
        sink.emit(&AppEvent::Status(report));

        // 5. Cooperative playback carries on between ticks
        if self.config.playback_mode == PlaybackMode::Cooperative {
            self.poll_playback(now_ms, hw, sink);
        }

        // 6. Melody cadence
        if self.state.melody_timer.poll(now_ms) {
            self.trigger_melody(now_ms, hw, sink);
        }

        report
    }

    /// Advance cooperative playback by at most one step.  Call this as often
    /// as convenient between ticks; it is a no-op when nothing is playing.
    pub fn poll_playback(
        &mut self,
        now_ms: u64,
        tone: &mut impl TonePort,
        sink: &mut impl EventSink,
    ) -> Step {
        let step = self.sequencer.poll(now_ms, tone);
        if let Step::Finished(id) = step {
            debug!("Playback finished: {:?}", id);
            sink.emit(&AppEvent::MelodyFinished(id));
        }
        step
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (serial console, button).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        hw: &mut (impl TonePort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::SetMuted(muted) => {
                if muted {
                    self.stop(hw, sink);
                }
                if self.muted != muted {
                    self.muted = muted;
                    info!("Buzzer {}", if muted { "muted" } else { "unmuted" });
                    sink.emit(&AppEvent::MuteChanged(muted));
                }
            }
            AppCommand::PlayNow => {
                self.state.melody_timer.fire(now_ms);
                self.trigger_melody(now_ms, hw, sink);
            }
            AppCommand::StopMelody => self.stop(hw, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the most recent tick.
    pub fn status_report(&self) -> StatusReport {
        let c = self.state.classification;
        StatusReport {
            tick: self.state.tick_count,
            uptime_ms: self.state.uptime_ms,
            raw: self.state.last_sample,
            filtered: self.state.last_filtered,
            classification: c,
            selection: self.state.selection,
            health: c.overall.health_label(),
            filter_warmed_up: self.state.filter.is_warmed_up(),
            playback: self.sequencer.state(),
            muted: self.muted,
        }
    }

    pub fn config_report(&self) -> ConfigReport {
        ConfigReport {
            moisture_dry_threshold: self.config.moisture_dry_threshold,
            moisture_wet_threshold: self.config.moisture_wet_threshold,
            light_dark_threshold: self.config.light_dark_threshold,
            light_bright_threshold: self.config.light_bright_threshold,
            window_size: self.config.window_size,
            melody_interval_secs: self.config.melody_interval_ms / 1000,
            inter_note_gap_ms: self.config.inter_note_gap_ms,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn selected_pattern(&self) -> PatternName {
        self.state.selected_pattern()
    }

    pub fn playback(&self) -> PlaybackState {
        self.sequencer.state()
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Milliseconds until cooperative playback next needs a poll (0 when
    /// idle or already due).
    pub fn next_playback_deadline_ms(&self, now_ms: u64) -> u32 {
        self.sequencer.remaining_ms(now_ms)
    }

    // ── Internal ──────────────────────────────────────────────

    fn trigger_melody(
        &mut self,
        now_ms: u64,
        hw: &mut (impl TonePort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        let pattern = self.state.selection.pattern;
        if self.muted {
            debug!("Muted, skipping {}", pattern);
            sink.emit(&AppEvent::MelodySkipped(pattern));
            return;
        }
        info!("Playing {} melody", pattern);
        let track = Track::pattern(pattern, self.config.inter_note_gap_ms);
        self.play(track, now_ms, hw, sink);

        // Blocking playback holds the loop, so the next interval counts
        // from when the melody ended.
        if self.config.playback_mode == PlaybackMode::Blocking {
            self.state
                .melody_timer
                .restart_at(now_ms + u64::from(track.duration_ms()));
        }
    }

    fn play(
        &mut self,
        track: Track,
        now_ms: u64,
        hw: &mut (impl TonePort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        match self.config.playback_mode {
            PlaybackMode::Blocking => {
                let preempted = self.sequencer.cancel(hw);
                report_preempted(preempted, sink);
                sink.emit(&AppEvent::MelodyStarted(track.id));
                let id = self.sequencer.play_blocking(track, hw);
                sink.emit(&AppEvent::MelodyFinished(id));
            }
            PlaybackMode::Cooperative => {
                let preempted = self.sequencer.start(track, now_ms, hw);
                report_preempted(preempted, sink);
                sink.emit(&AppEvent::MelodyStarted(track.id));
            }
        }
    }

    fn stop(&mut self, tone: &mut impl TonePort, sink: &mut impl EventSink) {
        let stopped = self.sequencer.cancel(tone);
        report_preempted(stopped, sink);
    }
}

fn report_preempted(preempted: Option<TrackId>, sink: &mut impl EventSink) {
    if let Some(id) = preempted {
        debug!("Preempted {:?}", id);
        sink.emit(&AppEvent::MelodyPreempted(id));
    }
}
