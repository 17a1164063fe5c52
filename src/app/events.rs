//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them, log to serial, drive a display, etc.

use heapless::String;
use serde::Serialize;

use crate::classify::{Classification, PlantCondition};
use crate::config::PlaybackMode;
use crate::error::{OverrideError, SensorError};
use crate::melody::PatternName;
use crate::melody::sequencer::{PlaybackState, TrackId};
use crate::sensors::SensorSample;
use crate::sensors::filter::FilteredReading;

use super::ports::OVERRIDE_NAME_CAP;
use super::selector::Selection;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started.
    Started(PlaybackMode),

    /// Active configuration, emitted once at startup.
    ConfigReport(ConfigReport),

    /// Per-tick status report.
    Status(StatusReport),

    /// The overall plant condition differs from the previous tick.
    ConditionChanged { from: PlantCondition, to: PlantCondition },

    /// A raw reading was outside the expected ADC range (value still used).
    SensorWarning(SensorError),

    /// The override source answered but could not be honoured.
    /// `name` is `None` when the source failed before naming anything.
    OverrideRejected {
        name: Option<String<OVERRIDE_NAME_CAP>>,
        error: OverrideError,
    },

    MelodyStarted(TrackId),
    MelodyFinished(TrackId),
    /// Playback was cut short; the buzzer has been silenced.
    MelodyPreempted(TrackId),
    /// The melody cadence fired while muted.
    MelodySkipped(PatternName),

    MuteChanged(bool),
}

/// Thresholds and timing in effect, for the boot banner.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfigReport {
    pub moisture_dry_threshold: u16,
    pub moisture_wet_threshold: u16,
    pub light_dark_threshold: u16,
    pub light_bright_threshold: u16,
    pub window_size: usize,
    pub melody_interval_secs: u32,
    pub inter_note_gap_ms: u32,
}

/// A point-in-time status snapshot, one per tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub tick: u64,
    pub uptime_ms: u64,
    pub raw: SensorSample,
    pub filtered: FilteredReading,
    pub classification: Classification,
    pub selection: Selection,
    pub health: &'static str,
    /// `false` while zero-filled filter slots still bias the averages.
    pub filter_warmed_up: bool,
    pub playback: PlaybackState,
    pub muted: bool,
}
