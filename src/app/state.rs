//! Engine state carried between ticks.
//!
//! `EngineState` is the one struct the control loop reads from and writes
//! to: the rolling filter windows, the last classification and selection,
//! the melody cadence timer and the tick counter.  It is owned by the
//! [`AppService`](super::service::AppService) and never shared.

use crate::classify::Classification;
use crate::config::EngineConfig;
use crate::melody::PatternName;
use crate::scheduler::IntervalTimer;
use crate::sensors::SensorSample;
use crate::sensors::filter::{FilteredReading, SignalFilter};

use super::selector::{Selection, SelectionSource, policy_pattern};

#[derive(Debug, Clone)]
pub struct EngineState {
    pub filter: SignalFilter,
    /// Most recent raw sample (zero before the first tick).
    pub last_sample: SensorSample,
    pub last_filtered: FilteredReading,
    /// Neutral on every axis until the first tick.
    pub classification: Classification,
    pub selection: Selection,
    /// Melody cadence; its reference point is the last time a melody was
    /// due, starting at 0.
    pub melody_timer: IntervalTimer,
    pub tick_count: u64,
    pub uptime_ms: u64,
}

impl EngineState {
    pub fn new(config: &EngineConfig) -> Self {
        let classification = Classification::default();
        Self {
            filter: SignalFilter::new(config.window_size),
            last_sample: SensorSample::default(),
            last_filtered: FilteredReading::default(),
            classification,
            selection: Selection {
                pattern: policy_pattern(classification.overall, classification.moisture),
                source: SelectionSource::Policy,
            },
            melody_timer: IntervalTimer::new(config.melody_interval_ms),
            tick_count: 0,
            uptime_ms: 0,
        }
    }

    pub fn selected_pattern(&self) -> PatternName {
        self.selection.pattern
    }

    /// Millisecond timestamp of the last melody trigger (0 if none yet).
    pub fn last_melody_ms(&self) -> u64 {
        self.melody_timer.last_fired_ms()
    }
}
