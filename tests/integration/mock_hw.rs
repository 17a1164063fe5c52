//! Mock hardware adapter for integration tests.
//!
//! Records every tone call against a fake millisecond clock so tests can
//! assert on the full output history without touching real ADC/LEDC
//! registers.  The clock only moves when the code under test delays or
//! the test advances it.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use heapless::String;
use plantsong::app::events::AppEvent;
use plantsong::app::ports::{
    EventSink, OVERRIDE_NAME_CAP, OverrideContext, PatternOverride, SensorPort, TonePort,
};
use plantsong::error::OverrideError;
use plantsong::sensors::Channel;

// ── Tone call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Tone { at_ms: u64, hz: u16 },
    Silence { at_ms: u64 },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub moisture: u16,
    pub light: u16,
    pub calls: Vec<ToneCall>,
    /// Fake clock, advanced by `DelayNs` and by tests.
    pub now_ms: u64,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(moisture: u16, light: u16) -> Self {
        Self {
            moisture,
            light,
            calls: Vec::new(),
            now_ms: 0,
            reads: 0,
        }
    }

    pub fn set_readings(&mut self, moisture: u16, light: u16) {
        self.moisture = moisture;
        self.light = light;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn tones(&self) -> Vec<u16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ToneCall::Tone { hz, .. } => Some(*hz),
                ToneCall::Silence { .. } => None,
            })
            .collect()
    }

    /// `true` when the last output call left the buzzer quiet.
    pub fn is_silent(&self) -> bool {
        !matches!(self.calls.last(), Some(ToneCall::Tone { .. }))
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn read_raw(&mut self, channel: Channel) -> u16 {
        self.reads += 1;
        match channel {
            Channel::Moisture => self.moisture,
            Channel::Light => self.light,
        }
    }
}

impl TonePort for MockHardware {
    fn emit_tone(&mut self, frequency_hz: u16) {
        self.calls.push(ToneCall::Tone {
            at_ms: self.now_ms,
            hz: frequency_hz,
        });
    }

    fn silence(&mut self) {
        self.calls.push(ToneCall::Silence { at_ms: self.now_ms });
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ms += u64::from(ns / 1_000_000);
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every event for assertion.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── ScriptedOverride ──────────────────────────────────────────

/// Replays a queue of override answers, then answers "no override".
pub struct ScriptedOverride {
    answers: VecDeque<Result<Option<&'static str>, OverrideError>>,
    pub polls: u32,
}

#[allow(dead_code)]
impl ScriptedOverride {
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn new(answers: Vec<Result<Option<&'static str>, OverrideError>>) -> Self {
        Self {
            answers: answers.into(),
            polls: 0,
        }
    }
}

impl PatternOverride for ScriptedOverride {
    fn poll_override(
        &mut self,
        _ctx: &OverrideContext,
    ) -> Result<Option<String<OVERRIDE_NAME_CAP>>, OverrideError> {
        self.polls += 1;
        match self.answers.pop_front() {
            Some(Ok(Some(name))) => Ok(String::try_from(name).ok()),
            Some(Ok(None)) | None => Ok(None),
            Some(Err(e)) => Err(e),
        }
    }
}
