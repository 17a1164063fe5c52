//! Melody subsystem: the fixed pattern [`library`] and the playback
//! [`sequencer`].
//!
//! A pattern is an ordered list of [`Note`]s; frequency `0` is a rest.

pub mod library;
pub mod sequencer;

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::OverrideError;

/// One tone (or rest) with its hold time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Tone frequency in Hz; `0` means rest.
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

impl Note {
    pub const fn tone(frequency_hz: u16, duration_ms: u16) -> Self {
        Self { frequency_hz, duration_ms }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self { frequency_hz: REST, duration_ms }
    }

    pub const fn is_rest(&self) -> bool {
        self.frequency_hz == REST
    }
}

// ── Note frequencies (Hz) ─────────────────────────────────────

pub const REST: u16 = 0;
pub const C4: u16 = 262;
pub const D4: u16 = 294;
pub const E4: u16 = 330;
pub const F4: u16 = 349;
pub const G4: u16 = 392;
pub const A4: u16 = 440;
pub const B4: u16 = 494;
pub const C5: u16 = 523;
pub const D5: u16 = 587;
pub const E5: u16 = 659;
pub const F5: u16 = 698;
pub const G5: u16 = 784;
pub const A5: u16 = 880;

/// The closed set of patterns the library knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternName {
    Happy,
    Relaxed,
    Neutral,
    Alert,
}

impl PatternName {
    pub const ALL: [PatternName; 4] = [
        PatternName::Happy,
        PatternName::Relaxed,
        PatternName::Neutral,
        PatternName::Alert,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "HAPPY",
            Self::Relaxed => "RELAXED",
            Self::Neutral => "NEUTRAL",
            Self::Alert => "ALERT",
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = OverrideError;

    /// Exact match against the library names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(OverrideError::UnknownPattern)
    }
}

/// Total wall-clock time to play `notes` with `gap_ms` after every note.
pub fn playback_duration_ms(notes: &[Note], gap_ms: u32) -> u32 {
    notes
        .iter()
        .map(|n| u32::from(n.duration_ms) + gap_ms)
        .sum()
}
