//! Unified error types for the PlantSong firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can travel inside [`AppEvent`](crate::app::events::AppEvent)s without
//! allocation.
//!
//! Nothing in the sensing → classification → selection path is fatal.
//! These types describe conditions that get *reported* (logged, forwarded to
//! the event sink) and then downgraded to a safe default.

use core::fmt;

use crate::sensors::Channel;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor returned data the engine cannot trust.
    Sensor(SensorError),
    /// Startup configuration failed validation.
    Config(ConfigError),
    /// The external pattern override could not be honoured.
    Override(OverrideError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Override(e) => write!(f, "override: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Raw reading above the configured ADC maximum.  The value is still
    /// used (no clamping); this only flags it.
    OutOfRange { channel: Channel, raw: u16, max: u16 },
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { channel, raw, max } => {
                write!(f, "{channel} reading {raw} outside 0-{max}")
            }
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.  The `&'static str` names the field
    /// and the rule it broke.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Override errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideError {
    /// The override source named a pattern the library does not contain.
    UnknownPattern,
    /// The override source did not answer within the tick budget.
    TimedOut,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPattern => write!(f, "unknown pattern name"),
            Self::TimedOut => write!(f, "override source timed out"),
        }
    }
}

impl From<OverrideError> for Error {
    fn from(e: OverrideError) -> Self {
        Self::Override(e)
    }
}
