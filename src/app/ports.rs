//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (ADC, buzzer, status sink, override source) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.

use heapless::String;

use crate::classify::Classification;
use crate::error::OverrideError;
use crate::sensors::{Channel, SensorSample};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per channel per tick.
///
/// Never fails.  With no hardware attached, implementations may return
/// stale or zero values.
pub trait SensorPort {
    fn read_raw(&mut self, channel: Channel) -> u16;

    /// Read both channels back to back.
    fn read_sample(&mut self) -> SensorSample {
        SensorSample {
            moisture_raw: self.read_raw(Channel::Moisture),
            light_raw: self.read_raw(Channel::Light),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tone port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the single-channel tone output.
///
/// Both calls are fire-and-forget and take effect immediately.  Only the
/// [`MelodySequencer`](crate::melody::sequencer::MelodySequencer) writes to
/// this port.
pub trait TonePort {
    /// Start a square wave at `frequency_hz` (> 0) until told otherwise.
    fn emit_tone(&mut self, frequency_hz: u16);

    /// Stop any tone.  Idempotent.
    fn silence(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / serial)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, display).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Pattern override port (driven adapter: remote selector → domain)
// ───────────────────────────────────────────────────────────────

/// Longest pattern name an override source may return.
pub const OVERRIDE_NAME_CAP: usize = 16;

/// What the override source gets to see when it is polled.
#[derive(Debug, Clone, Copy)]
pub struct OverrideContext {
    pub sample: SensorSample,
    pub classification: Classification,
    pub uptime_ms: u64,
}

/// External decision source that may replace the local selection policy.
///
/// Polled once per selection.  Implementations must answer within the tick
/// budget; one that cannot should return [`OverrideError::TimedOut`], which
/// the engine treats the same as "no override".  The returned name is not
/// trusted, the engine checks it against the pattern library.
pub trait PatternOverride {
    fn poll_override(
        &mut self,
        ctx: &OverrideContext,
    ) -> Result<Option<String<OVERRIDE_NAME_CAP>>, OverrideError>;
}
