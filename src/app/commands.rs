//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial console,
//! a button, a future remote controller) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Enable (`true`) or disable (`false`) buzzer output.  Muting during a
    /// playback stops it.
    SetMuted(bool),

    /// Play the currently selected pattern immediately and restart the
    /// melody interval.
    PlayNow,

    /// Stop the current playback, if any.
    StopMelody,
}
