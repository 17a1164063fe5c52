//! Passive piezo buzzer driver.
//!
//! A square wave on one LEDC channel; the timer frequency is retuned for
//! each note and the duty drops to 0 for silence.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: retunes the LEDC timer via hw_init.
//! On host/test: hw_init only traces; the driver state is what tests inspect.

use log::trace;

use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { frequency_hz: u16 },
}

pub struct BuzzerDriver {
    state: BuzzerState,
    tones_emitted: u32,
}

impl BuzzerDriver {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
            tones_emitted: 0,
        }
    }

    /// Sound `frequency_hz`.  A frequency of 0 is treated as silence.
    pub fn tone(&mut self, frequency_hz: u16) {
        if frequency_hz == 0 {
            self.silence();
            return;
        }
        trace!("buzzer: {} Hz", frequency_hz);
        hw_init::ledc_tone(frequency_hz);
        self.tones_emitted = self.tones_emitted.saturating_add(1);
        self.state = BuzzerState::Sounding { frequency_hz };
    }

    pub fn silence(&mut self) {
        hw_init::ledc_tone(0);
        self.state = BuzzerState::Silent;
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        matches!(self.state, BuzzerState::Sounding { .. })
    }

    pub fn tones_emitted(&self) -> u32 {
        self.tones_emitted
    }
}

impl Default for BuzzerDriver {
    fn default() -> Self {
        Self::new()
    }
}
