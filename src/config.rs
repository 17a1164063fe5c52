//! System configuration parameters
//!
//! All tunable parameters for the PlantSong engine.  Values are fixed at
//! startup; nothing here is reloaded while the control loop runs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::filter::MAX_WINDOW;

/// How melody playback shares the control thread with sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Playback runs to completion inside the tick that triggered it.
    Blocking,
    /// Playback advances one step per poll; sensing is never starved.
    Cooperative,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Moisture thresholds (raw ADC) ---
    /// Filtered moisture below this is DRY
    pub moisture_dry_threshold: u16,
    /// Filtered moisture above this is WET
    pub moisture_wet_threshold: u16,

    // --- Light thresholds (raw ADC) ---
    /// Filtered light below this is DARK
    pub light_dark_threshold: u16,
    /// Filtered light above this is BRIGHT
    pub light_bright_threshold: u16,

    // --- Sensing ---
    /// Moving-average window size (samples per channel)
    pub window_size: usize,
    /// Highest value the ADC is expected to produce (12-bit = 4095)
    pub adc_max: u16,

    // --- Timing ---
    /// Sense-classify-select period (milliseconds)
    pub tick_interval_ms: u32,
    /// Minimum time between melody playbacks (milliseconds)
    pub melody_interval_ms: u32,
    /// Silence inserted after every note (milliseconds)
    pub inter_note_gap_ms: u32,

    // --- Playback ---
    pub playback_mode: PlaybackMode,
    /// Play the ascending startup scale on `start()`
    pub startup_sequence: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            moisture_dry_threshold: 1500,
            moisture_wet_threshold: 3000,

            light_dark_threshold: 1000,
            light_bright_threshold: 3000,

            window_size: 5,
            adc_max: 4095,

            tick_interval_ms: 2000,    // 0.5 Hz
            melody_interval_ms: 10_000, // every 10 s
            inter_note_gap_ms: 20,

            playback_mode: PlaybackMode::Blocking,
            startup_sequence: true,
        }
    }
}

impl EngineConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moisture_dry_threshold >= self.moisture_wet_threshold {
            return Err(ConfigError::ValidationFailed(
                "moisture_dry_threshold must be below moisture_wet_threshold",
            ));
        }
        if self.light_dark_threshold >= self.light_bright_threshold {
            return Err(ConfigError::ValidationFailed(
                "light_dark_threshold must be below light_bright_threshold",
            ));
        }
        if self.moisture_wet_threshold > self.adc_max || self.light_bright_threshold > self.adc_max
        {
            return Err(ConfigError::ValidationFailed(
                "thresholds must not exceed adc_max",
            ));
        }
        if self.window_size == 0 || self.window_size > MAX_WINDOW {
            return Err(ConfigError::ValidationFailed("window_size must be 1-32"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.melody_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("melody_interval_ms must be > 0"));
        }
        Ok(())
    }

    /// Return `self` if valid, otherwise log the reason and fall back to
    /// [`EngineConfig::default`].
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Config rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// The four classification thresholds as one value.
    pub fn thresholds(&self) -> crate::classify::Thresholds {
        crate::classify::Thresholds {
            moisture_dry: self.moisture_dry_threshold,
            moisture_wet: self.moisture_wet_threshold,
            light_dark: self.light_dark_threshold,
            light_bright: self.light_bright_threshold,
        }
    }
}
