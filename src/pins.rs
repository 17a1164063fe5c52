//! GPIO / peripheral pin assignments for the PlantSong board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Analog sensors (ADC1)
// ---------------------------------------------------------------------------

/// Resistive soil moisture probe, analog voltage.
/// ADC1 channel 0 (GPIO 36, "A0").
pub const MOISTURE_ADC_GPIO: i32 = 36;
/// Light-dependent resistor divider.
/// ADC1 channel 3 (GPIO 39, "A3").
pub const LIGHT_ADC_GPIO: i32 = 39;

/// ADC1 channel numbers matching the GPIOs above.
pub const MOISTURE_ADC_CHANNEL: u32 = 0;
pub const LIGHT_ADC_CHANNEL: u32 = 3;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

/// PWM output driving the passive piezo buzzer.
pub const BUZZER_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC channel reserved for tone generation.
pub const TONE_LEDC_CHANNEL: u32 = 0;
/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// 50% duty at 8-bit resolution, loudest square wave for a piezo.
pub const TONE_DUTY: u32 = 128;
