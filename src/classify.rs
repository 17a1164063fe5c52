//! Threshold classification of filtered readings into plant condition.
//!
//! ```text
//!  FilteredReading ──▶ MoistureState ─┐
//!                                     ├──▶ PlantCondition ──▶ health label
//!                  ──▶ LightState ────┘
//! ```
//!
//! Everything here is a pure, total function: every reading maps to exactly
//! one moisture state, one light state and one overall condition.

use core::fmt;

use serde::Serialize;

use crate::sensors::filter::FilteredReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoistureState {
    Dry,
    Optimal,
    Wet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LightState {
    Dark,
    Moderate,
    Bright,
}

/// Overall plant condition derived from the moisture/light pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlantCondition {
    Happy,
    Neutral,
    Stressed,
    Alert,
}

impl PlantCondition {
    /// Human-readable health label shown in every status report.
    pub const fn health_label(self) -> &'static str {
        match self {
            Self::Happy => "THRIVING",
            Self::Stressed => "NEEDS ATTENTION",
            Self::Alert => "REQUIRES IMMEDIATE CARE",
            Self::Neutral => "STABLE",
        }
    }
}

impl fmt::Display for MoistureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dry => "DRY",
            Self::Optimal => "OPTIMAL",
            Self::Wet => "WET",
        })
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "DARK",
            Self::Moderate => "MODERATE",
            Self::Bright => "BRIGHT",
        })
    }
}

impl fmt::Display for PlantCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Happy => "HAPPY",
            Self::Neutral => "NEUTRAL",
            Self::Stressed => "STRESSED",
            Self::Alert => "ALERT",
        })
    }
}

/// The four classification cut-offs, in raw ADC units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub moisture_dry: u16,
    pub moisture_wet: u16,
    pub light_dark: u16,
    pub light_bright: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        crate::config::EngineConfig::default().thresholds()
    }
}

/// Result of classifying one filtered reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub moisture: MoistureState,
    pub light: LightState,
    pub overall: PlantCondition,
}

impl Default for Classification {
    /// Startup value before the first tick: neutral on every axis.
    fn default() -> Self {
        Self {
            moisture: MoistureState::Optimal,
            light: LightState::Moderate,
            overall: PlantCondition::Neutral,
        }
    }
}

pub fn classify_moisture(value: u16, t: &Thresholds) -> MoistureState {
    if value < t.moisture_dry {
        MoistureState::Dry
    } else if value > t.moisture_wet {
        MoistureState::Wet
    } else {
        MoistureState::Optimal
    }
}

pub fn classify_light(value: u16, t: &Thresholds) -> LightState {
    if value < t.light_dark {
        LightState::Dark
    } else if value > t.light_bright {
        LightState::Bright
    } else {
        LightState::Moderate
    }
}

/// Combine the two axis states.  Rules are checked in order; the first
/// match wins.
pub fn overall_condition(moisture: MoistureState, light: LightState) -> PlantCondition {
    use LightState::{Bright, Dark, Moderate};
    use MoistureState::{Dry, Optimal, Wet};

    match (moisture, light) {
        (Optimal, Moderate | Bright) => PlantCondition::Happy,
        (Dry, _) | (_, Dark) => PlantCondition::Stressed,
        (Wet, _) => PlantCondition::Alert,
        // Unreachable while each axis has three states; rule 4 fallback.
        #[allow(unreachable_patterns)]
        _ => PlantCondition::Neutral,
    }
}

pub fn classify(reading: &FilteredReading, thresholds: &Thresholds) -> Classification {
    let moisture = classify_moisture(reading.moisture, thresholds);
    let light = classify_light(reading.light, thresholds);
    Classification {
        moisture,
        light,
        overall: overall_condition(moisture, light),
    }
}
