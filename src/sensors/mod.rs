//! Sensor subsystem: analog drivers, the aggregating [`SensorHub`], and the
//! moving-average [`filter`].
//!
//! The hub owns both drivers and produces a [`SensorSample`] each tick.  The
//! control loop never talks to the drivers directly; it goes through
//! [`SensorPort`](crate::app::ports::SensorPort).

pub mod analog;
pub mod filter;

use core::fmt;

use heapless::Vec;
use serde::Serialize;

use crate::error::SensorError;
use analog::AnalogSensor;

/// The two analog inputs the engine samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Moisture,
    Light,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Moisture, Channel::Light];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moisture => write!(f, "moisture"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// One raw reading per channel, taken in the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SensorSample {
    pub moisture_raw: u16,
    pub light_raw: u16,
}

impl SensorSample {
    pub fn get(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.moisture_raw,
            Channel::Light => self.light_raw,
        }
    }

    /// Flag every channel whose raw value exceeds `adc_max`.
    ///
    /// Values are never clamped; an out-of-range reading still feeds the
    /// filter.  The caller reports the returned warnings.
    pub fn range_warnings(&self, adc_max: u16) -> Vec<SensorError, 2> {
        let mut warnings = Vec::new();
        for channel in Channel::ALL {
            let raw = self.get(channel);
            if raw > adc_max {
                // Capacity equals Channel::ALL.len().
                let _ = warnings.push(SensorError::OutOfRange {
                    channel,
                    raw,
                    max: adc_max,
                });
            }
        }
        warnings
    }
}

/// Aggregates both analog drivers.
pub struct SensorHub {
    pub moisture: AnalogSensor,
    pub light: AnalogSensor,
}

impl SensorHub {
    pub fn new() -> Self {
        Self {
            moisture: AnalogSensor::new(Channel::Moisture),
            light: AnalogSensor::new(Channel::Light),
        }
    }

    pub fn read_channel(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.moisture.read(),
            Channel::Light => self.light.read(),
        }
    }
}

impl Default for SensorHub {
    fn default() -> Self {
        Self::new()
    }
}
