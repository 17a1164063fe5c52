//! Analog sensor driver (soil moisture probe, light-dependent resistor).
//!
//! Both sensors are plain voltage dividers read through an ADC1 channel;
//! one driver type serves both and is told which [`Channel`] it owns.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a per-channel static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

use super::Channel;

#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: Channel, raw: u16) {
    sim_slot(channel).store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
fn sim_slot(channel: Channel) -> &'static AtomicU16 {
    match channel {
        Channel::Moisture => &SIM_MOISTURE_ADC,
        Channel::Light => &SIM_LIGHT_ADC,
    }
}

pub struct AnalogSensor {
    channel: Channel,
    last_raw: u16,
    total_reads: u32,
}

impl AnalogSensor {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            last_raw: 0,
            total_reads: 0,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn read(&mut self) -> u16 {
        self.total_reads = self.total_reads.saturating_add(1);
        self.last_raw = self.read_adc();
        self.last_raw
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        let adc_channel = match self.channel {
            Channel::Moisture => pins::MOISTURE_ADC_CHANNEL,
            Channel::Light => pins::LIGHT_ADC_CHANNEL,
        };
        hw_init::adc1_read(adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        sim_slot(self.channel).load(Ordering::Relaxed)
    }
}
