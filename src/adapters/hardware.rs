//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the [`BuzzerDriver`], exposing them through
//! [`SensorPort`] and [`TonePort`], and provides the blocking delay used
//! for blocking melody playback.  This is the only module in the system
//! that touches actual hardware.  On non-espidf targets, the underlying
//! drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{SensorPort, TonePort};
use crate::drivers::buzzer::BuzzerDriver;
use crate::sensors::{Channel, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    buzzer: BuzzerDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, buzzer: BuzzerDriver) -> Self {
        Self { sensor_hub, buzzer }
    }

    pub fn buzzer(&self) -> &BuzzerDriver {
        &self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_raw(&mut self, channel: Channel) -> u16 {
        self.sensor_hub.read_channel(channel)
    }
}

// ── TonePort implementation ───────────────────────────────────

impl TonePort for HardwareAdapter {
    fn emit_tone(&mut self, frequency_hz: u16) {
        self.buzzer.tone(frequency_hz);
    }

    fn silence(&mut self) {
        self.buzzer.silence();
    }
}

// ── Blocking delay ────────────────────────────────────────────

impl DelayNs for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos.delay_ns(ns);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    // FreeRTOS rounds to ticks; delegate whole milliseconds directly.
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}
