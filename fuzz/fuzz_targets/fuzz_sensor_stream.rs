//! Fuzz target: control loop under arbitrary ADC streams
//!
//! Each 4-byte chunk becomes one tick's (moisture, light) raw pair, any
//! 16-bit value including out-of-range ones.  Ticks are 2 s apart with
//! cooperative playback polled in between.
//!
//! Invariants checked:
//! - No panics or overflow under any reading sequence
//! - Filtered values never exceed the largest raw value seen
//! - The buzzer is silent whenever nothing is playing
//!
//! cargo fuzz run fuzz_sensor_stream

#![no_main]

use embedded_hal::delay::DelayNs;
use heapless::String;
use libfuzzer_sys::fuzz_target;
use plantsong::app::events::AppEvent;
use plantsong::app::ports::{
    EventSink, OVERRIDE_NAME_CAP, OverrideContext, PatternOverride, SensorPort, TonePort,
};
use plantsong::app::service::AppService;
use plantsong::config::{EngineConfig, PlaybackMode};
use plantsong::error::OverrideError;
use plantsong::sensors::Channel;

struct Rig {
    raw: (u16, u16),
    sounding: bool,
}

impl SensorPort for Rig {
    fn read_raw(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.raw.0,
            Channel::Light => self.raw.1,
        }
    }
}

impl TonePort for Rig {
    fn emit_tone(&mut self, _frequency_hz: u16) {
        self.sounding = true;
    }
    fn silence(&mut self) {
        self.sounding = false;
    }
}

impl DelayNs for Rig {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct NoOverride;

impl PatternOverride for NoOverride {
    fn poll_override(
        &mut self,
        _ctx: &OverrideContext,
    ) -> Result<Option<String<OVERRIDE_NAME_CAP>>, OverrideError> {
        Ok(None)
    }
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(EngineConfig {
        playback_mode: PlaybackMode::Cooperative,
        ..EngineConfig::default()
    });
    let mut rig = Rig { raw: (0, 0), sounding: false };
    let mut sink = Discard;
    app.start(0, &mut rig, &mut sink);

    let mut max_seen = 0u16;
    let mut now = 0u64;
    for chunk in data.chunks_exact(4) {
        rig.raw = (
            u16::from_le_bytes([chunk[0], chunk[1]]),
            u16::from_le_bytes([chunk[2], chunk[3]]),
        );
        max_seen = max_seen.max(rig.raw.0).max(rig.raw.1);

        now += 2_000;
        let report = app.tick(now, &mut rig, &mut NoOverride, &mut sink);
        assert!(report.filtered.moisture <= max_seen);
        assert!(report.filtered.light <= max_seen);

        for t in (now..now + 2_000).step_by(50) {
            app.poll_playback(t, &mut rig, &mut sink);
        }
        if !app.is_playing() {
            assert!(!rig.sounding);
        }
    }
});
