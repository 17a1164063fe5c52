//! PlantSong Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed-period control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink   NoOverride  Monotonic   │
//! │  (Sensor+Tone+Delay)    (EventSink)    (Override)  Clock       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Filter · Classify · Select · Sequencer                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use plantsong::adapters::hardware::HardwareAdapter;
use plantsong::adapters::log_sink::LogEventSink;
use plantsong::adapters::override_source::NoOverride;
use plantsong::adapters::time::MonotonicClock;
use plantsong::app::service::AppService;
use plantsong::config::{EngineConfig, PlaybackMode};
use plantsong::drivers::buzzer::BuzzerDriver;
use plantsong::drivers::hw_init;
use plantsong::error::Error;
use plantsong::sensors::SensorHub;

/// Shortest sleep between cooperative playback polls.
const MIN_POLL_MS: u32 = 1;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantSong v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;

    // ── 3. Build adapters and the app service ─────────────────
    let config = EngineConfig::default();
    let tick_ms = config.tick_interval_ms;
    let mode = config.playback_mode;

    let clock = MonotonicClock::new();
    let mut hw = HardwareAdapter::new(SensorHub::new(), BuzzerDriver::new());
    let mut log_sink = LogEventSink::new();
    let mut source = NoOverride;

    let mut app = AppService::new(config);
    app.start(clock.uptime_ms(), &mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    let mut next_tick_ms = clock.uptime_ms();
    loop {
        let now = clock.uptime_ms();
        if now >= next_tick_ms {
            app.tick(now, &mut hw, &mut source, &mut log_sink);
            // Period counts from the end of the tick, blocking playback included.
            next_tick_ms = clock.uptime_ms() + u64::from(tick_ms);
        }

        let now = clock.uptime_ms();
        let until_tick = next_tick_ms.saturating_sub(now).min(u64::from(tick_ms)) as u32;

        let sleep_ms = match mode {
            PlaybackMode::Blocking => until_tick,
            PlaybackMode::Cooperative => {
                app.poll_playback(now, &mut hw, &mut log_sink);
                if app.is_playing() {
                    app.next_playback_deadline_ms(now).clamp(MIN_POLL_MS, until_tick.max(MIN_POLL_MS))
                } else {
                    until_tick
                }
            }
        };
        FreeRtos::delay_ms(sleep_ms.max(MIN_POLL_MS));
    }
}
