//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  Each
//! line carries a short tag so a serial monitor can grep for it.  With
//! `debug` enabled, every status report is also written as one JSON line.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, StatusReport};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }

    fn status_json(&self, report: &StatusReport) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match serde_json::to_string(report) {
            Ok(json) => debug!("JSON  | {}", json),
            Err(e) => warn!("JSON  | status encode failed: {}", e),
        }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | #{} t={}ms | raw M={} L={} | avg M={} L={} | \
                     {}/{} -> {} | pattern={} ({:?}) | {}",
                    s.tick,
                    s.uptime_ms,
                    s.raw.moisture_raw,
                    s.raw.light_raw,
                    s.filtered.moisture,
                    s.filtered.light,
                    s.classification.moisture,
                    s.classification.light,
                    s.classification.overall,
                    s.selection.pattern,
                    s.selection.source,
                    s.health,
                );
                self.status_json(s);
            }
            AppEvent::ConditionChanged { from, to } => {
                info!("PLANT | {} -> {}", from, to);
            }
            AppEvent::SensorWarning(e) => {
                warn!("SENSOR | {}", e);
            }
            AppEvent::OverrideRejected { name, error } => match name {
                Some(n) => warn!("OVERRIDE | '{}' rejected: {}", n, error),
                None => warn!("OVERRIDE | unavailable: {}", error),
            },
            AppEvent::MelodyStarted(id) => info!("MELODY | start {:?}", id),
            AppEvent::MelodyFinished(id) => info!("MELODY | done {:?}", id),
            AppEvent::MelodyPreempted(id) => info!("MELODY | stopped {:?}", id),
            AppEvent::MelodySkipped(p) => info!("MELODY | muted, skipped {}", p),
            AppEvent::MuteChanged(m) => info!("MUTE  | {}", if *m { "on" } else { "off" }),
            AppEvent::Started(mode) => {
                info!("START | playback={:?}", mode);
            }
            AppEvent::ConfigReport(c) => {
                info!(
                    "CONFIG | moisture dry<{} wet>{} | light dark<{} bright>{} | \
                     window={} | melody every {}s | gap={}ms",
                    c.moisture_dry_threshold,
                    c.moisture_wet_threshold,
                    c.light_dark_threshold,
                    c.light_bright_threshold,
                    c.window_size,
                    c.melody_interval_secs,
                    c.inter_note_gap_ms,
                );
            }
        }
    }
}
