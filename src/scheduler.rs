//! Interval timer for the melody cadence.
//!
//! The control loop ticks on its own period; melodies play on a slower
//! one.  Both run off the same monotonic millisecond clock.
//!
//! ```text
//!   tick ─▶ tick ─▶ tick ─▶ tick ─▶ tick ─▶ tick ─▶ …
//!   ♪                               ♪                 (interval elapsed)
//! ```
//!
//! The timer is checked once per tick.  When it fires the reference point
//! moves to *now* (not `+= interval`), so a late tick delays the next
//! melody instead of causing a catch-up double fire.

use log::debug;

#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: u64,
    last_fired_ms: u64,
    fire_count: u32,
}

impl IntervalTimer {
    /// The reference point starts at 0, so the first check at or after
    /// `interval_ms` fires.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_fired_ms: 0,
            fire_count: 0,
        }
    }

    /// `true` when `interval_ms` has elapsed since the last fire.
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fired_ms) >= self.interval_ms
    }

    /// Check and, if due, fire (reset the reference to `now_ms`).
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.fire(now_ms);
        true
    }

    /// Reset the reference point unconditionally (manual trigger).
    pub fn fire(&mut self, now_ms: u64) {
        self.last_fired_ms = now_ms;
        self.fire_count = self.fire_count.saturating_add(1);
        debug!("IntervalTimer: fired at {} ms (#{})", now_ms, self.fire_count);
    }

    /// Move the reference point without counting a fire.  Used when the
    /// fired action itself ran past `now_ms` (blocking playback).
    pub fn restart_at(&mut self, reference_ms: u64) {
        self.last_fired_ms = reference_ms;
    }

    pub fn last_fired_ms(&self) -> u64 {
        self.last_fired_ms
    }

    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }
}
