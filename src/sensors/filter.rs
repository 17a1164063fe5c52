//! Moving-average noise filter over a fixed-capacity ring buffer.
//!
//! Each channel keeps the last `W` raw samples.  Every call overwrites the
//! slot under the write cursor, advances the cursor modulo `W`, and returns
//! the integer-truncated mean of **all** `W` slots.
//!
//! The slots start at zero and take part in the mean before the window has
//! filled, so the first `W - 1` readings are biased low (towards DRY/DARK).
//! That warm-up transient is intentional and matches the deployed units.

use heapless::Vec;
use serde::Serialize;

use super::SensorSample;

/// Upper bound on the configurable window size (stack-allocated slots).
pub const MAX_WINDOW: usize = 32;

/// A filtered (averaged) pair of readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilteredReading {
    pub moisture: u16,
    pub light: u16,
}

/// Bounded ring buffer of `u16` samples, capacity fixed at construction.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Vec<u16, MAX_WINDOW>,
    cursor: usize,
}

impl RingBuffer {
    /// Create a zero-filled buffer of `size` slots (clamped to 1..=MAX_WINDOW).
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, MAX_WINDOW);
        let mut slots = Vec::new();
        // Cannot fail: size <= MAX_WINDOW.
        let _ = slots.resize(size, 0);
        Self { slots, cursor: 0 }
    }

    /// Overwrite the slot under the cursor and advance it.
    pub fn push(&mut self, value: u16) {
        self.slots[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    /// Truncated mean over every slot, filled or not.
    pub fn mean(&self) -> u16 {
        let sum: u32 = self.slots.iter().map(|&v| u32::from(v)).sum();
        (sum / self.slots.len() as u32) as u16
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero every slot and rewind the cursor.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|v| *v = 0);
        self.cursor = 0;
    }
}

/// Per-channel moving-average filter.
#[derive(Debug, Clone)]
pub struct SignalFilter {
    moisture: RingBuffer,
    light: RingBuffer,
    samples_seen: u32,
}

impl SignalFilter {
    pub fn new(window: usize) -> Self {
        Self {
            moisture: RingBuffer::new(window),
            light: RingBuffer::new(window),
            samples_seen: 0,
        }
    }

    /// Feed one raw sample and return the updated averages.
    pub fn filter(&mut self, raw: SensorSample) -> FilteredReading {
        self.moisture.push(raw.moisture_raw);
        self.light.push(raw.light_raw);
        self.samples_seen = self.samples_seen.saturating_add(1);

        FilteredReading {
            moisture: self.moisture.mean(),
            light: self.light.mean(),
        }
    }

    /// `true` once every slot holds a real sample.
    pub fn is_warmed_up(&self) -> bool {
        self.samples_seen as usize >= self.moisture.len()
    }

    pub fn window(&self) -> usize {
        self.moisture.len()
    }

    pub fn reset(&mut self) {
        self.moisture.clear();
        self.light.clear();
        self.samples_seen = 0;
    }
}
