//! Melody sequencer: resumable playback state machine.
//!
//! ```text
//!            start()
//!   Idle ───────────▶ Emitting(0) ──hold──▶ Gap(0) ──gap──▶ Emitting(1) ─ …
//!    ▲                                                        │
//!    │            (last note)  Gap(n-1) ──gap──▶ [Settling] ──┘
//!    └───────────────────────────────────────────────────────┘
//!                     silence() on every way back to Idle
//! ```
//!
//! The sequencer never sleeps.  [`poll`](MelodySequencer::poll) is given the
//! current monotonic time and advances **at most one** transition when the
//! current hold has elapsed, so the control loop can interleave playback
//! with sensing (cooperative mode).  [`play_blocking`](MelodySequencer::play_blocking)
//! drives the same machine to completion with an `embedded-hal` delay.
//!
//! Every exit path (completion, [`cancel`](MelodySequencer::cancel), a new
//! `start` preempting the old one) leaves the tone port silent.

use embedded_hal::delay::DelayNs;
use log::debug;
use serde::Serialize;

use crate::app::ports::TonePort;

use super::library::{self, STARTUP_GAP_MS, STARTUP_SETTLE_MS};
use super::{Note, PatternName};

/// What is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackId {
    Startup,
    Pattern(PatternName),
}

/// A note sequence plus its timing envelope.
#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub id: TrackId,
    pub notes: &'static [Note],
    /// Silence after every note.
    pub gap_ms: u32,
    /// Extra silence after the final gap before the track counts as done.
    pub settle_ms: u32,
}

impl Track {
    pub fn pattern(pattern: PatternName, gap_ms: u32) -> Self {
        Self {
            id: TrackId::Pattern(pattern),
            notes: library::notes(pattern),
            gap_ms,
            settle_ms: 0,
        }
    }

    pub fn startup() -> Self {
        Self {
            id: TrackId::Startup,
            notes: library::STARTUP,
            gap_ms: STARTUP_GAP_MS,
            settle_ms: STARTUP_SETTLE_MS,
        }
    }

    /// Wall-clock length of a full, uninterrupted playback.
    pub fn duration_ms(&self) -> u32 {
        super::playback_duration_ms(self.notes, self.gap_ms) + self.settle_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Emitting { index: usize, until_ms: u64 },
    Gap { index: usize, until_ms: u64 },
    Settling { until_ms: u64 },
}

/// Outcome of a single [`MelodySequencer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing is playing.
    Idle,
    /// The current hold has not elapsed yet.
    Holding,
    /// Moved to the next note or gap.
    Advanced,
    /// The track just ended; the device is silent.
    Finished(TrackId),
}

/// Snapshot of the sequencer for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub track: Option<TrackId>,
    pub position: usize,
    pub active: bool,
}

pub struct MelodySequencer {
    track: Option<Track>,
    phase: Phase,
}

impl MelodySequencer {
    pub fn new() -> Self {
        Self {
            track: None,
            phase: Phase::Idle,
        }
    }

    /// Begin `track` at `now_ms`.  Anything already playing is preempted
    /// first; its id is returned.
    pub fn start(
        &mut self,
        track: Track,
        now_ms: u64,
        tone: &mut impl TonePort,
    ) -> Option<TrackId> {
        let preempted = self.cancel(tone);
        debug!("Sequencer: start {:?} ({} notes)", track.id, track.notes.len());

        if track.notes.is_empty() {
            return preempted;
        }
        self.track = Some(track);
        self.enter_note(0, now_ms, tone);
        preempted
    }

    /// Advance by at most one transition.
    pub fn poll(&mut self, now_ms: u64, tone: &mut impl TonePort) -> Step {
        let Some(track) = self.track else {
            return Step::Idle;
        };

        match self.phase {
            Phase::Idle => Step::Idle,
            Phase::Emitting { index, until_ms } => {
                if now_ms < until_ms {
                    return Step::Holding;
                }
                tone.silence();
                self.phase = Phase::Gap {
                    index,
                    until_ms: now_ms + u64::from(track.gap_ms),
                };
                Step::Advanced
            }
            Phase::Gap { index, until_ms } => {
                if now_ms < until_ms {
                    return Step::Holding;
                }
                let next = index + 1;
                if next < track.notes.len() {
                    self.enter_note(next, now_ms, tone);
                    Step::Advanced
                } else if track.settle_ms > 0 {
                    self.phase = Phase::Settling {
                        until_ms: now_ms + u64::from(track.settle_ms),
                    };
                    Step::Advanced
                } else {
                    self.finish(tone)
                }
            }
            Phase::Settling { until_ms } => {
                if now_ms < until_ms {
                    return Step::Holding;
                }
                self.finish(tone)
            }
        }
    }

    /// Stop immediately, leaving the device silent.  Returns the id of the
    /// track that was interrupted, if any.
    pub fn cancel(&mut self, tone: &mut impl TonePort) -> Option<TrackId> {
        let was = self.track.take().map(|t| t.id);
        if was.is_some() {
            debug!("Sequencer: preempted {:?}", was);
        }
        tone.silence();
        self.phase = Phase::Idle;
        was
    }

    /// Play `track` from start to finish, holding each step with the
    /// port's delay.
    ///
    /// `hw` provides **both** the tone output and the delay, so one
    /// adapter can be lent without a double mutable borrow.
    pub fn play_blocking(&mut self, track: Track, hw: &mut (impl TonePort + DelayNs)) -> TrackId {
        let mut now_ms = 0u64;
        self.start(track, now_ms, hw);
        loop {
            let wait = self.remaining_ms(now_ms);
            if wait > 0 {
                hw.delay_ms(wait);
                now_ms += u64::from(wait);
            }
            match self.poll(now_ms, hw) {
                Step::Finished(id) => return id,
                // Empty track: start() never left Idle.
                Step::Idle => return track.id,
                Step::Holding | Step::Advanced => {}
            }
        }
    }

    /// Milliseconds until the current hold elapses (0 when idle).
    pub fn remaining_ms(&self, now_ms: u64) -> u32 {
        let until = match self.phase {
            Phase::Idle => return 0,
            Phase::Emitting { until_ms, .. }
            | Phase::Gap { until_ms, .. }
            | Phase::Settling { until_ms } => until_ms,
        };
        until.saturating_sub(now_ms).min(u64::from(u32::MAX)) as u32
    }

    pub fn is_active(&self) -> bool {
        self.track.is_some()
    }

    pub fn current(&self) -> Option<TrackId> {
        self.track.map(|t| t.id)
    }

    pub fn state(&self) -> PlaybackState {
        let position = match self.phase {
            Phase::Emitting { index, .. } | Phase::Gap { index, .. } => index,
            Phase::Settling { .. } => self.track.map_or(0, |t| t.notes.len()),
            Phase::Idle => 0,
        };
        PlaybackState {
            track: self.current(),
            position,
            active: self.is_active(),
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn enter_note(&mut self, index: usize, now_ms: u64, tone: &mut impl TonePort) {
        let Some(track) = self.track else { return };
        let note = track.notes[index];
        if note.is_rest() {
            tone.silence();
        } else {
            tone.emit_tone(note.frequency_hz);
        }
        self.phase = Phase::Emitting {
            index,
            until_ms: now_ms + u64::from(note.duration_ms),
        };
    }

    fn finish(&mut self, tone: &mut impl TonePort) -> Step {
        tone.silence();
        self.phase = Phase::Idle;
        match self.track.take() {
            Some(t) => Step::Finished(t.id),
            None => Step::Idle,
        }
    }
}

impl Default for MelodySequencer {
    fn default() -> Self {
        Self::new()
    }
}
