//! Fixed pattern catalogue.
//!
//! | Pattern  | Mood                                   | Notes | Length  |
//! |----------|----------------------------------------|-------|---------|
//! | HAPPY    | upbeat, healthy well-lit plant         | 13    | 3260 ms |
//! | RELAXED  | gentle, content plant                  | 12    | 5240 ms |
//! | NEUTRAL  | simple, stable conditions              | 12    | 4240 ms |
//! | ALERT    | triple-beep warning, needs care        | 12    | 1740 ms |
//!
//! Lengths include the default 20 ms inter-note gap.

use super::{A4, B4, C4, C5, D4, D5, E4, E5, F4, F5, G4, G5, Note, PatternName};

pub const HAPPY: &[Note] = &[
    Note::tone(C5, 200),
    Note::tone(E5, 200),
    Note::tone(G5, 200),
    Note::tone(C5, 200),
    Note::tone(F5, 300),
    Note::tone(E5, 200),
    Note::tone(D5, 200),
    Note::tone(C5, 400),
    Note::tone(G5, 200),
    Note::tone(F5, 200),
    Note::tone(E5, 200),
    Note::tone(G5, 400),
    Note::rest(100),
];

pub const RELAXED: &[Note] = &[
    Note::tone(C4, 400),
    Note::tone(E4, 400),
    Note::tone(G4, 600),
    Note::rest(200),
    Note::tone(F4, 400),
    Note::tone(A4, 400),
    Note::tone(C5, 600),
    Note::rest(200),
    Note::tone(G4, 400),
    Note::tone(C5, 400),
    Note::tone(E5, 800),
    Note::rest(200),
];

pub const NEUTRAL: &[Note] = &[
    Note::tone(A4, 300),
    Note::rest(100),
    Note::tone(A4, 300),
    Note::rest(100),
    Note::tone(C5, 400),
    Note::tone(B4, 400),
    Note::tone(A4, 600),
    Note::rest(200),
    Note::tone(G4, 400),
    Note::tone(A4, 400),
    Note::tone(C5, 600),
    Note::rest(200),
];

pub const ALERT: &[Note] = &[
    Note::tone(C5, 150),
    Note::rest(50),
    Note::tone(C5, 150),
    Note::rest(50),
    Note::tone(C5, 150),
    Note::rest(100),
    Note::tone(G4, 200),
    Note::rest(100),
    Note::tone(C5, 150),
    Note::rest(50),
    Note::tone(C5, 150),
    Note::rest(200),
];

/// Boot chime: ascending C major scale.  Shorter holds and a longer gap than
/// the mood patterns, so it carries its own gap and trailing settle time.
pub const STARTUP: &[Note] = &[
    Note::tone(C4, 150),
    Note::tone(D4, 150),
    Note::tone(E4, 150),
    Note::tone(F4, 150),
    Note::tone(G4, 150),
    Note::tone(A4, 150),
    Note::tone(B4, 150),
    Note::tone(C5, 150),
];
pub const STARTUP_GAP_MS: u32 = 50;
pub const STARTUP_SETTLE_MS: u32 = 500;

/// Look up the note sequence for a pattern.
pub const fn notes(pattern: PatternName) -> &'static [Note] {
    match pattern {
        PatternName::Happy => HAPPY,
        PatternName::Relaxed => RELAXED,
        PatternName::Neutral => NEUTRAL,
        PatternName::Alert => ALERT,
    }
}
