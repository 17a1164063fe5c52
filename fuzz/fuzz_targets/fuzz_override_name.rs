//! Fuzz target: override name parsing and pattern selection
//!
//! Feeds arbitrary byte strings (as lossy UTF-8) to the override path and
//! checks that an untrusted name can never select something outside the
//! pattern library.
//!
//! Invariants checked:
//! - No panics under any input
//! - A parsed name round-trips through `PatternName::as_str`
//! - A rejected name always yields the local policy selection
//!
//! cargo fuzz run fuzz_override_name

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantsong::app::selector::{SelectionSource, policy_pattern, select_pattern};
use plantsong::classify::{MoistureState, PlantCondition};
use plantsong::melody::PatternName;

fuzz_target!(|data: &[u8]| {
    let name = String::from_utf8_lossy(data);

    if let Ok(p) = name.parse::<PatternName>() {
        assert_eq!(p.as_str(), name.as_ref());
    }

    let condition = PlantCondition::Neutral;
    let moisture = MoistureState::Optimal;
    let (sel, err) = select_pattern(condition, moisture, Some(&name));
    if err.is_some() || sel.source == SelectionSource::Policy {
        assert_eq!(sel.pattern, policy_pattern(condition, moisture));
    }
});
