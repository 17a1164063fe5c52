//! Pattern selection policy.
//!
//! | Condition | Moisture | Pattern  |
//! |-----------|----------|----------|
//! | HAPPY     | any      | HAPPY    |
//! | STRESSED  | any      | ALERT    |
//! | ALERT     | any      | ALERT    |
//! | NEUTRAL   | OPTIMAL  | RELAXED  |
//! | NEUTRAL   | other    | NEUTRAL  |
//!
//! A valid external override replaces the table outright.

use serde::Serialize;

use crate::classify::{MoistureState, PlantCondition};
use crate::error::OverrideError;
use crate::melody::PatternName;

/// Where the selected pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionSource {
    Policy,
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub pattern: PatternName,
    pub source: SelectionSource,
}

/// The local, deterministic policy table.
pub fn policy_pattern(condition: PlantCondition, moisture: MoistureState) -> PatternName {
    match condition {
        PlantCondition::Happy => PatternName::Happy,
        PlantCondition::Stressed | PlantCondition::Alert => PatternName::Alert,
        PlantCondition::Neutral => match moisture {
            MoistureState::Optimal => PatternName::Relaxed,
            MoistureState::Dry | MoistureState::Wet => PatternName::Neutral,
        },
    }
}

/// Pick a pattern.  An override that names a library pattern wins; an empty
/// or unknown one is ignored.  The second element carries the reason an
/// override was ignored so the caller can report it.
pub fn select_pattern(
    condition: PlantCondition,
    moisture: MoistureState,
    override_name: Option<&str>,
) -> (Selection, Option<OverrideError>) {
    let policy = Selection {
        pattern: policy_pattern(condition, moisture),
        source: SelectionSource::Policy,
    };

    match override_name.filter(|s| !s.is_empty()) {
        None => (policy, None),
        Some(name) => match name.parse::<PatternName>() {
            Ok(pattern) => (
                Selection {
                    pattern,
                    source: SelectionSource::Override,
                },
                None,
            ),
            Err(e) => (policy, Some(e)),
        },
    }
}
