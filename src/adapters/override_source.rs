//! Pattern override sources.
//!
//! The device ships without a remote selector; [`NoOverride`] keeps the
//! local policy in charge.  [`FixedOverride`] pins one pattern name, which
//! is what a serial console command or a bench test wants.

use heapless::String;

use crate::app::ports::{OVERRIDE_NAME_CAP, OverrideContext, PatternOverride};
use crate::error::OverrideError;

/// Never overrides.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverride;

impl PatternOverride for NoOverride {
    fn poll_override(
        &mut self,
        _ctx: &OverrideContext,
    ) -> Result<Option<String<OVERRIDE_NAME_CAP>>, OverrideError> {
        Ok(None)
    }
}

/// Always answers with the same name (validated by the engine, not here).
#[derive(Debug, Default, Clone)]
pub struct FixedOverride {
    name: Option<String<OVERRIDE_NAME_CAP>>,
}

impl FixedOverride {
    /// Names longer than [`OVERRIDE_NAME_CAP`] are truncated.
    pub fn new(name: &str) -> Self {
        let mut fixed = String::new();
        for c in name.chars() {
            if fixed.push(c).is_err() {
                break;
            }
        }
        Self { name: Some(fixed) }
    }

    pub fn clear(&mut self) {
        self.name = None;
    }
}

impl PatternOverride for FixedOverride {
    fn poll_override(
        &mut self,
        _ctx: &OverrideContext,
    ) -> Result<Option<String<OVERRIDE_NAME_CAP>>, OverrideError> {
        Ok(self.name.clone())
    }
}
