//! Dry-run input simulator that only logs what it would emit.

use tracing::info;

use crate::error::InputResult;
use crate::key::KeyBinding;
use crate::simulator::InputSimulator;

/// Logs input actions instead of emitting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunInput;

impl InputSimulator for DryRunInput {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn press_key(&self, key: &KeyBinding) -> InputResult<()> {
        info!("[dry-run] press {}", key.identifier());
        Ok(())
    }

    fn type_literal(&self, text: &str) -> InputResult<()> {
        info!("[dry-run] type {:?}", text);
        Ok(())
    }
}
