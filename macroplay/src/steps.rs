//! The step data model: one queued input action per variant.

use crate::errors::PlaybackError;
use crate::events::MouseButton;
use serde::{Deserialize, Serialize};

/// A single queued input action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Simulate a key shortcut given as canonical or raw text.
    Key { shortcut: String },
    /// Simulate a mouse click. The button is informational only; no pointer
    /// event is synthesized.
    Mouse { button: MouseButton },
    /// Suspend the run for the given duration.
    Wait { duration_ms: u64 },
}

impl Step {
    pub fn key(shortcut: impl Into<String>) -> Self {
        Step::Key {
            shortcut: shortcut.into(),
        }
    }

    pub fn mouse(button: MouseButton) -> Self {
        Step::Mouse { button }
    }

    pub fn wait_ms(duration_ms: u64) -> Self {
        Step::Wait { duration_ms }
    }

    /// Check the construction invariants callers are expected to uphold.
    ///
    /// Key steps need a non-empty shortcut expression. Wait durations are
    /// structurally non-negative, so there is nothing to check for them.
    pub fn validate(&self) -> Result<(), PlaybackError> {
        match self {
            Step::Key { shortcut } if shortcut.trim().is_empty() => Err(
                PlaybackError::InvalidShortcut("key step has no shortcut text".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Short human-readable label for list rendering.
    pub fn describe(&self) -> String {
        match self {
            Step::Key { shortcut } => format!("key input: {shortcut}"),
            Step::Mouse { button } => format!("mouse: {button} click"),
            Step::Wait { duration_ms } => format!("wait: {duration_ms}ms"),
        }
    }
}
