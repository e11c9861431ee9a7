//! Tool modes the gesture engine branches on.

use serde::{Deserialize, Serialize};

/// The active annotation tool. Owned by the host UI; the engine only reads
/// it on pointer-down and emits advisory change requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Draw new labels.
    #[default]
    Label,
    /// Select, translate and resize existing labels.
    Move,
}

impl Tool {
    /// Display name for the tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Label => "Label",
            Tool::Move => "Move",
        }
    }
}
