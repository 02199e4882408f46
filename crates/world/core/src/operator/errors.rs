//! Error types surfaced by the world operator.

use crate::error::ErrorSeverity;

/// Errors that prevent a tick from running.
///
/// Rule mismatches are not errors; they are recorded in the diagnostics of
/// the next world instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickError {
    #[error("selected stage '{stage}' does not exist")]
    StageNotFound { stage: String },
}

impl TickError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StageNotFound { .. } => ErrorSeverity::Validation,
        }
    }
}
