//! Common error infrastructure for world-core.
//!
//! Scenario mismatches are not errors (see [`crate::Mismatch`]); only
//! conditions that prevent a tick from running at all surface as
//! [`crate::TickError`], each classified by an [`ErrorSeverity`].

/// Severity level of an error, used for categorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: world document referencing a stage it does not contain.
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}
