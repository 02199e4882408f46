//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Single-pass Semantics
///
/// Nodes finish within one evaluation:
/// - Conditions evaluate immediately (e.g., "does the pattern match here?")
/// - Effects apply atomically before the node returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node fired: its condition held and its effects were applied.
    Success,

    /// The node did nothing.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Maps `true` to `Success` and `false` to `Failure`.
    #[inline]
    pub fn from_bool(fired: bool) -> Self {
        if fired { Status::Success } else { Status::Failure }
    }

    /// Logical OR of two statuses: `Success` if either fired.
    #[inline]
    pub fn or(self, other: Status) -> Self {
        Status::from_bool(self.is_success() || other.is_success())
    }
}
