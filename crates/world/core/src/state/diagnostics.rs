//! Per-actor, per-rule evaluation records published with every world.

use std::collections::BTreeMap;

use super::{ActorId, LocalId, Position, RuleId};

/// Diagnostics of one tick, keyed by actor then rule.
pub type EvaluatedRuleDetails = BTreeMap<ActorId, BTreeMap<RuleId, RuleEvaluation>>;

/// What happened to a rule during the last tick.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", rename_all = "kebab-case")
)]
pub enum RuleEvaluation {
    /// Never reached: an event gate was closed or a sibling fired first.
    #[default]
    NotEvaluated,
    Evaluated(RuleDetail),
}

impl RuleEvaluation {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Evaluated(detail) if detail.passed)
    }
}

/// Outcome of evaluating one rule for one actor.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleDetail {
    pub passed: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub mismatch: Option<Mismatch>,
    /// Enabled condition keys and whether they held.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: BTreeMap<String, bool>,
    /// Template-to-stage bindings of a successful match.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bindings: BTreeMap<LocalId, ActorId>,
}

/// Why a scenario did not match.
///
/// A mismatch is ordinary control flow, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "reason", rename_all = "kebab-case")
)]
pub enum Mismatch {
    /// The main actor is gone, or the rule's main template is missing or of
    /// another character.
    MainActor,
    /// A window cell lies off a non-wrapping stage.
    OffStage { cell: Position },
    /// Stage and template occupancy of a cell differ.
    CountMismatch {
        cell: Position,
        expected: usize,
        found: usize,
    },
    /// A stage actor found no template to bind to.
    Unmatched { cell: Position, actor: ActorId },
    /// A condition or action refers to a template that was never bound.
    UnboundActor { local: LocalId },
    /// A move or create destination is unreachable.
    InvalidTarget { local: LocalId },
    ConditionFailed { key: String },
}
