//! Rule tree data: event gates, flow groups and leaf rules.
//!
//! Rule trees are plain data edited by authoring tools; the walker in
//! [`crate::operator`] interprets them. Malformed references are not
//! rejected here, they simply never match.

use std::collections::{BTreeMap, BTreeSet};

use strum::{AsRefStr, Display, EnumString};

use super::{Actor, LocalId, Position, RuleId};

/// One node of a character's rule tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum RuleTreeItem {
    #[cfg_attr(feature = "serde", serde(rename = "group-event"))]
    EventGroup(EventGroup),
    #[cfg_attr(feature = "serde", serde(rename = "group-flow"))]
    FlowGroup(FlowGroup),
    #[cfg_attr(feature = "serde", serde(rename = "rule"))]
    Rule(Rule),
}

/// Input that admits evaluation of an [`EventGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    /// Always admitted.
    #[default]
    Idle,
    /// Admitted while `code` is among the pressed keys.
    Key,
    /// Admitted when the walked actor was clicked this tick.
    Click,
}

/// Gate that only admits its children under a specific input.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventGroup {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub event: EventKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub code: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<RuleTreeItem>,
}

/// How many children of a [`FlowGroup`] fire in one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum FlowBehavior {
    /// Stop at the first child that fires.
    #[default]
    First,
    /// Evaluate every child.
    All,
    /// Like `First`, over a shuffled order.
    Random,
    /// Repeat a `First` pass `loopCount` times.
    Loop,
}

/// Control-flow container over child items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlowGroup {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub behavior: FlowBehavior,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub loop_count: Option<RuleValue>,
    /// Conditions checked against the walked actor before entering.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub precondition: Option<Vec<RuleCondition>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<RuleTreeItem>,
}

/// A leaf: a local scenario to match and the actions to apply when it does.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rule {
    pub id: RuleId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub main_actor_id: LocalId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<RuleCondition>,
    /// Template actors, positioned relative to the main actor at (0,0).
    pub actors: BTreeMap<LocalId, Actor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<RuleAction>,
    pub extent: RuleExtent,
}

/// Local window around the main actor that a match must account for.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleExtent {
    pub xmin: i32,
    pub xmax: i32,
    pub ymin: i32,
    pub ymax: i32,
    /// Cells whose contents do not have to line up with the templates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignored: BTreeSet<Position>,
}

impl RuleExtent {
    pub fn new(xmin: i32, xmax: i32, ymin: i32, ymax: i32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
            ignored: BTreeSet::new(),
        }
    }

    /// The 1x1 window holding only the main actor.
    pub fn single() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn with_ignored(mut self, cell: Position) -> Self {
        self.ignored.insert(cell);
        self
    }

    pub fn is_ignored(&self, cell: Position) -> bool {
        self.ignored.contains(&cell)
    }

    /// Every cell of the window, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.xmin..=self.xmax)
            .flat_map(move |x| (self.ymin..=self.ymax).map(move |y| Position::new(x, y)))
    }
}

/// One comparison between two resolved values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleCondition {
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
    pub left: RuleValue,
    pub comparator: Comparator,
    pub right: RuleValue,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl RuleCondition {
    pub fn new(key: impl Into<String>, left: RuleValue, comparator: Comparator, right: RuleValue) -> Self {
        Self {
            key: key.into(),
            enabled: true,
            left,
            comparator,
            right,
        }
    }

    /// Local actor ids referenced by either side.
    pub fn actor_refs(&self) -> impl Iterator<Item = LocalId> + '_ {
        self.left.actor_ref().into_iter().chain(self.right.actor_ref())
    }

    pub fn references(&self, local: LocalId) -> bool {
        self.actor_refs().any(|id| id == local)
    }
}

/// Reserved variable name resolving to an actor's appearance.
pub const APPEARANCE_VARIABLE: &str = "appearance";

/// Reserved variable name resolving to an actor's transform tag.
pub const TRANSFORM_VARIABLE: &str = "transform";

/// Rule-side operand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RuleValue {
    Constant(String),
    /// A variable of a template actor, or `appearance` / `transform`.
    Actor {
        #[cfg_attr(feature = "serde", serde(rename = "actorId"))]
        actor_id: LocalId,
        variable: String,
    },
    Global(String),
}

impl RuleValue {
    pub fn constant(value: impl Into<String>) -> Self {
        Self::Constant(value.into())
    }

    pub fn actor(actor_id: LocalId, variable: impl Into<String>) -> Self {
        Self::Actor {
            actor_id,
            variable: variable.into(),
        }
    }

    pub fn global(id: impl Into<String>) -> Self {
        Self::Global(id.into())
    }

    pub fn actor_ref(&self) -> Option<LocalId> {
        match self {
            Self::Actor { actor_id, .. } => Some(*actor_id),
            Self::Constant(_) | Self::Global(_) => None,
        }
    }
}

/// Comparison operator of a [`RuleCondition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    #[strum(serialize = "=")]
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Equal,
    #[strum(serialize = "!=")]
    #[cfg_attr(feature = "serde", serde(rename = "!="))]
    NotEqual,
    #[strum(serialize = ">=")]
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    GreaterOrEqual,
    #[strum(serialize = "<=")]
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    LessOrEqual,
    #[strum(serialize = ">")]
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    Greater,
    #[strum(serialize = "<")]
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    Less,
    #[strum(serialize = "contains")]
    #[cfg_attr(feature = "serde", serde(rename = "contains"))]
    Contains,
    #[strum(serialize = "starts-with")]
    #[cfg_attr(feature = "serde", serde(rename = "starts-with"))]
    StartsWith,
    #[strum(serialize = "ends-with")]
    #[cfg_attr(feature = "serde", serde(rename = "ends-with"))]
    EndsWith,
}

impl Comparator {
    /// Equality comparators see appearance ids; all others see names.
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

/// Playback hint attached to every action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum AnimationStyle {
    /// Interpolate from the previous snapshot.
    #[default]
    Linear,
    /// Jump to the new snapshot.
    #[strum(serialize = "none")]
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    Instant,
    /// Fold into the actor's previous snapshot; no frame of its own.
    Skip,
}

/// How an action combines its value with the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Add,
    Set,
    Subtract,
}

/// Destination of a move action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MoveTarget {
    /// Relative to the moved actor's current position.
    Delta(Position),
    /// Relative to the main actor's position when the rule matched.
    Offset(Position),
}

/// One step of a rule's action list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleAction {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: RuleActionKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animation_style: AnimationStyle,
}

impl RuleAction {
    pub fn new(kind: RuleActionKind) -> Self {
        Self {
            kind,
            animation_style: AnimationStyle::default(),
        }
    }

    pub fn with_style(mut self, animation_style: AnimationStyle) -> Self {
        self.animation_style = animation_style;
        self
    }

    /// The existing template actor this action operates on, if any.
    ///
    /// `Create` introduces its actor rather than referencing one, and
    /// `Global` has no actor at all.
    pub fn target(&self) -> Option<LocalId> {
        match &self.kind {
            RuleActionKind::Appearance { actor_id, .. }
            | RuleActionKind::Variable { actor_id, .. }
            | RuleActionKind::Delete { actor_id }
            | RuleActionKind::Move { actor_id, .. }
            | RuleActionKind::Transform { actor_id, .. } => Some(*actor_id),
            RuleActionKind::Global { .. } | RuleActionKind::Create { .. } => None,
        }
    }

    /// Local actor ids this action reads through its value operand.
    pub fn value_refs(&self) -> Option<LocalId> {
        match &self.kind {
            RuleActionKind::Appearance { value, .. }
            | RuleActionKind::Variable { value, .. }
            | RuleActionKind::Global { value, .. }
            | RuleActionKind::Transform { value, .. } => value.actor_ref(),
            RuleActionKind::Delete { .. }
            | RuleActionKind::Create { .. }
            | RuleActionKind::Move { .. } => None,
        }
    }
}

/// The effect of a [`RuleAction`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum RuleActionKind {
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Appearance { actor_id: LocalId, value: RuleValue },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Variable {
        actor_id: LocalId,
        variable: String,
        operation: Operation,
        value: RuleValue,
    },
    Global {
        global: String,
        operation: Operation,
        value: RuleValue,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Delete { actor_id: LocalId },
    /// Instantiates `actor` at `offset` from the main actor; `actor_id`
    /// names it for later actions of the same rule.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Create {
        actor_id: LocalId,
        actor: Actor,
        offset: Position,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Move { actor_id: LocalId, to: MoveTarget },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Transform {
        actor_id: LocalId,
        operation: Operation,
        value: RuleValue,
    },
}
