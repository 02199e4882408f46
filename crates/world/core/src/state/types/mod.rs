//! Plain data types shared by the state snapshot and the rule trees.

pub mod actor;
pub mod character;
pub mod common;
pub mod globals;
pub mod input;
pub mod rule;
pub mod stage;
pub mod transform;

pub use actor::{Actor, ActorMap};
pub use character::{AppearanceInfo, Character, Spritesheet, VariableDefinition};
pub use common::{ActorId, AppearanceId, CharacterId, LocalId, Position, RuleId, StageId, Tick};
pub use globals::{Global, Globals};
pub use input::Input;
pub use rule::{
    APPEARANCE_VARIABLE, AnimationStyle, Comparator, EventGroup, EventKind, FlowBehavior,
    FlowGroup, MoveTarget, Operation, Rule, RuleAction, RuleActionKind, RuleCondition, RuleExtent,
    RuleTreeItem, RuleValue, TRANSFORM_VARIABLE,
};
pub use stage::Stage;
pub use transform::Transform;
