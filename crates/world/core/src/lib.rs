//! Deterministic rule matching and state transitions for grid worlds.
//!
//! `world-core` defines the canonical data model (stages, actors, characters
//! and their rule trees) and the world operator that advances a [`World`] by
//! one tick. All state changes flow through [`WorldOperator::tick`], which is
//! a pure function of the previous world, the character definitions and the
//! per-tick input.
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod operator;
pub mod state;

pub use config::{EngineConfig, FramePadding};
pub use env::{CharacterOracle, Characters, Env, PcgRng, RngOracle, WorldEnv, compute_seed};
pub use error::ErrorSeverity;
pub use operator::{Bindings, FrameAccumulator, TickError, WorldOperator};
pub use state::{
    Actor, ActorId, ActorMap, AnimationStyle, AppearanceInfo, Character, CharacterId, Comparator,
    EvaluatedRuleDetails, EventGroup, EventKind, FlowBehavior, FlowGroup, Frame, Global, Globals,
    HistoryEntry, Input, LocalId, Mismatch, MoveTarget, Operation, Position, Rule, RuleAction,
    RuleActionKind, RuleCondition, RuleDetail, RuleEvaluation, RuleExtent, RuleId, RuleTreeItem,
    RuleValue, Spritesheet, Stage, StageId, Tick, Transform, VariableDefinition, World,
};
