//! Authoritative world state representation.
//!
//! A [`World`] is an immutable snapshot: the operator reads the previous one
//! and builds a brand-new one per tick. Actor entries are `Arc`-shared
//! between snapshots, history entries and frames.
pub mod diagnostics;
pub mod frame;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use diagnostics::{EvaluatedRuleDetails, Mismatch, RuleDetail, RuleEvaluation};
pub use frame::Frame;
pub use types::{
    APPEARANCE_VARIABLE, Actor, ActorId, ActorMap, AnimationStyle, AppearanceId, AppearanceInfo,
    Character, CharacterId, Comparator, EventGroup, EventKind, FlowBehavior, FlowGroup, Global,
    Globals, Input, LocalId, MoveTarget, Operation, Position, Rule, RuleAction, RuleActionKind,
    RuleCondition, RuleExtent, RuleId, RuleTreeItem, RuleValue, Spritesheet, Stage, StageId,
    TRANSFORM_VARIABLE, Tick, Transform, VariableDefinition,
};

/// Snapshot taken before a tick in which at least one rule fired.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HistoryEntry {
    pub tick: Tick,
    pub stage_id: StageId,
    pub actors: ActorMap,
    pub globals: Globals,
}

/// Canonical snapshot of a simulated world.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct World {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick: Tick,
    pub stages: BTreeMap<StageId, Stage>,
    pub globals: Globals,
    /// Input recorded since the last tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub input: Input,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evaluated_rule_details: EvaluatedRuleDetails,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub evaluated_tick_frames: Option<Vec<Frame>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub history: Vec<Arc<HistoryEntry>>,
}

impl World {
    /// Creates a world holding a single stage, which becomes the current one.
    pub fn with_stage(stage: Stage) -> Self {
        let globals = Globals::new(stage.id.clone());
        let mut stages = BTreeMap::new();
        stages.insert(stage.id.clone(), stage);
        Self {
            stages,
            globals,
            ..Self::default()
        }
    }

    pub fn add_stage(mut self, stage: Stage) -> Self {
        self.stages.insert(stage.id.clone(), stage);
        self
    }

    /// The stage named by the `selectedStageId` global.
    pub fn current_stage(&self) -> Option<&Stage> {
        self.globals
            .selected_stage()
            .and_then(|id| self.stages.get(id))
    }

    /// Returns a world rolled back to the most recent history entry.
    ///
    /// The entry is dropped from the returned world's history; diagnostics,
    /// frames and pending input are cleared. Returns `None` when there is
    /// nothing to undo or the recorded stage no longer exists.
    pub fn undo(&self) -> Option<World> {
        let (entry, remaining) = self.history.split_last()?;
        let mut stages = self.stages.clone();
        stages.get_mut(&entry.stage_id)?.actors = entry.actors.clone();

        Some(World {
            id: self.id.clone(),
            tick: entry.tick,
            stages,
            globals: entry.globals.clone(),
            input: Input::default(),
            evaluated_rule_details: EvaluatedRuleDetails::new(),
            evaluated_tick_frames: None,
            history: remaining.to_vec(),
        })
    }
}
