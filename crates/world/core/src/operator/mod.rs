//! The world operator: advances a [`World`] by one tick.
//!
//! A tick walks every actor of the current stage, in id order, through its
//! character's rule tree. Matched rules mutate one shared working copy of the
//! stage and globals; the result is published as a brand-new [`World`]
//! together with per-rule diagnostics and the animation frames of the tick.
mod actions;
mod context;
mod errors;
mod frames;
mod matcher;
mod walker;

pub mod value;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::env::WorldEnv;
use crate::state::{ActorId, Globals, HistoryEntry, Input, World};

pub use errors::TickError;
pub use frames::FrameAccumulator;
pub use matcher::{Bindings, match_rule};

use context::TickContext;

/// Pure tick function over worlds.
///
/// The operator holds no state of its own; the same operator can advance
/// any number of worlds sharing its characters and config.
pub struct WorldOperator<'a> {
    env: WorldEnv<'a>,
    config: &'a EngineConfig,
}

impl<'a> WorldOperator<'a> {
    pub fn new(env: WorldEnv<'a>, config: &'a EngineConfig) -> Self {
        Self { env, config }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Advances `previous` using the input recorded on it.
    pub fn tick_pending(&self, previous: &World) -> Result<World, TickError> {
        self.tick(previous, &previous.input)
    }

    /// Evaluates one tick and returns the next world.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::StageNotFound`] when `selectedStageId` does not
    /// name a stage of the world.
    pub fn tick(&self, previous: &World, input: &Input) -> Result<World, TickError> {
        let stage_id = previous.globals.selected_stage().unwrap_or_default();
        let stage = previous
            .stages
            .get(stage_id)
            .ok_or_else(|| TickError::StageNotFound {
                stage: stage_id.to_owned(),
            })?;

        let entry = HistoryEntry {
            tick: previous.tick,
            stage_id: stage.id.clone(),
            actors: stage.actors.clone(),
            globals: previous.globals.clone(),
        };

        let mut globals = previous.globals.clone();
        globals.apply_input(input);

        let order: Vec<ActorId> = stage.actors.keys().copied().collect();
        let mut ctx = TickContext::new(
            self.env,
            self.config,
            previous.tick,
            input,
            stage.clone(),
            globals,
        );
        for id in order {
            walker::tick_actor(&mut ctx, id);
        }
        let outcome = ctx.finish();

        let frames = self
            .config
            .record_frames
            .then(|| outcome.frames.frames(&stage.actors, self.config.frame_padding));

        let mut stages = previous.stages.clone();
        stages.insert(stage.id.clone(), outcome.stage);

        let mut globals = outcome.globals;
        match globals.selected_stage() {
            Some(selected) if selected == stage.id => {}
            Some(selected) if stages.contains_key(selected) => {
                tracing::debug!(from = %stage.id, to = %selected, "switching stage");
            }
            selected => {
                tracing::warn!(
                    requested = selected.unwrap_or_default(),
                    stage = %stage.id,
                    "unknown stage selected, staying on current stage"
                );
                globals.set(Globals::SELECTED_STAGE, stage.id.clone());
            }
        }

        let mut history = previous.history.clone();
        if outcome.rules_fired > 0 {
            history.push(Arc::new(entry));
            let excess = history.len().saturating_sub(self.config.max_history);
            history.drain(..excess);
        }

        tracing::debug!(
            tick = %previous.tick,
            stage = %stage.id,
            rules_fired = outcome.rules_fired,
            frames = frames.as_ref().map_or(0, Vec::len),
            "tick evaluated"
        );

        Ok(World {
            id: previous.id.clone(),
            tick: previous.tick.next(),
            stages,
            globals,
            input: Input::default(),
            evaluated_rule_details: outcome.details,
            evaluated_tick_frames: frames,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Characters, Env, PcgRng};
    use crate::error::ErrorSeverity;
    use crate::state::{
        Actor, Character, LocalId, MoveTarget, Position, Rule, RuleAction, RuleActionKind,
        RuleExtent, RuleTreeItem, Stage,
    };

    fn walker_rule() -> RuleTreeItem {
        RuleTreeItem::Rule(Rule {
            id: "walk".into(),
            main_actor_id: LocalId(1),
            actors: [(
                LocalId(1),
                Actor::new(ActorId::default(), "hero", "idle", Position::ORIGIN),
            )]
            .into(),
            actions: vec![RuleAction::new(RuleActionKind::Move {
                actor_id: LocalId(1),
                to: MoveTarget::Delta(Position::new(1, 0)),
            })],
            extent: RuleExtent::single(),
            ..Rule::default()
        })
    }

    fn world() -> World {
        let mut stage = Stage::new("main", 10, 1);
        stage.spawn(Actor::new(ActorId(0), "hero", "idle", Position::new(0, 0)));
        World::with_stage(stage)
    }

    #[test]
    fn missing_stage_fails_loudly() {
        let characters = Characters::new();
        let config = EngineConfig::default();
        let operator = WorldOperator::new(Env::new(&characters, &PcgRng).into_world_env(), &config);
        let mut world = world();
        world.globals.set(Globals::SELECTED_STAGE, "nowhere");

        let error = operator.tick_pending(&world).unwrap_err();
        assert_eq!(
            error,
            TickError::StageNotFound {
                stage: "nowhere".into()
            }
        );
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn history_is_bounded() {
        let characters =
            Characters::new().with(Character::new("hero", "Hero").with_rules(vec![walker_rule()]));
        let config = EngineConfig {
            max_history: 2,
            ..EngineConfig::default()
        };
        let operator = WorldOperator::new(Env::new(&characters, &PcgRng).into_world_env(), &config);

        let mut world = world();
        for _ in 0..4 {
            world = operator.tick_pending(&world).unwrap();
        }

        assert_eq!(world.tick.0, 4);
        assert_eq!(world.history.len(), 2);
        assert_eq!(world.history[1].tick.0, 3);
    }

    #[test]
    fn quiet_tick_records_no_history_or_frames() {
        let characters = Characters::new().with(Character::new("hero", "Hero"));
        let config = EngineConfig::default();
        let operator = WorldOperator::new(Env::new(&characters, &PcgRng).into_world_env(), &config);

        let next = operator.tick_pending(&world()).unwrap();

        assert!(next.history.is_empty());
        assert_eq!(next.evaluated_tick_frames, Some(Vec::new()));
        assert_eq!(next.tick.0, 1);
    }
}
