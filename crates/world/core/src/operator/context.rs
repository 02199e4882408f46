//! Mutable state shared by the walker and the action applier for one tick.
//!
//! All actors of a tick read and write the same working copy, so later
//! actors observe what earlier ones did.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::env::{WorldEnv, compute_seed};
use crate::state::{
    Actor, ActorId, AnimationStyle, Character, Comparator, EvaluatedRuleDetails, Globals, Input,
    RuleCondition, RuleEvaluation, RuleId, RuleValue, Stage, Tick,
};

use super::frames::FrameAccumulator;
use super::value::{Scope, ScenarioView, evaluate_condition, parse_number, resolve};

/// Working copy of the world while a tick is evaluated.
pub struct TickContext<'w> {
    env: WorldEnv<'w>,
    config: &'w EngineConfig,
    tick: Tick,
    input: &'w Input,
    stage: Stage,
    globals: Globals,
    frames: FrameAccumulator,
    details: EvaluatedRuleDetails,
    /// Actor whose rule tree is being walked.
    actor: ActorId,
    /// Random draws made by the walked actor so far.
    draws: u32,
    rules_fired: usize,
}

/// What a finished tick leaves behind.
pub struct TickOutcome {
    pub stage: Stage,
    pub globals: Globals,
    pub frames: FrameAccumulator,
    pub details: EvaluatedRuleDetails,
    pub rules_fired: usize,
}

impl<'w> TickContext<'w> {
    pub fn new(
        env: WorldEnv<'w>,
        config: &'w EngineConfig,
        tick: Tick,
        input: &'w Input,
        stage: Stage,
        globals: Globals,
    ) -> Self {
        Self {
            env,
            config,
            tick,
            input,
            stage,
            globals,
            frames: FrameAccumulator::new(),
            details: EvaluatedRuleDetails::new(),
            actor: ActorId::default(),
            draws: 0,
            rules_fired: 0,
        }
    }

    pub fn view(&self) -> ScenarioView<'_> {
        ScenarioView::new(&self.stage, &self.globals, self.env.characters())
    }

    pub fn character(&self, id: &str) -> Option<&'w Character> {
        self.env.character(id)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn input(&self) -> &Input {
        self.input
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Starts walking `id`'s tree; every leaf rule is marked not evaluated.
    pub fn begin_actor(&mut self, id: ActorId, character: &Character) {
        self.actor = id;
        self.draws = 0;
        let entry = self.details.entry(id).or_default();
        for rule_id in character.rule_ids() {
            entry.insert(rule_id, RuleEvaluation::NotEvaluated);
        }
    }

    pub fn record(&mut self, rule_id: &RuleId, evaluation: RuleEvaluation) {
        if evaluation.passed() {
            self.rules_fired += 1;
        }
        self.details
            .entry(self.actor)
            .or_default()
            .insert(rule_id.clone(), evaluation);
    }

    /// Current value of a variable: instance override, else character default.
    pub fn variable_value(&self, id: ActorId, variable: &str) -> Option<String> {
        let actor = self.stage.actor(id)?;
        actor.variable_values.get(variable).cloned().or_else(|| {
            self.character(&actor.character_id)?
                .default_value(variable)
                .map(str::to_owned)
        })
    }

    /// Mutates a stage actor and records its new snapshot.
    ///
    /// Returns `false` when the actor no longer exists.
    pub fn update_actor(
        &mut self,
        id: ActorId,
        style: AnimationStyle,
        update: impl FnOnce(&mut Actor),
    ) -> bool {
        let Some(entry) = self.stage.actors.get_mut(&id) else {
            return false;
        };
        update(Arc::make_mut(entry));
        let snapshot = Arc::clone(entry);
        self.frames.push(id, Some(snapshot), style);
        true
    }

    pub fn remove_actor(&mut self, id: ActorId, style: AnimationStyle) -> bool {
        if self.stage.actors.remove(&id).is_none() {
            return false;
        }
        self.frames.push(id, None, style);
        true
    }

    /// Places a new actor under a freshly allocated id.
    pub fn insert_actor(&mut self, actor: Actor, style: AnimationStyle) -> ActorId {
        let id = self.stage.spawn(actor);
        if let Some(entry) = self.stage.actors.get(&id) {
            self.frames.push(id, Some(Arc::clone(entry)), style);
        }
        id
    }

    pub fn set_global(&mut self, id: &str, value: String) {
        self.globals.set(id, value);
    }

    /// A seeded permutation of `0..len` for the walked actor.
    pub fn shuffled(&mut self, len: usize) -> Vec<usize> {
        let seed = compute_seed(self.config.seed, self.tick.0, self.actor.0, self.draws);
        self.draws = self.draws.wrapping_add(1);
        self.env.rng().permutation(len, seed)
    }

    /// Iteration count of a loop group, resolved against the walked actor.
    ///
    /// A missing count means one pass; a non-numeric one means none.
    pub fn loop_count(&self, count: Option<&RuleValue>) -> u32 {
        let Some(count) = count else {
            return 1;
        };
        let resolved = resolve(count, Comparator::Equal, Scope::Actor(self.actor), &self.view());
        let Some(number) = resolved.as_deref().and_then(parse_number) else {
            return 0;
        };
        let cap = self.config.max_loop_iterations;
        if number >= f64::from(cap) {
            cap
        } else {
            number.max(0.0).floor() as u32
        }
    }

    pub fn preconditions_pass(&self, conditions: &[RuleCondition]) -> bool {
        let view = self.view();
        conditions
            .iter()
            .all(|condition| evaluate_condition(condition, Scope::Actor(self.actor), &view))
    }

    pub fn finish(self) -> TickOutcome {
        TickOutcome {
            stage: self.stage,
            globals: self.globals,
            frames: self.frames,
            details: self.details,
            rules_fired: self.rules_fired,
        }
    }
}
