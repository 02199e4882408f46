//! Rule-tree interpretation on top of the generic composite nodes.

use behavior_tree::{Behavior, Every, Repeat, Selector, Status};

use crate::state::{
    ActorId, EventGroup, EventKind, FlowBehavior, FlowGroup, Mismatch, Rule, RuleDetail,
    RuleEvaluation, RuleTreeItem,
};

use super::actions::apply_actions;
use super::context::TickContext;
use super::matcher::match_rule;

/// Walks the rule tree of one actor.
///
/// The root list behaves like an `all` group. Actors that vanished earlier
/// in the tick, or whose character is unknown, are skipped.
pub fn tick_actor(ctx: &mut TickContext<'_>, id: ActorId) -> Status {
    let Some(actor) = ctx.stage().actor(id) else {
        return Status::Failure;
    };
    let Some(character) = ctx.character(&actor.character_id) else {
        tracing::warn!(actor = %id, character = %actor.character_id, "skipping actor of unknown character");
        return Status::Failure;
    };

    ctx.begin_actor(id, character);
    Every::new(&character.rules).tick(ctx)
}

impl<'w> Behavior<TickContext<'w>> for RuleTreeItem {
    fn tick(&self, ctx: &mut TickContext<'w>) -> Status {
        match self {
            RuleTreeItem::EventGroup(group) => group.tick(ctx),
            RuleTreeItem::FlowGroup(group) => group.tick(ctx),
            RuleTreeItem::Rule(rule) => rule.tick(ctx),
        }
    }
}

impl<'w> Behavior<TickContext<'w>> for EventGroup {
    fn tick(&self, ctx: &mut TickContext<'w>) -> Status {
        let admitted = match self.event {
            EventKind::Idle => true,
            EventKind::Key => self
                .code
                .as_ref()
                .is_some_and(|code| ctx.input().keys.contains(code)),
            EventKind::Click => ctx.input().clicks.contains(&ctx.actor()),
        };
        if !admitted {
            return Status::Failure;
        }
        Selector::new(&self.rules).tick(ctx)
    }
}

impl<'w> Behavior<TickContext<'w>> for FlowGroup {
    fn tick(&self, ctx: &mut TickContext<'w>) -> Status {
        if let Some(precondition) = &self.precondition {
            if !ctx.preconditions_pass(precondition) {
                return Status::Failure;
            }
        }

        match self.behavior {
            FlowBehavior::First => Selector::new(&self.rules).tick(ctx),
            FlowBehavior::All => Every::new(&self.rules).tick(ctx),
            FlowBehavior::Random => {
                let order = ctx.shuffled(self.rules.len());
                Selector::with_order(&self.rules, order).tick(ctx)
            }
            FlowBehavior::Loop => {
                let times = ctx.loop_count(self.loop_count.as_ref());
                Repeat::new(Selector::new(&self.rules), times).tick(ctx)
            }
        }
    }
}

impl<'w> Behavior<TickContext<'w>> for Rule {
    fn tick(&self, ctx: &mut TickContext<'w>) -> Status {
        let Some(main) = ctx.stage().actors.get(&ctx.actor()).cloned() else {
            ctx.record(&self.id, failed(Mismatch::MainActor));
            return Status::Failure;
        };

        let matched = match_rule(self, &main, &ctx.view());
        match matched {
            Ok(mut bindings) => {
                tracing::trace!(actor = %main.id, rule = %self.id, "rule matched");
                let detail = RuleDetail {
                    passed: true,
                    mismatch: None,
                    conditions: self
                        .conditions
                        .iter()
                        .filter(|condition| condition.enabled)
                        .map(|condition| (condition.key.clone(), true))
                        .collect(),
                    bindings: bindings.to_map(),
                };
                apply_actions(ctx, self, main.position, &mut bindings);
                ctx.record(&self.id, RuleEvaluation::Evaluated(detail));
                Status::Success
            }
            Err(mismatch) => {
                tracing::trace!(actor = %main.id, rule = %self.id, ?mismatch, "rule did not match");
                ctx.record(&self.id, failed(mismatch));
                Status::Failure
            }
        }
    }
}

fn failed(mismatch: Mismatch) -> RuleEvaluation {
    let conditions = match &mismatch {
        Mismatch::ConditionFailed { key } => [(key.clone(), false)].into(),
        _ => Default::default(),
    };
    RuleEvaluation::Evaluated(RuleDetail {
        passed: false,
        mismatch: Some(mismatch),
        conditions,
        bindings: Default::default(),
    })
}
