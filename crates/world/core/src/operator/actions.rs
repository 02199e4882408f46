//! Applies the actions of a matched rule to the working grid.
//!
//! Actions run in order and see the effects of the ones before them. An
//! action whose target has disappeared, or whose operand cannot be used, is
//! skipped; the remaining actions still run.

use crate::state::{
    ActorId, Comparator, LocalId, MoveTarget, Operation, Position, Rule, RuleAction,
    RuleActionKind, RuleValue, Transform,
};

use super::context::TickContext;
use super::matcher::Bindings;
use super::value::{Scope, apply_operation, resolve};

/// Applies every action of `rule`.
///
/// `main_position` is where the main actor stood when the rule matched;
/// `Create` binds its local id into `bindings` for later actions.
pub fn apply_actions(
    ctx: &mut TickContext<'_>,
    rule: &Rule,
    main_position: Position,
    bindings: &mut Bindings,
) {
    for action in &rule.actions {
        apply_action(ctx, action, main_position, bindings);
    }
}

fn apply_action(
    ctx: &mut TickContext<'_>,
    action: &RuleAction,
    main_position: Position,
    bindings: &mut Bindings,
) {
    let style = action.animation_style;
    match &action.kind {
        RuleActionKind::Appearance { actor_id, value } => {
            let Some(id) = target(ctx, *actor_id, bindings) else {
                return;
            };
            let Some(appearance) = resolve_operand(ctx, value, bindings) else {
                return;
            };
            ctx.update_actor(id, style, |actor| actor.appearance = appearance);
        }
        RuleActionKind::Variable {
            actor_id,
            variable,
            operation,
            value,
        } => {
            let Some(id) = target(ctx, *actor_id, bindings) else {
                return;
            };
            let Some(operand) = resolve_operand(ctx, value, bindings) else {
                return;
            };
            let current = ctx.variable_value(id, variable);
            let Some(next) = apply_operation(current.as_deref(), *operation, &operand) else {
                tracing::trace!(actor = %id, %variable, "skipping non-numeric variable update");
                return;
            };
            ctx.update_actor(id, style, |actor| {
                actor.variable_values.insert(variable.clone(), next);
            });
        }
        RuleActionKind::Global {
            global,
            operation,
            value,
        } => {
            let Some(operand) = resolve_operand(ctx, value, bindings) else {
                return;
            };
            let current = ctx.globals().value(global);
            let Some(next) = apply_operation(current, *operation, &operand) else {
                tracing::trace!(%global, "skipping non-numeric global update");
                return;
            };
            ctx.set_global(global, next);
        }
        RuleActionKind::Delete { actor_id } => {
            if let Some(id) = target(ctx, *actor_id, bindings) {
                ctx.remove_actor(id, style);
            }
        }
        RuleActionKind::Create {
            actor_id,
            actor,
            offset,
        } => {
            let mut created = actor.clone();
            created.position = ctx.stage().clamp(main_position + *offset);
            let id = ctx.insert_actor(created, style);
            bindings.bind(*actor_id, id);
        }
        RuleActionKind::Move { actor_id, to } => {
            let Some(id) = target(ctx, *actor_id, bindings) else {
                return;
            };
            let Some(current) = ctx.stage().actor(id).map(|actor| actor.position) else {
                return;
            };
            let destination = match to {
                MoveTarget::Delta(delta) => current + *delta,
                MoveTarget::Offset(offset) => main_position + *offset,
            };
            let destination = ctx.stage().clamp(destination);
            ctx.update_actor(id, style, |actor| actor.position = destination);
        }
        RuleActionKind::Transform {
            actor_id,
            operation,
            value,
        } => {
            let Some(id) = target(ctx, *actor_id, bindings) else {
                return;
            };
            let Some(operand) = resolve_operand(ctx, value, bindings) else {
                return;
            };
            let Ok(operand) = operand.parse::<Transform>() else {
                tracing::trace!(actor = %id, %operand, "skipping unknown transform");
                return;
            };
            ctx.update_actor(id, style, |actor| {
                let current = actor.orientation();
                actor.transform = Some(match operation {
                    Operation::Add => current.then(operand),
                    Operation::Subtract => current.then(operand.inverse()),
                    Operation::Set => operand,
                });
            });
        }
    }
}

/// Stage actor bound to `local`, if it still exists.
fn target(ctx: &TickContext<'_>, local: LocalId, bindings: &Bindings) -> Option<ActorId> {
    let id = bindings
        .get(local)
        .filter(|id| ctx.stage().actors.contains_key(id));
    if id.is_none() {
        tracing::trace!(%local, "skipping action, target vanished");
    }
    id
}

fn resolve_operand(ctx: &TickContext<'_>, value: &RuleValue, bindings: &Bindings) -> Option<String> {
    let resolved = resolve(value, Comparator::Equal, Scope::Bindings(bindings), &ctx.view());
    if resolved.is_none() {
        tracing::trace!(?value, "skipping action, operand unresolved");
    }
    resolved
}
