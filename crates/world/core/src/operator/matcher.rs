//! Scenario matching: does a rule's before-picture line up with the grid
//! around an actor?
//!
//! Matching is greedy. Stage actors are visited in id order and bound to the
//! first compatible template; a binding is never revisited, so an earlier
//! choice that later proves wrong makes the whole match fail.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid;
use crate::state::{
    Actor, ActorId, LocalId, Mismatch, MoveTarget, Position, Rule, RuleActionKind,
};

use super::value::{Scope, ScenarioView, evaluate_condition};

/// Template-to-stage actor assignment produced by a successful match.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Bindings(BTreeMap<LocalId, ActorId>);

impl Bindings {
    pub fn get(&self, local: LocalId) -> Option<ActorId> {
        self.0.get(&local).copied()
    }

    pub fn bind(&mut self, local: LocalId, actor: ActorId) {
        self.0.insert(local, actor);
    }

    pub fn unbind(&mut self, local: LocalId) {
        self.0.remove(&local);
    }

    pub fn is_bound(&self, local: LocalId) -> bool {
        self.0.contains_key(&local)
    }

    /// The template a stage actor is bound to.
    pub fn local_of(&self, actor: ActorId) -> Option<LocalId> {
        self.0
            .iter()
            .find_map(|(local, bound)| (*bound == actor).then_some(*local))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocalId, ActorId)> + '_ {
        self.0.iter().map(|(local, actor)| (*local, *actor))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<LocalId, ActorId> {
        self.0.clone()
    }
}

/// Matches `rule` with `main` as its main actor.
///
/// Returns the bindings of every template in the window, or the first
/// reason the scenario does not hold.
pub fn match_rule(
    rule: &Rule,
    main: &Actor,
    view: &ScenarioView<'_>,
) -> Result<Bindings, Mismatch> {
    rule.actors
        .get(&rule.main_actor_id)
        .filter(|template| template.character_id == main.character_id)
        .ok_or(Mismatch::MainActor)?;

    let mut bindings = Bindings::default();
    bindings.bind(rule.main_actor_id, main.id);

    for cell in rule.extent.cells() {
        let stage_cell = view
            .stage
            .wrap(main.position + cell)
            .ok_or(Mismatch::OffStage { cell })?;
        let ignored = rule.extent.is_ignored(cell);
        let occupants = view.occupants(stage_cell);
        let templates = templates_at(rule, cell, view);

        if !ignored && occupants.len() != templates.len() {
            return Err(Mismatch::CountMismatch {
                cell,
                expected: templates.len(),
                found: occupants.len(),
            });
        }

        for occupant in occupants {
            let placed = match bindings.local_of(occupant.id) {
                Some(local) => templates.contains(&local),
                None => bind_occupant(rule, occupant, &templates, &mut bindings, view),
            };
            if !placed && !ignored {
                return Err(Mismatch::Unmatched {
                    cell,
                    actor: occupant.id,
                });
            }
        }
    }

    check_references(rule, &bindings)?;
    check_targets(rule, main.position, &bindings, view)?;

    for condition in rule.conditions.iter().filter(|condition| condition.enabled) {
        if !evaluate_condition(condition, Scope::Bindings(&bindings), view) {
            return Err(Mismatch::ConditionFailed {
                key: condition.key.clone(),
            });
        }
    }

    Ok(bindings)
}

/// Templates whose footprint covers a window cell, in local id order.
fn templates_at(rule: &Rule, cell: Position, view: &ScenarioView<'_>) -> Vec<LocalId> {
    rule.actors
        .iter()
        .filter(|(_, template)| {
            grid::covers(template, view.character(&template.character_id), cell)
        })
        .map(|(local, _)| *local)
        .collect()
}

fn bind_occupant(
    rule: &Rule,
    occupant: &Actor,
    templates: &[LocalId],
    bindings: &mut Bindings,
    view: &ScenarioView<'_>,
) -> bool {
    for &local in templates {
        let compatible = rule
            .actors
            .get(&local)
            .is_some_and(|template| template.character_id == occupant.character_id);
        if bindings.is_bound(local) || !compatible {
            continue;
        }

        bindings.bind(local, occupant.id);
        if attached_conditions_pass(rule, local, bindings, view) {
            return true;
        }
        bindings.unbind(local);
    }
    false
}

/// Enabled conditions mentioning `local` whose actors are all bound so far.
fn attached_conditions_pass(
    rule: &Rule,
    local: LocalId,
    bindings: &Bindings,
    view: &ScenarioView<'_>,
) -> bool {
    rule.conditions
        .iter()
        .filter(|condition| condition.enabled && condition.references(local))
        .filter(|condition| condition.actor_refs().all(|id| bindings.is_bound(id)))
        .all(|condition| evaluate_condition(condition, Scope::Bindings(bindings), view))
}

fn created_locals(rule: &Rule) -> BTreeSet<LocalId> {
    rule.actions
        .iter()
        .filter_map(|action| match &action.kind {
            RuleActionKind::Create { actor_id, .. } => Some(*actor_id),
            _ => None,
        })
        .collect()
}

fn check_references(rule: &Rule, bindings: &Bindings) -> Result<(), Mismatch> {
    let created = created_locals(rule);
    let from_conditions = rule
        .conditions
        .iter()
        .filter(|condition| condition.enabled)
        .flat_map(|condition| condition.actor_refs());
    let from_actions = rule
        .actions
        .iter()
        .flat_map(|action| action.target().into_iter().chain(action.value_refs()));

    match from_conditions
        .chain(from_actions)
        .find(|local| !created.contains(local) && !bindings.is_bound(*local))
    {
        Some(local) => Err(Mismatch::UnboundActor { local }),
        None => Ok(()),
    }
}

fn check_targets(
    rule: &Rule,
    main_position: Position,
    bindings: &Bindings,
    view: &ScenarioView<'_>,
) -> Result<(), Mismatch> {
    for action in &rule.actions {
        let (local, destination) = match &action.kind {
            RuleActionKind::Create {
                actor_id, offset, ..
            } => (*actor_id, main_position + *offset),
            RuleActionKind::Move { actor_id, to } => {
                // actors created by this rule are placed by their own action
                let Some(actor) = bindings.get(*actor_id).and_then(|id| view.actor(id)) else {
                    continue;
                };
                let destination = match to {
                    MoveTarget::Delta(delta) => actor.position + *delta,
                    MoveTarget::Offset(offset) => main_position + *offset,
                };
                (*actor_id, destination)
            }
            _ => continue,
        };
        if view.stage.wrap(destination).is_none() {
            return Err(Mismatch::InvalidTarget { local });
        }
    }
    Ok(())
}
