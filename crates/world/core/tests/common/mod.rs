//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use world_core::{
    Actor, ActorId, Character, Characters, EngineConfig, Env, EventGroup, EventKind, FlowBehavior,
    FlowGroup, Input, LocalId, MoveTarget, Operation, PcgRng, Position, Rule, RuleAction,
    RuleActionKind, RuleExtent, RuleTreeItem, RuleValue, Stage, World, WorldOperator,
};

/// Local id of the main template in every fixture rule.
pub const SELF: LocalId = LocalId(1);

pub fn template(character: &str, x: i32, y: i32) -> Actor {
    Actor::new(ActorId::default(), character, "idle", Position::new(x, y))
}

/// A rule whose only template is the main actor.
pub fn rule(id: &str, character: &str, actions: Vec<RuleAction>) -> Rule {
    Rule {
        id: id.into(),
        name: id.into(),
        main_actor_id: SELF,
        actors: [(SELF, template(character, 0, 0))].into(),
        actions,
        extent: RuleExtent::single(),
        ..Rule::default()
    }
}

pub fn step(delta_x: i32, delta_y: i32) -> RuleAction {
    RuleAction::new(RuleActionKind::Move {
        actor_id: SELF,
        to: MoveTarget::Delta(Position::new(delta_x, delta_y)),
    })
}

/// Adds one to the main actor's `count` variable.
pub fn bump() -> RuleAction {
    RuleAction::new(RuleActionKind::Variable {
        actor_id: SELF,
        variable: "count".into(),
        operation: Operation::Add,
        value: RuleValue::constant("1"),
    })
}

pub fn set_global(global: &str, value: &str) -> RuleAction {
    RuleAction::new(RuleActionKind::Global {
        global: global.into(),
        operation: Operation::Set,
        value: RuleValue::constant(value),
    })
}

pub fn idle(rules: Vec<RuleTreeItem>) -> RuleTreeItem {
    RuleTreeItem::EventGroup(EventGroup {
        id: "idle".into(),
        event: EventKind::Idle,
        rules,
        ..EventGroup::default()
    })
}

pub fn on_key(code: &str, rules: Vec<RuleTreeItem>) -> RuleTreeItem {
    RuleTreeItem::EventGroup(EventGroup {
        id: format!("key-{code}"),
        event: EventKind::Key,
        code: Some(code.into()),
        rules,
        ..EventGroup::default()
    })
}

pub fn flow(behavior: FlowBehavior, loop_count: Option<&str>, rules: Vec<RuleTreeItem>) -> RuleTreeItem {
    RuleTreeItem::FlowGroup(FlowGroup {
        id: format!("{behavior}"),
        behavior,
        loop_count: loop_count.map(RuleValue::constant),
        rules,
        ..FlowGroup::default()
    })
}

pub fn character(id: &str, rules: Vec<RuleTreeItem>) -> Character {
    Character::new(id, id).with_rules(rules).with_variable("count", "0")
}

pub fn stage(width: u32, height: u32, actors: &[(&str, i32, i32)]) -> Stage {
    let mut stage = Stage::new("main", width, height);
    for (character, x, y) in actors {
        stage.spawn(template(character, *x, *y));
    }
    stage
}

pub fn tick(world: &World, characters: &Characters, config: &EngineConfig, input: &Input) -> World {
    let operator = WorldOperator::new(Env::new(characters, &PcgRng).into_world_env(), config);
    operator.tick(world, input).expect("tick should succeed")
}

pub fn tick_idle(world: &World, characters: &Characters) -> World {
    tick(world, characters, &EngineConfig::default(), &Input::default())
}

pub fn position(world: &World, id: u32) -> Option<Position> {
    world
        .current_stage()
        .and_then(|stage| stage.actor(ActorId(id)))
        .map(|actor| actor.position)
}

pub fn variable(world: &World, id: u32, name: &str) -> Option<String> {
    world
        .current_stage()
        .and_then(|stage| stage.actor(ActorId(id)))
        .and_then(|actor| actor.variable_values.get(name).cloned())
}
