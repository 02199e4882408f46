mod common;

use common::*;
use world_core::{
    ActorId, AnimationStyle, Character, Characters, Comparator, EngineConfig, FlowBehavior,
    FlowGroup, FramePadding, Globals, Input, LocalId, Mismatch, Position, RuleAction,
    RuleActionKind, RuleCondition, RuleEvaluation, RuleExtent, RuleTreeItem, RuleValue, World,
};

fn evaluation<'w>(world: &'w World, actor: u32, rule: &str) -> &'w RuleEvaluation {
    world
        .evaluated_rule_details
        .get(&ActorId(actor))
        .and_then(|rules| rules.get(rule))
        .expect("rule should have a diagnostic entry")
}

/// A rule that steps right only when the cell to its right is empty.
fn step_right_into_empty(character: &str) -> RuleTreeItem {
    let mut rule = rule("right", character, vec![step(1, 0)]);
    rule.extent = RuleExtent::new(0, 1, 0, 0);
    RuleTreeItem::Rule(rule)
}

fn step_left_into_empty(character: &str) -> RuleTreeItem {
    let mut rule = rule("left", character, vec![step(-1, 0)]);
    rule.extent = RuleExtent::new(-1, 0, 0, 0);
    RuleTreeItem::Rule(rule)
}

#[test]
fn hero_moves_one_cell_with_exactly_one_frame() {
    let characters = Characters::new().with(character(
        "hero",
        vec![idle(vec![RuleTreeItem::Rule(rule("walk", "hero", vec![step(1, 0)]))])],
    ));
    let world = World::with_stage(stage(10, 10, &[("hero", 5, 5)]));

    let next = tick_idle(&world, &characters);

    assert_eq!(position(&next, 0), Some(Position::new(6, 5)));
    let frames = next.evaluated_tick_frames.as_ref().expect("frames recorded");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].actors[&ActorId(0)].position, Position::new(6, 5));
    assert_eq!(frames[0].animation_styles[&ActorId(0)], AnimationStyle::Linear);
    assert!(evaluation(&next, 0, "walk").passed());
    assert_eq!(next.history.len(), 1);
    // the previous snapshot is untouched
    assert_eq!(position(&world, 0), Some(Position::new(5, 5)));
}

#[test]
fn wrapping_stage_carries_actor_across_the_edge() {
    let characters =
        Characters::new().with(character("hero", vec![step_right_into_empty("hero")]));
    let world = World::with_stage(stage(10, 1, &[("hero", 9, 0)]).with_wrap(true, false));

    let next = tick_idle(&world, &characters);

    assert_eq!(position(&next, 0), Some(Position::new(0, 0)));
}

#[test]
fn window_past_non_wrapping_edge_never_matches() {
    let characters =
        Characters::new().with(character("hero", vec![step_right_into_empty("hero")]));
    let world = World::with_stage(stage(10, 1, &[("hero", 9, 0)]));

    let next = tick_idle(&world, &characters);

    assert_eq!(position(&next, 0), Some(Position::new(9, 0)));
    match evaluation(&next, 0, "right") {
        RuleEvaluation::Evaluated(detail) => {
            assert!(!detail.passed);
            assert_eq!(
                detail.mismatch,
                Some(Mismatch::OffStage {
                    cell: Position::new(1, 0)
                })
            );
        }
        other => panic!("expected an evaluated failure, got {other:?}"),
    }
    assert!(next.history.is_empty());
}

#[test]
fn earlier_actors_win_contested_cells() {
    let characters = Characters::new()
        .with(character("left", vec![step_right_into_empty("left")]))
        .with(character("right", vec![step_left_into_empty("right")]));

    let left_first = World::with_stage(stage(5, 1, &[("left", 1, 0), ("right", 3, 0)]));
    let next = tick_idle(&left_first, &characters);
    assert_eq!(position(&next, 0), Some(Position::new(2, 0)));
    assert_eq!(position(&next, 1), Some(Position::new(3, 0)));

    let right_first = World::with_stage(stage(5, 1, &[("right", 3, 0), ("left", 1, 0)]));
    let next = tick_idle(&right_first, &characters);
    assert_eq!(position(&next, 0), Some(Position::new(2, 0)));
    assert_eq!(position(&next, 1), Some(Position::new(1, 0)));
}

#[test]
fn first_group_fires_once_and_all_group_fires_each() {
    let counters = || {
        vec![
            RuleTreeItem::Rule(rule("a", "hero", vec![bump()])),
            RuleTreeItem::Rule(rule("b", "hero", vec![bump()])),
        ]
    };
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));

    let first = Characters::new().with(character(
        "hero",
        vec![flow(FlowBehavior::First, None, counters())],
    ));
    let next = tick_idle(&world, &first);
    assert_eq!(variable(&next, 0, "count").as_deref(), Some("1"));
    assert_eq!(evaluation(&next, 0, "b"), &RuleEvaluation::NotEvaluated);

    let all = Characters::new().with(character(
        "hero",
        vec![flow(FlowBehavior::All, None, counters())],
    ));
    let next = tick_idle(&world, &all);
    assert_eq!(variable(&next, 0, "count").as_deref(), Some("2"));
}

#[test]
fn loop_group_repeats_its_count() {
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));
    let characters = Characters::new().with(character(
        "hero",
        vec![flow(
            FlowBehavior::Loop,
            Some("3"),
            vec![RuleTreeItem::Rule(rule("count", "hero", vec![bump()]))],
        )],
    ));

    let next = tick_idle(&world, &characters);

    assert_eq!(variable(&next, 0, "count").as_deref(), Some("3"));
}

#[test]
fn loop_count_is_capped() {
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));
    let characters = Characters::new().with(character(
        "hero",
        vec![flow(
            FlowBehavior::Loop,
            Some("1000"),
            vec![RuleTreeItem::Rule(rule("count", "hero", vec![bump()]))],
        )],
    ));
    let config = EngineConfig {
        max_loop_iterations: 5,
        ..EngineConfig::default()
    };

    let next = tick(&world, &characters, &config, &Input::default());

    assert_eq!(variable(&next, 0, "count").as_deref(), Some("5"));
}

#[test]
fn loop_count_from_a_variable_is_read_once() {
    let mut grid = stage(3, 3, &[]);
    grid.spawn(template("hero", 1, 1).with_variable("count", "2"));
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::FlowGroup(FlowGroup {
            id: "loop".into(),
            behavior: FlowBehavior::Loop,
            loop_count: Some(RuleValue::actor(SELF, "count")),
            rules: vec![RuleTreeItem::Rule(rule("count", "hero", vec![bump()]))],
            ..FlowGroup::default()
        })],
    ));

    let next = tick_idle(&World::with_stage(grid), &characters);

    // two passes; re-reading the growing count would run to the cap
    assert_eq!(variable(&next, 0, "count").as_deref(), Some("4"));
}

/// Hero rule expecting two sheep stacked on the cell to its right.
fn herd_rule(id: &str, conditions: Vec<RuleCondition>) -> RuleTreeItem {
    let mut herd = rule(id, "hero", vec![bump()]);
    herd.extent = RuleExtent::new(0, 1, 0, 0);
    herd.actors.insert(LocalId(2), template("sheep", 1, 0));
    herd.actors.insert(LocalId(3), template("sheep", 1, 0));
    herd.conditions = conditions;
    RuleTreeItem::Rule(herd)
}

fn herd_world() -> World {
    let mut grid = stage(4, 3, &[("hero", 1, 1)]);
    grid.spawn(template("sheep", 2, 1).with_variable("wool", "4"));
    grid.spawn(template("sheep", 2, 1).with_variable("wool", "9"));
    World::with_stage(grid)
}

#[test]
fn stacked_candidates_bind_in_id_order() {
    let characters = Characters::new()
        .with(character("hero", vec![herd_rule("herd", Vec::new())]))
        .with(Character::new("sheep", "Sheep"));

    let next = tick_idle(&herd_world(), &characters);

    let RuleEvaluation::Evaluated(detail) = evaluation(&next, 0, "herd") else {
        panic!("herd rule should have been evaluated");
    };
    assert!(detail.passed);
    assert_eq!(detail.bindings.get(&LocalId(2)), Some(&ActorId(1)));
    assert_eq!(detail.bindings.get(&LocalId(3)), Some(&ActorId(2)));
}

#[test]
fn greedy_binding_does_not_backtrack() {
    // swapping the sheep would satisfy the condition, but the first sheep
    // already took the first free template
    let picky = RuleCondition::new(
        "thin",
        RuleValue::actor(LocalId(3), "wool"),
        Comparator::Equal,
        RuleValue::constant("4"),
    );
    let characters = Characters::new()
        .with(character("hero", vec![herd_rule("herd", vec![picky])]))
        .with(Character::new("sheep", "Sheep"));

    let next = tick_idle(&herd_world(), &characters);

    let RuleEvaluation::Evaluated(detail) = evaluation(&next, 0, "herd") else {
        panic!("herd rule should have been evaluated");
    };
    assert!(!detail.passed);
    assert_eq!(
        detail.mismatch,
        Some(Mismatch::Unmatched {
            cell: Position::new(1, 0),
            actor: ActorId(2),
        })
    );
    assert_eq!(variable(&next, 0, "count").as_deref(), Some("0"));
}

#[test]
fn random_group_is_reproducible_per_seed() {
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));
    let characters = Characters::new().with(character(
        "hero",
        vec![flow(
            FlowBehavior::Random,
            None,
            ["a", "b", "c"]
                .into_iter()
                .map(|pick| RuleTreeItem::Rule(rule(pick, "hero", vec![set_global("pick", pick)])))
                .collect(),
        )],
    ));
    let pick = |seed: u64| {
        let config = EngineConfig::default().with_seed(seed);
        let next = tick(&world, &characters, &config, &Input::default());
        next.globals.value("pick").map(str::to_owned)
    };

    for seed in 0..8 {
        assert_eq!(pick(seed), pick(seed));
    }
    let distinct: std::collections::BTreeSet<_> = (0..32).map(pick).collect();
    assert!(distinct.len() > 1, "every seed picked the same rule");
}

#[test]
fn diagnostics_are_rebuilt_every_tick() {
    let characters = Characters::new().with(character(
        "hero",
        vec![on_key(
            "Space",
            vec![RuleTreeItem::Rule(rule("jump", "hero", vec![step(0, -1)]))],
        )],
    ));
    let world = World::with_stage(stage(5, 5, &[("hero", 2, 2)]));

    let pressed = tick(
        &world,
        &characters,
        &EngineConfig::default(),
        &Input::default().with_key("Space"),
    );
    assert!(evaluation(&pressed, 0, "jump").passed());
    assert_eq!(pressed.globals.value(Globals::KEYPRESS), Some("Space"));
    assert!(pressed.input.is_empty());

    let released = tick_idle(&pressed, &characters);
    assert_eq!(evaluation(&released, 0, "jump"), &RuleEvaluation::NotEvaluated);
    assert_eq!(position(&released, 0), Some(Position::new(2, 1)));
}

#[test]
fn click_gate_only_admits_clicked_actor() {
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::EventGroup(world_core::EventGroup {
            event: world_core::EventKind::Click,
            rules: vec![RuleTreeItem::Rule(rule("poke", "hero", vec![bump()]))],
            ..Default::default()
        })],
    ));
    let world = World::with_stage(stage(5, 1, &[("hero", 0, 0), ("hero", 3, 0)]));

    let next = tick(
        &world,
        &characters,
        &EngineConfig::default(),
        &Input::default().with_click(ActorId(1)),
    );

    assert_eq!(variable(&next, 0, "count"), None);
    assert_eq!(variable(&next, 1, "count").as_deref(), Some("1"));
    assert_eq!(next.globals.value(Globals::CLICK), Some("1"));
}

#[test]
fn precondition_gates_flow_group() {
    let mut group = flow(
        FlowBehavior::All,
        None,
        vec![RuleTreeItem::Rule(rule("count", "hero", vec![bump()]))],
    );
    if let RuleTreeItem::FlowGroup(group) = &mut group {
        group.precondition = Some(vec![RuleCondition::new(
            "low",
            RuleValue::actor(SELF, "count"),
            Comparator::Less,
            RuleValue::constant("2"),
        )]);
    }
    let characters = Characters::new().with(character("hero", vec![group]));
    let mut world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));

    for _ in 0..4 {
        world = tick_idle(&world, &characters);
    }

    assert_eq!(variable(&world, 0, "count").as_deref(), Some("2"));
}

#[test]
fn created_actor_gets_fresh_id_and_later_actions() {
    let spawn = rule(
        "spawn",
        "hero",
        vec![
            RuleAction::new(RuleActionKind::Create {
                actor_id: LocalId(5),
                actor: template("rock", 0, 0),
                offset: Position::new(1, 0),
            }),
            RuleAction::new(RuleActionKind::Appearance {
                actor_id: LocalId(5),
                value: RuleValue::constant("cracked"),
            }),
        ],
    );
    let characters = Characters::new()
        .with(character("hero", vec![RuleTreeItem::Rule(spawn)]))
        .with(character("rock", Vec::new()));
    let world = World::with_stage(stage(5, 1, &[("hero", 1, 0)]));

    let next = tick_idle(&world, &characters);

    let stage = next.current_stage().expect("stage");
    let rock = stage.actor(ActorId(1)).expect("rock created");
    assert_eq!(rock.position, Position::new(2, 0));
    assert_eq!(rock.appearance, "cracked");
    // the created actor is not walked in the tick that created it
    assert!(!next.evaluated_rule_details.contains_key(&ActorId(1)));
}

#[test]
fn actor_deleted_mid_tick_is_not_walked() {
    let mut eat = rule(
        "eat",
        "hero",
        vec![RuleAction::new(RuleActionKind::Delete {
            actor_id: LocalId(2),
        })],
    );
    eat.extent = RuleExtent::new(0, 1, 0, 0);
    eat.actors.insert(LocalId(2), template("snack", 1, 0));

    let characters = Characters::new()
        .with(character("hero", vec![RuleTreeItem::Rule(eat)]))
        .with(character(
            "snack",
            vec![RuleTreeItem::Rule(rule("flee", "snack", vec![step(1, 0)]))],
        ));
    let world = World::with_stage(stage(5, 1, &[("hero", 1, 0), ("snack", 2, 0)]));

    let next = tick_idle(&world, &characters);

    assert_eq!(position(&next, 1), None);
    assert!(!next.evaluated_rule_details.contains_key(&ActorId(1)));
    let frames = next.evaluated_tick_frames.expect("frames recorded");
    assert_eq!(frames[0].removed, vec![ActorId(1)]);
}

#[test]
fn skipped_step_shares_the_previous_frame() {
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::Rule(rule(
            "walk",
            "hero",
            vec![step(1, 0), bump().with_style(AnimationStyle::Skip)],
        ))],
    ));
    let world = World::with_stage(stage(5, 1, &[("hero", 0, 0)]));

    let next = tick_idle(&world, &characters);

    let frames = next.evaluated_tick_frames.as_ref().expect("frames recorded");
    assert_eq!(frames.len(), 1);
    let hero = &frames[0].actors[&ActorId(0)];
    assert_eq!(hero.position, Position::new(1, 0));
    assert_eq!(hero.variable_values.get("count").map(String::as_str), Some("1"));
}

#[test]
fn sparse_padding_and_disabled_frames() {
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::Rule(rule("walk", "hero", vec![step(1, 0), step(1, 0)]))],
    ));
    let world = World::with_stage(stage(5, 1, &[("hero", 0, 0), ("rock", 4, 0)]));

    let sparse = EngineConfig::default().with_frame_padding(FramePadding::Sparse);
    let next = tick(&world, &characters, &sparse, &Input::default());
    let frames = next.evaluated_tick_frames.expect("frames recorded");
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|frame| frame.actors.len() == 1));

    let silent = EngineConfig {
        record_frames: false,
        ..EngineConfig::default()
    };
    let next = tick(&world, &characters, &silent, &Input::default());
    assert!(next.evaluated_tick_frames.is_none());
    assert_eq!(position(&next, 0), Some(Position::new(2, 0)));
}

#[test]
fn global_action_switches_stage() {
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::Rule(rule(
            "exit",
            "hero",
            vec![set_global(Globals::SELECTED_STAGE, "level-2")],
        ))],
    ));
    let mut level_2 = stage(3, 3, &[]);
    level_2.id = "level-2".into();
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)])).add_stage(level_2);

    let next = tick_idle(&world, &characters);

    assert_eq!(next.current_stage().map(|s| s.id.as_str()), Some("level-2"));
}

#[test]
fn unknown_stage_switch_is_reverted() {
    let characters = Characters::new().with(character(
        "hero",
        vec![RuleTreeItem::Rule(rule(
            "exit",
            "hero",
            vec![set_global(Globals::SELECTED_STAGE, "missing")],
        ))],
    ));
    let world = World::with_stage(stage(3, 3, &[("hero", 1, 1)]));

    let next = tick_idle(&world, &characters);

    assert_eq!(next.globals.selected_stage(), Some("main"));
}

#[test]
fn unknown_character_is_skipped() {
    let world = World::with_stage(stage(3, 3, &[("ghost", 1, 1)]));
    let next = tick_idle(&world, &Characters::new());
    assert_eq!(position(&next, 0), Some(Position::new(1, 1)));
    assert!(next.evaluated_rule_details.is_empty());
}
