//! Utility functions for xtask commands

use world_core::{ActorId, RuleId, RuleTreeItem, World};

/// Rules that fired in the tick that produced `world`, in actor order.
pub fn fired_rules(world: &World) -> Vec<(ActorId, RuleId)> {
    world
        .evaluated_rule_details
        .iter()
        .flat_map(|(actor, rules)| {
            rules
                .iter()
                .filter(|(_, evaluation)| evaluation.passed())
                .map(move |(rule, _)| (*actor, rule.clone()))
        })
        .collect()
}

pub fn frame_count(world: &World) -> usize {
    world.evaluated_tick_frames.as_ref().map_or(0, Vec::len)
}

/// Number of leaf rules in a rule tree.
pub fn count_rules(items: &[RuleTreeItem]) -> usize {
    items
        .iter()
        .map(|item| match item {
            RuleTreeItem::EventGroup(group) => count_rules(&group.rules),
            RuleTreeItem::FlowGroup(group) => count_rules(&group.rules),
            RuleTreeItem::Rule(_) => 1,
        })
        .sum()
}
