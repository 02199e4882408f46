use std::collections::{BTreeMap, BTreeSet};

use super::{AppearanceId, CharacterId, Position, RuleId, RuleTreeItem};

/// A reusable piece type: its rule tree, sprites and variable defaults.
///
/// Characters are read-only during simulation and shared by every actor
/// instance.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Character {
    pub id: CharacterId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Root of the rule tree, evaluated as an implicit "all" container.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<RuleTreeItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spritesheet: Spritesheet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variables: BTreeMap<String, VariableDefinition>,
}

impl Character {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: Vec<RuleTreeItem>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, default_value: impl Into<String>) -> Self {
        let name = name.into();
        self.variables.insert(
            name.clone(),
            VariableDefinition {
                name,
                default_value: default_value.into(),
            },
        );
        self
    }

    pub fn with_appearance(mut self, id: impl Into<AppearanceId>, info: AppearanceInfo) -> Self {
        self.spritesheet.appearances.insert(id.into(), info);
        self
    }

    /// Default value of a declared variable.
    pub fn default_value(&self, variable: &str) -> Option<&str> {
        self.variables
            .get(variable)
            .map(|definition| definition.default_value.as_str())
    }

    /// Ids of every leaf rule in the tree, depth-first.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        fn collect(items: &[RuleTreeItem], out: &mut Vec<RuleId>) {
            for item in items {
                match item {
                    RuleTreeItem::EventGroup(group) => collect(&group.rules, out),
                    RuleTreeItem::FlowGroup(group) => collect(&group.rules, out),
                    RuleTreeItem::Rule(rule) => out.push(rule.id.clone()),
                }
            }
        }

        let mut ids = Vec::new();
        collect(&self.rules, &mut ids);
        ids
    }
}

/// Declared character variable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VariableDefinition {
    pub name: String,
    pub default_value: String,
}

/// Sprite metadata the engine needs: names and occupied cells.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Spritesheet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub appearances: BTreeMap<AppearanceId, AppearanceInfo>,
}

impl Spritesheet {
    pub fn appearance(&self, id: &str) -> Option<&AppearanceInfo> {
        self.appearances.get(id)
    }
}

/// One appearance of a character.
///
/// `filled` lists the sprite cells that block the grid, in sprite
/// coordinates; the actor's position corresponds to `anchor`. An empty
/// `filled` set means a single cell at the anchor.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AppearanceInfo {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub anchor: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filled: BTreeSet<Position>,
}

impl AppearanceInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_filled(mut self, cells: impl IntoIterator<Item = Position>) -> Self {
        self.filled.extend(cells);
        self
    }
}
