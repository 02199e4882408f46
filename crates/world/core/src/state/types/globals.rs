use std::collections::BTreeMap;

use super::{Input, StageId};

/// Named world-level value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Global {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
    /// Authoring hint (`"number"`, `"string"`, `"stage"`, ...); the engine
    /// compares values as strings regardless.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "type", skip_serializing_if = "String::is_empty")
    )]
    pub kind: String,
}

/// World-level values keyed by id.
///
/// `click`, `keypress` and `selectedStageId` are always present; the first
/// two are re-derived from the input at the start of every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Globals(BTreeMap<String, Global>);

impl Globals {
    pub const CLICK: &'static str = "click";
    pub const KEYPRESS: &'static str = "keypress";
    pub const SELECTED_STAGE: &'static str = "selectedStageId";

    /// Creates the built-in globals with `selected_stage` as current stage.
    pub fn new(selected_stage: impl Into<StageId>) -> Self {
        let mut globals = Self(BTreeMap::new());
        globals.set(Self::CLICK, "");
        globals.set(Self::KEYPRESS, "");
        globals.set(Self::SELECTED_STAGE, selected_stage.into());
        globals
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(|global| global.value.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&Global> {
        self.0.get(id)
    }

    /// Sets a value, declaring the global if it does not exist yet.
    pub fn set(&mut self, id: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.get_mut(id) {
            Some(global) => global.value = value,
            None => {
                self.0.insert(
                    id.to_owned(),
                    Global {
                        id: id.to_owned(),
                        name: id.to_owned(),
                        value,
                        kind: String::new(),
                    },
                );
            }
        }
    }

    pub fn selected_stage(&self) -> Option<&str> {
        self.value(Self::SELECTED_STAGE)
    }

    /// Folds the tick input into `keypress` and `click`.
    ///
    /// Keys are joined with `,` in sorted order; `click` holds the first
    /// clicked actor id, or is empty.
    pub fn apply_input(&mut self, input: &Input) {
        let keys = input.keys.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        let click = input
            .clicks
            .iter()
            .next()
            .map(ToString::to_string)
            .unwrap_or_default();

        self.set(Self::KEYPRESS, keys);
        self.set(Self::CLICK, click);
        if self.selected_stage().is_none() {
            self.set(Self::SELECTED_STAGE, "");
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Global> {
        self.0.values()
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new("")
    }
}
