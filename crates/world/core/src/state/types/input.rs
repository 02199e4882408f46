use std::collections::BTreeSet;

use super::ActorId;

/// Input gathered between two ticks; consumed and cleared by every tick.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    #[cfg_attr(feature = "serde", serde(default))]
    pub keys: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub clicks: BTreeSet<ActorId>,
}

impl Input {
    pub fn with_key(mut self, code: impl Into<String>) -> Self {
        self.keys.insert(code.into());
        self
    }

    pub fn with_click(mut self, actor: ActorId) -> Self {
        self.clicks.insert(actor);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.clicks.is_empty()
    }
}
