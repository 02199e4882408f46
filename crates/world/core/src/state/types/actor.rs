use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ActorId, AppearanceId, CharacterId, Position, Transform};

/// Actors keyed by id; iteration order is the canonical evaluation order.
///
/// Entries are shared between snapshots and only copied when a working copy
/// mutates them (`Arc::make_mut`).
pub type ActorMap = BTreeMap<ActorId, Arc<Actor>>;

/// One placed instance of a character.
///
/// The same shape is used for rule templates, where `position` is relative to
/// the rule's main actor and `id` carries no meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Actor {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: ActorId,
    pub character_id: CharacterId,
    /// Instance overrides; missing entries fall back to character defaults.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variable_values: BTreeMap<String, String>,
    pub appearance: AppearanceId,
    pub position: Position,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub transform: Option<Transform>,
}

impl Actor {
    pub fn new(
        id: ActorId,
        character_id: impl Into<CharacterId>,
        appearance: impl Into<AppearanceId>,
        position: Position,
    ) -> Self {
        Self {
            id,
            character_id: character_id.into(),
            variable_values: BTreeMap::new(),
            appearance: appearance.into(),
            position,
            transform: None,
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variable_values.insert(name.into(), value.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Orientation used for footprints; untransformed actors are upright.
    pub fn orientation(&self) -> Transform {
        self.transform.unwrap_or_default()
    }
}
