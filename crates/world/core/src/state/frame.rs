use std::collections::BTreeMap;

use super::{ActorId, ActorMap, AnimationStyle};

/// One intermediate snapshot of the intra-tick animation timeline.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Frame {
    /// Position in the timeline, starting at 0.
    pub id: u32,
    pub actors: ActorMap,
    /// Style of each actor that changed in this frame.
    #[cfg_attr(feature = "serde", serde(default))]
    pub animation_styles: BTreeMap<ActorId, AnimationStyle>,
    /// Actors deleted in this frame.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub removed: Vec<ActorId>,
}
