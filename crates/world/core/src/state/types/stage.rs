use std::sync::Arc;

use super::{Actor, ActorId, ActorMap, Position, StageId};

/// A grid of actors with optional wraparound on each axis.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stage {
    pub id: StageId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actors: ActorMap,
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wrap_x: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wrap_y: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub background: String,
    /// Next id handed out by [`Stage::allocate_actor_id`].
    #[cfg_attr(feature = "serde", serde(default))]
    next_actor_id: u32,
}

impl Stage {
    pub fn new(id: impl Into<StageId>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap_x: bool, wrap_y: bool) -> Self {
        self.wrap_x = wrap_x;
        self.wrap_y = wrap_y;
        self
    }

    /// Allocates a new unique actor id.
    ///
    /// Ids are never reused, even after deletion, and always exceed every id
    /// currently on the stage (documents written by hand may omit the
    /// counter).
    pub fn allocate_actor_id(&mut self) -> ActorId {
        let above_existing = self
            .actors
            .keys()
            .next_back()
            .map_or(0, |id| id.0.saturating_add(1));
        let id = self.next_actor_id.max(above_existing);
        self.next_actor_id = id.saturating_add(1);
        ActorId(id)
    }

    /// Places an actor, assigning it a fresh id.
    pub fn spawn(&mut self, mut actor: Actor) -> ActorId {
        let id = self.allocate_actor_id();
        actor.id = id;
        self.actors.insert(id, Arc::new(actor));
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id).map(Arc::as_ref)
    }

    /// Resolves a position onto the stage.
    ///
    /// Wrapping axes are reduced modulo the stage size; a coordinate outside
    /// a non-wrapping axis makes the whole position unreachable (`None`).
    pub fn wrap(&self, position: Position) -> Option<Position> {
        Some(Position::new(
            wrap_axis(position.x, self.width, self.wrap_x)?,
            wrap_axis(position.y, self.height, self.wrap_y)?,
        ))
    }

    /// Like [`Stage::wrap`], but clamps non-wrapping axes into range.
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            clamp_axis(position.x, self.width, self.wrap_x),
            clamp_axis(position.y, self.height, self.wrap_y),
        )
    }
}

fn wrap_axis(value: i32, extent: u32, wraps: bool) -> Option<i32> {
    let extent = i32::try_from(extent).ok().filter(|extent| *extent > 0)?;
    if wraps {
        Some(value.rem_euclid(extent))
    } else if (0..extent).contains(&value) {
        Some(value)
    } else {
        None
    }
}

fn clamp_axis(value: i32, extent: u32, wraps: bool) -> i32 {
    let extent = i32::try_from(extent).unwrap_or(i32::MAX).max(1);
    if wraps {
        value.rem_euclid(extent)
    } else {
        value.clamp(0, extent - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_axis_reduces_to_non_negative() {
        let stage = Stage::new("s", 10, 5).with_wrap(true, true);
        assert_eq!(stage.wrap(Position::new(10, -1)), Some(Position::new(0, 4)));
        assert_eq!(stage.wrap(Position::new(-11, 12)), Some(Position::new(9, 2)));
    }

    #[test]
    fn non_wrapping_axis_rejects_off_stage() {
        let stage = Stage::new("s", 10, 5).with_wrap(true, false);
        assert_eq!(stage.wrap(Position::new(12, 4)), Some(Position::new(2, 4)));
        assert_eq!(stage.wrap(Position::new(3, 5)), None);
        assert_eq!(stage.wrap(Position::new(3, -1)), None);
    }

    #[test]
    fn clamp_keeps_last_valid_cell() {
        let stage = Stage::new("s", 10, 5);
        assert_eq!(stage.clamp(Position::new(11, -2)), Position::new(9, 0));
    }

    #[test]
    fn allocated_ids_are_never_reused() {
        let mut stage = Stage::new("s", 4, 4);
        let first = stage.spawn(Actor::new(ActorId(0), "rock", "idle", Position::ORIGIN));
        let second = stage.spawn(Actor::new(ActorId(0), "rock", "idle", Position::new(1, 0)));
        stage.actors.remove(&second);

        let third = stage.allocate_actor_id();
        assert_eq!(first, ActorId(0));
        assert_eq!(second, ActorId(1));
        assert_eq!(third, ActorId(2));
    }

    #[test]
    fn allocation_skips_ids_already_present() {
        let mut stage = Stage::new("s", 4, 4);
        stage.actors.insert(
            ActorId(41),
            Arc::new(Actor::new(ActorId(41), "rock", "idle", Position::ORIGIN)),
        );
        assert_eq!(stage.allocate_actor_id(), ActorId(42));
    }
}
