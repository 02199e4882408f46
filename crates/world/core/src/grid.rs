//! Cells covered by actors.

use crate::state::{Actor, Character, Position};

/// Cells covered by `actor`, in the actor's own coordinate frame.
///
/// Each filled sprite cell is taken relative to the appearance anchor, turned
/// through the actor's transform and placed at the actor's position. Actors
/// without sprite data (unknown character or appearance, or an empty
/// `filled` set) cover their position only.
pub fn footprint(actor: &Actor, character: Option<&Character>) -> Vec<Position> {
    let info = character.and_then(|character| character.spritesheet.appearance(&actor.appearance));
    match info {
        Some(info) if !info.filled.is_empty() => {
            let transform = actor.orientation();
            info.filled
                .iter()
                .map(|cell| actor.position + transform.apply(*cell - info.anchor))
                .collect()
        }
        _ => vec![actor.position],
    }
}

/// Whether `actor` covers `cell`.
pub fn covers(actor: &Actor, character: Option<&Character>, cell: Position) -> bool {
    footprint(actor, character).contains(&cell)
}
