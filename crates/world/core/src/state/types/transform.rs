//! Sprite orientation as an element of the dihedral group of the square.
//!
//! Rotations and flips do not commute, so composition is looked up in a fixed
//! Cayley table rather than computed from angles.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::Position;

/// One of the eight orientations of a square sprite.
///
/// Rotations are clockwise in screen coordinates (y grows downward).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    #[default]
    #[strum(serialize = "0")]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Identity,
    #[strum(serialize = "90")]
    #[cfg_attr(feature = "serde", serde(rename = "90"))]
    Rotate90,
    #[strum(serialize = "180")]
    #[cfg_attr(feature = "serde", serde(rename = "180"))]
    Rotate180,
    #[strum(serialize = "270")]
    #[cfg_attr(feature = "serde", serde(rename = "270"))]
    Rotate270,
    #[strum(serialize = "flip-x")]
    #[cfg_attr(feature = "serde", serde(rename = "flip-x"))]
    FlipX,
    #[strum(serialize = "flip-y")]
    #[cfg_attr(feature = "serde", serde(rename = "flip-y"))]
    FlipY,
    /// Mirror across the main diagonal.
    #[strum(serialize = "d1")]
    #[cfg_attr(feature = "serde", serde(rename = "d1"))]
    D1,
    /// Mirror across the anti-diagonal.
    #[strum(serialize = "d2")]
    #[cfg_attr(feature = "serde", serde(rename = "d2"))]
    D2,
}

use Transform::{D1, D2, FlipX, FlipY, Identity, Rotate90, Rotate180, Rotate270};

/// `COMPOSITION[a][b]` is the orientation reached by applying `a`, then `b`.
const COMPOSITION: [[Transform; 8]; 8] = [
    [Identity, Rotate90, Rotate180, Rotate270, FlipX, FlipY, D1, D2],
    [Rotate90, Rotate180, Rotate270, Identity, D1, D2, FlipY, FlipX],
    [Rotate180, Rotate270, Identity, Rotate90, FlipY, FlipX, D2, D1],
    [Rotate270, Identity, Rotate90, Rotate180, D2, D1, FlipX, FlipY],
    [FlipX, D2, FlipY, D1, Identity, Rotate180, Rotate270, Rotate90],
    [FlipY, D1, FlipX, D2, Rotate180, Identity, Rotate90, Rotate270],
    [D1, FlipX, D2, FlipY, Rotate90, Rotate270, Identity, Rotate180],
    [D2, FlipY, D1, FlipX, Rotate270, Rotate90, Rotate180, Identity],
];

impl Transform {
    const fn index(self) -> usize {
        match self {
            Identity => 0,
            Rotate90 => 1,
            Rotate180 => 2,
            Rotate270 => 3,
            FlipX => 4,
            FlipY => 5,
            D1 => 6,
            D2 => 7,
        }
    }

    /// Orientation reached by applying `self` and then `next`.
    pub const fn then(self, next: Transform) -> Transform {
        COMPOSITION[self.index()][next.index()]
    }

    /// The orientation that undoes `self`.
    pub const fn inverse(self) -> Transform {
        match self {
            Rotate90 => Rotate270,
            Rotate270 => Rotate90,
            other => other,
        }
    }

    /// Maps a sprite-relative offset through this orientation.
    pub const fn apply(self, offset: Position) -> Position {
        let Position { x, y } = offset;
        match self {
            Identity => Position::new(x, y),
            Rotate90 => Position::new(-y, x),
            Rotate180 => Position::new(-x, -y),
            Rotate270 => Position::new(y, -x),
            FlipX => Position::new(-x, y),
            FlipY => Position::new(x, -y),
            D1 => Position::new(y, x),
            D2 => Position::new(-y, -x),
        }
    }
}
