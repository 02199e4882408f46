use std::fmt;
use std::ops::{Add, Sub};

/// Identifier of a character (piece type).
pub type CharacterId = String;

/// Identifier of a stage within a world.
pub type StageId = String;

/// Identifier of a leaf rule, unique within a character's rule tree.
pub type RuleId = String;

/// Identifier of an appearance within a character's spritesheet.
pub type AppearanceId = String;

/// Unique identifier of an actor placed on a stage.
///
/// Ids are allocated monotonically per stage and never reused, so ascending
/// id order is creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(
    #[cfg_attr(feature = "serde", serde(deserialize_with = "id_serde::deserialize"))] pub u32,
);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a template actor inside a single rule.
///
/// Local ids only mean something within their rule; a successful scenario
/// match binds each of them to an [`ActorId`] on the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocalId(
    #[cfg_attr(feature = "serde", serde(deserialize_with = "id_serde::deserialize"))] pub u32,
);

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local#{}", self.0)
    }
}

/// Ids accept a number or its decimal string: text formats carry map keys
/// as strings, also inside buffered tagged enums.
#[cfg(feature = "serde")]
mod id_serde {
    use std::fmt;

    use serde::de::{self, Deserializer, Unexpected, Visitor};

    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned 32-bit id or its decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            v.parse().map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// Also used for offsets relative to another position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of ticks a world has been advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let id: ActorId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ActorId(7));
        let id: LocalId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(id, LocalId(3));
        assert!(serde_json::from_str::<ActorId>("\"hero\"").is_err());
        assert!(serde_json::from_str::<ActorId>("-1").is_err());
    }

    #[test]
    fn id_keys_survive_buffered_content() {
        let value = serde_json::json!({ "2": 5 });
        let bindings: BTreeMap<LocalId, ActorId> = serde_json::from_value(value).unwrap();
        assert_eq!(bindings.get(&LocalId(2)), Some(&ActorId(5)));
    }
}
