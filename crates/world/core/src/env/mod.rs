//! Read-only data the operator consults while ticking.
//!
//! Character definitions and the random source are injected through oracle
//! traits; the [`Env`] aggregate bundles them so the engine never depends on
//! how the host stores characters.
mod rng;

use std::collections::BTreeMap;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::state::{Character, CharacterId};

/// Lookup of character definitions by id.
pub trait CharacterOracle {
    fn character(&self, id: &str) -> Option<&Character>;
}

/// In-memory character table.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Characters(BTreeMap<CharacterId, Character>);

impl Characters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, character: Character) {
        self.0.insert(character.id.clone(), character);
    }

    pub fn with(mut self, character: Character) -> Self {
        self.insert(character);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Character> for Characters {
    fn from_iter<T: IntoIterator<Item = Character>>(iter: T) -> Self {
        let mut characters = Self::new();
        for character in iter {
            characters.insert(character);
        }
        characters
    }
}

impl CharacterOracle for Characters {
    fn character(&self, id: &str) -> Option<&Character> {
        self.0.get(id)
    }
}

/// Aggregates the read-only oracles required by the operator.
#[derive(Debug)]
pub struct Env<'a, C, R>
where
    C: CharacterOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    characters: &'a C,
    rng: &'a R,
}

pub type WorldEnv<'a> = Env<'a, dyn CharacterOracle + 'a, dyn RngOracle + 'a>;

impl<C, R> Clone for Env<'_, C, R>
where
    C: CharacterOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, R> Copy for Env<'_, C, R>
where
    C: CharacterOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, C, R> Env<'a, C, R>
where
    C: CharacterOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(characters: &'a C, rng: &'a R) -> Self {
        Self { characters, rng }
    }

    pub fn characters(&self) -> &'a C {
        self.characters
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }

    pub fn character(&self, id: &str) -> Option<&'a Character> {
        self.characters.character(id)
    }
}

impl<'a, C, R> Env<'a, C, R>
where
    C: CharacterOracle + 'a,
    R: RngOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn into_world_env(self) -> WorldEnv<'a> {
        Env {
            characters: self.characters,
            rng: self.rng,
        }
    }
}
