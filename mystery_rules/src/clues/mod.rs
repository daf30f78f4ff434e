//! Clues - discoverable facts and their physical form.

mod generators;

pub use generators::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::AssetRef;
use crate::grammar::{Noun, Sentence, Verb};

/// A fact pairing two nouns through a verb. Always asserted true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueInfo {
    pub noun_a: Noun,
    pub noun_b: Noun,
    pub verb: Verb,
}

impl ClueInfo {
    pub fn new(noun_a: Noun, noun_b: Noun, verb: Verb) -> Self {
        Self {
            noun_a,
            noun_b,
            verb,
        }
    }

    pub fn sentence(&self) -> Sentence {
        Sentence::affirm(self.noun_a, self.verb, self.noun_b)
    }
}

/// Unique identifier for a physical clue instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClueId(pub Uuid);

impl ClueId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClueId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A clue as it appears in the world: the fact plus how it looks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClueItem {
    pub id: ClueId,
    pub info: ClueInfo,
    pub sprite: AssetRef,
    pub description: String,
}

impl ClueItem {
    pub fn new(
        noun_a: Noun,
        noun_b: Noun,
        verb: Verb,
        sprite: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ClueId::new(),
            info: ClueInfo::new(noun_a, noun_b, verb),
            sprite: AssetRef::new(sprite),
            description: description.into(),
        }
    }

    pub fn sentence(&self) -> Sentence {
        self.info.sentence()
    }
}
