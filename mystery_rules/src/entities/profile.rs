//! Fixed attributes of a character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AssetRef, PersonId};
use crate::grammar::{Noun, NounType};

/// Everything about a character that does not change during play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonProfile {
    pub id: PersonId,
    pub is_player: bool,
    pub head_sprite: AssetRef,
    /// The character's own noun for each attribute type, e.g. their hair color.
    pub attributes: BTreeMap<NounType, Noun>,
}

impl PersonProfile {
    /// Create a non-player profile with no attributes.
    pub fn new(id: PersonId, head_sprite: impl Into<String>) -> Self {
        Self {
            id,
            is_player: false,
            head_sprite: AssetRef::new(head_sprite),
            attributes: BTreeMap::new(),
        }
    }

    /// Mark this profile as the player.
    pub fn as_player(mut self) -> Self {
        self.is_player = true;
        self
    }

    /// Set an attribute; the attribute type is taken from the noun.
    pub fn with_attribute(mut self, noun: Noun) -> Self {
        self.attributes.insert(noun.noun_type(), noun);
        self
    }

    pub fn attribute(&self, noun_type: NounType) -> Option<Noun> {
        self.attributes.get(&noun_type).copied()
    }

    pub fn hair(&self) -> Option<Noun> {
        self.attribute(NounType::HairColor)
    }

    /// Whether `noun` is one of this character's own attributes.
    pub fn is_described_by(&self, noun: Noun) -> bool {
        self.attributes.get(&noun.noun_type()) == Some(&noun)
    }
}
