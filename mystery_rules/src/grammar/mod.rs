//! The fixed vocabulary facts are built from.
//!
//! Facts are sentences over a small, closed set of nouns. Each noun belongs to
//! exactly one [`NounType`], which is what clue generators and the deduction
//! rules dispatch on.

mod sentence;

pub use sentence::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of nouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NounType {
    HairColor,
    /// How a character relates to the victim.
    Identity,
    /// Proper-noun-like entities: physical objects and the culprit designation.
    Unique,
}

impl NounType {
    /// Whether every character holds exactly one noun of this type.
    ///
    /// Two different nouns of an exclusive type can never describe the same
    /// character, which is what lets a store rule suspects out.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, NounType::HairColor | NounType::Identity)
    }
}

/// Every entity a sentence can talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Noun {
    // Hair colors
    Blonde,
    Brown,
    Red,

    // Identities
    Brother,
    Nephew,
    Butler,
    Partner,

    // Unique
    Killer,
    Knife,
    Poison,
}

impl Noun {
    const ALL: [Noun; 10] = [
        Noun::Blonde,
        Noun::Brown,
        Noun::Red,
        Noun::Brother,
        Noun::Nephew,
        Noun::Butler,
        Noun::Partner,
        Noun::Killer,
        Noun::Knife,
        Noun::Poison,
    ];

    /// All nouns in declaration order.
    pub fn all() -> &'static [Noun] {
        &Self::ALL
    }

    /// All nouns of the given type, in declaration order.
    pub fn of_type(noun_type: NounType) -> Vec<Noun> {
        Self::ALL
            .iter()
            .copied()
            .filter(|n| n.noun_type() == noun_type)
            .collect()
    }

    pub fn noun_type(&self) -> NounType {
        match self {
            Noun::Blonde | Noun::Brown | Noun::Red => NounType::HairColor,
            Noun::Brother | Noun::Nephew | Noun::Butler | Noun::Partner => NounType::Identity,
            Noun::Killer | Noun::Knife | Noun::Poison => NounType::Unique,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Noun::Blonde => "Blonde",
            Noun::Brown => "Brown",
            Noun::Red => "Red",
            Noun::Brother => "Brother",
            Noun::Nephew => "Nephew",
            Noun::Butler => "Butler",
            Noun::Partner => "Partner",
            Noun::Killer => "Killer",
            Noun::Knife => "Knife",
            Noun::Poison => "Poison",
        }
    }
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relation tags. The engine gives them no meaning beyond display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verb {
    Is,
    Has,
}

impl Verb {
    /// Lowercased display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Is => "is",
            Verb::Has => "has",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of a sentence: asserting or denying the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Adverb {
    True,
    False,
}

impl Adverb {
    pub fn is_true(&self) -> bool {
        matches!(self, Adverb::True)
    }

    pub fn flipped(&self) -> Adverb {
        match self {
            Adverb::True => Adverb::False,
            Adverb::False => Adverb::True,
        }
    }
}

impl From<bool> for Adverb {
    fn from(value: bool) -> Self {
        if value {
            Adverb::True
        } else {
            Adverb::False
        }
    }
}
