//! Belief definitions - entries in a knowledge store.

use mystery_rules::{PersonId, Sentence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a belief entered the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeliefSource {
    /// Scripted at session start.
    Seeded,
    /// Picked up as a clue.
    Found,
    /// Told by another character.
    Heard(PersonId),
    /// Deduced from other beliefs.
    Derived,
}

/// A sentence a character holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Belief {
    pub sentence: Sentence,
    pub source: BeliefSource,
    /// Everyone who has told this character the sentence.
    pub told_by: BTreeSet<PersonId>,
}

impl Belief {
    pub fn new(sentence: Sentence, source: BeliefSource) -> Self {
        let mut told_by = BTreeSet::new();
        if let BeliefSource::Heard(speaker) = source {
            told_by.insert(speaker);
        }
        Self {
            sentence,
            source,
            told_by,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.source, BeliefSource::Derived)
    }
}
