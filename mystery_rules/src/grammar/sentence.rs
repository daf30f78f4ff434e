//! Sentences - the atomic facts of the game.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Adverb, Noun, Verb};
use crate::error::RulesError;

/// A subject-verb-object fact with a polarity.
///
/// Relations are undirected: "Red is Nephew" and "Nephew is Red" are the same
/// sentence. Equality and hashing both go through [`SentenceKey`].
///
/// ```text
/// Red is Nephew TRUE
/// Butler has Knife TRUE
/// Blonde is Killer FALSE
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sentence {
    pub subject: Noun,
    pub verb: Verb,
    pub object: Noun,
    pub adverb: Adverb,
}

impl Sentence {
    /// Create a sentence without validation.
    pub const fn new(subject: Noun, verb: Verb, object: Noun, adverb: Adverb) -> Self {
        Self {
            subject,
            verb,
            object,
            adverb,
        }
    }

    /// Create a sentence, rejecting one that relates a noun to itself.
    pub fn try_new(
        subject: Noun,
        verb: Verb,
        object: Noun,
        adverb: Adverb,
    ) -> Result<Self, RulesError> {
        let sentence = Self::new(subject, verb, object, adverb);
        sentence.validate()?;
        Ok(sentence)
    }

    /// An asserting sentence.
    pub const fn affirm(subject: Noun, verb: Verb, object: Noun) -> Self {
        Self::new(subject, verb, object, Adverb::True)
    }

    /// A denying sentence.
    pub const fn deny(subject: Noun, verb: Verb, object: Noun) -> Self {
        Self::new(subject, verb, object, Adverb::False)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.subject == self.object {
            return Err(RulesError::ReflexiveSentence(self.subject));
        }
        Ok(())
    }

    /// The same relation with the opposite polarity.
    pub fn negated(&self) -> Self {
        Self::new(self.subject, self.verb, self.object, self.adverb.flipped())
    }

    pub fn is_affirmative(&self) -> bool {
        self.adverb.is_true()
    }

    /// Order-independent key; equal sentences have equal keys.
    pub fn key(&self) -> SentenceKey {
        let (low, high) = if self.subject <= self.object {
            (self.subject, self.object)
        } else {
            (self.object, self.subject)
        };
        SentenceKey {
            low,
            high,
            verb: self.verb,
            adverb: self.adverb,
        }
    }

    pub fn nouns(&self) -> [Noun; 2] {
        [self.subject, self.object]
    }

    pub fn involves(&self, noun: Noun) -> bool {
        self.subject == noun || self.object == noun
    }

    /// The noun on the other side of `noun`, if `noun` takes part.
    pub fn other_noun(&self, noun: Noun) -> Option<Noun> {
        if self.subject == noun {
            Some(self.object)
        } else if self.object == noun {
            Some(self.subject)
        } else {
            None
        }
    }

    /// Whether both sentences relate the same pair of nouns, ignoring verb and polarity.
    pub fn same_relation(&self, other: &Sentence) -> bool {
        (self.subject == other.subject && self.object == other.object)
            || (self.subject == other.object && self.object == other.subject)
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.verb == other.verb && self.adverb == other.adverb && self.same_relation(other)
    }
}

impl Eq for Sentence {}

impl Hash for Sentence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.verb, self.object)
    }
}

/// Symmetry-aware lookup key for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SentenceKey {
    pub low: Noun,
    pub high: Noun,
    pub verb: Verb,
    pub adverb: Adverb,
}
