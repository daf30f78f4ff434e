//! Knowledge store - the beliefs of one character.

use mystery_rules::{Adverb, Noun, PersonId, Sentence, SentenceKey, Verb};
use std::collections::BTreeMap;

use super::{derive, Belief, BeliefSource, ConfidenceStrategy, DirectSubstitution, Reaction, ReactionKind};

/// The sentences a character believes.
///
/// Beliefs are only ever added. Keys are symmetric, so a sentence and its
/// mirrored form share one entry, and iteration order is fixed by the key
/// ordering which keeps reactions deterministic.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    beliefs: BTreeMap<SentenceKey, Belief>,
}

impl Knowledge {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sentence as seeded knowledge.
    ///
    /// Returns whether it was new. Re-adding a known sentence changes nothing.
    pub fn add_knowledge(&mut self, sentence: Sentence) -> bool {
        self.insert(sentence, BeliefSource::Seeded)
    }

    /// Insert a sentence learned from a picked up clue.
    pub fn add_found(&mut self, sentence: Sentence) -> bool {
        self.insert(sentence, BeliefSource::Found)
    }

    fn insert(&mut self, sentence: Sentence, source: BeliefSource) -> bool {
        let key = sentence.key();
        if self.beliefs.contains_key(&key) {
            return false;
        }
        self.beliefs.insert(key, Belief::new(sentence, source));
        true
    }

    /// Hear `sentence` from `speaker`, update beliefs and react.
    ///
    /// Reactions are in presentation order: the reaction to the sentence
    /// itself, then one per newly deduced belief.
    pub fn listen(&mut self, speaker: PersonId, sentence: Sentence) -> Vec<Reaction> {
        if let Some(belief) = self.beliefs.get_mut(&sentence.key()) {
            let kind = if belief.told_by.insert(speaker) {
                ReactionKind::Corroborated
            } else {
                ReactionKind::Repeated
            };
            return vec![Reaction::new(kind, sentence)];
        }

        let contradicted =
            self.holds(sentence.subject, sentence.object, sentence.adverb.flipped());
        self.insert(sentence, BeliefSource::Heard(speaker));
        if contradicted {
            return vec![Reaction::new(ReactionKind::Contradicted, sentence)];
        }

        let mut reactions = vec![Reaction::new(ReactionKind::Learned, sentence)];
        let candidates = derive(&sentence, self.sentences());
        for derived in candidates {
            if self.holds(derived.subject, derived.object, derived.adverb.flipped()) {
                continue;
            }
            if self.insert(derived, BeliefSource::Derived) {
                reactions.push(Reaction::new(ReactionKind::Deduced, derived));
            }
        }
        reactions
    }

    /// How strongly the store supports `query`, using the default strategy.
    ///
    /// Zero means no support; it is never an error.
    pub fn verify_belief(&self, query: &Sentence) -> f32 {
        self.verify_belief_with(&DirectSubstitution::default(), query)
    }

    pub fn verify_belief_with(&self, strategy: &dyn ConfidenceStrategy, query: &Sentence) -> f32 {
        strategy.confidence(self, query).max(0.0)
    }

    /// Whether this exact sentence (up to symmetry) is believed.
    pub fn knows(&self, sentence: &Sentence) -> bool {
        self.beliefs.contains_key(&sentence.key())
    }

    /// Whether `a` and `b` are related with the given polarity through any verb.
    pub fn holds(&self, a: Noun, b: Noun, adverb: Adverb) -> bool {
        [Verb::Is, Verb::Has]
            .iter()
            .any(|verb| self.knows(&Sentence::new(a, *verb, b, adverb)))
    }

    pub fn get(&self, sentence: &Sentence) -> Option<&Belief> {
        self.beliefs.get(&sentence.key())
    }

    pub fn beliefs(&self) -> impl Iterator<Item = &Belief> {
        self.beliefs.values()
    }

    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.beliefs.values().map(|b| &b.sentence)
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }
}
