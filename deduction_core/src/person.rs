//! Characters at play: a fixed profile plus what they believe.

use mystery_rules::{AssetRef, Noun, PersonId, PersonProfile, Sentence, Verb};

use crate::knowledge_base::{AudioCue, Knowledge, Reaction, ReactionKind};

/// A line of dialogue a character speaks in reaction to something.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenLine {
    pub text: String,
    pub cue: AudioCue,
}

/// A character together with their knowledge store.
#[derive(Debug, Clone)]
pub struct PersonState {
    pub profile: PersonProfile,
    pub knowledge: Knowledge,
}

impl PersonState {
    /// Create a character who knows nothing yet.
    pub fn new(profile: PersonProfile) -> Self {
        Self {
            profile,
            knowledge: Knowledge::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.profile.id
    }

    pub fn is_player(&self) -> bool {
        self.profile.is_player
    }

    pub fn head_sprite(&self) -> &AssetRef {
        &self.profile.head_sprite
    }

    pub fn hair(&self) -> Option<Noun> {
        self.profile.hair()
    }

    /// Phrase a sentence as this character would say it.
    ///
    /// Nouns describing the speaker become "I", and denials are spelled out:
    /// a Red-haired speaker says "I am not Killer" for `Red is Killer FALSE`.
    pub fn speak(&self, sentence: &Sentence) -> String {
        let (subject, object) = if self.profile.is_described_by(sentence.object)
            && !self.profile.is_described_by(sentence.subject)
        {
            (sentence.object, sentence.subject)
        } else {
            (sentence.subject, sentence.object)
        };
        let first_person = self.profile.is_described_by(subject);
        let affirmative = sentence.is_affirmative();

        let predicate = match (sentence.verb, first_person, affirmative) {
            (Verb::Is, true, true) => "am",
            (Verb::Is, true, false) => "am not",
            (Verb::Is, false, true) => "is",
            (Verb::Is, false, false) => "is not",
            (Verb::Has, true, true) => "have",
            (Verb::Has, true, false) => "do not have",
            (Verb::Has, false, true) => "has",
            (Verb::Has, false, false) => "does not have",
        };

        if first_person {
            format!("I {} {}", predicate, object)
        } else {
            format!("{} {} {}", subject, predicate, object)
        }
    }

    /// Hear `sentence` from `speaker` and say how it lands.
    pub fn listen(&mut self, speaker: PersonId, sentence: Sentence) -> Vec<SpokenLine> {
        let reactions = self.knowledge.listen(speaker, sentence);
        reactions.iter().map(|r| self.phrase(r)).collect()
    }

    fn phrase(&self, reaction: &Reaction) -> SpokenLine {
        let said = self.speak(&reaction.sentence);
        let text = match reaction.kind {
            ReactionKind::Repeated => "You already told me that.".to_string(),
            ReactionKind::Corroborated => format!("I knew that {}.", said),
            ReactionKind::Contradicted => format!(
                "That can't be right. I was sure {}.",
                self.speak(&reaction.sentence.negated())
            ),
            ReactionKind::Learned => format!("Really? {}?", said),
            ReactionKind::Deduced => format!("Then {}!", said),
        };
        SpokenLine {
            text,
            cue: reaction.cue,
        }
    }
}
