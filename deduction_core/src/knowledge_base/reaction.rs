//! Reactions a character has to being told something.

use mystery_rules::{Noun, Sentence};
use serde::{Deserialize, Serialize};

/// Sound cues the audio layer can play. `None` plays nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AudioCue {
    #[default]
    None,
    Surprise,
    Agree,
    Contradict,
    Revelation,
}

impl AudioCue {
    pub fn is_none(&self) -> bool {
        matches!(self, AudioCue::None)
    }
}

/// What kind of reaction a sentence produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionKind {
    /// The same speaker said it before.
    Repeated,
    /// Already believed from another source.
    Corroborated,
    /// The listener believed the opposite.
    Contradicted,
    /// New to the listener.
    Learned,
    /// A new belief deduced from what was just heard.
    Deduced,
}

/// One reaction, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub kind: ReactionKind,
    /// The sentence heard, or for `Deduced` the sentence deduced.
    pub sentence: Sentence,
    pub cue: AudioCue,
}

impl Reaction {
    pub fn new(kind: ReactionKind, sentence: Sentence) -> Self {
        let cue = match kind {
            ReactionKind::Repeated => AudioCue::None,
            ReactionKind::Corroborated => AudioCue::Agree,
            ReactionKind::Contradicted => AudioCue::Contradict,
            ReactionKind::Learned => AudioCue::Surprise,
            ReactionKind::Deduced if sentence.involves(Noun::Killer) => AudioCue::Revelation,
            ReactionKind::Deduced => AudioCue::Surprise,
        };
        Self {
            kind,
            sentence,
            cue,
        }
    }
}
