//! Dialogue entries and what a block asks the presentation side to show.

use mystery_rules::{AssetRef, Noun, PersonId, Sentence};

use super::DialogBlock;
use crate::knowledge_base::AudioCue;

/// Run after a message is acknowledged.
pub type DialogCallback = Box<dyn FnOnce(&mut DialogBlock)>;

/// Receives the sentence the player composed for a custom prompt.
pub type SentenceCallback = Box<dyn FnOnce(&mut DialogBlock, Sentence)>;

/// One scheduled step of a conversation.
pub enum DialogEntry {
    /// A line of text acknowledged with "Continue". `speaker: None` is the narrator.
    Message {
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        text: String,
        cue: AudioCue,
        on_done: Option<DialogCallback>,
    },

    /// A yes/no offer to exchange information.
    ExchangeRequest {
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        question: String,
    },

    /// One participant's turn to reveal what they found.
    Exchange {
        participant: PersonId,
        images: Vec<AssetRef>,
    },

    /// Ask the player for a sentence and hand it to a callback.
    CustomSentence {
        images: Vec<AssetRef>,
        subjects: Option<Vec<Noun>>,
        objects: Option<Vec<Noun>>,
        on_chosen: SentenceCallback,
    },
}

impl DialogEntry {
    pub fn message(
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        text: impl Into<String>,
        cue: AudioCue,
    ) -> Self {
        DialogEntry::Message {
            speaker,
            images,
            text: text.into(),
            cue,
            on_done: None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DialogEntry::Message { .. } => "Message",
            DialogEntry::ExchangeRequest { .. } => "ExchangeRequest",
            DialogEntry::Exchange { .. } => "Exchange",
            DialogEntry::CustomSentence { .. } => "CustomSentence",
        }
    }
}

impl std::fmt::Debug for DialogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogEntry::Message { speaker, text, .. } => f
                .debug_struct(self.kind())
                .field("speaker", speaker)
                .field("text", text)
                .finish(),
            DialogEntry::ExchangeRequest {
                speaker, question, ..
            } => f
                .debug_struct(self.kind())
                .field("speaker", speaker)
                .field("question", question)
                .finish(),
            DialogEntry::Exchange { participant, .. } => f
                .debug_struct(self.kind())
                .field("participant", participant)
                .finish(),
            DialogEntry::CustomSentence {
                subjects, objects, ..
            } => f
                .debug_struct(self.kind())
                .field("subjects", subjects)
                .field("objects", objects)
                .finish(),
        }
    }
}

/// A message to display with the choices that answer it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePrompt {
    pub speaker: Option<PersonId>,
    pub images: Vec<AssetRef>,
    pub text: String,
    pub choices: Vec<String>,
    pub cue: AudioCue,
}

/// A request for the player to compose a sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct SentencePrompt {
    pub images: Vec<AssetRef>,
    pub subjects: Option<Vec<Noun>>,
    pub objects: Option<Vec<Noun>>,
}

/// What a block needs from the outside after advancing.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogStep {
    /// Show a message; resume with `choose`.
    Message(MessagePrompt),
    /// Ask for a sentence; resume with `submit_sentence`.
    AskSentence(SentencePrompt),
    /// The queue ran dry and the owner asked to be told. Emitted once.
    Finished,
    /// Nothing left to do.
    Idle,
}

/// Coarse state of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Nothing on screen.
    Idle,
    /// A message is shown, waiting to be acknowledged.
    Playing,
    /// Waiting on a decision or a sentence from the player.
    Suspended,
}
