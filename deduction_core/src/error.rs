//! Error types for dialogue and session operations.

use mystery_rules::{ClueId, Noun, PersonId, RulesError};
use thiserror::Error;

/// Misuse of a dialogue block. Always a programming or content error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DialogError {
    #[error("dialogue is not waiting for a choice")]
    NotAwaitingChoice,

    #[error("choice {index} out of range ({available} available)")]
    ChoiceOutOfRange { index: usize, available: usize },

    #[error("dialogue is not waiting for a sentence")]
    NotAwaitingSentence,

    #[error("dialogue is suspended and must be resumed with a choice or a sentence")]
    Suspended,

    #[error("{0} is not among the offered words")]
    OutsideVocabulary(Noun),

    #[error("sentence relates {0} to itself")]
    ReflexiveSentence(Noun),

    #[error("unknown person {0}")]
    UnknownPerson(PersonId),
}

/// Errors from the stage orchestrator.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("{rooms} clue rooms cannot hold {searchers} searchers apart")]
    NotEnoughRooms { rooms: usize, searchers: usize },

    #[error("the cast has no player")]
    NoPlayer,

    #[error("unknown person {0}")]
    UnknownPerson(PersonId),

    #[error("clue {0} is not in the current room")]
    ClueNotHere(ClueId),

    #[error("no dialogue is running")]
    NoDialogue,
}
