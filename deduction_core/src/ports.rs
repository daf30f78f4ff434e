//! Interfaces to the collaborators the engine drives but does not implement:
//! scene loading, presentation, audio and the player's journal.

use mystery_rules::{ClueItem, Noun, PersonId, Sentence};

use crate::assets::AssetHandle;
use crate::knowledge_base::AudioCue;

/// Handle to a background scene operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadHandle(pub u64);

/// Loads and unloads rooms in the background.
pub trait SceneLoader {
    /// Begin unloading a room.
    fn unload(&mut self, room: &str) -> LoadHandle;

    /// Begin loading a room alongside whatever stays resident.
    fn load_additive(&mut self, room: &str) -> LoadHandle;

    /// Whether the operation behind `handle` has completed.
    fn is_done(&self, handle: LoadHandle) -> bool;

    /// Make `room` the target for spawned objects.
    fn set_active(&mut self, room: &str);

    /// Place a clue's physical representation in the active room.
    fn spawn_clue(&mut self, clue: &ClueItem, position: (f32, f32));
}

/// Shows dialogue and collects the player's answers.
///
/// Answers come back through the session's `choose` and `submit_sentence`.
pub trait Presenter {
    fn show_message(
        &mut self,
        speaker: Option<PersonId>,
        images: &[AssetHandle],
        text: &str,
        choices: &[String],
    );

    /// Ask the player to compose a sentence. `None` means any noun may be used.
    fn ask_for_sentence(
        &mut self,
        images: &[AssetHandle],
        subjects: Option<&[Noun]>,
        objects: Option<&[Noun]>,
    );
}

pub trait AudioPlayer {
    fn play(&mut self, cue: AudioCue);
}

/// Append-only record of what characters have said, for the player to review.
pub trait Journal {
    fn record_heard(&mut self, person: PersonId, sentence: Sentence);
}
