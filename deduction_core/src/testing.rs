//! Headless fixtures and recording fakes for the collaborator ports.

use mystery_rules::{
    ClueGeneratorRegistry, ClueId, ClueInfo, ClueItem, Noun, PersonId, PersonProfile, Sentence,
    Verb,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::assets::{AssetHandle, AssetRegistry};
use crate::knowledge_base::AudioCue;
use crate::person::PersonState;
use crate::ports::{AudioPlayer, Journal, LoadHandle, Presenter, SceneLoader};
use crate::session::{Collaborators, Mystery};

/// The name written in blood.
pub const KILLER_IS_NEPHEW: Sentence = Sentence::affirm(Noun::Killer, Verb::Is, Noun::Nephew);

/// Player 0 is a blonde butler, 1 a brown-haired brother, 2 the red-haired nephew.
pub fn profiles() -> Vec<PersonProfile> {
    vec![
        PersonProfile::new(PersonId(0), "HeadBlonde")
            .as_player()
            .with_attribute(Noun::Blonde)
            .with_attribute(Noun::Butler),
        PersonProfile::new(PersonId(1), "HeadBrown")
            .with_attribute(Noun::Brown)
            .with_attribute(Noun::Brother),
        PersonProfile::new(PersonId(2), "HeadRed")
            .with_attribute(Noun::Red)
            .with_attribute(Noun::Nephew),
    ]
}

pub fn cast() -> Vec<PersonState> {
    profiles().into_iter().map(PersonState::new).collect()
}

/// A solvable mystery: the photos identify the nephew by hair.
pub fn mystery() -> Mystery {
    let registry = ClueGeneratorRegistry::with_defaults();
    let clues = [
        (Noun::Red, Noun::Nephew),
        (Noun::Brown, Noun::Brother),
        (Noun::Butler, Noun::Knife),
    ]
    .into_iter()
    .filter_map(|(a, b)| registry.make_item(a, b))
    .collect();

    Mystery {
        people: profiles(),
        starting_clue: ClueInfo::new(Noun::Killer, Noun::Nephew, Verb::Is),
        clues,
        culprit: PersonId(2),
    }
}

#[derive(Debug, Default)]
pub struct SceneLog {
    pub ops: Vec<String>,
    pub active: Option<String>,
    pub spawned: Vec<(ClueId, (f32, f32))>,
    pub done: BTreeSet<u64>,
    pub issued: u64,
}

impl SceneLog {
    /// Complete every operation issued so far.
    pub fn finish_all(&mut self) {
        self.done.extend(0..self.issued);
    }
}

pub struct FakeLoader(pub Rc<RefCell<SceneLog>>);

impl FakeLoader {
    fn issue(&mut self, op: String) -> LoadHandle {
        let mut log = self.0.borrow_mut();
        log.ops.push(op);
        let handle = LoadHandle(log.issued);
        log.issued += 1;
        handle
    }
}

impl SceneLoader for FakeLoader {
    fn unload(&mut self, room: &str) -> LoadHandle {
        self.issue(format!("unload {}", room))
    }

    fn load_additive(&mut self, room: &str) -> LoadHandle {
        self.issue(format!("load {}", room))
    }

    fn is_done(&self, handle: LoadHandle) -> bool {
        self.0.borrow().done.contains(&handle.0)
    }

    fn set_active(&mut self, room: &str) {
        self.0.borrow_mut().active = Some(room.to_string());
    }

    fn spawn_clue(&mut self, clue: &ClueItem, position: (f32, f32)) {
        self.0.borrow_mut().spawned.push((clue.id, position));
    }
}

/// Something the presenter was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Message {
        speaker: Option<PersonId>,
        images: Vec<AssetHandle>,
        text: String,
        choices: Vec<String>,
    },
    SentencePrompt {
        subjects: Option<Vec<Noun>>,
        objects: Option<Vec<Noun>>,
    },
}

impl Shown {
    pub fn text(&self) -> Option<&str> {
        match self {
            Shown::Message { text, .. } => Some(text),
            Shown::SentencePrompt { .. } => None,
        }
    }
}

pub struct FakePresenter(pub Rc<RefCell<Vec<Shown>>>);

impl Presenter for FakePresenter {
    fn show_message(
        &mut self,
        speaker: Option<PersonId>,
        images: &[AssetHandle],
        text: &str,
        choices: &[String],
    ) {
        self.0.borrow_mut().push(Shown::Message {
            speaker,
            images: images.to_vec(),
            text: text.to_string(),
            choices: choices.to_vec(),
        });
    }

    fn ask_for_sentence(
        &mut self,
        _images: &[AssetHandle],
        subjects: Option<&[Noun]>,
        objects: Option<&[Noun]>,
    ) {
        self.0.borrow_mut().push(Shown::SentencePrompt {
            subjects: subjects.map(<[Noun]>::to_vec),
            objects: objects.map(<[Noun]>::to_vec),
        });
    }
}

pub struct FakeAudio(pub Rc<RefCell<Vec<AudioCue>>>);

impl AudioPlayer for FakeAudio {
    fn play(&mut self, cue: AudioCue) {
        self.0.borrow_mut().push(cue);
    }
}

pub struct FakeJournal(pub Rc<RefCell<Vec<(PersonId, Sentence)>>>);

impl Journal for FakeJournal {
    fn record_heard(&mut self, person: PersonId, sentence: Sentence) {
        self.0.borrow_mut().push((person, sentence));
    }
}

/// Shared views of everything the fakes recorded.
#[derive(Default, Clone)]
pub struct Recorder {
    pub scene: Rc<RefCell<SceneLog>>,
    pub shown: Rc<RefCell<Vec<Shown>>>,
    pub audio: Rc<RefCell<Vec<AudioCue>>>,
    pub journal: Rc<RefCell<Vec<(PersonId, Sentence)>>>,
}

impl Recorder {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            loader: Box::new(FakeLoader(Rc::clone(&self.scene))),
            presenter: Box::new(FakePresenter(Rc::clone(&self.shown))),
            audio: Box::new(FakeAudio(Rc::clone(&self.audio))),
            journal: Box::new(FakeJournal(Rc::clone(&self.journal))),
            assets: AssetRegistry::with_names([
                "HeadBlonde",
                "HeadBrown",
                "HeadRed",
                "Victim",
                "CrimeScene",
                "Photo",
                "Receipt",
                "Hair",
            ]),
        }
    }

    pub fn last_shown(&self) -> Option<Shown> {
        self.shown.borrow().last().cloned()
    }
}
