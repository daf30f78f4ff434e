//! The stage and room orchestrator.
//!
//! [`GameSession`] owns the cast, the clue pools and the active conversation,
//! and drives them through the [`GameStage`]s in order. Scene loads are
//! asynchronous on the engine side, so the host calls [`GameSession::tick`]
//! once per frame and the session reacts when a room finishes loading.

mod accusation;
mod rooms;
mod script;
mod transition;

pub use accusation::*;
pub use rooms::*;
pub use transition::*;

use mystery_rules::{
    ClueId, ClueInfo, ClueItem, GameStage, MysteryConfig, Noun, PersonId, PersonProfile, Sentence,
};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::assets::AssetRegistry;
use crate::dialogue::{DialogBlock, DialogContext, DialogState, DialogStep};
use crate::error::{DialogError, SessionError};
use crate::person::PersonState;
use crate::ports::{AudioPlayer, Journal, Presenter, SceneLoader};
use script::Cast;

/// A generated mystery, ready to be played.
#[derive(Debug, Clone)]
pub struct Mystery {
    pub people: Vec<PersonProfile>,
    /// The name written in blood. Everyone knows it from the start.
    pub starting_clue: ClueInfo,
    /// Clues to scatter over the clue rooms.
    pub clues: Vec<ClueItem>,
    pub culprit: PersonId,
}

/// The engine-side services a session drives.
pub struct Collaborators {
    pub loader: Box<dyn SceneLoader>,
    pub presenter: Box<dyn Presenter>,
    pub audio: Box<dyn AudioPlayer>,
    pub journal: Box<dyn Journal>,
    pub assets: AssetRegistry,
}

pub struct GameSession {
    config: MysteryConfig,
    people: Vec<PersonState>,
    player: PersonId,
    culprit: PersonId,
    starting_clue: ClueInfo,
    /// Consumed by `start`.
    unscattered: Vec<ClueItem>,
    stage: GameStage,
    rooms: RoomClues,
    round_clues: RoundClues,
    person_rooms: BTreeMap<PersonId, String>,
    current_room: Option<String>,
    transition: SceneTransition,
    dialogue: Option<DialogBlock>,
    accused: Rc<Cell<Option<Noun>>>,
    rng: StdRng,
    collaborators: Collaborators,
}

impl GameSession {
    /// Check the mystery against the configuration and set up the cast.
    pub fn new(
        mystery: Mystery,
        config: MysteryConfig,
        collaborators: Collaborators,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let player = mystery
            .people
            .iter()
            .find(|p| p.is_player)
            .map(|p| p.id)
            .ok_or(SessionError::NoPlayer)?;
        if !mystery.people.iter().any(|p| p.id == mystery.culprit) {
            return Err(SessionError::UnknownPerson(mystery.culprit));
        }

        let searchers = mystery.people.iter().filter(|p| p.id != player).count();
        if config.clue_rooms.len() < searchers {
            return Err(SessionError::NotEnoughRooms {
                rooms: config.clue_rooms.len(),
                searchers,
            });
        }

        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            people: mystery.people.into_iter().map(PersonState::new).collect(),
            player,
            culprit: mystery.culprit,
            starting_clue: mystery.starting_clue,
            unscattered: mystery.clues,
            stage: GameStage::Menu,
            rooms: RoomClues::new(),
            round_clues: RoundClues::new(),
            person_rooms: BTreeMap::new(),
            current_room: None,
            transition: SceneTransition::new(),
            dialogue: None,
            accused: Rc::new(Cell::new(None)),
            rng,
            config,
            collaborators,
        })
    }

    /// Seed knowledge, scatter clues and head for the opening room.
    pub fn start(&mut self) -> Result<(), SessionError> {
        let starting = self.starting_clue.sentence();
        for person in &mut self.people {
            person.knowledge.add_knowledge(starting);
        }

        let clues = std::mem::take(&mut self.unscattered);
        self.rooms.scatter(clues, &self.config.clue_rooms, &mut self.rng);
        info!(clues = self.rooms.total(), "mystery started");

        let opening = self.config.opening_room.clone();
        for id in self.ids() {
            self.move_person(id, &opening)?;
        }
        Ok(())
    }

    /// Poll the scene loader. Call once per frame.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        if let Some(room) = self.transition.poll(self.collaborators.loader.as_mut()) {
            self.on_room_loaded(room)?;
        }
        Ok(())
    }

    /// Put someone in a room. For the player this starts a scene change,
    /// which is refused (returning `false`) while another one is in flight.
    pub fn move_person(&mut self, id: PersonId, room: &str) -> Result<bool, SessionError> {
        if self.person(id).is_none() {
            return Err(SessionError::UnknownPerson(id));
        }
        if id != self.player {
            self.person_rooms.insert(id, room.to_string());
            return Ok(true);
        }

        let accepted = self.transition.request(
            room,
            self.current_room.as_deref(),
            self.collaborators.loader.as_mut(),
        );
        if accepted {
            self.person_rooms.insert(id, room.to_string());
        } else {
            warn!(room, pending = ?self.transition.pending_room(), "room change rejected");
        }
        Ok(accepted)
    }

    /// End the current search early. Ignored outside search stages.
    pub fn advance_search(&mut self) -> Result<bool, SessionError> {
        if !self.stage.is_search() {
            debug!(stage = %self.stage, "not searching, ignoring advance");
            return Ok(false);
        }
        self.advance_stage()?;
        Ok(true)
    }

    /// Skip straight to the police. Ignored once they are here.
    pub fn call_police(&mut self) -> Result<bool, SessionError> {
        if self.stage >= GameStage::Police {
            return Ok(false);
        }
        self.dialogue = None;
        self.start_stage(GameStage::Police)?;
        Ok(true)
    }

    /// Answer the message on screen.
    pub fn choose(&mut self, index: usize) -> Result<(), SessionError> {
        self.drive_dialogue(|block, ctx| block.choose(index, ctx))
    }

    /// Answer a sentence prompt.
    pub fn submit_sentence(&mut self, sentence: Sentence) -> Result<(), SessionError> {
        self.drive_dialogue(|block, ctx| block.submit_sentence(sentence, ctx))
    }

    /// The player picks up a clue lying in the current room.
    pub fn pick_up_clue(&mut self, clue: ClueId) -> Result<ClueItem, SessionError> {
        let room = self
            .current_room
            .as_deref()
            .ok_or(SessionError::ClueNotHere(clue))?;
        let item = self
            .rooms
            .take(room, clue)
            .ok_or(SessionError::ClueNotHere(clue))?;

        let player = self.player;
        if let Some(person) = self.people.iter_mut().find(|p| p.id() == player) {
            person.knowledge.add_found(item.sentence());
        }
        info!(clue = %item.id, sentence = %item.sentence(), "player picked up clue");
        Ok(item)
    }

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    pub fn player(&self) -> PersonId {
        self.player
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn person_room(&self, id: PersonId) -> Option<&str> {
        self.person_rooms.get(&id).map(String::as_str)
    }

    /// Whether `id` should be drawn in the visible room. Never the player.
    pub fn is_person_in_current_room(&self, id: PersonId) -> bool {
        id != self.player
            && self.current_room.is_some()
            && self.person_room(id) == self.current_room()
    }

    pub fn clues_in_room(&self, room: &str) -> &[ClueItem] {
        self.rooms.in_room(room)
    }

    pub fn round_clue(&self, id: PersonId) -> Option<&ClueInfo> {
        self.round_clues.get(id)
    }

    pub fn person(&self, id: PersonId) -> Option<&PersonState> {
        self.people.iter().find(|p| p.id() == id)
    }

    pub fn dialogue_state(&self) -> Option<DialogState> {
        self.dialogue.as_ref().map(DialogBlock::state)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_busy()
    }

    fn ids(&self) -> Vec<PersonId> {
        self.people.iter().map(PersonState::id).collect()
    }

    fn advance_stage(&mut self) -> Result<(), SessionError> {
        match self.stage.next() {
            Some(next) => self.start_stage(next),
            None => Ok(()),
        }
    }

    fn start_stage(&mut self, stage: GameStage) -> Result<(), SessionError> {
        info!(%stage, "starting stage");
        self.stage = stage;

        if stage.is_search() {
            self.begin_search()?;
        } else if stage.is_communal() {
            let opening = self.config.opening_room.clone();
            for id in self.ids() {
                self.move_person(id, &opening)?;
            }
        } else if stage == GameStage::Police {
            let police_room = self.config.police_room.clone();
            self.move_person(self.player, &police_room)?;
        } else if stage == GameStage::Reveal {
            let culprit_hair = self.person(self.culprit).and_then(PersonState::hair);
            let block = script::reveal(&self.cast(), culprit_hair, self.accused.get());
            self.begin_dialogue(block)?;
        }
        Ok(())
    }

    /// Send each non-player to a different clue room to pick up one clue.
    fn begin_search(&mut self) -> Result<(), SessionError> {
        self.round_clues.clear();

        let searchers: Vec<PersonId> = self
            .ids()
            .into_iter()
            .filter(|&id| id != self.player)
            .collect();
        let picks = index::sample(&mut self.rng, self.config.clue_rooms.len(), searchers.len());

        for (id, room_index) in searchers.into_iter().zip(picks.into_iter()) {
            let room = self.config.clue_rooms[room_index].clone();
            self.move_person(id, &room)?;

            let Some(item) = self.rooms.take_random(&room, &mut self.rng) else {
                debug!(person = %id, room = %room, "found nothing");
                continue;
            };
            debug!(person = %id, room = %room, sentence = %item.sentence(), "found clue");
            if let Some(person) = self.people.iter_mut().find(|p| p.id() == id) {
                person.knowledge.add_found(item.sentence());
            }
            self.round_clues.record(id, item.info);
        }

        // Reload so the departed searchers disappear from view.
        if let Some(room) = self.current_room.clone() {
            self.move_person(self.player, &room)?;
        }
        Ok(())
    }

    fn on_room_loaded(&mut self, room: String) -> Result<(), SessionError> {
        info!(room = %room, stage = %self.stage, "room loaded");
        let loader = self.collaborators.loader.as_mut();
        loader.set_active(&room);
        for (i, clue) in self.rooms.in_room(&room).iter().enumerate() {
            loader.spawn_clue(clue, self.config.clue_position(i));
        }
        self.current_room = Some(room);

        let block = match self.stage {
            GameStage::Menu => {
                self.stage = GameStage::Intro;
                script::intro(&self.cast(), &self.starting_clue)
            }
            GameStage::Communal1 => script::exchange(&self.cast()),
            GameStage::Communal2 => script::exchange_request(&self.cast()),
            GameStage::Communal3 => script::final_exchange(&self.cast()),
            GameStage::Police => script::police(&self.cast(), Rc::clone(&self.accused)),
            _ => return Ok(()),
        };
        self.begin_dialogue(block)
    }

    fn cast(&self) -> Cast<'_> {
        Cast::new(&self.people, self.player)
    }

    fn begin_dialogue(&mut self, block: DialogBlock) -> Result<(), SessionError> {
        self.dialogue = Some(block);
        self.drive_dialogue(|block, ctx| block.advance(ctx))
    }

    fn drive_dialogue<F>(&mut self, drive: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut DialogBlock, &mut DialogContext<'_>) -> Result<DialogStep, DialogError>,
    {
        let block = self.dialogue.as_mut().ok_or(SessionError::NoDialogue)?;
        let mut ctx = DialogContext {
            people: &mut self.people,
            round_clues: &self.round_clues,
            journal: self.collaborators.journal.as_mut(),
        };
        let step = drive(block, &mut ctx)?;
        self.present(step)
    }

    fn present(&mut self, step: DialogStep) -> Result<(), SessionError> {
        let Collaborators {
            presenter,
            audio,
            assets,
            ..
        } = &mut self.collaborators;

        match step {
            DialogStep::Message(prompt) => {
                if !prompt.cue.is_none() {
                    audio.play(prompt.cue);
                }
                let images = assets.resolve_all(&prompt.images);
                presenter.show_message(prompt.speaker, &images, &prompt.text, &prompt.choices);
                Ok(())
            }
            DialogStep::AskSentence(prompt) => {
                let images = assets.resolve_all(&prompt.images);
                presenter.ask_for_sentence(
                    &images,
                    prompt.subjects.as_deref(),
                    prompt.objects.as_deref(),
                );
                Ok(())
            }
            DialogStep::Finished => {
                debug!(stage = %self.stage, "dialogue finished");
                self.dialogue = None;
                self.advance_stage()
            }
            DialogStep::Idle => {
                self.dialogue = None;
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("stage", &self.stage)
            .field("player", &self.player)
            .field("current_room", &self.current_room)
            .field("person_rooms", &self.person_rooms)
            .field("dialogue", &self.dialogue)
            .finish_non_exhaustive()
    }
}
