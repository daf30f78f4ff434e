//! Dialogue scheduling.
//!
//! A [`DialogBlock`] is a queue of entries played one at a time. Playing an
//! entry can grow the queue: when a fact is shared, listeners' reactions are
//! pushed to the front so they are spoken before anything already scheduled.
//!
//! The block never blocks. Each call returns a [`DialogStep`] describing what to
//! present, and the block stays suspended until the owner resumes it with
//! [`DialogBlock::choose`] or [`DialogBlock::submit_sentence`].

mod entry;

pub use entry::*;

use mystery_rules::{AssetRef, Noun, PersonId, Sentence};
use std::collections::VecDeque;
use std::mem;

use crate::error::DialogError;
use crate::knowledge_base::AudioCue;
use crate::person::PersonState;
use crate::ports::Journal;
use crate::session::RoundClues;

/// Line spoken when the player declines to exchange information.
pub const BRUSH_OFF: &str = "Suit yourself.";

/// Line spoken by someone who found no clue this round.
pub const FOUND_NOTHING: &str = "I found nothing.";

const CONTINUE: &str = "Continue";
const YES: &str = "Yes";
const NO: &str = "No";

/// Everything a block reads or mutates while playing.
pub struct DialogContext<'a> {
    pub people: &'a mut [PersonState],
    pub round_clues: &'a RoundClues,
    pub journal: &'a mut dyn Journal,
}

impl DialogContext<'_> {
    fn person(&self, id: PersonId) -> Result<&PersonState, DialogError> {
        self.people
            .iter()
            .find(|p| p.id() == id)
            .ok_or(DialogError::UnknownPerson(id))
    }

    fn person_mut(&mut self, id: PersonId) -> Result<&mut PersonState, DialogError> {
        self.people
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(DialogError::UnknownPerson(id))
    }
}

/// What the block is waiting for.
enum Pending {
    Nothing,
    Acknowledge(Option<DialogCallback>),
    ExchangeDecision {
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
    },
    PlayerShare(PersonId),
    CustomSentence {
        subjects: Option<Vec<Noun>>,
        objects: Option<Vec<Noun>>,
        on_chosen: SentenceCallback,
    },
}

/// A conversation between a fixed set of participants.
pub struct DialogBlock {
    /// Everyone here hears every shared sentence.
    participants: Vec<PersonId>,
    /// Index of the participant whose reactions are never voiced.
    primary: usize,
    entries: VecDeque<DialogEntry>,
    pending: Pending,
    notify_finished: bool,
}

impl DialogBlock {
    /// Create a block; the first participant is primary.
    pub fn new(participants: Vec<PersonId>) -> Self {
        Self {
            participants,
            primary: 0,
            entries: VecDeque::new(),
            pending: Pending::Nothing,
            notify_finished: false,
        }
    }

    /// Emit [`DialogStep::Finished`] once the queue empties.
    pub fn with_completion(mut self) -> Self {
        self.notify_finished = true;
        self
    }

    pub fn with_primary(mut self, index: usize) -> Self {
        self.primary = index;
        self
    }

    pub fn participants(&self) -> &[PersonId] {
        &self.participants
    }

    pub fn state(&self) -> DialogState {
        match self.pending {
            Pending::Nothing => DialogState::Idle,
            Pending::Acknowledge(_) => DialogState::Playing,
            _ => DialogState::Suspended,
        }
    }

    /// Number of entries not yet played.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a message. `speaker: None` is the narrator.
    pub fn queue_dialogue(
        &mut self,
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        text: impl Into<String>,
    ) {
        self.entries
            .push_back(DialogEntry::message(speaker, images, text, AudioCue::None));
    }

    /// Append a message that runs `on_done` when acknowledged.
    pub fn queue_dialogue_then(
        &mut self,
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        text: impl Into<String>,
        on_done: impl FnOnce(&mut DialogBlock) + 'static,
    ) {
        self.entries.push_back(DialogEntry::Message {
            speaker,
            images,
            text: text.into(),
            cue: AudioCue::None,
            on_done: Some(Box::new(on_done)),
        });
    }

    /// Append one exchange turn per participant, in participant order.
    pub fn queue_information_exchange(&mut self, people: &[PersonState]) {
        let turns = self.exchange_turns(people);
        self.entries.extend(turns);
    }

    /// Append a yes/no offer to run an exchange.
    pub fn queue_exchange_request(
        &mut self,
        speaker: Option<PersonId>,
        images: Vec<AssetRef>,
        question: impl Into<String>,
    ) {
        self.entries.push_back(DialogEntry::ExchangeRequest {
            speaker,
            images,
            question: question.into(),
        });
    }

    /// Append a prompt for a free-form sentence, restricted to the given words.
    pub fn queue_custom_sentence(
        &mut self,
        images: Vec<AssetRef>,
        subjects: Option<Vec<Noun>>,
        objects: Option<Vec<Noun>>,
        on_chosen: impl FnOnce(&mut DialogBlock, Sentence) + 'static,
    ) {
        self.entries.push_back(DialogEntry::CustomSentence {
            images,
            subjects,
            objects,
            on_chosen: Box::new(on_chosen),
        });
    }

    /// Put an entry ahead of everything queued.
    pub fn queue_front(&mut self, entry: DialogEntry) {
        self.entries.push_front(entry);
    }

    /// Alias for [`advance`](Self::advance) on a fresh block.
    pub fn start(&mut self, ctx: &mut DialogContext<'_>) -> Result<DialogStep, DialogError> {
        self.advance(ctx)
    }

    /// Play the next entry.
    pub fn advance(&mut self, ctx: &mut DialogContext<'_>) -> Result<DialogStep, DialogError> {
        if !matches!(self.pending, Pending::Nothing) {
            return Err(DialogError::Suspended);
        }

        let Some(entry) = self.entries.pop_front() else {
            if mem::take(&mut self.notify_finished) {
                return Ok(DialogStep::Finished);
            }
            return Ok(DialogStep::Idle);
        };

        match entry {
            DialogEntry::Message {
                speaker,
                images,
                text,
                cue,
                on_done,
            } => {
                self.pending = Pending::Acknowledge(on_done);
                Ok(DialogStep::Message(MessagePrompt {
                    speaker,
                    images,
                    text,
                    choices: vec![CONTINUE.to_string()],
                    cue,
                }))
            }
            DialogEntry::ExchangeRequest {
                speaker,
                images,
                question,
            } => {
                self.pending = Pending::ExchangeDecision {
                    speaker,
                    images: images.clone(),
                };
                Ok(DialogStep::Message(MessagePrompt {
                    speaker,
                    images,
                    text: question,
                    choices: vec![YES.to_string(), NO.to_string()],
                    cue: AudioCue::None,
                }))
            }
            DialogEntry::Exchange {
                participant,
                images,
            } => self.play_exchange(participant, images, ctx),
            DialogEntry::CustomSentence {
                images,
                subjects,
                objects,
                on_chosen,
            } => {
                self.pending = Pending::CustomSentence {
                    subjects: subjects.clone(),
                    objects: objects.clone(),
                    on_chosen,
                };
                Ok(DialogStep::AskSentence(SentencePrompt {
                    images,
                    subjects,
                    objects,
                }))
            }
        }
    }

    /// Answer the shown message with the choice at `index`.
    pub fn choose(
        &mut self,
        index: usize,
        ctx: &mut DialogContext<'_>,
    ) -> Result<DialogStep, DialogError> {
        match mem::replace(&mut self.pending, Pending::Nothing) {
            Pending::Acknowledge(on_done) => {
                if index != 0 {
                    self.pending = Pending::Acknowledge(on_done);
                    return Err(DialogError::ChoiceOutOfRange {
                        index,
                        available: 1,
                    });
                }
                if let Some(callback) = on_done {
                    callback(self);
                }
            }
            Pending::ExchangeDecision { speaker, images } => match index {
                0 => {
                    let turns = self.exchange_turns(ctx.people);
                    for turn in turns.into_iter().rev() {
                        self.entries.push_front(turn);
                    }
                }
                1 => {
                    self.entries.push_front(DialogEntry::message(
                        speaker,
                        images,
                        BRUSH_OFF,
                        AudioCue::None,
                    ));
                }
                _ => {
                    self.pending = Pending::ExchangeDecision { speaker, images };
                    return Err(DialogError::ChoiceOutOfRange {
                        index,
                        available: 2,
                    });
                }
            },
            other => {
                self.pending = other;
                return Err(DialogError::NotAwaitingChoice);
            }
        }
        self.advance(ctx)
    }

    /// Answer a sentence prompt.
    pub fn submit_sentence(
        &mut self,
        sentence: Sentence,
        ctx: &mut DialogContext<'_>,
    ) -> Result<DialogStep, DialogError> {
        match mem::replace(&mut self.pending, Pending::Nothing) {
            Pending::PlayerShare(player) => {
                if sentence.subject == sentence.object {
                    self.pending = Pending::PlayerShare(player);
                    return Err(DialogError::ReflexiveSentence(sentence.subject));
                }
                self.share(player, sentence, ctx)?;
            }
            Pending::CustomSentence {
                subjects,
                objects,
                on_chosen,
            } => {
                let checked = check_vocabulary(&sentence, subjects.as_deref(), objects.as_deref());
                if let Err(err) = checked {
                    self.pending = Pending::CustomSentence {
                        subjects,
                        objects,
                        on_chosen,
                    };
                    return Err(err);
                }
                on_chosen(self, sentence);
            }
            other => {
                self.pending = other;
                return Err(DialogError::NotAwaitingSentence);
            }
        }
        self.advance(ctx)
    }

    fn play_exchange(
        &mut self,
        participant: PersonId,
        images: Vec<AssetRef>,
        ctx: &mut DialogContext<'_>,
    ) -> Result<DialogStep, DialogError> {
        let person = ctx.person(participant)?;
        if person.is_player() {
            self.pending = Pending::PlayerShare(participant);
            return Ok(DialogStep::AskSentence(SentencePrompt {
                images,
                subjects: None,
                objects: None,
            }));
        }

        // Round clues only ever hold a single clue found this round, never a deduction.
        let found = ctx
            .round_clues
            .get(participant)
            .map(|info| info.sentence())
            .map(|sentence| (sentence, person.speak(&sentence)));

        let text = match found {
            Some((sentence, spoken)) => {
                self.share(participant, sentence, ctx)?;
                ctx.journal.record_heard(participant, sentence);
                format!("I found out {}.", spoken)
            }
            None => FOUND_NOTHING.to_string(),
        };

        self.pending = Pending::Acknowledge(None);
        Ok(DialogStep::Message(MessagePrompt {
            speaker: Some(participant),
            images,
            text,
            choices: vec![CONTINUE.to_string()],
            cue: AudioCue::None,
        }))
    }

    /// Tell every other participant; voice the reactions of all but the primary.
    fn share(
        &mut self,
        speaker: PersonId,
        sentence: Sentence,
        ctx: &mut DialogContext<'_>,
    ) -> Result<(), DialogError> {
        let mut reactions = Vec::new();
        for (index, &listener_id) in self.participants.iter().enumerate() {
            if listener_id == speaker {
                continue;
            }
            let listener = ctx.person_mut(listener_id)?;
            let lines = listener.listen(speaker, sentence);
            if index == self.primary {
                continue;
            }
            let head = listener.head_sprite().clone();
            reactions.extend(lines.into_iter().map(|line| {
                DialogEntry::message(Some(listener_id), vec![head.clone()], line.text, line.cue)
            }));
        }

        for entry in reactions.into_iter().rev() {
            self.entries.push_front(entry);
        }
        Ok(())
    }

    fn exchange_turns(&self, people: &[PersonState]) -> Vec<DialogEntry> {
        let head = |id: PersonId| {
            people
                .iter()
                .find(|p| p.id() == id)
                .map(|p| p.head_sprite().clone())
        };

        self.participants
            .iter()
            .map(|&participant| {
                let is_player = people
                    .iter()
                    .any(|p| p.id() == participant && p.is_player());
                // The player looks at everyone else while speaking.
                let images = if is_player {
                    self.participants
                        .iter()
                        .filter(|&&other| other != participant)
                        .filter_map(|&other| head(other))
                        .collect()
                } else {
                    head(participant).into_iter().collect()
                };
                DialogEntry::Exchange {
                    participant,
                    images,
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for DialogBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogBlock")
            .field("participants", &self.participants)
            .field("primary", &self.primary)
            .field("entries", &self.entries)
            .field("state", &self.state())
            .finish()
    }
}

fn check_vocabulary(
    sentence: &Sentence,
    subjects: Option<&[Noun]>,
    objects: Option<&[Noun]>,
) -> Result<(), DialogError> {
    if sentence.subject == sentence.object {
        return Err(DialogError::ReflexiveSentence(sentence.subject));
    }
    if let Some(allowed) = subjects {
        if !allowed.contains(&sentence.subject) {
            return Err(DialogError::OutsideVocabulary(sentence.subject));
        }
    }
    if let Some(allowed) = objects {
        if !allowed.contains(&sentence.object) {
            return Err(DialogError::OutsideVocabulary(sentence.object));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use crate::testing::{cast, KILLER_IS_NEPHEW};
    use mystery_rules::{ClueInfo, Verb};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        people: Vec<PersonState>,
        round_clues: RoundClues,
        journal: MemoryJournal,
    }

    impl Fixture {
        fn new() -> Self {
            let mut people = cast();
            for person in &mut people {
                person.knowledge.add_knowledge(KILLER_IS_NEPHEW);
            }
            Self {
                people,
                round_clues: RoundClues::new(),
                journal: MemoryJournal::new(),
            }
        }

        fn ctx(&mut self) -> DialogContext<'_> {
            DialogContext {
                people: &mut self.people,
                round_clues: &self.round_clues,
                journal: &mut self.journal,
            }
        }
    }

    fn everyone() -> Vec<PersonId> {
        vec![PersonId(0), PersonId(1), PersonId(2)]
    }

    /// Acknowledge every message until the block stops, collecting the text.
    fn play_out(block: &mut DialogBlock, ctx: &mut DialogContext<'_>) -> (Vec<String>, DialogStep) {
        let mut texts = Vec::new();
        let mut step = block.advance(ctx).unwrap();
        while let DialogStep::Message(prompt) = step {
            texts.push(prompt.text);
            step = block.choose(0, ctx).unwrap();
        }
        (texts, step)
    }

    #[test]
    fn test_messages_play_in_order_and_finish_once() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(everyone()).with_completion();
        block.queue_dialogue(Some(PersonId(2)), vec![], "What happened?");
        block.queue_dialogue(None, vec![], "Look! A body!");

        let (texts, last) = play_out(&mut block, &mut ctx);
        assert_eq!(texts, vec!["What happened?", "Look! A body!"]);
        assert_eq!(last, DialogStep::Finished);
        assert_eq!(block.advance(&mut ctx).unwrap(), DialogStep::Idle);
        assert_eq!(block.state(), DialogState::Idle);
    }

    #[test]
    fn test_inserted_entries_play_before_queued_ones() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(everyone());
        block.queue_dialogue_then(None, vec![], "A", |block| {
            block.queue_front(DialogEntry::message(None, vec![], "Y", AudioCue::None));
            block.queue_front(DialogEntry::message(None, vec![], "X", AudioCue::None));
        });
        block.queue_dialogue(None, vec![], "B");
        block.queue_dialogue(None, vec![], "C");

        let (texts, last) = play_out(&mut block, &mut ctx);
        assert_eq!(texts, vec!["A", "X", "Y", "B", "C"]);
        assert_eq!(last, DialogStep::Idle);
    }

    #[test]
    fn test_exchange_with_nothing_found() {
        let mut fixture = Fixture::new();
        let before: Vec<usize> = fixture.people.iter().map(|p| p.knowledge.len()).collect();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(vec![PersonId(0), PersonId(1)]);
        block.queue_front(DialogEntry::Exchange {
            participant: PersonId(1),
            images: vec![],
        });

        let (texts, _) = play_out(&mut block, &mut ctx);
        assert_eq!(texts, vec![FOUND_NOTHING]);

        let after: Vec<usize> = fixture.people.iter().map(|p| p.knowledge.len()).collect();
        assert_eq!(before, after);
        assert!(fixture.journal.entries().is_empty());
    }

    #[test]
    fn test_exchange_shares_round_clue_and_voices_reactions() {
        let mut fixture = Fixture::new();
        fixture
            .round_clues
            .record(PersonId(1), ClueInfo::new(Noun::Red, Noun::Nephew, Verb::Is));
        let mut ctx = fixture.ctx();

        let mut block = DialogBlock::new(everyone());
        block.queue_front(DialogEntry::Exchange {
            participant: PersonId(1),
            images: vec![],
        });
        block.queue_dialogue(None, vec![], "Later");

        let (texts, _) = play_out(&mut block, &mut ctx);
        // Person 2 has red hair, so they speak in the first person.
        assert_eq!(
            texts,
            vec![
                "I found out Red is Nephew.",
                "Really? I am Nephew?",
                "Then I am Killer!",
                "Later",
            ]
        );

        // The player (primary) deduced too, silently.
        let red_is_killer = Sentence::affirm(Noun::Red, Verb::Is, Noun::Killer);
        assert!(fixture.people[0].knowledge.knows(&red_is_killer));
        assert_eq!(fixture.journal.heard_from(PersonId(1)).len(), 1);
    }

    #[test]
    fn test_player_exchange_waits_for_sentence() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(everyone());
        block.queue_information_exchange(ctx.people);
        assert_eq!(block.len(), 3);

        let step = block.advance(&mut ctx).unwrap();
        let DialogStep::AskSentence(prompt) = step else {
            panic!("expected a sentence prompt, got {:?}", step);
        };
        assert_eq!(prompt.images.len(), 2);
        assert_eq!(block.state(), DialogState::Suspended);
        assert_eq!(block.advance(&mut ctx), Err(DialogError::Suspended));
        assert_eq!(block.choose(0, &mut ctx), Err(DialogError::NotAwaitingChoice));

        let reflexive = Sentence::affirm(Noun::Red, Verb::Is, Noun::Red);
        assert_eq!(
            block.submit_sentence(reflexive, &mut ctx),
            Err(DialogError::ReflexiveSentence(Noun::Red))
        );

        let claim = Sentence::affirm(Noun::Butler, Verb::Has, Noun::Knife);
        let step = block.submit_sentence(claim, &mut ctx).unwrap();
        let DialogStep::Message(prompt) = step else {
            panic!("expected a reaction, got {:?}", step);
        };
        assert_eq!(prompt.speaker, Some(PersonId(1)));
        assert_eq!(prompt.text, "Really? Butler has Knife?");
        assert!(ctx.people[2].knowledge.knows(&claim));
    }

    #[test]
    fn test_exchange_request_yes_runs_exchange_first() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(vec![PersonId(1), PersonId(2)]);
        block.queue_exchange_request(Some(PersonId(1)), vec![], "Compare notes?");
        block.queue_dialogue(None, vec![], "Afterwards");

        let step = block.advance(&mut ctx).unwrap();
        let DialogStep::Message(prompt) = step else {
            panic!("expected a question");
        };
        assert_eq!(prompt.choices, vec!["Yes", "No"]);
        assert_eq!(
            block.choose(2, &mut ctx),
            Err(DialogError::ChoiceOutOfRange {
                index: 2,
                available: 2
            })
        );

        let mut texts = Vec::new();
        let mut step = block.choose(0, &mut ctx).unwrap();
        while let DialogStep::Message(prompt) = step {
            texts.push(prompt.text);
            step = block.choose(0, &mut ctx).unwrap();
        }
        assert_eq!(texts, vec![FOUND_NOTHING, FOUND_NOTHING, "Afterwards"]);
    }

    #[test]
    fn test_exchange_request_no_brushes_off() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(everyone());
        block.queue_exchange_request(Some(PersonId(1)), vec![], "Compare notes?");
        block.queue_dialogue(None, vec![], "Afterwards");

        block.advance(&mut ctx).unwrap();
        let step = block.choose(1, &mut ctx).unwrap();
        let DialogStep::Message(prompt) = step else {
            panic!("expected the brush-off");
        };
        assert_eq!(prompt.text, BRUSH_OFF);
        assert_eq!(prompt.speaker, Some(PersonId(1)));
    }

    #[test]
    fn test_custom_sentence_goes_to_callback() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let chosen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&chosen);

        let mut block = DialogBlock::new(everyone());
        block.queue_custom_sentence(
            vec![],
            Some(vec![Noun::Blonde, Noun::Brown, Noun::Red]),
            Some(vec![Noun::Killer]),
            move |block, sentence| {
                *sink.borrow_mut() = Some(sentence);
                block.queue_front(DialogEntry::message(None, vec![], "Noted.", AudioCue::None));
            },
        );

        let step = block.advance(&mut ctx).unwrap();
        assert!(matches!(step, DialogStep::AskSentence(ref p) if p.objects == Some(vec![Noun::Killer])));

        let outside = Sentence::affirm(Noun::Butler, Verb::Is, Noun::Killer);
        assert_eq!(
            block.submit_sentence(outside, &mut ctx),
            Err(DialogError::OutsideVocabulary(Noun::Butler))
        );

        let accusation = Sentence::affirm(Noun::Brown, Verb::Is, Noun::Killer);
        let step = block.submit_sentence(accusation, &mut ctx).unwrap();
        assert!(matches!(step, DialogStep::Message(ref p) if p.text == "Noted."));
        assert_eq!(*chosen.borrow(), Some(accusation));
        // Custom sentences are not shared.
        assert!(!ctx.people[1].knowledge.knows(&accusation));
    }

    #[test]
    fn test_unknown_participant_is_an_error() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let mut block = DialogBlock::new(everyone());
        block.queue_front(DialogEntry::Exchange {
            participant: PersonId(9),
            images: vec![],
        });
        assert_eq!(
            block.advance(&mut ctx),
            Err(DialogError::UnknownPerson(PersonId(9)))
        );
    }
}
