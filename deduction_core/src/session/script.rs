//! The scripted conversation for each stage.

use mystery_rules::{AssetRef, ClueInfo, Noun, NounType, PersonId, Sentence};
use std::cell::Cell;
use std::rc::Rc;

use super::accusation::accusation_line;
use crate::dialogue::{DialogBlock, DialogEntry};
use crate::knowledge_base::AudioCue;
use crate::person::PersonState;

const VICTIM: &str = "Victim";
const CRIME_SCENE: &str = "CrimeScene";

/// The player followed by everyone else, in cast order.
pub(crate) struct Cast<'a> {
    people: &'a [PersonState],
    player: PersonId,
}

impl<'a> Cast<'a> {
    pub fn new(people: &'a [PersonState], player: PersonId) -> Self {
        Self { people, player }
    }

    fn npcs(&self) -> impl Iterator<Item = &'a PersonState> + '_ {
        self.people.iter().filter(move |p| p.id() != self.player)
    }

    /// The `n`th non-player, falling back to the first one.
    fn npc(&self, n: usize) -> Option<PersonId> {
        self.npcs()
            .nth(n)
            .or_else(|| self.npcs().next())
            .map(PersonState::id)
    }

    fn head(&self, id: Option<PersonId>) -> Vec<AssetRef> {
        self.people
            .iter()
            .filter(|p| Some(p.id()) == id)
            .map(|p| p.head_sprite().clone())
            .collect()
    }

    fn npc_heads(&self) -> Vec<AssetRef> {
        self.npcs().map(|p| p.head_sprite().clone()).collect()
    }

    fn participants(&self) -> Vec<PersonId> {
        std::iter::once(self.player)
            .chain(self.npcs().map(PersonState::id))
            .collect()
    }

    fn block(&self) -> DialogBlock {
        DialogBlock::new(self.participants())
    }
}

/// Waking up next to the body.
pub(crate) fn intro(cast: &Cast<'_>, starting_clue: &ClueInfo) -> DialogBlock {
    let first = cast.npc(0);
    let second = cast.npc(1);
    let player = Some(cast.player);

    let mut block = cast.block().with_completion();
    block.queue_dialogue(second, cast.head(second), "What Happened?");
    block.queue_dialogue(first, cast.head(first), "Where am I?");
    block.queue_dialogue(player, cast.npc_heads(), "Who am I?");
    block.queue_dialogue(second, vec![AssetRef::new(VICTIM)], "Look! A body!");
    block.queue_dialogue(
        first,
        vec![AssetRef::new(CRIME_SCENE)],
        format!("And a name: {}", starting_clue.noun_b),
    );
    block.queue_dialogue(player, cast.npc_heads(), "Let's split up and look for clues.");
    block
}

/// Everyone reports back after a search.
pub(crate) fn exchange(cast: &Cast<'_>) -> DialogBlock {
    let first = cast.npc(0);
    let mut block = cast.block().with_completion();
    block.queue_dialogue(first, cast.npc_heads(), "What did everyone find?");
    block.queue_information_exchange(cast.people);
    block.queue_dialogue(
        Some(cast.player),
        cast.npc_heads(),
        "There must be more clues around.",
    );
    block
}

/// Like [`exchange`], but the player may decline to talk.
pub(crate) fn exchange_request(cast: &Cast<'_>) -> DialogBlock {
    let first = cast.npc(0);
    let mut block = cast.block().with_completion();
    block.queue_exchange_request(first, cast.head(first), "Should we compare notes again?");
    block.queue_dialogue(
        Some(cast.player),
        cast.npc_heads(),
        "There must be more clues around.",
    );
    block
}

/// Last exchange before the police arrive.
pub(crate) fn final_exchange(cast: &Cast<'_>) -> DialogBlock {
    let first = cast.npc(0);
    let second = cast.npc(1);
    let mut block = cast.block().with_completion();
    block.queue_dialogue(
        first,
        cast.npc_heads(),
        "The police are almost here. Lets do a final round of information exchange.",
    );
    block.queue_information_exchange(cast.people);
    block.queue_dialogue(second, cast.npc_heads(), "Well, the police are here now.");
    block
}

/// The police question everyone, the player last.
///
/// The player's answer is written to `accused` when it names a hair color as
/// the killer.
pub(crate) fn police(cast: &Cast<'_>, accused: Rc<Cell<Option<Noun>>>) -> DialogBlock {
    let mut block = cast.block().with_completion();
    block.queue_dialogue(None, Vec::new(), "What happened? Which one of you killed the guy?");

    for person in cast.npcs() {
        let line = accusation_line(person.hair(), |query| person.knowledge.verify_belief(query));
        block.queue_dialogue(Some(person.id()), vec![person.head_sprite().clone()], line);
    }

    block.queue_dialogue(None, Vec::new(), "And you? Who did it?");
    block.queue_custom_sentence(
        cast.npc_heads(),
        Some(Noun::of_type(NounType::HairColor)),
        Some(vec![Noun::Killer]),
        move |block, answer: Sentence| {
            let reply = if answer.is_affirmative() {
                accused.set(Some(answer.subject));
                format!("So you think {} did it.", answer.subject.name().to_uppercase())
            } else {
                format!("So {} didn't do it. Noted.", answer.subject.name().to_uppercase())
            };
            block.queue_front(DialogEntry::message(None, Vec::new(), reply, AudioCue::None));
        },
    );
    block
}

/// The truth comes out.
pub(crate) fn reveal(cast: &Cast<'_>, culprit_hair: Option<Noun>, accused: Option<Noun>) -> DialogBlock {
    let mut block = cast.block();
    let Some(hair) = culprit_hair else {
        block.queue_dialogue(None, Vec::new(), "The killer was never found.");
        return block;
    };

    let name = hair.name().to_uppercase();
    block.queue_dialogue(None, Vec::new(), format!("It was {} all along.", name));
    let verdict = match accused {
        Some(noun) if noun == hair => "You were right.".to_string(),
        Some(noun) => format!("You accused {}.", noun.name().to_uppercase()),
        None => "You never said who you suspected.".to_string(),
    };
    block.queue_dialogue(None, Vec::new(), verdict);
    block
}
