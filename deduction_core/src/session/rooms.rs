//! Where the clues are, and what each searcher found this round.

use mystery_rules::{ClueId, ClueInfo, ClueItem, PersonId};
use rand::Rng;
use std::collections::BTreeMap;

/// Clue pools keyed by room name. A clue lives in exactly one pool until taken.
#[derive(Debug, Clone, Default)]
pub struct RoomClues {
    rooms: BTreeMap<String, Vec<ClueItem>>,
}

impl RoomClues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop each clue into a uniformly random room.
    pub fn scatter<R: Rng>(&mut self, clues: Vec<ClueItem>, rooms: &[String], rng: &mut R) {
        if rooms.is_empty() {
            return;
        }
        for clue in clues {
            let room = &rooms[rng.gen_range(0..rooms.len())];
            self.place(room, clue);
        }
    }

    pub fn place(&mut self, room: &str, clue: ClueItem) {
        self.rooms.entry(room.to_string()).or_default().push(clue);
    }

    /// Clues still lying in `room`, in placement order.
    pub fn in_room(&self, room: &str) -> &[ClueItem] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove a random clue from `room`. `None` when the room is bare.
    pub fn take_random<R: Rng>(&mut self, room: &str, rng: &mut R) -> Option<ClueItem> {
        let pool = self.rooms.get_mut(room)?;
        if pool.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..pool.len());
        Some(pool.remove(index))
    }

    /// Remove a specific clue from `room`.
    pub fn take(&mut self, room: &str, id: ClueId) -> Option<ClueItem> {
        let pool = self.rooms.get_mut(room)?;
        let index = pool.iter().position(|c| c.id == id)?;
        Some(pool.remove(index))
    }

    pub fn total(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }
}

/// The single clue each character found during the current search.
///
/// Only ever holds clues picked up from a room, never deduced facts. Cleared
/// at the start of every search.
#[derive(Debug, Clone, Default)]
pub struct RoundClues {
    found: BTreeMap<PersonId, ClueInfo>,
}

impl RoundClues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, person: PersonId, clue: ClueInfo) {
        self.found.insert(person, clue);
    }

    pub fn get(&self, person: PersonId) -> Option<&ClueInfo> {
        self.found.get(&person)
    }

    pub fn clear(&mut self) {
        self.found.clear();
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}
