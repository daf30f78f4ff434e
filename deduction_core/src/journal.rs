//! In-memory journal of what characters have told the player.

use mystery_rules::{PersonId, Sentence};
use serde::{Deserialize, Serialize};

use crate::ports::Journal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub person: PersonId,
    pub sentence: Sentence,
}

/// A journal kept in memory, in the order things were said.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryJournal {
    entries: Vec<JournalEntry>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Everything `person` has said, oldest first.
    pub fn heard_from(&self, person: PersonId) -> Vec<Sentence> {
        self.entries
            .iter()
            .filter(|e| e.person == person)
            .map(|e| e.sentence)
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl Journal for MemoryJournal {
    fn record_heard(&mut self, person: PersonId, sentence: Sentence) {
        self.entries.push(JournalEntry { person, sentence });
    }
}
