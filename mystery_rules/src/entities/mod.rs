//! Character definitions for the cast of a mystery.

mod profile;

pub use profile::*;

use serde::{Deserialize, Serialize};

/// Identifier of a character within a session.
///
/// Ids are dense indexes assigned by the mystery generator, so tables keyed by
/// person can be small and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub usize);

impl PersonId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "person#{}", self.0)
    }
}

/// Name of a visual asset (sprite) resolved by the presentation side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The explicit "no image" reference.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Empty names and the literal `None` mean no image.
    pub fn is_none(&self) -> bool {
        self.0.is_empty() || self.0 == "None"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
