//! # Deduction Core
//!
//! The reasoning half of the murder-mystery game. This crate consumes the
//! vocabulary and clues from `mystery_rules`, tracks what every character
//! believes, plays the conversations in which they share what they know, and
//! drives the game from stage to stage.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Per-character beliefs, single-hop deduction and confidence scoring
//! - **person**: A character's profile plus their knowledge, and how they phrase things
//! - **dialogue**: Resumable conversation queue that grows as listeners react
//! - **session**: Stage and room orchestration over asynchronous scene loads
//! - **ports**: Interfaces to the scene loader, presentation, audio and journal
//!
//! ## Design Philosophy
//!
//! - **Headless**: Nothing blocks on the presentation layer; every step is returned as a value
//! - **Deterministic**: Beliefs iterate in a fixed order and randomness comes from a seeded RNG
//! - **Explicit dependencies**: Collaborators are passed in, never looked up globally

pub mod assets;
pub mod dialogue;
pub mod error;
pub mod journal;
pub mod knowledge_base;
pub mod person;
pub mod ports;
pub mod session;

#[cfg(test)]
mod testing;

pub use assets::*;
pub use dialogue::*;
pub use error::*;
pub use journal::*;
pub use knowledge_base::*;
pub use person::*;
pub use ports::*;
pub use session::*;
