//! # Mystery Rules
//!
//! The rules crate for the murder-mystery game: the vocabulary facts are made of,
//! the clues that carry them, character profiles, and the stages of a session.
//! This crate is pure data and contains no deduction or dialogue logic.

pub mod clues;
pub mod entities;
pub mod error;
pub mod grammar;
pub mod world_state;

pub use clues::*;
pub use entities::*;
pub use error::*;
pub use grammar::*;
pub use world_state::*;
