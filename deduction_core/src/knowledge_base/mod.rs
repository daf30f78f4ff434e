//! Knowledge Base module - what a single character believes.
//!
//! A store consists of:
//! - **Beliefs**: sentences the character holds, keyed symmetrically
//! - **Inference**: single-hop deduction when a new sentence is heard
//! - **Confidence**: a pluggable scoring of how well the beliefs support a query

mod belief;
mod inference;
mod reaction;
mod store;

pub use belief::*;
pub use inference::*;
pub use reaction::*;
pub use store::*;
