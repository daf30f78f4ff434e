//! Error type for rule and configuration violations.

use thiserror::Error;

use crate::grammar::{Noun, NounType};

/// Errors raised when mystery data breaks an invariant.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A sentence relating a noun to itself.
    #[error("sentence relates {0} to itself")]
    ReflexiveSentence(Noun),

    /// A clue generator was asked for nouns of types it does not relate.
    #[error("clue generator '{generator}' cannot relate {a:?} and {b:?}")]
    GeneratorMismatch {
        generator: &'static str,
        a: NounType,
        b: NounType,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RulesError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
