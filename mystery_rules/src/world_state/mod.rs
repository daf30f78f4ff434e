//! Stages of a session and the rooms it plays out in.

mod config;

pub use config::*;

use serde::{Deserialize, Serialize};

/// The narrative stages, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum GameStage {
    #[default]
    Menu,
    Intro,
    Search1,
    Communal1,
    Search2,
    Communal2,
    Search3,
    Communal3,
    Police,
    Reveal,
}

impl GameStage {
    /// The following stage, or `None` once revealed.
    pub fn next(&self) -> Option<GameStage> {
        match self {
            GameStage::Menu => Some(GameStage::Intro),
            GameStage::Intro => Some(GameStage::Search1),
            GameStage::Search1 => Some(GameStage::Communal1),
            GameStage::Communal1 => Some(GameStage::Search2),
            GameStage::Search2 => Some(GameStage::Communal2),
            GameStage::Communal2 => Some(GameStage::Search3),
            GameStage::Search3 => Some(GameStage::Communal3),
            GameStage::Communal3 => Some(GameStage::Police),
            GameStage::Police => Some(GameStage::Reveal),
            GameStage::Reveal => None,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, GameStage::Search1 | GameStage::Search2 | GameStage::Search3)
    }

    pub fn is_communal(&self) -> bool {
        matches!(
            self,
            GameStage::Communal1 | GameStage::Communal2 | GameStage::Communal3
        )
    }

    /// Search/communal round number, 1 to 3.
    pub fn round(&self) -> Option<u8> {
        match self {
            GameStage::Search1 | GameStage::Communal1 => Some(1),
            GameStage::Search2 | GameStage::Communal2 => Some(2),
            GameStage::Search3 | GameStage::Communal3 => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
