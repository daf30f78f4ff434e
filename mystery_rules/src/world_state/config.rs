//! Session configuration.

use serde::Deserialize;

use crate::error::RulesError;

/// Rooms and layout for a session. Loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MysteryConfig {
    /// The shared meeting room where the game opens and every communal stage happens.
    pub opening_room: String,

    /// Rooms clues are scattered over and searched in.
    pub clue_rooms: Vec<String>,

    /// Where the player is taken when the police arrive.
    pub police_room: String,

    /// X position of the first clue spawned in a room.
    pub clue_start_x: f32,

    /// Horizontal distance between spawned clues.
    pub clue_spacing: f32,

    /// Seed for room assignment, clue scattering and pickups.
    pub seed: u64,
}

impl Default for MysteryConfig {
    fn default() -> Self {
        Self {
            opening_room: "Lounge".to_string(),
            clue_rooms: vec![
                "Bedroom1".to_string(),
                "Bedroom2".to_string(),
                "Bedroom3".to_string(),
            ],
            police_room: "EndScene".to_string(),
            clue_start_x: -2.0,
            clue_spacing: 1.0,
            seed: 0,
        }
    }
}

impl MysteryConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, RulesError> {
        let config: MysteryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.opening_room.is_empty() {
            return Err(RulesError::invalid_config("opening_room is empty"));
        }
        if self.police_room.is_empty() {
            return Err(RulesError::invalid_config("police_room is empty"));
        }
        if self.clue_rooms.is_empty() {
            return Err(RulesError::invalid_config("clue_rooms is empty"));
        }
        if self.clue_rooms.iter().any(|r| r.is_empty()) {
            return Err(RulesError::invalid_config("clue_rooms contains an empty name"));
        }
        Ok(())
    }

    /// Position of the `index`-th clue spawned in a room.
    pub fn clue_position(&self, index: usize) -> (f32, f32) {
        (self.clue_start_x + index as f32 * self.clue_spacing, 0.0)
    }
}
