use serde::{Deserialize, Serialize};
use slimefinder_common::Seed;

/// What a save file tells us about its world. Optional fields are `None` when
/// the file does not carry them, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub seed: Seed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_z: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
}

impl LevelMetadata {
    pub fn new(seed: Seed) -> Self {
        LevelMetadata {
            seed,
            level_name: None,
            game_type: None,
            difficulty: None,
            spawn_x: None,
            spawn_y: None,
            spawn_z: None,
            version_name: None,
        }
    }

    /// Spawn column, when both horizontal coordinates are known.
    pub fn spawn(&self) -> Option<(i32, i32)> {
        Some((self.spawn_x?, self.spawn_z?))
    }
}
