use serde::{Deserialize, Serialize};

use crate::components::employment::CharacterEmploymentState;
use crate::components::identity::CharacterProfile;
use crate::components::world::CharacterId;
use crate::simulation::lifecycle::LifecycleState;
use crate::simulation::time::GameTime;

/// A character as the character store sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub profile: CharacterProfile,
    #[serde(default)]
    pub employment: CharacterEmploymentState,
    #[serde(default)]
    pub lifecycle: LifecycleState,
    /// Version last read from the store; zero for a character never saved.
    #[serde(default)]
    pub version: u64,
}

pub trait CharacterRepository {
    fn load_characters(&self) -> Result<Vec<CharacterRecord>, Box<dyn std::error::Error>>;
    fn load_character(
        &self,
        id: CharacterId,
    ) -> Result<Option<CharacterRecord>, Box<dyn std::error::Error>>;
    /// Write `record` if the stored version still equals `record.version`. Returns the new version.
    fn save_character(
        &mut self,
        record: &CharacterRecord,
    ) -> Result<u64, Box<dyn std::error::Error>>;
    fn load_time(&self) -> Result<Option<GameTime>, Box<dyn std::error::Error>>;
    fn save_time(&mut self, time: &GameTime) -> Result<(), Box<dyn std::error::Error>>;
}
