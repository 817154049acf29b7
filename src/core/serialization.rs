use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::world::CharacterId;
use crate::core::world::{character_records, spawn_character};
use crate::simulation::application::ApplicationBook;
use crate::simulation::time::GameTime;
use crate::world::repository::CharacterRecord;

/// Save state capturing the clock, seed and every character. Open applications are not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default = "default_save_version")]
    pub version: u32,
    pub seed: u64,
    pub time: GameTime,
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
}

fn default_save_version() -> u32 {
    1
}

/// Extract a serializable snapshot of the world.
pub fn extract_state_from_world(world: &mut World, seed: u64) -> SaveState {
    SaveState {
        version: default_save_version(),
        seed,
        time: world.resource::<GameTime>().clone(),
        characters: character_records(world),
    }
}

/// Replace the world's characters and clock with a saved snapshot.
pub fn apply_state_to_world(state: SaveState, world: &mut World) {
    if let Some(mut time) = world.get_resource_mut::<GameTime>() {
        *time = state.time.clone();
    } else {
        world.insert_resource(state.time.clone());
    }
    if let Some(mut book) = world.get_resource_mut::<ApplicationBook>() {
        book.clear();
    }

    let to_remove: Vec<Entity> = world
        .query_filtered::<Entity, With<CharacterId>>()
        .iter(world)
        .collect();
    for entity in to_remove {
        world.despawn(entity);
    }

    for record in state.characters {
        spawn_character(world, record);
    }
}

pub fn save_state_to_json(state: &SaveState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

pub fn load_state_from_json(data: &str) -> serde_json::Result<SaveState> {
    serde_json::from_str(data)
}

/// Write a save state to a file path.
pub fn save_state_to_path<P: AsRef<Path>>(state: &SaveState, path: P) -> std::io::Result<()> {
    let json = save_state_to_json(state).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Read a save state from a file path.
pub fn load_state_from_path<P: AsRef<Path>>(path: P) -> std::io::Result<SaveState> {
    let data = fs::read_to_string(&path)?;
    load_state_from_json(&data).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::employment::{CharacterEmploymentState, Position};
    use crate::components::identity::CharacterProfile;
    use crate::content::JobTierId;
    use crate::core::world::IdAllocator;
    use crate::simulation::lifecycle::LifecycleState;

    fn world_with_character() -> World {
        let mut world = World::new();
        world.insert_resource(GameTime::default());
        world.insert_resource(IdAllocator::default());
        spawn_character(
            &mut world,
            CharacterRecord {
                id: CharacterId(2),
                name: "Rook".to_string(),
                profile: CharacterProfile::default().with_skill("stealth", 12),
                employment: CharacterEmploymentState::employed(Position::new(
                    JobTierId::new("street_runner"),
                    66,
                    None,
                    false,
                )),
                lifecycle: LifecycleState::Employed,
                version: 0,
            },
        );
        world
    }

    #[test]
    fn json_round_trip_restores_characters() {
        let mut world = world_with_character();
        world.resource_mut::<GameTime>().advance_day();
        let state = extract_state_from_world(&mut world, 42);
        let json = save_state_to_json(&state).unwrap();

        let mut fresh = World::new();
        fresh.insert_resource(GameTime::default());
        apply_state_to_world(load_state_from_json(&json).unwrap(), &mut fresh);
        assert_eq!(extract_state_from_world(&mut fresh, 42), state);
    }

    #[test]
    fn applying_a_state_replaces_existing_characters() {
        let mut world = world_with_character();
        let empty = SaveState {
            version: 1,
            seed: 0,
            time: GameTime::default(),
            characters: Vec::new(),
        };
        apply_state_to_world(empty, &mut world);
        assert!(extract_state_from_world(&mut world, 0).characters.is_empty());
    }
}
