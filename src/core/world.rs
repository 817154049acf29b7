use bevy_ecs::prelude::*;

use crate::components::employment::{CharacterEmploymentState, Lifecycle};
use crate::components::identity::{CharacterProfile, Name};
use crate::components::world::{CharacterId, StoredVersion};
use crate::simulation::lifecycle::resting_state;
use crate::world::repository::CharacterRecord;

#[derive(Resource, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn alloc(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn bump_to_at_least(&mut self, min_next: u32) {
        if self.next < min_next {
            self.next = min_next;
        }
    }
}

/// Spawn a character entity from a stored record.
///
/// The lifecycle is derived from the employment record so a character saved
/// mid-application comes back unemployed.
pub fn spawn_character(world: &mut World, record: CharacterRecord) -> Entity {
    if let Some(mut alloc) = world.get_resource_mut::<IdAllocator>() {
        alloc.bump_to_at_least(record.id.0 + 1);
    }
    let lifecycle = Lifecycle(resting_state(&record.employment));
    world
        .spawn((
            record.id,
            Name(record.name),
            record.profile,
            record.employment,
            lifecycle,
            StoredVersion(record.version),
        ))
        .id()
}

pub fn find_character(world: &mut World, id: CharacterId) -> Option<Entity> {
    let mut query = world.query::<(Entity, &CharacterId)>();
    query
        .iter(world)
        .find(|(_, character)| **character == id)
        .map(|(entity, _)| entity)
}

/// Read a character entity back into a record.
pub fn character_record(world: &World, entity: Entity) -> Option<CharacterRecord> {
    let id = *world.get::<CharacterId>(entity)?;
    Some(CharacterRecord {
        id,
        name: world
            .get::<Name>(entity)
            .map(|n| n.0.clone())
            .unwrap_or_else(|| format!("Character {}", id.0)),
        profile: world.get::<CharacterProfile>(entity)?.clone(),
        employment: world
            .get::<CharacterEmploymentState>(entity)
            .cloned()
            .unwrap_or_default(),
        lifecycle: world.get::<Lifecycle>(entity).map(|l| l.0).unwrap_or_default(),
        version: world.get::<StoredVersion>(entity).map_or(0, |v| v.0),
    })
}

/// Every character in the world, ordered by id.
pub fn character_records(world: &mut World) -> Vec<CharacterRecord> {
    let mut query = world.query_filtered::<Entity, With<CharacterId>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    let mut records: Vec<CharacterRecord> = entities
        .into_iter()
        .filter_map(|entity| character_record(world, entity))
        .collect();
    records.sort_by_key(|r| r.id);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::lifecycle::LifecycleState;

    #[test]
    fn spawned_records_read_back_and_bump_ids() {
        let mut world = World::new();
        world.insert_resource(IdAllocator::default());
        let record = CharacterRecord {
            id: CharacterId(9),
            name: "Dex".to_string(),
            profile: CharacterProfile::default(),
            employment: CharacterEmploymentState::unemployed(),
            lifecycle: LifecycleState::Unemployed,
            version: 3,
        };
        let entity = spawn_character(&mut world, record.clone());
        assert_eq!(find_character(&mut world, CharacterId(9)), Some(entity));
        assert_eq!(find_character(&mut world, CharacterId(1)), None);
        assert_eq!(character_record(&world, entity), Some(record));
        assert_eq!(world.resource_mut::<IdAllocator>().alloc(), 10);
    }
}
