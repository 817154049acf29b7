use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::world::IdAllocator;
use crate::data::CareerTuning;
use crate::simulation::application::ApplicationBook;
use crate::simulation::time::{advance_day_system, GameTime};
use crate::systems::{energy_recovery_system, probation_day_system, CareerEventLog};

/// Canonical ordering for one in-game day.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DaySet {
    DayStart,
    Career,
    Cleanup,
}

/// Build the ECS world with baseline resources.
pub fn create_world(tuning: CareerTuning) -> World {
    let mut world = World::new();
    world.insert_resource(GameTime::default());
    world.insert_resource(IdAllocator::default());
    world.insert_resource(ApplicationBook::default());
    world.insert_resource(CareerEventLog::default());
    world.insert_resource(tuning);
    world
}

/// Build the daily schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets((DaySet::DayStart, DaySet::Career, DaySet::Cleanup).chain());

    schedule.add_systems((
        advance_day_system.in_set(DaySet::DayStart),
        probation_day_system.in_set(DaySet::Career),
        energy_recovery_system.in_set(DaySet::Cleanup),
    ));

    schedule
}
