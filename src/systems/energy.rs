use bevy_ecs::prelude::*;

use crate::components::identity::CharacterProfile;
use crate::data::CareerTuning;

/// System: overnight energy recovery, capped at each character's maximum.
pub fn energy_recovery_system(tuning: Res<CareerTuning>, mut query: Query<&mut CharacterProfile>) {
    for mut profile in query.iter_mut() {
        if profile.energy < profile.max_energy {
            profile.recover_energy(tuning.daily_energy_recovery);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_respects_maximum() {
        let mut world = World::new();
        world.insert_resource(CareerTuning::default());
        let tired = world
            .spawn(CharacterProfile {
                energy: 10,
                ..Default::default()
            })
            .id();
        let nearly_full = world
            .spawn(CharacterProfile {
                energy: 90,
                ..Default::default()
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(energy_recovery_system);
        schedule.run(&mut world);

        assert_eq!(world.get::<CharacterProfile>(tired).unwrap().energy, 35);
        assert_eq!(world.get::<CharacterProfile>(nearly_full).unwrap().energy, 100);
    }
}
