use std::fmt;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};

use crate::components::employment::{CharacterEmploymentState, Lifecycle};
use crate::components::world::CharacterId;
use crate::content::JobTierId;
use crate::simulation::lifecycle::{LifecycleEvent, LifecycleState};
use crate::simulation::probation::{tick_probation, ProbationStatus};
use crate::simulation::time::GameTime;

/// Something that happened to a career during a day tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CareerEvent {
    ProbationWarning {
        character: CharacterId,
        day: u32,
        days_remaining: u32,
        performance: u8,
        required: u8,
    },
    ProbationPassed {
        character: CharacterId,
        day: u32,
        job_id: JobTierId,
    },
    ProbationFailed {
        character: CharacterId,
        day: u32,
        job_id: JobTierId,
    },
}

impl CareerEvent {
    pub fn character(&self) -> CharacterId {
        match self {
            CareerEvent::ProbationWarning { character, .. }
            | CareerEvent::ProbationPassed { character, .. }
            | CareerEvent::ProbationFailed { character, .. } => *character,
        }
    }
}

impl fmt::Display for CareerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareerEvent::ProbationWarning {
                character,
                day,
                days_remaining,
                performance,
                required,
            } => write!(
                f,
                "Day {}: {} is under the probation floor ({} < {}), {} days left",
                day, character, performance, required, days_remaining
            ),
            CareerEvent::ProbationPassed {
                character,
                day,
                job_id,
            } => write!(f, "Day {}: {} passed probation as {}", day, character, job_id),
            CareerEvent::ProbationFailed {
                character,
                day,
                job_id,
            } => write!(
                f,
                "Day {}: {} failed probation and was let go from {}",
                day, character, job_id
            ),
        }
    }
}

/// Events produced by the current day's systems.
#[derive(Resource, Default, Debug)]
pub struct CareerEventLog(pub Vec<CareerEvent>);

/// System: counts probation down for every probationary character.
pub fn probation_day_system(
    time: Res<GameTime>,
    mut log: ResMut<CareerEventLog>,
    mut query: Query<(&CharacterId, &mut CharacterEmploymentState, &mut Lifecycle)>,
) {
    for (id, mut employment, mut lifecycle) in query.iter_mut() {
        if !employment.on_probation() {
            continue;
        }
        let performance = employment.performance_rating();
        let required = employment.probation_performance_required();
        match tick_probation(&mut employment) {
            ProbationStatus::NotOnProbation => {}
            ProbationStatus::Continuing {
                days_remaining,
                warning,
            } => {
                if warning {
                    log.0.push(CareerEvent::ProbationWarning {
                        character: *id,
                        day: time.day,
                        days_remaining,
                        performance,
                        required,
                    });
                }
            }
            ProbationStatus::Graduated => {
                if let Some(job_id) = employment.current_job_id().cloned() {
                    log.0.push(CareerEvent::ProbationPassed {
                        character: *id,
                        day: time.day,
                        job_id,
                    });
                }
            }
            ProbationStatus::Terminated { job_id } => {
                if let Err(err) = lifecycle.advance(LifecycleEvent::Terminate) {
                    warn!(character = %id, %err, "lifecycle out of step with employment");
                    lifecycle.0 = LifecycleState::Unemployed;
                }
                log.0.push(CareerEvent::ProbationFailed {
                    character: *id,
                    day: time.day,
                    job_id,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::employment::{Position, ProbationTerms};

    fn world_with(days: u32, performance: u8, required: u8) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(GameTime::default());
        world.insert_resource(CareerEventLog::default());
        let entity = world
            .spawn((
                CharacterId(1),
                CharacterEmploymentState::employed(Position::new(
                    JobTierId::new("street_runner"),
                    performance,
                    Some(ProbationTerms {
                        days,
                        performance_required: required,
                    }),
                    true,
                )),
                Lifecycle(LifecycleState::Employed),
            ))
            .id();
        (world, entity)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(probation_day_system);
        schedule.run(world);
    }

    #[test]
    fn failed_probation_terminates_and_logs() {
        let (mut world, entity) = world_with(1, 60, 70);
        run(&mut world);
        assert!(!world.get::<CharacterEmploymentState>(entity).unwrap().is_employed());
        assert_eq!(
            world.get::<Lifecycle>(entity).unwrap().0,
            LifecycleState::Unemployed
        );
        let log = world.resource::<CareerEventLog>();
        assert!(matches!(log.0[0], CareerEvent::ProbationFailed { .. }));
    }

    #[test]
    fn warning_is_logged_but_job_kept() {
        let (mut world, entity) = world_with(5, 60, 70);
        run(&mut world);
        assert_eq!(
            world
                .get::<CharacterEmploymentState>(entity)
                .unwrap()
                .probation_days_remaining(),
            4
        );
        let log = world.resource::<CareerEventLog>();
        assert_eq!(log.0.len(), 1);
        assert!(log.0[0].to_string().contains("4 days left"));
    }

    #[test]
    fn passing_probation_keeps_employment() {
        let (mut world, entity) = world_with(1, 70, 70);
        run(&mut world);
        let employment = world.get::<CharacterEmploymentState>(entity).unwrap();
        assert!(employment.is_employed());
        assert!(!employment.on_probation());
        assert!(matches!(
            world.resource::<CareerEventLog>().0[0],
            CareerEvent::ProbationPassed { .. }
        ));
    }
}
