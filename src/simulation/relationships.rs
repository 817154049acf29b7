use bevy_utils::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::components::employment::CharacterEmploymentState;
use crate::components::identity::CharacterProfile;
use crate::core::error::CareerError;
use crate::core::rng::RandomSource;
use crate::data::CareerTuning;
use crate::rules::scoring::{MAX_SUCCESS_CHANCE, MIN_SUCCESS_CHANCE};

pub const APPROVAL_GAIN: i32 = 5;
pub const APPROVAL_LOSS: i32 = 3;
pub const PERFORMANCE_GAIN: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialReport {
    pub chance: u8,
    pub success: bool,
    pub approval_delta: i32,
    pub performance_delta: i32,
    pub energy_spent: u32,
}

pub fn socialize_chance(charisma: u32) -> u8 {
    (40 + charisma / 2).clamp(MIN_SUCCESS_CHANCE as u32, MAX_SUCCESS_CHANCE as u32) as u8
}

/// Spend time with coworkers. One roll decides whether it helped.
pub fn socialize(
    profile: &mut CharacterProfile,
    employment: &mut CharacterEmploymentState,
    tuning: &CareerTuning,
    rng: &mut dyn RandomSource,
) -> Result<SocialReport, CareerError> {
    let Some(position) = employment.position.as_mut() else {
        return Err(CareerError::NotEmployed);
    };
    if profile.energy < tuning.socialize_energy_cost {
        return Err(CareerError::InsufficientEnergy {
            required: tuning.socialize_energy_cost,
            available: profile.energy,
        });
    }

    let chance = socialize_chance(profile.charisma);
    let success = rng.check(chance as f64);
    profile.energy -= tuning.socialize_energy_cost;
    let (approval_delta, performance_delta) = if success {
        (
            position.adjust_approval(APPROVAL_GAIN),
            position.adjust_performance(PERFORMANCE_GAIN),
        )
    } else {
        (position.adjust_approval(-APPROVAL_LOSS), 0)
    };
    debug!(chance, success, approval = position.approval, "socialized");

    Ok(SocialReport {
        chance,
        success,
        approval_delta,
        performance_delta,
        energy_spent: tuning.socialize_energy_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::employment::Position;
    use crate::content::JobTierId;
    use crate::core::rng::ScriptedRolls;

    fn employed() -> CharacterEmploymentState {
        CharacterEmploymentState::employed(Position::new(JobTierId::new("med_nurse"), 70, None, false))
    }

    #[test]
    fn chance_tracks_charisma_within_clamps() {
        assert_eq!(socialize_chance(0), 40);
        assert_eq!(socialize_chance(40), 60);
        assert_eq!(socialize_chance(200), 90);
    }

    #[test]
    fn success_raises_approval_and_performance() {
        let mut profile = CharacterProfile::default();
        let mut employment = employed();
        let mut rng = ScriptedRolls::always(0.0);
        let report =
            socialize(&mut profile, &mut employment, &CareerTuning::default(), &mut rng).unwrap();
        assert!(report.success);
        assert_eq!(report.approval_delta, 5);
        assert_eq!(report.performance_delta, 1);
        let position = employment.position.unwrap();
        assert_eq!(position.approval, 55);
        assert_eq!(position.performance_rating, 71);
        assert_eq!(profile.energy, 90);
    }

    #[test]
    fn failure_costs_approval() {
        let mut profile = CharacterProfile::default();
        let mut employment = employed();
        let mut rng = ScriptedRolls::always(99.0);
        let report =
            socialize(&mut profile, &mut employment, &CareerTuning::default(), &mut rng).unwrap();
        assert!(!report.success);
        assert_eq!(employment.position.unwrap().approval, 47);
    }

    #[test]
    fn refused_without_job_or_energy() {
        let mut rng = ScriptedRolls::always(0.0);
        let mut profile = CharacterProfile::default();
        assert_eq!(
            socialize(
                &mut profile,
                &mut CharacterEmploymentState::unemployed(),
                &CareerTuning::default(),
                &mut rng
            ),
            Err(CareerError::NotEmployed)
        );
        profile.energy = 3;
        assert!(matches!(
            socialize(&mut profile, &mut employed(), &CareerTuning::default(), &mut rng),
            Err(CareerError::InsufficientEnergy { .. })
        ));
        assert_eq!(rng.consumed(), 0);
    }
}
