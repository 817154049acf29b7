use bevy_utils::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::components::employment::CharacterEmploymentState;
use crate::components::identity::CharacterProfile;
use crate::content::JobTier;
use crate::core::error::CareerError;
use crate::data::CareerTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub payout: f64,
    pub experience_gained: u64,
    pub tenure_delta: f64,
    pub performance_delta: i32,
    pub energy_spent: u32,
    pub project_completed: bool,
}

/// Validate a shift without touching anything.
pub fn check_shift(
    profile: &CharacterProfile,
    employment: &CharacterEmploymentState,
    tier: &JobTier,
) -> Result<(), CareerError> {
    if !employment.is_employed() {
        return Err(CareerError::NotEmployed);
    }
    if employment.probation_unresolved() {
        return Err(CareerError::ProbationUnresolved);
    }
    if profile.energy < tier.energy_cost_per_work {
        return Err(CareerError::InsufficientEnergy {
            required: tier.energy_cost_per_work,
            available: profile.energy,
        });
    }
    Ok(())
}

/// One "go to work" action. Either the whole shift happens or nothing changes.
pub fn work_shift(
    profile: &mut CharacterProfile,
    employment: &mut CharacterEmploymentState,
    tier: &JobTier,
    tuning: &CareerTuning,
) -> Result<ShiftReport, CareerError> {
    check_shift(profile, employment, tier)?;
    let Some(position) = employment.position.as_mut() else {
        return Err(CareerError::NotEmployed);
    };

    let exhausted = profile.energy < tuning.critical_energy;
    let working_days = tuning.working_days_per_year.max(1) as f64;
    let payout = tier.annual_salary / working_days;
    let tenure_delta = 1.0 / working_days;

    profile.energy -= tier.energy_cost_per_work;
    profile.money += payout;
    profile.experience += tier.experience_per_work;

    position.tenure_years += tenure_delta;
    let drift = if exhausted {
        -tuning.performance_loss_when_exhausted
    } else {
        tuning.performance_gain_per_shift
    };
    let performance_delta = position.adjust_performance(drift);

    position.shifts_worked += 1;
    let project_completed = position.shifts_worked % tuning.shifts_per_project.max(1) == 0;
    if project_completed {
        position.projects_completed += 1;
    }

    debug!(
        job = %position.job_id,
        payout,
        exhausted,
        performance = position.performance_rating,
        tenure = position.tenure_years,
        "shift worked"
    );

    Ok(ShiftReport {
        payout,
        experience_gained: tier.experience_per_work,
        tenure_delta,
        performance_delta,
        energy_spent: tier.energy_cost_per_work,
        project_completed,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::components::employment::{Position, ProbationTerms};
    use crate::content::JobTierId;

    fn tier() -> JobTier {
        JobTier {
            id: JobTierId::new("corp_clerk"),
            title: "Clerk".to_string(),
            category: "corporate".to_string(),
            required_level: 2,
            required_skills: BTreeMap::new(),
            annual_salary: 25_000.0,
            energy_cost_per_work: 10,
            experience_per_work: 6,
            years_for_promotion: 1.0,
            min_performance: 65,
            next_tier_id: None,
        }
    }

    fn employed() -> CharacterEmploymentState {
        CharacterEmploymentState::employed(Position::new(tier().id, 70, None, false))
    }

    #[test]
    fn shift_pays_daily_rate_and_builds_tenure() {
        let mut profile = CharacterProfile::default();
        let mut employment = employed();
        let report = work_shift(&mut profile, &mut employment, &tier(), &CareerTuning::default())
            .unwrap();
        assert_eq!(report.payout, 100.0);
        assert_eq!(report.experience_gained, 6);
        assert_eq!(report.performance_delta, 1);
        assert_eq!(profile.energy, 90);
        assert_eq!(profile.money, 100.0);
        assert_eq!(profile.experience, 6);
        assert!((employment.tenure_years() - 0.004).abs() < 1e-12);
        assert_eq!(employment.performance_rating(), 71);
    }

    #[test]
    fn exhausted_shift_drags_performance() {
        let mut profile = CharacterProfile {
            energy: 15,
            ..Default::default()
        };
        let mut employment = employed();
        let report = work_shift(&mut profile, &mut employment, &tier(), &CareerTuning::default())
            .unwrap();
        assert_eq!(report.performance_delta, -1);
        assert_eq!(profile.energy, 5);
    }

    #[test]
    fn insufficient_energy_changes_nothing() {
        let mut profile = CharacterProfile {
            energy: 9,
            ..Default::default()
        };
        let mut employment = employed();
        let (profile_before, employment_before) = (profile.clone(), employment.clone());
        assert_eq!(
            work_shift(&mut profile, &mut employment, &tier(), &CareerTuning::default()),
            Err(CareerError::InsufficientEnergy {
                required: 10,
                available: 9
            })
        );
        assert_eq!(profile, profile_before);
        assert_eq!(employment, employment_before);
    }

    #[test]
    fn unemployed_and_unresolved_probation_are_refused() {
        let mut profile = CharacterProfile::default();
        let mut unemployed = CharacterEmploymentState::unemployed();
        assert_eq!(
            work_shift(&mut profile, &mut unemployed, &tier(), &CareerTuning::default()),
            Err(CareerError::NotEmployed)
        );

        let mut stuck = CharacterEmploymentState::employed(Position::new(
            tier().id,
            70,
            Some(ProbationTerms {
                days: 0,
                performance_required: 70,
            }),
            true,
        ));
        assert_eq!(
            work_shift(&mut profile, &mut stuck, &tier(), &CareerTuning::default()),
            Err(CareerError::ProbationUnresolved)
        );
    }

    #[test]
    fn every_fifth_shift_completes_a_project() {
        let mut profile = CharacterProfile {
            energy: 1_000,
            max_energy: 1_000,
            ..Default::default()
        };
        let mut employment = employed();
        let completed: Vec<bool> = (0..10)
            .map(|_| {
                work_shift(&mut profile, &mut employment, &tier(), &CareerTuning::default())
                    .unwrap()
                    .project_completed
            })
            .collect();
        assert_eq!(completed.iter().filter(|c| **c).count(), 2);
        assert!(completed[4] && completed[9]);
        assert_eq!(employment.position.unwrap().projects_completed, 2);
    }
}
