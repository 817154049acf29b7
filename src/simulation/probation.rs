use bevy_utils::tracing::{info, warn};
use serde::{Deserialize, Serialize};

use crate::components::employment::CharacterEmploymentState;
use crate::content::JobTierId;

/// What one probation day did to a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbationStatus {
    NotOnProbation,
    Continuing {
        days_remaining: u32,
        /// Performance is under the floor; nothing happens until the last day.
        warning: bool,
    },
    Graduated,
    Terminated {
        job_id: JobTierId,
    },
}

/// Count one probation day down and resolve it if that was the last.
///
/// A probation already sitting at zero days resolves without decrementing, so the
/// tracker never leaves a position on probation at zero.
pub fn tick_probation(employment: &mut CharacterEmploymentState) -> ProbationStatus {
    let Some(position) = employment.position.as_mut() else {
        return ProbationStatus::NotOnProbation;
    };
    let Some(probation) = position.probation.as_mut() else {
        return ProbationStatus::NotOnProbation;
    };
    probation.days_remaining = probation.days_remaining.saturating_sub(1);
    if probation.days_remaining > 0 {
        let warning = position.performance_rating < probation.performance_required;
        if warning {
            warn!(
                job = %position.job_id,
                performance = position.performance_rating,
                required = probation.performance_required,
                days_remaining = probation.days_remaining,
                "probation performance below floor"
            );
        }
        return ProbationStatus::Continuing {
            days_remaining: probation.days_remaining,
            warning,
        };
    }
    resolve_probation(employment)
}

/// Final check at zero days. Meeting the floor exactly counts as passing.
pub fn resolve_probation(employment: &mut CharacterEmploymentState) -> ProbationStatus {
    let Some(position) = employment.position.as_mut() else {
        return ProbationStatus::NotOnProbation;
    };
    let Some(probation) = position.probation else {
        return ProbationStatus::NotOnProbation;
    };
    if position.performance_rating >= probation.performance_required {
        position.probation = None;
        info!(job = %position.job_id, performance = position.performance_rating, "probation passed");
        ProbationStatus::Graduated
    } else {
        let job_id = position.job_id.clone();
        info!(
            job = %job_id,
            performance = position.performance_rating,
            required = probation.performance_required,
            "probation failed"
        );
        employment.reset();
        ProbationStatus::Terminated { job_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::employment::{Position, ProbationTerms};

    fn on_probation(days: u32, performance: u8, required: u8) -> CharacterEmploymentState {
        CharacterEmploymentState::employed(Position::new(
            JobTierId::new("med_nurse"),
            performance,
            Some(ProbationTerms {
                days,
                performance_required: required,
            }),
            true,
        ))
    }

    #[test]
    fn below_floor_warns_without_terminating() {
        let mut state = on_probation(3, 60, 75);
        assert_eq!(
            tick_probation(&mut state),
            ProbationStatus::Continuing {
                days_remaining: 2,
                warning: true
            }
        );
        assert!(state.is_employed());
    }

    #[test]
    fn last_day_graduates_at_exact_floor() {
        let mut state = on_probation(1, 75, 75);
        assert_eq!(tick_probation(&mut state), ProbationStatus::Graduated);
        assert!(state.is_employed());
        assert!(!state.on_probation());
    }

    #[test]
    fn zero_days_one_point_short_terminates() {
        let mut state = on_probation(0, 79, 80);
        assert_eq!(
            tick_probation(&mut state),
            ProbationStatus::Terminated {
                job_id: JobTierId::new("med_nurse")
            }
        );
        assert_eq!(state, CharacterEmploymentState::unemployed());
    }

    #[test]
    fn never_left_on_probation_at_zero() {
        let mut state = on_probation(15, 70, 70);
        for _ in 0..20 {
            tick_probation(&mut state);
            assert!(!state.probation_unresolved());
        }
        assert!(!state.on_probation());
    }

    #[test]
    fn full_employment_is_untouched() {
        let mut state = CharacterEmploymentState::employed(Position::new(
            JobTierId::new("med_nurse"),
            10,
            None,
            false,
        ));
        let before = state.clone();
        assert_eq!(tick_probation(&mut state), ProbationStatus::NotOnProbation);
        assert_eq!(state, before);
    }
}
