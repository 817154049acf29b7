use bevy_utils::tracing::info;
use serde::{Deserialize, Serialize};

use crate::components::employment::{CharacterEmploymentState, Lifecycle, Position};
use crate::components::identity::CharacterProfile;
use crate::content::JobTier;
use crate::core::error::{CareerError, Requirement};
use crate::rules::hiring::HiringDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    #[default]
    Unemployed,
    Applied,
    Interviewing,
    Rejected,
    ProbationHired,
    ClearHired,
    Employed,
    Promoted,
    Resigned,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleEvent {
    Apply,
    BeginInterview,
    Reject,
    HireOnProbation,
    HireClean,
    Promote,
    Resign,
    Terminate,
    /// Move a transient state to where it leads.
    Settle,
}

impl LifecycleState {
    pub fn transition(self, event: LifecycleEvent) -> Result<LifecycleState, CareerError> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        let next = match (self, event) {
            (S::Unemployed, E::Apply) => S::Applied,
            (S::Applied, E::BeginInterview) => S::Interviewing,
            (S::Applied | S::Interviewing, E::Reject) => S::Rejected,
            (S::Interviewing, E::HireOnProbation) => S::ProbationHired,
            (S::Interviewing, E::HireClean) => S::ClearHired,
            (S::Employed, E::Promote) => S::Promoted,
            (S::Employed, E::Resign) => S::Resigned,
            (S::Employed, E::Terminate) => S::Terminated,
            (S::Rejected | S::Resigned | S::Terminated, E::Settle) => S::Unemployed,
            (S::ProbationHired | S::ClearHired | S::Promoted, E::Settle) => S::Employed,
            (from, event) => return Err(CareerError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// States that only exist for the duration of one operation.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            LifecycleState::Rejected
                | LifecycleState::ProbationHired
                | LifecycleState::ClearHired
                | LifecycleState::Promoted
                | LifecycleState::Resigned
                | LifecycleState::Terminated
        )
    }
}

impl Lifecycle {
    /// Apply `event`, then settle through any transient state it lands in.
    /// Returns the transient state passed through, if any.
    pub fn advance(&mut self, event: LifecycleEvent) -> Result<Option<LifecycleState>, CareerError> {
        let next = self.0.transition(event)?;
        if next.is_transient() {
            self.0 = next.transition(LifecycleEvent::Settle)?;
            Ok(Some(next))
        } else {
            self.0 = next;
            Ok(None)
        }
    }
}

/// State implied by the employment record alone, used when restoring characters.
/// Mid-application states are not restored since attempts are never saved.
pub fn resting_state(employment: &CharacterEmploymentState) -> LifecycleState {
    if employment.is_employed() {
        LifecycleState::Employed
    } else {
        LifecycleState::Unemployed
    }
}

/// All-or-nothing check against the tier's level and skill gates.
pub fn check_eligibility(profile: &CharacterProfile, tier: &JobTier) -> Result<(), CareerError> {
    let mut missing = Vec::new();
    if profile.level < tier.required_level {
        missing.push(Requirement::Level {
            required: tier.required_level,
            actual: profile.level,
        });
    }
    missing.extend(skill_shortfalls(profile, tier));
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CareerError::NotQualified { missing })
    }
}

pub fn skill_shortfalls(profile: &CharacterProfile, tier: &JobTier) -> Vec<Requirement> {
    tier.required_skills
        .iter()
        .filter_map(|(name, required)| {
            let actual = profile.skill(name);
            (actual < *required).then(|| Requirement::Skill {
                name: name.clone(),
                required: *required,
                actual,
            })
        })
        .collect()
}

/// Install the position a hiring decision grants. Caller has already moved the lifecycle.
/// A decision that names no tier cannot hire anyone.
pub fn hire(
    employment: &mut CharacterEmploymentState,
    decision: &HiringDecision,
    starting_performance: u8,
) -> Result<(), CareerError> {
    if employment.is_employed() {
        return Err(CareerError::AlreadyEmployed);
    }
    let Some(job_id) = decision.offered_tier.clone() else {
        let event = if decision.probation.is_some() {
            LifecycleEvent::HireOnProbation
        } else {
            LifecycleEvent::HireClean
        };
        return Err(CareerError::InvalidTransition {
            from: LifecycleState::Interviewing,
            event,
        });
    };
    info!(
        job = %job_id,
        probation_days = decision.probation.map(|t| t.days),
        lied = decision.lied_on_resume,
        "hired"
    );
    *employment = CharacterEmploymentState::employed(Position::new(
        job_id,
        starting_performance,
        decision.probation,
        decision.lied_on_resume,
    ));
    Ok(())
}

/// Quit the current job. Returns false when there was nothing to quit.
pub fn resign(
    employment: &mut CharacterEmploymentState,
    lifecycle: &mut Lifecycle,
) -> Result<bool, CareerError> {
    if !employment.is_employed() {
        return Ok(false);
    }
    lifecycle.advance(LifecycleEvent::Resign)?;
    employment.reset();
    Ok(true)
}

/// Involuntary end of employment.
pub fn terminate(
    employment: &mut CharacterEmploymentState,
    lifecycle: &mut Lifecycle,
) -> Result<(), CareerError> {
    if employment.is_employed() {
        if lifecycle.0 == LifecycleState::Employed {
            lifecycle.advance(LifecycleEvent::Terminate)?;
        } else {
            lifecycle.0 = LifecycleState::Unemployed;
        }
    }
    employment.reset();
    Ok(())
}
