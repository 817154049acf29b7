use bevy_utils::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::components::employment::ProbationTerms;
use crate::content::{JobTier, JobTierId};
use crate::core::rng::RandomSource;
use crate::rules::interview::InterviewVerdict;
use crate::rules::scoring::cv_review_chance;

/// Suspicion at or under this is hired without probation and without a lying flag.
pub const CLEAN_SUSPICION_MAX: u8 = 20;
/// Passing candidates above this suspicion may be offered a more senior tier.
pub const SENIOR_OFFER_SUSPICION: u8 = 60;
pub const SENIOR_OFFER_CHANCE: f64 = 15.0;
pub const SENIOR_OFFER_TERMS: ProbationTerms = ProbationTerms {
    days: 45,
    performance_required: 80,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationOutcome {
    RejectedNoReview,
    RejectedInterviewFailed,
    HiredClean,
    HiredOnProbation,
}

impl ApplicationOutcome {
    pub fn is_hired(self) -> bool {
        matches!(
            self,
            ApplicationOutcome::HiredClean | ApplicationOutcome::HiredOnProbation
        )
    }
}

/// Result of the hiring step once the interview is graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringDecision {
    pub outcome: ApplicationOutcome,
    pub probation: Option<ProbationTerms>,
    /// Tier actually offered; differs from the applied tier on a senior offer.
    pub offered_tier: Option<JobTierId>,
    pub senior_offer: bool,
    pub lied_on_resume: bool,
}

/// Probation bracket by résumé suspicion.
pub fn probation_terms_for(suspicion_level: u8) -> Option<ProbationTerms> {
    let (days, performance_required) = match suspicion_level {
        0..=20 => return None,
        21..=40 => (15, 70),
        41..=60 => (30, 75),
        _ => (45, 80),
    };
    Some(ProbationTerms {
        days,
        performance_required,
    })
}

/// One roll against [`cv_review_chance`].
pub fn roll_cv_review(suspicion_level: u8, rng: &mut dyn RandomSource) -> bool {
    let chance = cv_review_chance(suspicion_level);
    let roll = rng.roll();
    debug!(suspicion_level, chance, roll, "cv review roll");
    roll < chance as f64
}

/// Turn an interview verdict into a hiring decision for `applied`.
///
/// Consumes one roll only when the candidate passed with suspicion above
/// [`SENIOR_OFFER_SUSPICION`].
pub fn decide_hiring(
    verdict: &InterviewVerdict,
    suspicion_level: u8,
    applied: &JobTier,
    rng: &mut dyn RandomSource,
) -> HiringDecision {
    if !verdict.passed {
        return HiringDecision {
            outcome: ApplicationOutcome::RejectedInterviewFailed,
            probation: None,
            offered_tier: None,
            senior_offer: false,
            lied_on_resume: false,
        };
    }

    let mut probation = probation_terms_for(suspicion_level);
    let mut offered_tier = applied.id.clone();
    let mut senior_offer = false;

    if suspicion_level > SENIOR_OFFER_SUSPICION && rng.check(SENIOR_OFFER_CHANCE) {
        // Overrides the bracket rather than stacking on it.
        senior_offer = true;
        probation = Some(SENIOR_OFFER_TERMS);
        if let Some(next) = applied.next_tier_id.as_ref() {
            offered_tier = next.clone();
        }
    }

    let outcome = if probation.is_some() {
        ApplicationOutcome::HiredOnProbation
    } else {
        ApplicationOutcome::HiredClean
    };

    HiringDecision {
        outcome,
        probation,
        offered_tier: Some(offered_tier),
        senior_offer,
        lied_on_resume: suspicion_level > CLEAN_SUSPICION_MAX,
    }
}
