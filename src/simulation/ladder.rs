use bevy_utils::tracing::info;

use crate::components::employment::Position;
use crate::components::identity::CharacterProfile;
use crate::content::{JobTier, JobTierId};
use crate::core::error::Requirement;
use crate::data::CareerTuning;
use crate::simulation::lifecycle::skill_shortfalls;

/// Tenure grows in float steps of one working day; sums a hair short of the target still count.
const TENURE_TOLERANCE: f64 = 1e-9;

/// Where a tier sits on its ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderPosition {
    /// 1-based.
    pub index: usize,
    pub length: usize,
    pub current: JobTier,
    pub next: Option<JobTier>,
}

impl LadderPosition {
    pub fn is_top(&self) -> bool {
        self.next.is_none()
    }
}

/// Find `job_id` in an ordered ladder.
pub fn locate(ladder: &[JobTier], job_id: &JobTierId) -> Option<LadderPosition> {
    let offset = ladder.iter().position(|tier| &tier.id == job_id)?;
    let current = ladder[offset].clone();
    let next = current
        .next_tier_id
        .as_ref()
        .and_then(|next_id| ladder.iter().find(|tier| &tier.id == next_id))
        .cloned();
    Some(LadderPosition {
        index: offset + 1,
        length: ladder.len(),
        current,
        next,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionCheck {
    pub eligible: bool,
    pub unmet: Vec<Requirement>,
    pub next: Option<JobTierId>,
}

/// Tenure and performance against the current tier, skills against the next one.
pub fn evaluate_promotion(
    position: &Position,
    profile: &CharacterProfile,
    ladder: &LadderPosition,
) -> PromotionCheck {
    let Some(next) = ladder.next.as_ref() else {
        return PromotionCheck {
            eligible: false,
            unmet: vec![Requirement::NextTier],
            next: None,
        };
    };

    let current = &ladder.current;
    let mut unmet = Vec::new();
    if let Some(probation) = position.probation {
        unmet.push(Requirement::Probation {
            days_remaining: probation.days_remaining,
        });
    }
    if position.tenure_years + TENURE_TOLERANCE < current.years_for_promotion {
        unmet.push(Requirement::Tenure {
            required: current.years_for_promotion,
            actual: position.tenure_years,
        });
    }
    if position.performance_rating < current.min_performance {
        unmet.push(Requirement::Performance {
            required: current.min_performance,
            actual: position.performance_rating,
        });
    }
    unmet.extend(skill_shortfalls(profile, next));

    PromotionCheck {
        eligible: unmet.is_empty(),
        unmet,
        next: Some(next.id.clone()),
    }
}

fn ratio_percent(actual: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return 100.0;
    }
    (actual / required * 100.0).clamp(0.0, 100.0)
}

/// Display progress toward the next tier: mean of four ratios each capped at 100.
pub fn progress_percentage(position: &Position, current: &JobTier, tuning: &CareerTuning) -> u8 {
    let ratios = [
        ratio_percent(position.tenure_years, current.years_for_promotion),
        ratio_percent(position.performance_rating as f64, current.min_performance as f64),
        ratio_percent(
            position.projects_completed as f64,
            tuning.projects_for_promotion as f64,
        ),
        ratio_percent(position.approval as f64, tuning.approval_for_promotion as f64),
    ];
    (ratios.iter().sum::<f64>() / ratios.len() as f64).round() as u8
}

/// Move the position up one rung. Performance and approval carry over.
pub fn apply_promotion(position: &mut Position, next: &JobTierId) {
    info!(from = %position.job_id, to = %next, "promoted");
    position.job_id = next.clone();
    position.tenure_years = 0.0;
    position.shifts_worked = 0;
    position.projects_completed = 0;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::components::employment::ProbationTerms;
    use crate::content::JobRepository;
    use crate::data::careers::default_career_catalog;

    fn corporate_ladder() -> Vec<JobTier> {
        default_career_catalog()
            .ladder(&JobTierId::new("corp_clerk"))
            .unwrap()
    }

    fn clerk_ready(clerk: &JobTier) -> Position {
        let mut position = Position::new(clerk.id.clone(), clerk.min_performance, None, false);
        position.tenure_years = clerk.years_for_promotion;
        position
    }

    fn qualified_profile(next: &JobTier) -> CharacterProfile {
        next.required_skills
            .iter()
            .fold(CharacterProfile::default(), |p, (name, min)| p.with_skill(name, *min))
    }

    #[test]
    fn locate_reports_one_based_index() {
        let ladder = corporate_ladder();
        let found = locate(&ladder, &JobTierId::new("corp_clerk")).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.length, ladder.len());
        assert_eq!(found.next.map(|t| t.id), Some(JobTierId::new("corp_analyst")));
        assert!(locate(&ladder, &JobTierId::new("street_runner")).is_none());
    }

    #[test]
    fn boundary_values_are_eligible() {
        let ladder = corporate_ladder();
        let at = locate(&ladder, &JobTierId::new("corp_clerk")).unwrap();
        let next = at.next.clone().unwrap();
        let check = evaluate_promotion(&clerk_ready(&at.current), &qualified_profile(&next), &at);
        assert!(check.eligible, "unmet: {:?}", check.unmet);
        assert_eq!(check.next, Some(next.id));
    }

    #[test]
    fn each_single_gap_blocks_promotion() {
        let ladder = corporate_ladder();
        let at = locate(&ladder, &JobTierId::new("corp_clerk")).unwrap();
        let next = at.next.clone().unwrap();
        let profile = qualified_profile(&next);

        let mut short_tenure = clerk_ready(&at.current);
        short_tenure.tenure_years -= 0.01;
        assert!(!evaluate_promotion(&short_tenure, &profile, &at).eligible);

        let mut low_performance = clerk_ready(&at.current);
        low_performance.performance_rating -= 1;
        assert!(!evaluate_promotion(&low_performance, &profile, &at).eligible);

        for (skill, min) in next.required_skills.iter() {
            let weak = profile.clone().with_skill(skill, min - 1);
            let check = evaluate_promotion(&clerk_ready(&at.current), &weak, &at);
            assert!(!check.eligible);
            assert_eq!(check.unmet.len(), 1);
        }
    }

    #[test]
    fn probation_blocks_an_otherwise_ready_promotion() {
        let ladder = corporate_ladder();
        let at = locate(&ladder, &JobTierId::new("corp_clerk")).unwrap();
        let profile = qualified_profile(at.next.as_ref().unwrap());
        let ready = clerk_ready(&at.current);

        let mut probationer = Position::new(
            ready.job_id.clone(),
            100,
            Some(ProbationTerms {
                days: 20,
                performance_required: 80,
            }),
            true,
        );
        probationer.tenure_years = ready.tenure_years;
        let check = evaluate_promotion(&probationer, &profile, &at);
        assert!(!check.eligible);
        assert_eq!(check.unmet, vec![Requirement::Probation { days_remaining: 20 }]);

        probationer.probation = None;
        assert!(evaluate_promotion(&probationer, &profile, &at).eligible);
    }

    #[test]
    fn top_tier_is_terminal_not_an_error() {
        let ladder = corporate_ladder();
        let top = ladder.last().unwrap();
        let at = locate(&ladder, &top.id).unwrap();
        assert!(at.is_top());
        let check = evaluate_promotion(&clerk_ready(top), &CharacterProfile::default(), &at);
        assert!(!check.eligible);
        assert_eq!(check.unmet, vec![Requirement::NextTier]);
    }

    #[test]
    fn no_single_metric_reaches_full_progress() {
        let tier = JobTier {
            id: JobTierId::new("t"),
            title: "T".to_string(),
            category: "c".to_string(),
            required_level: 1,
            required_skills: BTreeMap::new(),
            annual_salary: 1.0,
            energy_cost_per_work: 1,
            experience_per_work: 1,
            years_for_promotion: 1.0,
            min_performance: 50,
            next_tier_id: None,
        };
        let tuning = CareerTuning::default();
        let mut position = Position::new(tier.id.clone(), 0, None, false);
        position.approval = 0;
        position.tenure_years = 10.0;
        assert_eq!(progress_percentage(&position, &tier, &tuning), 25);

        position.performance_rating = 100;
        position.projects_completed = tuning.projects_for_promotion;
        position.approval = 100;
        assert_eq!(progress_percentage(&position, &tier, &tuning), 100);
    }

    #[test]
    fn promotion_resets_tenure_and_projects_only() {
        let mut position = Position::new(JobTierId::new("corp_clerk"), 88, None, false);
        position.tenure_years = 2.0;
        position.projects_completed = 3;
        position.shifts_worked = 17;
        position.approval = 64;
        apply_promotion(&mut position, &JobTierId::new("corp_analyst"));
        assert_eq!(position.job_id, JobTierId::new("corp_analyst"));
        assert_eq!(position.tenure_years, 0.0);
        assert_eq!(position.projects_completed, 0);
        assert_eq!(position.performance_rating, 88);
        assert_eq!(position.approval, 64);
    }
}
