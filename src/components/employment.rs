use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::JobTierId;
use crate::simulation::lifecycle::LifecycleState;

/// Probation offered at hiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationTerms {
    pub days: u32,
    pub performance_required: u8,
}

/// Probation in progress. Only exists inside an active [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probation {
    pub days_remaining: u32,
    pub performance_required: u8,
}

/// A held job. Everything here is dropped on resignation or termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub job_id: JobTierId,
    pub tenure_years: f64,
    pub performance_rating: u8,
    #[serde(default)]
    pub probation: Option<Probation>,
    #[serde(default)]
    pub lied_on_resume: bool,
    #[serde(default)]
    pub shifts_worked: u32,
    #[serde(default)]
    pub projects_completed: u32,
    #[serde(default)]
    pub approval: u8,
}

impl Position {
    pub fn new(
        job_id: JobTierId,
        starting_performance: u8,
        terms: Option<ProbationTerms>,
        lied_on_resume: bool,
    ) -> Self {
        Self {
            job_id,
            tenure_years: 0.0,
            performance_rating: starting_performance.min(100),
            probation: terms.map(|terms| Probation {
                days_remaining: terms.days,
                performance_required: terms.performance_required,
            }),
            lied_on_resume,
            shifts_worked: 0,
            projects_completed: 0,
            approval: 50,
        }
    }

    /// Shift performance by `delta`, clamped to 0..=100. Returns the applied change.
    pub fn adjust_performance(&mut self, delta: i32) -> i32 {
        let before = self.performance_rating as i32;
        let after = (before + delta).clamp(0, 100);
        self.performance_rating = after as u8;
        after - before
    }

    /// Shift workplace approval by `delta`, clamped to 0..=100. Returns the applied change.
    pub fn adjust_approval(&mut self, delta: i32) -> i32 {
        let before = self.approval as i32;
        let after = (before + delta).clamp(0, 100);
        self.approval = after as u8;
        after - before
    }
}

/// Employment record attached to every character.
///
/// Unemployment is the absence of a [`Position`], so probation or tenure can
/// never be set on a character without a job.
#[derive(Component, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterEmploymentState {
    pub position: Option<Position>,
}

impl CharacterEmploymentState {
    pub fn unemployed() -> Self {
        Self::default()
    }

    pub fn employed(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn is_employed(&self) -> bool {
        self.position.is_some()
    }

    pub fn current_job_id(&self) -> Option<&JobTierId> {
        self.position.as_ref().map(|p| &p.job_id)
    }

    pub fn tenure_years(&self) -> f64 {
        self.position.as_ref().map_or(0.0, |p| p.tenure_years)
    }

    pub fn performance_rating(&self) -> u8 {
        self.position.as_ref().map_or(0, |p| p.performance_rating)
    }

    pub fn on_probation(&self) -> bool {
        self.probation().is_some()
    }

    pub fn probation(&self) -> Option<&Probation> {
        self.position.as_ref().and_then(|p| p.probation.as_ref())
    }

    pub fn probation_days_remaining(&self) -> u32 {
        self.probation().map_or(0, |p| p.days_remaining)
    }

    pub fn probation_performance_required(&self) -> u8 {
        self.probation().map_or(0, |p| p.performance_required)
    }

    pub fn lied_on_resume(&self) -> bool {
        self.position.as_ref().is_some_and(|p| p.lied_on_resume)
    }

    /// A probation that hit zero days without being resolved blocks further work.
    pub fn probation_unresolved(&self) -> bool {
        self.probation().is_some_and(|p| p.days_remaining == 0)
    }

    /// Back to unemployed defaults. Returns whether there was a job to lose.
    pub fn reset(&mut self) -> bool {
        self.position.take().is_some()
    }
}

/// Where the character currently sits in the employment state machine.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lifecycle(pub LifecycleState);
