use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::identity::CharacterProfile;
use crate::components::world::CharacterId;
use crate::content::{JobTier, JobTierId};
use crate::core::error::CareerError;
use crate::core::rng::RandomSource;
use crate::rules::hiring::{decide_hiring, roll_cv_review, ApplicationOutcome, HiringDecision};
use crate::rules::interview::{InterviewSession, InterviewVerdict, RoundResult};
use crate::rules::resume::{declared_skill_average, suspicion_level, DeclaredSkills};
use crate::rules::scoring::{AnswerStrategy, ScoringContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt-{}", self.0)
    }
}

/// One pass through CV review, interview and hiring. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationAttempt {
    pub id: AttemptId,
    pub character: CharacterId,
    pub job_id: JobTierId,
    pub declared_skills: DeclaredSkills,
    pub suspicion_level: u8,
    pub cv_reviewed: bool,
    pub interview: InterviewSession,
    pub verdict: Option<InterviewVerdict>,
    pub decision: Option<HiringDecision>,
    scoring: ScoringContext,
    closed: bool,
}

impl ApplicationAttempt {
    /// Score the résumé and roll the CV review. An unreviewed CV closes the attempt at once.
    pub fn submit(
        id: AttemptId,
        character: CharacterId,
        profile: &CharacterProfile,
        tier: &JobTier,
        declared_skills: DeclaredSkills,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let suspicion = suspicion_level(&declared_skills, profile);
        let scoring = ScoringContext {
            charisma: profile.charisma,
            declared_skill_average: declared_skill_average(&declared_skills, profile),
            suspicion_level: suspicion,
            target_job_average_skill: tier.average_required_skill(),
        };
        let cv_reviewed = roll_cv_review(suspicion, rng);
        Self {
            id,
            character,
            job_id: tier.id.clone(),
            declared_skills,
            suspicion_level: suspicion,
            cv_reviewed,
            interview: InterviewSession::new(),
            verdict: None,
            decision: None,
            scoring,
            closed: !cv_reviewed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn interview_score(&self) -> u32 {
        self.interview.score()
    }

    pub fn scoring_context(&self) -> &ScoringContext {
        &self.scoring
    }

    /// Terminal outcome once the attempt is closed.
    pub fn outcome(&self) -> Option<ApplicationOutcome> {
        if !self.cv_reviewed {
            return Some(ApplicationOutcome::RejectedNoReview);
        }
        self.decision.as_ref().map(|d| d.outcome)
    }

    pub fn answer(
        &mut self,
        strategy: AnswerStrategy,
        rng: &mut dyn RandomSource,
    ) -> Result<RoundResult, CareerError> {
        if self.closed {
            return Err(CareerError::AttemptClosed(self.id));
        }
        self.interview.answer(strategy, &self.scoring, rng)
    }

    /// Grade the interview and decide. Closes the attempt on success.
    pub fn finalize(
        &mut self,
        applied: &JobTier,
        rng: &mut dyn RandomSource,
    ) -> Result<(InterviewVerdict, HiringDecision), CareerError> {
        if self.closed {
            return Err(CareerError::AttemptClosed(self.id));
        }
        let verdict = self.interview.finalize(rng)?;
        let decision = decide_hiring(&verdict, self.suspicion_level, applied, rng);
        self.verdict = Some(verdict);
        self.decision = Some(decision.clone());
        self.closed = true;
        Ok((verdict, decision))
    }
}

/// In-flight and recently closed application attempts.
#[derive(Resource, Debug, Default)]
pub struct ApplicationBook {
    next_id: u64,
    attempts: BTreeMap<AttemptId, ApplicationAttempt>,
}

impl ApplicationBook {
    pub fn allocate_id(&mut self) -> AttemptId {
        self.next_id += 1;
        AttemptId(self.next_id)
    }

    pub fn open_attempt_for(&self, character: CharacterId) -> Option<AttemptId> {
        self.attempts
            .values()
            .find(|a| a.character == character && !a.is_closed())
            .map(|a| a.id)
    }

    /// Store a new attempt, dropping the character's closed ones.
    pub fn insert(&mut self, attempt: ApplicationAttempt) {
        let character = attempt.character;
        self.attempts
            .retain(|_, a| a.character != character || !a.is_closed());
        self.attempts.insert(attempt.id, attempt);
    }

    pub fn get(&self, id: AttemptId) -> Option<&ApplicationAttempt> {
        self.attempts.get(&id)
    }

    pub fn get_mut(&mut self, id: AttemptId) -> Option<&mut ApplicationAttempt> {
        self.attempts.get_mut(&id)
    }

    pub fn clear(&mut self) {
        self.attempts.clear();
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
