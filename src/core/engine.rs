use std::fmt;
use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::info;

use crate::components::employment::{CharacterEmploymentState, Lifecycle, ProbationTerms};
use crate::components::identity::CharacterProfile;
use crate::components::world::{CharacterId, StoredVersion};
use crate::content::{JobRepository, JobTier, JobTierId};
use crate::core::ecs::{create_schedule, create_world};
use crate::core::error::{CareerError, Requirement};
use crate::core::rng::{RandomSource, SeededRandom};
use crate::core::serialization::{
    apply_state_to_world, extract_state_from_world, load_state_from_path, save_state_to_path,
    SaveState,
};
use crate::core::world::{
    character_record, character_records, find_character, spawn_character, IdAllocator,
};
use crate::data::CareerTuning;
use crate::rules::hiring::ApplicationOutcome;
use crate::rules::interview::{InterviewGrade, RoundResult};
use crate::rules::resume::DeclaredSkills;
use crate::rules::scoring::AnswerStrategy;
use crate::simulation::application::{ApplicationAttempt, ApplicationBook, AttemptId};
use crate::simulation::ladder::{apply_promotion, evaluate_promotion, locate, progress_percentage};
use crate::simulation::lifecycle::{self, check_eligibility, LifecycleEvent, LifecycleState};
use crate::simulation::relationships::{self, SocialReport};
use crate::simulation::shift::{self, ShiftReport};
use crate::simulation::time::GameTime;
use crate::systems::{CareerEvent, CareerEventLog};
use crate::world::repository::{CharacterRecord, CharacterRepository};

/// What `finalize_hiring` decided.
#[derive(Debug, Clone, PartialEq)]
pub struct HiringResult {
    pub attempt_id: AttemptId,
    pub outcome: ApplicationOutcome,
    pub score: u32,
    pub grade: InterviewGrade,
    pub probation: Option<ProbationTerms>,
    /// Tier the character now holds, if hired.
    pub job_id: Option<JobTierId>,
    pub senior_offer: bool,
    pub lied_on_resume: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionResult {
    pub promoted: bool,
    pub new_tier_id: Option<JobTierId>,
    /// Empty when promoted.
    pub unmet: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbationSummary {
    pub days_remaining: u32,
    pub performance_required: u8,
    pub warning: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub job_id: JobTierId,
    pub title: String,
    pub category: String,
    pub tier_index: usize,
    pub ladder_length: usize,
    pub next_title: Option<String>,
    pub promotion_eligible: bool,
    pub unmet: Vec<Requirement>,
    pub progress_percent: u8,
    pub probation: Option<ProbationSummary>,
    pub tenure_years: f64,
    pub performance_rating: u8,
    pub approval: u8,
    pub projects_completed: u32,
    pub daily_pay: f64,
}

/// Read-only view of one character's career for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerSummary {
    pub character: CharacterId,
    pub name: String,
    pub lifecycle: LifecycleState,
    pub energy: (u32, u32),
    pub money: f64,
    pub experience: u64,
    pub job: Option<JobSummary>,
    pub open_application: Option<AttemptId>,
}

impl fmt::Display for CareerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} [{:?}] energy {}/{} money {:.2} xp {}",
            self.character, self.name, self.lifecycle, self.energy.0, self.energy.1, self.money,
            self.experience
        )?;
        let Some(job) = self.job.as_ref() else {
            if let Some(attempt) = self.open_application {
                writeln!(f, "  unemployed, application {} open", attempt)?;
            } else {
                writeln!(f, "  unemployed")?;
            }
            return Ok(());
        };
        writeln!(
            f,
            "  {} ({}) tier {}/{} pays {:.2}/shift",
            job.title, job.category, job.tier_index, job.ladder_length, job.daily_pay
        )?;
        writeln!(
            f,
            "  tenure {:.3}y performance {} approval {} projects {}",
            job.tenure_years, job.performance_rating, job.approval, job.projects_completed
        )?;
        if let Some(probation) = job.probation.as_ref() {
            writeln!(
                f,
                "  probation: {} days left, need {}{}",
                probation.days_remaining,
                probation.performance_required,
                if probation.warning { " (below floor)" } else { "" }
            )?;
        }
        match job.next_title.as_ref() {
            Some(next) if job.promotion_eligible => {
                writeln!(f, "  ready for promotion to {}", next)?;
            }
            Some(next) => {
                let unmet: Vec<String> = job.unmet.iter().map(|r| r.to_string()).collect();
                writeln!(
                    f,
                    "  {}% toward {}; needs {}",
                    job.progress_percent,
                    next,
                    unmet.join(", ")
                )?;
            }
            None => writeln!(f, "  top of the ladder")?,
        }
        Ok(())
    }
}

/// The career engine: an ECS world of characters plus the job catalog and a random source.
pub struct CareerEngine {
    world: World,
    schedule: Schedule,
    jobs: Box<dyn JobRepository>,
    rng: Box<dyn RandomSource>,
    seed: u64,
    /// Set once a caller swaps in its own source; loads then leave it alone.
    injected_rng: bool,
}

impl CareerEngine {
    pub fn new(jobs: impl JobRepository + 'static, tuning: CareerTuning, seed: u64) -> Self {
        Self {
            world: create_world(tuning),
            schedule: create_schedule(),
            jobs: Box::new(jobs),
            rng: Box::new(SeededRandom::new(seed)),
            seed,
            injected_rng: false,
        }
    }

    /// Replace the seeded source, e.g. with scripted rolls.
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self.injected_rng = true;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time(&self) -> &GameTime {
        self.world.resource::<GameTime>()
    }

    pub fn tuning(&self) -> &CareerTuning {
        self.world.resource::<CareerTuning>()
    }

    pub fn job_tiers(&self) -> Result<Vec<JobTier>, CareerError> {
        self.jobs.tiers().map_err(CareerError::repository)
    }

    pub fn job_tier(&self, id: &JobTierId) -> Result<JobTier, CareerError> {
        self.jobs
            .job_tier(id)
            .map_err(CareerError::repository)?
            .ok_or_else(|| CareerError::UnknownJobTier(id.clone()))
    }

    /// Spawn an unemployed character.
    pub fn create_character(&mut self, name: &str, profile: CharacterProfile) -> CharacterId {
        let id = CharacterId(self.world.resource_mut::<IdAllocator>().alloc());
        spawn_character(
            &mut self.world,
            CharacterRecord {
                id,
                name: name.to_string(),
                profile,
                employment: CharacterEmploymentState::unemployed(),
                lifecycle: LifecycleState::Unemployed,
                version: 0,
            },
        );
        info!(character = %id, name, "character created");
        id
    }

    pub fn character(&mut self, id: CharacterId) -> Result<CharacterRecord, CareerError> {
        let entity = self.entity(id)?;
        character_record(&self.world, entity).ok_or(CareerError::UnknownCharacter(id))
    }

    pub fn characters(&mut self) -> Vec<CharacterRecord> {
        character_records(&mut self.world)
    }

    pub fn attempt(&self, id: AttemptId) -> Option<&ApplicationAttempt> {
        self.world.resource::<ApplicationBook>().get(id)
    }

    pub fn open_attempt(&self, character: CharacterId) -> Option<AttemptId> {
        self.world
            .resource::<ApplicationBook>()
            .open_attempt_for(character)
    }

    /// Submit a résumé for `job_id`. Consumes one roll for the CV review.
    pub fn apply(
        &mut self,
        character: CharacterId,
        job_id: &JobTierId,
        declared_skills: DeclaredSkills,
    ) -> Result<ApplicationAttempt, CareerError> {
        let entity = self.entity(character)?;
        if self.employment(entity).is_employed() {
            return Err(CareerError::AlreadyEmployed);
        }
        if let Some(open) = self.open_attempt(character) {
            return Err(CareerError::ApplicationInProgress(open));
        }
        let tier = self.job_tier(job_id)?;
        let profile = self.profile(entity)?;
        check_eligibility(&profile, &tier)?;

        let mut lifecycle = self.lifecycle(entity);
        lifecycle.advance(LifecycleEvent::Apply)?;

        let id = self.world.resource_mut::<ApplicationBook>().allocate_id();
        let attempt = ApplicationAttempt::submit(
            id,
            character,
            &profile,
            &tier,
            declared_skills,
            self.rng.as_mut(),
        );
        if attempt.cv_reviewed {
            lifecycle.advance(LifecycleEvent::BeginInterview)?;
        } else {
            lifecycle.advance(LifecycleEvent::Reject)?;
        }
        info!(
            character = %character,
            job = %job_id,
            attempt = %id,
            suspicion = attempt.suspicion_level,
            cv_reviewed = attempt.cv_reviewed,
            "application submitted"
        );

        self.set_lifecycle(entity, lifecycle);
        self.world
            .resource_mut::<ApplicationBook>()
            .insert(attempt.clone());
        Ok(attempt)
    }

    /// Answer the attempt's current question. One roll per answer.
    pub fn answer_interview_question(
        &mut self,
        attempt_id: AttemptId,
        strategy: AnswerStrategy,
    ) -> Result<RoundResult, CareerError> {
        let mut book = self.world.resource_mut::<ApplicationBook>();
        let attempt = book
            .get_mut(attempt_id)
            .ok_or(CareerError::UnknownAttempt(attempt_id))?;
        attempt.answer(strategy, self.rng.as_mut())
    }

    /// Grade the interview, decide, and move the character into the job or back to unemployed.
    pub fn finalize_hiring(&mut self, attempt_id: AttemptId) -> Result<HiringResult, CareerError> {
        let (character, job_id) = {
            let book = self.world.resource::<ApplicationBook>();
            let attempt = book
                .get(attempt_id)
                .ok_or(CareerError::UnknownAttempt(attempt_id))?;
            if attempt.is_closed() {
                return Err(CareerError::AttemptClosed(attempt_id));
            }
            (attempt.character, attempt.job_id.clone())
        };
        let entity = self.entity(character)?;
        let tier = self.job_tier(&job_id)?;
        let mut employment = self.employment(entity);
        if employment.is_employed() {
            return Err(CareerError::AlreadyEmployed);
        }
        let mut lifecycle = self.lifecycle(entity);
        // Every hiring edge leaves Interviewing, so checking one checks them all.
        lifecycle.0.transition(LifecycleEvent::Reject)?;

        let (verdict, decision) = {
            let mut book = self.world.resource_mut::<ApplicationBook>();
            let attempt = book
                .get_mut(attempt_id)
                .ok_or(CareerError::UnknownAttempt(attempt_id))?;
            attempt.finalize(&tier, self.rng.as_mut())?
        };

        let event = match decision.outcome {
            ApplicationOutcome::HiredOnProbation => LifecycleEvent::HireOnProbation,
            ApplicationOutcome::HiredClean => LifecycleEvent::HireClean,
            ApplicationOutcome::RejectedInterviewFailed | ApplicationOutcome::RejectedNoReview => {
                LifecycleEvent::Reject
            }
        };
        lifecycle.advance(event)?;
        if decision.outcome.is_hired() {
            let starting_performance = self.tuning().starting_performance;
            lifecycle::hire(&mut employment, &decision, starting_performance)?;
        } else {
            info!(character = %character, job = %job_id, score = verdict.score, "application rejected");
        }

        self.set_employment(entity, employment);
        self.set_lifecycle(entity, lifecycle);

        Ok(HiringResult {
            attempt_id,
            outcome: decision.outcome,
            score: verdict.score,
            grade: verdict.grade,
            probation: decision.probation,
            job_id: decision.offered_tier,
            senior_offer: decision.senior_offer,
            lied_on_resume: decision.lied_on_resume,
        })
    }

    /// One work action.
    pub fn work_shift(&mut self, character: CharacterId) -> Result<ShiftReport, CareerError> {
        let entity = self.entity(character)?;
        let mut profile = self.profile(entity)?;
        let mut employment = self.employment(entity);
        let job_id = employment
            .current_job_id()
            .cloned()
            .ok_or(CareerError::NotEmployed)?;
        let tier = self.job_tier(&job_id)?;
        let report = shift::work_shift(&mut profile, &mut employment, &tier, self.tuning())?;
        self.set_profile(entity, profile);
        self.set_employment(entity, employment);
        Ok(report)
    }

    /// Spend time with coworkers. One roll.
    pub fn socialize(&mut self, character: CharacterId) -> Result<SocialReport, CareerError> {
        let entity = self.entity(character)?;
        let mut profile = self.profile(entity)?;
        let mut employment = self.employment(entity);
        let tuning = self.tuning().clone();
        let report =
            relationships::socialize(&mut profile, &mut employment, &tuning, self.rng.as_mut())?;
        self.set_profile(entity, profile);
        self.set_employment(entity, employment);
        Ok(report)
    }

    /// Promote if every requirement holds. Falling short is a result, not an error.
    pub fn request_promotion(
        &mut self,
        character: CharacterId,
    ) -> Result<PromotionResult, CareerError> {
        let entity = self.entity(character)?;
        let profile = self.profile(entity)?;
        let mut employment = self.employment(entity);
        let mut lifecycle = self.lifecycle(entity);
        let Some(position) = employment.position.as_mut() else {
            return Err(CareerError::NotEmployed);
        };

        let ladder = self
            .jobs
            .ladder(&position.job_id)
            .map_err(CareerError::repository)?;
        let at = locate(&ladder, &position.job_id)
            .ok_or_else(|| CareerError::UnknownJobTier(position.job_id.clone()))?;
        let check = evaluate_promotion(position, &profile, &at);
        let next = match check.next {
            Some(next) if check.eligible => next,
            _ => {
                return Ok(PromotionResult {
                    promoted: false,
                    new_tier_id: None,
                    unmet: check.unmet,
                })
            }
        };

        lifecycle.advance(LifecycleEvent::Promote)?;
        apply_promotion(position, &next);
        self.set_employment(entity, employment);
        self.set_lifecycle(entity, lifecycle);
        Ok(PromotionResult {
            promoted: true,
            new_tier_id: Some(next),
            unmet: Vec::new(),
        })
    }

    /// Quit. Calling it while unemployed does nothing.
    pub fn resign(&mut self, character: CharacterId) -> Result<(), CareerError> {
        let entity = self.entity(character)?;
        let mut employment = self.employment(entity);
        let mut lifecycle = self.lifecycle(entity);
        if let Some(job_id) = employment.current_job_id().cloned() {
            lifecycle::resign(&mut employment, &mut lifecycle)?;
            info!(character = %character, job = %job_id, "resigned");
            self.set_employment(entity, employment);
            self.set_lifecycle(entity, lifecycle);
        }
        Ok(())
    }

    /// Run one in-game day and return what happened.
    pub fn advance_day(&mut self) -> Vec<CareerEvent> {
        self.schedule.run(&mut self.world);
        std::mem::take(&mut self.world.resource_mut::<CareerEventLog>().0)
    }

    pub fn career_summary(&mut self, character: CharacterId) -> Result<CareerSummary, CareerError> {
        let record = self.character(character)?;
        let open_application = self.open_attempt(character);
        let job = match record.employment.position.as_ref() {
            None => None,
            Some(position) => {
                let ladder = self
                    .jobs
                    .ladder(&position.job_id)
                    .map_err(CareerError::repository)?;
                let at = locate(&ladder, &position.job_id)
                    .ok_or_else(|| CareerError::UnknownJobTier(position.job_id.clone()))?;
                let check = evaluate_promotion(position, &record.profile, &at);
                let tuning = self.tuning();
                Some(JobSummary {
                    job_id: position.job_id.clone(),
                    title: at.current.title.clone(),
                    category: at.current.category.clone(),
                    tier_index: at.index,
                    ladder_length: at.length,
                    next_title: at.next.as_ref().map(|t| t.title.clone()),
                    promotion_eligible: check.eligible,
                    unmet: check.unmet,
                    progress_percent: progress_percentage(position, &at.current, tuning),
                    probation: position.probation.map(|p| ProbationSummary {
                        days_remaining: p.days_remaining,
                        performance_required: p.performance_required,
                        warning: position.performance_rating < p.performance_required,
                    }),
                    tenure_years: position.tenure_years,
                    performance_rating: position.performance_rating,
                    approval: position.approval,
                    projects_completed: position.projects_completed,
                    daily_pay: at.current.annual_salary
                        / tuning.working_days_per_year.max(1) as f64,
                })
            }
        };
        Ok(CareerSummary {
            character,
            name: record.name,
            lifecycle: record.lifecycle,
            energy: (record.profile.energy, record.profile.max_energy),
            money: record.profile.money,
            experience: record.profile.experience,
            job,
            open_application,
        })
    }

    /// Extract a serializable save state from the current world.
    pub fn save_state(&mut self) -> SaveState {
        extract_state_from_world(&mut self.world, self.seed)
    }

    /// Apply a saved state back into the live world. Open applications are dropped.
    /// A seeded engine restarts its stream from the saved seed.
    pub fn load_state(&mut self, state: SaveState) {
        self.seed = state.seed;
        if !self.injected_rng {
            self.rng = Box::new(SeededRandom::new(state.seed));
        }
        apply_state_to_world(state, &mut self.world);
    }

    pub fn save_to_path<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        save_state_to_path(&self.save_state(), path)
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let state = load_state_from_path(path)?;
        self.load_state(state);
        Ok(())
    }

    /// Write every character and the clock to the store. Returns how many characters were saved.
    pub fn persist_to(&mut self, repo: &mut dyn CharacterRepository) -> Result<usize, CareerError> {
        let records = character_records(&mut self.world);
        for record in records.iter() {
            let version = repo
                .save_character(record)
                .map_err(CareerError::repository)?;
            if let Some(entity) = find_character(&mut self.world, record.id) {
                if let Some(mut ent) = self.world.get_entity_mut(entity) {
                    ent.insert(StoredVersion(version));
                }
            }
        }
        repo.save_time(self.time()).map_err(CareerError::repository)?;
        Ok(records.len())
    }

    /// Replace the live characters and clock with the store's contents.
    pub fn load_from(&mut self, repo: &dyn CharacterRepository) -> Result<usize, CareerError> {
        let characters = repo.load_characters().map_err(CareerError::repository)?;
        let time = repo
            .load_time()
            .map_err(CareerError::repository)?
            .unwrap_or_default();
        let count = characters.len();
        apply_state_to_world(
            SaveState {
                version: 1,
                seed: self.seed,
                time,
                characters,
            },
            &mut self.world,
        );
        Ok(count)
    }

    fn entity(&mut self, id: CharacterId) -> Result<Entity, CareerError> {
        find_character(&mut self.world, id).ok_or(CareerError::UnknownCharacter(id))
    }

    fn character_id(&self, entity: Entity) -> CharacterId {
        self.world
            .get::<CharacterId>(entity)
            .copied()
            .unwrap_or(CharacterId(0))
    }

    fn profile(&self, entity: Entity) -> Result<CharacterProfile, CareerError> {
        self.world
            .get::<CharacterProfile>(entity)
            .cloned()
            .ok_or_else(|| CareerError::UnknownCharacter(self.character_id(entity)))
    }

    fn employment(&self, entity: Entity) -> CharacterEmploymentState {
        self.world
            .get::<CharacterEmploymentState>(entity)
            .cloned()
            .unwrap_or_default()
    }

    fn lifecycle(&self, entity: Entity) -> Lifecycle {
        self.world
            .get::<Lifecycle>(entity)
            .copied()
            .unwrap_or_default()
    }

    fn set_profile(&mut self, entity: Entity, profile: CharacterProfile) {
        if let Some(mut ent) = self.world.get_entity_mut(entity) {
            ent.insert(profile);
        }
    }

    fn set_employment(&mut self, entity: Entity, employment: CharacterEmploymentState) {
        if let Some(mut ent) = self.world.get_entity_mut(entity) {
            ent.insert(employment);
        }
    }

    fn set_lifecycle(&mut self, entity: Entity, lifecycle: Lifecycle) {
        if let Some(mut ent) = self.world.get_entity_mut(entity) {
            ent.insert(lifecycle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRolls;
    use crate::data::careers::default_career_catalog;

    fn engine(rolls: ScriptedRolls) -> CareerEngine {
        CareerEngine::new(default_career_catalog(), CareerTuning::default(), 7)
            .with_random_source(rolls)
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut engine = engine(ScriptedRolls::always(0.0));
        assert_eq!(
            engine.work_shift(CharacterId(99)),
            Err(CareerError::UnknownCharacter(CharacterId(99)))
        );
        assert_eq!(
            engine.answer_interview_question(AttemptId(5), AnswerStrategy::Honest),
            Err(CareerError::UnknownAttempt(AttemptId(5)))
        );
        let id = engine.create_character("Ash", CharacterProfile::default());
        assert_eq!(
            engine
                .apply(id, &JobTierId::new("nope"), DeclaredSkills::new())
                .unwrap_err(),
            CareerError::UnknownJobTier(JobTierId::new("nope"))
        );
    }

    #[test]
    fn rejected_cv_leaves_character_unemployed() {
        let mut engine = engine(ScriptedRolls::always(99.0));
        let id = engine.create_character("Ash", CharacterProfile::default());
        let attempt = engine
            .apply(id, &JobTierId::new("corp_intern"), DeclaredSkills::new())
            .unwrap();
        assert_eq!(attempt.outcome(), Some(ApplicationOutcome::RejectedNoReview));
        assert_eq!(engine.character(id).unwrap().lifecycle, LifecycleState::Unemployed);
        assert_eq!(
            engine.finalize_hiring(attempt.id),
            Err(CareerError::AttemptClosed(attempt.id))
        );
        // A closed attempt does not block a fresh application.
        assert!(engine
            .apply(id, &JobTierId::new("corp_intern"), DeclaredSkills::new())
            .is_ok());
    }

    fn cv_reviews(engine: &mut CareerEngine, applicants: usize) -> Vec<bool> {
        (0..applicants)
            .map(|n| {
                let name = format!("Applicant {}", n);
                let id = engine.create_character(&name, CharacterProfile::default());
                engine
                    .apply(id, &JobTierId::new("corp_intern"), DeclaredSkills::new())
                    .unwrap()
                    .cv_reviewed
            })
            .collect()
    }

    #[test]
    fn loading_a_save_reseeds_the_rolls() {
        let saved = CareerEngine::new(default_career_catalog(), CareerTuning::default(), 42)
            .save_state();
        let mut fresh = CareerEngine::new(default_career_catalog(), CareerTuning::default(), 42);
        let mut restored = CareerEngine::new(default_career_catalog(), CareerTuning::default(), 5);
        cv_reviews(&mut restored, 3);

        restored.load_state(saved);
        assert_eq!(restored.seed(), 42);
        assert_eq!(cv_reviews(&mut restored, 12), cv_reviews(&mut fresh, 12));
    }

    #[test]
    fn loading_a_save_keeps_an_injected_source() {
        let saved = CareerEngine::new(default_career_catalog(), CareerTuning::default(), 42)
            .save_state();
        let mut engine = engine(ScriptedRolls::always(0.0));
        engine.load_state(saved);
        assert_eq!(engine.seed(), 42);
        assert_eq!(cv_reviews(&mut engine, 4), vec![true; 4]);
    }

    #[test]
    fn summary_describes_the_job() {
        let mut engine = engine(ScriptedRolls::always(0.0));
        let id = engine.create_character("Ash", CharacterProfile::default());
        let attempt = engine
            .apply(id, &JobTierId::new("corp_intern"), DeclaredSkills::new())
            .unwrap();
        for _ in 0..5 {
            engine
                .answer_interview_question(attempt.id, AnswerStrategy::Honest)
                .unwrap();
        }
        engine.finalize_hiring(attempt.id).unwrap();
        let summary = engine.career_summary(id).unwrap();
        let job = summary.job.as_ref().unwrap();
        assert_eq!(job.tier_index, 1);
        assert_eq!(job.next_title.as_deref(), Some("Clerk"));
        assert!(job.probation.is_none());
        assert!(summary.to_string().contains("tier 1/5"));
    }
}
