use std::fmt;

use bevy_utils::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::CareerError;
use crate::core::rng::RandomSource;
use crate::rules::scoring::{success_chance, AnswerStrategy, ScoringContext};

/// Chance in percent that an Average interview still passes.
pub const AVERAGE_PASS_CHANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewQuestion {
    Experience,
    Skills,
    Challenges,
    Teamwork,
    Goals,
}

impl InterviewQuestion {
    pub const ALL: [InterviewQuestion; 5] = [
        InterviewQuestion::Experience,
        InterviewQuestion::Skills,
        InterviewQuestion::Challenges,
        InterviewQuestion::Teamwork,
        InterviewQuestion::Goals,
    ];

    pub fn prompt(self) -> &'static str {
        match self {
            InterviewQuestion::Experience => "Tell us about your previous work experience.",
            InterviewQuestion::Skills => "What skills make you right for this role?",
            InterviewQuestion::Challenges => "Describe a challenge you overcame on the job.",
            InterviewQuestion::Teamwork => "How do you handle conflict inside a crew?",
            InterviewQuestion::Goals => "Where do you see yourself in five years?",
        }
    }
}

pub const INTERVIEW_ROUNDS: usize = InterviewQuestion::ALL.len();

/// Points for one answer. Confident swings widest, honest is safest.
pub fn points_for(strategy: AnswerStrategy, success: bool) -> u32 {
    match (strategy, success) {
        (AnswerStrategy::Honest, true) => 15,
        (AnswerStrategy::Honest, false) => 8,
        (AnswerStrategy::Confident, true) => 25,
        (AnswerStrategy::Confident, false) => 0,
        (AnswerStrategy::Charm, true) => 18,
        (AnswerStrategy::Charm, false) => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewGrade {
    Excellent,
    Good,
    Average,
    Poor,
}

impl InterviewGrade {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            InterviewGrade::Excellent
        } else if score >= 60 {
            InterviewGrade::Good
        } else if score >= 40 {
            InterviewGrade::Average
        } else {
            InterviewGrade::Poor
        }
    }
}

impl fmt::Display for InterviewGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewGrade::Excellent => "Excellent",
            InterviewGrade::Good => "Good",
            InterviewGrade::Average => "Average",
            InterviewGrade::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub question: InterviewQuestion,
    pub strategy: AnswerStrategy,
    pub chance: u8,
    pub success: bool,
    pub points_awarded: u32,
    /// Set on the fifth answer.
    pub round_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewVerdict {
    pub score: u32,
    pub grade: InterviewGrade,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    rounds: Vec<RoundResult>,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_question(&self) -> Option<InterviewQuestion> {
        InterviewQuestion::ALL.get(self.rounds.len()).copied()
    }

    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    pub fn remaining(&self) -> usize {
        INTERVIEW_ROUNDS - self.rounds.len()
    }

    pub fn is_complete(&self) -> bool {
        self.rounds.len() >= INTERVIEW_ROUNDS
    }

    /// Accumulated score, capped at 100.
    pub fn score(&self) -> u32 {
        self.rounds
            .iter()
            .map(|r| r.points_awarded)
            .sum::<u32>()
            .min(100)
    }

    /// Answer the current question. One roll; the draw is final.
    pub fn answer(
        &mut self,
        strategy: AnswerStrategy,
        ctx: &ScoringContext,
        rng: &mut dyn RandomSource,
    ) -> Result<RoundResult, CareerError> {
        let Some(question) = self.current_question() else {
            return Err(CareerError::InterviewComplete);
        };
        let chance = success_chance(strategy, ctx);
        let roll = rng.roll();
        let success = roll < chance as f64;
        let result = RoundResult {
            question,
            strategy,
            chance,
            success,
            points_awarded: points_for(strategy, success),
            round_complete: self.rounds.len() + 1 == INTERVIEW_ROUNDS,
        };
        debug!(
            ?question,
            %strategy,
            chance,
            roll,
            success,
            "interview answer"
        );
        self.rounds.push(result);
        Ok(result)
    }

    /// Grade the finished interview. Average scores take one extra coin-flip roll.
    pub fn finalize(&self, rng: &mut dyn RandomSource) -> Result<InterviewVerdict, CareerError> {
        if !self.is_complete() {
            return Err(CareerError::InterviewIncomplete {
                remaining: self.remaining(),
            });
        }
        let score = self.score();
        let grade = InterviewGrade::from_score(score);
        let passed = match grade {
            InterviewGrade::Excellent | InterviewGrade::Good => true,
            InterviewGrade::Average => rng.check(AVERAGE_PASS_CHANCE),
            InterviewGrade::Poor => false,
        };
        Ok(InterviewVerdict {
            score,
            grade,
            passed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRolls;

    fn clean_ctx() -> ScoringContext {
        ScoringContext {
            charisma: 20,
            declared_skill_average: None,
            suspicion_level: 0,
            target_job_average_skill: 0.0,
        }
    }

    fn run(strategies: [AnswerStrategy; 5], rng: &mut ScriptedRolls) -> InterviewSession {
        let mut session = InterviewSession::new();
        for strategy in strategies {
            session.answer(strategy, &clean_ctx(), rng).unwrap();
        }
        session
    }

    #[test]
    fn five_honest_successes_score_seventy_five() {
        let mut rng = ScriptedRolls::always(0.0);
        let session = run([AnswerStrategy::Honest; 5], &mut rng);
        let verdict = session.finalize(&mut rng).unwrap();
        assert_eq!(verdict.score, 75);
        assert_eq!(verdict.grade, InterviewGrade::Good);
        assert!(verdict.passed);
        assert_eq!(rng.consumed(), 5);
    }

    #[test]
    fn questions_run_in_fixed_order() {
        let mut rng = ScriptedRolls::always(0.0);
        let mut session = InterviewSession::new();
        let mut asked = Vec::new();
        while let Some(question) = session.current_question() {
            asked.push(question);
            let result = session
                .answer(AnswerStrategy::Charm, &clean_ctx(), &mut rng)
                .unwrap();
            assert_eq!(result.round_complete, session.is_complete());
        }
        assert_eq!(asked, InterviewQuestion::ALL.to_vec());
        assert_eq!(
            session.answer(AnswerStrategy::Honest, &clean_ctx(), &mut rng),
            Err(CareerError::InterviewComplete)
        );
    }

    #[test]
    fn failed_confident_answers_score_nothing() {
        let mut rng = ScriptedRolls::always(99.0);
        let session = run([AnswerStrategy::Confident; 5], &mut rng);
        let verdict = session.finalize(&mut rng).unwrap();
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.grade, InterviewGrade::Poor);
        assert!(!verdict.passed);
    }

    #[test]
    fn average_band_uses_a_fresh_roll() {
        // Five honest failures: 40 points, Average.
        let mut rng = ScriptedRolls::new([99.0; 5]).then(10.0);
        let session = run([AnswerStrategy::Honest; 5], &mut rng);
        assert_eq!(session.score(), 40);
        assert!(session.finalize(&mut rng).unwrap().passed);

        let mut rng = ScriptedRolls::always(75.0);
        assert!(!session.finalize(&mut rng).unwrap().passed);
    }

    #[test]
    fn finalize_before_fifth_answer_fails() {
        let mut rng = ScriptedRolls::always(0.0);
        let mut session = InterviewSession::new();
        session
            .answer(AnswerStrategy::Honest, &clean_ctx(), &mut rng)
            .unwrap();
        assert_eq!(
            session.finalize(&mut rng),
            Err(CareerError::InterviewIncomplete { remaining: 4 })
        );
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(InterviewGrade::from_score(80), InterviewGrade::Excellent);
        assert_eq!(InterviewGrade::from_score(79), InterviewGrade::Good);
        assert_eq!(InterviewGrade::from_score(60), InterviewGrade::Good);
        assert_eq!(InterviewGrade::from_score(59), InterviewGrade::Average);
        assert_eq!(InterviewGrade::from_score(40), InterviewGrade::Average);
        assert_eq!(InterviewGrade::from_score(39), InterviewGrade::Poor);
    }
}
