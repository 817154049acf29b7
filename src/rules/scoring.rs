use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_SUCCESS_CHANCE: u8 = 10;
pub const MAX_SUCCESS_CHANCE: u8 = 90;
pub const MAX_CV_REVIEW_CHANCE: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerStrategy {
    Honest,
    Confident,
    Charm,
}

impl AnswerStrategy {
    pub const ALL: [AnswerStrategy; 3] = [
        AnswerStrategy::Honest,
        AnswerStrategy::Confident,
        AnswerStrategy::Charm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnswerStrategy::Honest => "honest",
            AnswerStrategy::Confident => "confident",
            AnswerStrategy::Charm => "charm",
        }
    }
}

impl fmt::Display for AnswerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnswerStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "honest" => Ok(AnswerStrategy::Honest),
            "confident" => Ok(AnswerStrategy::Confident),
            "charm" => Ok(AnswerStrategy::Charm),
            other => Err(format!("unknown answer strategy {}", other)),
        }
    }
}

/// Inputs to a single answer's success chance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    pub charisma: u32,
    /// Mean of the character's true values for the skills on the résumé.
    pub declared_skill_average: Option<f64>,
    pub suspicion_level: u8,
    pub target_job_average_skill: f64,
}

/// Percent chance (10..=90) that an answer lands.
pub fn success_chance(strategy: AnswerStrategy, ctx: &ScoringContext) -> u8 {
    let suspicion = ctx.suspicion_level as f64;
    let raw = match strategy {
        AnswerStrategy::Honest => 70.0 - suspicion * 0.1,
        AnswerStrategy::Confident => {
            let skill_average = ctx
                .declared_skill_average
                .unwrap_or(ctx.target_job_average_skill);
            60.0 - suspicion * 0.5 + 0.2 * skill_average
        }
        AnswerStrategy::Charm => 50.0 + 0.5 * ctx.charisma as f64 - suspicion * 0.2,
    };
    raw.round()
        .clamp(MIN_SUCCESS_CHANCE as f64, MAX_SUCCESS_CHANCE as f64) as u8
}

/// Percent chance the CV gets looked at. Inflated résumés get noticed more often.
pub fn cv_review_chance(suspicion_level: u8) -> u8 {
    let raw = (50.0 + suspicion_level as f64 * 0.5).round();
    raw.clamp(0.0, MAX_CV_REVIEW_CHANCE as f64) as u8
}
