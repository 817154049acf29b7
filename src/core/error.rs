use std::fmt;

use crate::components::world::CharacterId;
use crate::content::JobTierId;
use crate::simulation::application::AttemptId;
use crate::simulation::lifecycle::{LifecycleEvent, LifecycleState};

/// A requirement a character failed to meet, for applications and promotions alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Level { required: u32, actual: u32 },
    Skill { name: String, required: u32, actual: u32 },
    Tenure { required: f64, actual: f64 },
    Performance { required: u8, actual: u8 },
    /// Promotions wait until probation is over.
    Probation { days_remaining: u32 },
    NextTier,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Level { required, actual } => {
                write!(f, "level {} (have {})", required, actual)
            }
            Requirement::Skill {
                name,
                required,
                actual,
            } => write!(f, "{} {} (have {})", name, required, actual),
            Requirement::Tenure { required, actual } => {
                write!(f, "tenure {:.2}y (have {:.2}y)", required, actual)
            }
            Requirement::Performance { required, actual } => {
                write!(f, "performance {} (have {})", required, actual)
            }
            Requirement::Probation { days_remaining } => {
                write!(f, "probation served ({} days left)", days_remaining)
            }
            Requirement::NextTier => write!(f, "a higher tier (already at the top)"),
        }
    }
}

fn list(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation failures. None of these leave any state changed behind them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CareerError {
    #[error("not qualified: needs {}", list(.missing))]
    NotQualified { missing: Vec<Requirement> },
    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },
    #[error("probation period ended and must be resolved first")]
    ProbationUnresolved,
    #[error("character is not employed")]
    NotEmployed,
    #[error("character already holds a job")]
    AlreadyEmployed,
    #[error("an application is already in progress ({0})")]
    ApplicationInProgress(AttemptId),
    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),
    #[error("unknown job tier {0}")]
    UnknownJobTier(JobTierId),
    #[error("unknown application {0}")]
    UnknownAttempt(AttemptId),
    #[error("application {0} is closed; apply again for a new roll")]
    AttemptClosed(AttemptId),
    #[error("interview already has all of its answers")]
    InterviewComplete,
    #[error("interview still has {remaining} unanswered questions")]
    InterviewIncomplete { remaining: usize },
    #[error("cannot {event:?} from {from:?}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
    #[error("repository error: {0}")]
    Repository(String),
}

impl CareerError {
    pub fn repository(err: impl fmt::Display) -> Self {
        CareerError::Repository(err.to_string())
    }
}
