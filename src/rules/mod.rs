pub mod hiring;
pub mod interview;
pub mod resume;
pub mod scoring;

pub use hiring::{
    decide_hiring, probation_terms_for, roll_cv_review, ApplicationOutcome, HiringDecision,
};
pub use interview::{
    points_for, InterviewGrade, InterviewQuestion, InterviewSession, InterviewVerdict, RoundResult,
    INTERVIEW_ROUNDS,
};
pub use resume::{declared_skill_average, suspicion_level, DeclaredSkills};
pub use scoring::{cv_review_chance, success_chance, AnswerStrategy, ScoringContext};
