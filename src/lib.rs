// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod content;
pub mod core;
pub mod data;
pub mod rules;
pub mod simulation;
pub mod systems;
pub mod world;

// Expose the engine facade and the types needed to drive it
pub use crate::components::identity::CharacterProfile;
pub use crate::components::world::CharacterId;
pub use crate::content::{JobCatalog, JobRepository, JobTier, JobTierId};
pub use crate::core::engine::{
    CareerEngine, CareerSummary, HiringResult, JobSummary, ProbationSummary, PromotionResult,
};
pub use crate::core::error::{CareerError, Requirement};
pub use crate::core::rng::{RandomSource, ScriptedRolls, SeededRandom};
pub use crate::core::serialization::SaveState;
pub use crate::data::CareerTuning;
pub use crate::rules::scoring::AnswerStrategy;
pub use crate::systems::CareerEvent;
