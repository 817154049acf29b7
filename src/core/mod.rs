pub mod ecs;
pub mod engine;
pub mod error;
pub mod rng;
pub mod serialization;
pub mod world;
