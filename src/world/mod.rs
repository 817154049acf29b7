pub mod repository;
pub mod sqlite;

pub use repository::{CharacterRecord, CharacterRepository};
pub use sqlite::{WorldDb, WorldDbError};
