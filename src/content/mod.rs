pub mod catalog;
pub mod repository;
pub mod sqlite;

pub use catalog::JobCatalog;
pub use repository::{JobRepository, JobTier, JobTierId};
pub use sqlite::{ContentDbError, SqliteJobRepository};
