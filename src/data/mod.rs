pub mod careers;
pub mod tuning;

pub use careers::{default_career_catalog, load_career_catalog, parse_career_catalog};
pub use tuning::{load_tuning, CareerTuning};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(String),
}
