use std::fs;
use std::path::Path;

use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};

use crate::content::{JobCatalog, JobTier};
use crate::data::DataError;

pub const CAREER_CATALOG_SCHEMA_VERSION: u32 = 1;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../assets/data/careers.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerCatalogFile {
    pub schema_version: u32,
    pub tiers: Vec<JobTier>,
}

pub fn load_career_catalog(path: impl AsRef<Path>) -> Result<JobCatalog, DataError> {
    let path_str = path.as_ref().display().to_string();
    let data = fs::read_to_string(&path).map_err(|source| DataError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_catalog_named(&data, &path_str)
}

pub fn parse_career_catalog(data: &str) -> Result<JobCatalog, DataError> {
    parse_catalog_named(data, "<inline>")
}

/// Catalog compiled into the crate: street, corporate and medical ladders.
pub fn default_career_catalog() -> JobCatalog {
    match parse_catalog_named(DEFAULT_CATALOG_JSON, "assets/data/careers.json") {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(error = %err, "built-in career catalog failed to load");
            JobCatalog::default()
        }
    }
}

fn parse_catalog_named(data: &str, name: &str) -> Result<JobCatalog, DataError> {
    let file: CareerCatalogFile = serde_json::from_str(data).map_err(|source| DataError::Json {
        path: name.to_string(),
        source,
    })?;
    if file.schema_version != CAREER_CATALOG_SCHEMA_VERSION {
        return Err(DataError::Validation(format!(
            "{}: unsupported schema_version {}",
            name, file.schema_version
        )));
    }
    JobCatalog::from_tiers(file.tiers)
}
