use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};

use crate::data::DataError;

/// Tunable numbers for shifts, relationships and progress. Every field may be omitted in JSON.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerTuning {
    pub working_days_per_year: u32,
    pub starting_performance: u8,
    pub performance_gain_per_shift: i32,
    pub performance_loss_when_exhausted: i32,
    pub critical_energy: u32,
    pub daily_energy_recovery: u32,
    pub shifts_per_project: u32,
    pub projects_for_promotion: u32,
    pub approval_for_promotion: u8,
    pub socialize_energy_cost: u32,
}

impl Default for CareerTuning {
    fn default() -> Self {
        Self {
            working_days_per_year: 250,
            starting_performance: 70,
            performance_gain_per_shift: 1,
            performance_loss_when_exhausted: 1,
            critical_energy: 20,
            daily_energy_recovery: 25,
            shifts_per_project: 5,
            projects_for_promotion: 4,
            approval_for_promotion: 75,
            socialize_energy_cost: 10,
        }
    }
}

impl CareerTuning {
    pub fn validate(&self) -> Result<(), DataError> {
        if self.working_days_per_year == 0 {
            return Err(DataError::Validation(
                "working_days_per_year must be positive".to_string(),
            ));
        }
        if self.shifts_per_project == 0 {
            return Err(DataError::Validation(
                "shifts_per_project must be positive".to_string(),
            ));
        }
        if self.starting_performance > 100 || self.approval_for_promotion > 100 {
            return Err(DataError::Validation(
                "performance and approval values are percentages".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn parse_tuning(data: &str) -> Result<CareerTuning, DataError> {
    let tuning: CareerTuning = serde_json::from_str(data).map_err(|source| DataError::Json {
        path: "<inline>".to_string(),
        source,
    })?;
    tuning.validate()?;
    Ok(tuning)
}

/// Load tuning from disk; a missing file means defaults.
pub fn load_tuning(path: impl AsRef<Path>) -> Result<CareerTuning, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "tuning file not found, using defaults");
        return Ok(CareerTuning::default());
    }
    let data = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let tuning: CareerTuning = serde_json::from_str(&data).map_err(|source| DataError::Json {
        path: path.display().to_string(),
        source,
    })?;
    tuning.validate()?;
    Ok(tuning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = parse_tuning(r#"{"critical_energy": 5}"#).unwrap();
        assert_eq!(tuning.critical_energy, 5);
        assert_eq!(tuning.working_days_per_year, 250);
    }

    #[test]
    fn zero_working_days_is_rejected() {
        assert!(parse_tuning(r#"{"working_days_per_year": 0}"#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tuning = load_tuning("./no-such-tuning.json").unwrap();
        assert_eq!(tuning, CareerTuning::default());
    }
}
