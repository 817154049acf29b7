use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::catalog::assemble_ladder;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobTierId(pub String);

impl JobTierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobTierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobTierId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One rung of a career ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTier {
    pub id: JobTierId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub required_level: u32,
    #[serde(default)]
    pub required_skills: BTreeMap<String, u32>,
    pub annual_salary: f64,
    pub energy_cost_per_work: u32,
    pub experience_per_work: u64,
    pub years_for_promotion: f64,
    pub min_performance: u8,
    #[serde(default)]
    pub next_tier_id: Option<JobTierId>,
}

impl JobTier {
    /// Mean of the required skill minimums, zero for tiers with no skill gate.
    pub fn average_required_skill(&self) -> f64 {
        if self.required_skills.is_empty() {
            return 0.0;
        }
        let total: u64 = self.required_skills.values().map(|min| u64::from(*min)).sum();
        total as f64 / self.required_skills.len() as f64
    }
}

pub trait JobRepository {
    fn job_tier(&self, id: &JobTierId) -> Result<Option<JobTier>, Box<dyn std::error::Error>>;
    fn tiers(&self) -> Result<Vec<JobTier>, Box<dyn std::error::Error>>;

    /// Full ladder containing `id`, ordered from entry tier to top. Empty if `id` is unknown.
    fn ladder(&self, id: &JobTierId) -> Result<Vec<JobTier>, Box<dyn std::error::Error>> {
        Ok(assemble_ladder(&self.tiers()?, id))
    }
}
