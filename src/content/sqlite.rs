use std::collections::BTreeMap;
use std::path::Path;

use bevy_utils::tracing::info;
use rusqlite::{params, Connection, OptionalExtension};

use crate::content::catalog::{validate_tiers, JobCatalog};
use crate::content::repository::{JobRepository, JobTier, JobTierId};

const CONTENT_SCHEMA_VERSION: i64 = 1;

const CONTENT_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS content_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS job_tiers (
  tier_id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  category TEXT NOT NULL,
  required_level INTEGER NOT NULL,
  annual_salary REAL NOT NULL,
  energy_cost_per_work INTEGER NOT NULL,
  experience_per_work INTEGER NOT NULL,
  years_for_promotion REAL NOT NULL,
  min_performance INTEGER NOT NULL,
  next_tier_id TEXT
);

CREATE TABLE IF NOT EXISTS job_tier_skills (
  tier_id TEXT NOT NULL,
  skill TEXT NOT NULL,
  minimum INTEGER NOT NULL,
  PRIMARY KEY (tier_id, skill)
);
"#;

#[derive(Debug, thiserror::Error)]
pub enum ContentDbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    InvalidData(String),
}

/// Job tiers stored in a SQLite content database.
pub struct SqliteJobRepository {
    conn: Connection,
}

impl SqliteJobRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContentDbError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, ContentDbError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, ContentDbError> {
        conn.execute_batch(CONTENT_DB_SCHEMA)?;
        let version: Option<i64> = conn
            .query_row(
                "SELECT schema_version FROM content_meta WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match version {
            None => {
                conn.execute(
                    "INSERT INTO content_meta (id, schema_version) VALUES (1, ?1)",
                    params![CONTENT_SCHEMA_VERSION],
                )?;
            }
            Some(found) if found != CONTENT_SCHEMA_VERSION => {
                return Err(ContentDbError::InvalidData(format!(
                    "content schema version {} does not match expected {}",
                    found, CONTENT_SCHEMA_VERSION
                )));
            }
            Some(_) => {}
        }
        Ok(Self { conn })
    }

    /// Replace every stored tier with the catalog's contents.
    pub fn import_catalog(&mut self, catalog: &JobCatalog) -> Result<usize, ContentDbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM job_tier_skills", [])?;
        tx.execute("DELETE FROM job_tiers", [])?;
        let mut count = 0;
        for tier in catalog.iter() {
            tx.execute(
                "INSERT INTO job_tiers (tier_id, title, category, required_level, annual_salary,\
                 energy_cost_per_work, experience_per_work, years_for_promotion, min_performance,\
                 next_tier_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    tier.id.as_str(),
                    tier.title,
                    tier.category,
                    tier.required_level as i64,
                    tier.annual_salary,
                    tier.energy_cost_per_work as i64,
                    tier.experience_per_work as i64,
                    tier.years_for_promotion,
                    tier.min_performance as i64,
                    tier.next_tier_id.as_ref().map(|id| id.as_str().to_string()),
                ],
            )?;
            for (skill, minimum) in tier.required_skills.iter() {
                tx.execute(
                    "INSERT INTO job_tier_skills (tier_id, skill, minimum) VALUES (?1, ?2, ?3)",
                    params![tier.id.as_str(), skill, *minimum as i64],
                )?;
            }
            count += 1;
        }
        tx.commit()?;
        info!(tiers = count, "imported career catalog into content db");
        Ok(count)
    }

    pub fn load_tiers(&self) -> Result<Vec<JobTier>, ContentDbError> {
        let mut skills: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut stmt = self
            .conn
            .prepare("SELECT tier_id, skill, minimum FROM job_tier_skills")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        for row in rows {
            let (tier_id, skill, minimum) = row?;
            skills
                .entry(tier_id)
                .or_default()
                .insert(skill, minimum.max(0) as u32);
        }

        let mut stmt = self.conn.prepare(
            "SELECT tier_id, title, category, required_level, annual_salary, energy_cost_per_work,\
                    experience_per_work, years_for_promotion, min_performance, next_tier_id \
             FROM job_tiers ORDER BY tier_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, i64>(8)?,
                row.get::<_, Option<String>>(9)?,
            ))
        })?;

        let mut tiers = Vec::new();
        for row in rows {
            let (
                tier_id,
                title,
                category,
                required_level,
                annual_salary,
                energy_cost,
                experience,
                years,
                min_performance,
                next_tier_id,
            ) = row?;
            let min_performance = u8::try_from(min_performance).map_err(|_| {
                ContentDbError::InvalidData(format!(
                    "tier {} min_performance {} out of range",
                    tier_id, min_performance
                ))
            })?;
            tiers.push(JobTier {
                required_skills: skills.remove(&tier_id).unwrap_or_default(),
                id: JobTierId(tier_id),
                title,
                category,
                required_level: required_level.max(0) as u32,
                annual_salary,
                energy_cost_per_work: energy_cost.max(0) as u32,
                experience_per_work: experience.max(0) as u64,
                years_for_promotion: years,
                min_performance,
                next_tier_id: next_tier_id.map(JobTierId),
            });
        }

        validate_tiers(&tiers).map_err(|err| ContentDbError::InvalidData(err.to_string()))?;
        Ok(tiers)
    }
}

impl JobRepository for SqliteJobRepository {
    fn job_tier(&self, id: &JobTierId) -> Result<Option<JobTier>, Box<dyn std::error::Error>> {
        Ok(self.load_tiers()?.into_iter().find(|t| &t.id == id))
    }

    fn tiers(&self) -> Result<Vec<JobTier>, Box<dyn std::error::Error>> {
        Ok(self.load_tiers()?)
    }
}
