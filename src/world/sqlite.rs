use std::collections::BTreeMap;
use std::path::Path;

use bevy_utils::tracing::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::components::employment::{CharacterEmploymentState, Position, Probation};
use crate::components::identity::{CharacterProfile, SkillSet};
use crate::components::world::CharacterId;
use crate::content::JobTierId;
use crate::simulation::lifecycle::LifecycleState;
use crate::simulation::time::GameTime;
use crate::world::repository::{CharacterRecord, CharacterRepository};

const WORLD_SCHEMA_VERSION: i64 = 1;
const WORLD_SAVE_VERSION: i64 = 1;

const WORLD_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS world_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL,
  save_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS world_time (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  day INTEGER NOT NULL,
  week INTEGER NOT NULL,
  month INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS characters (
  character_id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  level INTEGER NOT NULL,
  charisma INTEGER NOT NULL,
  energy INTEGER NOT NULL,
  max_energy INTEGER NOT NULL,
  experience INTEGER NOT NULL,
  money REAL NOT NULL,
  lifecycle TEXT NOT NULL,
  version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS character_skills (
  character_id INTEGER NOT NULL,
  skill TEXT NOT NULL,
  value INTEGER NOT NULL,
  PRIMARY KEY (character_id, skill)
);

CREATE TABLE IF NOT EXISTS employment (
  character_id INTEGER PRIMARY KEY,
  job_id TEXT NOT NULL,
  tenure_years REAL NOT NULL,
  performance_rating INTEGER NOT NULL,
  lied_on_resume INTEGER NOT NULL,
  shifts_worked INTEGER NOT NULL,
  projects_completed INTEGER NOT NULL,
  approval INTEGER NOT NULL,
  probation_days_remaining INTEGER,
  probation_performance_required INTEGER
);
"#;

#[derive(Debug, thiserror::Error)]
pub enum WorldDbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    InvalidData(String),
    #[error("character {id} was changed elsewhere (expected version {expected}, found {found})")]
    StaleWrite {
        id: CharacterId,
        expected: u64,
        found: u64,
    },
    #[error("character {0} is not in the world db")]
    NotFound(CharacterId),
}

/// Character store backed by SQLite with per-character optimistic versioning.
pub struct WorldDb {
    conn: Connection,
}

impl WorldDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorldDbError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, WorldDbError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, WorldDbError> {
        let mut db = Self { conn };
        db.conn.execute_batch(WORLD_DB_SCHEMA)?;
        db.ensure_world_meta()?;
        Ok(db)
    }

    fn ensure_world_meta(&mut self) -> Result<(), WorldDbError> {
        let meta = self
            .conn
            .query_row(
                "SELECT schema_version, save_version FROM world_meta WHERE id = 1",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match meta {
            Some((schema_version, save_version)) => {
                if schema_version != WORLD_SCHEMA_VERSION || save_version != WORLD_SAVE_VERSION {
                    return Err(WorldDbError::InvalidData(format!(
                        "world_meta version mismatch (schema {}, save {}, expected {}, {})",
                        schema_version, save_version, WORLD_SCHEMA_VERSION, WORLD_SAVE_VERSION
                    )));
                }
            }
            None => {
                self.conn.execute(
                    "INSERT INTO world_meta (id, schema_version, save_version) VALUES (1, ?1, ?2)",
                    params![WORLD_SCHEMA_VERSION, WORLD_SAVE_VERSION],
                )?;
            }
        }
        Ok(())
    }

    pub fn load_time(&self) -> Result<Option<GameTime>, WorldDbError> {
        let time = self
            .conn
            .query_row(
                "SELECT day, week, month FROM world_time WHERE id = 1",
                [],
                |row| {
                    Ok(GameTime {
                        day: row.get::<_, i64>(0)? as u32,
                        week: row.get::<_, i64>(1)? as u32,
                        month: row.get::<_, i64>(2)? as u32,
                    })
                },
            )
            .optional()?;
        Ok(time)
    }

    pub fn save_time(&mut self, time: &GameTime) -> Result<(), WorldDbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO world_time (id, day, week, month) VALUES (1, ?1, ?2, ?3)",
            params![time.day as i64, time.week as i64, time.month as i64],
        )?;
        Ok(())
    }

    pub fn load_characters(&self) -> Result<Vec<CharacterRecord>, WorldDbError> {
        let mut skills = self.load_skills()?;
        let mut employment = self.load_employment()?;

        let mut stmt = self.conn.prepare(
            "SELECT character_id, name, level, charisma, energy, max_energy, experience, money, \
             lifecycle, version FROM characters ORDER BY character_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, i64>(9)?,
            ))
        })?;

        let mut characters = Vec::new();
        for row in rows {
            let (id, name, level, charisma, energy, max_energy, experience, money, lifecycle, version) =
                row?;
            let id = CharacterId(id as u32);
            characters.push(CharacterRecord {
                id,
                name,
                profile: CharacterProfile {
                    level: level.max(0) as u32,
                    skills: skills.remove(&id).unwrap_or_default(),
                    charisma: charisma.max(0) as u32,
                    energy: energy.max(0) as u32,
                    max_energy: max_energy.max(0) as u32,
                    experience: experience.max(0) as u64,
                    money,
                },
                employment: CharacterEmploymentState {
                    position: employment.remove(&id),
                },
                lifecycle: lifecycle_from_str(&lifecycle)?,
                version: version.max(0) as u64,
            });
        }
        Ok(characters)
    }

    pub fn load_character(&self, id: CharacterId) -> Result<Option<CharacterRecord>, WorldDbError> {
        Ok(self.load_characters()?.into_iter().find(|c| c.id == id))
    }

    /// Optimistic write. A record whose version no longer matches the stored one is refused.
    pub fn save_character(&mut self, record: &CharacterRecord) -> Result<u64, WorldDbError> {
        let tx = self.conn.transaction()?;
        let stored: Option<i64> = tx
            .query_row(
                "SELECT version FROM characters WHERE character_id = ?1",
                params![record.id.0 as i64],
                |row| row.get(0),
            )
            .optional()?;

        let new_version = match stored {
            None if record.version == 0 => {
                tx.execute(
                    "INSERT INTO characters (character_id, name, level, charisma, energy, max_energy, \
                     experience, money, lifecycle, version) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1)",
                    params![
                        record.id.0 as i64,
                        record.name,
                        record.profile.level as i64,
                        record.profile.charisma as i64,
                        record.profile.energy as i64,
                        record.profile.max_energy as i64,
                        record.profile.experience as i64,
                        record.profile.money,
                        lifecycle_to_str(record.lifecycle),
                    ],
                )?;
                1
            }
            None => return Err(WorldDbError::NotFound(record.id)),
            Some(found) => {
                let found = found.max(0) as u64;
                let changed = tx.execute(
                    "UPDATE characters SET name = ?2, level = ?3, charisma = ?4, energy = ?5, \
                     max_energy = ?6, experience = ?7, money = ?8, lifecycle = ?9, version = version + 1 \
                     WHERE character_id = ?1 AND version = ?10",
                    params![
                        record.id.0 as i64,
                        record.name,
                        record.profile.level as i64,
                        record.profile.charisma as i64,
                        record.profile.energy as i64,
                        record.profile.max_energy as i64,
                        record.profile.experience as i64,
                        record.profile.money,
                        lifecycle_to_str(record.lifecycle),
                        record.version as i64,
                    ],
                )?;
                if changed != 1 {
                    return Err(WorldDbError::StaleWrite {
                        id: record.id,
                        expected: record.version,
                        found,
                    });
                }
                found + 1
            }
        };

        write_skills(&tx, record.id, &record.profile.skills)?;
        write_employment(&tx, record.id, &record.employment)?;
        tx.commit()?;
        debug!(character = %record.id, version = new_version, "character saved");
        Ok(new_version)
    }

    fn load_skills(&self) -> Result<BTreeMap<CharacterId, SkillSet>, WorldDbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT character_id, skill, value FROM character_skills")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        let mut map: BTreeMap<CharacterId, SkillSet> = BTreeMap::new();
        for row in rows {
            let (id, skill, value) = row?;
            map.entry(CharacterId(id as u32))
                .or_default()
                .insert(skill, value.clamp(0, 100) as u32);
        }
        Ok(map)
    }

    fn load_employment(&self) -> Result<BTreeMap<CharacterId, Position>, WorldDbError> {
        let mut stmt = self.conn.prepare(
            "SELECT character_id, job_id, tenure_years, performance_rating, lied_on_resume, \
             shifts_worked, projects_completed, approval, probation_days_remaining, \
             probation_performance_required FROM employment",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, Option<i64>>(8)?,
                row.get::<_, Option<i64>>(9)?,
            ))
        })?;

        let mut map = BTreeMap::new();
        for row in rows {
            let (
                id,
                job_id,
                tenure_years,
                performance,
                lied,
                shifts,
                projects,
                approval,
                probation_days,
                probation_required,
            ) = row?;
            let probation = match (probation_days, probation_required) {
                (Some(days), Some(required)) => Some(Probation {
                    days_remaining: days.max(0) as u32,
                    performance_required: percent(required, "probation_performance_required")?,
                }),
                (None, None) => None,
                _ => {
                    return Err(WorldDbError::InvalidData(format!(
                        "character {} has half a probation record",
                        id
                    )))
                }
            };
            map.insert(
                CharacterId(id as u32),
                Position {
                    job_id: JobTierId(job_id),
                    tenure_years: tenure_years.max(0.0),
                    performance_rating: percent(performance, "performance_rating")?,
                    probation,
                    lied_on_resume: lied != 0,
                    shifts_worked: shifts.max(0) as u32,
                    projects_completed: projects.max(0) as u32,
                    approval: percent(approval, "approval")?,
                },
            );
        }
        Ok(map)
    }
}

fn percent(value: i64, field: &str) -> Result<u8, WorldDbError> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(WorldDbError::InvalidData(format!(
            "{} {} is outside 0..=100",
            field, value
        )))
    }
}

fn write_skills(tx: &Transaction<'_>, id: CharacterId, skills: &SkillSet) -> Result<(), WorldDbError> {
    tx.execute(
        "DELETE FROM character_skills WHERE character_id = ?1",
        params![id.0 as i64],
    )?;
    for (skill, value) in skills.iter() {
        tx.execute(
            "INSERT INTO character_skills (character_id, skill, value) VALUES (?1, ?2, ?3)",
            params![id.0 as i64, skill, *value as i64],
        )?;
    }
    Ok(())
}

fn write_employment(
    tx: &Transaction<'_>,
    id: CharacterId,
    employment: &CharacterEmploymentState,
) -> Result<(), WorldDbError> {
    tx.execute(
        "DELETE FROM employment WHERE character_id = ?1",
        params![id.0 as i64],
    )?;
    let Some(position) = employment.position.as_ref() else {
        return Ok(());
    };
    tx.execute(
        "INSERT INTO employment (character_id, job_id, tenure_years, performance_rating, \
         lied_on_resume, shifts_worked, projects_completed, approval, probation_days_remaining, \
         probation_performance_required) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id.0 as i64,
            position.job_id.as_str(),
            position.tenure_years,
            position.performance_rating as i64,
            position.lied_on_resume as i64,
            position.shifts_worked as i64,
            position.projects_completed as i64,
            position.approval as i64,
            position.probation.map(|p| p.days_remaining as i64),
            position.probation.map(|p| p.performance_required as i64),
        ],
    )?;
    Ok(())
}

fn lifecycle_to_str(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::Unemployed => "unemployed",
        LifecycleState::Applied => "applied",
        LifecycleState::Interviewing => "interviewing",
        LifecycleState::Rejected => "rejected",
        LifecycleState::ProbationHired => "probation_hired",
        LifecycleState::ClearHired => "clear_hired",
        LifecycleState::Employed => "employed",
        LifecycleState::Promoted => "promoted",
        LifecycleState::Resigned => "resigned",
        LifecycleState::Terminated => "terminated",
    }
}

fn lifecycle_from_str(value: &str) -> Result<LifecycleState, WorldDbError> {
    match value {
        "unemployed" => Ok(LifecycleState::Unemployed),
        "applied" => Ok(LifecycleState::Applied),
        "interviewing" => Ok(LifecycleState::Interviewing),
        "rejected" => Ok(LifecycleState::Rejected),
        "probation_hired" => Ok(LifecycleState::ProbationHired),
        "clear_hired" => Ok(LifecycleState::ClearHired),
        "employed" => Ok(LifecycleState::Employed),
        "promoted" => Ok(LifecycleState::Promoted),
        "resigned" => Ok(LifecycleState::Resigned),
        "terminated" => Ok(LifecycleState::Terminated),
        other => Err(WorldDbError::InvalidData(format!(
            "unknown lifecycle state {}",
            other
        ))),
    }
}

impl CharacterRepository for WorldDb {
    fn load_characters(&self) -> Result<Vec<CharacterRecord>, Box<dyn std::error::Error>> {
        Ok(WorldDb::load_characters(self)?)
    }

    fn load_character(
        &self,
        id: CharacterId,
    ) -> Result<Option<CharacterRecord>, Box<dyn std::error::Error>> {
        Ok(WorldDb::load_character(self, id)?)
    }

    fn save_character(
        &mut self,
        record: &CharacterRecord,
    ) -> Result<u64, Box<dyn std::error::Error>> {
        Ok(WorldDb::save_character(self, record)?)
    }

    fn load_time(&self) -> Result<Option<GameTime>, Box<dyn std::error::Error>> {
        Ok(WorldDb::load_time(self)?)
    }

    fn save_time(&mut self, time: &GameTime) -> Result<(), Box<dyn std::error::Error>> {
        Ok(WorldDb::save_time(self, time)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::employment::ProbationTerms;

    fn record() -> CharacterRecord {
        CharacterRecord {
            id: CharacterId(4),
            name: "Vera".to_string(),
            profile: CharacterProfile::default().with_skill("medicine", 22),
            employment: CharacterEmploymentState::employed(Position::new(
                JobTierId::new("med_nurse"),
                70,
                Some(ProbationTerms {
                    days: 15,
                    performance_required: 70,
                }),
                true,
            )),
            lifecycle: LifecycleState::Employed,
            version: 0,
        }
    }

    #[test]
    fn characters_round_trip_with_employment() {
        let mut db = WorldDb::open_in_memory().unwrap();
        let mut saved = record();
        saved.version = db.save_character(&saved).unwrap();
        assert_eq!(saved.version, 1);

        let loaded = db.load_character(CharacterId(4)).unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn stale_version_is_refused() {
        let mut db = WorldDb::open_in_memory().unwrap();
        let first = record();
        let version = db.save_character(&first).unwrap();

        let mut reader_a = first.clone();
        reader_a.version = version;
        let mut reader_b = reader_a.clone();

        reader_a.profile.energy = 40;
        assert_eq!(db.save_character(&reader_a).unwrap(), 2);

        reader_b.profile.energy = 10;
        let err = db.save_character(&reader_b).unwrap_err();
        assert!(matches!(
            err,
            WorldDbError::StaleWrite {
                expected: 1,
                found: 2,
                ..
            }
        ));
        let stored = db.load_character(CharacterId(4)).unwrap().unwrap();
        assert_eq!(stored.profile.energy, 40);
    }

    #[test]
    fn resetting_employment_clears_the_row() {
        let mut db = WorldDb::open_in_memory().unwrap();
        let mut saved = record();
        saved.version = db.save_character(&saved).unwrap();
        saved.employment.reset();
        saved.lifecycle = LifecycleState::Unemployed;
        db.save_character(&saved).unwrap();
        let loaded = db.load_character(CharacterId(4)).unwrap().unwrap();
        assert!(!loaded.employment.is_employed());
        assert_eq!(loaded.lifecycle, LifecycleState::Unemployed);
    }

    #[test]
    fn clock_is_stored() {
        let mut db = WorldDb::open_in_memory().unwrap();
        assert!(db.load_time().unwrap().is_none());
        let mut time = GameTime::default();
        time.advance_day();
        db.save_time(&time).unwrap();
        assert_eq!(db.load_time().unwrap(), Some(time));
    }
}
