use std::collections::BTreeMap;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Skill name to value (0..=100).
pub type SkillSet = BTreeMap<String, u32>;

/// The display name of a character.
#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Attributes the career engine reads from a character.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub level: u32,
    #[serde(default)]
    pub skills: SkillSet,
    pub charisma: u32,
    pub energy: u32,
    pub max_energy: u32,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub money: f64,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            level: 1,
            skills: SkillSet::new(),
            charisma: 10,
            energy: 100,
            max_energy: 100,
            experience: 0,
            money: 0.0,
        }
    }
}

impl CharacterProfile {
    /// True value of a skill; untrained skills read as zero.
    pub fn skill(&self, name: &str) -> u32 {
        self.skills.get(name).copied().unwrap_or(0)
    }

    pub fn with_skill(mut self, name: &str, value: u32) -> Self {
        self.skills.insert(name.to_string(), value.min(100));
        self
    }

    pub fn recover_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_skill_reads_zero() {
        let profile = CharacterProfile::default().with_skill("hacking", 30);
        assert_eq!(profile.skill("hacking"), 30);
        assert_eq!(profile.skill("stealth"), 0);
    }

    #[test]
    fn energy_recovery_is_capped() {
        let mut profile = CharacterProfile {
            energy: 90,
            ..Default::default()
        };
        profile.recover_energy(25);
        assert_eq!(profile.energy, 100);
    }
}
