use std::collections::{BTreeMap, HashMap, HashSet};

use crate::content::repository::{JobRepository, JobTier, JobTierId};
use crate::data::DataError;

/// In-memory job catalog, validated on construction.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    tiers: BTreeMap<JobTierId, JobTier>,
}

impl JobCatalog {
    pub fn from_tiers(tiers: Vec<JobTier>) -> Result<Self, DataError> {
        validate_tiers(&tiers)?;
        Ok(Self {
            tiers: tiers.into_iter().map(|t| (t.id.clone(), t)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, id: &JobTierId) -> Option<&JobTier> {
        self.tiers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobTier> {
        self.tiers.values()
    }

    /// Entry tiers: the first rung of every ladder.
    pub fn entry_tiers(&self) -> Vec<&JobTier> {
        let targets: HashSet<&JobTierId> = self
            .tiers
            .values()
            .filter_map(|t| t.next_tier_id.as_ref())
            .collect();
        self.tiers
            .values()
            .filter(|t| !targets.contains(&t.id))
            .collect()
    }
}

impl JobRepository for JobCatalog {
    fn job_tier(&self, id: &JobTierId) -> Result<Option<JobTier>, Box<dyn std::error::Error>> {
        Ok(self.tiers.get(id).cloned())
    }

    fn tiers(&self) -> Result<Vec<JobTier>, Box<dyn std::error::Error>> {
        Ok(self.tiers.values().cloned().collect())
    }
}

/// Ladders are chains: unique ids, resolvable links, one predecessor per tier, no cycles.
pub fn validate_tiers(tiers: &[JobTier]) -> Result<(), DataError> {
    let mut ids = HashSet::new();
    for tier in tiers {
        if !ids.insert(&tier.id) {
            return Err(DataError::Validation(format!("duplicate job tier {}", tier.id)));
        }
        if tier.min_performance > 100 {
            return Err(DataError::Validation(format!(
                "job tier {} min_performance {} exceeds 100",
                tier.id, tier.min_performance
            )));
        }
        if let Some((skill, min)) = tier.required_skills.iter().find(|(_, min)| **min > 100) {
            return Err(DataError::Validation(format!(
                "job tier {} requires {} {} which exceeds 100",
                tier.id, skill, min
            )));
        }
        if tier.years_for_promotion < 0.0 || tier.annual_salary < 0.0 {
            return Err(DataError::Validation(format!(
                "job tier {} has negative salary or promotion years",
                tier.id
            )));
        }
    }

    let mut predecessors: HashMap<&JobTierId, &JobTierId> = HashMap::new();
    for tier in tiers {
        let Some(next) = tier.next_tier_id.as_ref() else {
            continue;
        };
        if !ids.contains(next) {
            return Err(DataError::Validation(format!(
                "job tier {} points at unknown tier {}",
                tier.id, next
            )));
        }
        if let Some(existing) = predecessors.insert(next, &tier.id) {
            return Err(DataError::Validation(format!(
                "job tier {} is promoted into from both {} and {}",
                next, existing, tier.id
            )));
        }
    }

    let links: HashMap<&JobTierId, &JobTierId> = tiers
        .iter()
        .filter_map(|t| t.next_tier_id.as_ref().map(|next| (&t.id, next)))
        .collect();
    for tier in tiers {
        let mut cursor = &tier.id;
        let mut steps = 0;
        while let Some(next) = links.get(cursor) {
            steps += 1;
            if steps > tiers.len() {
                return Err(DataError::Validation(format!(
                    "career ladder through {} cycles",
                    tier.id
                )));
            }
            cursor = next;
        }
    }

    Ok(())
}

/// Walk back to the entry tier of `id`'s ladder, then forward to the top.
pub fn assemble_ladder(tiers: &[JobTier], id: &JobTierId) -> Vec<JobTier> {
    let by_id: HashMap<&JobTierId, &JobTier> = tiers.iter().map(|t| (&t.id, t)).collect();
    if !by_id.contains_key(id) {
        return Vec::new();
    }
    let previous: HashMap<&JobTierId, &JobTierId> = tiers
        .iter()
        .filter_map(|t| t.next_tier_id.as_ref().map(|next| (next, &t.id)))
        .collect();

    let mut root = id;
    let mut guard = 0;
    while let Some(prev) = previous.get(root) {
        guard += 1;
        if guard > tiers.len() {
            break;
        }
        root = prev;
    }

    let mut ladder = Vec::new();
    let mut cursor = by_id.get(root).copied();
    while let Some(tier) = cursor {
        if ladder.len() >= tiers.len() {
            break;
        }
        ladder.push(tier.clone());
        cursor = tier
            .next_tier_id
            .as_ref()
            .and_then(|next| by_id.get(next).copied());
    }
    ladder
}
