use std::collections::BTreeMap;

use crate::components::identity::CharacterProfile;

/// Skills as claimed on a résumé; may exceed the truth.
pub type DeclaredSkills = BTreeMap<String, u32>;

/// Claims are read on the same 0..=100 scale as real skills.
const MAX_CLAIM: u32 = 100;

/// How far the résumé overstates the character, 0..=100.
///
/// Mean over declared skills of `max(0, declared - actual)`, doubled so an average
/// overstatement of 50 points reads as maximum suspicion.
pub fn suspicion_level(declared: &DeclaredSkills, profile: &CharacterProfile) -> u8 {
    if declared.is_empty() {
        return 0;
    }
    let excess: u64 = declared
        .iter()
        .map(|(name, claimed)| {
            u64::from((*claimed).min(MAX_CLAIM).saturating_sub(profile.skill(name)))
        })
        .sum();
    let mean = excess as f64 / declared.len() as f64;
    (mean * 2.0).round().clamp(0.0, 100.0) as u8
}

/// Mean of the character's true values for the skills the résumé mentions.
pub fn declared_skill_average(declared: &DeclaredSkills, profile: &CharacterProfile) -> Option<f64> {
    if declared.is_empty() {
        return None;
    }
    let total: u64 = declared.keys().map(|name| u64::from(profile.skill(name))).sum();
    Some(total as f64 / declared.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(pairs: &[(&str, u32)]) -> DeclaredSkills {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn truthful_resume_is_not_suspicious() {
        let profile = CharacterProfile::default().with_skill("hacking", 40);
        assert_eq!(suspicion_level(&declared(&[("hacking", 40)]), &profile), 0);
        assert_eq!(suspicion_level(&declared(&[("hacking", 10)]), &profile), 0);
        assert_eq!(suspicion_level(&DeclaredSkills::new(), &profile), 0);
    }

    #[test]
    fn overstatement_scales_and_caps() {
        let profile = CharacterProfile::default().with_skill("hacking", 10);
        assert_eq!(suspicion_level(&declared(&[("hacking", 30)]), &profile), 40);
        assert_eq!(
            suspicion_level(&declared(&[("hacking", 30), ("stealth", 0)]), &profile),
            20
        );
        assert_eq!(suspicion_level(&declared(&[("medicine", 100)]), &profile), 100);
    }

    #[test]
    fn absurd_claims_read_as_maximum_suspicion() {
        let profile = CharacterProfile::default();
        let huge = declared(&[
            ("combat", 1_431_655_766),
            ("hacking", 1_431_655_766),
            ("stealth", 1_431_655_766),
        ]);
        assert_eq!(suspicion_level(&huge, &profile), 100);
        assert_eq!(suspicion_level(&declared(&[("hacking", u32::MAX)]), &profile), 100);

        let trained = CharacterProfile::default().with_skill("hacking", 100);
        assert_eq!(suspicion_level(&declared(&[("hacking", u32::MAX)]), &trained), 0);
    }

    #[test]
    fn declared_average_uses_true_values() {
        let profile = CharacterProfile::default()
            .with_skill("hacking", 10)
            .with_skill("stealth", 30);
        let avg = declared_skill_average(&declared(&[("hacking", 90), ("stealth", 90)]), &profile);
        assert_eq!(avg, Some(20.0));
        assert_eq!(declared_skill_average(&DeclaredSkills::new(), &profile), None);
    }
}
