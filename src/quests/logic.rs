//! Quest scheduling and resolution.

use super::types::{ActiveQuest, QuestOutcome};
use crate::catalog::{QuestDef, QuestRisk};
use crate::core::config::QuestConfig;
use crate::core::error::ActionError;
use rand::Rng;
use std::collections::BTreeMap;

/// Believers currently held by active quests.
pub fn committed_believers(active: &BTreeMap<String, ActiveQuest>) -> u64 {
    active.values().map(|q| q.believers_committed).sum()
}

/// Start `def` at game time `now`, committing its believer cost.
///
/// Fails without touching `active` when the quest is already running or
/// fewer than `believer_cost` believers are free.
pub fn begin_quest(
    active: &mut BTreeMap<String, ActiveQuest>,
    def: &QuestDef,
    now: f64,
    available_believers: u64,
) -> Result<ActiveQuest, ActionError> {
    if active.contains_key(def.id) {
        return Err(ActionError::AlreadyActive(def.id.to_string()));
    }
    if available_believers < def.believer_cost {
        return Err(ActionError::InsufficientBelievers {
            id: def.id.to_string(),
            needed: def.believer_cost,
            available: available_believers,
        });
    }

    let quest = ActiveQuest {
        quest_id: def.id.to_string(),
        started_at: now,
        ends_at: now + def.duration_seconds,
        believers_committed: def.believer_cost,
    };
    active.insert(def.id.to_string(), quest.clone());
    Ok(quest)
}

/// Success chance: base plus bonuses, capped, unless success is guaranteed.
pub fn success_chance(def: &QuestDef, bonus: f64, guaranteed: bool, config: &QuestConfig) -> f64 {
    if guaranteed {
        return 1.0;
    }
    (def.success_chance + bonus).clamp(0.0, config.success_cap)
}

/// Ids of quests whose duration has elapsed at `now`, in id order.
pub fn due_quests(active: &BTreeMap<String, ActiveQuest>, now: f64) -> Vec<String> {
    active
        .values()
        .filter(|q| q.is_due(now))
        .map(|q| q.quest_id.clone())
        .collect()
}

/// Roll the outcome of a finished quest.
///
/// `eps` is the fully modified evidence per second at resolution time and
/// `reward_multiplier` the product of permanent reward multipliers.
pub fn resolve_quest<R: Rng>(
    quest: &ActiveQuest,
    def: &QuestDef,
    chance: f64,
    eps: f64,
    reward_multiplier: f64,
    config: &QuestConfig,
    rng: &mut R,
) -> QuestOutcome {
    let success = chance >= 1.0 || rng.gen::<f64>() < chance;
    let committed = quest.believers_committed;

    if success {
        let evidence = (def.evidence_reward + eps * def.evidence_multiplier) * reward_multiplier;
        return QuestOutcome {
            quest_id: quest.quest_id.clone(),
            success: true,
            evidence,
            tinfoil: def.tinfoil_reward,
            believers_released: committed,
            believers_lost: 0,
        };
    }

    let (evidence, believers_released, believers_lost) = match def.risk {
        QuestRisk::Low => (def.evidence_reward * config.low_risk_fail_fraction, committed, 0),
        QuestRisk::Medium => (0.0, committed, 0),
        QuestRisk::High => (0.0, 0, committed),
    };

    QuestOutcome {
        quest_id: quest.quest_id.clone(),
        success: false,
        evidence,
        tinfoil: 0,
        believers_released,
        believers_lost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quest(risk: QuestRisk) -> QuestDef {
        QuestDef {
            id: "stakeout_test",
            name: "Probe",
            believer_cost: 10,
            duration_seconds: 60.0,
            success_chance: 0.5,
            risk,
            evidence_reward: 1_000.0,
            evidence_multiplier: 10.0,
            tinfoil_reward: 3,
        }
    }

    fn started(def: &QuestDef) -> ActiveQuest {
        let mut active = BTreeMap::new();
        begin_quest(&mut active, def, 0.0, 100).unwrap()
    }

    #[test]
    fn test_begin_commits_believers() {
        let def = quest(QuestRisk::Low);
        let mut active = BTreeMap::new();
        let q = begin_quest(&mut active, &def, 5.0, 10).unwrap();

        assert_eq!(q.ends_at, 65.0);
        assert_eq!(committed_believers(&active), 10);
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let def = quest(QuestRisk::Low);
        let mut active = BTreeMap::new();
        begin_quest(&mut active, &def, 0.0, 100).unwrap();
        let before = active.clone();

        let err = begin_quest(&mut active, &def, 1.0, 100).unwrap_err();

        assert_eq!(err, ActionError::AlreadyActive("stakeout_test".to_string()));
        assert_eq!(active, before);
    }

    #[test]
    fn test_begin_without_believers_is_rejected() {
        let def = quest(QuestRisk::Low);
        let mut active = BTreeMap::new();
        let err = begin_quest(&mut active, &def, 0.0, 9).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientBelievers { needed: 10, available: 9, .. }));
        assert!(active.is_empty());
    }

    #[test]
    fn test_success_chance_cap_and_override() {
        let config = QuestConfig::default();
        let def = quest(QuestRisk::Low);
        assert!((success_chance(&def, 0.1, false, &config) - 0.6).abs() < 1e-12);
        assert_eq!(success_chance(&def, 0.9, false, &config), config.success_cap);
        assert_eq!(success_chance(&def, 0.0, true, &config), 1.0);
    }

    #[test]
    fn test_due_quests_uses_fixed_end() {
        let def = quest(QuestRisk::Low);
        let mut active = BTreeMap::new();
        begin_quest(&mut active, &def, 0.0, 100).unwrap();

        assert!(due_quests(&active, 59.9).is_empty());
        assert_eq!(due_quests(&active, 60.0), vec!["stakeout_test".to_string()]);
    }

    #[test]
    fn test_success_reward_includes_eps_term() {
        let def = quest(QuestRisk::High);
        let q = started(&def);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let outcome = resolve_quest(&q, &def, 1.0, 50.0, 2.0, &QuestConfig::default(), &mut rng);

        assert!(outcome.success);
        assert!((outcome.evidence - (1_000.0 + 500.0) * 2.0).abs() < 1e-9);
        assert_eq!(outcome.tinfoil, 3);
        assert_eq!(outcome.believers_released, 10);
        assert_eq!(outcome.believers_lost, 0);
    }

    #[test]
    fn test_failure_by_risk_tier() {
        let config = QuestConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let low = quest(QuestRisk::Low);
        let outcome = resolve_quest(&started(&low), &low, 0.0, 50.0, 1.0, &config, &mut rng);
        assert!(!outcome.success);
        assert!((outcome.evidence - 1_000.0 * config.low_risk_fail_fraction).abs() < 1e-9);
        assert_eq!((outcome.believers_released, outcome.believers_lost), (10, 0));

        let medium = quest(QuestRisk::Medium);
        let outcome = resolve_quest(&started(&medium), &medium, 0.0, 50.0, 1.0, &config, &mut rng);
        assert_eq!(outcome.evidence, 0.0);
        assert_eq!((outcome.believers_released, outcome.believers_lost), (10, 0));

        let high = quest(QuestRisk::High);
        let outcome = resolve_quest(&started(&high), &high, 0.0, 50.0, 1.0, &config, &mut rng);
        assert_eq!(outcome.evidence, 0.0);
        assert_eq!(outcome.tinfoil, 0);
        assert_eq!((outcome.believers_released, outcome.believers_lost), (0, 10));
    }

    #[test]
    fn test_outcomes_follow_chance_statistically() {
        let def = quest(QuestRisk::Medium);
        let q = started(&def);
        let config = QuestConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let successes = (0..10_000)
            .filter(|_| resolve_quest(&q, &def, 0.3, 0.0, 1.0, &config, &mut rng).success)
            .count();

        assert!((2_700..3_300).contains(&successes), "got {}", successes);
    }
}
