//! Threshold checks over the ledger.

use crate::catalog::{AchievementCondition, AchievementDef, Catalog};
use crate::core::resource_state::ResourceState;
use log::info;

/// Current value and target of an achievement's condition.
pub fn progress(condition: &AchievementCondition, state: &ResourceState) -> (f64, f64) {
    match *condition {
        AchievementCondition::LifetimeEvidence(target) => (state.lifetime.all_time_evidence, target),
        AchievementCondition::LifetimeClicks(target) => (state.lifetime.clicks as f64, target as f64),
        AchievementCondition::GeneratorOwned { generator, count } => {
            (state.owned(generator) as f64, count as f64)
        }
        AchievementCondition::ConspiraciesProven(target) => {
            (state.conspiracies.len() as f64, target as f64)
        }
        AchievementCondition::PlayTime(seconds) => (state.clock, seconds),
    }
}

pub fn condition_met(condition: &AchievementCondition, state: &ResourceState) -> bool {
    let (current, target) = progress(condition, state);
    current >= target
}

/// Unlock an achievement. Returns true if newly unlocked; the reward is only
/// paid on that first unlock.
pub fn unlock(state: &mut ResourceState, def: &AchievementDef) -> bool {
    if !state.achievements.insert(def.id.to_string()) {
        return false;
    }
    state.tinfoil += def.tinfoil_reward;
    info!("Achievement unlocked: {}", def.name);
    true
}

/// Check every locked achievement and unlock those whose condition holds.
/// Returns the ids unlocked by this call.
pub fn evaluate(state: &mut ResourceState, catalog: &dyn Catalog) -> Vec<&'static str> {
    let mut unlocked = Vec::new();
    for def in catalog.achievements() {
        if state.achievements.contains(def.id) {
            continue;
        }
        if condition_met(&def.condition, state) && unlock(state, def) {
            unlocked.push(def.id);
        }
    }
    unlocked
}

/// Fraction of the catalog's achievements unlocked, in percent.
pub fn unlock_percentage(state: &ResourceState, catalog: &dyn Catalog) -> f64 {
    let total = catalog.achievements().len();
    if total == 0 {
        return 0.0;
    }
    let unlocked = catalog
        .achievements()
        .iter()
        .filter(|a| state.achievements.contains(a.id))
        .count();
    unlocked as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DefaultCatalog;

    #[test]
    fn test_nothing_unlocks_on_fresh_state() {
        let mut state = ResourceState::new();
        assert!(evaluate(&mut state, &DefaultCatalog).is_empty());
        assert_eq!(state.tinfoil, 0);
    }

    #[test]
    fn test_first_click_unlocks_once() {
        let mut state = ResourceState::new();
        state.lifetime.clicks = 1;

        let first = evaluate(&mut state, &DefaultCatalog);
        assert!(first.contains(&"first_click"));
        let tinfoil = state.tinfoil;

        let second = evaluate(&mut state, &DefaultCatalog);
        assert!(second.is_empty());
        assert_eq!(state.tinfoil, tinfoil);
    }

    #[test]
    fn test_lifetime_evidence_survives_run_reset() {
        let mut state = ResourceState::new();
        state.lifetime.all_time_evidence = 2_000.0;
        state.total_evidence_earned = 0.0;

        let unlocked = evaluate(&mut state, &DefaultCatalog);
        assert!(unlocked.contains(&"evidence_1k"));
    }

    #[test]
    fn test_generator_condition() {
        let condition = AchievementCondition::GeneratorOwned {
            generator: "blogger",
            count: 10,
        };
        let mut state = ResourceState::new();
        state.generators.insert("blogger".to_string(), 9);
        assert!(!condition_met(&condition, &state));
        state.generators.insert("blogger".to_string(), 10);
        assert!(condition_met(&condition, &state));
    }

    #[test]
    fn test_play_time_uses_game_clock() {
        let condition = AchievementCondition::PlayTime(3_600.0);
        let mut state = ResourceState::new();
        state.clock = 3_599.0;
        assert_eq!(progress(&condition, &state), (3_599.0, 3_600.0));
        state.clock = 3_600.0;
        assert!(condition_met(&condition, &state));
    }

    #[test]
    fn test_unlock_percentage() {
        let mut state = ResourceState::new();
        assert_eq!(unlock_percentage(&state, &DefaultCatalog), 0.0);
        for def in DefaultCatalog.achievements() {
            state.achievements.insert(def.id.to_string());
        }
        assert!((unlock_percentage(&state, &DefaultCatalog) - 100.0).abs() < 1e-9);
    }
}
