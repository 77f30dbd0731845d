//! The mutable ledger owned by the engine.
//!
//! Every field carries `#[serde(default)]` at the struct level, so a save
//! written by an older build that lacks a field loads with that field empty
//! rather than failing.

use crate::combo::ComboState;
use crate::daily::DailyState;
use crate::events::EventState;
use crate::prestige::PrestigeRecord;
use crate::quests::ActiveQuest;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// All-time statistics. Never reset by ascension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub all_time_evidence: f64,
    pub clicks: u64,
    pub critical_hits: u64,
    pub bursts: u64,
    pub quests_succeeded: u64,
    pub quests_failed: u64,
    pub bonus_targets_claimed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceState {
    /// Game clock in seconds of simulated play time.
    pub clock: f64,

    pub evidence: f64,
    /// Evidence earned since the last ascension.
    pub total_evidence_earned: f64,
    pub tinfoil: u64,
    pub illuminati_tokens: u64,

    pub generators: BTreeMap<String, u32>,
    pub upgrades: BTreeSet<String>,
    pub conspiracies: BTreeSet<String>,
    pub shop_items: BTreeSet<String>,
    pub achievements: BTreeSet<String>,
    pub skills: BTreeSet<String>,

    pub prestige: PrestigeRecord,
    pub combo: ComboState,
    pub events: EventState,
    pub active_quests: BTreeMap<String, ActiveQuest>,
    /// Believers destroyed by failed high-risk quests this run.
    pub believers_lost: u64,

    pub daily: DailyState,
    pub lifetime: LifetimeStats,

    /// Fractional auto-clicks carried between advances.
    pub auto_click_progress: f64,
    /// Unix timestamp of the last save, used for offline progress.
    pub last_save_time: i64,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned(&self, generator_id: &str) -> u32 {
        self.generators.get(generator_id).copied().unwrap_or(0)
    }

    /// Credit earned evidence to the balance and to every counter that
    /// tracks earnings.
    pub fn earn(&mut self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.evidence += amount;
        self.total_evidence_earned += amount;
        self.lifetime.all_time_evidence += amount;
        self.daily.counters.evidence_earned += amount;
    }

    pub fn committed_believers(&self) -> u64 {
        crate::quests::logic::committed_believers(&self.active_quests)
    }

    pub fn total_generators(&self) -> u64 {
        self.generators.values().map(|&n| n as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earn_updates_all_counters() {
        let mut state = ResourceState::new();
        state.earn(12.5);

        assert_eq!(state.evidence, 12.5);
        assert_eq!(state.total_evidence_earned, 12.5);
        assert_eq!(state.lifetime.all_time_evidence, 12.5);
        assert_eq!(state.daily.counters.evidence_earned, 12.5);
    }

    #[test]
    fn test_earn_ignores_non_positive() {
        let mut state = ResourceState::new();
        state.earn(0.0);
        state.earn(-3.0);
        assert_eq!(state, ResourceState::new());
    }

    #[test]
    fn test_missing_fields_default() {
        let state: ResourceState = serde_json::from_str(r#"{ "evidence": 42.0 }"#).unwrap();
        assert_eq!(state.evidence, 42.0);
        assert!(state.generators.is_empty());
        assert!(state.active_quests.is_empty());
        assert_eq!(state.prestige, PrestigeRecord::default());
    }

    #[test]
    fn test_owned_defaults_to_zero() {
        let mut state = ResourceState::new();
        state.generators.insert("blogger".to_string(), 3);
        assert_eq!(state.owned("blogger"), 3);
        assert_eq!(state.owned("podcaster"), 0);
    }
}
