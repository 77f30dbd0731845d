//! Engine tunables.
//!
//! Every field defaults to the matching constant in [`super::constants`].
//! The struct deserializes with `#[serde(default)]`, so a JSON file only
//! needs to name the values it overrides.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    pub fill_per_click: f64,
    pub decay_delay_seconds: f64,
    pub decay_per_second: f64,
    pub streak_reset_seconds: f64,
    /// Clicks worth of power paid out by a burst.
    pub burst_clicks: f64,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            fill_per_click: COMBO_FILL_PER_CLICK,
            decay_delay_seconds: COMBO_DECAY_DELAY_SECONDS,
            decay_per_second: COMBO_DECAY_PER_SECOND,
            streak_reset_seconds: COMBO_STREAK_RESET_SECONDS,
            burst_clicks: COMBO_BURST_CLICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub buff_spawn_chance: f64,
    pub buff_duration_seconds: f64,
    pub buff_click_multiplier: f64,
    /// Amplification applied to combo bursts while the buff is active.
    pub buff_burst_multiplier: f64,
    pub bonus_target_spawn_chance: f64,
    pub bonus_target_lifetime_seconds: f64,
    pub bonus_target_eps_seconds: f64,
    pub bonus_target_tinfoil: u64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            buff_spawn_chance: BUFF_SPAWN_CHANCE,
            buff_duration_seconds: BUFF_DURATION_SECONDS,
            buff_click_multiplier: BUFF_CLICK_MULTIPLIER,
            buff_burst_multiplier: BUFF_BURST_MULTIPLIER,
            bonus_target_spawn_chance: BONUS_TARGET_SPAWN_CHANCE,
            bonus_target_lifetime_seconds: BONUS_TARGET_LIFETIME_SECONDS,
            bonus_target_eps_seconds: BONUS_TARGET_EPS_SECONDS,
            bonus_target_tinfoil: BONUS_TARGET_TINFOIL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub success_cap: f64,
    pub low_risk_fail_fraction: f64,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            success_cap: QUEST_SUCCESS_CAP,
            low_risk_fail_fraction: LOW_RISK_FAIL_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    pub efficiency: f64,
    pub max_seconds: i64,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            efficiency: OFFLINE_EFFICIENCY,
            max_seconds: MAX_OFFLINE_SECONDS,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evidence earned this run required to ascend.
    pub prestige_threshold: f64,
    /// Tick length that event probabilities are expressed against.
    pub base_tick_seconds: f64,
    pub max_auto_clicks_per_advance: u32,
    pub crit_range: (f64, f64),
    pub wide_crit_range: (f64, f64),
    pub combo: ComboConfig,
    pub events: EventConfig,
    pub quests: QuestConfig,
    pub offline: OfflineConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prestige_threshold: PRESTIGE_THRESHOLD,
            base_tick_seconds: BASE_TICK_SECONDS,
            max_auto_clicks_per_advance: MAX_AUTO_CLICKS_PER_ADVANCE,
            crit_range: CRIT_MULTIPLIER_RANGE,
            wide_crit_range: WIDE_CRIT_MULTIPLIER_RANGE,
            combo: ComboConfig::default(),
            events: EventConfig::default(),
            quests: QuestConfig::default(),
            offline: OfflineConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load overrides from a JSON file.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
