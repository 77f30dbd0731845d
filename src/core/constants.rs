// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const BASE_TICK_SECONDS: f64 = TICK_INTERVAL_MS as f64 / 1000.0;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Prestige
pub const PRESTIGE_THRESHOLD: f64 = 50_000.0;

// Clicking
pub const BASE_CLICK_POWER: f64 = 1.0;
pub const CRIT_MULTIPLIER_RANGE: (f64, f64) = (5.0, 10.0);
pub const WIDE_CRIT_MULTIPLIER_RANGE: (f64, f64) = (10.0, 15.0);
pub const MAX_AUTO_CLICKS_PER_ADVANCE: u32 = 10_000;

// Combo meter
pub const COMBO_FILL_PER_CLICK: f64 = 0.08;
pub const COMBO_DECAY_DELAY_SECONDS: f64 = 2.0;
pub const COMBO_DECAY_PER_SECOND: f64 = 0.1;
pub const COMBO_STREAK_RESET_SECONDS: f64 = 10.0;
pub const COMBO_BURST_CLICKS: f64 = 10.0;

// Random events (probabilities are per base tick)
pub const BUFF_SPAWN_CHANCE: f64 = 0.0005;
pub const BUFF_DURATION_SECONDS: f64 = 30.0;
pub const BUFF_CLICK_MULTIPLIER: f64 = 5.0;
pub const BUFF_BURST_MULTIPLIER: f64 = 10.0;
pub const BONUS_TARGET_SPAWN_CHANCE: f64 = 0.001;
pub const BONUS_TARGET_LIFETIME_SECONDS: f64 = 8.0;
pub const BONUS_TARGET_EPS_SECONDS: f64 = 60.0;
pub const BONUS_TARGET_TINFOIL: u64 = 2;

// Quests
pub const QUEST_SUCCESS_CAP: f64 = 0.95;
pub const LOW_RISK_FAIL_FRACTION: f64 = 0.25;

// Purchasing
pub const MAX_BULK_PURCHASE: u32 = 1_000;

// Offline progression
pub const OFFLINE_EFFICIENCY: f64 = 0.5;
pub const MAX_OFFLINE_SECONDS: i64 = 24 * 60 * 60;

// Save file format
pub const SAVE_VERSION_MAGIC: u64 = 0x434F_4E53_5049_5201; // "CONSPIR" + version 1
