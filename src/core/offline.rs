//! Offline progression.
//!
//! Earnings while the game was closed are a pure function of the elapsed
//! wall-clock time and the EPS at save time. The engine applies the result;
//! the game clock does not move.

use super::config::OfflineConfig;

/// Permanent flags that change offline earnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfflineFlags {
    pub full_efficiency: bool,
}

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    /// Seconds actually credited after the cap.
    pub credited_seconds: i64,
    pub evidence_earned: f64,
    pub efficiency: f64,
}

impl OfflineReport {
    pub fn was_capped(&self) -> bool {
        self.elapsed_seconds > self.credited_seconds
    }
}

pub fn efficiency(flags: OfflineFlags, config: &OfflineConfig) -> f64 {
    if flags.full_efficiency {
        1.0
    } else {
        config.efficiency
    }
}

/// Evidence earned over `elapsed_seconds` away at `eps`.
///
/// Negative elapsed time (clock skew) earns nothing; anything beyond the
/// configured cap is ignored.
pub fn calculate_offline_earnings(
    elapsed_seconds: i64,
    eps: f64,
    flags: OfflineFlags,
    config: &OfflineConfig,
) -> f64 {
    if elapsed_seconds <= 0 || eps <= 0.0 {
        return 0.0;
    }
    let capped_seconds = elapsed_seconds.min(config.max_seconds.max(0));
    capped_seconds as f64 * eps * efficiency(flags, config)
}

/// Build the full report for an absence.
pub fn offline_report(
    elapsed_seconds: i64,
    eps: f64,
    flags: OfflineFlags,
    config: &OfflineConfig,
) -> OfflineReport {
    if elapsed_seconds <= 0 {
        return OfflineReport::default();
    }
    OfflineReport {
        elapsed_seconds,
        credited_seconds: elapsed_seconds.min(config.max_seconds.max(0)),
        evidence_earned: calculate_offline_earnings(elapsed_seconds, eps, flags, config),
        efficiency: efficiency(flags, config),
    }
}
