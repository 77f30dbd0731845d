//! Daily challenge rollover, progress tracking and claiming.

use super::types::{DailyCounters, DailyState, StoredChallenge};
use crate::catalog::Catalog;
use crate::core::error::ActionError;
use chrono::{Datelike, NaiveDate};
use log::info;

/// Seed for a calendar day, e.g. 2024-03-07 -> 20240307.
pub fn date_seed(day: NaiveDate) -> u64 {
    let year = day.year().max(0) as u64;
    year * 10_000 + day.month() as u64 * 100 + day.day() as u64
}

/// Record that the caller has observed `today`.
///
/// On a new day the batch is regenerated from the catalog and the counters
/// are zeroed. Observing the same day again, or an earlier one, does
/// nothing. Returns true when a new batch was generated.
pub fn observe_day(daily: &mut DailyState, today: NaiveDate, catalog: &dyn Catalog) -> bool {
    if daily.day.is_some_and(|day| day >= today) {
        return false;
    }

    let seed = date_seed(today);
    daily.challenges = catalog
        .daily_challenges(seed)
        .into_iter()
        .map(StoredChallenge::from_def)
        .collect();
    daily.counters = DailyCounters::default();
    daily.day = Some(today);

    info!(
        "Daily challenges for {} generated ({} challenges)",
        today,
        daily.challenges.len()
    );
    true
}

/// Recompute progress from the counters and flip `completed` where the
/// target is reached. Returns ids that completed during this call.
pub fn refresh_progress(daily: &mut DailyState) -> Vec<String> {
    let mut newly_completed = Vec::new();
    let counters = &daily.counters;

    for challenge in &mut daily.challenges {
        if challenge.completed {
            continue;
        }
        challenge.progress = counters.value(challenge.metric).min(challenge.target);
        if challenge.progress >= challenge.target {
            challenge.completed = true;
            newly_completed.push(challenge.id.clone());
        }
    }

    newly_completed
}

/// Mark a completed challenge as claimed and return its tinfoil reward.
pub fn claim(daily: &mut DailyState, id: &str) -> Result<u64, ActionError> {
    let challenge = daily
        .challenges
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;

    if !challenge.completed {
        return Err(ActionError::NotEligible("challenge not completed"));
    }
    if challenge.claimed {
        return Err(ActionError::NotEligible("challenge already claimed"));
    }

    challenge.claimed = true;
    Ok(challenge.tinfoil_reward)
}
