//! Random event spawning and expiry.

use super::types::{ActiveBuff, BonusTarget, EventChange, EventState};
use crate::core::config::EventConfig;
use rand::Rng;

/// Probability of at least one success in `delta / base_tick` trials of
/// per-tick probability `per_tick`.
///
/// Exact for whole ticks, continuous in between and never above 1, so the
/// expected spawn rate per second does not depend on the step size.
pub fn scaled_chance(per_tick: f64, delta: f64, base_tick: f64) -> f64 {
    if per_tick <= 0.0 || delta <= 0.0 || base_tick <= 0.0 {
        return 0.0;
    }
    if per_tick >= 1.0 {
        return 1.0;
    }
    let ticks = delta / base_tick;
    (1.0 - (1.0 - per_tick).powf(ticks)).clamp(0.0, 1.0)
}

/// Drop every event whose expiry is at or before `now`.
pub fn expire_events(events: &mut EventState, now: f64) -> Vec<EventChange> {
    let mut changes = Vec::new();

    if events.buff.as_ref().is_some_and(|b| b.expires_at <= now) {
        events.buff = None;
        changes.push(EventChange::BuffExpired);
    }
    if events
        .bonus_target
        .as_ref()
        .is_some_and(|t| t.expires_at <= now)
    {
        events.bonus_target = None;
        changes.push(EventChange::BonusTargetExpired);
    }

    changes
}

/// Run the independent spawn trials for a step of `delta` seconds ending at
/// `now`. Each slot is only rolled while empty.
pub fn roll_spawns<R: Rng>(
    events: &mut EventState,
    now: f64,
    delta: f64,
    base_tick: f64,
    config: &EventConfig,
    rng: &mut R,
) -> Vec<EventChange> {
    let mut changes = Vec::new();
    if delta <= 0.0 {
        return changes;
    }

    if events.buff.is_none() {
        let chance = scaled_chance(config.buff_spawn_chance, delta, base_tick);
        if rng.gen::<f64>() < chance {
            let expires_at = now + config.buff_duration_seconds;
            events.buff = Some(ActiveBuff {
                started_at: now,
                expires_at,
            });
            changes.push(EventChange::BuffStarted { expires_at });
        }
    }

    if events.bonus_target.is_none() {
        let chance = scaled_chance(config.bonus_target_spawn_chance, delta, base_tick);
        if rng.gen::<f64>() < chance {
            let x = rng.gen::<f64>();
            let y = rng.gen::<f64>();
            let expires_at = now + config.bonus_target_lifetime_seconds;
            events.bonus_target = Some(BonusTarget { x, y, expires_at });
            changes.push(EventChange::BonusTargetSpawned { x, y, expires_at });
        }
    }

    changes
}

/// Consume the live bonus target. A second call, or a call after expiry,
/// yields `None`.
pub fn take_bonus_target(events: &mut EventState, now: f64) -> Option<BonusTarget> {
    if !events.bonus_target_live(now) {
        return None;
    }
    events.bonus_target.take()
}
