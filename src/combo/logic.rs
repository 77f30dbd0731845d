//! Combo meter transitions.
//!
//! The payout of a burst depends on click power at burst time, so it is
//! computed by the engine; this module only decides *when* a burst fires.

use super::types::ComboState;
use crate::core::config::ComboConfig;

/// Feed one manual click into the meter at game time `now`.
///
/// Returns `true` when the click filled the meter and a burst fired. The
/// crossing is consumed immediately: meter and streak are back at zero.
pub fn register_click(combo: &mut ComboState, now: f64, config: &ComboConfig) -> bool {
    combo.last_click_at = now;
    combo.streak += 1;

    let filled = combo.meter + config.fill_per_click;
    if filled >= 1.0 {
        combo.meter = 0.0;
        combo.streak = 0;
        true
    } else {
        combo.meter = filled.max(0.0);
        false
    }
}

/// Apply idle decay for a step of `delta` seconds ending at `now`.
///
/// Only the part of the step past the decay delay drains the meter, so the
/// result does not depend on how the elapsed time was split into steps.
pub fn decay(combo: &mut ComboState, now: f64, delta: f64, config: &ComboConfig) {
    let idle = now - combo.last_click_at;

    let decaying = (idle - config.decay_delay_seconds).clamp(0.0, delta.max(0.0));
    if decaying > 0.0 {
        combo.meter = (combo.meter - config.decay_per_second * decaying).max(0.0);
    }

    if idle > config.streak_reset_seconds {
        combo.streak = 0;
    }
}

/// Clear the meter (prestige).
pub fn reset(combo: &mut ComboState) {
    *combo = ComboState::default();
}
