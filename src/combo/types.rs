use serde::{Deserialize, Serialize};

/// Combo meter driven by manual clicks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboState {
    /// Fill level in `[0, 1)`. Reaching 1.0 is consumed by a burst.
    pub meter: f64,
    /// Manual clicks since the last burst or long idle.
    pub streak: u32,
    /// Game-clock time of the last manual click.
    pub last_click_at: f64,
}

/// Observable phase of the meter. The burst phase is transient and never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboPhase {
    Idle,
    Charging,
}

impl ComboState {
    pub fn phase(&self) -> ComboPhase {
        if self.meter > 0.0 {
            ComboPhase::Charging
        } else {
            ComboPhase::Idle
        }
    }
}
