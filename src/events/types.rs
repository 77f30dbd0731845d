use serde::{Deserialize, Serialize};

/// Timed multiplier buff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub started_at: f64,
    pub expires_at: f64,
}

/// Clickable bonus target. Position is normalized to `[0, 1)` on both axes;
/// the presentation layer maps it to screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub x: f64,
    pub y: f64,
    pub expires_at: f64,
}

/// At most one buff and one bonus target are live at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventState {
    pub buff: Option<ActiveBuff>,
    pub bonus_target: Option<BonusTarget>,
}

impl EventState {
    /// Whether the buff is live at game time `now`.
    pub fn buff_active(&self, now: f64) -> bool {
        self.buff.as_ref().is_some_and(|b| b.expires_at > now)
    }

    /// Whether a bonus target can be clicked at game time `now`.
    pub fn bonus_target_live(&self, now: f64) -> bool {
        self.bonus_target.as_ref().is_some_and(|t| t.expires_at > now)
    }
}

/// Something that happened to the event slots during an advance.
#[derive(Debug, Clone, PartialEq)]
pub enum EventChange {
    BuffStarted { expires_at: f64 },
    BuffExpired,
    BonusTargetSpawned { x: f64, y: f64, expires_at: f64 },
    BonusTargetExpired,
}
