//! Combo meter: fills on manual clicks, decays when idle, bursts when full.

pub mod logic;
pub mod types;

pub use types::{ComboPhase, ComboState};
