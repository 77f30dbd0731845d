//! Prestige: trade a run's progress for permanent tokens.

pub mod logic;
pub mod types;

pub use types::{AscensionReport, PrestigeRecord};
