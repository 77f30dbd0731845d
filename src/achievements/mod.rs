//! Achievements: permanent, one-time unlocks driven by catalog conditions.

pub mod logic;

pub use logic::{evaluate, unlock_percentage};
