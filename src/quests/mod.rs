//! Timed quests that commit believers and resolve by chance.

pub mod logic;
pub mod types;

pub use types::{ActiveQuest, QuestOutcome};
