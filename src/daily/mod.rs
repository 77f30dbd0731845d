//! Daily challenges keyed to a caller-supplied calendar day.

pub mod logic;
pub mod types;

pub use types::{DailyCounters, DailyState, StoredChallenge};
