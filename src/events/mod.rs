//! Random events: a timed click buff and a clickable bonus target.

pub mod logic;
pub mod types;

pub use types::{ActiveBuff, BonusTarget, EventChange, EventState};
