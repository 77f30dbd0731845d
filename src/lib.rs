//! Conspiracy - Idle Clicker Progression Engine
//!
//! Headless economy engine: a resource ledger, modifier resolution, combo
//! meter, random events, quests, achievements, daily challenges and
//! prestige, advanced by [`core::Engine::advance`]. Also ships the offline
//! progress calculation and a balance simulator that drives the same engine.

pub mod achievements;
pub mod catalog;
pub mod combo;
pub mod core;
pub mod daily;
pub mod events;
pub mod prestige;
pub mod quests;
pub mod simulator;
pub mod utils;
