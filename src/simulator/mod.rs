//! Balance simulator.
//!
//! Runs many accelerated playthroughs to analyze:
//! - Economy growth under each purchase strategy
//! - Quest and combo payouts
//! - Time to first ascension
//!
//! The simulator drives the real engine through `advance` and the action
//! API, so results match real gameplay.

pub mod autopilot;
mod config;
mod report;
mod runner;
pub mod strategy;

pub use autopilot::{Autopilot, StepSummary};
pub use config::SimConfig;
pub use report::{format_duration, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
pub use strategy::{PurchaseStrategy, StrategyKind};
