//! Core engine: the ledger, modifier resolution, actions and the advance step.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod modifiers;
pub mod offline;
pub mod resource_state;
pub mod tick;

pub use config::EngineConfig;
pub use engine::{BonusReward, BulkPurchase, ClickResult, Engine};
pub use error::ActionError;
pub use modifiers::{Modifiers, Rates};
pub use offline::{calculate_offline_earnings, OfflineFlags, OfflineReport};
pub use resource_state::{LifetimeStats, ResourceState};
pub use tick::{TickEvent, TickResult};
