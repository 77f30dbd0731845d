use serde::{Deserialize, Serialize};

/// A quest in progress. Its believers stay committed until it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQuest {
    pub quest_id: String,
    pub started_at: f64,
    /// Fixed at start from the quest's duration.
    pub ends_at: f64,
    pub believers_committed: u64,
}

impl ActiveQuest {
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.ends_at
    }
}

/// Result of resolving a quest.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestOutcome {
    pub quest_id: String,
    pub success: bool,
    pub evidence: f64,
    pub tinfoil: u64,
    /// Committed believers released back to the pool.
    pub believers_released: u64,
    /// Committed believers destroyed by a high-risk failure.
    pub believers_lost: u64,
}
