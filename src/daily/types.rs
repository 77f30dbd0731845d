use crate::catalog::{ChallengeDef, ChallengeMetric};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily challenge as stored in the ledger.
///
/// `completed` and `claimed` only ever move from false to true, and
/// `claimed` implies `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChallenge {
    pub id: String,
    pub metric: ChallengeMetric,
    pub target: f64,
    #[serde(default)]
    pub progress: f64,
    pub tinfoil_reward: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub claimed: bool,
}

impl StoredChallenge {
    pub fn from_def(def: ChallengeDef) -> Self {
        Self {
            id: def.id,
            metric: def.metric,
            target: def.target,
            progress: 0.0,
            tinfoil_reward: def.tinfoil_reward,
            completed: false,
            claimed: false,
        }
    }

    pub fn claimable(&self) -> bool {
        self.completed && !self.claimed
    }
}

/// Counters scoped to the current calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCounters {
    pub clicks: u64,
    pub evidence_earned: f64,
    pub generators_bought: u64,
    pub quests_completed: u64,
    pub bonus_targets_claimed: u64,
}

impl DailyCounters {
    pub fn value(&self, metric: ChallengeMetric) -> f64 {
        match metric {
            ChallengeMetric::Clicks => self.clicks as f64,
            ChallengeMetric::EvidenceEarned => self.evidence_earned,
            ChallengeMetric::GeneratorsBought => self.generators_bought as f64,
            ChallengeMetric::QuestsCompleted => self.quests_completed as f64,
            ChallengeMetric::BonusTargetsClaimed => self.bonus_targets_claimed as f64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyState {
    /// Day the current batch was generated for; `None` before the first
    /// observation.
    pub day: Option<NaiveDate>,
    pub challenges: Vec<StoredChallenge>,
    pub counters: DailyCounters,
}
