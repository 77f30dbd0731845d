//! Content descriptors and the tagged effect model.
//!
//! Every purchasable or unlockable entry resolves to a list of [`Effect`]s.
//! The modifier resolver folds them generically, so no component branches on
//! specific content ids.

use serde::{Deserialize, Serialize};

/// A structured bonus granted by an owned upgrade, shop item, skill,
/// conspiracy, achievement or prestige upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Multiplies the production of a single generator.
    GeneratorMultiplier {
        generator: &'static str,
        factor: f64,
    },
    /// Multiplies total evidence per second.
    EpsMultiplier(f64),
    /// Adds flat power to every click (stage one, additive).
    ClickFlat(f64),
    /// Multiplies click power (stage two, multiplicative).
    ClickMultiplier(f64),
    /// Adds a fraction of the fully modified EPS to every click.
    ClickEpsFraction(f64),
    /// Multiplies the believer yield of all generators.
    BelieverMultiplier(f64),
    /// Adds to the critical hit chance (0.05 = 5%).
    CritChance(f64),
    /// Widens the critical multiplier range to the upper band.
    WideCritRange,
    /// Adds to every quest's success chance.
    QuestSuccess(f64),
    /// All quests succeed.
    GuaranteedQuests,
    /// Multiplies evidence rewarded by successful quests.
    QuestRewardMultiplier(f64),
    /// Automatic clicks per second.
    AutoClickRate(f64),
    /// Multiplies generator purchase cost (0.9 = 10% cheaper).
    GeneratorDiscount(f64),
    /// Evidence granted right after ascending.
    StartingEvidence(f64),
    /// Offline progress runs at full efficiency.
    FullOfflineEfficiency,
}

/// Currency an item is paid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Evidence,
    Tinfoil,
    Tokens,
}

/// Price of an item in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cost {
    pub currency: Currency,
    pub amount: f64,
}

impl Cost {
    pub const fn evidence(amount: f64) -> Self {
        Self {
            currency: Currency::Evidence,
            amount,
        }
    }

    pub const fn tinfoil(amount: f64) -> Self {
        Self {
            currency: Currency::Tinfoil,
            amount,
        }
    }

    pub const fn tokens(amount: f64) -> Self {
        Self {
            currency: Currency::Tokens,
            amount,
        }
    }
}

/// A passive production unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorDef {
    pub id: &'static str,
    pub name: &'static str,
    pub base_cost: f64,
    /// Cost growth per owned unit (1.15 = +15% each).
    pub cost_growth: f64,
    /// Evidence per second produced by one unit.
    pub base_production: f64,
    /// Believers attracted by one unit.
    pub believer_yield: f64,
}

impl GeneratorDef {
    /// Price of the next unit when `owned` are already held.
    pub fn cost(&self, owned: u32) -> f64 {
        self.base_cost * self.cost_growth.powi(owned as i32)
    }

    /// Evidence per second produced by `owned` units before multipliers.
    pub fn production(&self, owned: u32) -> f64 {
        self.base_production * owned as f64
    }
}

/// A one-time evidence or tinfoil upgrade (session scoped).
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: Cost,
    pub effects: &'static [Effect],
}

/// An item from the tinfoil shop (session scoped).
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub tinfoil_cost: u64,
    pub effects: &'static [Effect],
}

/// A node in the permanent skill tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDef {
    pub id: &'static str,
    pub name: &'static str,
    pub tinfoil_cost: u64,
    /// Skill that must be unlocked first.
    pub requires: Option<&'static str>,
    pub effects: &'static [Effect],
}

/// A conspiracy that can be proven once enough evidence has been gathered.
#[derive(Debug, Clone, PartialEq)]
pub struct ConspiracyDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Lifetime evidence (this run) required before it can be proven.
    pub unlock_at: f64,
    pub evidence_cost: f64,
    pub tinfoil_reward: u64,
    pub effects: &'static [Effect],
}

/// A permanent upgrade bought with illuminati tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct PrestigeUpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub token_cost: u64,
    pub effects: &'static [Effect],
}

/// How bad a failed quest is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestRisk {
    /// Failure still pays out a fraction of the fixed reward.
    Low,
    /// Failure pays nothing.
    Medium,
    /// Failure pays nothing and the committed believers are lost.
    High,
}

/// A timed quest that commits believers.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestDef {
    pub id: &'static str,
    pub name: &'static str,
    pub believer_cost: u64,
    pub duration_seconds: f64,
    pub success_chance: f64,
    pub risk: QuestRisk,
    pub evidence_reward: f64,
    /// Seconds of EPS added to the reward on success.
    pub evidence_multiplier: f64,
    pub tinfoil_reward: u64,
}

/// Predicate an achievement waits for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AchievementCondition {
    LifetimeEvidence(f64),
    LifetimeClicks(u64),
    GeneratorOwned {
        generator: &'static str,
        count: u32,
    },
    ConspiraciesProven(usize),
    PlayTime(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub condition: AchievementCondition,
    pub tinfoil_reward: u64,
    pub effects: &'static [Effect],
}

/// Day-scoped counter a daily challenge measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeMetric {
    Clicks,
    EvidenceEarned,
    GeneratorsBought,
    QuestsCompleted,
    BonusTargetsClaimed,
}

/// A generated daily challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDef {
    pub id: String,
    pub metric: ChallengeMetric,
    pub target: f64,
    pub tinfoil_reward: u64,
}
