//! Read-only content catalog.
//!
//! The engine never owns content definitions; it asks a [`Catalog`] for
//! them by id. [`DefaultCatalog`] ships the stock content tables, tests and
//! balance experiments can inject their own.

pub mod data;
pub mod types;

pub use data::DefaultCatalog;
pub use types::*;

/// Lookup of every definition the engine consumes.
///
/// Implementors supply the tables; the by-id lookups are provided.
pub trait Catalog {
    fn generators(&self) -> &[GeneratorDef];
    fn upgrades(&self) -> &[UpgradeDef];
    fn shop_items(&self) -> &[ShopItemDef];
    fn skills(&self) -> &[SkillDef];
    fn conspiracies(&self) -> &[ConspiracyDef];
    fn prestige_upgrades(&self) -> &[PrestigeUpgradeDef];
    fn quests(&self) -> &[QuestDef];
    fn achievements(&self) -> &[AchievementDef];

    /// Illuminati tokens earned by ascending with `total_evidence` earned
    /// this run. Must be monotonic non-decreasing.
    fn tokens_for(&self, total_evidence: f64) -> u64;

    /// Deterministic daily challenge batch for a date-derived seed.
    fn daily_challenges(&self, seed: u64) -> Vec<ChallengeDef>;

    /// Undiscounted price of the next unit of `def` when `owned` are held.
    /// Defaults to the definition's exponential curve.
    fn generator_cost(&self, def: &GeneratorDef, owned: u32) -> f64 {
        def.cost(owned)
    }

    fn generator(&self, id: &str) -> Option<&GeneratorDef> {
        self.generators().iter().find(|g| g.id == id)
    }

    fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrades().iter().find(|u| u.id == id)
    }

    fn shop_item(&self, id: &str) -> Option<&ShopItemDef> {
        self.shop_items().iter().find(|s| s.id == id)
    }

    fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills().iter().find(|s| s.id == id)
    }

    fn conspiracy(&self, id: &str) -> Option<&ConspiracyDef> {
        self.conspiracies().iter().find(|c| c.id == id)
    }

    fn prestige_upgrade(&self, id: &str) -> Option<&PrestigeUpgradeDef> {
        self.prestige_upgrades().iter().find(|p| p.id == id)
    }

    fn quest(&self, id: &str) -> Option<&QuestDef> {
        self.quests().iter().find(|q| q.id == id)
    }

    fn achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.achievements().iter().find(|a| a.id == id)
    }
}
