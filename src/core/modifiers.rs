//! Modifier resolution.
//!
//! Every owned id resolves through the catalog to a list of [`Effect`]s,
//! which are folded into a single [`Modifiers`] value. Rates are then pure
//! functions of the ledger and that value. Sources are visited in a fixed
//! order over sorted sets, so the fold is reproducible.

use super::config::EngineConfig;
use super::constants::{BASE_CLICK_POWER, MAX_BULK_PURCHASE};
use super::resource_state::ResourceState;
use crate::catalog::{Catalog, Effect, GeneratorDef};
use std::collections::BTreeMap;

/// Folded effect totals. Multiplicative stacks start at 1, additive ones at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifiers {
    pub generator_multipliers: BTreeMap<&'static str, f64>,
    pub eps_multiplier: f64,
    pub click_flat: f64,
    pub click_multiplier: f64,
    pub click_eps_fraction: f64,
    pub believer_multiplier: f64,
    pub crit_chance: f64,
    pub wide_crit_range: bool,
    pub quest_success_bonus: f64,
    pub guaranteed_quests: bool,
    pub quest_reward_multiplier: f64,
    pub auto_click_rate: f64,
    pub generator_discount: f64,
    pub starting_evidence: f64,
    pub full_offline_efficiency: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            generator_multipliers: BTreeMap::new(),
            eps_multiplier: 1.0,
            click_flat: 0.0,
            click_multiplier: 1.0,
            click_eps_fraction: 0.0,
            believer_multiplier: 1.0,
            crit_chance: 0.0,
            wide_crit_range: false,
            quest_success_bonus: 0.0,
            guaranteed_quests: false,
            quest_reward_multiplier: 1.0,
            auto_click_rate: 0.0,
            generator_discount: 1.0,
            starting_evidence: 0.0,
            full_offline_efficiency: false,
        }
    }
}

impl Modifiers {
    pub fn apply(&mut self, effect: &Effect) {
        match *effect {
            Effect::GeneratorMultiplier { generator, factor } => {
                *self.generator_multipliers.entry(generator).or_insert(1.0) *= factor;
            }
            Effect::EpsMultiplier(f) => self.eps_multiplier *= f,
            Effect::ClickFlat(v) => self.click_flat += v,
            Effect::ClickMultiplier(f) => self.click_multiplier *= f,
            Effect::ClickEpsFraction(v) => self.click_eps_fraction += v,
            Effect::BelieverMultiplier(f) => self.believer_multiplier *= f,
            Effect::CritChance(v) => self.crit_chance += v,
            Effect::WideCritRange => self.wide_crit_range = true,
            Effect::QuestSuccess(v) => self.quest_success_bonus += v,
            Effect::GuaranteedQuests => self.guaranteed_quests = true,
            Effect::QuestRewardMultiplier(f) => self.quest_reward_multiplier *= f,
            Effect::AutoClickRate(v) => self.auto_click_rate += v,
            Effect::GeneratorDiscount(f) => self.generator_discount *= f,
            Effect::StartingEvidence(v) => self.starting_evidence += v,
            Effect::FullOfflineEfficiency => self.full_offline_efficiency = true,
        }
    }

    pub fn from_effects<'a>(effects: impl IntoIterator<Item = &'a Effect>) -> Self {
        let mut mods = Self::default();
        for effect in effects {
            mods.apply(effect);
        }
        mods
    }

    /// Fold every owned source. Ids the catalog no longer knows are skipped.
    pub fn resolve(state: &ResourceState, catalog: &dyn Catalog) -> Self {
        let mut mods = Self::default();
        let mut fold = |effects: &[Effect]| effects.iter().for_each(|e| mods.apply(e));

        for id in &state.upgrades {
            if let Some(def) = catalog.upgrade(id) {
                fold(def.effects);
            }
        }
        for id in &state.shop_items {
            if let Some(def) = catalog.shop_item(id) {
                fold(def.effects);
            }
        }
        for id in &state.skills {
            if let Some(def) = catalog.skill(id) {
                fold(def.effects);
            }
        }
        for id in &state.conspiracies {
            if let Some(def) = catalog.conspiracy(id) {
                fold(def.effects);
            }
        }
        for id in &state.achievements {
            if let Some(def) = catalog.achievement(id) {
                fold(def.effects);
            }
        }
        for id in &state.prestige.upgrades {
            if let Some(def) = catalog.prestige_upgrade(id) {
                fold(def.effects);
            }
        }

        mods
    }

    pub fn generator_multiplier(&self, generator_id: &str) -> f64 {
        self.generator_multipliers
            .get(generator_id)
            .copied()
            .unwrap_or(1.0)
    }

    /// Critical chance clamped to a probability.
    pub fn effective_crit_chance(&self) -> f64 {
        self.crit_chance.clamp(0.0, 1.0)
    }

    pub fn crit_range(&self, config: &EngineConfig) -> (f64, f64) {
        if self.wide_crit_range {
            config.wide_crit_range
        } else {
            config.crit_range
        }
    }
}

/// Two-stage click power. The EPS term must use fully modified EPS.
pub fn compose_click_power(additive: f64, multiplier: f64, eps: f64, eps_fraction: f64) -> f64 {
    additive * multiplier + eps * eps_fraction
}

/// Derived per-second and per-click rates.
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    pub base_eps: f64,
    pub eps: f64,
    pub click_power: f64,
    /// Believers produced minus those lost to failed high-risk quests.
    pub believers: u64,
    /// Believers not committed to an active quest.
    pub available_believers: u64,
}

impl Rates {
    pub fn calculate(state: &ResourceState, catalog: &dyn Catalog, mods: &Modifiers) -> Self {
        let base_eps: f64 = catalog
            .generators()
            .iter()
            .map(|g| g.production(state.owned(g.id)) * mods.generator_multiplier(g.id))
            .sum();
        let eps = base_eps * mods.eps_multiplier;

        let additive = BASE_CLICK_POWER + mods.click_flat;
        let click_power =
            compose_click_power(additive, mods.click_multiplier, eps, mods.click_eps_fraction);

        let raw_believers: f64 = catalog
            .generators()
            .iter()
            .map(|g| g.believer_yield * state.owned(g.id) as f64)
            .sum();
        let produced = (raw_believers * mods.believer_multiplier).floor().max(0.0) as u64;
        let believers = produced.saturating_sub(state.believers_lost);
        let available_believers = believers.saturating_sub(state.committed_believers());

        Self {
            base_eps,
            eps,
            click_power,
            believers,
            available_believers,
        }
    }
}

/// Price of the next unit of `def` after the permanent discount.
pub fn generator_cost(
    catalog: &dyn Catalog,
    def: &GeneratorDef,
    owned: u32,
    mods: &Modifiers,
) -> f64 {
    catalog.generator_cost(def, owned) * mods.generator_discount
}

/// How many units of `def` fit into `budget`, buying at most `max_units`
/// (itself capped at the bulk limit). Each unit is priced from the count it
/// is bought at. Returns the unit count and their total price.
pub fn affordable_units(
    catalog: &dyn Catalog,
    def: &GeneratorDef,
    owned: u32,
    budget: f64,
    max_units: u32,
    mods: &Modifiers,
) -> (u32, f64) {
    let limit = max_units.min(MAX_BULK_PURCHASE);
    let mut units = 0;
    let mut total = 0.0;

    while units < limit {
        let next = generator_cost(catalog, def, owned.saturating_add(units), mods);
        if !next.is_finite() || total + next > budget {
            break;
        }
        total += next;
        units += 1;
    }

    (units, total)
}
