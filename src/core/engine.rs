//! The engine owns the ledger and exposes the player-action API.
//!
//! Every action validates first and writes second, so an `Err` leaves the
//! ledger untouched. Time only moves through [`Engine::advance`] (see
//! `tick.rs`); actions are stamped with the current game clock.

use super::config::EngineConfig;
use super::error::ActionError;
use super::modifiers::{affordable_units, generator_cost, Modifiers, Rates};
use super::offline::{offline_report, OfflineFlags, OfflineReport};
use super::resource_state::ResourceState;
use super::tick::TickEvent;
use crate::achievements;
use crate::catalog::{Catalog, Cost, Currency, DefaultCatalog};
use crate::combo::logic as combo;
use crate::daily::logic as daily;
use crate::events::logic::take_bonus_target;
use crate::prestige::logic as prestige;
use crate::prestige::AscensionReport;
use crate::quests::logic::begin_quest;
use crate::quests::ActiveQuest;
use chrono::NaiveDate;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Feedback for a single click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickResult {
    /// Evidence credited by the click itself.
    pub amount: f64,
    pub was_crit: bool,
    /// 1.0 when the click did not crit.
    pub crit_multiplier: f64,
    /// Payout of a combo burst triggered by this click.
    pub burst: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BonusReward {
    pub evidence: f64,
    pub tinfoil: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkPurchase {
    pub units: u32,
    pub total_cost: f64,
}

pub struct Engine<R: Rng = ChaCha8Rng> {
    pub(crate) state: ResourceState,
    pub(crate) catalog: Arc<dyn Catalog + Send + Sync>,
    pub(crate) config: EngineConfig,
    pub(crate) rng: R,
    /// Events raised by actions, reported by the next advance.
    pub(crate) pending: Vec<TickEvent>,
}

impl Engine<ChaCha8Rng> {
    /// Fresh state, stock catalog, default config and a seeded RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            ResourceState::new(),
            Arc::new(DefaultCatalog),
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(
        state: ResourceState,
        catalog: Arc<dyn Catalog + Send + Sync>,
        config: EngineConfig,
        rng: R,
    ) -> Self {
        Self {
            state,
            catalog,
            config,
            rng,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    /// Settled copy of the ledger for persistence.
    pub fn snapshot(&self) -> ResourceState {
        self.state.clone()
    }

    pub fn into_state(self) -> ResourceState {
        self.state
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::resolve(&self.state, self.catalog.as_ref())
    }

    pub fn rates(&self) -> Rates {
        let mods = self.modifiers();
        Rates::calculate(&self.state, self.catalog.as_ref(), &mods)
    }

    /// Price of the next unit of a generator, or `None` for unknown ids.
    pub fn generator_cost(&self, id: &str) -> Option<f64> {
        let def = self.catalog.generator(id)?;
        Some(generator_cost(
            self.catalog.as_ref(),
            def,
            self.state.owned(id),
            &self.modifiers(),
        ))
    }

    // ── Clicking ────────────────────────────────────────────────

    /// Click once. Manual clicks feed the combo meter; `external_multiplier`
    /// scales the click (not a burst it triggers).
    pub fn click(&mut self, manual: bool, external_multiplier: f64) -> ClickResult {
        let mods = self.modifiers();
        let rates = Rates::calculate(&self.state, self.catalog.as_ref(), &mods);
        let mut result = self.perform_click(manual, external_multiplier, &mods, &rates);

        if manual && combo::register_click(&mut self.state.combo, self.state.clock, &self.config.combo) {
            // Fresh rates: the burst pays at the modifiers current at burst time.
            let fresh = self.rates();
            let mut payout = fresh.click_power * self.config.combo.burst_clicks;
            if self.state.events.buff_active(self.state.clock) {
                payout *= self.config.events.buff_burst_multiplier;
            }
            self.state.earn(payout);
            self.state.lifetime.bursts += 1;
            self.pending.push(TickEvent::ComboBurst { amount: payout });
            info!("Combo burst for {:.1} evidence", payout);
            result.burst = Some(payout);
        }

        self.recheck_achievements();
        result
    }

    /// One click against precomputed modifiers. Shared with auto-clicks.
    pub(crate) fn perform_click(
        &mut self,
        manual: bool,
        external_multiplier: f64,
        mods: &Modifiers,
        rates: &Rates,
    ) -> ClickResult {
        let mut amount = rates.click_power;

        let crit_chance = mods.effective_crit_chance();
        let was_crit = crit_chance > 0.0 && self.rng.gen::<f64>() < crit_chance;
        let mut crit_multiplier = 1.0;
        if was_crit {
            let (lo, hi) = mods.crit_range(&self.config);
            crit_multiplier = if hi > lo { self.rng.gen_range(lo..hi) } else { lo };
            amount *= crit_multiplier;
            self.state.lifetime.critical_hits += 1;
        }

        if self.state.events.buff_active(self.state.clock) {
            amount *= self.config.events.buff_click_multiplier;
        }
        amount *= external_multiplier.max(0.0);

        self.state.earn(amount);
        self.state.lifetime.clicks += 1;
        self.state.daily.counters.clicks += 1;
        if manual {
            debug!("Manual click for {:.2}{}", amount, if was_crit { " (crit)" } else { "" });
        }

        ClickResult {
            amount,
            was_crit,
            crit_multiplier,
            burst: None,
        }
    }

    /// Consume the live bonus target.
    pub fn click_bonus_target(&mut self) -> Result<BonusReward, ActionError> {
        let eps = self.rates().eps;
        take_bonus_target(&mut self.state.events, self.state.clock)
            .ok_or(ActionError::NothingToClaim)?;

        let reward = BonusReward {
            evidence: eps * self.config.events.bonus_target_eps_seconds,
            tinfoil: self.config.events.bonus_target_tinfoil,
        };
        self.state.earn(reward.evidence);
        self.state.tinfoil += reward.tinfoil;
        self.state.lifetime.bonus_targets_claimed += 1;
        self.state.daily.counters.bonus_targets_claimed += 1;
        info!(
            "Bonus target claimed: {:.1} evidence, {} tinfoil",
            reward.evidence, reward.tinfoil
        );

        self.recheck_achievements();
        Ok(reward)
    }

    // ── Purchases ───────────────────────────────────────────────

    /// Buy one generator. Returns the price paid.
    pub fn purchase_generator(&mut self, id: &str) -> Result<f64, ActionError> {
        let purchase = self.purchase_generator_bulk(id, 1)?;
        Ok(purchase.total_cost)
    }

    /// Buy as many units as the balance allows, up to `max_units`.
    pub fn purchase_generator_bulk(
        &mut self,
        id: &str,
        max_units: u32,
    ) -> Result<BulkPurchase, ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .generator(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if max_units == 0 {
            return Err(ActionError::NotEligible("zero units requested"));
        }
        let mods = self.modifiers();
        let owned = self.state.owned(id);

        let (units, total_cost) = affordable_units(
            catalog.as_ref(),
            def,
            owned,
            self.state.evidence,
            max_units,
            &mods,
        );
        if units == 0 {
            return Err(ActionError::Unaffordable(id.to_string()));
        }

        self.state.evidence -= total_cost;
        self.state.generators.insert(def.id.to_string(), owned + units);
        self.state.daily.counters.generators_bought += units as u64;
        debug!("Bought {} x {} for {:.2}", units, def.name, total_cost);

        self.recheck_achievements();
        Ok(BulkPurchase { units, total_cost })
    }

    pub fn purchase_upgrade(&mut self, id: &str) -> Result<(), ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .upgrade(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if self.state.upgrades.contains(id) {
            return Err(ActionError::AlreadyOwned(id.to_string()));
        }
        self.pay(def.cost, id)?;

        self.state.upgrades.insert(def.id.to_string());
        debug!("Bought upgrade {}", def.name);
        self.recheck_achievements();
        Ok(())
    }

    pub fn purchase_shop_item(&mut self, id: &str) -> Result<(), ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .shop_item(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if self.state.shop_items.contains(id) {
            return Err(ActionError::AlreadyOwned(id.to_string()));
        }
        self.pay(Cost::tinfoil(def.tinfoil_cost as f64), id)?;

        self.state.shop_items.insert(def.id.to_string());
        debug!("Bought shop item {}", def.name);
        self.recheck_achievements();
        Ok(())
    }

    pub fn purchase_prestige_upgrade(&mut self, id: &str) -> Result<(), ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .prestige_upgrade(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if self.state.prestige.upgrades.contains(id) {
            return Err(ActionError::AlreadyOwned(id.to_string()));
        }
        self.pay(Cost::tokens(def.token_cost as f64), id)?;

        self.state.prestige.upgrades.insert(def.id.to_string());
        info!("Prestige upgrade {} acquired", def.name);
        self.recheck_achievements();
        Ok(())
    }

    /// Spend evidence to prove a conspiracy unlocked by this run's earnings.
    /// Returns the tinfoil granted.
    pub fn prove_conspiracy(&mut self, id: &str) -> Result<u64, ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .conspiracy(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if self.state.conspiracies.contains(id) {
            return Err(ActionError::AlreadyOwned(id.to_string()));
        }
        if self.state.total_evidence_earned < def.unlock_at {
            return Err(ActionError::NotEligible("conspiracy not yet unlocked"));
        }
        self.pay(Cost::evidence(def.evidence_cost), id)?;

        self.state.conspiracies.insert(def.id.to_string());
        self.state.tinfoil += def.tinfoil_reward;
        info!("Conspiracy proven: {}", def.name);
        self.recheck_achievements();
        Ok(def.tinfoil_reward)
    }

    pub fn unlock_skill(&mut self, id: &str) -> Result<(), ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .skill(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        if self.state.skills.contains(id) {
            return Err(ActionError::AlreadyOwned(id.to_string()));
        }
        if let Some(parent) = def.requires {
            if !self.state.skills.contains(parent) {
                return Err(ActionError::PrerequisiteMissing(
                    id.to_string(),
                    parent.to_string(),
                ));
            }
        }
        self.pay(Cost::tinfoil(def.tinfoil_cost as f64), id)?;

        self.state.skills.insert(def.id.to_string());
        info!("Skill unlocked: {}", def.name);
        self.recheck_achievements();
        Ok(())
    }

    /// Check and debit in one step. Nothing is written on failure.
    fn pay(&mut self, cost: Cost, id: &str) -> Result<(), ActionError> {
        let affordable = match cost.currency {
            Currency::Evidence => self.state.evidence >= cost.amount,
            Currency::Tinfoil => self.state.tinfoil as f64 >= cost.amount,
            Currency::Tokens => self.state.illuminati_tokens as f64 >= cost.amount,
        };
        if !affordable {
            return Err(ActionError::Unaffordable(id.to_string()));
        }

        match cost.currency {
            Currency::Evidence => self.state.evidence -= cost.amount,
            Currency::Tinfoil => self.state.tinfoil -= cost.amount.ceil() as u64,
            Currency::Tokens => self.state.illuminati_tokens -= cost.amount.ceil() as u64,
        }
        Ok(())
    }

    // ── Quests ──────────────────────────────────────────────────

    pub fn start_quest(&mut self, id: &str) -> Result<ActiveQuest, ActionError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog
            .quest(id)
            .ok_or_else(|| ActionError::InvalidId(id.to_string()))?;
        let available = self.rates().available_believers;

        let quest = begin_quest(&mut self.state.active_quests, def, self.state.clock, available)?;
        debug!(
            "Quest {} started with {} believers, ends at {:.1}",
            def.name, quest.believers_committed, quest.ends_at
        );
        Ok(quest)
    }

    // ── Daily challenges ────────────────────────────────────────

    /// Tell the engine what day it is. Returns true when a new batch of
    /// challenges was generated.
    pub fn observe_day(&mut self, today: NaiveDate) -> bool {
        daily::observe_day(&mut self.state.daily, today, self.catalog.as_ref())
    }

    /// Claim a completed challenge. Returns the tinfoil granted.
    pub fn claim_daily_challenge(&mut self, id: &str) -> Result<u64, ActionError> {
        let reward = daily::claim(&mut self.state.daily, id)?;
        self.state.tinfoil += reward;
        info!("Daily challenge {} claimed for {} tinfoil", id, reward);
        Ok(reward)
    }

    // ── Prestige ────────────────────────────────────────────────

    pub fn can_ascend(&self) -> bool {
        prestige::can_ascend(&self.state, self.config.prestige_threshold)
    }

    pub fn tokens_earned(&self) -> u64 {
        prestige::tokens_earned(&self.state, self.catalog.as_ref())
    }

    pub fn ascend(&mut self) -> Result<AscensionReport, ActionError> {
        if !self.can_ascend() {
            return Err(ActionError::NotEligible("below prestige threshold"));
        }
        let starting_evidence = self.modifiers().starting_evidence;
        let report =
            prestige::perform_ascension(&mut self.state, self.catalog.as_ref(), starting_evidence);

        info!(
            "Ascension #{}: {} tokens from {:.0} evidence",
            report.times_ascended, report.tokens_earned, report.total_evidence_before
        );
        self.pending.push(TickEvent::Ascended {
            tokens: report.tokens_earned,
            times_ascended: report.times_ascended,
        });
        Ok(report)
    }

    // ── Offline and persistence boundary ────────────────────────

    /// Credit earnings for the wall-clock gap since the last save and stamp
    /// `now_unix` as the new save time. A ledger that was never saved
    /// earns nothing.
    pub fn apply_offline_progress(&mut self, now_unix: i64) -> OfflineReport {
        let last = self.state.last_save_time;
        if last <= 0 {
            self.state.last_save_time = now_unix;
            return OfflineReport::default();
        }

        let mods = self.modifiers();
        let eps = Rates::calculate(&self.state, self.catalog.as_ref(), &mods).eps;
        let flags = OfflineFlags {
            full_efficiency: mods.full_offline_efficiency,
        };
        let report = offline_report(now_unix - last, eps, flags, &self.config.offline);

        self.state.earn(report.evidence_earned);
        self.state.last_save_time = now_unix.max(last);
        if report.evidence_earned > 0.0 {
            info!(
                "Offline for {}s: earned {:.1} evidence at {:.0}% efficiency",
                report.elapsed_seconds,
                report.evidence_earned,
                report.efficiency * 100.0
            );
        }
        self.recheck_achievements();
        report
    }

    pub fn mark_saved(&mut self, now_unix: i64) {
        self.state.last_save_time = now_unix;
    }

    pub(crate) fn recheck_achievements(&mut self) {
        for id in achievements::evaluate(&mut self.state, self.catalog.as_ref()) {
            self.pending.push(TickEvent::AchievementUnlocked { id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(evidence: f64) -> Engine {
        let mut engine = Engine::seeded(7);
        engine.state.evidence = evidence;
        engine
    }

    #[test]
    fn test_click_adds_click_power() {
        let mut engine = Engine::seeded(1);
        let result = engine.click(true, 1.0);

        assert_eq!(result.amount, 1.0);
        assert!(!result.was_crit);
        assert_eq!(engine.state.evidence, 1.0);
        assert_eq!(engine.state.total_evidence_earned, 1.0);
        assert_eq!(engine.state.lifetime.clicks, 1);
    }

    #[test]
    fn test_external_multiplier() {
        let mut engine = Engine::seeded(1);
        let result = engine.click(false, 3.0);
        assert_eq!(result.amount, 3.0);
        assert_eq!(engine.state.combo.meter, 0.0);
    }

    #[test]
    fn test_buff_multiplies_clicks() {
        let mut engine = Engine::seeded(1);
        engine.state.events.buff = Some(crate::events::ActiveBuff {
            started_at: 0.0,
            expires_at: 30.0,
        });
        let result = engine.click(false, 1.0);
        assert_eq!(result.amount, engine.config.events.buff_click_multiplier);
    }

    #[test]
    fn test_guaranteed_crit_in_range() {
        let mut engine = Engine::seeded(3);
        let mods = Modifiers::from_effects(&[crate::catalog::Effect::CritChance(2.0)]);
        let rates = engine.rates();

        let result = engine.perform_click(false, 1.0, &mods, &rates);
        assert!(result.was_crit);
        assert!((5.0..10.0).contains(&result.crit_multiplier));
        assert_eq!(result.amount, result.crit_multiplier);
    }

    #[test]
    fn test_wide_crit_range() {
        let mut engine = Engine::seeded(4);
        let mods = Modifiers::from_effects(&[
            crate::catalog::Effect::CritChance(1.0),
            crate::catalog::Effect::WideCritRange,
        ]);
        let rates = engine.rates();

        for _ in 0..50 {
            let result = engine.perform_click(false, 1.0, &mods, &rates);
            assert!((10.0..15.0).contains(&result.crit_multiplier));
        }
    }

    #[test]
    fn test_purchase_generator_scenario() {
        let mut engine = funded(100.0);
        assert_eq!(engine.purchase_generator("blogger"), Ok(10.0));
        assert!((engine.generator_cost("blogger").unwrap() - 11.5).abs() < 1e-9);
        assert_eq!(engine.state.evidence, 90.0);
        assert_eq!(engine.state.daily.counters.generators_bought, 1);
    }

    #[test]
    fn test_failed_purchase_changes_nothing() {
        let mut engine = funded(5.0);
        let before = engine.snapshot();

        assert_eq!(
            engine.purchase_generator("blogger"),
            Err(ActionError::Unaffordable("blogger".to_string()))
        );
        assert_eq!(
            engine.purchase_upgrade("corkboard"),
            Err(ActionError::Unaffordable("corkboard".to_string()))
        );
        assert_eq!(
            engine.purchase_generator("nope"),
            Err(ActionError::InvalidId("nope".to_string()))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_upgrade_cannot_be_bought_twice() {
        let mut engine = funded(1_000.0);
        engine.purchase_upgrade("red_string").unwrap();
        let before = engine.snapshot();
        assert_eq!(
            engine.purchase_upgrade("red_string"),
            Err(ActionError::AlreadyOwned("red_string".to_string()))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_tinfoil_priced_upgrade() {
        let mut engine = funded(1_000_000.0);
        assert!(engine.purchase_upgrade("tinfoil_lining").is_err());
        engine.state.tinfoil = 30;
        engine.purchase_upgrade("tinfoil_lining").unwrap();
        assert_eq!(engine.state.tinfoil, 5);
        assert_eq!(engine.state.evidence, 1_000_000.0);
    }

    #[test]
    fn test_bulk_purchase() {
        let mut engine = funded(35.0);
        let bulk = engine.purchase_generator_bulk("blogger", 10).unwrap();
        assert_eq!(bulk.units, 2);
        assert_eq!(engine.state.owned("blogger"), 2);
        assert!((engine.state.evidence - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_skill_prerequisite() {
        let mut engine = Engine::seeded(1);
        engine.state.tinfoil = 1_000;
        assert!(matches!(
            engine.unlock_skill("sharpened_instinct"),
            Err(ActionError::PrerequisiteMissing(_, _))
        ));
        engine.unlock_skill("keen_eye").unwrap();
        engine.unlock_skill("sharpened_instinct").unwrap();
        assert!(engine.modifiers().wide_crit_range);
    }

    #[test]
    fn test_conspiracy_requires_run_earnings() {
        let mut engine = funded(10_000.0);
        assert_eq!(
            engine.prove_conspiracy("moon_landing"),
            Err(ActionError::NotEligible("conspiracy not yet unlocked"))
        );
        engine.state.total_evidence_earned = 10_000.0;
        let tinfoil = engine.prove_conspiracy("moon_landing").unwrap();
        assert_eq!(engine.state.tinfoil, tinfoil);
        assert!(engine.state.conspiracies.contains("moon_landing"));
    }

    #[test]
    fn test_bonus_target_without_target() {
        let mut engine = Engine::seeded(1);
        assert_eq!(engine.click_bonus_target(), Err(ActionError::NothingToClaim));
    }

    #[test]
    fn test_ascend_below_threshold() {
        let mut engine = Engine::seeded(1);
        let before = engine.snapshot();
        assert_eq!(
            engine.ascend(),
            Err(ActionError::NotEligible("below prestige threshold"))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_offline_progress_first_launch() {
        let mut engine = Engine::seeded(1);
        let report = engine.apply_offline_progress(1_700_000_000);
        assert_eq!(report, OfflineReport::default());
        assert_eq!(engine.state.last_save_time, 1_700_000_000);
    }

    #[test]
    fn test_offline_progress_credits_eps() {
        let mut engine = Engine::seeded(1);
        engine.state.generators.insert("podcaster".to_string(), 10);
        engine.mark_saved(1_000);

        let report = engine.apply_offline_progress(1_100);

        assert!((report.evidence_earned - 100.0 * 10.0 * 0.5).abs() < 1e-9);
        assert_eq!(engine.state.evidence, report.evidence_earned);
        assert_eq!(engine.state.clock, 0.0);
        assert_eq!(engine.state.last_save_time, 1_100);
    }
}
