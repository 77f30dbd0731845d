//! Automated player used by the simulator and the headless driver.
//!
//! The autopilot only issues engine actions; it never touches the ledger
//! directly, so automated play follows exactly the same rules as a person.

use super::strategy::{Market, PurchaseKind, PurchaseStrategy, StrategyKind};
use crate::catalog::Currency;
use crate::core::engine::Engine;
use log::debug;
use rand::Rng;

const MAX_CLICKS_PER_STEP: u32 = 10_000;
const MAX_PURCHASES_PER_STEP: u32 = 200;

/// What the autopilot did during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSummary {
    pub manual_clicks: u32,
    pub bursts: u32,
    pub purchases: u32,
    pub tinfoil_purchases: u32,
    pub conspiracies_proven: u32,
    pub quests_started: u32,
    pub bonus_targets_claimed: u32,
    pub challenges_claimed: u32,
}

#[derive(Debug, Clone, Copy)]
enum TinfoilItem {
    Shop,
    Skill,
    Upgrade,
}

pub struct Autopilot {
    strategy: Box<dyn PurchaseStrategy + Send>,
    pub clicks_per_second: f64,
    pub start_quests: bool,
    pub claim_bonus_targets: bool,
    click_progress: f64,
}

impl Autopilot {
    pub fn new(kind: StrategyKind, clicks_per_second: f64) -> Self {
        Self {
            strategy: kind.build(),
            clicks_per_second: clicks_per_second.max(0.0),
            start_quests: true,
            claim_bonus_targets: true,
            click_progress: 0.0,
        }
    }

    /// Play for `delta` seconds' worth of input. Call before the matching
    /// `advance(delta)`.
    pub fn act<R: Rng>(&mut self, engine: &mut Engine<R>, delta: f64) -> StepSummary {
        let mut summary = StepSummary::default();

        self.click(engine, delta, &mut summary);

        if self.claim_bonus_targets && engine.click_bonus_target().is_ok() {
            summary.bonus_targets_claimed += 1;
        }

        self.claim_challenges(engine, &mut summary);
        self.prove_conspiracies(engine, &mut summary);
        self.buy_with_evidence(engine, &mut summary);
        self.buy_with_tinfoil(engine, &mut summary);
        self.buy_prestige_upgrades(engine, &mut summary);

        if self.start_quests {
            self.launch_quests(engine, &mut summary);
        }

        summary
    }

    fn click<R: Rng>(&mut self, engine: &mut Engine<R>, delta: f64, summary: &mut StepSummary) {
        self.click_progress += self.clicks_per_second * delta.max(0.0);
        let whole = self.click_progress.floor();
        self.click_progress -= whole;

        let clicks = whole.min(MAX_CLICKS_PER_STEP as f64) as u32;
        for _ in 0..clicks {
            if engine.click(true, 1.0).burst.is_some() {
                summary.bursts += 1;
            }
        }
        summary.manual_clicks = clicks;
    }

    fn claim_challenges<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        let claimable: Vec<String> = engine
            .state()
            .daily
            .challenges
            .iter()
            .filter(|c| c.claimable())
            .map(|c| c.id.clone())
            .collect();
        for id in claimable {
            if engine.claim_daily_challenge(&id).is_ok() {
                summary.challenges_claimed += 1;
            }
        }
    }

    fn prove_conspiracies<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        let ids: Vec<&'static str> = engine.catalog().conspiracies().iter().map(|c| c.id).collect();
        for id in ids {
            if engine.prove_conspiracy(id).is_ok() {
                summary.conspiracies_proven += 1;
            }
        }
    }

    fn buy_with_evidence<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        for _ in 0..MAX_PURCHASES_PER_STEP {
            let market = Market::build(engine.state(), engine.catalog(), self.clicks_per_second);
            let Some(offer) = self.strategy.choose(&market) else {
                break;
            };
            let bought = match offer.kind {
                PurchaseKind::Generator => engine.purchase_generator(offer.id).is_ok(),
                PurchaseKind::Upgrade => engine.purchase_upgrade(offer.id).is_ok(),
            };
            if !bought {
                break;
            }
            debug!("{} bought {}", self.strategy.name(), offer.id);
            summary.purchases += 1;
        }
    }

    /// Cheapest affordable tinfoil purchase, repeatedly.
    fn buy_with_tinfoil<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        loop {
            let state = engine.state();
            let catalog = engine.catalog();

            let shop = catalog
                .shop_items()
                .iter()
                .filter(|s| !state.shop_items.contains(s.id) && s.tinfoil_cost <= state.tinfoil)
                .map(|s| (s.tinfoil_cost, s.id, TinfoilItem::Shop));
            let skills = catalog
                .skills()
                .iter()
                .filter(|s| !state.skills.contains(s.id) && s.tinfoil_cost <= state.tinfoil)
                .filter(|s| s.requires.map_or(true, |parent| state.skills.contains(parent)))
                .map(|s| (s.tinfoil_cost, s.id, TinfoilItem::Skill));
            let upgrades = catalog
                .upgrades()
                .iter()
                .filter(|u| u.cost.currency == Currency::Tinfoil && !state.upgrades.contains(u.id))
                .map(|u| (u.cost.amount.ceil() as u64, u.id, TinfoilItem::Upgrade))
                .filter(|(cost, _, _)| *cost <= state.tinfoil);

            let Some((_, id, item)) = shop
                .chain(skills)
                .chain(upgrades)
                .min_by_key(|(cost, _, _)| *cost)
            else {
                break;
            };

            let bought = match item {
                TinfoilItem::Shop => engine.purchase_shop_item(id),
                TinfoilItem::Skill => engine.unlock_skill(id),
                TinfoilItem::Upgrade => engine.purchase_upgrade(id),
            };
            if bought.is_err() {
                break;
            }
            summary.tinfoil_purchases += 1;
        }
    }

    fn buy_prestige_upgrades<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        let mut ids: Vec<(u64, &'static str)> = engine
            .catalog()
            .prestige_upgrades()
            .iter()
            .map(|p| (p.token_cost, p.id))
            .collect();
        ids.sort();
        for (_, id) in ids {
            if engine.purchase_prestige_upgrade(id).is_ok() {
                summary.purchases += 1;
            }
        }
    }

    fn launch_quests<R: Rng>(&self, engine: &mut Engine<R>, summary: &mut StepSummary) {
        let ids: Vec<&'static str> = engine.catalog().quests().iter().map(|q| q.id).collect();
        for id in ids {
            if engine.start_quest(id).is_ok() {
                summary.quests_started += 1;
            }
        }
    }
}
