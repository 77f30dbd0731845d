//! Purchase policies for automated play.
//!
//! A strategy only decides what to buy with evidence next. It sees a
//! [`Market`] built from the engine's current ledger and never mutates
//! anything itself.

use crate::catalog::{Catalog, Currency};
use crate::core::modifiers::{generator_cost, Modifiers, Rates};
use crate::core::resource_state::ResourceState;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseKind {
    Generator,
    Upgrade,
}

/// Something evidence can buy right now.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub kind: PurchaseKind,
    pub id: &'static str,
    pub cost: f64,
    /// Estimated evidence per second gained by the purchase, counting
    /// simulated clicking.
    pub income_gain: f64,
}

/// Snapshot of evidence-priced offers and the current income.
#[derive(Debug, Clone)]
pub struct Market {
    pub evidence: f64,
    /// Passive EPS plus simulated click income.
    pub income: f64,
    pub offers: Vec<Offer>,
}

impl Market {
    /// Price every generator and unowned evidence upgrade.
    ///
    /// `clicks_per_second` converts click power into income so click
    /// upgrades compete with generators.
    pub fn build(state: &ResourceState, catalog: &dyn Catalog, clicks_per_second: f64) -> Self {
        let mods = Modifiers::resolve(state, catalog);
        let income = income(state, catalog, &mods, clicks_per_second);
        let mut offers = Vec::new();

        for def in catalog.generators() {
            let mut after = state.clone();
            *after.generators.entry(def.id.to_string()).or_insert(0) += 1;
            offers.push(Offer {
                kind: PurchaseKind::Generator,
                id: def.id,
                cost: generator_cost(catalog, def, state.owned(def.id), &mods),
                income_gain: income_after(&after, catalog, clicks_per_second) - income,
            });
        }

        for def in catalog.upgrades() {
            if def.cost.currency != Currency::Evidence || state.upgrades.contains(def.id) {
                continue;
            }
            let mut after = state.clone();
            after.upgrades.insert(def.id.to_string());
            offers.push(Offer {
                kind: PurchaseKind::Upgrade,
                id: def.id,
                cost: def.cost.amount,
                income_gain: income_after(&after, catalog, clicks_per_second) - income,
            });
        }

        Self {
            evidence: state.evidence,
            income,
            offers,
        }
    }

    pub fn affordable(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(move |o| o.cost <= self.evidence)
    }

    fn cheapest_affordable(&self, kind: Option<PurchaseKind>) -> Option<&Offer> {
        self.affordable()
            .filter(|o| kind.map_or(true, |k| o.kind == k))
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
    }
}

fn income(state: &ResourceState, catalog: &dyn Catalog, mods: &Modifiers, cps: f64) -> f64 {
    let rates = Rates::calculate(state, catalog, mods);
    rates.eps + rates.click_power * cps + mods.auto_click_rate * rates.click_power
}

fn income_after(state: &ResourceState, catalog: &dyn Catalog, cps: f64) -> f64 {
    let mods = Modifiers::resolve(state, catalog);
    income(state, catalog, &mods, cps)
}

pub trait PurchaseStrategy {
    fn name(&self) -> &'static str;

    /// Pick the next purchase, or `None` to save up.
    fn choose<'m>(&self, market: &'m Market) -> Option<&'m Offer>;
}

/// Always buy the cheapest affordable item.
pub struct CheapestFirst;

impl PurchaseStrategy for CheapestFirst {
    fn name(&self) -> &'static str {
        "cheapest-first"
    }

    fn choose<'m>(&self, market: &'m Market) -> Option<&'m Offer> {
        market.cheapest_affordable(None)
    }
}

/// Cheapest generator; upgrades only when no generator is affordable.
pub struct GeneratorsFirst;

impl PurchaseStrategy for GeneratorsFirst {
    fn name(&self) -> &'static str {
        "generators-first"
    }

    fn choose<'m>(&self, market: &'m Market) -> Option<&'m Offer> {
        market
            .cheapest_affordable(Some(PurchaseKind::Generator))
            .or_else(|| market.cheapest_affordable(Some(PurchaseKind::Upgrade)))
    }
}

/// Cheapest upgrade; generators only when no upgrade is affordable.
pub struct UpgradesFirst;

impl PurchaseStrategy for UpgradesFirst {
    fn name(&self) -> &'static str {
        "upgrades-first"
    }

    fn choose<'m>(&self, market: &'m Market) -> Option<&'m Offer> {
        market
            .cheapest_affordable(Some(PurchaseKind::Upgrade))
            .or_else(|| market.cheapest_affordable(Some(PurchaseKind::Generator)))
    }
}

/// Buy whatever pays for itself soonest, counting the wait to afford it.
/// Saves up when the best item is not yet affordable.
pub struct PaybackOptimal;

impl PaybackOptimal {
    /// Seconds until `offer` is affordable plus seconds until it repays its
    /// price. Infinite for offers that add no income.
    pub fn payback_seconds(market: &Market, offer: &Offer) -> f64 {
        if offer.income_gain <= 0.0 {
            return f64::INFINITY;
        }
        let shortfall = (offer.cost - market.evidence).max(0.0);
        let wait = if shortfall == 0.0 {
            0.0
        } else if market.income > 0.0 {
            shortfall / market.income
        } else {
            f64::INFINITY
        };
        wait + offer.cost / offer.income_gain
    }
}

impl PurchaseStrategy for PaybackOptimal {
    fn name(&self) -> &'static str {
        "payback-optimal"
    }

    fn choose<'m>(&self, market: &'m Market) -> Option<&'m Offer> {
        let best = market
            .offers
            .iter()
            .filter(|o| Self::payback_seconds(market, o).is_finite())
            .min_by(|a, b| {
                Self::payback_seconds(market, a).total_cmp(&Self::payback_seconds(market, b))
            });

        match best {
            Some(offer) if offer.cost <= market.evidence => Some(offer),
            Some(_) => None,
            // Nothing adds income yet: fall back to the cheapest generator.
            None => market.cheapest_affordable(Some(PurchaseKind::Generator)),
        }
    }
}

/// Strategy selector for CLIs and configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    CheapestFirst,
    GeneratorsFirst,
    UpgradesFirst,
    #[default]
    PaybackOptimal,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::CheapestFirst,
        StrategyKind::GeneratorsFirst,
        StrategyKind::UpgradesFirst,
        StrategyKind::PaybackOptimal,
    ];

    pub fn build(self) -> Box<dyn PurchaseStrategy + Send> {
        match self {
            StrategyKind::CheapestFirst => Box::new(CheapestFirst),
            StrategyKind::GeneratorsFirst => Box::new(GeneratorsFirst),
            StrategyKind::UpgradesFirst => Box::new(UpgradesFirst),
            StrategyKind::PaybackOptimal => Box::new(PaybackOptimal),
        }
    }
}
