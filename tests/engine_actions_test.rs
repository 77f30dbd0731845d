//! Integration test: player actions through the public engine API.

use conspiracy::catalog::{
    AchievementDef, Catalog, ChallengeDef, ConspiracyDef, DefaultCatalog, GeneratorDef,
    PrestigeUpgradeDef, QuestDef, ShopItemDef, SkillDef, UpgradeDef,
};
use conspiracy::core::{ActionError, Engine, EngineConfig, ResourceState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

fn engine_with(state: ResourceState) -> Engine {
    Engine::new(
        state,
        Arc::new(DefaultCatalog),
        EngineConfig::default(),
        ChaCha8Rng::seed_from_u64(7),
    )
}

#[test]
fn test_blogger_cost_curve() {
    let mut engine = engine_with(ResourceState {
        evidence: 10.0,
        ..ResourceState::new()
    });

    assert_eq!(engine.generator_cost("blogger"), Some(10.0));
    let paid = engine.purchase_generator("blogger").unwrap();

    assert_eq!(paid, 10.0);
    assert_eq!(engine.state().owned("blogger"), 1);
    assert!(engine.state().evidence.abs() < 1e-9);
    let next = engine.generator_cost("blogger").unwrap();
    assert!((next - 11.5).abs() < 1e-9, "next cost was {next}");
}

#[test]
fn test_rejected_purchases_leave_state_untouched() {
    let mut engine = engine_with(ResourceState {
        evidence: 5.0,
        ..ResourceState::new()
    });
    let before = engine.snapshot();

    assert_eq!(
        engine.purchase_generator("blogger"),
        Err(ActionError::Unaffordable("blogger".to_string()))
    );
    assert!(matches!(
        engine.purchase_generator("no_such_generator"),
        Err(ActionError::InvalidId(_))
    ));
    assert!(engine.purchase_upgrade("no_such_upgrade").is_err());
    assert!(engine.start_quest("stakeout").is_err());
    assert!(engine.claim_daily_challenge("nothing").is_err());
    assert_eq!(engine.click_bonus_target(), Err(ActionError::NothingToClaim));
    assert!(engine.ascend().is_err());

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_bulk_purchase_buys_what_fits() {
    let mut engine = engine_with(ResourceState {
        evidence: 10.0 + 11.5 + 5.0,
        ..ResourceState::new()
    });

    let bought = engine.purchase_generator_bulk("blogger", 10).unwrap();

    assert_eq!(bought.units, 2);
    assert!((bought.total_cost - 21.5).abs() < 1e-9);
    assert!((engine.state().evidence - 5.0).abs() < 1e-9);
    assert_eq!(engine.state().daily.counters.generators_bought, 2);
}

#[test]
fn test_bulk_purchase_of_zero_units_is_rejected() {
    let mut engine = engine_with(ResourceState {
        evidence: 1_000.0,
        ..ResourceState::new()
    });
    let before = engine.snapshot();

    assert_eq!(
        engine.purchase_generator_bulk("blogger", 0),
        Err(ActionError::NotEligible("zero units requested"))
    );
    assert_eq!(engine.snapshot(), before);
}

/// Stock content with every generator priced at its base cost.
struct FlatPriceCatalog;

impl Catalog for FlatPriceCatalog {
    fn generators(&self) -> &[GeneratorDef] {
        DefaultCatalog.generators()
    }
    fn upgrades(&self) -> &[UpgradeDef] {
        DefaultCatalog.upgrades()
    }
    fn shop_items(&self) -> &[ShopItemDef] {
        DefaultCatalog.shop_items()
    }
    fn skills(&self) -> &[SkillDef] {
        DefaultCatalog.skills()
    }
    fn conspiracies(&self) -> &[ConspiracyDef] {
        DefaultCatalog.conspiracies()
    }
    fn prestige_upgrades(&self) -> &[PrestigeUpgradeDef] {
        DefaultCatalog.prestige_upgrades()
    }
    fn quests(&self) -> &[QuestDef] {
        DefaultCatalog.quests()
    }
    fn achievements(&self) -> &[AchievementDef] {
        &[]
    }
    fn tokens_for(&self, total_evidence: f64) -> u64 {
        DefaultCatalog.tokens_for(total_evidence)
    }
    fn daily_challenges(&self, seed: u64) -> Vec<ChallengeDef> {
        DefaultCatalog.daily_challenges(seed)
    }
    fn generator_cost(&self, def: &GeneratorDef, _owned: u32) -> f64 {
        def.base_cost
    }
}

#[test]
fn test_catalog_cost_curve_drives_purchases() {
    let mut engine = Engine::new(
        ResourceState {
            evidence: 55.0,
            ..ResourceState::new()
        },
        Arc::new(FlatPriceCatalog),
        EngineConfig::default(),
        ChaCha8Rng::seed_from_u64(7),
    );

    let bought = engine.purchase_generator_bulk("blogger", 10).unwrap();

    assert_eq!(bought.units, 5);
    assert!((bought.total_cost - 50.0).abs() < 1e-9);
    assert_eq!(engine.generator_cost("blogger"), Some(10.0));
}

#[test]
fn test_clicks_earn_and_count() {
    let mut engine = Engine::seeded(3);

    let first = engine.click(true, 1.0);
    let second = engine.click(false, 2.0);

    assert_eq!(first.amount, 1.0);
    assert_eq!(second.amount, 2.0);
    assert_eq!(engine.state().lifetime.clicks, 2);
    assert_eq!(engine.state().lifetime.all_time_evidence, 3.0);
    // Automated clicks never touch the combo meter.
    assert_eq!(engine.state().combo.streak, 1);
    assert!(engine.state().achievements.contains("first_click"));
}

#[test]
fn test_upgrade_cannot_be_bought_twice() {
    let mut engine = engine_with(ResourceState {
        evidence: 1.0e9,
        ..ResourceState::new()
    });
    let id = engine
        .catalog()
        .upgrades()
        .iter()
        .find(|u| u.cost.currency == conspiracy::catalog::Currency::Evidence)
        .map(|u| u.id)
        .unwrap();

    engine.purchase_upgrade(id).unwrap();
    assert_eq!(
        engine.purchase_upgrade(id),
        Err(ActionError::AlreadyOwned(id.to_string()))
    );
}
