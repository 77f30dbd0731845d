//! Stock content tables.

use super::types::*;
use super::Catalog;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of challenges generated per day.
pub const DAILY_CHALLENGE_COUNT: usize = 3;

/// Lifetime evidence that yields the first illuminati token.
const TOKEN_BASE_EVIDENCE: f64 = 50_000.0;

pub const GENERATORS: &[GeneratorDef] = &[
    GeneratorDef {
        id: "blogger",
        name: "Blogger",
        base_cost: 10.0,
        cost_growth: 1.15,
        base_production: 0.1,
        believer_yield: 1.0,
    },
    GeneratorDef {
        id: "podcaster",
        name: "Podcaster",
        base_cost: 100.0,
        cost_growth: 1.15,
        base_production: 1.0,
        believer_yield: 3.0,
    },
    GeneratorDef {
        id: "youtuber",
        name: "YouTuber",
        base_cost: 1_100.0,
        cost_growth: 1.15,
        base_production: 8.0,
        believer_yield: 10.0,
    },
    GeneratorDef {
        id: "forum_moderator",
        name: "Forum Moderator",
        base_cost: 12_000.0,
        cost_growth: 1.15,
        base_production: 47.0,
        believer_yield: 25.0,
    },
    GeneratorDef {
        id: "documentary_crew",
        name: "Documentary Crew",
        base_cost: 130_000.0,
        cost_growth: 1.15,
        base_production: 260.0,
        believer_yield: 60.0,
    },
    GeneratorDef {
        id: "whistleblower",
        name: "Whistleblower",
        base_cost: 1_400_000.0,
        cost_growth: 1.15,
        base_production: 1_400.0,
        believer_yield: 150.0,
    },
    GeneratorDef {
        id: "satellite_array",
        name: "Satellite Array",
        base_cost: 20_000_000.0,
        cost_growth: 1.15,
        base_production: 7_800.0,
        believer_yield: 400.0,
    },
];

pub const UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: "red_string",
        name: "Red String",
        cost: Cost::evidence(100.0),
        effects: &[Effect::ClickFlat(1.0)],
    },
    UpgradeDef {
        id: "corkboard",
        name: "Corkboard",
        cost: Cost::evidence(500.0),
        effects: &[Effect::ClickMultiplier(2.0)],
    },
    UpgradeDef {
        id: "blogger_vpn",
        name: "VPN Subscription",
        cost: Cost::evidence(100.0),
        effects: &[Effect::GeneratorMultiplier {
            generator: "blogger",
            factor: 2.0,
        }],
    },
    UpgradeDef {
        id: "podcast_mic",
        name: "Studio Microphone",
        cost: Cost::evidence(1_000.0),
        effects: &[Effect::GeneratorMultiplier {
            generator: "podcaster",
            factor: 2.0,
        }],
    },
    UpgradeDef {
        id: "youtube_algorithm",
        name: "Gaming the Algorithm",
        cost: Cost::evidence(11_000.0),
        effects: &[Effect::GeneratorMultiplier {
            generator: "youtuber",
            factor: 2.0,
        }],
    },
    UpgradeDef {
        id: "forum_bots",
        name: "Forum Bots",
        cost: Cost::evidence(120_000.0),
        effects: &[Effect::GeneratorMultiplier {
            generator: "forum_moderator",
            factor: 2.0,
        }],
    },
    UpgradeDef {
        id: "doc_drone",
        name: "Camera Drone",
        cost: Cost::evidence(1_300_000.0),
        effects: &[Effect::GeneratorMultiplier {
            generator: "documentary_crew",
            factor: 2.0,
        }],
    },
    UpgradeDef {
        id: "second_monitor",
        name: "Second Monitor",
        cost: Cost::evidence(5_000.0),
        effects: &[Effect::EpsMultiplier(1.1)],
    },
    UpgradeDef {
        id: "night_vision",
        name: "Night Vision Goggles",
        cost: Cost::evidence(50_000.0),
        effects: &[Effect::EpsMultiplier(1.25)],
    },
    UpgradeDef {
        id: "hivemind",
        name: "Hivemind",
        cost: Cost::evidence(25_000.0),
        effects: &[Effect::ClickEpsFraction(0.01)],
    },
    UpgradeDef {
        id: "tinfoil_lining",
        name: "Tinfoil Lining",
        cost: Cost::tinfoil(25.0),
        effects: &[Effect::ClickEpsFraction(0.02)],
    },
    UpgradeDef {
        id: "autoclicker_script",
        name: "Autoclicker Script",
        cost: Cost::evidence(2_500.0),
        effects: &[Effect::AutoClickRate(1.0)],
    },
];

pub const SHOP_ITEMS: &[ShopItemDef] = &[
    ShopItemDef {
        id: "lucky_hat",
        name: "Lucky Hat",
        tinfoil_cost: 10,
        effects: &[Effect::CritChance(0.05)],
    },
    ShopItemDef {
        id: "crystal_pendulum",
        name: "Crystal Pendulum",
        tinfoil_cost: 30,
        effects: &[Effect::CritChance(0.05)],
    },
    ShopItemDef {
        id: "megaphone",
        name: "Megaphone",
        tinfoil_cost: 20,
        effects: &[Effect::ClickMultiplier(1.5)],
    },
    ShopItemDef {
        id: "pamphlets",
        name: "Pamphlets",
        tinfoil_cost: 15,
        effects: &[Effect::BelieverMultiplier(1.25)],
    },
    ShopItemDef {
        id: "signal_booster",
        name: "Signal Booster",
        tinfoil_cost: 40,
        effects: &[Effect::EpsMultiplier(1.2)],
    },
    ShopItemDef {
        id: "lucky_charm",
        name: "Lucky Charm",
        tinfoil_cost: 25,
        effects: &[Effect::QuestSuccess(0.1)],
    },
    ShopItemDef {
        id: "drinking_bird",
        name: "Drinking Bird",
        tinfoil_cost: 35,
        effects: &[Effect::AutoClickRate(2.0)],
    },
];

pub const SKILLS: &[SkillDef] = &[
    SkillDef {
        id: "keen_eye",
        name: "Keen Eye",
        tinfoil_cost: 20,
        requires: None,
        effects: &[Effect::CritChance(0.05)],
    },
    SkillDef {
        id: "sharpened_instinct",
        name: "Sharpened Instinct",
        tinfoil_cost: 60,
        requires: Some("keen_eye"),
        effects: &[Effect::WideCritRange],
    },
    SkillDef {
        id: "charisma",
        name: "Charisma",
        tinfoil_cost: 25,
        requires: None,
        effects: &[Effect::BelieverMultiplier(1.2)],
    },
    SkillDef {
        id: "cult_of_personality",
        name: "Cult of Personality",
        tinfoil_cost: 80,
        requires: Some("charisma"),
        effects: &[Effect::BelieverMultiplier(1.5)],
    },
    SkillDef {
        id: "planning",
        name: "Meticulous Planning",
        tinfoil_cost: 30,
        requires: None,
        effects: &[Effect::QuestSuccess(0.05)],
    },
    SkillDef {
        id: "master_plan",
        name: "Master Plan",
        tinfoil_cost: 150,
        requires: Some("planning"),
        effects: &[Effect::GuaranteedQuests],
    },
    SkillDef {
        id: "deep_research",
        name: "Deep Research",
        tinfoil_cost: 40,
        requires: None,
        effects: &[Effect::EpsMultiplier(1.15)],
    },
    SkillDef {
        id: "fast_fingers",
        name: "Fast Fingers",
        tinfoil_cost: 30,
        requires: None,
        effects: &[Effect::ClickMultiplier(1.25)],
    },
];

pub const CONSPIRACIES: &[ConspiracyDef] = &[
    ConspiracyDef {
        id: "moon_landing",
        name: "The Moon Landing",
        unlock_at: 1_000.0,
        evidence_cost: 500.0,
        tinfoil_reward: 5,
        effects: &[Effect::ClickFlat(2.0)],
    },
    ConspiracyDef {
        id: "birds_arent_real",
        name: "Birds Aren't Real",
        unlock_at: 10_000.0,
        evidence_cost: 5_000.0,
        tinfoil_reward: 10,
        effects: &[Effect::EpsMultiplier(1.1)],
    },
    ConspiracyDef {
        id: "flat_earth",
        name: "Flat Earth",
        unlock_at: 100_000.0,
        evidence_cost: 50_000.0,
        tinfoil_reward: 25,
        effects: &[Effect::ClickEpsFraction(0.01)],
    },
    ConspiracyDef {
        id: "lizard_people",
        name: "Lizard People",
        unlock_at: 1_000_000.0,
        evidence_cost: 500_000.0,
        tinfoil_reward: 50,
        effects: &[Effect::EpsMultiplier(1.25)],
    },
    ConspiracyDef {
        id: "hollow_earth",
        name: "Hollow Earth",
        unlock_at: 10_000_000.0,
        evidence_cost: 5_000_000.0,
        tinfoil_reward: 100,
        effects: &[Effect::BelieverMultiplier(1.5)],
    },
];

pub const PRESTIGE_UPGRADES: &[PrestigeUpgradeDef] = &[
    PrestigeUpgradeDef {
        id: "illuminati_seal",
        name: "Illuminati Seal",
        token_cost: 1,
        effects: &[Effect::EpsMultiplier(1.5)],
    },
    PrestigeUpgradeDef {
        id: "secret_handshake",
        name: "Secret Handshake",
        token_cost: 2,
        effects: &[Effect::ClickMultiplier(2.0)],
    },
    PrestigeUpgradeDef {
        id: "seed_fund",
        name: "Seed Fund",
        token_cost: 3,
        effects: &[Effect::StartingEvidence(1_000.0)],
    },
    PrestigeUpgradeDef {
        id: "bulk_discount",
        name: "Bulk Discount",
        token_cost: 3,
        effects: &[Effect::GeneratorDiscount(0.9)],
    },
    PrestigeUpgradeDef {
        id: "loyal_followers",
        name: "Loyal Followers",
        token_cost: 4,
        effects: &[Effect::BelieverMultiplier(1.5)],
    },
    PrestigeUpgradeDef {
        id: "eternal_vigil",
        name: "Eternal Vigil",
        token_cost: 5,
        effects: &[Effect::FullOfflineEfficiency],
    },
    PrestigeUpgradeDef {
        id: "inner_circle",
        name: "Inner Circle",
        token_cost: 6,
        effects: &[Effect::QuestRewardMultiplier(2.0)],
    },
];

pub const QUESTS: &[QuestDef] = &[
    QuestDef {
        id: "stakeout",
        name: "Stakeout",
        believer_cost: 5,
        duration_seconds: 60.0,
        success_chance: 0.8,
        risk: QuestRisk::Low,
        evidence_reward: 100.0,
        evidence_multiplier: 30.0,
        tinfoil_reward: 1,
    },
    QuestDef {
        id: "leak_documents",
        name: "Leak the Documents",
        believer_cost: 20,
        duration_seconds: 300.0,
        success_chance: 0.6,
        risk: QuestRisk::Medium,
        evidence_reward: 2_000.0,
        evidence_multiplier: 120.0,
        tinfoil_reward: 5,
    },
    QuestDef {
        id: "infiltrate_agency",
        name: "Infiltrate the Agency",
        believer_cost: 50,
        duration_seconds: 900.0,
        success_chance: 0.4,
        risk: QuestRisk::High,
        evidence_reward: 25_000.0,
        evidence_multiplier: 600.0,
        tinfoil_reward: 20,
    },
    QuestDef {
        id: "expose_the_truth",
        name: "Expose the Truth",
        believer_cost: 150,
        duration_seconds: 3_600.0,
        success_chance: 0.3,
        risk: QuestRisk::High,
        evidence_reward: 500_000.0,
        evidence_multiplier: 1_800.0,
        tinfoil_reward: 75,
    },
];

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_click",
        name: "Down the Rabbit Hole",
        condition: AchievementCondition::LifetimeClicks(1),
        tinfoil_reward: 1,
        effects: &[],
    },
    AchievementDef {
        id: "clicker_100",
        name: "Obsessive",
        condition: AchievementCondition::LifetimeClicks(100),
        tinfoil_reward: 2,
        effects: &[Effect::ClickFlat(1.0)],
    },
    AchievementDef {
        id: "clicker_1000",
        name: "Compulsive",
        condition: AchievementCondition::LifetimeClicks(1_000),
        tinfoil_reward: 5,
        effects: &[Effect::ClickFlat(2.0)],
    },
    AchievementDef {
        id: "evidence_1k",
        name: "Paper Trail",
        condition: AchievementCondition::LifetimeEvidence(1_000.0),
        tinfoil_reward: 2,
        effects: &[],
    },
    AchievementDef {
        id: "evidence_1m",
        name: "Filing Cabinet",
        condition: AchievementCondition::LifetimeEvidence(1_000_000.0),
        tinfoil_reward: 10,
        effects: &[Effect::EpsMultiplier(1.05)],
    },
    AchievementDef {
        id: "blogger_10",
        name: "Blogosphere",
        condition: AchievementCondition::GeneratorOwned {
            generator: "blogger",
            count: 10,
        },
        tinfoil_reward: 2,
        effects: &[],
    },
    AchievementDef {
        id: "blogger_50",
        name: "Content Farm",
        condition: AchievementCondition::GeneratorOwned {
            generator: "blogger",
            count: 50,
        },
        tinfoil_reward: 5,
        effects: &[Effect::GeneratorMultiplier {
            generator: "blogger",
            factor: 1.5,
        }],
    },
    AchievementDef {
        id: "podcaster_25",
        name: "On Air",
        condition: AchievementCondition::GeneratorOwned {
            generator: "podcaster",
            count: 25,
        },
        tinfoil_reward: 5,
        effects: &[],
    },
    AchievementDef {
        id: "truther",
        name: "Truther",
        condition: AchievementCondition::ConspiraciesProven(1),
        tinfoil_reward: 3,
        effects: &[],
    },
    AchievementDef {
        id: "architect",
        name: "Architect of Truth",
        condition: AchievementCondition::ConspiraciesProven(5),
        tinfoil_reward: 25,
        effects: &[Effect::ClickMultiplier(1.5)],
    },
    AchievementDef {
        id: "hour_in",
        name: "Sleepless",
        condition: AchievementCondition::PlayTime(3_600.0),
        tinfoil_reward: 5,
        effects: &[],
    },
    AchievementDef {
        id: "day_in",
        name: "They Never Sleep",
        condition: AchievementCondition::PlayTime(86_400.0),
        tinfoil_reward: 20,
        effects: &[],
    },
];

/// (metric, base target, base tinfoil reward)
const CHALLENGE_TEMPLATES: [(ChallengeMetric, f64, u64); 5] = [
    (ChallengeMetric::Clicks, 500.0, 3),
    (ChallengeMetric::EvidenceEarned, 10_000.0, 3),
    (ChallengeMetric::GeneratorsBought, 25.0, 4),
    (ChallengeMetric::QuestsCompleted, 3.0, 5),
    (ChallengeMetric::BonusTargetsClaimed, 2.0, 5),
];

/// The shipped content tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl Catalog for DefaultCatalog {
    fn generators(&self) -> &[GeneratorDef] {
        GENERATORS
    }

    fn upgrades(&self) -> &[UpgradeDef] {
        UPGRADES
    }

    fn shop_items(&self) -> &[ShopItemDef] {
        SHOP_ITEMS
    }

    fn skills(&self) -> &[SkillDef] {
        SKILLS
    }

    fn conspiracies(&self) -> &[ConspiracyDef] {
        CONSPIRACIES
    }

    fn prestige_upgrades(&self) -> &[PrestigeUpgradeDef] {
        PRESTIGE_UPGRADES
    }

    fn quests(&self) -> &[QuestDef] {
        QUESTS
    }

    fn achievements(&self) -> &[AchievementDef] {
        ACHIEVEMENTS
    }

    fn tokens_for(&self, total_evidence: f64) -> u64 {
        if total_evidence <= 0.0 {
            return 0;
        }
        (total_evidence / TOKEN_BASE_EVIDENCE).sqrt().floor() as u64
    }

    fn daily_challenges(&self, seed: u64) -> Vec<ChallengeDef> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut templates = CHALLENGE_TEMPLATES;
        templates.shuffle(&mut rng);

        templates
            .iter()
            .take(DAILY_CHALLENGE_COUNT)
            .enumerate()
            .map(|(index, (metric, base_target, base_reward))| {
                let scale = rng.gen_range(1..=3u64);
                ChallengeDef {
                    id: format!("daily-{}-{}", seed, index),
                    metric: *metric,
                    target: base_target * scale as f64,
                    tinfoil_reward: base_reward * scale,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_per_table() {
        fn assert_unique<'a>(ids: impl Iterator<Item = &'a str>) {
            let mut seen = HashSet::new();
            for id in ids {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_unique(GENERATORS.iter().map(|g| g.id));
        assert_unique(UPGRADES.iter().map(|u| u.id));
        assert_unique(SHOP_ITEMS.iter().map(|s| s.id));
        assert_unique(SKILLS.iter().map(|s| s.id));
        assert_unique(CONSPIRACIES.iter().map(|c| c.id));
        assert_unique(PRESTIGE_UPGRADES.iter().map(|p| p.id));
        assert_unique(QUESTS.iter().map(|q| q.id));
        assert_unique(ACHIEVEMENTS.iter().map(|a| a.id));
    }

    #[test]
    fn test_effect_targets_reference_known_generators() {
        let catalog = DefaultCatalog;
        let all_effects = UPGRADES
            .iter()
            .flat_map(|u| u.effects.iter())
            .chain(ACHIEVEMENTS.iter().flat_map(|a| a.effects.iter()));
        for effect in all_effects {
            if let Effect::GeneratorMultiplier { generator, .. } = effect {
                assert!(catalog.generator(generator).is_some(), "{}", generator);
            }
        }
    }

    #[test]
    fn test_skill_prerequisites_exist() {
        let catalog = DefaultCatalog;
        for skill in SKILLS {
            if let Some(parent) = skill.requires {
                assert!(catalog.skill(parent).is_some(), "{}", parent);
            }
        }
    }

    #[test]
    fn test_blogger_matches_reference_curve() {
        let blogger = DefaultCatalog.generator("blogger").unwrap();
        assert!((blogger.cost(0) - 10.0).abs() < 1e-9);
        assert!((blogger.cost(1) - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_tokens_for_is_monotonic() {
        let catalog = DefaultCatalog;
        assert_eq!(catalog.tokens_for(0.0), 0);
        assert_eq!(catalog.tokens_for(49_999.0), 0);
        assert_eq!(catalog.tokens_for(60_000.0), 1);
        let mut last = 0;
        for step in 0..200 {
            let tokens = catalog.tokens_for(step as f64 * 25_000.0);
            assert!(tokens >= last);
            last = tokens;
        }
    }

    #[test]
    fn test_daily_challenges_are_deterministic_per_seed() {
        let catalog = DefaultCatalog;
        let a = catalog.daily_challenges(20261018);
        let b = catalog.daily_challenges(20261018);
        assert_eq!(a, b);
        assert_eq!(a.len(), DAILY_CHALLENGE_COUNT);

        let metrics: HashSet<_> = a.iter().map(|c| c.metric).collect();
        assert_eq!(metrics.len(), DAILY_CHALLENGE_COUNT, "metrics are distinct");
    }

    #[test]
    fn test_daily_challenges_differ_between_days() {
        let catalog = DefaultCatalog;
        let days: Vec<_> = (0..10)
            .map(|d| catalog.daily_challenges(20261001 + d))
            .collect();
        assert!(days.windows(2).any(|w| w[0] != w[1]));
    }
}
