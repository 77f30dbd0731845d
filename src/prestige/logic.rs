//! Ascension eligibility and the scoped reset.

use super::types::AscensionReport;
use crate::catalog::Catalog;
use crate::combo::ComboState;
use crate::core::resource_state::ResourceState;
use crate::events::EventState;

pub fn can_ascend(state: &ResourceState, threshold: f64) -> bool {
    state.total_evidence_earned >= threshold
}

/// Tokens an ascension would pay out right now.
pub fn tokens_earned(state: &ResourceState, catalog: &dyn Catalog) -> u64 {
    catalog.tokens_for(state.total_evidence_earned)
}

/// Perform the reset. The caller checks eligibility first.
///
/// Session progress is wiped; tokens, prestige upgrades, skills, achievements,
/// lifetime statistics, daily challenges and the clock survive.
/// `starting_evidence` reseeds the balance.
pub fn perform_ascension(
    state: &mut ResourceState,
    catalog: &dyn Catalog,
    starting_evidence: f64,
) -> AscensionReport {
    let tokens = tokens_earned(state, catalog);
    let total_before = state.total_evidence_earned;

    state.illuminati_tokens += tokens;
    state.prestige.lifetime_tokens += tokens;
    state.prestige.times_ascended += 1;

    state.evidence = starting_evidence;
    state.total_evidence_earned = 0.0;
    state.tinfoil = 0;
    state.generators.clear();
    state.upgrades.clear();
    state.conspiracies.clear();
    state.shop_items.clear();
    state.active_quests.clear();
    state.believers_lost = 0;
    state.combo = ComboState::default();
    state.events = EventState::default();
    state.auto_click_progress = 0.0;

    AscensionReport {
        tokens_earned: tokens,
        total_evidence_before: total_before,
        times_ascended: state.prestige.times_ascended,
        starting_evidence,
    }
}
