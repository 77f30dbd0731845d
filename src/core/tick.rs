//! The advance step: the one entry point that moves game time.
//!
//! [`Engine::advance`] runs the per-step stages in a fixed order and returns a
//! [`TickResult`] describing what happened, so drivers (the real-time loop,
//! the simulator, tests) can report progress without inspecting the ledger.
//! The same code path serves 100ms real-time ticks and multi-minute
//! simulator steps.

use super::engine::Engine;
use super::modifiers::{Modifiers, Rates};
use crate::combo::logic as combo;
use crate::daily::logic::refresh_progress;
use crate::events::logic::{expire_events, roll_spawns};
use crate::events::EventChange;
use crate::quests::logic::{due_quests, resolve_quest, success_chance};
use crate::quests::QuestOutcome;
use log::{debug, info, warn};
use rand::Rng;

/// A single event produced by an advance or by an action since the last
/// advance.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Clicking ────────────────────────────────────────────────
    /// The combo meter filled and paid out.
    ComboBurst { amount: f64 },

    // ── Random events ───────────────────────────────────────────
    /// A buff or bonus target spawned or expired.
    Event(EventChange),

    // ── Quests ──────────────────────────────────────────────────
    QuestResolved(QuestOutcome),

    // ── Unlocks ─────────────────────────────────────────────────
    AchievementUnlocked { id: &'static str },
    ChallengeCompleted { id: String },

    // ── Prestige ────────────────────────────────────────────────
    Ascended { tokens: u64, times_ascended: u32 },
}

/// Result of one advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events in the order they happened. Events raised by actions since the
    /// previous advance come first.
    pub events: Vec<TickEvent>,
    /// Evidence produced by generators during the step.
    pub evidence_produced: f64,
    /// Whole auto-clicks flushed during the step.
    pub auto_clicks: u32,
    pub auto_click_evidence: f64,
}

impl TickResult {
    pub fn quest_outcomes(&self) -> impl Iterator<Item = &QuestOutcome> {
        self.events.iter().filter_map(|e| match e {
            TickEvent::QuestResolved(outcome) => Some(outcome),
            _ => None,
        })
    }
}

impl<R: Rng> Engine<R> {
    /// Move the game clock forward by `delta` seconds.
    ///
    /// Negative or non-finite deltas are treated as zero. A zero delta only
    /// settles what is already due (expired events, finished quests,
    /// completed challenges, unlocked achievements).
    pub fn advance(&mut self, delta: f64) -> TickResult {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let mut result = TickResult {
            events: std::mem::take(&mut self.pending),
            ..TickResult::default()
        };

        // ── 1. Clock ────────────────────────────────────────────
        self.state.clock += delta;
        let now = self.state.clock;

        let mods = Modifiers::resolve(&self.state, self.catalog.as_ref());
        let rates = Rates::calculate(&self.state, self.catalog.as_ref(), &mods);

        // ── 2. Passive production ───────────────────────────────
        let produced = rates.eps * delta;
        self.state.earn(produced);
        result.evidence_produced = produced;

        // ── 3. Auto-clicks ──────────────────────────────────────
        self.flush_auto_clicks(delta, &mods, &rates, &mut result);

        // ── 4. Combo decay ──────────────────────────────────────
        combo::decay(&mut self.state.combo, now, delta, &self.config.combo);

        // ── 5. Random events ────────────────────────────────────
        let mut changes = expire_events(&mut self.state.events, now);
        changes.extend(roll_spawns(
            &mut self.state.events,
            now,
            delta,
            self.config.base_tick_seconds,
            &self.config.events,
            &mut self.rng,
        ));
        for change in changes {
            info!("Event: {:?}", change);
            result.events.push(TickEvent::Event(change));
        }

        // ── 6. Quests ───────────────────────────────────────────
        self.resolve_due_quests(now, &mods, &rates, &mut result);

        // ── 7. Daily challenges ─────────────────────────────────
        for id in refresh_progress(&mut self.state.daily) {
            info!("Daily challenge completed: {}", id);
            result.events.push(TickEvent::ChallengeCompleted { id });
        }

        // ── 8. Achievements ─────────────────────────────────────
        self.recheck_achievements();
        result.events.append(&mut self.pending);

        result
    }

    fn flush_auto_clicks(
        &mut self,
        delta: f64,
        mods: &Modifiers,
        rates: &Rates,
        result: &mut TickResult,
    ) {
        if mods.auto_click_rate <= 0.0 {
            return;
        }
        let progress = self.state.auto_click_progress + mods.auto_click_rate * delta;
        let whole = progress.floor();
        self.state.auto_click_progress = progress - whole;

        let cap = self.config.max_auto_clicks_per_advance;
        let clicks = if whole >= cap as f64 { cap } else { whole as u32 };
        for _ in 0..clicks {
            let click = self.perform_click(false, 1.0, mods, rates);
            result.auto_click_evidence += click.amount;
        }

        // Clicks past the cap are paid in one batch at plain click power.
        let overflow = whole - clicks as f64;
        if overflow >= 1.0 {
            let mut amount = overflow * rates.click_power;
            if self.state.events.buff_active(self.state.clock) {
                amount *= self.config.events.buff_click_multiplier;
            }
            self.state.earn(amount);
            self.state.lifetime.clicks += overflow as u64;
            self.state.daily.counters.clicks += overflow as u64;
            result.auto_click_evidence += amount;
            debug!("Batched {} auto-clicks past the per-step cap", overflow);
        }
        result.auto_clicks = whole.min(u32::MAX as f64) as u32;
    }

    fn resolve_due_quests(
        &mut self,
        now: f64,
        mods: &Modifiers,
        rates: &Rates,
        result: &mut TickResult,
    ) {
        for id in due_quests(&self.state.active_quests, now) {
            let Some(quest) = self.state.active_quests.remove(&id) else {
                continue;
            };
            let Some(def) = self.catalog.quest(&id) else {
                warn!("Quest {} is no longer in the catalog; releasing believers", id);
                continue;
            };

            let chance = success_chance(
                def,
                mods.quest_success_bonus,
                mods.guaranteed_quests,
                &self.config.quests,
            );
            let outcome = resolve_quest(
                &quest,
                def,
                chance,
                rates.eps,
                mods.quest_reward_multiplier,
                &self.config.quests,
                &mut self.rng,
            );

            self.state.earn(outcome.evidence);
            self.state.tinfoil += outcome.tinfoil;
            self.state.believers_lost += outcome.believers_lost;
            if outcome.success {
                self.state.lifetime.quests_succeeded += 1;
                self.state.daily.counters.quests_completed += 1;
            } else {
                self.state.lifetime.quests_failed += 1;
            }

            info!(
                "Quest {} {}: {:.1} evidence, {} tinfoil, {} believers lost",
                def.name,
                if outcome.success { "succeeded" } else { "failed" },
                outcome.evidence,
                outcome.tinfoil,
                outcome.believers_lost
            );
            result.events.push(TickEvent::QuestResolved(outcome));
        }
    }
}
