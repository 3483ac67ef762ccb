//! Aggregate hero state, owned by the orchestrator.

use crate::tiers::Tier3Unlocks;
use crate::visibility::VisibilityState;
use fnv::FnvHashSet;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct HeroState {
    pub visibility: VisibilityState,
    pub interaction_count: u32,
    pub time_on_page: Duration,
    pub scroll_intent: bool,
    pub scrolling_up: bool,
    pub last_effect_id: Option<&'static str>,
    pub tier2_last_triggered_at: Option<Instant>,
    pub tier2_cooldown: Duration,
    pub unlocks: Tier3Unlocks,
    pub clicked_letters: FnvHashSet<usize>,
}

impl HeroState {
    pub fn time_on_page_secs(&self) -> f32 {
        self.time_on_page.as_secs_f32()
    }

    /// Count one letter click. Returns true the first time `index` is clicked.
    pub fn record_click(&mut self, index: usize) -> bool {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.clicked_letters.insert(index)
    }

    /// Drop per-moment state after a panic reset.
    ///
    /// Unlock flags, interaction history, dwell time and the tier 2 cooldown
    /// survive; a reset must never shorten a cooldown or revoke an unlock.
    pub fn clear_transient(&mut self) {
        self.last_effect_id = None;
        self.scroll_intent = false;
        self.scrolling_up = false;
    }
}
