//! Tier gating: tier 2 eligibility with randomized cooldowns, and the
//! session-persistent tier 3 unlocks.

use crate::constants::*;
use crate::state::HeroState;
use crate::visibility::VisibilityState;
use fnv::FnvHashSet;
use instant::Instant;
use rand::Rng;
use smallvec::SmallVec;
use std::time::Duration;

/// Time left before tier 2 may trigger again.
pub fn cooldown_remaining(state: &HeroState, now: Instant) -> Duration {
    match state.tier2_last_triggered_at {
        Some(at) => state
            .tier2_cooldown
            .saturating_sub(crate::elapsed_between(at, now)),
        None => Duration::ZERO,
    }
}

/// Tier 2 requires every one of: full visibility, not scrolling up, at least
/// five interactions, enough dwell time or scroll intent, and no active
/// cooldown.
pub fn can_trigger_tier2(state: &HeroState, now: Instant) -> bool {
    tier2_gate(state, state.scrolling_up, now)
}

/// [`can_trigger_tier2`] with a live scrolling-up reading instead of the one
/// stored on `state`.
pub fn tier2_gate(state: &HeroState, scrolling_up: bool, now: Instant) -> bool {
    state.visibility == VisibilityState::Full
        && !scrolling_up
        && state.interaction_count >= TIER2_MIN_INTERACTIONS
        && (state.time_on_page_secs() >= TIER2_MIN_DWELL_SECS || state.scroll_intent)
        && cooldown_remaining(state, now).is_zero()
}

/// Draw a cooldown uniformly from `[base_ms, base_ms + jitter]`.
pub fn roll_cooldown<R: Rng + ?Sized>(rng: &mut R, base_ms: u32) -> Duration {
    let ms = rng.gen_range(base_ms..=base_ms.saturating_add(TIER2_COOLDOWN_JITTER_MS));
    Duration::from_millis(ms as u64)
}

/// Start a tier 2 cooldown at `now`.
pub fn record_tier2_trigger<R: Rng + ?Sized>(
    state: &mut HeroState,
    rng: &mut R,
    base_ms: u32,
    now: Instant,
) {
    state.tier2_cooldown = roll_cooldown(rng, base_ms);
    state.tier2_last_triggered_at = Some(now);
    log::debug!(
        "[tiers] tier 2 cooldown {} ms",
        state.tier2_cooldown.as_millis()
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier3Effect {
    Caustics,
    ParticleTrail,
}

impl Tier3Effect {
    pub fn tag(self) -> &'static str {
        match self {
            Tier3Effect::Caustics => "caustics",
            Tier3Effect::ParticleTrail => "particleTrail",
        }
    }
}

pub type ActiveTier3 = SmallVec<[Tier3Effect; 2]>;

/// Reward unlocks. Both flags are monotonic: once set they stay set for the
/// session no matter what happens to the conditions that set them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tier3Unlocks {
    caustics: bool,
    particle_trail: bool,
}

impl Tier3Unlocks {
    pub fn caustics(&self) -> bool {
        self.caustics
    }

    pub fn particle_trail(&self) -> bool {
        self.particle_trail
    }

    /// Re-evaluate unlock conditions. Returns the effects unlocked by this call.
    pub fn observe(
        &mut self,
        interaction_count: u32,
        clicked_letters: &FnvHashSet<usize>,
        letter_count: usize,
    ) -> ActiveTier3 {
        let mut newly = ActiveTier3::new();
        if !self.caustics && interaction_count >= CAUSTICS_UNLOCK_INTERACTIONS {
            self.caustics = true;
            newly.push(Tier3Effect::Caustics);
        }
        if !self.particle_trail
            && letter_count > 0
            && (0..letter_count).all(|i| clicked_letters.contains(&i))
        {
            self.particle_trail = true;
            newly.push(Tier3Effect::ParticleTrail);
        }
        for e in &newly {
            log::info!("[tiers] unlocked {}", e.tag());
        }
        newly
    }

    /// Unlocked effects that should render right now. Unlocking is permanent;
    /// rendering is suppressed while frozen or disabled.
    pub fn active(&self, visibility: VisibilityState, enabled: bool) -> ActiveTier3 {
        let mut out = ActiveTier3::new();
        if !enabled || visibility == VisibilityState::Frozen {
            return out;
        }
        if self.caustics {
            out.push(Tier3Effect::Caustics);
        }
        if self.particle_trail {
            out.push(Tier3Effect::ParticleTrail);
        }
        out
    }
}
