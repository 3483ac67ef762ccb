// Host-side tests for tier 2 gating and tier 3 unlocks.

use fnv::FnvHashSet;
use hero_core::*;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn state(interactions: u32, dwell_secs: u64, intent: bool) -> HeroState {
    HeroState {
        interaction_count: interactions,
        time_on_page: Duration::from_secs(dwell_secs),
        scroll_intent: intent,
        ..HeroState::default()
    }
}

#[test]
fn interaction_count_is_a_hard_floor() {
    let now = Instant::now();
    assert!(!can_trigger_tier2(&state(4, 20, true), now));
    assert!(can_trigger_tier2(&state(5, 8, false), now));
}

#[test]
fn dwell_or_intent_is_required() {
    let now = Instant::now();
    assert!(!can_trigger_tier2(&state(6, 7, false), now));
    assert!(can_trigger_tier2(&state(6, 0, true), now));
}

#[test]
fn needs_full_visibility_and_no_upward_scroll() {
    let now = Instant::now();
    let mut s = state(5, 8, false);
    s.visibility = VisibilityState::Reduced;
    assert!(!can_trigger_tier2(&s, now));
    s.visibility = VisibilityState::Full;
    s.scrolling_up = true;
    assert!(!can_trigger_tier2(&s, now));
}

#[test]
fn cooldown_blocks_then_expires() {
    let t0 = Instant::now();
    let mut rng = StdRng::seed_from_u64(5);
    let mut s = state(5, 8, false);
    record_tier2_trigger(&mut s, &mut rng, NORMAL_POWER.tier2_cooldown_ms, t0);

    let cd = s.tier2_cooldown;
    assert!(cd >= Duration::from_millis(8_000) && cd <= Duration::from_millis(12_000));
    assert!(!can_trigger_tier2(&s, t0 + Duration::from_millis(1_000)));
    assert_eq!(
        cooldown_remaining(&s, t0 + Duration::from_millis(1_000)),
        cd - Duration::from_millis(1_000)
    );
    assert_eq!(cooldown_remaining(&s, t0 + cd), Duration::ZERO);
    assert!(can_trigger_tier2(&s, t0 + cd));
}

#[test]
fn cooldown_draws_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let cd = roll_cooldown(&mut rng, 8_000).as_millis();
        assert!((8_000..=12_000).contains(&cd), "cooldown {cd} out of range");
    }
}

#[test]
fn caustics_unlock_is_monotonic() {
    let mut unlocks = Tier3Unlocks::default();
    let clicked = FnvHashSet::default();
    assert!(unlocks.observe(9, &clicked, 5).is_empty());
    let newly = unlocks.observe(10, &clicked, 5);
    assert_eq!(newly.as_slice(), &[Tier3Effect::Caustics]);
    // Condition drops, flag stays
    assert!(unlocks.observe(0, &clicked, 5).is_empty());
    assert!(unlocks.caustics());
}

#[test]
fn particle_trail_needs_every_letter() {
    let mut unlocks = Tier3Unlocks::default();
    let mut clicked: FnvHashSet<usize> = [0, 1, 2].into_iter().collect();
    unlocks.observe(3, &clicked, 4);
    assert!(!unlocks.particle_trail());
    clicked.insert(3);
    let newly = unlocks.observe(4, &clicked, 4);
    assert_eq!(newly.as_slice(), &[Tier3Effect::ParticleTrail]);
    clicked.clear();
    unlocks.observe(0, &clicked, 4);
    assert!(unlocks.particle_trail());
}

#[test]
fn active_set_is_suppressed_but_unlocks_survive() {
    let mut unlocks = Tier3Unlocks::default();
    let clicked: FnvHashSet<usize> = (0..3).collect();
    unlocks.observe(12, &clicked, 3);

    let all = unlocks.active(VisibilityState::Full, true);
    assert_eq!(all.as_slice(), &[Tier3Effect::Caustics, Tier3Effect::ParticleTrail]);
    assert!(unlocks.active(VisibilityState::Frozen, true).is_empty());
    assert!(unlocks.active(VisibilityState::Full, false).is_empty());
    assert!(unlocks.caustics() && unlocks.particle_trail());
    assert_eq!(unlocks.active(VisibilityState::Reduced, true).len(), 2);
}
