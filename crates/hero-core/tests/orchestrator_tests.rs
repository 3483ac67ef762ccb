// Host-side tests for click orchestration, tier 2 triggering and panic reset.

use glam::Vec2;
use hero_core::*;
use instant::Instant;
use std::time::Duration;

const LETTERS: usize = 6;

fn hero(t0: Instant) -> HeroOrchestrator {
    HeroOrchestrator::new(HeroConfig::new(LETTERS), NORMAL_POWER, true, t0)
}

#[derive(Default)]
struct CountingHooks {
    killed: u32,
    cleared: u32,
    released: u32,
}

impl ResetHooks for CountingHooks {
    fn kill_animations(&mut self) {
        self.killed += 1;
    }
    fn clear_styles(&mut self) {
        self.cleared += 1;
    }
    fn release_renderer(&mut self) {
        self.released += 1;
    }
}

/// Click distinct letters, finishing each effect so locks never interfere.
fn warm_up(h: &mut HeroOrchestrator, clicks: usize, now: Instant) {
    for i in 0..clicks {
        if let Some(started) = h.handle_click(i % LETTERS, now).expect("valid letter") {
            h.finish_effect(started.ticket);
        }
    }
}

#[test]
fn click_starts_a_local_effect_and_holds_its_locks() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let started = h.handle_click(2, t0).unwrap().expect("first click plays");
    let req = &started.request;
    assert_eq!(req.tier, Tier::Local);
    assert_eq!(req.letter_index, Some(2));
    assert!((req.intensity - 1.0).abs() < 1e-6);
    assert!(req.duration_ms > 0);
    assert_eq!(h.state().last_effect_id, Some(req.effect_id));
    assert_eq!(h.state().interaction_count, 1);
    assert!(!h.active_locks(t0).is_empty());
    assert_eq!(h.metrics().effects_running_count, 1);

    assert!(h.finish_effect(started.ticket));
    assert!(h.active_locks(t0).is_empty());
    assert_eq!(h.metrics().effects_running_count, 0);
}

#[test]
fn consecutive_clicks_never_repeat_an_effect() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut prev: Option<&str> = None;
    for i in 0..200 {
        if let Some(s) = h.handle_click(i % LETTERS, t0).unwrap() {
            assert_ne!(Some(s.request.effect_id), prev);
            prev = Some(s.request.effect_id);
            h.finish_effect(s.ticket);
        }
    }
}

#[test]
fn contention_skips_the_click_silently() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut held = Vec::new();
    let mut skipped = 0;
    // Never finishing effects: letter channels fill up and later clicks get refused
    for i in 0..40 {
        match h.handle_click(i % LETTERS, t0).unwrap() {
            Some(s) => held.push(s.ticket),
            None => skipped += 1,
        }
    }
    assert!(skipped > 0, "expected at least one refused click");
    assert_eq!(h.state().interaction_count, 40);
    // Locks lapse on their own after the longest local duration
    let later = t0 + Duration::from_millis(1_001);
    assert!(h.active_locks(later).is_empty());
}

#[test]
fn out_of_range_letter_is_an_error() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    assert_eq!(
        h.handle_click(LETTERS, t0).err(),
        Some(HeroError::LetterOutOfRange {
            index: LETTERS,
            count: LETTERS
        })
    );
    assert_eq!(h.state().interaction_count, 0);
}

#[test]
fn frozen_hero_counts_clicks_but_plays_nothing() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    h.set_visibility_ratio(0.2);
    assert_eq!(h.visibility(), VisibilityState::Frozen);
    assert!(h.handle_click(0, t0).unwrap().is_none());
    assert_eq!(h.state().interaction_count, 1);
    assert_eq!(h.effective_intensity(), 0.0);
}

#[test]
fn reduced_visibility_scales_intensity() {
    let t0 = Instant::now();
    let mut h = HeroOrchestrator::new(HeroConfig::new(LETTERS), LOW_POWER, true, t0);
    h.set_visibility_ratio(0.6);
    let s = h.handle_click(0, t0).unwrap().expect("reduced still plays");
    assert!((s.request.intensity - 0.6 * 0.5).abs() < 1e-6);
}

#[test]
fn tier2_opens_after_warm_up_and_starts_a_cooldown() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut hooks = NoopHooks;
    warm_up(&mut h, 5, t0);
    assert!(!h.can_trigger_tier2(t0), "no dwell time and no scroll intent yet");

    let t8 = t0 + Duration::from_secs(8);
    h.tick(t8, &mut hooks);
    assert!(h.can_trigger_tier2(t8));

    let started = h
        .trigger_tier2(Vec2::new(0.3, 0.4), t8)
        .expect("tier 2 plays");
    assert_eq!(started.request.tier, Tier::Viewport);
    assert_eq!(started.request.origin, Some(Vec2::new(0.3, 0.4)));

    let remaining = h.cooldown_remaining(t8);
    assert!(remaining >= Duration::from_millis(8_000) && remaining <= Duration::from_millis(12_000));
    assert!(!h.can_trigger_tier2(t8 + Duration::from_secs(1)));
    assert!(h.trigger_tier2(Vec2::ZERO, t8 + Duration::from_secs(1)).is_none());
    assert!(h.can_trigger_tier2(t8 + remaining));
}

#[test]
fn scroll_intent_substitutes_for_dwell_and_upward_scroll_blocks() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    warm_up(&mut h, 5, t0);
    h.on_scroll(0.0, 800.0, t0);
    h.on_scroll(200.0, 800.0, t0 + Duration::from_millis(100));
    assert!(h.state().scroll_intent);
    let t = t0 + Duration::from_millis(150);
    assert!(h.can_trigger_tier2(t));

    h.on_scroll(150.0, 800.0, t);
    assert!(h.state().scrolling_up);
    assert!(!h.can_trigger_tier2(t));
    // Upward movement older than the active window no longer counts
    assert!(h.can_trigger_tier2(t + Duration::from_millis(500)));
}

#[test]
fn tier3_unlocks_survive_everything() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut hooks = CountingHooks::default();
    warm_up(&mut h, 10, t0);
    assert!(h.state().unlocks.caustics());
    assert!(h.state().unlocks.particle_trail(), "all {LETTERS} letters clicked");
    assert_eq!(h.active_tier3_effects().len(), 2);

    h.set_visibility_ratio(0.1);
    assert!(h.active_tier3_effects().is_empty());
    h.set_visibility_ratio(1.0);
    h.set_enabled(false);
    assert!(h.active_tier3_effects().is_empty());
    h.set_enabled(true);

    h.panic_reset(&mut hooks);
    assert!(h.state().unlocks.caustics() && h.state().unlocks.particle_trail());
    let tags: Vec<&str> = h.active_tier3_effects().iter().map(|e| e.tag()).collect();
    assert_eq!(tags, vec!["caustics", "particleTrail"]);
}

#[test]
fn tier3_needs_graphics_and_the_normal_preset() {
    let t0 = Instant::now();
    let mut h = HeroOrchestrator::new(HeroConfig::new(LETTERS), NORMAL_POWER, false, t0);
    warm_up(&mut h, 12, t0);
    assert!(h.state().unlocks.caustics());
    assert!(h.active_tier3_effects().is_empty());

    let mut h = hero(t0);
    warm_up(&mut h, 12, t0);
    h.set_power(LOW_POWER);
    assert!(h.active_tier3_effects().is_empty());
}

#[test]
fn panic_reset_releases_all_locks_and_counts_once() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut hooks = CountingHooks::default();
    warm_up(&mut h, 5, t0);
    h.tick(t0 + Duration::from_secs(9), &mut hooks);
    let t = t0 + Duration::from_secs(9);

    let local = h.handle_click(0, t).unwrap().expect("local effect");
    // A viewport pick may collide with the local effect's lighting lock; a
    // refusal leaves the gate open, so retry until one fits.
    let viewport = (0..50)
        .find_map(|_| h.trigger_tier2(Vec2::splat(0.5), t))
        .expect("viewport effect");
    let channels: std::collections::HashSet<Channel> =
        h.active_locks(t).iter().map(|l| l.channel).collect();
    assert!(channels.len() >= 2, "locks on distinct channels");

    let before = h.reset_count();
    h.panic_reset(&mut hooks);
    assert!(h.active_locks(t).is_empty());
    assert_eq!(h.reset_count(), before + 1);
    assert_eq!((hooks.killed, hooks.cleared, hooks.released), (1, 1, 1));
    assert!(h.active_effects().is_empty());
    assert_eq!(h.metrics().effects_running_count, 0);
    assert_eq!(h.state().last_effect_id, None);

    // Tickets from before the reset are stale
    assert!(!h.finish_effect(local.ticket));
    assert!(!h.finish_effect(viewport.ticket));

    // Reset never shortens a running cooldown
    assert!(h.cooldown_remaining(t) > Duration::ZERO);
}

#[test]
fn stale_ticket_cannot_release_new_locks() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let old = h.handle_click(0, t0).unwrap().expect("plays");
    h.panic_reset(&mut NoopHooks);
    let fresh = h.handle_click(1, t0).unwrap().expect("plays after reset");
    assert!(!h.finish_effect(old.ticket));
    assert!(!h.active_locks(t0).is_empty());
    assert!(h.finish_effect(fresh.ticket));
}

#[test]
fn resize_burst_is_debounced_into_one_reset() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut hooks = CountingHooks::default();
    for ms in [0, 40, 80, 120] {
        h.on_resize(t0 + Duration::from_millis(ms));
        assert!(h.tick(t0 + Duration::from_millis(ms), &mut hooks).is_none());
    }
    // 150 ms after the last event, not the first
    assert!(h.tick(t0 + Duration::from_millis(200), &mut hooks).is_none());
    assert_eq!(
        h.tick(t0 + Duration::from_millis(270), &mut hooks),
        Some(ResetTrigger::Resize)
    );
    assert!(h.tick(t0 + Duration::from_millis(600), &mut hooks).is_none());
    assert_eq!(h.reset_count(), 1);
}

#[test]
fn orientation_and_route_changes_reset_immediately() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let mut hooks = CountingHooks::default();
    h.on_orientation_change(&mut hooks);
    assert_eq!(h.reset_count(), 1);

    assert!(!h.on_route("/", &mut hooks), "first path is only recorded");
    assert!(!h.on_route("/", &mut hooks));
    assert!(h.on_route("/projects", &mut hooks));
    assert_eq!(h.reset_count(), 2);
    assert_eq!(hooks.killed, 2);
}

#[test]
fn finished_effects_drop_out_of_the_frame() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let _ticket = h.handle_click(0, t0).unwrap().expect("plays").ticket;
    assert_eq!(h.active_effects().len(), 1);
    h.tick(t0 + Duration::from_secs(2), &mut NoopHooks);
    assert!(h.active_effects().is_empty());
    assert_eq!(h.metrics().effects_running_count, 0);
    assert_eq!(h.state().time_on_page, Duration::from_secs(2));
}

#[test]
fn render_config_follows_power_and_perf() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let cfg = h.render_config();
    assert_eq!(cfg.target_fps, 60);
    assert_eq!(cfg.max_device_scale, 2.0);
    assert_eq!(cfg.intensity_multiplier, 1.0);

    // Sustained 25 fps frames engage the perf backoff
    let mut t = t0;
    for _ in 0..12 {
        t += Duration::from_millis(40);
        h.tick(t, &mut NoopHooks);
    }
    assert!(h.should_reduce_effects());
    assert_eq!(h.render_config().intensity_multiplier, 0.5);
    assert!((h.effective_intensity() - 0.5).abs() < 1e-6);
}

#[test]
fn viewport_effects_produce_uniforms() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    warm_up(&mut h, 5, t0);
    let t = t0 + Duration::from_secs(8);
    h.tick(t, &mut NoopHooks);
    let _started = h.trigger_tier2(Vec2::new(0.2, 0.8), t).expect("plays");
    let uniforms = h.effect_uniforms(t + Duration::from_millis(300));
    assert_eq!(uniforms.len(), 1);
    assert_eq!(uniforms[0].origin, [0.2, 0.8]);
    assert!(uniforms[0].progress > 0.0 && uniforms[0].progress < 1.0);
}

#[test]
fn tier3_layers_render_from_the_catalog_under_a_hard_overlay() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    warm_up(&mut h, 10, t0);
    assert_eq!(h.active_tier3_effects().len(), 2);

    // Viewport effects keep their cooldown; step past it until ripple plays
    let mut t = t0;
    let ripple = (0..50)
        .find_map(|_| {
            t += Duration::from_secs(13);
            h.tick(t, &mut NoopHooks);
            let started = h.trigger_tier2(Vec2::splat(0.5), t)?;
            if started.request.effect_id == "ripple" {
                return Some(started);
            }
            h.finish_effect(started.ticket);
            None
        })
        .expect("ripple eventually plays");

    let locks = h.active_locks(t);
    assert!(locks
        .iter()
        .any(|l| l.channel == Channel::WebglOverlay && l.lock_type == LockType::Hard));
    assert!(locks.iter().all(|l| l.owner == ripple.request.instance));

    let kinds: Vec<u32> = h
        .effect_uniforms(t + Duration::from_millis(300))
        .iter()
        .map(|u| u.kind)
        .collect();
    let catalog = EffectCatalog::standard();
    let expected: Vec<u32> = ["ripple", "caustics", "particleTrail"]
        .iter()
        .map(|id| catalog.find(id).expect("catalogued").visual.code())
        .collect();
    assert_eq!(kinds, expected);
}

#[test]
fn deferred_hooks_replay_after_the_reset() {
    let t0 = Instant::now();
    let mut h = hero(t0);
    let _running = h.handle_click(0, t0).unwrap().expect("plays");

    let mut deferred = DeferredHooks::default();
    assert!(deferred.is_empty());
    h.panic_reset(&mut deferred);
    // The orchestrator is already at rest before any host callback runs
    assert!(h.active_locks(t0).is_empty());
    assert_eq!(h.reset_count(), 1);
    assert!(!deferred.is_empty());

    let mut hooks = CountingHooks::default();
    deferred.replay(&mut hooks);
    assert_eq!((hooks.killed, hooks.cleared, hooks.released), (1, 1, 1));

    // Nothing recorded, nothing replayed
    let mut hooks = CountingHooks::default();
    DeferredHooks::default().replay(&mut hooks);
    assert_eq!((hooks.killed, hooks.cleared, hooks.released), (0, 0, 0));
}
