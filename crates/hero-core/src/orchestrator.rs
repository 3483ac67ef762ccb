//! Click/scroll orchestration: visibility regime -> tier gate -> selection ->
//! channel reservation -> play request, plus the panic reset that collapses
//! everything back to rest.

use crate::constants::{PERF_REDUCE_MULTIPLIER, RESIZE_DEBOUNCE_MS};
use crate::effects::{select_weighted, Effect, EffectCatalog, Tier};
use crate::error::HeroError;
use crate::locks::{ChannelLock, ChannelLockManager, EffectInstanceId};
use crate::panic_reset::{PanicReset, ResetHooks, ResetTrigger};
use crate::perf::{PerfConfig, PerformanceMetrics, PerformanceMonitor};
use crate::power::PowerConfig;
use crate::scroll::{ScrollSample, ScrollTracker};
use crate::state::HeroState;
use crate::styles::HeroStyle;
use crate::tiers::{self, ActiveTier3};
use crate::visibility::{VisibilityMachine, VisibilityState, VisibilityTransition};
use crate::visuals::{self, ActiveEffect, EffectUniforms, VisualKind};
use glam::Vec2;
use instant::Instant;
use rand::prelude::*;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HeroConfig {
    /// Number of clickable letters in the headline.
    pub letter_count: usize,
    pub seed: u64,
    pub perf: PerfConfig,
    pub resize_debounce: Duration,
}

impl HeroConfig {
    pub fn new(letter_count: usize) -> Self {
        Self {
            letter_count,
            seed: 0x5EED_4E50,
            perf: PerfConfig::default(),
            resize_debounce: Duration::from_millis(RESIZE_DEBOUNCE_MS),
        }
    }
}

/// What the animation engine is asked to play.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayRequest {
    pub instance: EffectInstanceId,
    pub effect_id: &'static str,
    pub tier: Tier,
    pub intensity: f32,
    /// `-1` for persistent effects.
    pub duration_ms: i64,
    pub easing: &'static str,
    pub letter_index: Option<usize>,
    pub origin: Option<Vec2>,
}

/// Proof that an effect is running. Hand it back to
/// [`HeroOrchestrator::finish_effect`] exactly once when playback completes.
#[derive(Debug)]
#[must_use = "finish the ticket when playback completes or the locks only lapse on expiry"]
pub struct PlaybackTicket {
    instance: EffectInstanceId,
    generation: u64,
}

#[derive(Debug)]
pub struct StartedEffect {
    pub request: PlayRequest,
    pub ticket: PlaybackTicket,
}

/// Values the renderer honours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub intensity_multiplier: f32,
    pub max_device_scale: f32,
    pub target_fps: u32,
}

pub struct HeroOrchestrator {
    cfg: HeroConfig,
    state: HeroState,
    visibility: VisibilityMachine,
    scroll: ScrollTracker,
    locks: ChannelLockManager,
    catalog: EffectCatalog,
    perf: PerformanceMonitor,
    power: PowerConfig,
    accelerated: bool,
    panic: PanicReset,
    active: Vec<ActiveEffect>,
    rng: StdRng,
    next_instance: u64,
    enabled: bool,
    mounted_at: Instant,
}

impl HeroOrchestrator {
    pub fn new(
        cfg: HeroConfig,
        power: PowerConfig,
        accelerated_graphics: bool,
        now: Instant,
    ) -> Self {
        let catalog = EffectCatalog::for_capability(accelerated_graphics);
        if let Err(e) = catalog.validate() {
            log::warn!("[hero] catalog convention violated: {}", e);
        }
        if !accelerated_graphics {
            log::info!("[hero] no accelerated graphics; using CSS effect pool");
        }
        Self {
            state: HeroState::default(),
            visibility: VisibilityMachine::default(),
            scroll: ScrollTracker::new(),
            locks: ChannelLockManager::new(),
            catalog,
            perf: PerformanceMonitor::new(cfg.perf),
            power,
            accelerated: accelerated_graphics,
            panic: PanicReset::new(cfg.resize_debounce),
            active: Vec::new(),
            rng: StdRng::seed_from_u64(cfg.seed),
            next_instance: 0,
            enabled: true,
            mounted_at: now,
            cfg,
        }
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    pub fn config(&self) -> &HeroConfig {
        &self.cfg
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn visibility(&self) -> VisibilityState {
        self.state.visibility
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.perf.metrics()
    }

    pub fn should_reduce_effects(&self) -> bool {
        self.perf.should_reduce_effects()
    }

    pub fn power(&self) -> PowerConfig {
        self.power
    }

    pub fn set_power(&mut self, power: PowerConfig) {
        self.power = power;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling suppresses new triggers and tier 3 rendering; unlocks stay.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn reset_count(&self) -> u64 {
        self.panic.reset_count()
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.active
    }

    pub fn active_locks(&mut self, now: Instant) -> Vec<ChannelLock> {
        self.locks.active_locks(now)
    }

    // ---------------- Inputs ----------------

    pub fn set_visibility_ratio(&mut self, ratio: f32) -> Option<VisibilityTransition> {
        let t = self.visibility.update(ratio);
        self.state.visibility = self.visibility.state();
        t
    }

    pub fn on_scroll(&mut self, scroll_y: f32, hero_height: f32, now: Instant) -> ScrollSample {
        let sample = self.scroll.update(scroll_y, hero_height, now);
        self.state.scroll_intent = self.scroll.intent();
        self.state.scrolling_up = self.scroll.is_scrolling_up(now);
        sample
    }

    /// Visibility x power preset x performance backoff.
    pub fn effective_intensity(&self) -> f32 {
        let perf = if self.perf.should_reduce_effects() {
            PERF_REDUCE_MULTIPLIER
        } else {
            1.0
        };
        self.state.visibility.intensity() * self.power.intensity_multiplier * perf
    }

    /// A click on letter `letter_index`.
    ///
    /// The click always counts toward unlocks. It yields an effect only when
    /// the hero is enabled and visible, a local effect other than the previous
    /// one is available, and all its channels can be reserved.
    pub fn handle_click(
        &mut self,
        letter_index: usize,
        now: Instant,
    ) -> Result<Option<StartedEffect>, HeroError> {
        if letter_index >= self.cfg.letter_count {
            return Err(HeroError::LetterOutOfRange {
                index: letter_index,
                count: self.cfg.letter_count,
            });
        }
        self.state.record_click(letter_index);
        self.state.unlocks.observe(
            self.state.interaction_count,
            &self.state.clicked_letters,
            self.cfg.letter_count,
        );

        if !self.enabled || !self.state.visibility.allows_triggers() {
            return Ok(None);
        }
        let intensity = self.effective_intensity();
        if intensity <= 0.0 {
            return Ok(None);
        }
        let pool = self.catalog.pool(Tier::Local);
        let Some(effect) = select_weighted(pool, self.state.last_effect_id, &mut self.rng) else {
            log::debug!("[hero] local pool exhausted");
            return Ok(None);
        };
        Ok(self.start(effect, intensity, Some(letter_index), None, now))
    }

    pub fn can_trigger_tier2(&self, now: Instant) -> bool {
        self.enabled && tiers::tier2_gate(&self.state, self.scroll.is_scrolling_up(now), now)
    }

    /// Try a viewport effect centred at `origin` (normalised viewport coords).
    ///
    /// The cooldown only starts when an effect actually starts; a lock refusal
    /// leaves the gate open for the next attempt.
    pub fn trigger_tier2(&mut self, origin: Vec2, now: Instant) -> Option<StartedEffect> {
        if !self.can_trigger_tier2(now) {
            return None;
        }
        let intensity = self.effective_intensity();
        let pool = self.catalog.pool(Tier::Viewport);
        let effect = select_weighted(pool, self.state.last_effect_id, &mut self.rng)?;
        let started = self.start(effect, intensity, None, Some(origin), now)?;
        tiers::record_tier2_trigger(
            &mut self.state,
            &mut self.rng,
            self.power.tier2_cooldown_ms,
            now,
        );
        Some(started)
    }

    fn start(
        &mut self,
        effect: &'static Effect,
        intensity: f32,
        letter_index: Option<usize>,
        origin: Option<Vec2>,
        now: Instant,
    ) -> Option<StartedEffect> {
        let instance = EffectInstanceId(self.next_instance + 1);
        let duration = effect.duration.as_duration().unwrap_or(Duration::ZERO);
        self.locks
            .acquire_all(effect.channels, instance, effect.id, duration, now)?;
        self.next_instance = instance.0;
        self.state.last_effect_id = Some(effect.id);
        self.perf.track_effect_start();
        self.active.push(ActiveEffect {
            instance,
            effect,
            origin: origin.unwrap_or(Vec2::splat(0.5)),
            intensity,
            started_at: now,
        });
        log::debug!(
            "[hero] start {} {} tier={} intensity={:.2}",
            effect.id,
            instance,
            effect.tier.level(),
            intensity
        );
        Some(StartedEffect {
            request: PlayRequest {
                instance,
                effect_id: effect.id,
                tier: effect.tier,
                intensity,
                duration_ms: effect.duration.as_ms_hint(),
                easing: effect.easing.tag(),
                letter_index,
                origin,
            },
            ticket: PlaybackTicket {
                instance,
                generation: self.panic.generation(),
            },
        })
    }

    /// Playback finished: release the effect's locks.
    ///
    /// Tickets issued before the last panic reset are stale and ignored; the
    /// reset already released everything they held. Returns whether the ticket
    /// was current.
    pub fn finish_effect(&mut self, ticket: PlaybackTicket) -> bool {
        if ticket.generation != self.panic.generation() {
            log::debug!("[hero] stale ticket {} ignored", ticket.instance);
            return false;
        }
        self.locks.release(ticket.instance);
        let before = self.active.len();
        self.active.retain(|a| a.instance != ticket.instance);
        if self.active.len() < before {
            self.perf.track_effect_end();
        }
        true
    }

    pub fn cooldown_remaining(&self, now: Instant) -> Duration {
        tiers::cooldown_remaining(&self.state, now)
    }

    /// Tier 3 effects that should render now.
    pub fn active_tier3_effects(&self) -> ActiveTier3 {
        if !self.power.tier3_enabled || !self.accelerated {
            return ActiveTier3::new();
        }
        self.state.unlocks.active(self.state.visibility, self.enabled)
    }

    pub fn render_config(&self) -> RenderConfig {
        let perf = if self.perf.should_reduce_effects() {
            PERF_REDUCE_MULTIPLIER
        } else {
            1.0
        };
        RenderConfig {
            intensity_multiplier: self.power.intensity_multiplier * perf,
            max_device_scale: self.power.max_device_scale,
            target_fps: self.power.target_fps,
        }
    }

    pub fn hero_style(&self) -> HeroStyle {
        HeroStyle::from_scroll(&self.scroll.sample(), self.effective_intensity())
    }

    /// Uniform blocks for every effect the renderer should draw this frame.
    pub fn effect_uniforms(&self, now: Instant) -> Vec<EffectUniforms> {
        let mut out: Vec<EffectUniforms> = self
            .active
            .iter()
            .filter(|a| a.effect.visual != VisualKind::LetterOnly)
            .map(|a| a.sample(now))
            .collect();
        let intensity = self.effective_intensity();
        let elapsed = crate::elapsed_between(self.mounted_at, now).as_secs_f32();
        let persistent = self.catalog.pool(Tier::Persistent);
        for t3 in self.active_tier3_effects() {
            let Some(effect) = persistent.iter().find(|e| e.id == t3.tag()) else {
                continue;
            };
            out.push(visuals::update(
                effect.visual,
                (elapsed / 10.0).fract(),
                Vec2::splat(0.5),
                intensity,
            ));
        }
        out
    }

    // ---------------- Frame + layout events ----------------

    /// Per-frame bookkeeping. Returns the reset trigger if a debounced resize
    /// fired during this frame.
    pub fn tick(&mut self, now: Instant, hooks: &mut dyn ResetHooks) -> Option<ResetTrigger> {
        self.state.time_on_page = crate::elapsed_between(self.mounted_at, now);
        self.perf.record_frame(now);
        self.scroll.settle(now);
        self.state.scrolling_up = self.scroll.is_scrolling_up(now);

        let before = self.active.len();
        self.active.retain(|a| !a.is_finished(now));
        for _ in self.active.len()..before {
            self.perf.track_effect_end();
        }

        let trigger = self.panic.poll(now)?;
        self.perform_reset(trigger, hooks);
        Some(trigger)
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.panic.on_resize(now);
    }

    pub fn on_orientation_change(&mut self, hooks: &mut dyn ResetHooks) {
        self.perform_reset(ResetTrigger::OrientationChange, hooks);
    }

    /// Report the current navigational path. Resets when it differs from the
    /// previous one.
    pub fn on_route(&mut self, path: &str, hooks: &mut dyn ResetHooks) -> bool {
        match self.panic.observe_route(path) {
            Some(trigger) => {
                self.perform_reset(trigger, hooks);
                true
            }
            None => false,
        }
    }

    pub fn panic_reset(&mut self, hooks: &mut dyn ResetHooks) {
        self.perform_reset(ResetTrigger::Manual, hooks);
    }

    /// Collapse to rest: kill animations, neutralise styles, drop every lock,
    /// let the renderer free its resources. Safe to call repeatedly.
    pub fn perform_reset(&mut self, trigger: ResetTrigger, hooks: &mut dyn ResetHooks) {
        log::warn!(
            "[panic] reset ({}) with {} effect(s) in flight",
            trigger.as_str(),
            self.active.len()
        );
        hooks.kill_animations();
        hooks.clear_styles();
        self.locks.release_all();
        hooks.release_renderer();
        self.active.clear();
        self.perf.clear_running_effects();
        self.perf.rebase();
        self.scroll.clear();
        self.state.clear_transient();
        self.panic.record(trigger);
    }
}
