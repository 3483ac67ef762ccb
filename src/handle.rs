//! The JS-facing handle returned by `mountHero`.

use crate::capability;
use crate::dom::set_field;
use crate::events;
use crate::frame::{self, FrameContext};
use crate::host::JsHost;
use crate::playback::{self, SharedHero, SharedHost};
use glam::Vec2;
use hero_core::{DeferredHooks, HeroConfig, HeroOrchestrator, PowerOverride};
use instant::Instant;
use js_sys::{Array, Object, Promise, Uint8Array};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

#[wasm_bindgen]
pub struct HeroFx {
    hero: SharedHero,
    host: SharedHost,
}

/// Detect capabilities, build the orchestrator and wire it to the page.
///
/// `options.root` is the hero element and `options.play(request)` runs one
/// effect, optionally returning a promise that settles on completion.
#[wasm_bindgen(js_name = mountHero)]
pub async fn mount_hero(options: JsValue) -> Result<HeroFx, JsValue> {
    if let Some(mode) = JsHost::power_mode(&options) {
        let mode: PowerOverride = mode
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        capability::set_override(mode);
    }
    let power = capability::init().await;
    let host = JsHost::from_options(&options).map_err(|e| {
        log::error!("[hero] mount failed: {e:#}");
        JsValue::from_str(&format!("{e:#}"))
    })?;

    let mut cfg = HeroConfig::new(host.letter_count());
    cfg.seed = rand::random();
    let hero = HeroOrchestrator::new(
        cfg,
        power,
        capability::accelerated_graphics(),
        Instant::now(),
    );
    log::info!(
        "[hero] mounted letters={} fps={} tier3={} gpu={}",
        host.letter_count(),
        power.target_fps,
        power.tier3_enabled,
        capability::accelerated_graphics()
    );

    let wire_clicks = JsHost::wire_clicks(&options);
    let hero = Rc::new(RefCell::new(hero));
    let host = Rc::new(host);

    if wire_clicks {
        events::wire_click_handler(hero.clone(), host.clone());
    }
    events::wire_scroll_handler(hero.clone(), host.clone());
    events::wire_layout_handlers(hero.clone(), host.clone());
    if let Err(e) = events::observe_visibility(hero.clone(), host.clone()) {
        // Without an observer the hero stays in the full regime
        log::warn!("[hero] visibility tracking unavailable: {e:#}");
    }
    frame::start_loop(Rc::new(RefCell::new(FrameContext::new(
        hero.clone(),
        host.clone(),
    ))));

    Ok(HeroFx { hero, host })
}

#[wasm_bindgen]
impl HeroFx {
    /// Resolves to `true` if an effect played, `false` if the click was
    /// absorbed. Rejects for an index outside the headline.
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&self, index: usize) -> Promise {
        let (hero, host) = (self.hero.clone(), self.host.clone());
        future_to_promise(async move {
            playback::play_click(&hero, &host, index)
                .await
                .map(JsValue::from_bool)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }

    #[wasm_bindgen(js_name = canTriggerTier2)]
    pub fn can_trigger_tier2(&self) -> bool {
        self.hero.borrow().can_trigger_tier2(Instant::now())
    }

    /// Viewport effect at a normalised point. Returns the effect id that
    /// started, or nothing if the gate or channels refused.
    #[wasm_bindgen(js_name = triggerTier2)]
    pub fn trigger_tier2(&self, x: f32, y: f32) -> Option<String> {
        playback::trigger_tier2(&self.hero, &self.host, Vec2::new(x, y)).map(str::to_owned)
    }

    #[wasm_bindgen(js_name = cooldownRemainingMs)]
    pub fn cooldown_remaining_ms(&self) -> f64 {
        self.hero
            .borrow()
            .cooldown_remaining(Instant::now())
            .as_secs_f64()
            * 1000.0
    }

    #[wasm_bindgen(js_name = activeTier3Effects)]
    pub fn active_tier3_effects(&self) -> Array {
        self.hero
            .borrow()
            .active_tier3_effects()
            .iter()
            .map(|t| JsValue::from_str(t.tag()))
            .collect()
    }

    #[wasm_bindgen(js_name = panicReset)]
    pub fn panic_reset(&self) {
        let mut steps = DeferredHooks::default();
        self.hero.borrow_mut().panic_reset(&mut steps);
        self.host.run_reset(steps);
    }

    #[wasm_bindgen(js_name = resetCount)]
    pub fn reset_count(&self) -> f64 {
        self.hero.borrow().reset_count() as f64
    }

    /// `{ intensityMultiplier, maxDeviceScale, targetFPS }`
    pub fn config(&self) -> Object {
        let rc = self.hero.borrow().render_config();
        let obj = Object::new();
        set_field(&obj, "intensityMultiplier", rc.intensity_multiplier);
        set_field(&obj, "maxDeviceScale", rc.max_device_scale);
        set_field(&obj, "targetFPS", rc.target_fps);
        obj
    }

    pub fn metrics(&self) -> Object {
        let m = self.hero.borrow().metrics();
        let obj = Object::new();
        set_field(&obj, "fps", m.fps);
        set_field(&obj, "averageFrameTime", m.average_frame_time_ms);
        set_field(&obj, "droppedFrameCount", m.dropped_frame_count as f64);
        set_field(&obj, "effectsRunningCount", m.effects_running_count);
        obj
    }

    pub fn visibility(&self) -> String {
        self.hero.borrow().visibility().as_str().to_owned()
    }

    /// `"auto"`, `"low"` or `"high"`.
    #[wasm_bindgen(js_name = setPowerMode)]
    pub fn set_power_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: PowerOverride = mode
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        let power = capability::set_override(mode);
        self.hero.borrow_mut().set_power(power);
        Ok(())
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) {
        self.hero.borrow_mut().set_enabled(enabled);
    }

    /// Packed `EffectUniforms` blocks, 32 bytes each, ready for a uniform
    /// buffer upload.
    #[wasm_bindgen(js_name = effectUniforms)]
    pub fn effect_uniforms(&self) -> Uint8Array {
        let blocks = self.hero.borrow().effect_uniforms(Instant::now());
        Uint8Array::from(bytemuck::cast_slice::<_, u8>(&blocks))
    }

    /// Forget cached detection; the next mount probes again.
    #[wasm_bindgen(js_name = resetCapabilities)]
    pub fn reset_capabilities(&self) {
        capability::reset();
    }
}
