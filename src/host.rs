//! The page side of the hero: the JS animation engine, the renderer cleanup
//! callback and the managed DOM elements.

use crate::constants::*;
use crate::dom;
use anyhow::{anyhow, Context};
use hero_core::{DeferredHooks, PlayRequest, ResetHooks};
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct JsHost {
    pub root: web::HtmlElement,
    pub letters: Vec<web::HtmlElement>,
    play: Function,
    kill_all: Option<Function>,
    cleanup: Option<Function>,
}

fn get(options: &JsValue, key: &str) -> JsValue {
    Reflect::get(options, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn optional_fn(options: &JsValue, key: &str) -> Option<Function> {
    get(options, key).dyn_into::<Function>().ok()
}

impl JsHost {
    pub fn from_options(options: &JsValue) -> anyhow::Result<Self> {
        let root = get(options, OPT_ROOT)
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| anyhow!("options.{OPT_ROOT} must be an HTMLElement"))?;
        let play = optional_fn(options, OPT_PLAY)
            .with_context(|| format!("options.{OPT_PLAY} must be a function"))?;
        let letters = dom::managed_letters(&root);
        if letters.is_empty() {
            log::warn!("[hero] no {} elements under root", LETTER_SELECTOR);
        }
        Ok(Self {
            root,
            letters,
            play,
            kill_all: optional_fn(options, OPT_KILL_ALL),
            cleanup: optional_fn(options, OPT_CLEANUP),
        })
    }

    pub fn power_mode(options: &JsValue) -> Option<String> {
        get(options, OPT_POWER_MODE).as_string()
    }

    pub fn wire_clicks(options: &JsValue) -> bool {
        get(options, OPT_WIRE_CLICKS).as_bool().unwrap_or(true)
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    /// Run the page side of a reset. Callers must not hold the orchestrator
    /// borrowed: `killAll` and `cleanup` may call back into the handle.
    pub fn run_reset(&self, steps: DeferredHooks) {
        if steps.is_empty() {
            return;
        }
        let mut hooks = self;
        steps.replay(&mut hooks);
    }

    /// Ask the animation engine to play. Returns the completion promise, or
    /// `None` when the engine threw or completed synchronously.
    pub fn play(&self, request: &PlayRequest) -> Option<Promise> {
        let targets = Array::new();
        match request.letter_index.and_then(|i| self.letters.get(i)) {
            Some(letter) => {
                targets.push(letter);
            }
            None => {
                targets.push(&self.root);
            }
        }
        let arg = request_to_js(request, &targets);
        match self.play.call1(&JsValue::NULL, &arg) {
            Ok(ret) => ret.dyn_into::<Promise>().ok(),
            Err(e) => {
                log::error!("[hero] play({}) threw: {:?}", request.effect_id, e);
                None
            }
        }
    }
}

fn request_to_js(request: &PlayRequest, targets: &Array) -> Object {
    let obj = Object::new();
    dom::set_field(&obj, "id", request.effect_id);
    dom::set_field(&obj, "instance", request.instance.0 as f64);
    dom::set_field(&obj, "tier", request.tier.level());
    dom::set_field(&obj, "elements", targets.clone());
    dom::set_field(&obj, "intensity", request.intensity);
    dom::set_field(&obj, "durationHint", request.duration_ms as f64);
    dom::set_field(&obj, "ease", request.easing);
    if let Some(i) = request.letter_index {
        dom::set_field(&obj, "letterIndex", i as u32);
    }
    if let Some(o) = request.origin {
        dom::set_field(&obj, "originX", o.x);
        dom::set_field(&obj, "originY", o.y);
    }
    obj
}

impl ResetHooks for &JsHost {
    fn kill_animations(&mut self) {
        if let Some(f) = &self.kill_all {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::error!("[panic] killAll threw: {:?}", e);
            }
        }
    }

    fn clear_styles(&mut self) {
        for el in &self.letters {
            dom::clear_inline_styles(el);
        }
        dom::clear_inline_styles(&self.root);
    }

    fn release_renderer(&mut self) {
        if let Some(f) = &self.cleanup {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::error!("[panic] cleanup threw: {:?}", e);
            }
        }
    }
}
