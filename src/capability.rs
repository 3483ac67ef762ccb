//! Process-wide capability detection for the page.
//!
//! Detection results are cached in one service per page. `reset` forgets them
//! so the next `init` probes again.

use crate::constants::REDUCED_MOTION_QUERY;
use hero_core::{CapabilityService, DeviceSignals, PowerConfig, PowerOverride};
use std::cell::RefCell;
use wasm_bindgen::JsValue;
use web_sys as web;

thread_local! {
    static CAPABILITIES: RefCell<CapabilityService> = RefCell::new(CapabilityService::new());
}

/// Detect once (including the async GPU probe) and return the active preset.
pub async fn init() -> PowerConfig {
    if CAPABILITIES.with(|c| c.borrow().is_detected()) {
        return config();
    }
    let gpu = probe_accelerated_graphics().await;
    CAPABILITIES.with(|c| c.borrow_mut().init(|| read_signals(gpu)))
}

pub fn reset() {
    CAPABILITIES.with(|c| c.borrow_mut().reset());
}

pub fn config() -> PowerConfig {
    CAPABILITIES.with(|c| c.borrow().config())
}

pub fn set_override(mode: PowerOverride) -> PowerConfig {
    CAPABILITIES.with(|c| c.borrow_mut().set_override(mode))
}

pub fn accelerated_graphics() -> bool {
    CAPABILITIES.with(|c| c.borrow().accelerated_graphics())
}

fn read_signals(accelerated_graphics: bool) -> DeviceSignals {
    let Some(window) = web::window() else {
        return DeviceSignals {
            accelerated_graphics,
            ..DeviceSignals::default()
        };
    };
    let navigator = window.navigator();
    // `deviceMemory` is Chromium-only and absent from web-sys
    let device_memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|gb| gb as f32);
    let cores = navigator.hardware_concurrency();
    let logical_cores = (cores > 0.0).then_some(cores as u32);
    let prefers_reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    DeviceSignals {
        device_memory_gb,
        logical_cores,
        prefers_reduced_motion,
        accelerated_graphics,
    }
}

/// Whether a WebGPU adapter can be obtained. Without one the renderer cannot
/// run and the hero falls back to CSS effects.
async fn probe_accelerated_graphics() -> bool {
    let has_gpu = web::window()
        .and_then(|w| js_sys::Reflect::get(&w.navigator(), &JsValue::from_str("gpu")).ok())
        .is_some_and(|gpu| !gpu.is_undefined() && !gpu.is_null());
    if !has_gpu {
        return false;
    }
    let instance = wgpu::Instance::default();
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .is_some()
}
