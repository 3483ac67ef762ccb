#![cfg(target_arch = "wasm32")]
//! Browser front-end for the hero effect orchestrator.
//!
//! Everything stateful lives in `hero-core`; this crate probes the device,
//! forwards DOM events, and hands started effects to the page's animation
//! engine through the `play` callback.
use wasm_bindgen::prelude::*;

mod capability;
mod constants;
mod dom;
mod events;
mod frame;
mod handle;
mod host;
mod playback;

pub use handle::{mount_hero, HeroFx};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");
    Ok(())
}
