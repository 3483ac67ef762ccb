//! Runs started effects through the page's animation engine and reports
//! completion back to the orchestrator.

use crate::host::JsHost;
use glam::Vec2;
use hero_core::{HeroError, HeroOrchestrator, StartedEffect};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};

pub type SharedHero = Rc<RefCell<HeroOrchestrator>>;
/// The host is immutable after mount, so JS callbacks never run under a
/// borrow of it.
pub type SharedHost = Rc<JsHost>;

/// Play and wait for the engine's completion signal, then hand the ticket
/// back. A rejected promise counts as completion.
pub async fn run(hero: &SharedHero, host: &SharedHost, started: StartedEffect) {
    let StartedEffect { request, ticket } = started;
    if let Some(promise) = host.play(&request) {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[hero] {} playback rejected: {:?}", request.effect_id, e);
        }
    }
    hero.borrow_mut().finish_effect(ticket);
}

/// Click on letter `index`. Resolves once the triggered effect (if any) has
/// finished; `Ok(false)` means the click was absorbed without an effect.
pub async fn play_click(
    hero: &SharedHero,
    host: &SharedHost,
    index: usize,
) -> Result<bool, HeroError> {
    let started = hero.borrow_mut().handle_click(index, Instant::now())?;
    match started {
        Some(s) => {
            run(hero, host, s).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Try a viewport effect at `origin`; playback continues in the background.
pub fn trigger_tier2(hero: &SharedHero, host: &SharedHost, origin: Vec2) -> Option<&'static str> {
    let started = hero.borrow_mut().trigger_tier2(origin, Instant::now())?;
    let id = started.request.effect_id;
    let (hero, host) = (hero.clone(), host.clone());
    spawn_local(async move {
        run(&hero, &host, started).await;
    });
    Some(id)
}
