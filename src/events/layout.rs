//! Disruptive layout and navigation events feeding the panic reset.

use crate::dom;
use crate::playback::{SharedHero, SharedHost};
use hero_core::DeferredHooks;
use instant::Instant;

pub fn wire_layout_handlers(hero: SharedHero, host: SharedHost) {
    // Resize is debounced inside the orchestrator and fired from the frame loop
    {
        let hero = hero.clone();
        dom::add_window_listener("resize", move |_| {
            hero.borrow_mut().on_resize(Instant::now());
        });
    }
    {
        let (hero, host) = (hero.clone(), host.clone());
        dom::add_window_listener("orientationchange", move |_| {
            let mut steps = DeferredHooks::default();
            hero.borrow_mut().on_orientation_change(&mut steps);
            host.run_reset(steps);
        });
    }
    dom::add_window_listener("popstate", move |_| {
        if let Some(path) = dom::current_path() {
            let mut steps = DeferredHooks::default();
            hero.borrow_mut().on_route(&path, &mut steps);
            host.run_reset(steps);
        }
    });
}
