use crate::constants::visibility_thresholds;
use crate::dom;
use crate::playback::{SharedHero, SharedHost};
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Feed the hero's visible ratio into the visibility machine.
pub fn observe_visibility(hero: SharedHero, host: SharedHost) -> anyhow::Result<()> {
    let root = host.root.clone();
    let root_for_class = root.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, _obs: JsValue| {
        // Only the most recent entry matters
        let Some(entry) = entries
            .iter()
            .last()
            .and_then(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
        else {
            return;
        };
        let ratio = entry.intersection_ratio() as f32;
        let transition = hero.borrow_mut().set_visibility_ratio(ratio);
        if let Some(t) = transition {
            dom::set_visibility_class(&root_for_class, class_for(t.to));
        }
    }) as Box<dyn FnMut(Array, JsValue)>);

    let init = web::IntersectionObserverInit::new();
    let thresholds: Array = visibility_thresholds()
        .into_iter()
        .map(JsValue::from_f64)
        .collect();
    init.set_threshold(&thresholds);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
    observer.observe(&root);
    callback.forget();
    dom::set_visibility_class(&root, class_for(hero_core::VisibilityState::Full));
    Ok(())
}

fn class_for(state: hero_core::VisibilityState) -> &'static str {
    use crate::constants::VISIBILITY_CLASSES;
    match state {
        hero_core::VisibilityState::Full => VISIBILITY_CLASSES[0],
        hero_core::VisibilityState::Reduced => VISIBILITY_CLASSES[1],
        hero_core::VisibilityState::Frozen => VISIBILITY_CLASSES[2],
    }
}
