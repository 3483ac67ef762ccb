use crate::dom;
use crate::playback::{self, SharedHero, SharedHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Clicks on a letter go through the local tier; clicks elsewhere on the hero
/// try a viewport effect centred on the pointer.
pub fn wire_click_handler(hero: SharedHero, host: SharedHost) {
    let root: web::Element = host.root.clone().into();
    dom::add_element_listener(&root, "click", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let letter = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| dom::letter_index(&el));
        match letter {
            Some(index) => {
                let (hero, host) = (hero.clone(), host.clone());
                spawn_local(async move {
                    if let Err(e) = playback::play_click(&hero, &host, index).await {
                        log::warn!("[hero] click ignored: {}", e);
                    }
                });
            }
            None => {
                if let Some(id) = playback::trigger_tier2(&hero, &host, dom::viewport_uv(ev)) {
                    log::debug!("[hero] tier 2 {} from background click", id);
                }
            }
        }
    });
}
