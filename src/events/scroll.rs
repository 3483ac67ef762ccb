use crate::dom;
use crate::playback::{SharedHero, SharedHost};
use instant::Instant;

pub fn wire_scroll_handler(hero: SharedHero, host: SharedHost) {
    dom::add_window_listener("scroll", move |_| {
        let height = dom::element_height(&host.root);
        hero.borrow_mut()
            .on_scroll(dom::scroll_y(), height, Instant::now());
    });
}
