use crate::dom;
use crate::playback::{SharedHero, SharedHost};
use hero_core::{DeferredHooks, HeroStyle};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub hero: SharedHero,
    pub host: SharedHost,
    pub last_style: Option<HeroStyle>,
}

impl FrameContext {
    pub fn new(hero: SharedHero, host: SharedHost) -> Self {
        Self {
            hero,
            host,
            last_style: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let mut steps = DeferredHooks::default();
        let style = {
            let mut hero = self.hero.borrow_mut();
            if let Some(trigger) = hero.tick(now, &mut steps) {
                log::debug!("[frame] reset fired: {}", trigger.as_str());
                self.last_style = None;
            }
            // pushState navigation has no event; compare paths every frame
            if let Some(path) = dom::current_path() {
                hero.on_route(&path, &mut steps);
            }
            hero.hero_style()
        };
        self.host.run_reset(steps);

        if self.last_style != Some(style) {
            dom::set_css_vars(&self.host.root, &style.css_vars());
            self.last_style = Some(style);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let tick = tick.borrow();
    if let (Some(w), Some(cb)) = (web::window(), tick.as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
