use crate::constants::*;
use glam::Vec2;
use js_sys::{Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Attach a listener to `window` for the page lifetime.
pub fn add_window_listener(event: &str, mut handler: impl FnMut(web::Event) + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn add_element_listener(
    el: &web::Element,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Letter elements under `root`, in document order.
pub fn managed_letters(root: &web::Element) -> Vec<web::HtmlElement> {
    let Ok(list) = root.query_selector_all(LETTER_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Index of the letter an event target belongs to, if any.
pub fn letter_index(target: &web::Element) -> Option<usize> {
    let letter = target.closest(LETTER_SELECTOR).ok().flatten()?;
    letter
        .get_attribute(LETTER_ATTR)
        .as_deref()
        .and_then(parse_letter_index)
}

pub fn clear_inline_styles(el: &web::HtmlElement) {
    let style = el.style();
    for prop in MANAGED_STYLE_PROPS {
        _ = style.remove_property(prop);
    }
}

pub fn set_css_vars(el: &web::HtmlElement, vars: &[(&'static str, String)]) {
    let style = el.style();
    for (name, value) in vars {
        _ = style.set_property(name, value);
    }
}

pub fn set_visibility_class(el: &web::Element, active: &str) {
    let cl = el.class_list();
    for class in VISIBILITY_CLASSES {
        _ = if class == active {
            cl.add_1(class)
        } else {
            cl.remove_1(class)
        };
    }
}

#[inline]
pub fn current_path() -> Option<String> {
    web::window().and_then(|w| w.location().pathname().ok())
}

#[inline]
pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn element_height(el: &web::Element) -> f32 {
    el.get_bounding_client_rect().height() as f32
}

/// Pointer position in normalised viewport coordinates, (0,0) top-left.
pub fn viewport_uv(ev: &web::MouseEvent) -> Vec2 {
    let (w, h) = web::window()
        .map(|w| {
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0),
            )
        })
        .unwrap_or((1.0, 1.0));
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            (ev.client_x() as f64 / w).clamp(0.0, 1.0) as f32,
            (ev.client_y() as f64 / h).clamp(0.0, 1.0) as f32,
        )
    } else {
        Vec2::splat(0.5)
    }
}

/// `obj[key] = value` on a plain JS object.
pub fn set_field(obj: &Object, key: &str, value: impl Into<JsValue>) {
    _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}
