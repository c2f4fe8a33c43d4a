//! Thin helpers over `web-sys` shared by every behavior module.

use gloo_timers::callback::Timeout;
use js_sys::{Array, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast, JsValue};
use web_sys::{
    Document, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, Window,
};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = web_sys::window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn collect_nodes<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Malformed selectors are treated like "nothing matched".
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn query_in<T: JsCast>(element: &Element, selector: &str) -> Option<T> {
    element
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    document
        .query_selector_all(selector)
        .map(collect_nodes)
        .unwrap_or_default()
}

pub fn query_all_in<T: JsCast>(element: &Element, selector: &str) -> Vec<T> {
    element
        .query_selector_all(selector)
        .map(collect_nodes)
        .unwrap_or_default()
}

pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str("created element has an unexpected type"))
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn event_target_element(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_into::<Element>().ok()
}

/// Attaches a listener that lives as long as the page does.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Wraps `callback` so that bursts of events collapse into one call made
/// `delay_ms` after the last event.
pub fn debounce<E: 'static>(
    delay_ms: u32,
    callback: impl Fn() + 'static,
) -> impl FnMut(E) + 'static {
    let callback = Rc::new(callback);
    let mut pending: Option<Timeout> = None;

    move |_event: E| {
        let callback = callback.clone();
        if let Some(previous) = pending.replace(Timeout::new(delay_ms, move || callback())) {
            previous.cancel();
        }
    }
}

/// Runs `tick` once per animation frame until it returns `false`.
pub fn animation_loop(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
    let window = window()?;
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let slot_loop = slot.clone();
    let window_loop = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if !tick(timestamp) {
            let _ = slot_loop.borrow_mut().take();
            return;
        }

        if let Some(callback) = slot_loop.borrow().as_ref() {
            let _ = window_loop.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    Ok(())
}

pub fn supports_intersection_observer() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn observer_options(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    options
}

/// Calls `on_visible` the first time each target intersects the viewport and
/// stops observing it right after.
pub fn observe_once(
    targets: &[Element],
    options: &IntersectionObserverInit,
    mut on_visible: impl FnMut(Element) + 'static,
) -> Result<(), JsValue> {
    if targets.is_empty() {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        },
    );

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }

    Ok(())
}
