use crate::config::{self, SiteConfig};
use crate::telemetry::{log_event, LogLevel};
use crate::{
    accessibility, consent, counter, dom, forms, gallery, lazy_load, lightbox, loading,
    navigation, particles, performance, reveal, ripple, styles, tooltip, trail, year,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Event};

type Attach = fn(&Document, &SiteConfig) -> Result<(), JsValue>;

const FEATURES: &[(&str, Attach)] = &[
    ("navigation", navigation::attach),
    ("reveal", reveal::attach),
    ("counter", counter::attach),
    ("ripple", ripple::attach),
    ("tooltip", tooltip::attach),
    ("lazy_load", lazy_load::attach),
    ("forms", forms::attach),
    ("year", year::attach),
    ("loading", loading::attach),
    ("accessibility", accessibility::attach),
    ("performance", performance::attach),
    ("consent", consent::attach),
    ("gallery", gallery::attach),
    ("lightbox", lightbox::attach),
];

const MOTION_FEATURES: &[(&str, Attach)] = &[
    ("particles", particles::attach),
    ("trail", trail::attach),
];

/// Runs `f` once the window `load` event has fired, or right away when it
/// already has.
pub fn on_window_load(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let window = dom::window()?;
    let complete = window
        .document()
        .map(|document| document.ready_state() == "complete")
        .unwrap_or(false);
    if complete {
        f();
        return Ok(());
    }

    let pending = Rc::new(RefCell::new(Some(f)));
    let on_load = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Some(f) = pending.borrow_mut().take() {
            f();
        }
    });
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();
    Ok(())
}

fn attach_all(document: &Document, config: &SiteConfig) {
    let reduced_motion = config::prefers_reduced_motion();
    let mut attached = Vec::new();

    let features = FEATURES
        .iter()
        .chain(MOTION_FEATURES.iter().filter(|_| !reduced_motion));
    for (name, attach) in features {
        match attach(document, config) {
            Ok(()) => attached.push(*name),
            Err(err) => log_event(
                config,
                LogLevel::Warn,
                "feature_attach_failed",
                json!({ "feature": name, "error": format!("{err:?}") }),
            ),
        }
    }

    log_event(
        config,
        LogLevel::Info,
        "site_ready",
        json!({
            "site": "JOE - Jurnal Of Espero",
            "features": attached,
            "reducedMotion": reduced_motion,
        }),
    );
}

fn start() -> Result<(), JsValue> {
    let document = dom::window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let config = config::from_document(&document);

    if let Err(err) = console_log::init_with_level(config.log_level.as_log_level()) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
    if let Err(err) = styles::inject(&document) {
        log_event(
            &config,
            LogLevel::Warn,
            "styles_inject_failed",
            json!({ "error": format!("{err:?}") }),
        );
    }

    if document.ready_state() != "loading" {
        attach_all(&document, &config);
        return Ok(());
    }

    let ready = Rc::new(RefCell::new(Some((document.clone(), config))));
    let on_ready = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Some((document, config)) = ready.borrow_mut().take() {
            attach_all(&document, &config);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = start() {
        web_sys::console::error_1(&err);
    }
}
