//! Scroll-driven effects: one-shot card reveals, the scroll indicator,
//! parallax decorations and the reading progress bar.

pub const REVEAL_SELECTORS: [&str; 11] = [
    ".program-card",
    ".value-card",
    ".team-card",
    ".regional-card",
    ".timeline-item",
    ".mission-item",
    ".stat-item",
    ".team-member-card",
    ".vm-card",
    ".story-content",
    ".section-header",
];

pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const INDICATOR_HIDE_AFTER_PX: f64 = 100.0;

pub fn reveal_transition(duration_ms: u32) -> String {
    let seconds = f64::from(duration_ms) / 1_000.0;
    format!("opacity {seconds}s ease, transform {seconds}s ease")
}

/// Styles applied to a card before it is observed. Cards stay as authored
/// when no observer is available to reveal them again.
pub fn hidden_card_style(
    has_intersection_observer: bool,
    duration_ms: u32,
) -> Option<[(&'static str, String); 3]> {
    if !has_intersection_observer {
        return None;
    }
    Some([
        ("opacity", "0".to_string()),
        ("transform", "translateY(30px)".to_string()),
        ("transition", reveal_transition(duration_ms)),
    ])
}

pub fn indicator_visible(scroll_y: f64) -> bool {
    scroll_y <= INDICATOR_HIDE_AFTER_PX
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::motion::{
        parallax_offset, scroll_percentage, stagger_delay_ms, Throttle, FRAME_THROTTLE_MS,
    };
    use crate::styles;
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        observe_elements(document, config)?;
        setup_scroll_indicator(document)?;
        setup_parallax(document)?;
        setup_progress_bar(document, config)
    }

    fn sibling_index(element: &Element) -> usize {
        let Some(parent) = element.parent_element() else {
            return 0;
        };
        let siblings = parent.children();
        (0..siblings.length())
            .position(|index| siblings.item(index).as_ref() == Some(element))
            .unwrap_or(0)
    }

    fn observe_elements(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(hidden) = hidden_card_style(
            dom::supports_intersection_observer(),
            config.animation_duration_ms,
        ) else {
            return Ok(());
        };
        let mut targets: Vec<Element> = Vec::new();

        for selector in REVEAL_SELECTORS {
            for element in dom::query_all::<HtmlElement>(document, selector) {
                for (property, value) in &hidden {
                    dom::set_style(&element, property, value);
                }
                targets.push(element.into());
            }
        }

        let options = dom::observer_options(config.scroll_threshold, Some(REVEAL_ROOT_MARGIN));
        let observed = dom::observe_once(&targets, &options, |target| {
            let delay = stagger_delay_ms(sibling_index(&target));
            let Ok(target) = target.dyn_into::<HtmlElement>() else {
                return;
            };
            Timeout::new(delay, move || show_card(&target)).forget();
        });

        if observed.is_err() {
            for target in &targets {
                if let Some(card) = target.dyn_ref::<HtmlElement>() {
                    show_card(card);
                }
            }
        }
        observed
    }

    fn show_card(card: &HtmlElement) {
        dom::set_style(card, "opacity", "1");
        dom::set_style(card, "transform", "translateY(0)");
    }

    fn setup_scroll_indicator(document: &Document) -> Result<(), JsValue> {
        let Some(indicator) = dom::query::<HtmlElement>(document, ".scroll-indicator") else {
            return Ok(());
        };
        let window = dom::window()?;

        {
            let indicator = indicator.clone();
            dom::listen(&window, "scroll", move |_event: web_sys::Event| {
                if indicator_visible(dom::scroll_y()) {
                    dom::set_style(&indicator, "opacity", "1");
                    dom::set_style(&indicator, "pointer-events", "auto");
                } else {
                    dom::set_style(&indicator, "opacity", "0");
                    dom::set_style(&indicator, "pointer-events", "none");
                }
            })?;
        }

        dom::listen(&indicator, "click", move |_event: MouseEvent| {
            let (_, viewport_height) = dom::viewport_size();
            let options = ScrollToOptions::new();
            options.set_top(viewport_height);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })
    }

    fn setup_parallax(document: &Document) -> Result<(), JsValue> {
        let layers: Vec<HtmlElement> =
            dom::query_all(document, ".hero-background, .decoration-circle");
        if layers.is_empty() {
            return Ok(());
        }
        let mut throttle = Throttle::new(FRAME_THROTTLE_MS);

        dom::listen(dom::window()?.as_ref(), "scroll", move |_event: web_sys::Event| {
            if !throttle.ready(dom::now_ms()) {
                return;
            }
            let scrolled = dom::scroll_y();
            for (index, layer) in layers.iter().enumerate() {
                let offset = parallax_offset(scrolled, index);
                dom::set_style(layer, "transform", &format!("translateY({offset}px)"));
            }
        })
    }

    fn setup_progress_bar(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };
        let bar: HtmlElement = dom::create(document, "div")?;
        bar.set_class_name("scroll-progress-bar");
        bar.style().set_css_text(&styles::progress_bar_css(&config.palette));
        body.append_child(&bar)?;

        let document = document.clone();
        let mut throttle = Throttle::new(FRAME_THROTTLE_MS);

        dom::listen(dom::window()?.as_ref(), "scroll", move |_event: web_sys::Event| {
            if !throttle.ready(dom::now_ms()) {
                return;
            }
            let Some(root) = document.document_element() else {
                return;
            };
            let percent = scroll_percentage(
                f64::from(root.scroll_top()),
                f64::from(root.scroll_height()),
                f64::from(root.client_height()),
            );
            dom::set_style(&bar, "width", &format!("{percent}%"));
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_uses_configured_duration() {
        assert_eq!(reveal_transition(600), "opacity 0.6s ease, transform 0.6s ease");
    }

    #[test]
    fn cards_stay_visible_without_an_intersection_observer() {
        assert_eq!(hidden_card_style(false, 600), None);

        let hidden = hidden_card_style(true, 600).expect("observer available");
        assert_eq!(hidden[0], ("opacity", "0".to_string()));
        assert_eq!(hidden[2].1, "opacity 0.6s ease, transform 0.6s ease");
    }

    #[test]
    fn indicator_hides_after_first_hundred_pixels() {
        assert!(indicator_visible(0.0));
        assert!(indicator_visible(100.0));
        assert!(!indicator_visible(101.0));
    }

    #[test]
    fn reveal_selectors_are_unique() {
        let mut selectors = REVEAL_SELECTORS.to_vec();
        selectors.sort_unstable();
        selectors.dedup();
        assert_eq!(selectors.len(), REVEAL_SELECTORS.len());
    }
}
