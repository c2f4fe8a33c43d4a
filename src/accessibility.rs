pub const SKIP_LINK_TARGET: &str = "#main-content";
pub const SKIP_LINK_TEXT: &str = "Skip to main content";
const NAV_FOCUSABLE: &str = "a, button";
const DIALOG_FOCUSABLE: &str = "a[href], button, textarea, input, select";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusWrap {
    ToFirst,
    ToLast,
}

/// Tab past the last focusable element returns to the first, Shift+Tab
/// before the first goes to the last. Anything else is left to the browser.
pub fn focus_wrap(shift: bool, active_index: Option<usize>, len: usize) -> Option<FocusWrap> {
    if len == 0 {
        return None;
    }
    match active_index {
        Some(0) if shift => Some(FocusWrap::ToLast),
        Some(index) if !shift && index + 1 == len => Some(FocusWrap::ToFirst),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Button,
    Link,
}

pub fn fallback_label(control: Control, text: &str) -> Option<&'static str> {
    if !text.trim().is_empty() {
        return None;
    }
    Some(match control {
        Control::Button => "Button",
        Control::Link => "Link",
    })
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element, FocusEvent, HtmlAnchorElement, HtmlElement, KeyboardEvent};

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        if let Some(menu) = dom::query::<Element>(document, ".nav-menu") {
            trap_focus(document, &menu, NAV_FOCUSABLE)?;
        }
        for dialog in dom::query_all::<Element>(document, "[role=\"dialog\"]") {
            trap_focus(document, &dialog, DIALOG_FOCUSABLE)?;
        }
        add_skip_link(document, config)?;
        add_fallback_labels(document);
        Ok(())
    }

    fn trap_focus(
        document: &Document,
        container: &Element,
        focusable: &'static str,
    ) -> Result<(), JsValue> {
        let document = document.clone();
        let scope = container.clone();

        dom::listen(container, "keydown", move |event: KeyboardEvent| {
            if event.key() != "Tab" {
                return;
            }
            let elements: Vec<HtmlElement> = dom::query_all_in(&scope, focusable);
            let active = document.active_element();
            let active_index = active.as_ref().and_then(|active| {
                elements
                    .iter()
                    .position(|element| AsRef::<Element>::as_ref(element) == active)
            });

            let destination = match focus_wrap(event.shift_key(), active_index, elements.len()) {
                Some(FocusWrap::ToFirst) => elements.first(),
                Some(FocusWrap::ToLast) => elements.last(),
                None => return,
            };
            if let Some(destination) = destination {
                event.prevent_default();
                let _ = destination.focus();
            }
        })
    }

    fn add_skip_link(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };
        let link: HtmlAnchorElement = dom::create(document, "a")?;
        link.set_href(SKIP_LINK_TARGET);
        link.set_text_content(Some(SKIP_LINK_TEXT));
        link.set_class_name("skip-link");
        link.style().set_css_text(&styles::skip_link_css(&config.palette));

        {
            let shown = link.clone();
            dom::listen(&link, "focus", move |_event: FocusEvent| {
                dom::set_style(&shown, "top", "0");
            })?;
        }
        {
            let hidden = link.clone();
            dom::listen(&link, "blur", move |_event: FocusEvent| {
                dom::set_style(&hidden, "top", "-40px");
            })?;
        }

        body.insert_before(&link, body.first_child().as_ref())?;
        Ok(())
    }

    fn add_fallback_labels(document: &Document) {
        let groups = [
            (Control::Button, "button:not([aria-label])"),
            (Control::Link, "a:not([aria-label])"),
        ];
        for (control, selector) in groups {
            for element in dom::query_all::<Element>(document, selector) {
                let text = element.text_content().unwrap_or_default();
                if let Some(label) = fallback_label(control, &text) {
                    let _ = element.set_attribute("aria-label", label);
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_on_last_element_wraps_to_first() {
        assert_eq!(focus_wrap(false, Some(3), 4), Some(FocusWrap::ToFirst));
        assert_eq!(focus_wrap(false, Some(1), 4), None);
    }

    #[test]
    fn shift_tab_on_first_element_wraps_to_last() {
        assert_eq!(focus_wrap(true, Some(0), 4), Some(FocusWrap::ToLast));
        assert_eq!(focus_wrap(true, Some(2), 4), None);
    }

    #[test]
    fn focus_outside_the_container_is_untouched() {
        assert_eq!(focus_wrap(false, None, 4), None);
        assert_eq!(focus_wrap(true, None, 0), None);
    }

    #[test]
    fn only_empty_controls_get_labels() {
        assert_eq!(fallback_label(Control::Button, "  \n "), Some("Button"));
        assert_eq!(fallback_label(Control::Link, ""), Some("Link"));
        assert_eq!(fallback_label(Control::Link, "Beranda"), None);
    }
}
