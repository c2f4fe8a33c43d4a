const COMPACT_AFTER_PX: f64 = 50.0;
const HIDE_AFTER_PX: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavAppearance {
    pub compact: bool,
    pub hidden: bool,
}

impl NavAppearance {
    pub fn box_shadow(self) -> &'static str {
        if self.compact {
            "0 4px 16px rgba(0, 0, 0, 0.12)"
        } else {
            "0 2px 8px rgba(0, 0, 0, 0.08)"
        }
    }

    pub fn padding(self) -> &'static str {
        if self.compact {
            "0.75rem 0"
        } else {
            "1rem 0"
        }
    }

    pub fn transform(self) -> &'static str {
        if self.hidden {
            "translateY(-100%)"
        } else {
            "translateY(0)"
        }
    }
}

/// Tracks the previous scroll offset so the bar can hide while the reader
/// scrolls down and come back as soon as they scroll up.
#[derive(Debug, Default)]
pub struct NavScrollState {
    last_scroll: f64,
}

impl NavScrollState {
    pub fn update(&mut self, current: f64) -> NavAppearance {
        let appearance = NavAppearance {
            compact: current > COMPACT_AFTER_PX,
            hidden: current > self.last_scroll && current > HIDE_AFTER_PX,
        };
        self.last_scroll = current;
        appearance
    }
}

pub fn is_active_link(href: &str, current_path: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    href == current_path || (href != "/" && current_path.contains(href))
}

pub fn anchor_selector(href: &str) -> Option<&str> {
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

pub fn menu_link_animation(index: usize) -> String {
    let delay = index as f64 * 0.1;
    format!("slideInRight 0.3s {delay:.1}s ease-out forwards")
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::motion::{
        smooth_scroll_position, Throttle, NAV_SCROLL_THROTTLE_MS, SMOOTH_SCROLL_DURATION_MS,
    };
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, Node};

    #[derive(Clone)]
    struct Menu {
        toggle: HtmlElement,
        menu: HtmlElement,
        links: Rc<Vec<HtmlElement>>,
        body: Option<HtmlElement>,
    }

    impl Menu {
        fn is_open(&self) -> bool {
            self.menu.class_list().contains("active")
        }

        fn toggle(&self) {
            let open = self.toggle.class_list().toggle("active").unwrap_or(false);
            let _ = self.menu.class_list().toggle("active");

            if open {
                for (index, link) in self.links.iter().enumerate() {
                    dom::set_style(link, "animation", &menu_link_animation(index));
                }
            }

            if let Some(body) = &self.body {
                dom::set_style(body, "overflow", if open { "hidden" } else { "" });
            }
        }

        fn close(&self) {
            let _ = self.toggle.class_list().remove_1("active");
            let _ = self.menu.class_list().remove_1("active");
            if let Some(body) = &self.body {
                dom::set_style(body, "overflow", "");
            }
        }

        fn contains(&self, node: &Node) -> bool {
            self.menu.contains(Some(node)) || self.toggle.contains(Some(node))
        }
    }

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        let Some(navbar) = dom::query::<HtmlElement>(document, ".navbar") else {
            return Ok(());
        };
        let links: Rc<Vec<HtmlElement>> = Rc::new(dom::query_all(document, ".nav-menu a"));

        let menu = dom::query::<HtmlElement>(document, ".nav-toggle")
            .zip(dom::query::<HtmlElement>(document, ".nav-menu"))
            .map(|(toggle, menu)| Menu {
                toggle,
                menu,
                links: links.clone(),
                body: document.body(),
            });

        if let Some(menu) = &menu {
            setup_toggle(document, menu)?;
        }
        setup_scroll(&navbar)?;
        setup_links(document, &navbar, menu.as_ref(), &links)?;
        setup_hover(&links)?;
        mark_active_link(&links);

        Ok(())
    }

    fn setup_toggle(document: &Document, menu: &Menu) -> Result<(), JsValue> {
        {
            let menu = menu.clone();
            dom::listen(&menu.toggle.clone(), "click", move |event: MouseEvent| {
                event.stop_propagation();
                menu.toggle();
            })?;
        }

        {
            let menu = menu.clone();
            dom::listen(document, "click", move |event: MouseEvent| {
                let inside = event
                    .target()
                    .and_then(|target| target.dyn_into::<Node>().ok())
                    .map(|node| menu.contains(&node))
                    .unwrap_or(false);
                if !inside && menu.is_open() {
                    menu.close();
                }
            })?;
        }

        let menu = menu.clone();
        dom::listen(document, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Escape" && menu.is_open() {
                menu.close();
            }
        })
    }

    fn setup_scroll(navbar: &HtmlElement) -> Result<(), JsValue> {
        let navbar = navbar.clone();
        let mut throttle = Throttle::new(NAV_SCROLL_THROTTLE_MS);
        let mut state = NavScrollState::default();

        dom::listen(dom::window()?.as_ref(), "scroll", move |_event: web_sys::Event| {
            if !throttle.ready(dom::now_ms()) {
                return;
            }
            let appearance = state.update(dom::scroll_y());
            dom::set_style(&navbar, "box-shadow", appearance.box_shadow());
            dom::set_style(&navbar, "padding", appearance.padding());
            dom::set_style(&navbar, "transform", appearance.transform());
        })
    }

    fn setup_links(
        document: &Document,
        navbar: &HtmlElement,
        menu: Option<&Menu>,
        links: &[HtmlElement],
    ) -> Result<(), JsValue> {
        for link in links {
            let document = document.clone();
            let navbar = navbar.clone();
            let menu = menu.cloned();
            let href = link.get_attribute("href").unwrap_or_default();

            dom::listen(link, "click", move |event: MouseEvent| {
                if let Some(menu) = menu.as_ref().filter(|menu| menu.is_open()) {
                    menu.close();
                }

                let Some(selector) = anchor_selector(&href) else {
                    return;
                };
                event.prevent_default();
                if let Some(target) = dom::query::<HtmlElement>(&document, selector) {
                    let _ = smooth_scroll_to(&navbar, &target);
                }
            })?;
        }
        Ok(())
    }

    fn smooth_scroll_to(navbar: &HtmlElement, target: &HtmlElement) -> Result<(), JsValue> {
        let window = dom::window()?;
        let start = dom::scroll_y();
        let distance = f64::from(target.offset_top() - navbar.offset_height()) - start;
        let mut started_at: Option<f64> = None;

        dom::animation_loop(move |now| {
            let elapsed = now - *started_at.get_or_insert(now);
            let position =
                smooth_scroll_position(start, distance, elapsed, SMOOTH_SCROLL_DURATION_MS);
            window.scroll_to_with_x_and_y(0.0, position);
            elapsed < SMOOTH_SCROLL_DURATION_MS
        })
    }

    fn setup_hover(links: &[HtmlElement]) -> Result<(), JsValue> {
        for link in links {
            let lifted = link.clone();
            dom::listen(link, "mouseenter", move |_event: MouseEvent| {
                dom::set_style(&lifted, "transform", "translateY(-2px)");
            })?;
            let lowered = link.clone();
            dom::listen(link, "mouseleave", move |_event: MouseEvent| {
                dom::set_style(&lowered, "transform", "translateY(0)");
            })?;
        }
        Ok(())
    }

    fn mark_active_link(links: &[HtmlElement]) {
        let Some(path) = web_sys::window().and_then(|w| w.location().pathname().ok()) else {
            return;
        };
        for link in links {
            let href = link.get_attribute("href").unwrap_or_default();
            if is_active_link(&href, &path) {
                let _ = link.class_list().add_1("active");
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
    fn bar_compacts_past_fifty_pixels() {
        let mut state = NavScrollState::default();
        assert!(!state.update(40.0).compact);
        assert!(state.update(60.0).compact);
    }

    #[test]
    fn bar_hides_only_when_scrolling_down_past_threshold() {
        let mut state = NavScrollState::default();
        assert!(!state.update(80.0).hidden);
        assert!(state.update(150.0).hidden);
        assert!(!state.update(120.0).hidden);
        assert!(state.update(400.0).hidden);
    }

    #[test]
    fn active_link_matches_exact_or_nested_paths() {
        assert!(is_active_link("/tentang", "/tentang"));
        assert!(is_active_link("/aktivitas", "/aktivitas/2024"));
        assert!(!is_active_link("/", "/aktivitas"));
        assert!(is_active_link("/", "/"));
        assert!(!is_active_link("", "/"));
    }

    #[test]
    fn only_named_anchors_scroll_in_page() {
        assert_eq!(anchor_selector("#programs"), Some("#programs"));
        assert_eq!(anchor_selector("#"), None);
        assert_eq!(anchor_selector("/kontak"), None);
    }

    #[test]
    fn menu_links_are_staggered_by_a_tenth_of_a_second() {
        assert_eq!(menu_link_animation(0), "slideInRight 0.3s 0.0s ease-out forwards");
        assert_eq!(menu_link_animation(2), "slideInRight 0.3s 0.2s ease-out forwards");
    }
}
