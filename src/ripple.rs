pub const RIPPLE_LIFETIME_MS: u32 = 600;
pub const RIPPLE_TARGETS: &str = ".btn, .social-link";

#[derive(Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Circle covering the button's longest side, centred on the click point.
pub fn ripple_geometry(
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    rect_height: f64,
    client_x: f64,
    client_y: f64,
) -> RippleGeometry {
    let size = rect_width.max(rect_height);
    RippleGeometry {
        size,
        left: client_x - rect_left - size / 2.0,
        top: client_y - rect_top - size / 2.0,
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, HtmlElement, MouseEvent};

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        for button in dom::query_all::<HtmlElement>(document, RIPPLE_TARGETS) {
            let document = document.clone();
            let host = button.clone();
            dom::listen(&button, "click", move |event: MouseEvent| {
                let _ = spawn_ripple(&document, &host, &event);
            })?;
        }
        Ok(())
    }

    fn spawn_ripple(
        document: &Document,
        button: &HtmlElement,
        event: &MouseEvent,
    ) -> Result<(), JsValue> {
        let rect = button.get_bounding_client_rect();
        let geometry = ripple_geometry(
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
            f64::from(event.client_x()),
            f64::from(event.client_y()),
        );

        let ripple: HtmlElement = dom::create(document, "span")?;
        ripple.style().set_css_text(&styles::ripple_css(&geometry));
        dom::set_style(button, "position", "relative");
        dom::set_style(button, "overflow", "hidden");
        button.append_child(&ripple)?;

        spawn_local(async move {
            TimeoutFuture::new(RIPPLE_LIFETIME_MS).await;
            ripple.remove();
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centred_on_click() {
        let geometry = ripple_geometry(100.0, 50.0, 120.0, 40.0, 160.0, 70.0);
        assert_eq!(
            geometry,
            RippleGeometry {
                size: 120.0,
                left: 0.0,
                top: -40.0,
            }
        );
    }

    #[test]
    fn tall_buttons_use_height_as_diameter() {
        let geometry = ripple_geometry(0.0, 0.0, 20.0, 80.0, 10.0, 40.0);
        assert_eq!(geometry.size, 80.0);
        assert_eq!(geometry.left, -30.0);
        assert_eq!(geometry.top, 0.0);
    }
}
