const POINTER_OFFSET_PX: i32 = 10;

pub fn tooltip_position(client_x: i32, client_y: i32) -> (String, String) {
    (
        format!("{}px", client_x + POINTER_OFFSET_PX),
        format!("{}px", client_y + POINTER_OFFSET_PX),
    )
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, HtmlElement, MouseEvent};

    fn follow_pointer(tooltip: &HtmlElement, event: &MouseEvent) {
        let (left, top) = tooltip_position(event.client_x(), event.client_y());
        dom::set_style(tooltip, "left", &left);
        dom::set_style(tooltip, "top", &top);
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };
        let tooltip: HtmlElement = dom::create(document, "div")?;
        tooltip.set_class_name("custom-tooltip");
        tooltip.style().set_css_text(&styles::tooltip_css(&config.palette));
        body.append_child(&tooltip)?;

        for element in dom::query_all::<HtmlElement>(document, "[data-tooltip]") {
            let text = element.get_attribute("data-tooltip").unwrap_or_default();

            let shown = tooltip.clone();
            dom::listen(&element, "mouseenter", move |event: MouseEvent| {
                shown.set_text_content(Some(text.as_str()));
                follow_pointer(&shown, &event);
                dom::set_style(&shown, "opacity", "1");
            })?;

            let hidden = tooltip.clone();
            dom::listen(&element, "mouseleave", move |_event: MouseEvent| {
                dom::set_style(&hidden, "opacity", "0");
            })?;

            let moved = tooltip.clone();
            dom::listen(&element, "mousemove", move |event: MouseEvent| {
                follow_pointer(&moved, &event);
            })?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_sits_below_and_right_of_pointer() {
        assert_eq!(
            tooltip_position(40, 300),
            ("50px".to_string(), "310px".to_string())
        );
    }
}
