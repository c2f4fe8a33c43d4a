pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, HtmlImageElement};

    fn load(image: &HtmlImageElement) {
        if let Some(source) = image.get_attribute("data-src") {
            image.set_src(&source);
            let _ = image.class_list().add_1("loaded");
        }
    }

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        let images: Vec<HtmlImageElement> = dom::query_all(document, LAZY_IMAGE_SELECTOR);

        if !dom::supports_intersection_observer() {
            images.iter().for_each(load);
            return Ok(());
        }

        let targets: Vec<Element> = images.into_iter().map(Element::from).collect();
        let options = dom::observer_options(0.0, None);
        dom::observe_once(&targets, &options, |target| {
            if let Ok(image) = target.dyn_into::<HtmlImageElement>() {
                load(&image);
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;
