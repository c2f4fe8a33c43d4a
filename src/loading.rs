#[cfg(target_arch = "wasm32")]
mod browser {
    use crate::config::SiteConfig;
    use crate::dom;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, HtmlElement};

    fn reveal_page(document: &Document) {
        if let Some(body) = document.body() {
            let _ = body.class_list().add_1("loaded");
        }
        if let Some(hero) = dom::query::<HtmlElement>(document, ".hero-content") {
            dom::set_style(&hero, "opacity", "1");
        }
    }

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        let document = document.clone();
        crate::frontend::on_window_load(move || reveal_page(&document))
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;
