use once_cell::sync::Lazy;
use regex::Regex;

pub const YEAR_SELECTOR: &str = ".footer-bottom p";

static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("static pattern"));

/// Swaps the first four-digit run (the copyright year) for `year`.
pub fn replace_year(html: &str, year: u32) -> String {
    FOUR_DIGITS.replace(html, year.to_string().as_str()).into_owned()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element};

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        let year = js_sys::Date::new_0().get_full_year();
        for element in dom::query_all::<Element>(document, YEAR_SELECTOR) {
            element.set_inner_html(&replace_year(&element.inner_html(), year));
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
    fn only_the_first_year_is_replaced() {
        assert_eq!(
            replace_year("&copy; 2023 JOE. Sejak 2019.", 2026),
            "&copy; 2026 JOE. Sejak 2019."
        );
    }

    #[test]
    fn text_without_a_year_is_left_alone() {
        assert_eq!(replace_year("Jurnal Of Espero", 2026), "Jurnal Of Espero");
    }
}
