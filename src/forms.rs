use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-\+\(\)]+$").expect("static pattern"));

pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
}

impl InputKind {
    pub fn from_type(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            _ => Self::Text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "Field ini wajib diisi",
            Self::InvalidEmail => "Email tidak valid",
            Self::InvalidPhone => "Nomor telepon tidak valid",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Required fields must be non-blank; email and tel values are only
/// format-checked when something was typed.
pub fn validate(raw: &str, required: bool, kind: InputKind) -> Result<(), ValidationError> {
    let value = raw.trim();

    if value.is_empty() {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match kind {
        InputKind::Email if !EMAIL_PATTERN.is_match(value) => Err(ValidationError::InvalidEmail),
        InputKind::Tel if !PHONE_PATTERN.is_match(value) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{
        Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
        HtmlTextAreaElement,
    };

    fn field_state(field: &HtmlElement) -> (String, InputKind) {
        if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            (input.value(), InputKind::from_type(&input.type_()))
        } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
            (area.value(), InputKind::Text)
        } else {
            (String::new(), InputKind::Text)
        }
    }

    fn existing_message(field: &HtmlElement) -> Option<Element> {
        field
            .next_element_sibling()
            .filter(|sibling| sibling.class_list().contains(ERROR_MESSAGE_CLASS))
    }

    fn clear_error(field: &HtmlElement) {
        let _ = field.class_list().remove_1(ERROR_CLASS);
        if let Some(message) = existing_message(field) {
            message.remove();
        }
    }

    fn show_error(
        document: &Document,
        field: &HtmlElement,
        error: ValidationError,
    ) -> Result<(), JsValue> {
        let _ = field.class_list().add_1(ERROR_CLASS);
        if let Some(message) = existing_message(field) {
            message.set_text_content(Some(error.message()));
            return Ok(());
        }

        let Some(parent) = field.parent_node() else {
            return Ok(());
        };
        let message: HtmlElement = dom::create(document, "div")?;
        message.set_class_name(ERROR_MESSAGE_CLASS);
        message.set_text_content(Some(error.message()));
        message.style().set_css_text(styles::ERROR_MESSAGE_CSS);
        parent.insert_before(&message, field.next_sibling().as_ref())?;
        Ok(())
    }

    fn validate_field(document: &Document, field: &HtmlElement) -> bool {
        let (value, kind) = field_state(field);
        match validate(&value, field.has_attribute("required"), kind) {
            Ok(()) => {
                clear_error(field);
                true
            }
            Err(error) => {
                let _ = show_error(document, field, error);
                false
            }
        }
    }

    pub fn attach(document: &Document, _config: &SiteConfig) -> Result<(), JsValue> {
        for form in dom::query_all::<HtmlFormElement>(document, "form") {
            {
                let document = document.clone();
                let scope = form.clone();
                dom::listen(&form, "submit", move |event: Event| {
                    let failures = dom::query_all_in::<HtmlElement>(
                        &scope,
                        "input[required], textarea[required]",
                    )
                    .iter()
                    .filter(|field| !validate_field(&document, field))
                    .count();
                    if failures > 0 {
                        event.prevent_default();
                    }
                })?;
            }

            for field in dom::query_all_in::<HtmlElement>(&form, "input, textarea") {
                {
                    let document = document.clone();
                    let target = field.clone();
                    dom::listen(&field, "blur", move |_event: Event| {
                        validate_field(&document, &target);
                    })?;
                }

                let document = document.clone();
                let target = field.clone();
                dom::listen(&field, "input", move |_event: Event| {
                    if target.class_list().contains(ERROR_CLASS) {
                        validate_field(&document, &target);
                    }
                })?;
            }
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
    fn blank_required_field_is_invalid() {
        assert_eq!(validate("   ", true, InputKind::Text), Err(ValidationError::Required));
        assert_eq!(validate("", true, InputKind::Email), Err(ValidationError::Required));
    }

    #[test]
    fn blank_optional_field_is_valid() {
        assert_eq!(validate("", false, InputKind::Email), Ok(()));
        assert_eq!(validate("  ", false, InputKind::Tel), Ok(()));
    }

    #[test]
    fn well_formed_email_passes() {
        assert_eq!(validate("redaksi@espero.id", true, InputKind::Email), Ok(()));
        assert_eq!(validate("  a.b@c.co  ", false, InputKind::Email), Ok(()));
    }

    #[test]
    fn malformed_email_fails() {
        for value in ["redaksi", "redaksi@espero", "a b@c.id", "@espero.id"] {
            assert_eq!(
                validate(value, true, InputKind::Email),
                Err(ValidationError::InvalidEmail),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn phone_accepts_digits_and_punctuation_only() {
        assert_eq!(validate("+62 (21) 555-0199", true, InputKind::Tel), Ok(()));
        assert_eq!(
            validate("0812-abc", true, InputKind::Tel),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn phone_digits_must_be_ascii() {
        assert_eq!(
            validate("٠٨١٢٣٤٥", true, InputKind::Tel),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(validate("0812 345", true, InputKind::Tel), Ok(()));
    }

    #[test]
    fn format_rules_do_not_apply_to_plain_text() {
        assert_eq!(validate("not an email", true, InputKind::Text), Ok(()));
    }

    #[test]
    fn messages_are_the_user_facing_strings() {
        assert_eq!(ValidationError::Required.to_string(), "Field ini wajib diisi");
        assert_eq!(InputKind::from_type("EMAIL"), InputKind::Email);
        assert_eq!(InputKind::from_type("number"), InputKind::Text);
    }
}
