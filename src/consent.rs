pub const CONSENT_KEY: &str = "cookieConsent";
const CONSENT_ACCEPTED: &str = "true";

/// Durable key-value storage holding the consent flag.
pub trait ConsentStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

pub fn consent_given(store: &impl ConsentStore) -> bool {
    store.read(CONSENT_KEY).as_deref() == Some(CONSENT_ACCEPTED)
}

pub fn should_show_banner(store: &impl ConsentStore) -> bool {
    !consent_given(store)
}

pub fn accept(store: &impl ConsentStore) {
    store.write(CONSENT_KEY, CONSENT_ACCEPTED);
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::{Palette, SiteConfig};
    use crate::dom;
    use crate::styles;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element, Storage};
    use yew::prelude::*;

    pub struct LocalStorage;

    fn local_storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl ConsentStore for LocalStorage {
        fn read(&self, key: &str) -> Option<String> {
            local_storage()?.get_item(key).ok().flatten()
        }

        fn write(&self, key: &str, value: &str) {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct CookieBannerProps {
        pub palette: Palette,
    }

    #[function_component(CookieBanner)]
    fn cookie_banner(props: &CookieBannerProps) -> Html {
        let dismissed = use_state(|| false);

        let on_accept = {
            let dismissed = dismissed.clone();
            Callback::from(move |_| {
                accept(&LocalStorage);
                dismissed.set(true);
            })
        };

        let on_decline = {
            let dismissed = dismissed.clone();
            Callback::from(move |_| dismissed.set(true))
        };

        if *dismissed {
            return html! {};
        }

        html! {
            <div class="cookie-consent" role="region" aria-label="Persetujuan cookie" style={styles::cookie_banner_css(&props.palette)}>
                <p style="margin: 0; flex: 1; min-width: 200px;">
                    {"Website ini menggunakan cookies untuk meningkatkan pengalaman Anda."}
                </p>
                <div style="display: flex; gap: 10px;">
                    <button class="accept-cookies" type="button" style={styles::accept_button_css(&props.palette)} onclick={on_accept}>
                        {"Terima"}
                    </button>
                    <button class="decline-cookies" type="button" style={styles::decline_button_css(&props.palette)} onclick={on_decline}>
                        {"Tolak"}
                    </button>
                </div>
            </div>
        }
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        if !should_show_banner(&LocalStorage) {
            return Ok(());
        }
        let Some(body) = document.body() else {
            return Ok(());
        };

        let host: Element = dom::create(document, "div")?;
        host.set_class_name("cookie-consent-root");
        body.append_child(&host)?;

        yew::Renderer::<CookieBanner>::with_root_and_props(
            host,
            CookieBannerProps {
                palette: config.palette.clone(),
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl ConsentStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn fresh_visitor_sees_banner() {
        let store = MemoryStore::default();
        assert!(should_show_banner(&store));
    }

    #[test]
    fn accepting_persists_flag_and_hides_banner_on_next_load() {
        let store = MemoryStore::default();
        accept(&store);

        assert_eq!(store.read(CONSENT_KEY).as_deref(), Some("true"));
        assert!(!should_show_banner(&store));
    }

    #[test]
    fn unexpected_stored_value_counts_as_no_consent() {
        let store = MemoryStore::default();
        store.write(CONSENT_KEY, "yes");
        assert!(should_show_banner(&store));
    }
}
