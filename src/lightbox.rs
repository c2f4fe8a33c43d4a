pub const FADE_IN_DELAY_MS: u32 = 10;
pub const FADE_OUT_MS: u32 = 300;
pub const BACKDROP_CLASS: &str = "image-lightbox";

/// Clicks on the image or the close button bubble up to the overlay, only a
/// click landing on the overlay itself counts as a backdrop click.
pub fn is_backdrop(target_class_name: &str) -> bool {
    target_class_name
        .split_whitespace()
        .any(|class| class == BACKDROP_CLASS)
}

/// Body scroll is only touched when the overlay appears or disappears.
pub fn scroll_lock_change(was_displayed: bool, displayed: bool) -> Option<bool> {
    (was_displayed != displayed).then_some(displayed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

impl LightboxPhase {
    /// Closed is the only phase in which the overlay is `display: none`.
    pub fn displayed(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn opaque(self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn follow_up(self) -> Option<(u32, LightboxAction)> {
        match self {
            Self::Opening => Some((FADE_IN_DELAY_MS, LightboxAction::Shown)),
            Self::Closing => Some((FADE_OUT_MS, LightboxAction::Hidden)),
            Self::Closed | Self::Open => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LightboxAction {
    Open { src: String, alt: String },
    Shown,
    Close,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightboxModel {
    pub phase: LightboxPhase,
    pub src: String,
    pub alt: String,
}

impl Default for LightboxModel {
    fn default() -> Self {
        Self {
            phase: LightboxPhase::Closed,
            src: String::new(),
            alt: String::new(),
        }
    }
}

impl LightboxModel {
    pub fn apply(&self, action: LightboxAction) -> Self {
        use LightboxPhase::*;

        match (self.phase, action) {
            (_, LightboxAction::Open { src, alt }) => Self {
                phase: Opening,
                src,
                alt,
            },
            (Opening, LightboxAction::Shown) => Self {
                phase: Open,
                ..self.clone()
            },
            (Opening | Open, LightboxAction::Close) => Self {
                phase: Closing,
                ..self.clone()
            },
            (Closing, LightboxAction::Hidden) => Self {
                phase: Closed,
                ..self.clone()
            },
            // late timers and repeated closes are ignored
            _ => self.clone(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::{Palette, SiteConfig};
    use crate::dom;
    use crate::styles;
    use gloo_timers::callback::Timeout;
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{Document, Element, HtmlImageElement, KeyboardEvent, MouseEvent};
    use yew::prelude::*;

    impl Reducible for LightboxModel {
        type Action = LightboxAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            Rc::new(self.apply(action))
        }
    }

    /// Resolves a click on a gallery "view" control or overlay to the photo
    /// it should enlarge.
    fn clicked_photo(event: &MouseEvent) -> Option<(String, String)> {
        let target = dom::event_target_element(event.target())?;

        let trigger = if let Some(view) = target.closest(".view-btn").ok().flatten() {
            event.prevent_default();
            event.stop_propagation();
            view
        } else if target.class_list().contains("gallery-overlay") {
            target
        } else {
            return None;
        };

        let item = trigger.closest(".gallery-item").ok().flatten()?;
        let photo = dom::query_in::<HtmlImageElement>(&item, ".gallery-photo")?;
        Some((photo.src(), photo.alt()))
    }

    struct DocumentListeners {
        document: Document,
        click: Closure<dyn FnMut(MouseEvent)>,
        keydown: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl DocumentListeners {
        fn install(dispatcher: UseReducerDispatcher<LightboxModel>) -> Option<Self> {
            let document = web_sys::window()?.document()?;

            let click = {
                let dispatcher = dispatcher.clone();
                Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    if let Some((src, alt)) = clicked_photo(&event) {
                        dispatcher.dispatch(LightboxAction::Open { src, alt });
                    }
                })
            };
            let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    dispatcher.dispatch(LightboxAction::Close);
                }
            });

            document
                .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
                .ok()?;
            document
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                .ok()?;

            Some(Self {
                document,
                click,
                keydown,
            })
        }
    }

    impl Drop for DocumentListeners {
        fn drop(&mut self) {
            let _ = self
                .document
                .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
            let _ = self.document.remove_event_listener_with_callback(
                "keydown",
                self.keydown.as_ref().unchecked_ref(),
            );
        }
    }

    fn lock_body_scroll(locked: bool) {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            dom::set_style(&body, "overflow", if locked { "hidden" } else { "" });
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct LightboxProps {
        pub palette: Palette,
    }

    #[function_component(Lightbox)]
    fn lightbox(props: &LightboxProps) -> Html {
        let model = use_reducer(LightboxModel::default);
        let close_hovered = use_state(|| false);

        {
            let dispatcher = model.dispatcher();
            use_effect_with((), move |_| {
                let listeners = DocumentListeners::install(dispatcher);
                move || drop(listeners)
            });
        }

        {
            let scroll_locked = use_mut_ref(|| false);
            use_effect_with(model.phase.displayed(), move |displayed| {
                let was_displayed = scroll_locked.replace(*displayed);
                if let Some(locked) = scroll_lock_change(was_displayed, *displayed) {
                    lock_body_scroll(locked);
                }
                || ()
            });
        }

        {
            let dispatcher = model.dispatcher();
            use_effect_with(model.phase, move |phase| {
                let follow_up = phase.follow_up().map(|(delay, action)| {
                    Timeout::new(delay, move || dispatcher.dispatch(action))
                });
                move || drop(follow_up)
            });
        }

        let on_backdrop = {
            let dispatcher = model.dispatcher();
            Callback::from(move |event: MouseEvent| {
                let on_backdrop = dom::event_target_element(event.target())
                    .map(|target| is_backdrop(&target.class_name()))
                    .unwrap_or(false);
                if on_backdrop {
                    dispatcher.dispatch(LightboxAction::Close);
                }
            })
        };

        let on_close = {
            let dispatcher = model.dispatcher();
            Callback::from(move |_| dispatcher.dispatch(LightboxAction::Close))
        };

        let on_close_enter = {
            let close_hovered = close_hovered.clone();
            Callback::from(move |_| close_hovered.set(true))
        };

        let on_close_leave = {
            let close_hovered = close_hovered.clone();
            Callback::from(move |_| close_hovered.set(false))
        };

        html! {
            <div
                class={BACKDROP_CLASS}
                style={styles::lightbox_css(model.phase.displayed(), model.phase.opaque())}
                aria-hidden={(!model.phase.displayed()).to_string()}
                onclick={on_backdrop}
            >
                <button
                    class="lightbox-close"
                    type="button"
                    aria-label="Tutup"
                    style={styles::lightbox_close_css(&props.palette, *close_hovered)}
                    onclick={on_close}
                    onmouseenter={on_close_enter}
                    onmouseleave={on_close_leave}
                >
                    {"×"}
                </button>
                <img
                    class="lightbox-image"
                    style={styles::LIGHTBOX_IMAGE_CSS}
                    src={model.src.clone()}
                    alt={model.alt.clone()}
                />
            </div>
        }
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };
        let host: Element = dom::create(document, "div")?;
        host.set_class_name("lightbox-root");
        body.append_child(&host)?;

        yew::Renderer::<Lightbox>::with_root_and_props(
            host,
            LightboxProps {
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

    fn open(model: &LightboxModel, src: &str, alt: &str) -> LightboxModel {
        model.apply(LightboxAction::Open {
            src: src.to_string(),
            alt: alt.to_string(),
        })
    }

    #[test]
    fn open_sets_source_and_alt() {
        let model = open(&LightboxModel::default(), "/img/bakti-1.jpg", "Bakti sosial");
        assert_eq!(model.src, "/img/bakti-1.jpg");
        assert_eq!(model.alt, "Bakti sosial");
        assert_eq!(model.phase, LightboxPhase::Opening);
        assert!(model.phase.displayed());
        assert!(!model.phase.opaque());

        let shown = model.apply(LightboxAction::Shown);
        assert_eq!(shown.phase, LightboxPhase::Open);
        assert!(shown.phase.opaque());
    }

    #[test]
    fn close_fades_then_hides() {
        let model = open(&LightboxModel::default(), "a.jpg", "a").apply(LightboxAction::Shown);
        let closing = model.apply(LightboxAction::Close);
        assert_eq!(closing.phase, LightboxPhase::Closing);
        assert!(closing.phase.displayed());
        assert_eq!(
            closing.phase.follow_up(),
            Some((FADE_OUT_MS, LightboxAction::Hidden))
        );

        let closed = closing.apply(LightboxAction::Hidden);
        assert_eq!(closed.phase, LightboxPhase::Closed);
        assert!(!closed.phase.displayed());
    }

    #[test]
    fn closing_before_fade_in_still_hides() {
        let model = open(&LightboxModel::default(), "a.jpg", "a");
        let closed = model
            .apply(LightboxAction::Close)
            .apply(LightboxAction::Shown)
            .apply(LightboxAction::Hidden);
        assert_eq!(closed.phase, LightboxPhase::Closed);
    }

    #[test]
    fn reopening_during_fade_out_is_not_hidden_by_late_timer() {
        let closing = open(&LightboxModel::default(), "a.jpg", "a")
            .apply(LightboxAction::Shown)
            .apply(LightboxAction::Close);
        let reopened = open(&closing, "b.jpg", "b").apply(LightboxAction::Hidden);
        assert_eq!(reopened.phase, LightboxPhase::Opening);
        assert_eq!(reopened.src, "b.jpg");
    }

    #[test]
    fn only_clicks_on_the_overlay_itself_close() {
        assert!(is_backdrop("image-lightbox"));
        assert!(is_backdrop("image-lightbox is-open"));
        assert!(!is_backdrop("lightbox-image"));
        assert!(!is_backdrop("lightbox-close"));
        assert!(!is_backdrop("lightbox-root"));
        assert!(!is_backdrop(""));
    }

    #[test]
    fn body_scroll_is_only_touched_on_display_changes() {
        assert_eq!(scroll_lock_change(false, false), None);
        assert_eq!(scroll_lock_change(false, true), Some(true));
        assert_eq!(scroll_lock_change(true, true), None);
        assert_eq!(scroll_lock_change(true, false), Some(false));
    }

    #[test]
    fn escape_on_closed_lightbox_is_a_no_op() {
        let model = LightboxModel::default();
        assert_eq!(model.apply(LightboxAction::Close), model);
        assert_eq!(LightboxPhase::Closed.follow_up(), None);
    }
}
