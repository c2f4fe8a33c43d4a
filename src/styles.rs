//! Inline styles for nodes the behaviors create, plus the keyframes sheet
//! injected once at startup.

use crate::config::Palette;
use crate::ripple::RippleGeometry;

pub const DYNAMIC_STYLES: &str = r#"
@keyframes ripple-animation {
    to {
        transform: scale(4);
        opacity: 0;
    }
}

@keyframes pulse {
    0%, 100% { transform: scale(1); }
    50% { transform: scale(1.05); }
}

@keyframes slideInRight {
    from {
        opacity: 0;
        transform: translateX(50px);
    }
    to {
        opacity: 1;
        transform: translateX(0);
    }
}

.error {
    border-color: #FF4B4B !important;
    animation: shake 0.5s;
}

@keyframes shake {
    0%, 100% { transform: translateX(0); }
    25% { transform: translateX(-10px); }
    75% { transform: translateX(10px); }
}

.loaded {
    opacity: 1 !important;
    animation: fadeIn 0.5s ease;
}

@keyframes fadeIn {
    from { opacity: 0; }
    to { opacity: 1; }
}

[data-theme="dark"] {
    --bg-white: #1A1A1A;
    --bg-light: #252525;
    --text-dark: #FFFFFF;
    --text-muted: #B0B0B0;
}

@media (prefers-reduced-motion: reduce) {
    *, *::before, *::after {
        animation-duration: 0.01ms !important;
        animation-iteration-count: 1 !important;
        transition-duration: 0.01ms !important;
    }
}
"#;

pub const HERO_CANVAS_CSS: &str = "position: absolute; top: 0; left: 0; width: 100%; \
     height: 100%; pointer-events: none; z-index: 1;";

pub const TRAIL_CANVAS_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; \
     height: 100%; pointer-events: none; z-index: 9998;";

pub const ERROR_MESSAGE_CSS: &str =
    "color: #FF4B4B; font-size: 0.875rem; margin-top: 0.25rem; animation: slideInDown 0.3s ease;";

pub const LIGHTBOX_IMAGE_CSS: &str = "max-width: 90%; max-height: 90%; object-fit: contain; \
     border-radius: 10px; box-shadow: 0 20px 60px rgba(0, 0, 0, 0.5);";

pub fn progress_bar_css(palette: &Palette) -> String {
    format!(
        "position: fixed; top: 0; left: 0; width: 0%; height: 4px; \
         background: linear-gradient(90deg, {} 0%, {} 100%); z-index: 9999; \
         transition: width 0.1s ease;",
        palette.primary, palette.accent
    )
}

pub fn ripple_css(geometry: &RippleGeometry) -> String {
    format!(
        "position: absolute; width: {size}px; height: {size}px; border-radius: 50%; \
         background: rgba(255, 255, 255, 0.5); left: {left}px; top: {top}px; transform: scale(0); \
         animation: ripple-animation 0.6s ease-out; pointer-events: none;",
        size = geometry.size,
        left = geometry.left,
        top = geometry.top,
    )
}

pub fn tooltip_css(palette: &Palette) -> String {
    format!(
        "position: absolute; background: {}; color: {}; padding: 8px 12px; border-radius: 4px; \
         font-size: 0.875rem; pointer-events: none; opacity: 0; transition: opacity 0.3s; \
         z-index: 10000; white-space: nowrap;",
        palette.secondary, palette.white
    )
}

pub fn skip_link_css(palette: &Palette) -> String {
    format!(
        "position: absolute; top: -40px; left: 0; background: {}; color: {}; padding: 8px 16px; \
         text-decoration: none; z-index: 10000; transition: top 0.3s;",
        palette.primary, palette.secondary
    )
}

pub fn cookie_banner_css(palette: &Palette) -> String {
    format!(
        "position: fixed; bottom: 0; left: 0; right: 0; background: {}; color: {}; padding: 20px; \
         display: flex; justify-content: space-between; align-items: center; z-index: 10000; \
         animation: slideInUp 0.5s ease; flex-wrap: wrap; gap: 15px;",
        palette.secondary, palette.white
    )
}

pub fn accept_button_css(palette: &Palette) -> String {
    format!(
        "background: {}; color: {}; border: none; padding: 10px 20px; cursor: pointer; \
         border-radius: 4px; font-weight: 600;",
        palette.primary, palette.secondary
    )
}

pub fn decline_button_css(palette: &Palette) -> String {
    format!(
        "background: transparent; color: {white}; border: 1px solid {white}; padding: 10px 20px; \
         cursor: pointer; border-radius: 4px;",
        white = palette.white
    )
}

pub fn lightbox_css(displayed: bool, opaque: bool) -> String {
    format!(
        "display: {}; position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
         background: rgba(0, 0, 0, 0.95); z-index: 10000; justify-content: center; \
         align-items: center; opacity: {}; transition: opacity 0.3s ease;",
        if displayed { "flex" } else { "none" },
        if opaque { "1" } else { "0" }
    )
}

pub fn lightbox_close_css(palette: &Palette, hovered: bool) -> String {
    let transform = if hovered {
        "rotate(90deg) scale(1.1)"
    } else {
        "rotate(0) scale(1)"
    };
    format!(
        "position: absolute; top: 20px; right: 20px; background: {}; color: {}; border: none; \
         width: 50px; height: 50px; border-radius: 50%; font-size: 2rem; cursor: pointer; \
         z-index: 10001; transition: transform 0.3s; transform: {transform};",
        palette.primary, palette.secondary
    )
}

#[cfg(target_arch = "wasm32")]
pub fn inject(document: &web_sys::Document) -> Result<(), wasm_bindgen::JsValue> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(DYNAMIC_STYLES));
    head.append_child(&style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lightbox_is_hidden_until_displayed() {
        assert!(lightbox_css(false, false).starts_with("display: none;"));
        let open = lightbox_css(true, true);
        assert!(open.starts_with("display: flex;"));
        assert!(open.contains("opacity: 1;"));
    }

    #[test]
    fn palette_colors_flow_into_created_nodes() {
        let palette = Palette::default();
        assert!(progress_bar_css(&palette).contains("#FFD700 0%, #FFEB3B 100%"));
        assert!(tooltip_css(&palette).contains("background: #1A1A1A; color: #FFFFFF;"));
    }

    #[test]
    fn ripple_style_uses_geometry() {
        let css = ripple_css(&RippleGeometry {
            size: 80.0,
            left: -4.5,
            top: 12.0,
        });
        assert!(css.contains("width: 80px; height: 80px;"));
        assert!(css.contains("left: -4.5px; top: 12px;"));
    }
}
