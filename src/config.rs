use serde::Serialize;

use crate::telemetry::LogLevel;

const DEFAULT_ANIMATION_DURATION_MS: u32 = 600;
const DEFAULT_SCROLL_THRESHOLD: f64 = 0.1;
const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;
const DEFAULT_PARTICLE_COUNT: usize = 50;
const DEFAULT_MOUSE_TRAIL_LENGTH: usize = 20;
const DEFAULT_GALLERY_PAGE_SIZE: usize = 9;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ANIMATION_DURATION_MS_BOUNDS: (u32, u32) = (0, 10_000);
const RESIZE_DEBOUNCE_MS_BOUNDS: (u32, u32) = (0, 5_000);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 500);
const MOUSE_TRAIL_LENGTH_BOUNDS: (usize, usize) = (2, 200);
const GALLERY_PAGE_SIZE_BOUNDS: (usize, usize) = (1, 200);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub white: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#FFD700",
            secondary: "#1A1A1A",
            accent: "#FFEB3B",
            white: "#FFFFFF",
        }
    }
}

/// Tunables shared by every behavior on the page.
///
/// Defaults match the stock site. A page can override the numeric knobs with
/// `data-*` attributes on `<body>`; values outside their bounds are ignored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteConfig {
    pub animation_duration_ms: u32,
    pub scroll_threshold: f64,
    pub resize_debounce_ms: u32,
    pub particle_count: usize,
    pub mouse_trail_length: usize,
    pub gallery_page_size: usize,
    pub log_level: LogLevel,
    pub palette: Palette,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            mouse_trail_length: DEFAULT_MOUSE_TRAIL_LENGTH,
            gallery_page_size: DEFAULT_GALLERY_PAGE_SIZE,
            log_level: DEFAULT_LOG_LEVEL,
            palette: Palette::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let animation_duration_ms = parse_u32_with_bounds(
            &lookup,
            "data-animation-duration-ms",
            DEFAULT_ANIMATION_DURATION_MS,
            ANIMATION_DURATION_MS_BOUNDS,
        );
        let resize_debounce_ms = parse_u32_with_bounds(
            &lookup,
            "data-resize-debounce-ms",
            DEFAULT_RESIZE_DEBOUNCE_MS,
            RESIZE_DEBOUNCE_MS_BOUNDS,
        );
        let particle_count = parse_usize_with_bounds(
            &lookup,
            "data-particle-count",
            DEFAULT_PARTICLE_COUNT,
            PARTICLE_COUNT_BOUNDS,
        );
        let mouse_trail_length = parse_usize_with_bounds(
            &lookup,
            "data-mouse-trail-length",
            DEFAULT_MOUSE_TRAIL_LENGTH,
            MOUSE_TRAIL_LENGTH_BOUNDS,
        );
        let gallery_page_size = parse_usize_with_bounds(
            &lookup,
            "data-gallery-page-size",
            DEFAULT_GALLERY_PAGE_SIZE,
            GALLERY_PAGE_SIZE_BOUNDS,
        );
        let log_level = parse_log_level(&lookup, "data-log-level", DEFAULT_LOG_LEVEL);

        Self {
            animation_duration_ms,
            resize_debounce_ms,
            particle_count,
            mouse_trail_length,
            gallery_page_size,
            log_level,
            ..Self::default()
        }
    }
}

fn parse_non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    parse_non_empty(lookup, name)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
    bounds: (usize, usize),
) -> usize {
    parse_non_empty(lookup, name)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    parse_non_empty(lookup, name)
        .and_then(|value| LogLevel::from_str(&value.to_ascii_lowercase()))
        .unwrap_or(default)
}

#[cfg(target_arch = "wasm32")]
pub fn from_document(document: &web_sys::Document) -> SiteConfig {
    match document.body() {
        Some(body) => SiteConfig::from_lookup(|name| body.get_attribute(name)),
        None => SiteConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_attributes_fall_back_to_defaults() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.gallery_page_size, 9);
        assert_eq!(config.particle_count, 50);
    }

    #[test]
    fn in_bounds_overrides_are_applied() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("data-particle-count", " 12 "),
            ("data-gallery-page-size", "6"),
            ("data-log-level", "DEBUG"),
        ]));

        assert_eq!(config.particle_count, 12);
        assert_eq!(config.gallery_page_size, 6);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_or_garbage_values_are_ignored() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("data-particle-count", "100000"),
            ("data-gallery-page-size", "0"),
            ("data-mouse-trail-length", "lots"),
            ("data-log-level", "verbose"),
        ]));

        assert_eq!(config.particle_count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.gallery_page_size, DEFAULT_GALLERY_PAGE_SIZE);
        assert_eq!(config.mouse_trail_length, DEFAULT_MOUSE_TRAIL_LENGTH);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
