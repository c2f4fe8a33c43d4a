use serde::Serialize;

pub const SLOW_PAGE_LOAD_MS: f64 = 3_000.0;
pub const SLOW_RESOURCE_MS: f64 = 1_000.0;

/// Navigation timing marks, in milliseconds since the epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigationMarks {
    pub navigation_start: f64,
    pub request_start: f64,
    pub response_end: f64,
    pub dom_loading: f64,
    pub dom_complete: f64,
    pub load_event_end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTimings {
    pub page_load_ms: f64,
    pub connect_ms: f64,
    pub render_ms: f64,
}

impl PageTimings {
    pub fn from_marks(marks: NavigationMarks) -> Self {
        Self {
            page_load_ms: marks.load_event_end - marks.navigation_start,
            connect_ms: marks.response_end - marks.request_start,
            render_ms: marks.dom_complete - marks.dom_loading,
        }
    }

    pub fn is_slow(&self) -> bool {
        self.page_load_ms > SLOW_PAGE_LOAD_MS
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTiming {
    pub name: String,
    pub duration_ms: f64,
}

pub fn slow_resources(resources: &[ResourceTiming]) -> Vec<&ResourceTiming> {
    resources
        .iter()
        .filter(|resource| resource.duration_ms > SLOW_RESOURCE_MS)
        .collect()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::telemetry::{log_event, LogLevel};
    use gloo_timers::callback::Timeout;
    use serde_json::json;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Performance, PerformanceEntry};

    fn navigation_marks(performance: &Performance) -> NavigationMarks {
        let timing = performance.timing();
        NavigationMarks {
            navigation_start: timing.navigation_start(),
            request_start: timing.request_start(),
            response_end: timing.response_end(),
            dom_loading: timing.dom_loading(),
            dom_complete: timing.dom_complete(),
            load_event_end: timing.load_event_end(),
        }
    }

    fn resource_timings(performance: &Performance) -> Vec<ResourceTiming> {
        performance
            .get_entries_by_type("resource")
            .iter()
            .filter_map(|entry| entry.dyn_into::<PerformanceEntry>().ok())
            .map(|entry| ResourceTiming {
                name: entry.name(),
                duration_ms: entry.duration(),
            })
            .collect()
    }

    fn report(config: &SiteConfig) {
        let Some(performance) = web_sys::window().and_then(|w| w.performance()) else {
            return;
        };

        let timings = PageTimings::from_marks(navigation_marks(&performance));
        let fields = serde_json::to_value(timings).unwrap_or_default();
        log_event(config, LogLevel::Info, "page_timings", fields);
        if timings.is_slow() {
            log_event(
                config,
                LogLevel::Warn,
                "slow_page_load",
                json!({ "pageLoadMs": timings.page_load_ms }),
            );
        }

        let resources = resource_timings(&performance);
        let slow = slow_resources(&resources);
        if !slow.is_empty() {
            log_event(
                config,
                LogLevel::Warn,
                "slow_resources",
                json!({ "resources": slow }),
            );
        }
    }

    pub fn attach(_document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let config = config.clone();
        crate::frontend::on_window_load(move || {
            // loadEventEnd is only set once the load handlers have returned
            Timeout::new(0, move || report(&config)).forget();
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timings_are_differences_between_marks() {
        let timings = PageTimings::from_marks(NavigationMarks {
            navigation_start: 1_000.0,
            request_start: 1_050.0,
            response_end: 1_250.0,
            dom_loading: 1_300.0,
            dom_complete: 2_100.0,
            load_event_end: 2_400.0,
        });

        assert_eq!(
            timings,
            PageTimings {
                page_load_ms: 1_400.0,
                connect_ms: 200.0,
                render_ms: 800.0,
            }
        );
        assert!(!timings.is_slow());
    }

    #[test]
    fn loads_over_three_seconds_are_slow() {
        let timings = PageTimings::from_marks(NavigationMarks {
            load_event_end: 3_001.0,
            ..NavigationMarks::default()
        });
        assert!(timings.is_slow());
    }

    #[test]
    fn only_resources_over_a_second_are_reported() {
        let resources = vec![
            ResourceTiming {
                name: "/css/style.css".to_string(),
                duration_ms: 120.0,
            },
            ResourceTiming {
                name: "/img/hero.jpg".to_string(),
                duration_ms: 1_800.0,
            },
        ];
        let slow = slow_resources(&resources);
        assert_eq!(slow.len(), 1);
        assert_eq!(slow[0].name, "/img/hero.jpg");
    }

    #[test]
    fn timings_serialize_in_camel_case() {
        let value = serde_json::to_value(PageTimings {
            page_load_ms: 1.0,
            connect_ms: 2.0,
            render_ms: 3.0,
        })
        .expect("serializable");
        assert_eq!(value["pageLoadMs"], 1.0);
        assert_eq!(value["renderMs"], 3.0);
    }
}
