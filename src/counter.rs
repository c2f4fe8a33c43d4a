const COUNT_DURATION_MS: f64 = 2_000.0;
const FRAME_MS: f64 = 16.0;
pub const PULSE_MS: u32 = 500;
pub const STATS_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Mirrors `parseInt`: optional sign followed by leading digits, anything
/// after that is ignored.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|value| sign * value)
}

#[derive(Debug, PartialEq, Eq)]
pub enum CounterFrame {
    Counting(String),
    Finished(String),
}

/// Counts from zero to `target` in equal steps, one step per frame.
#[derive(Debug)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            increment: target as f64 / (COUNT_DURATION_MS / FRAME_MS),
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame::Counting((self.current.floor() as i64).to_string())
        } else {
            CounterFrame::Finished(self.target.to_string())
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::telemetry::{log_event, LogLevel};
    use gloo_timers::callback::Timeout;
    use serde_json::json;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element, HtmlElement};

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(stats) = dom::query::<Element>(document, ".stats") else {
            return Ok(());
        };
        let document = document.clone();
        let config = config.clone();
        let options = dom::observer_options(STATS_VISIBILITY_THRESHOLD, None);

        dom::observe_once(&[stats], &options, move |_| animate_counters(&document, &config))
    }

    fn animate_counters(document: &Document, config: &SiteConfig) {
        for stat in dom::query_all::<HtmlElement>(document, ".stat-number[data-target]") {
            let raw = stat.get_attribute("data-target").unwrap_or_default();
            let Some(target) = parse_target(&raw) else {
                log_event(config, LogLevel::Debug, "counter_target_invalid", json!({ "raw": raw }));
                continue;
            };

            let mut animation = CounterAnimation::new(target);
            let _ = dom::animation_loop(move |_| match animation.step() {
                CounterFrame::Counting(text) => {
                    stat.set_text_content(Some(text.as_str()));
                    true
                }
                CounterFrame::Finished(text) => {
                    stat.set_text_content(Some(text.as_str()));
                    pulse(&stat);
                    false
                }
            });
        }
    }

    fn pulse(element: &HtmlElement) {
        dom::set_style(element, "animation", "pulse 0.5s ease");
        let element = element.clone();
        Timeout::new(PULSE_MS, move || dom::set_style(&element, "animation", "")).forget();
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: i64) -> (usize, String) {
        let mut animation = CounterAnimation::new(target);
        for frame in 1..=10_000 {
            if let CounterFrame::Finished(text) = animation.step() {
                return (frame, text);
            }
        }
        panic!("counter for {target} never finished");
    }

    #[test]
    fn counter_ends_on_exact_target_text() {
        let (frames, text) = run_to_end(100);
        assert_eq!(text, "100");
        assert!(frames >= 125 && frames <= 126, "took {frames} frames");
    }

    #[test]
    fn intermediate_frames_show_floored_values_below_target() {
        let mut animation = CounterAnimation::new(1_000);
        assert_eq!(animation.step(), CounterFrame::Counting("8".to_string()));
        assert_eq!(animation.step(), CounterFrame::Counting("16".to_string()));
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        assert_eq!(run_to_end(0), (1, "0".to_string()));
    }

    #[test]
    fn target_parsing_follows_leading_digits() {
        assert_eq!(parse_target("250"), Some(250));
        assert_eq!(parse_target(" 1500+ "), Some(1500));
        assert_eq!(parse_target("-3"), Some(-3));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
    }
}
