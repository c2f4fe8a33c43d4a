//! Scroll and animation math shared by the navigation and reveal behaviors.

pub const NAV_SCROLL_THROTTLE_MS: f64 = 100.0;
pub const FRAME_THROTTLE_MS: f64 = 16.0;
pub const SMOOTH_SCROLL_DURATION_MS: f64 = 800.0;
pub const STAGGER_STEP_MS: u32 = 100;

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

/// Position of a smooth scroll `elapsed_ms` into an animation of `duration_ms`.
pub fn smooth_scroll_position(start: f64, distance: f64, elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return start + distance;
    }
    start + distance * ease_in_out_cubic(elapsed_ms / duration_ms)
}

/// Percentage of the document scrolled, 0 when the page cannot scroll.
pub fn scroll_percentage(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn parallax_offset(scrolled: f64, index: usize) -> f64 {
    let speed = 0.5 + index as f64 * 0.1;
    -(scrolled * speed)
}

pub fn stagger_delay_ms(sibling_index: usize) -> u32 {
    u32::try_from(sibling_index)
        .unwrap_or(u32::MAX / STAGGER_STEP_MS)
        .saturating_mul(STAGGER_STEP_MS)
}

/// Leading-edge throttle: the first call in each window runs, the rest drop.
#[derive(Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_run_ms: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_run_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_run_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn smooth_scroll_never_overshoots_after_duration() {
        let end = smooth_scroll_position(200.0, 300.0, 950.0, SMOOTH_SCROLL_DURATION_MS);
        assert_eq!(end, 500.0);
    }

    #[test]
    fn scroll_percentage_handles_unscrollable_pages() {
        assert_eq!(scroll_percentage(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_percentage(250.0, 1_300.0, 800.0), 50.0);
    }

    #[test]
    fn parallax_speed_grows_with_index() {
        assert_eq!(parallax_offset(100.0, 0), -50.0);
        assert!((parallax_offset(100.0, 2) + 70.0).abs() < 1e-9);
    }

    #[test]
    fn stagger_delay_is_index_times_step() {
        assert_eq!(stagger_delay_ms(0), 0);
        assert_eq!(stagger_delay_ms(3), 300);
    }

    #[test]
    fn throttle_drops_calls_inside_the_window() {
        let mut throttle = Throttle::new(100.0);
        assert!(throttle.ready(0.0));
        assert!(!throttle.ready(50.0));
        assert!(throttle.ready(100.0));
        assert!(!throttle.ready(199.0));
    }
}
