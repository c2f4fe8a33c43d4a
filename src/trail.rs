use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, PartialEq)]
pub struct TrailSegment {
    pub from: TrailPoint,
    pub to: TrailPoint,
    pub alpha: f64,
    pub line_width: f64,
}

/// Bounded history of pointer samples, oldest first.
#[derive(Debug)]
pub struct MouseTrail {
    points: VecDeque<TrailPoint>,
    max_length: usize,
}

impl MouseTrail {
    pub fn new(max_length: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_length + 1),
            max_length,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push_back(TrailPoint { x, y });
        while self.points.len() > self.max_length {
            self.points.pop_front();
        }
    }

    /// Older segments fade out and thin down.
    pub fn segments(&self) -> Vec<TrailSegment> {
        let total = self.points.len() as f64;
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .enumerate()
            .map(|(index, (from, to))| {
                let progress = index as f64 / total;
                TrailSegment {
                    from: *from,
                    to: *to,
                    alpha: progress * 0.3,
                    line_width: 3.0 * progress,
                }
            })
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent};

    fn fit_to_viewport(canvas: &HtmlCanvasElement) {
        let (width, height) = dom::viewport_size();
        canvas.set_width(width.max(0.0) as u32);
        canvas.set_height(height.max(0.0) as u32);
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };

        let canvas: HtmlCanvasElement = dom::create(document, "canvas")?;
        canvas.style().set_css_text(styles::TRAIL_CANVAS_CSS);
        body.append_child(&canvas)?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        fit_to_viewport(&canvas);

        {
            let canvas = canvas.clone();
            dom::listen(
                dom::window()?.as_ref(),
                "resize",
                dom::debounce::<web_sys::Event>(config.resize_debounce_ms, move || {
                    fit_to_viewport(&canvas)
                }),
            )?;
        }

        let pointer = Rc::new(Cell::new((0.0_f64, 0.0_f64)));
        {
            let pointer = pointer.clone();
            dom::listen(document, "mousemove", move |event: MouseEvent| {
                pointer.set((f64::from(event.client_x()), f64::from(event.client_y())));
            })?;
        }

        let mut trail = MouseTrail::new(config.mouse_trail_length);
        dom::animation_loop(move |_| {
            context.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
            let (x, y) = pointer.get();
            trail.push(x, y);

            for segment in trail.segments() {
                context.begin_path();
                context.move_to(segment.from.x, segment.from.y);
                context.line_to(segment.to.x, segment.to.y);
                context.set_stroke_style_str(&format!("rgba(255, 215, 0, {})", segment.alpha));
                context.set_line_width(segment.line_width);
                context.stroke();
            }
            true
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_keeps_only_the_newest_points() {
        let mut trail = MouseTrail::new(3);
        for step in 0..5 {
            trail.push(f64::from(step), 0.0);
        }
        assert_eq!(trail.len(), 3);
        let segments = trail.segments();
        assert_eq!(segments[0].from, TrailPoint { x: 2.0, y: 0.0 });
        assert_eq!(segments[1].to, TrailPoint { x: 4.0, y: 0.0 });
    }

    #[test]
    fn newer_segments_are_more_opaque_and_wider() {
        let mut trail = MouseTrail::new(20);
        for step in 0..4 {
            trail.push(f64::from(step) * 10.0, 5.0);
        }
        let segments = trail.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].alpha, 0.0);
        assert!(segments[2].alpha > segments[1].alpha);
        assert!((segments[2].line_width - 1.5).abs() < 1e-9);
    }

    #[test]
    fn single_point_draws_nothing() {
        let mut trail = MouseTrail::new(20);
        trail.push(1.0, 1.0);
        assert!(trail.segments().is_empty());
    }
}
