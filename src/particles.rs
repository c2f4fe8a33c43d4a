//! Drifting dots drawn behind the hero section.

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub opacity: f64,
}

fn between(sample: f64, min: f64, max: f64) -> f64 {
    sample * (max - min) + min
}

#[derive(Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// `sample` yields uniform values in `[0, 1)`.
    pub fn new(count: usize, width: f64, height: f64, mut sample: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: between(sample(), 0.0, width),
                y: between(sample(), 0.0, height),
                radius: between(sample(), 1.0, 3.0),
                speed_x: between(sample(), -0.5, 0.5),
                speed_y: between(sample(), -0.5, 0.5),
                opacity: between(sample(), 0.1, 0.5),
            })
            .collect();

        Self {
            width,
            height,
            particles,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.speed_x;
            particle.y += particle.speed_y;

            if particle.x < 0.0 {
                particle.x = self.width;
            }
            if particle.x > self.width {
                particle.x = 0.0;
            }
            if particle.y < 0.0 {
                particle.y = self.height;
            }
            if particle.y > self.height {
                particle.y = 0.0;
            }
        }
    }
}

pub fn particle_fill(opacity: f64) -> String {
    format!("rgba(255, 215, 0, {opacity})")
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use crate::styles;
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    fn fit_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let width = canvas.offset_width().max(0) as u32;
        let height = canvas.offset_height().max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (f64::from(width), f64::from(height))
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let Some(hero) = dom::query::<HtmlElement>(document, ".hero") else {
            return Ok(());
        };

        let canvas: HtmlCanvasElement = dom::create(document, "canvas")?;
        canvas.style().set_css_text(styles::HERO_CANVAS_CSS);
        hero.append_child(&canvas)?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (width, height) = fit_canvas(&canvas);
        let field = Rc::new(RefCell::new(ParticleField::new(
            config.particle_count,
            width,
            height,
            js_sys::Math::random,
        )));

        {
            let canvas = canvas.clone();
            let field = field.clone();
            dom::listen(
                dom::window()?.as_ref(),
                "resize",
                dom::debounce::<web_sys::Event>(config.resize_debounce_ms, move || {
                    let (width, height) = fit_canvas(&canvas);
                    field.borrow_mut().resize(width, height);
                }),
            )?;
        }

        dom::animation_loop(move |_| {
            let mut field = field.borrow_mut();
            context.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
            field.step();
            for particle in field.particles() {
                context.begin_path();
                let _ = context.arc(particle.x, particle.y, particle.radius, 0.0, PI * 2.0);
                context.set_fill_style_str(&particle_fill(particle.opacity));
                context.fill();
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

    fn fixed(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    #[test]
    fn particles_are_spawned_inside_configured_ranges() {
        let field = ParticleField::new(5, 200.0, 100.0, fixed(0.5));
        assert_eq!(field.particles().len(), 5);
        let particle = &field.particles()[0];
        assert_eq!(particle.x, 100.0);
        assert_eq!(particle.y, 50.0);
        assert_eq!(particle.radius, 2.0);
        assert_eq!(particle.speed_x, 0.0);
        assert!((particle.opacity - 0.3).abs() < 1e-9);
    }

    #[test]
    fn particles_wrap_around_edges() {
        let mut field = ParticleField::new(1, 10.0, 10.0, fixed(0.0));
        // x = 0, speed_x = -0.5 so the first step leaves the left edge
        field.step();
        assert_eq!(field.particles()[0].x, 10.0);
        assert_eq!(field.particles()[0].y, 10.0);
    }

    #[test]
    fn resize_changes_wrap_bounds() {
        let mut field = ParticleField::new(1, 10.0, 10.0, fixed(0.0));
        field.resize(40.0, 30.0);
        field.step();
        assert_eq!(field.particles()[0].x, 40.0);
        assert_eq!(field.particles()[0].y, 30.0);
    }

    #[test]
    fn fill_uses_gold_with_particle_opacity() {
        assert_eq!(particle_fill(0.25), "rgba(255, 215, 0, 0.25)");
    }
}
