// Canvas painting for the heart scene: a translucent dark wash each frame
// for motion trails, then every particle as an additively blended disc.
// Compositing is restored to source-over afterward so the DOM layers above
// the canvas draw normally.

use crate::projection;
use crate::simulation::Simulation;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct Renderer {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Renderer {
    const TRAIL_FILL: &'static str = "rgba(15, 2, 5, 0.4)";
    const GLOW_COLOR: &'static str = "hsl(340, 100%, 60%)";
    const GLOW_BLUR: f64 = 18.0;

    pub fn new(context: CanvasRenderingContext2d, width: f64, height: f64) -> Renderer {
        Renderer {
            context,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[allow(deprecated)]
    pub fn render(&self, simulation: &Simulation) -> Result<(), JsValue> {
        self.context.set_global_composite_operation("source-over")?;
        self.context
            .set_fill_style(&JsValue::from_str(Renderer::TRAIL_FILL));
        self.context.fill_rect(0.0, 0.0, self.width, self.height);

        self.context.set_global_composite_operation("lighter")?;
        let glow = simulation.glow();
        if glow > 0.01 {
            self.context.set_shadow_color(Renderer::GLOW_COLOR);
            self.context.set_shadow_blur(glow * Renderer::GLOW_BLUR);
        }

        let (rot_x, rot_y) = simulation.rotation();
        let center = (self.width / 2.0, self.height / 2.0);
        for particle in simulation.particles() {
            let projected = match projection::project(particle.pos, rot_x, rot_y, center) {
                Some(p) => p,
                None => continue,
            };
            self.context
                .set_fill_style(&JsValue::from_str(&particle.color.to_css()));
            self.context.begin_path();
            self.context.arc(
                projected.x,
                projected.y,
                particle.size * projected.scale,
                0.0,
                PI * 2.0,
            )?;
            self.context.fill();
        }

        self.context.set_shadow_blur(0.0);
        self.context.set_global_composite_operation("source-over")?;
        Ok(())
    }
}
