use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::effects::{EffectSurface, EmberShade, FlameBand, Particle, FLAME_STOPS};

const SMOKE_BLUR: &str = "blur(6px)";

/// 2D canvas backing for [`EffectSurface`]. Drawing errors from the context
/// only cost the affected shape, so they are dropped.
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d canvas not supported")?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    fn rounded_clip(&self, width: f64, height: f64, radius: f64) {
        let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(r, 0.0);
        ctx.line_to(width - r, 0.0);
        ctx.quadratic_curve_to(width, 0.0, width, r);
        ctx.line_to(width, height - r);
        ctx.quadratic_curve_to(width, height, width - r, height);
        ctx.line_to(r, height);
        ctx.quadratic_curve_to(0.0, height, 0.0, height - r);
        ctx.line_to(0.0, r);
        ctx.quadratic_curve_to(0.0, 0.0, r, 0.0);
        ctx.close_path();
        ctx.clip();
    }
}

impl EffectSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn begin_frame(&mut self, corner_radius: f64) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.save();
        self.rounded_clip(width, height, corner_radius);
    }

    fn fill_flame(&mut self, band: &FlameBand) {
        let ctx = &self.ctx;
        let gradient = ctx.create_linear_gradient(0.0, band.top_y, 0.0, band.base_y);
        for (offset, color) in FLAME_STOPS {
            let _ = gradient.add_color_stop(offset as f32, &color.css());
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.move_to(band.left, band.base_y);
        for &(x, y) in &band.peaks {
            ctx.line_to(x, y);
        }
        ctx.line_to(band.right, band.base_y);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_smoke(&mut self, puff: &Particle, alpha: f64) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.set_global_composite_operation("lighter");
        ctx.set_filter(SMOKE_BLUR);
        ctx.set_fill_style_str(&format!("rgba(200,200,200,{alpha})"));
        ctx.begin_path();
        let _ = ctx.arc(puff.x, puff.y, puff.size, 0.0, TAU);
        ctx.fill();
        ctx.restore();
    }

    fn draw_ember(&mut self, ember: &Particle, shade: &EmberShade) {
        let ctx = &self.ctx;
        let Ok(gradient) =
            ctx.create_radial_gradient(ember.x, ember.y, 0.0, ember.x, ember.y, ember.size)
        else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &shade.core.css());
        let _ = gradient.add_color_stop(EmberShade::BODY_STOP as f32, &shade.body.css());
        let _ = gradient.add_color_stop(1.0, &shade.edge.css());
        let _ = ctx.set_global_composite_operation("lighter");
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        let _ = ctx.arc(ember.x, ember.y, ember.size, 0.0, TAU);
        ctx.fill();
    }

    fn end_frame(&mut self) {
        self.ctx.restore();
    }
}
