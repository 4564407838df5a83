use super::flame::FlameBand;
use super::particle::{EmberShade, Particle};

/// Drawing target for one effect frame. Calls arrive in paint order:
/// `begin_frame`, the flame band, every smoke puff, every ember, `end_frame`.
pub trait EffectSurface {
    /// Current drawing size in pixels.
    fn size(&self) -> (f64, f64);

    /// Clears the surface and clips further drawing to a rounded rectangle
    /// covering it.
    fn begin_frame(&mut self, corner_radius: f64);

    fn fill_flame(&mut self, band: &FlameBand);

    /// Blurred gray puff, composited additively.
    fn draw_smoke(&mut self, puff: &Particle, alpha: f64);

    /// Radial glow, composited additively.
    fn draw_ember(&mut self, ember: &Particle, shade: &EmberShade);

    fn end_frame(&mut self);
}
