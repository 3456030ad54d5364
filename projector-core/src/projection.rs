/// Screen projection for the renderer
use nalgebra::Point2;

use crate::vector::Vec3;

/// Maps model space onto a surface: origin at the surface midpoint, uniform
/// scale, Z dropped.
///
/// There is no camera and no perspective divide; depth only ever feeds the
/// draw order and shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Surface pixels per model unit.
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// The surface midpoint, rounded down to whole pixels.
    pub fn center(&self) -> Point2<f64> {
        Point2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Project a model-space point to surface coordinates.
    pub fn project(&self, point: Vec3) -> Point2<f64> {
        let center = self.center();
        Point2::new(
            center.x + self.scale * point.x,
            center.y + self.scale * point.y,
        )
    }

    /// Convert a model-space length to surface pixels.
    pub fn length(&self, model_length: f64) -> f64 {
        self.scale * model_length
    }

    /// Largest scale at which a sphere of `radius` model units fits inside
    /// the surface.
    pub fn fit_scale(width: u32, height: u32, radius: f64) -> f64 {
        let half = width.min(height) as f64 / 2.0;
        half / radius
    }
}
