//! Paint model shared between the renderer and drawing surfaces.
//!
//! Colors are straight (non-premultiplied) alpha in `f32`. The renderer may
//! hand out channel values outside `[0, 1]` for vertices that fall outside
//! the expected depth range; surfaces call [`Color::clamped`] before writing
//! a pixel, which truncates each channel at the boundary.

use nalgebra::Point2;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// 64/64/64, the backdrop behind the scene.
    pub const DARK_GRAY: Color = Color::rgb(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let s = 1.0 - t;
        Self {
            r: self.r * s + other.r * t,
            g: self.g * s + other.g * t,
            b: self.b * s + other.b * t,
            a: self.a * s + other.a * t,
        }
    }

    /// Truncates every channel to `[0, 1]`. Non-finite channels become 0.
    #[inline]
    pub fn clamped(self) -> Self {
        fn channel(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                0.0
            }
        }
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: channel(self.a),
        }
    }

    /// 8-bit RGB of the clamped color; alpha is dropped.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// Two-stop linear gradient in surface coordinates.
///
/// Points before `start` take `start_color`, points past `end` take
/// `end_color` (pad spread).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point2<f64>,
    pub start_color: Color,
    pub end: Point2<f64>,
    pub end_color: Color,
}

impl LinearGradient {
    pub fn new(start: Point2<f64>, start_color: Color, end: Point2<f64>, end_color: Color) -> Self {
        Self {
            start,
            start_color,
            end,
            end_color,
        }
    }

    /// Gradient position of `point` along the start → end axis, in `[0, 1]`.
    ///
    /// Returns 0 when start and end coincide.
    pub fn parameter(&self, point: Point2<f64>) -> f64 {
        let axis = self.end - self.start;
        let len_sq = axis.norm_squared();
        if len_sq <= f64::EPSILON {
            return 0.0;
        }
        ((point - self.start).dot(&axis) / len_sq).clamp(0.0, 1.0)
    }

    pub fn sample(&self, point: Point2<f64>) -> Color {
        let t = self.parameter(point) as f32;
        self.start_color.lerp(self.end_color, t)
    }
}
