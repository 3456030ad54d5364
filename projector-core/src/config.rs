/// Renderer configuration
use crate::paint::Color;

/// Constants that shape a rendered frame.
///
/// `Default` gives the stock look: 50 pixels per unit, 0.1-unit points and
/// strokes, green shading over a depth range of ±3, and faces fading to 20%
/// opacity towards their front corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Surface pixels per model unit.
    pub scale: f64,
    /// Radius of vertex discs, in model units.
    pub point_radius: f64,
    /// Edge stroke width, in model units.
    pub stroke_width: f64,
    /// Depth values mapped onto green 0..1.
    pub depth_range: (f64, f64),
    /// Face opacity at the back (anchor) end of its gradient.
    pub face_far_alpha: f32,
    /// Face opacity at the frontmost corner.
    pub face_front_alpha: f32,
    pub background: Color,
    pub draw_faces: bool,
    pub draw_edges: bool,
    pub draw_points: bool,
}

impl RenderConfig {
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Only vertex discs, as the first versions of the projector drew.
    pub fn points_only() -> Self {
        Self {
            draw_faces: false,
            draw_edges: false,
            ..Self::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 50.0,
            point_radius: 0.1,
            stroke_width: 0.1,
            depth_range: (-3.0, 3.0),
            face_far_alpha: 1.0,
            face_front_alpha: 0.2,
            background: Color::DARK_GRAY,
            draw_faces: true,
            draw_edges: true,
            draw_points: true,
        }
    }
}
