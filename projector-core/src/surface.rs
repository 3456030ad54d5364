//! Drawing surface abstraction and the draw command stream.
//!
//! The renderer talks to a [`Surface`]; a front-end backs it with whatever
//! 2D API it has. [`CommandList`] is a surface that only records, which is
//! what tests compare and what can be replayed later with [`DrawCmd::apply`].

use nalgebra::Point2;

use crate::paint::{Color, LinearGradient};

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// A 2D drawing target of known size.
///
/// Coordinates are pixels with the origin in the top-left corner.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill the closed polygon through `points` (last joins first).
    fn fill_polygon(&mut self, points: &[Point2<f64>], paint: &LinearGradient);

    fn stroke_line(&mut self, from: Point2<f64>, to: Point2<f64>, width: f64, paint: &LinearGradient);

    fn fill_ellipse(&mut self, center: Point2<f64>, radius_x: f64, radius_y: f64, color: Color);
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillPolygon {
        points: Vec<Point2<f64>>,
        paint: LinearGradient,
    },
    StrokeLine {
        from: Point2<f64>,
        to: Point2<f64>,
        width: f64,
        paint: LinearGradient,
    },
    FillEllipse {
        center: Point2<f64>,
        radius_x: f64,
        radius_y: f64,
        color: Color,
    },
}

impl DrawCmd {
    /// Replays this command onto `surface`.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCmd::FillRect { rect, color } => surface.fill_rect(*rect, *color),
            DrawCmd::FillPolygon { points, paint } => surface.fill_polygon(points, paint),
            DrawCmd::StrokeLine {
                from,
                to,
                width,
                paint,
            } => surface.stroke_line(*from, *to, *width, paint),
            DrawCmd::FillEllipse {
                center,
                radius_x,
                radius_y,
                color,
            } => surface.fill_ellipse(*center, *radius_x, *radius_y, *color),
        }
    }
}

/// A surface that records every command it receives, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    width: u32,
    height: u32,
    commands: Vec<DrawCmd>,
}

impl CommandList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }

    /// Drops recorded commands, keeping capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for cmd in &self.commands {
            cmd.apply(surface);
        }
    }
}

impl Surface for CommandList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn fill_polygon(&mut self, points: &[Point2<f64>], paint: &LinearGradient) {
        self.commands.push(DrawCmd::FillPolygon {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn stroke_line(&mut self, from: Point2<f64>, to: Point2<f64>, width: f64, paint: &LinearGradient) {
        self.commands.push(DrawCmd::StrokeLine {
            from,
            to,
            width,
            paint: *paint,
        });
    }

    fn fill_ellipse(&mut self, center: Point2<f64>, radius_x: f64, radius_y: f64, color: Color) {
        self.commands.push(DrawCmd::FillEllipse {
            center,
            radius_x,
            radius_y,
            color,
        });
    }
}
