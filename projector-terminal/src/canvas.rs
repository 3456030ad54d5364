/// Pixel canvas that shows up as half-block characters in the terminal
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use projector_core::{Color, LinearGradient, Rect, Surface};
use std::io::Write;
use std::ops::Range;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Strokes and discs never shrink below one pixel across.
const MIN_HALF_EXTENT: f64 = 0.5;

/// A software surface with two pixels per terminal cell, stacked vertically.
///
/// Sources are composited with straight-alpha "over". Every source color is
/// clamped to `[0, 1]` per channel before it touches the buffer.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// A canvas covering `columns` x `rows` terminal cells.
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Color::BLACK);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn blend(&mut self, x: usize, y: usize, source: Color) {
        let source = source.clamped();
        let idx = y * self.width + x;
        let dst = self.pixels[idx];
        let a = source.a;
        self.pixels[idx] = Color::rgb(
            source.r * a + dst.r * (1.0 - a),
            source.g * a + dst.g * (1.0 - a),
            source.b * a + dst.b * (1.0 - a),
        );
    }

    /// Pixel columns and rows whose centers may fall in `[min, max]`.
    fn bounds(&self, min: Point2<f64>, max: Point2<f64>) -> (Range<usize>, Range<usize>) {
        fn span(lo: f64, hi: f64, limit: usize) -> Range<usize> {
            let start = lo.floor().max(0.0) as usize;
            let end = (hi.ceil().max(0.0) as usize).min(limit);
            start.min(end)..end
        }
        (
            span(min.x, max.x, self.width),
            span(min.y, max.y, self.height),
        )
    }

    fn fill_where<F>(&mut self, min: Point2<f64>, max: Point2<f64>, mut shade: F)
    where
        F: FnMut(Point2<f64>) -> Option<Color>,
    {
        let (xs, ys) = self.bounds(min, max);
        for y in ys {
            for x in xs.clone() {
                let center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some(color) = shade(center) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Write the canvas to the terminal, one cell per two pixels.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let rows = self.height.div_ceil(2);
        let mut current: Option<(TermColor, TermColor)> = None;

        for row in 0..rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for x in 0..self.width {
                let top = self.pixel(x, row * 2).unwrap_or(Color::BLACK);
                let bottom = self.pixel(x, row * 2 + 1).unwrap_or(Color::BLACK);
                let colors = (term_color(top), term_color(bottom));

                if current != Some(colors) {
                    writer.queue(SetForegroundColor(colors.0))?;
                    writer.queue(SetBackgroundColor(colors.1))?;
                    current = Some(colors);
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width as u32
    }

    fn height(&self) -> u32 {
        self.height as u32
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = Point2::new(rect.x, rect.y);
        let max = Point2::new(rect.x + rect.width, rect.y + rect.height);
        self.fill_where(min, max, |p| rect.contains(p).then_some(color));
    }

    fn fill_polygon(&mut self, points: &[Point2<f64>], paint: &LinearGradient) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = extent(points);
        self.fill_where(min, max, |p| inside_polygon(points, p).then(|| paint.sample(p)));
    }

    fn stroke_line(&mut self, from: Point2<f64>, to: Point2<f64>, width: f64, paint: &LinearGradient) {
        let half = (width / 2.0).max(MIN_HALF_EXTENT);
        let (min, max) = extent(&[from, to]);
        let pad = nalgebra::Vector2::new(half, half);
        self.fill_where(min - pad, max + pad, |p| {
            (distance_to_segment(p, from, to) <= half).then(|| paint.sample(p))
        });
    }

    fn fill_ellipse(&mut self, center: Point2<f64>, radius_x: f64, radius_y: f64, color: Color) {
        let rx = radius_x.max(MIN_HALF_EXTENT);
        let ry = radius_y.max(MIN_HALF_EXTENT);
        let pad = nalgebra::Vector2::new(rx, ry);
        self.fill_where(center - pad, center + pad, |p| {
            let dx = (p.x - center.x) / rx;
            let dy = (p.y - center.y) / ry;
            (dx * dx + dy * dy <= 1.0).then_some(color)
        });
    }
}

fn term_color(color: Color) -> TermColor {
    let [r, g, b] = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

fn extent(points: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
    }
    (min, max)
}

/// Even-odd rule: count edge crossings of a ray towards +x.
fn inside_polygon(points: &[Point2<f64>], p: Point2<f64>) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn distance_to_segment(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + ab * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use projector_core::{DepthOrderedRenderer, RotationAngles, Scene};

    fn solid(color: Color) -> LinearGradient {
        let origin = Point2::new(0.0, 0.0);
        LinearGradient::new(origin, color, origin, color)
    }

    #[test]
    fn test_fill_rect_covers_pixel_centers() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::rgb(1.0, 0.0, 0.0));

        assert_eq!(canvas.pixel(1, 1), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(canvas.pixel(2, 2), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_polygon_uses_even_odd_interior() {
        let mut canvas = Canvas::new(10, 10);
        let square = [
            Point2::new(2.0, 2.0),
            Point2::new(8.0, 2.0),
            Point2::new(8.0, 8.0),
            Point2::new(2.0, 8.0),
        ];
        canvas.fill_polygon(&square, &solid(Color::rgb(0.0, 1.0, 0.0)));

        assert_eq!(canvas.pixel(5, 5), Some(Color::rgb(0.0, 1.0, 0.0)));
        assert_eq!(canvas.pixel(2, 7), Some(Color::rgb(0.0, 1.0, 0.0)));
        assert_eq!(canvas.pixel(1, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(8, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_translucent_fill_blends_over() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::rgb(1.0, 1.0, 1.0));
        canvas.fill_ellipse(Point2::new(1.0, 1.0), 2.0, 2.0, Color::rgba(0.0, 0.0, 0.0, 0.5));

        let p = canvas.pixel(0, 0).expect("in bounds");
        assert!((p.r - 0.5).abs() < 1e-6);
        assert_eq!(p.a, 1.0);
    }

    #[test]
    fn test_stroke_line_follows_gradient() {
        let mut canvas = Canvas::new(10, 3);
        let from = Point2::new(0.0, 1.5);
        let to = Point2::new(10.0, 1.5);
        let paint = LinearGradient::new(from, Color::rgb(0.0, 0.0, 0.0), to, Color::rgb(0.0, 1.0, 0.0));
        canvas.stroke_line(from, to, 1.0, &paint);

        let left = canvas.pixel(0, 1).expect("in bounds");
        let right = canvas.pixel(9, 1).expect("in bounds");
        assert!(left.g < 0.1);
        assert!(right.g > 0.9);
        assert_eq!(canvas.pixel(5, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_out_of_gamut_colors_are_clamped() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill_ellipse(Point2::new(1.5, 1.5), 1.0, 1.0, Color::rgb(-2.0, 7.5, f32::NAN));
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgb(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_draws_offscreen_shapes_without_panicking() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill_ellipse(Point2::new(-50.0, 300.0), 4.0, 4.0, Color::BLACK);
        canvas.stroke_line(
            Point2::new(-100.0, -100.0),
            Point2::new(-90.0, -90.0),
            3.0,
            &solid(Color::BLACK),
        );
        canvas.fill_polygon(&[Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)], &solid(Color::BLACK));
    }

    #[test]
    fn test_draw_emits_one_block_per_cell() {
        let mut canvas = Canvas::for_terminal(6, 3);
        assert_eq!((canvas.width(), canvas.height()), (6, 6));

        let scene = Scene::cube();
        DepthOrderedRenderer::new(&scene)
            .render(&RotationAngles::new(0.3, 0.4, 0.5), &mut canvas);

        let mut out = Vec::new();
        canvas.draw(&mut out).expect("writing to a Vec succeeds");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text.matches(HALF_BLOCK).count(), 6 * 3);
    }

    #[test]
    fn test_resize_resets_pixels() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::rgb(1.0, 1.0, 1.0));
        canvas.resize(3, 1);
        assert_eq!(canvas.pixel(2, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 1), None);
    }

    #[test]
    fn test_renders_cube_over_background() {
        let mut canvas = Canvas::new(200, 200);
        let scene = Scene::cube();
        DepthOrderedRenderer::new(&scene).render(&RotationAngles::zero(), &mut canvas);

        // Corners are out of the cube's silhouette; the middle is not.
        assert_eq!(canvas.pixel(0, 0), Some(Color::DARK_GRAY.clamped()));
        let middle = canvas.pixel(100, 100).expect("in bounds");
        assert_ne!(middle, Color::DARK_GRAY);
        assert_eq!(middle.r, middle.b);
    }
}
