//! Depth-ordered scene renderer.
//!
//! Draws the scene back to front (painter's algorithm). Edges and quads span
//! several vertices, so each one is filed under its backmost vertex, its
//! *anchor*, and drawn right before that vertex's own disc. A primitive is
//! therefore never drawn before a vertex that lies strictly behind it.
//! Primitives sharing an anchor keep their table order.

use std::cmp::Ordering;

use log::trace;
use nalgebra::Point2;

use crate::config::RenderConfig;
use crate::geometry::Scene;
use crate::matrix::Mat3;
use crate::paint::{Color, LinearGradient};
use crate::projection::Viewport;
use crate::scalar::map_range;
use crate::surface::{Rect, Surface};
use crate::transform::{Rotation, RotationAngles};
use crate::vector::Vec3;

/// A scene vertex after this frame's rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedVertex {
    pub original_index: usize,
    pub position: Vec3,
}

/// Back-to-front order of a frame's vertices.
///
/// Vertices sort by ascending transformed Z; equal Z falls back to the
/// original index. `-0.0` and `0.0` count as equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthOrder {
    order: Vec<usize>,
    ranks: Vec<usize>,
}

impl DepthOrder {
    pub fn new(vertices: &[TransformedVertex]) -> Self {
        let mut by_depth: Vec<&TransformedVertex> = vertices.iter().collect();
        by_depth.sort_by(|a, b| compare_depth(a, b));

        let order: Vec<usize> = by_depth.iter().map(|v| v.original_index).collect();
        let mut ranks = vec![0; order.len()];
        for (rank, &vertex) in order.iter().enumerate() {
            ranks[vertex] = rank;
        }

        Self { order, ranks }
    }

    /// Vertex indices, furthest first.
    pub fn back_to_front(&self) -> &[usize] {
        &self.order
    }

    /// Position of `vertex` in the back-to-front order.
    pub fn rank(&self, vertex: usize) -> usize {
        self.ranks[vertex]
    }

    /// The vertex of `vertices` drawn first, if any.
    pub fn backmost(&self, vertices: &[usize]) -> Option<usize> {
        vertices.iter().copied().min_by_key(|&v| self.ranks[v])
    }

    /// The vertex of `vertices` drawn last, if any.
    pub fn frontmost(&self, vertices: &[usize]) -> Option<usize> {
        vertices.iter().copied().max_by_key(|&v| self.ranks[v])
    }
}

fn compare_depth(a: &TransformedVertex, b: &TransformedVertex) -> Ordering {
    // `+ 0.0` folds -0.0 into 0.0 so the two tie instead of splitting on sign.
    let za = a.position.z + 0.0;
    let zb = b.position.z + 0.0;
    za.total_cmp(&zb)
        .then_with(|| a.original_index.cmp(&b.original_index))
}

/// Everything derived from the scene for one set of angles.
///
/// Built fresh per render call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct Frame<'s> {
    scene: &'s Scene,
    rotation: Mat3,
    vertices: Vec<TransformedVertex>,
    depth: DepthOrder,
    edge_anchors: Vec<usize>,
    quad_anchors: Vec<usize>,
    quad_frontmost: Vec<usize>,
    edges_by_anchor: Vec<Vec<usize>>,
    quads_by_anchor: Vec<Vec<usize>>,
}

impl<'s> Frame<'s> {
    pub fn new(scene: &'s Scene, angles: &RotationAngles) -> Self {
        let rotation = Rotation::compose(angles);
        let vertices: Vec<TransformedVertex> = scene
            .vertices()
            .iter()
            .enumerate()
            .map(|(original_index, &v)| TransformedVertex {
                original_index,
                position: rotation * v,
            })
            .collect();
        let depth = DepthOrder::new(&vertices);

        let mut edges_by_anchor = vec![Vec::new(); vertices.len()];
        let edge_anchors: Vec<usize> = scene
            .edges()
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let anchor = depth.backmost(&edge.indices()).unwrap_or(edge.first);
                edges_by_anchor[anchor].push(index);
                anchor
            })
            .collect();

        let mut quads_by_anchor = vec![Vec::new(); vertices.len()];
        let mut quad_frontmost = Vec::with_capacity(scene.quads().len());
        let quad_anchors: Vec<usize> = scene
            .quads()
            .iter()
            .enumerate()
            .map(|(index, quad)| {
                let corners = quad.indices();
                let anchor = depth.backmost(&corners).unwrap_or(quad.a);
                quad_frontmost.push(depth.frontmost(&corners).unwrap_or(quad.a));
                quads_by_anchor[anchor].push(index);
                anchor
            })
            .collect();

        Self {
            scene,
            rotation,
            vertices,
            depth,
            edge_anchors,
            quad_anchors,
            quad_frontmost,
            edges_by_anchor,
            quads_by_anchor,
        }
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    /// Transformed vertices, indexed like the scene's vertex table.
    pub fn vertices(&self) -> &[TransformedVertex] {
        &self.vertices
    }

    pub fn depth_order(&self) -> &DepthOrder {
        &self.depth
    }

    pub fn edge_anchor(&self, edge: usize) -> usize {
        self.edge_anchors[edge]
    }

    pub fn quad_anchor(&self, quad: usize) -> usize {
        self.quad_anchors[quad]
    }

    pub fn quad_frontmost(&self, quad: usize) -> usize {
        self.quad_frontmost[quad]
    }

    /// Edge indices whose anchor is `vertex`, in table order.
    pub fn edges_anchored_at(&self, vertex: usize) -> &[usize] {
        &self.edges_by_anchor[vertex]
    }

    /// Quad indices whose anchor is `vertex`, in table order.
    pub fn quads_anchored_at(&self, vertex: usize) -> &[usize] {
        &self.quads_by_anchor[vertex]
    }
}

/// Renders a scene to any [`Surface`], back to front.
#[derive(Debug, Clone)]
pub struct DepthOrderedRenderer<'s> {
    scene: &'s Scene,
    config: RenderConfig,
}

impl<'s> DepthOrderedRenderer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self::with_config(scene, RenderConfig::default())
    }

    pub fn with_config(scene: &'s Scene, config: RenderConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn frame(&self, angles: &RotationAngles) -> Frame<'s> {
        Frame::new(self.scene, angles)
    }

    /// Shade for a vertex at depth `z`: black through green, opaque.
    ///
    /// Depths outside the configured range give a green channel outside
    /// `[0, 1]`; surfaces clamp it.
    pub fn depth_color(&self, z: f64) -> Color {
        let (near, far) = self.config.depth_range;
        Color::rgb(0.0, map_range(z, near, far, 0.0, 1.0) as f32, 0.0)
    }

    /// Draw one frame of the scene rotated by `angles`.
    ///
    /// The same angles and surface size always produce the same commands.
    pub fn render<S: Surface + ?Sized>(&self, angles: &RotationAngles, surface: &mut S) {
        let (width, height) = (surface.width(), surface.height());
        let viewport = Viewport::new(width, height, self.config.scale);
        let frame = self.frame(angles);

        surface.fill_rect(
            Rect::new(0.0, 0.0, width as f64, height as f64),
            self.config.background,
        );

        let projected: Vec<Point2<f64>> = frame
            .vertices()
            .iter()
            .map(|v| viewport.project(v.position))
            .collect();
        let colors: Vec<Color> = frame
            .vertices()
            .iter()
            .map(|v| self.depth_color(v.position.z))
            .collect();

        let stroke_width = viewport.length(self.config.stroke_width);
        let radius = viewport.length(self.config.point_radius);
        let (mut quads, mut edges, mut points) = (0usize, 0usize, 0usize);

        for &vertex in frame.depth_order().back_to_front() {
            if self.config.draw_faces {
                for &q in frame.quads_anchored_at(vertex) {
                    let front = frame.quad_frontmost(q);
                    let outline = self.scene.quads()[q].indices().map(|i| projected[i]);
                    let paint = LinearGradient::new(
                        projected[vertex],
                        colors[vertex].with_alpha(self.config.face_far_alpha),
                        projected[front],
                        colors[front].with_alpha(self.config.face_front_alpha),
                    );
                    surface.fill_polygon(&outline, &paint);
                    quads += 1;
                }
            }

            if self.config.draw_edges {
                for &e in frame.edges_anchored_at(vertex) {
                    let other = self.scene.edges()[e].other(vertex);
                    let paint = LinearGradient::new(
                        projected[vertex],
                        colors[vertex],
                        projected[other],
                        colors[other],
                    );
                    surface.stroke_line(projected[vertex], projected[other], stroke_width, &paint);
                    edges += 1;
                }
            }

            if self.config.draw_points {
                surface.fill_ellipse(projected[vertex], radius, radius, colors[vertex]);
                points += 1;
            }
        }

        trace!(
            "rendered {:?} on {}x{}: {} quads, {} edges, {} points",
            angles,
            width,
            height,
            quads,
            edges,
            points
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandList, DrawCmd};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn angle_grid() -> Vec<RotationAngles> {
        let steps = [0.0, 0.35, FRAC_PI_4, FRAC_PI_2, 2.2, 3.5, 5.1];
        let mut grid = Vec::new();
        for &p in &steps {
            for &y in &steps {
                for &r in &steps {
                    grid.push(RotationAngles::new(p, y, r));
                }
            }
        }
        grid
    }

    fn vertex(index: usize, z: f64) -> TransformedVertex {
        TransformedVertex {
            original_index: index,
            position: Vec3::new(0.0, 0.0, z),
        }
    }

    #[test]
    fn test_depth_order_sorts_by_z_then_index() {
        let vertices = [vertex(0, 0.5), vertex(1, -2.0), vertex(2, 0.5), vertex(3, -0.0), vertex(4, 0.0)];
        let depth = DepthOrder::new(&vertices);

        assert_eq!(depth.back_to_front(), &[1, 3, 4, 0, 2]);
        assert_eq!(depth.rank(1), 0);
        assert_eq!(depth.rank(2), 4);
        assert_eq!(depth.backmost(&[0, 2, 4]), Some(4));
        assert_eq!(depth.frontmost(&[1, 3, 0]), Some(0));
        assert_eq!(depth.backmost(&[]), None);
    }

    #[test]
    fn test_negative_zero_ties_break_by_index() {
        let depth = DepthOrder::new(&[vertex(0, 0.0), vertex(1, -0.0)]);
        assert_eq!(depth.back_to_front(), &[0, 1]);
    }

    #[test]
    fn test_rank_agrees_with_depth_for_all_pairs() {
        let scene = Scene::cube();
        for angles in angle_grid() {
            let frame = Frame::new(&scene, &angles);
            let depth = frame.depth_order();
            for u in frame.vertices() {
                for v in frame.vertices() {
                    let (zu, zv) = (u.position.z, v.position.z);
                    let expected = zu < zv || (zu == zv && u.original_index < v.original_index);
                    let actual = depth.rank(u.original_index) < depth.rank(v.original_index);
                    assert_eq!(actual, expected, "{:?}", angles);
                }
            }
        }
    }

    #[test]
    fn test_anchors_bound_their_corners() {
        let scene = Scene::cube();
        for angles in angle_grid() {
            let frame = Frame::new(&scene, &angles);
            let depth = frame.depth_order();

            for (e, edge) in scene.edges().iter().enumerate() {
                let anchor = frame.edge_anchor(e);
                assert!(edge.indices().contains(&anchor));
                assert!(depth.rank(anchor) <= depth.rank(edge.other(anchor)));
                assert!(frame.edges_anchored_at(anchor).contains(&e));
            }

            for (q, quad) in scene.quads().iter().enumerate() {
                let anchor = frame.quad_anchor(q);
                let front = frame.quad_frontmost(q);
                for corner in quad.indices() {
                    assert!(depth.rank(anchor) <= depth.rank(corner));
                    assert!(depth.rank(front) >= depth.rank(corner));
                }
                assert!(frame.quads_anchored_at(anchor).contains(&q));
            }
        }
    }

    #[test]
    fn test_buckets_partition_primitives_in_table_order() {
        let scene = Scene::cube();
        let frame = Frame::new(&scene, &RotationAngles::new(0.4, 1.3, 2.9));

        let mut edges = Vec::new();
        let mut quads = Vec::new();
        for v in 0..scene.vertices().len() {
            let bucket = frame.edges_anchored_at(v);
            assert!(bucket.windows(2).all(|w| w[0] < w[1]));
            edges.extend_from_slice(bucket);

            let bucket = frame.quads_anchored_at(v);
            assert!(bucket.windows(2).all(|w| w[0] < w[1]));
            quads.extend_from_slice(bucket);
        }
        edges.sort_unstable();
        quads.sort_unstable();
        assert_eq!(edges, (0..12).collect::<Vec<_>>());
        assert_eq!(quads, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_depth_color_maps_range_onto_green() {
        let scene = Scene::cube();
        let renderer = DepthOrderedRenderer::new(&scene);
        assert_eq!(renderer.depth_color(0.0), Color::rgb(0.0, 0.5, 0.0));
        assert_eq!(renderer.depth_color(-3.0), Color::rgb(0.0, 0.0, 0.0));
        assert_eq!(renderer.depth_color(3.0), Color::rgb(0.0, 1.0, 0.0));
        assert!(renderer.depth_color(6.0).g > 1.0);
    }

    #[test]
    fn test_layer_toggles() {
        let scene = Scene::cube();
        let angles = RotationAngles::new(0.5, 0.25, 1.0);

        let mut renderer = DepthOrderedRenderer::with_config(&scene, RenderConfig::points_only());
        let mut list = CommandList::new(320, 240);
        renderer.render(&angles, &mut list);
        assert_eq!(list.commands().len(), 1 + 8);
        assert!(list.commands()[1..]
            .iter()
            .all(|c| matches!(c, DrawCmd::FillEllipse { .. })));

        renderer.config_mut().draw_points = false;
        renderer.config_mut().draw_edges = true;
        let mut list = CommandList::new(320, 240);
        renderer.render(&angles, &mut list);
        assert_eq!(list.commands().len(), 1 + 12);
        assert!(list.commands()[1..]
            .iter()
            .all(|c| matches!(c, DrawCmd::StrokeLine { .. })));
    }

    #[test]
    fn test_face_gradient_runs_from_anchor_to_front_corner() {
        let scene = Scene::cube();
        let angles = RotationAngles::new(0.3, 0.8, 0.1);
        let renderer = DepthOrderedRenderer::new(&scene);
        let frame = renderer.frame(&angles);

        let mut list = CommandList::new(400, 400);
        renderer.render(&angles, &mut list);
        let viewport = Viewport::new(400, 400, 50.0);

        let polygons: Vec<&LinearGradient> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillPolygon { paint, .. } => Some(paint),
                _ => None,
            })
            .collect();
        assert_eq!(polygons.len(), 6);

        let expected_quads = frame
            .depth_order()
            .back_to_front()
            .iter()
            .flat_map(|&v| frame.quads_anchored_at(v).to_vec());
        for (paint, q) in polygons.into_iter().zip(expected_quads) {
            let anchor = frame.vertices()[frame.quad_anchor(q)].position;
            let front = frame.vertices()[frame.quad_frontmost(q)].position;
            assert_eq!(paint.start, viewport.project(anchor));
            assert_eq!(paint.end, viewport.project(front));
            assert_eq!(paint.start_color.a, 1.0);
            assert_eq!(paint.end_color.a, 0.2);
        }
    }
}
