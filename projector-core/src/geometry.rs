/// Scene topology: vertices plus edges and quads that index into them
use thiserror::Error;

use crate::vector::Vec3;

/// A line between two vertices, referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub first: usize,
    pub second: usize,
}

impl Edge {
    pub const fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    pub fn indices(&self) -> [usize; 2] {
        [self.first, self.second]
    }

    /// The endpoint that is not `vertex`.
    pub fn other(&self, vertex: usize) -> usize {
        if vertex == self.first {
            self.second
        } else {
            self.first
        }
    }
}

/// A four-sided face whose boundary runs a → b → c → d → a.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl Quad {
    pub const fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self { a, b, c, d }
    }

    pub fn indices(&self) -> [usize; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

/// Topology that does not fit its vertex table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("edge {edge} references vertex {vertex}, but the scene has {vertex_count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },
    #[error("quad {quad} references vertex {vertex}, but the scene has {vertex_count} vertices")]
    QuadOutOfRange {
        quad: usize,
        vertex: usize,
        vertex_count: usize,
    },
    #[error("edge {edge} starts and ends at vertex {vertex}")]
    DegenerateEdge { edge: usize, vertex: usize },
    #[error("quad {quad} uses vertex {vertex} more than once")]
    DegenerateQuad { quad: usize, vertex: usize },
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

const CUBE_EDGES: [Edge; 12] = [
    Edge::new(0, 1),
    Edge::new(0, 2),
    Edge::new(0, 3),
    Edge::new(1, 4),
    Edge::new(1, 5),
    Edge::new(2, 4),
    Edge::new(2, 6),
    Edge::new(3, 5),
    Edge::new(3, 6),
    Edge::new(4, 7),
    Edge::new(5, 7),
    Edge::new(6, 7),
];

const CUBE_QUADS: [Quad; 6] = [
    Quad::new(0, 1, 4, 2), // z = -1
    Quad::new(3, 5, 7, 6), // z = +1
    Quad::new(0, 1, 5, 3), // y = -1
    Quad::new(2, 4, 7, 6), // y = +1
    Quad::new(0, 2, 6, 3), // x = -1
    Quad::new(1, 4, 7, 5), // x = +1
];

/// An immutable set of vertices with the edges and quads drawn between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    quads: Vec<Quad>,
}

impl Scene {
    /// Build a scene, checking that every edge and quad refers to existing,
    /// distinct vertices.
    pub fn new(vertices: Vec<Vec3>, edges: Vec<Edge>, quads: Vec<Quad>) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();

        for (edge_index, edge) in edges.iter().enumerate() {
            if let Some(&vertex) = edge.indices().iter().find(|&&v| v >= vertex_count) {
                return Err(SceneError::EdgeOutOfRange {
                    edge: edge_index,
                    vertex,
                    vertex_count,
                });
            }
            if edge.first == edge.second {
                return Err(SceneError::DegenerateEdge {
                    edge: edge_index,
                    vertex: edge.first,
                });
            }
        }

        for (quad_index, quad) in quads.iter().enumerate() {
            let corners = quad.indices();
            if let Some(&vertex) = corners.iter().find(|&&v| v >= vertex_count) {
                return Err(SceneError::QuadOutOfRange {
                    quad: quad_index,
                    vertex,
                    vertex_count,
                });
            }
            for (i, &vertex) in corners.iter().enumerate() {
                if corners[i + 1..].contains(&vertex) {
                    return Err(SceneError::DegenerateQuad {
                        quad: quad_index,
                        vertex,
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            edges,
            quads,
        })
    }

    /// The cube with corners at ±1 on every axis.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            edges: CUBE_EDGES.to_vec(),
            quads: CUBE_QUADS.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::cube()
    }
}
