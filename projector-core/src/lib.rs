//! Projector Core Library - rotation, depth ordering and draw protocol
//!
//! This library provides the stateless core of the cube projector: vector and
//! matrix math, rotation composition, the fixed cube scene, and a renderer
//! that emits depth-ordered draw commands to an abstract surface.

pub mod config;
pub mod geometry;
pub mod matrix;
pub mod paint;
pub mod projection;
pub mod renderer;
pub mod scalar;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::RenderConfig;
pub use geometry::{Edge, Quad, Scene, SceneError};
pub use matrix::Mat3;
pub use paint::{Color, LinearGradient};
pub use projection::Viewport;
pub use renderer::{DepthOrder, DepthOrderedRenderer, Frame, TransformedVertex};
pub use scalar::map_range;
pub use surface::{CommandList, DrawCmd, Rect, Surface};
pub use transform::{Rotation, RotationAngles};
pub use vector::Vec3;
