//! Mesh collections and everything needed to turn them into render payloads:
//! bounding boxes, plane clipping, triangulation and attribute lookup.

use nalgebra::Vector3;

pub mod attributes;
pub mod bounding_box;
pub mod clip;
pub mod error;
pub mod mesh;
pub mod payload;
pub mod plane;
pub mod scene;
pub mod shapes;
pub mod triangulate;

pub use error::SceneError;

pub type Pos = Vector3<f32>;
