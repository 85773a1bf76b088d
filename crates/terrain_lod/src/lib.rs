//! terrain_lod - Quad collapse continuous level-of-detail terrain meshes
//!
//! Builds a static vertex/quad hierarchy over a square height grid once, then
//! produces a view-dependent triangle list every frame. Vertices morph toward
//! the vertex they collapse into as the camera recedes, so detail changes
//! without popping or cracks.
//!
//! # Features
//!
//! - **Collapse hierarchy**: every vertex below the four grid corners has one
//!   coarser collapse target, chosen so quad diagonals never flip
//! - **Geomorphing**: Boundary vertices interpolate toward their parent across
//!   the activation band
//! - **Lateral culling**: quads outside the left/right frustum planes are not
//!   refined
//! - **Height fields**: 8-bit grids from memory or (with `image`) from files
//!
//! # Example
//!
//! ```ignore
//! use terrain_lod::{Camera, HorizontalFrustum, QuadCollapseMesh};
//!
//! let mut mesh = QuadCollapseMesh::build(positions, 1025, 1025)?;
//!
//! let camera = Camera::default();
//! let frustum = HorizontalFrustum::from_camera(1280, 720, &camera);
//! let triangles = mesh.update(&camera, &frustum);
//!
//! println!("{} triangles", triangles.triangle_count());
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::LodConfig;
pub use constants::{ACTIVE_SCALE, MAX_EDGE_LENGTH, MAX_LEVEL_COUNT};
pub use error::{BuildError, CollectingSink, ErrorSink, InvariantViolation, TracingSink};
pub use types::{Camera, FrameStats, TriangleMesh};

// Static vertex and quad hierarchies
pub mod hierarchy;
pub use hierarchy::Hierarchy;

// Per-frame passes
pub mod frustum;
pub use frustum::HorizontalFrustum;
mod emit;
mod selection;

// Engine
pub mod mesh;
pub use mesh::QuadCollapseMesh;

// Height field input and the terrain facade
pub mod heightfield;
pub mod terrain;
pub use heightfield::{HeightField, HeightFieldError};
pub use terrain::{Terrain, TerrainError};

// Engine-agnostic metrics collection
pub mod metrics;

// Test utilities
#[cfg(test)]
pub mod test_utils;
