//! Terrain - height field plus the LOD mesh built over it.

use std::sync::Arc;

use glam::Vec3;
use thiserror::Error;

use crate::config::LodConfig;
use crate::error::{BuildError, ErrorSink, TracingSink};
use crate::frustum::HorizontalFrustum;
use crate::heightfield::{HeightField, HeightFieldError};
use crate::mesh::QuadCollapseMesh;
use crate::types::{Camera, TriangleMesh};

#[derive(Debug, Error)]
pub enum TerrainError {
  #[error(transparent)]
  HeightField(#[from] HeightFieldError),

  #[error(transparent)]
  Build(#[from] BuildError),
}

/// Owns the grid positions and the engine drawing them.
#[derive(Debug)]
pub struct Terrain {
  mesh: QuadCollapseMesh,
}

impl Terrain {
  /// Build from a height field, scaling each sample by `z_scale`.
  pub fn from_height_field(field: &HeightField, z_scale: f32) -> Result<Self, TerrainError> {
    Self::from_height_field_with(field, z_scale, &LodConfig::default(), Arc::new(TracingSink))
  }

  pub fn from_height_field_with(
    field: &HeightField,
    z_scale: f32,
    config: &LodConfig,
    sink: Arc<dyn ErrorSink>,
  ) -> Result<Self, TerrainError> {
    let positions = field.to_positions(z_scale);
    Self::from_positions(positions, field.width(), field.height(), config, sink)
  }

  /// Load an image height map and build over it.
  #[cfg(feature = "image")]
  pub fn load(path: impl AsRef<std::path::Path>, z_scale: f32) -> Result<Self, TerrainError> {
    let field = HeightField::load(path)?;
    Self::from_height_field(&field, z_scale)
  }

  pub fn from_positions(
    positions: impl Into<Arc<[Vec3]>>,
    width: usize,
    height: usize,
    config: &LodConfig,
    sink: Arc<dyn ErrorSink>,
  ) -> Result<Self, TerrainError> {
    let mesh = QuadCollapseMesh::build_with(positions, width, height, config, sink)?;
    Ok(Self { mesh })
  }

  /// Terrain extent in grid cells.
  pub fn size(&self) -> usize {
    self.mesh.terrain_size()
  }

  pub fn update(&mut self, camera: &Camera, frustum: &HorizontalFrustum) -> TriangleMesh<'_> {
    self.mesh.update(camera, frustum)
  }

  /// Triangles from the latest update.
  pub fn mesh(&self) -> TriangleMesh<'_> {
    self.mesh.active_mesh()
  }

  pub fn positions(&self) -> &[Vec3] {
    self.mesh.grid()
  }

  pub fn engine(&self) -> &QuadCollapseMesh {
    &self.mesh
  }
}

#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;
