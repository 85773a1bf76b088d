//! QuadCollapseMesh - the continuous-LOD terrain engine.
//!
//! Built once from a square height grid, then updated every frame with a
//! camera and lateral frustum planes. Each update rewrites a single
//! non-indexed triangle buffer that the caller borrows until the next update.

use std::sync::Arc;

use glam::Vec3;
use web_time::Instant;

use crate::config::LodConfig;
use crate::emit::emit;
use crate::error::{BuildError, ErrorSink, TracingSink};
use crate::frustum::HorizontalFrustum;
use crate::hierarchy::Hierarchy;
use crate::metrics::{self, FrameMetrics};
use crate::selection::{select, SelectionInput};
use crate::types::{Camera, FrameStats, TriangleMesh};

/// Continuous level-of-detail mesh over a square height grid.
pub struct QuadCollapseMesh {
  grid: Arc<[Vec3]>,
  hierarchy: Hierarchy,
  sink: Arc<dyn ErrorSink>,
  /// Stamp of the latest update; 0 means never updated.
  frame: u32,
  vertices: Vec<Vec3>,
  stats: FrameStats,
  metrics: FrameMetrics,
}

impl QuadCollapseMesh {
  /// Build with the default config, reporting through `tracing`.
  ///
  /// `grid` is row-major, `width` x `height` samples.
  pub fn build(grid: impl Into<Arc<[Vec3]>>, width: usize, height: usize) -> Result<Self, BuildError> {
    Self::build_with(grid, width, height, &LodConfig::default(), Arc::new(TracingSink))
  }

  pub fn build_with(
    grid: impl Into<Arc<[Vec3]>>,
    width: usize,
    height: usize,
    config: &LodConfig,
    sink: Arc<dyn ErrorSink>,
  ) -> Result<Self, BuildError> {
    let grid = grid.into();
    let hierarchy = Hierarchy::build(&grid, width, height, config, sink.as_ref())?;

    Ok(Self {
      grid,
      hierarchy,
      sink,
      frame: 0,
      vertices: Vec::new(),
      stats: FrameStats::default(),
      metrics: FrameMetrics::new(),
    })
  }

  /// Select the active set for `camera` and rebuild the triangle buffer.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "mesh::update"))]
  pub fn update(&mut self, camera: &Camera, frustum: &HorizontalFrustum) -> TriangleMesh<'_> {
    let started = Instant::now();

    self.frame = match self.frame.checked_add(1) {
      Some(frame) => frame,
      None => {
        self.hierarchy.reset_stamps();
        1
      }
    };

    let mut stats = FrameStats::default();
    let input = SelectionInput {
      grid: &self.grid,
      eye: camera.position,
      frustum,
      frame: self.frame,
      sink: self.sink.as_ref(),
    };
    select(&mut self.hierarchy, &input, &mut stats);

    self.vertices.clear();
    let root = self.hierarchy.root_quad();
    emit(&self.hierarchy, self.frame, root, &mut self.vertices, &mut stats);

    let elapsed_us = started.elapsed().as_micros() as u64;
    tracing::trace!(
      frame = self.frame,
      triangles = stats.triangles,
      active_vertices = stats.active_vertices,
      culled_quads = stats.culled_quads,
      elapsed_us,
      "updated quad collapse mesh"
    );
    if metrics::is_enabled() {
      self.metrics.record_frame(elapsed_us, &stats);
    }
    self.stats = stats;

    TriangleMesh::new(&self.vertices)
  }

  /// Triangles from the latest update (empty before the first).
  pub fn active_mesh(&self) -> TriangleMesh<'_> {
    TriangleMesh::new(&self.vertices)
  }

  /// Grid samples per edge.
  pub fn max_level_vertices_length(&self) -> usize {
    self.hierarchy.edge_length()
  }

  /// Terrain extent in grid cells.
  pub fn terrain_size(&self) -> usize {
    self.hierarchy.edge_length() - 1
  }

  pub fn hierarchy(&self) -> &Hierarchy {
    &self.hierarchy
  }

  pub fn grid(&self) -> &Arc<[Vec3]> {
    &self.grid
  }

  pub fn frame(&self) -> u32 {
    self.frame
  }

  pub fn last_frame_stats(&self) -> &FrameStats {
    &self.stats
  }

  pub fn metrics(&self) -> &FrameMetrics {
    &self.metrics
  }

  #[cfg(test)]
  pub(crate) fn set_frame(&mut self, frame: u32) {
    self.frame = frame;
  }
}

impl std::fmt::Debug for QuadCollapseMesh {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QuadCollapseMesh")
      .field("edge_length", &self.hierarchy.edge_length())
      .field("frame", &self.frame)
      .field("triangles", &self.stats.triangles)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
