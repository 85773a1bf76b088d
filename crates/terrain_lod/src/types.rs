//! Per-frame inputs and outputs of the engine.

use glam::Vec3;

use crate::constants::MAX_LEVEL_COUNT;

/// Viewer state consumed by `update`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
  pub position: Vec3,
  pub target: Vec3,
  pub up: Vec3,
  /// Vertical field of view in degrees.
  pub fov_y_degrees: f32,
  pub z_near: f32,
  pub z_far: f32,
}

impl Camera {
  /// Unit vector from position toward target.
  #[inline]
  pub fn forward(&self) -> Vec3 {
    (self.target - self.position).normalize_or_zero()
  }
}

impl Default for Camera {
  fn default() -> Self {
    Self {
      position: Vec3::ZERO,
      target: Vec3::Y,
      up: Vec3::Z,
      fov_y_degrees: 70.0,
      z_near: 1.0,
      z_far: 4096.0,
    }
  }
}

/// Non-indexed triangle list produced by one update.
///
/// Borrows the engine's output buffer, so it cannot outlive the next update.
#[derive(Clone, Copy, Debug)]
pub struct TriangleMesh<'a> {
  vertices: &'a [Vec3],
}

impl<'a> TriangleMesh<'a> {
  pub(crate) fn new(vertices: &'a [Vec3]) -> Self {
    debug_assert_eq!(vertices.len() % 3, 0);
    Self { vertices }
  }

  /// Three positions per triangle, counter-clockwise seen from +z.
  pub fn vertices(&self) -> &'a [Vec3] {
    self.vertices
  }

  pub fn triangle_count(&self) -> usize {
    self.vertices.len() / 3
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + 'a {
    self
      .vertices
      .chunks_exact(3)
      .map(|tri| [tri[0], tri[1], tri[2]])
  }
}

/// Counters gathered while selecting and emitting one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
  /// Vertex nodes visited (stamped) this frame.
  pub visited_vertices: usize,
  pub active_vertices: usize,
  /// Quads emitted as triangle pairs, indexed by level.
  pub emitted_quads: [usize; MAX_LEVEL_COUNT],
  /// Quads rejected by the lateral frustum planes.
  pub culled_quads: usize,
  pub triangles: usize,
}

impl FrameStats {
  pub fn emitted_quad_total(&self) -> usize {
    self.emitted_quads.iter().sum()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
