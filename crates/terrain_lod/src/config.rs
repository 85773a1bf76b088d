//! LodConfig - grid validation and per-level LOD thresholds.

use crate::constants::{ACTIVE_SCALE, MAX_EDGE_LENGTH, MAX_LEVEL_COUNT};
use crate::error::BuildError;

/// Configuration for hierarchy construction and per-level thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct LodConfig {
  /// Scales cull radii into activation distances.
  /// activation_distance = cull_radius * activation_scale
  pub activation_scale: f32,

  /// Maximum number of hierarchy levels accepted by `level_count`.
  /// Values above `MAX_LEVEL_COUNT` are clamped.
  pub max_level_count: usize,

  /// Maximum accepted grid edge length.
  pub max_edge_length: usize,
}

impl LodConfig {
  /// Validate grid dimensions and return the number of hierarchy levels.
  ///
  /// The grid must be square with an edge of 2^k + 1 samples.
  pub fn level_count(&self, width: usize, height: usize) -> Result<usize, BuildError> {
    if width != height {
      return Err(BuildError::NotSquare { width, height });
    }
    if width < 2 || !(width - 1).is_power_of_two() {
      return Err(BuildError::InvalidEdgeLength(width));
    }
    if width > self.max_edge_length {
      return Err(BuildError::TooLarge {
        edge: width,
        max: self.max_edge_length,
      });
    }

    let levels = (usize::BITS - (width - 1).leading_zeros()) as usize;
    let max = self.max_level_count.min(MAX_LEVEL_COUNT);
    if levels > max {
      return Err(BuildError::TooManyLevels { levels, max });
    }
    Ok(levels)
  }

  /// Bounding-circle radius of a quad at `level`: half its diagonal.
  ///
  /// An empty grid, or a level finer than single cells, has radius 0.
  #[inline]
  pub fn cull_radius(&self, edge_length: usize, level: usize) -> f32 {
    let quad_size = u32::try_from(level)
      .ok()
      .and_then(|shift| edge_length.saturating_sub(1).checked_shr(shift))
      .unwrap_or(0) as f32;
    let half = quad_size * 0.5;
    (half * half * 2.0).sqrt()
  }

  /// Camera distance below which vertices at `level` expand into children.
  #[inline]
  pub fn activation_distance(&self, edge_length: usize, level: usize) -> f32 {
    self.cull_radius(edge_length, level) * self.activation_scale
  }
}

impl Default for LodConfig {
  fn default() -> Self {
    Self {
      activation_scale: ACTIVE_SCALE,
      max_level_count: MAX_LEVEL_COUNT,
      max_edge_length: MAX_EDGE_LENGTH,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
