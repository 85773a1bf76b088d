//! Test utilities: grid fixtures and camera helpers.

use std::sync::Arc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LodConfig;
use crate::error::CollectingSink;
use crate::hierarchy::Hierarchy;
use crate::types::Camera;

// =============================================================================
// Grid Fixtures
// =============================================================================

/// Row-major grid with x = column, y = row and z from `height(x, y)`.
pub fn grid_from_fn(edge: usize, height: impl Fn(usize, usize) -> f32) -> Vec<Vec3> {
  let mut grid = Vec::with_capacity(edge * edge);
  for y in 0..edge {
    for x in 0..edge {
      grid.push(Vec3::new(x as f32, y as f32, height(x, y)));
    }
  }
  grid
}

/// Grid of `2^levels + 1` samples per edge, all at z = 0.
pub fn flat_grid(levels: usize) -> (Vec<Vec3>, usize) {
  let edge = (1 << levels) + 1;
  (grid_from_fn(edge, |_, _| 0.0), edge)
}

/// Grid rising along x with the given slope.
pub fn ramp_grid(levels: usize, slope: f32) -> (Vec<Vec3>, usize) {
  let edge = (1 << levels) + 1;
  (grid_from_fn(edge, |x, _| x as f32 * slope), edge)
}

/// Grid with uniformly random heights in `0..amplitude`.
pub fn random_grid(levels: usize, amplitude: f32, seed: u64) -> (Vec<Vec3>, usize) {
  let edge = (1 << levels) + 1;
  let mut rng = StdRng::seed_from_u64(seed);
  let heights: Vec<f32> = (0..edge * edge)
    .map(|_| rng.random_range(0.0..amplitude))
    .collect();
  (grid_from_fn(edge, |x, y| heights[y * edge + x]), edge)
}

/// Build a hierarchy with the default config and a collecting sink.
pub fn build_hierarchy(grid: &[Vec3], edge: usize) -> Hierarchy {
  let sink = CollectingSink::new();
  match Hierarchy::build(grid, edge, edge, &LodConfig::default(), &sink) {
    Ok(hierarchy) => hierarchy,
    Err(error) => panic!("fixture grid rejected: {error}"),
  }
}

/// Shared grid handle as taken by `QuadCollapseMesh::build`.
pub fn shared(grid: Vec<Vec3>) -> Arc<[Vec3]> {
  grid.into()
}

// =============================================================================
// Cameras
// =============================================================================

/// Camera at `position` looking at `target`, z up.
pub fn camera_looking_at(position: Vec3, target: Vec3) -> Camera {
  Camera {
    position,
    target,
    ..Camera::default()
  }
}
