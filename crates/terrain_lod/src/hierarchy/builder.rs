//! Hierarchy construction.
//!
//! Pool sizes are derived from the level count before anything is allocated:
//!
//! ```text
//! vertices = sum over levels of (2^level + 1)^2
//! nodes    = sum over levels 0..max_level of 4^level
//! leaves   = 4^max_level
//! ```
//!
//! Vertices are created coarse to fine, then the quad tree is built depth
//! first. Each internal quad resolves its collapse targets after all four
//! children are complete, so finer decisions are visible to coarser ones.

use glam::Vec3;

use super::{
  Hierarchy, LeafId, NodeId, Pool, QuadHeader, QuadLeaf, QuadNode, QuadRef, VertexId, VertexNode,
};
use crate::config::LodConfig;
use crate::constants::{quads_per_edge, vertices_per_edge, CORNER_OFFSETS};
use crate::error::{fatal, BuildError, ErrorSink};

impl Hierarchy {
  /// Build the hierarchy for a `width` x `height` row-major grid.
  ///
  /// Configuration errors are reported to `sink` and returned.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "hierarchy::build"))]
  pub fn build(
    grid: &[Vec3],
    width: usize,
    height: usize,
    config: &LodConfig,
    sink: &dyn ErrorSink,
  ) -> Result<Self, BuildError> {
    let level_count = match validate(grid, width, height, config) {
      Ok(level_count) => level_count,
      Err(error) => {
        sink.report(&error);
        return Err(error);
      }
    };
    let max_level = level_count - 1;

    let mut vertex_capacity = 0usize;
    let mut node_capacity = 0usize;
    let mut leaf_capacity = 0usize;
    let mut level_offsets = Vec::with_capacity(level_count);
    let mut activation_distance = Vec::with_capacity(level_count);
    let mut cull_radius = Vec::with_capacity(level_count);

    for level in 0..level_count {
      cull_radius.push(config.cull_radius(width, level));
      activation_distance.push(config.activation_distance(width, level));

      let quads = quads_per_edge(level);
      if level == max_level {
        leaf_capacity = quads * quads;
      } else {
        node_capacity += quads * quads;
      }

      level_offsets.push(vertex_capacity as u32);
      let verts = vertices_per_edge(level);
      vertex_capacity += verts * verts;
    }

    let mut hierarchy = Self {
      edge_length: width,
      max_level,
      vertices: Pool::with_capacity("vertex node", vertex_capacity),
      nodes: Pool::with_capacity("quad node", node_capacity),
      leaves: Pool::with_capacity("quad leaf", leaf_capacity),
      level_offsets,
      activation_distance,
      cull_radius,
      root_vertices: [VertexId(0); 4],
      root_quad: QuadRef::Leaf(LeafId(0)),
    };

    hierarchy.build_vertices(grid, sink);
    hierarchy.root_quad = hierarchy.build_quad(grid, sink, 0, 0, 0, (width - 1) as u32);

    tracing::debug!(
      edge = width,
      levels = level_count,
      vertices = hierarchy.vertices.len(),
      nodes = hierarchy.nodes.len(),
      leaves = hierarchy.leaves.len(),
      "built quad collapse hierarchy"
    );

    Ok(hierarchy)
  }

  fn build_vertices(&mut self, grid: &[Vec3], sink: &dyn ErrorSink) {
    let edge = self.edge_length;

    for level in 0..=self.max_level {
      let step = (edge - 1) >> level;
      for y in (0..edge).step_by(step) {
        for x in (0..edge).step_by(step) {
          let grid_index = y * edge + x;
          let vertex = VertexNode::new(level as u8, grid_index as u32, grid[grid_index]);
          if let Err(violation) = self.vertices.alloc(vertex) {
            fatal(sink, violation);
          }
        }
      }
    }

    let last = (edge - 1) as u32;
    let roots = [(0, 0), (last, 0), (last, last), (0, last)]
      .map(|(x, y)| self.lookup_vertex(0, x, y, sink));
    self.root_vertices = roots;
  }

  /// Build the quad covering `step` x `step` cells from (x0, y0).
  fn build_quad(
    &mut self,
    grid: &[Vec3],
    sink: &dyn ErrorSink,
    level: usize,
    x0: u32,
    y0: u32,
    step: u32,
  ) -> QuadRef {
    let corners =
      CORNER_OFFSETS.map(|(dx, dy)| self.lookup_vertex(level, x0 + dx * step, y0 + dy * step, sink));

    if step == 1 {
      let leaf = QuadLeaf {
        header: QuadHeader::new(level as u8, corners),
      };
      let id = self
        .leaves
        .alloc(leaf)
        .unwrap_or_else(|violation| fatal(sink, violation));
      let quad = QuadRef::Leaf(LeafId(id));
      self.add_adjacent_quad(&corners, quad);
      return quad;
    }

    let half = step / 2;
    let center = self.lookup_vertex(level + 1, x0 + half, y0 + half, sink);
    let next_level = level + 1;
    let children = [(x0, y0), (x0 + half, y0), (x0 + half, y0 + half), (x0, y0 + half)]
      .map(|(x, y)| self.build_quad(grid, sink, next_level, x, y, half));

    let node = QuadNode {
      header: QuadHeader::new(level as u8, corners),
      center,
      children,
    };
    let id = NodeId(
      self
        .nodes
        .alloc(node)
        .unwrap_or_else(|violation| fatal(sink, violation)),
    );
    self.add_adjacent_quad(&corners, QuadRef::Node(id));

    for child in children {
      self.header_mut(child).parent = Some(id);
    }

    self.collapse_quad(id, grid, sink);

    QuadRef::Node(id)
  }

  fn add_adjacent_quad(&mut self, corners: &[VertexId; 4], quad: QuadRef) {
    for &corner in corners {
      let adjacent = &mut self.vertex_mut(corner).adjacent_quads;
      if adjacent.contains(&quad) {
        continue;
      }
      debug_assert!(adjacent.len() < 4, "a vertex touches at most 4 quads");
      adjacent.push(quad);
    }
  }
}

/// Check grid dimensions and return the hierarchy level count.
fn validate(
  grid: &[Vec3],
  width: usize,
  height: usize,
  config: &LodConfig,
) -> Result<usize, BuildError> {
  let level_count = config.level_count(width, height)?;
  let expected = width * height;
  if grid.len() != expected {
    return Err(BuildError::GridLengthMismatch {
      expected,
      actual: grid.len(),
    });
  }
  Ok(level_count)
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
