//! Active-set selection.
//!
//! Each frame the vertex forest is walked from the four roots. A vertex whose
//! original position is within its level's activation distance expands into
//! its collapse children; every other visited vertex is Boundary and slides
//! toward its parent as the camera recedes:
//!
//! ```text
//!   camera distance:   0 ........ active[level] ........ d
//!   position:          original   original               parent
//!                                 └── lerp(parent, original, t) ──┘
//! ```
//!
//! `d` is where the ray from the vertex toward the camera leaves the parent's
//! activation sphere, so the vertex reaches its parent exactly when the
//! parent itself collapses.
//!
//! Boundary vertices mark their adjacent quads; marking a quad makes all of
//! its ancestors Active, which drives the emitter.

use glam::Vec3;

use crate::error::{fatal, ErrorSink, InvariantViolation};
use crate::frustum::HorizontalFrustum;
use crate::hierarchy::{Hierarchy, NodeState, QuadRef, VertexId};
use crate::types::FrameStats;

/// Input for one selection pass.
pub struct SelectionInput<'a> {
  /// Original grid positions.
  pub grid: &'a [Vec3],
  /// Camera position.
  pub eye: Vec3,
  pub frustum: &'a HorizontalFrustum,
  /// Current frame stamp, never 0.
  pub frame: u32,
  pub sink: &'a dyn ErrorSink,
}

/// Stamp the active vertex and quad sets for `input.frame`.
pub(crate) fn select(hierarchy: &mut Hierarchy, input: &SelectionInput<'_>, stats: &mut FrameStats) {
  for root in hierarchy.root_vertices() {
    let position = input.grid[hierarchy.vertex(root).grid_index()];
    hierarchy.vertex_mut(root).interpolated = position;
    update_vertex(hierarchy, input, stats, root);
  }
}

fn update_vertex(
  hierarchy: &mut Hierarchy,
  input: &SelectionInput<'_>,
  stats: &mut FrameStats,
  id: VertexId,
) {
  let frame = input.frame;
  let node = hierarchy.vertex_mut(id);
  if node.is_stamped(frame) {
    return;
  }
  node.frame = frame;
  node.state = NodeState::Boundary;
  stats.visited_vertices += 1;

  let level = node.level as usize;
  let first_child = node.first_child;
  let parent = node.parent;
  let original = input.grid[node.grid_index()];
  let dist = input.eye.distance(original);
  let active_distance = hierarchy.activation_distance(level);

  if dist < active_distance {
    if let Some(first) = first_child {
      let node = hierarchy.vertex_mut(id);
      node.state = NodeState::Active;
      node.interpolated = original;
      stats.active_vertices += 1;

      let mut next = Some(first);
      while let Some(child) = next {
        let actual = hierarchy.vertex(child).parent;
        if actual != Some(id) {
          fatal(
            input.sink,
            InvariantViolation::ParentMismatch {
              child,
              listed: id,
              actual,
            },
          );
        }
        update_vertex(hierarchy, input, stats, child);
        next = hierarchy.vertex(child).next_sibling;
      }
      return;
    }
    hierarchy.vertex_mut(id).interpolated = original;
  } else if let Some(parent) = parent {
    let parent_position = input.grid[hierarchy.vertex(parent).grid_index()];
    let outer = hierarchy.activation_distance(level - 1);
    let t = collapse_factor(input.eye, original, parent_position, dist, active_distance, outer);
    hierarchy.vertex_mut(id).interpolated = parent_position.lerp(original, t);
  } else {
    hierarchy.vertex_mut(id).interpolated = original;
  }

  let adjacent = hierarchy.vertex(id).adjacent_quads.clone();
  for quad in adjacent {
    mark_boundary(hierarchy, input, stats, quad);
  }
}

/// Blend factor between a vertex (1) and its parent (0).
///
/// `dist` is the camera distance of the vertex, `inner` its own activation
/// distance and `outer` the parent's.
pub fn collapse_factor(
  eye: Vec3,
  original: Vec3,
  parent: Vec3,
  dist: f32,
  inner: f32,
  outer: f32,
) -> f32 {
  // Ray from the vertex toward the camera against the sphere of radius
  // `outer` around the parent.
  let dir = (eye - original).normalize_or_zero();
  let offset = original - parent;
  let along = dir.dot(offset);
  let exit = -along + (along * along - offset.length_squared() + outer * outer).sqrt();

  let t = (exit - dist) / (exit - inner);
  if t.is_nan() {
    0.0
  } else {
    t.clamp(0.0, 1.0)
  }
}

/// Stamp `quad` Boundary and its ancestors Active, unless it is already
/// Active or culled.
fn mark_boundary(
  hierarchy: &mut Hierarchy,
  input: &SelectionInput<'_>,
  stats: &mut FrameStats,
  quad: QuadRef,
) {
  let frame = input.frame;
  if hierarchy.header(quad).is_active(frame) {
    return;
  }

  if let QuadRef::Node(id) = quad {
    let node = hierarchy.node(id);
    let center = input.grid[hierarchy.vertex(node.center).grid_index()];
    let radius = hierarchy.cull_radius(node.header.level as usize);
    if input.frustum.culls_circle(center, radius) {
      stats.culled_quads += 1;
      return;
    }
  }

  let header = hierarchy.header_mut(quad);
  header.frame = frame;
  header.state = NodeState::Boundary;

  let mut next = header.parent;
  while let Some(parent) = next {
    let header = hierarchy.header_mut(QuadRef::Node(parent));
    if header.is_active(frame) {
      break;
    }
    header.frame = frame;
    header.state = NodeState::Active;
    next = header.parent;
  }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;
