//! Collapse-target resolution for one internal quad.
//!
//! Splitting a quad introduces five vertices one level finer: four edge
//! midpoints and the center. Each must collapse into one of the quad's four
//! corners, and the quad's own diagonal must agree with the collapse so that
//! merging the children never flips the visible seam.
//!
//! ```text
//!   NW ──── top ──── NE
//!   │        │        │
//!  left ── center ── right
//!   │        │        │
//!   SW ─── bottom ─── SE
//! ```
//!
//! Midpoints go to the nearer of their two corners unless a neighbouring quad
//! already claimed them. The center follows a fixed cascade:
//!
//! 1. SW and NE both own their midpoint pairs: nearer of SW/NE
//! 2. SE and NW both own their midpoint pairs: nearer of SE/NW
//! 3. the first corner (SW, SE, NE, NW) owning its midpoint pair
//! 4. the first child whose diagonal already reaches the center from its
//!    outer corner
//! 5. the nearest corner

use glam::Vec3;

use super::{Diagonal, Hierarchy, NodeId, VertexId};
use crate::constants::{NE, NW, SE, SW};
use crate::error::{fatal, ErrorSink, InvariantViolation};

/// Midpoint slots, see `Midpoints`.
const BOTTOM: usize = 0;
const RIGHT: usize = 1;
const TOP: usize = 2;
const LEFT: usize = 3;

/// The two midpoints adjacent to each corner slot.
const CORNER_MIDPOINTS: [[usize; 2]; 4] = [
  [LEFT, BOTTOM], // SW
  [BOTTOM, RIGHT], // SE
  [RIGHT, TOP],   // NE
  [TOP, LEFT],    // NW
];

impl Hierarchy {
  /// Assign collapse parents for the five new vertices of `id` and choose
  /// its diagonal. Children must already be resolved.
  pub(crate) fn collapse_quad(&mut self, id: NodeId, grid: &[Vec3], sink: &dyn ErrorSink) {
    let node = self.node(id);
    let parents = node.header.corners;
    let child_quads = node.children;
    let [sw_child, se_child, ne_child, nw_child] = child_quads.map(|child| self.header(child).corners);

    // Midpoints in BOTTOM, RIGHT, TOP, LEFT order.
    let midpoints = [sw_child[SE], se_child[NE], ne_child[NW], nw_child[SW]];
    let center = sw_child[NE];
    // Child corners coinciding with the parent corners.
    let outer = [sw_child[SW], se_child[SE], ne_child[NE], nw_child[NW]];

    for slot in 0..4 {
      self.link_child(parents[slot], outer[slot], sink);
    }

    if self.vertex(center).parent.is_some() {
      fatal(sink, InvariantViolation::CenterAlreadyParented(center));
    }

    self.claim_midpoint(midpoints[BOTTOM], parents[SE], parents[SW], grid, sink);
    self.claim_midpoint(midpoints[RIGHT], parents[NE], parents[SE], grid, sink);
    self.claim_midpoint(midpoints[TOP], parents[NE], parents[NW], grid, sink);
    self.claim_midpoint(midpoints[LEFT], parents[NW], parents[SW], grid, sink);

    let owns_pair = |slot: usize| {
      CORNER_MIDPOINTS[slot]
        .iter()
        .all(|&m| self.owns(parents[slot], midpoints[m]))
    };
    let pairs = [owns_pair(SW), owns_pair(SE), owns_pair(NE), owns_pair(NW)];

    let center_slot = if pairs[SW] && pairs[NE] {
      self.nearer_slot(center, &parents, SW, NE, grid)
    } else if pairs[SE] && pairs[NW] {
      self.nearer_slot(center, &parents, SE, NW, grid)
    } else if let Some(slot) = (0..4).find(|&slot| pairs[slot]) {
      slot
    } else if let Some(slot) = (0..4).find(|&slot| {
      self
        .header(child_quads[slot])
        .is_diagonal_connected(center, outer[slot])
    }) {
      slot
    } else {
      self.nearest_slot(center, &parents, grid)
    };

    self.link_child(parents[center_slot], center, sink);

    // The diagonal through the center's parent is kept only when the
    // opposite corner is also tied to the center region.
    let opposite = (center_slot + 2) % 4;
    let opposite_tied = CORNER_MIDPOINTS[opposite]
      .iter()
      .any(|&m| self.owns(parents[opposite], midpoints[m]))
      || self
        .header(child_quads[opposite])
        .is_diagonal_connected(center, outer[opposite]);

    let through = diagonal_through(center_slot);
    let diagonal = if opposite_tied {
      through
    } else {
      other_diagonal(through)
    };
    self.nodes.get_mut(id.0).header.diagonal = diagonal;
  }

  /// Collapse `midpoint` into the nearer of `first` and `second`, unless a
  /// neighbouring quad already claimed it. Ties go to `second`.
  fn claim_midpoint(
    &mut self,
    midpoint: VertexId,
    first: VertexId,
    second: VertexId,
    grid: &[Vec3],
    sink: &dyn ErrorSink,
  ) {
    if self.vertex(midpoint).parent.is_some() {
      return;
    }
    let target = if self.distance(midpoint, first, grid) < self.distance(midpoint, second, grid) {
      first
    } else {
      second
    };
    self.link_child(target, midpoint, sink);
  }

  /// Nearer of two corner slots; ties go to `second`.
  fn nearer_slot(
    &self,
    vertex: VertexId,
    parents: &[VertexId; 4],
    first: usize,
    second: usize,
    grid: &[Vec3],
  ) -> usize {
    if self.distance(vertex, parents[first], grid) < self.distance(vertex, parents[second], grid) {
      first
    } else {
      second
    }
  }

  /// Nearest corner slot; the first minimum wins.
  fn nearest_slot(&self, vertex: VertexId, parents: &[VertexId; 4], grid: &[Vec3]) -> usize {
    let mut best = 0;
    let mut best_distance = self.distance(vertex, parents[0], grid);
    for (slot, &parent) in parents.iter().enumerate().skip(1) {
      let distance = self.distance(vertex, parent, grid);
      if distance < best_distance {
        best = slot;
        best_distance = distance;
      }
    }
    best
  }

  #[inline]
  fn distance(&self, a: VertexId, b: VertexId, grid: &[Vec3]) -> f32 {
    grid[self.vertex(a).grid_index()].distance(grid[self.vertex(b).grid_index()])
  }

  /// True when `child` collapses into `parent`.
  #[inline]
  pub(crate) fn owns(&self, parent: VertexId, child: VertexId) -> bool {
    self.vertex(child).parent == Some(parent)
  }

  /// Make `child` collapse into `parent`. Linking the same pair twice is a
  /// no-op; any other relinking is fatal.
  pub(crate) fn link_child(&mut self, parent: VertexId, child: VertexId, sink: &dyn ErrorSink) {
    let parent_level = self.vertex(parent).level;
    let child_node = self.vertex(child);

    match child_node.parent {
      Some(current) if current == parent => return,
      Some(current) => fatal(
        sink,
        InvariantViolation::Reparent {
          child,
          current,
          requested: parent,
        },
      ),
      None => {}
    }

    if child_node.level != parent_level + 1 {
      fatal(
        sink,
        InvariantViolation::ParentLevel {
          child,
          child_level: child_node.level,
          parent_level,
        },
      );
    }

    let first_child = self.vertex(parent).first_child;
    let child_node = self.vertex_mut(child);
    child_node.parent = Some(parent);
    child_node.next_sibling = first_child;
    self.vertex_mut(parent).first_child = Some(child);
  }
}

/// Diagonal passing through corner `slot`.
#[inline]
pub(crate) fn diagonal_through(slot: usize) -> Diagonal {
  match slot {
    SW | NE => Diagonal::SwNe,
    _ => Diagonal::NwSe,
  }
}

#[inline]
fn other_diagonal(diagonal: Diagonal) -> Diagonal {
  match diagonal {
    Diagonal::SwNe => Diagonal::NwSe,
    Diagonal::NwSe => Diagonal::SwNe,
  }
}

#[cfg(test)]
#[path = "collapse_test.rs"]
mod collapse_test;
