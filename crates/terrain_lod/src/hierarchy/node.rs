//! Node types of the vertex and quad hierarchies.
//!
//! Nodes never own each other. Every relationship is an index into one of the
//! hierarchy pools, so the trees can be walked in both directions without
//! shared mutable pointers.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{NE, NW, SE, SW};

/// Index of a vertex node in the vertex pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VertexId(pub(crate) u32);

/// Index of an internal quad node in the node pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

/// Index of a finest-level quad in the leaf pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LeafId(pub(crate) u32);

impl VertexId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl NodeId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl LeafId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Reference to either kind of quad.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QuadRef {
  Node(NodeId),
  Leaf(LeafId),
}

/// Per-frame activity of a vertex or quad.
///
/// Only meaningful when the node's frame stamp equals the current frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum NodeState {
  /// Expanded: the node's children are used instead of the node.
  Active,
  /// Rendered directly at the edge of the active front.
  #[default]
  Boundary,
}

/// Which pair of opposite corners forms the shared edge of a quad's two
/// triangles.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Diagonal {
  /// Edge from north-west to south-east.
  #[default]
  NwSe,
  /// Edge from south-west to north-east.
  SwNe,
}

impl Diagonal {
  /// Corner slots joined by this diagonal.
  #[inline]
  pub fn corner_slots(self) -> (usize, usize) {
    match self {
      Diagonal::NwSe => (SE, NW),
      Diagonal::SwNe => (SW, NE),
    }
  }

  /// Corner slots of the two triangles, counter-clockwise.
  #[inline]
  pub fn triangles(self) -> [[usize; 3]; 2] {
    match self {
      Diagonal::SwNe => [[SW, SE, NE], [SW, NE, NW]],
      Diagonal::NwSe => [[SW, SE, NW], [SE, NE, NW]],
    }
  }
}

/// A grid sample at one hierarchy level.
#[derive(Clone, Debug)]
pub struct VertexNode {
  pub(crate) level: u8,
  /// Row-major index of the original position in the grid.
  pub(crate) grid_index: u32,
  pub(crate) interpolated: Vec3,
  pub(crate) frame: u32,
  pub(crate) state: NodeState,
  /// Coarser vertex this one collapses into.
  pub(crate) parent: Option<VertexId>,
  pub(crate) first_child: Option<VertexId>,
  pub(crate) next_sibling: Option<VertexId>,
  pub(crate) adjacent_quads: SmallVec<[QuadRef; 4]>,
}

impl VertexNode {
  pub(crate) fn new(level: u8, grid_index: u32, position: Vec3) -> Self {
    Self {
      level,
      grid_index,
      interpolated: position,
      frame: 0,
      state: NodeState::Boundary,
      parent: None,
      first_child: None,
      next_sibling: None,
      adjacent_quads: SmallVec::new(),
    }
  }

  pub fn level(&self) -> u8 {
    self.level
  }

  pub fn grid_index(&self) -> usize {
    self.grid_index as usize
  }

  /// Position emitted for this vertex during the last frame it was visited.
  pub fn interpolated(&self) -> Vec3 {
    self.interpolated
  }

  pub fn frame(&self) -> u32 {
    self.frame
  }

  pub fn state(&self) -> NodeState {
    self.state
  }

  pub fn parent(&self) -> Option<VertexId> {
    self.parent
  }

  pub fn has_children(&self) -> bool {
    self.first_child.is_some()
  }

  /// Quads at this vertex's level that use it as a corner.
  pub fn adjacent_quads(&self) -> &[QuadRef] {
    &self.adjacent_quads
  }

  #[inline]
  pub(crate) fn is_stamped(&self, frame: u32) -> bool {
    self.frame == frame
  }
}

/// Fields shared by internal quads and leaves.
#[derive(Clone, Debug)]
pub struct QuadHeader {
  pub(crate) level: u8,
  pub(crate) parent: Option<NodeId>,
  /// Corner vertices at this quad's level, in SW, SE, NE, NW order.
  pub(crate) corners: [VertexId; 4],
  pub(crate) diagonal: Diagonal,
  pub(crate) frame: u32,
  pub(crate) state: NodeState,
}

impl QuadHeader {
  pub(crate) fn new(level: u8, corners: [VertexId; 4]) -> Self {
    Self {
      level,
      parent: None,
      corners,
      diagonal: Diagonal::NwSe,
      frame: 0,
      state: NodeState::Boundary,
    }
  }

  pub fn level(&self) -> u8 {
    self.level
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn corners(&self) -> [VertexId; 4] {
    self.corners
  }

  pub fn diagonal(&self) -> Diagonal {
    self.diagonal
  }

  pub fn frame(&self) -> u32 {
    self.frame
  }

  pub fn state(&self) -> NodeState {
    self.state
  }

  #[inline]
  pub(crate) fn is_active(&self, frame: u32) -> bool {
    self.frame == frame && self.state == NodeState::Active
  }

  /// True when `a` and `b` are the two ends of this quad's diagonal.
  pub fn is_diagonal_connected(&self, a: VertexId, b: VertexId) -> bool {
    let (i, j) = self.diagonal.corner_slots();
    let (ci, cj) = (self.corners[i], self.corners[j]);
    (a == ci && b == cj) || (a == cj && b == ci)
  }
}

/// Internal quad: always has a center vertex and four children.
#[derive(Clone, Debug)]
pub struct QuadNode {
  pub(crate) header: QuadHeader,
  /// Vertex at the quad center, one level finer than the corners.
  pub(crate) center: VertexId,
  /// Child quads in SW, SE, NE, NW order.
  pub(crate) children: [QuadRef; 4],
}

impl QuadNode {
  pub fn header(&self) -> &QuadHeader {
    &self.header
  }

  pub fn center(&self) -> VertexId {
    self.center
  }

  pub fn children(&self) -> [QuadRef; 4] {
    self.children
  }
}

/// Finest-level quad (edge length of one grid step).
#[derive(Clone, Debug)]
pub struct QuadLeaf {
  pub(crate) header: QuadHeader,
}

impl QuadLeaf {
  pub fn header(&self) -> &QuadHeader {
    &self.header
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
