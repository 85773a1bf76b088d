//! Vertex and quad hierarchies of the quad collapse mesh.
//!
//! Two parallel trees are built once from the height grid:
//!
//! - **Quad tree**: one root quad covering the grid, split into SW, SE, NE,
//!   NW children down to single grid cells (leaves).
//! - **Vertex forest**: one vertex node per grid sample per level it appears
//!   at. Every vertex below level 0 collapses into exactly one vertex one
//!   level coarser; the four grid corners at level 0 are the roots.
//!
//! # Level Convention
//!
//! Level 0 = coarsest (the single root quad), `max_level` = finest (one grid
//! step per quad). Vertex coordinates are always expressed on the finest grid.
//!
//! # Module Structure
//!
//! - [`node`]: node types and index handles
//! - [`pool`]: fixed-capacity arenas backing the trees
//! - `builder`: pool sizing and recursive construction
//! - `collapse`: collapse-target and diagonal resolution per quad

mod builder;
mod collapse;
pub mod node;
pub mod pool;

pub use node::{
  Diagonal, LeafId, NodeId, NodeState, QuadHeader, QuadLeaf, QuadNode, QuadRef, VertexId,
  VertexNode,
};
pub use pool::Pool;

use crate::constants::vertices_per_edge;
use crate::error::{fatal, ErrorSink, InvariantViolation};

/// Built vertex/quad hierarchy for one square height grid.
#[derive(Clone, Debug)]
pub struct Hierarchy {
  /// Grid samples per edge (2^max_level + 1).
  pub(crate) edge_length: usize,
  pub(crate) max_level: usize,
  pub(crate) vertices: Pool<VertexNode>,
  pub(crate) nodes: Pool<QuadNode>,
  pub(crate) leaves: Pool<QuadLeaf>,
  /// First vertex pool index of each level.
  pub(crate) level_offsets: Vec<u32>,
  pub(crate) activation_distance: Vec<f32>,
  pub(crate) cull_radius: Vec<f32>,
  /// Level-0 vertices at the SW, SE, NE, NW grid corners.
  pub(crate) root_vertices: [VertexId; 4],
  pub(crate) root_quad: QuadRef,
}

impl Hierarchy {
  pub fn edge_length(&self) -> usize {
    self.edge_length
  }

  pub fn max_level(&self) -> usize {
    self.max_level
  }

  pub fn level_count(&self) -> usize {
    self.max_level + 1
  }

  pub fn root_quad(&self) -> QuadRef {
    self.root_quad
  }

  pub fn root_vertices(&self) -> [VertexId; 4] {
    self.root_vertices
  }

  /// Camera distance below which vertices at `level` expand.
  pub fn activation_distance(&self, level: usize) -> f32 {
    self.activation_distance[level]
  }

  /// Bounding-circle radius of quads at `level`.
  pub fn cull_radius(&self, level: usize) -> f32 {
    self.cull_radius[level]
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn leaf_count(&self) -> usize {
    self.leaves.len()
  }

  #[inline]
  pub fn vertex(&self, id: VertexId) -> &VertexNode {
    self.vertices.get(id.0)
  }

  #[inline]
  pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut VertexNode {
    self.vertices.get_mut(id.0)
  }

  #[inline]
  pub fn node(&self, id: NodeId) -> &QuadNode {
    self.nodes.get(id.0)
  }

  #[inline]
  pub fn leaf(&self, id: LeafId) -> &QuadLeaf {
    self.leaves.get(id.0)
  }

  /// Shared fields of either quad kind.
  #[inline]
  pub fn header(&self, quad: QuadRef) -> &QuadHeader {
    match quad {
      QuadRef::Node(id) => &self.nodes.get(id.0).header,
      QuadRef::Leaf(id) => &self.leaves.get(id.0).header,
    }
  }

  #[inline]
  pub(crate) fn header_mut(&mut self, quad: QuadRef) -> &mut QuadHeader {
    match quad {
      QuadRef::Node(id) => &mut self.nodes.get_mut(id.0).header,
      QuadRef::Leaf(id) => &mut self.leaves.get_mut(id.0).header,
    }
  }

  /// Child quads of `quad`, or `None` for a leaf.
  pub fn quad_children(&self, quad: QuadRef) -> Option<[QuadRef; 4]> {
    match quad {
      QuadRef::Node(id) => Some(self.node(id).children),
      QuadRef::Leaf(_) => None,
    }
  }

  /// All vertex ids, coarsest level first.
  pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
    (0..self.vertices.len() as u32).map(VertexId)
  }

  /// All internal quad ids.
  pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
    (0..self.nodes.len() as u32).map(NodeId)
  }

  /// Vertices that collapse into `id`, most recently linked first.
  pub fn children(&self, id: VertexId) -> Children<'_> {
    Children {
      hierarchy: self,
      next: self.vertex(id).first_child,
    }
  }

  /// Finest-grid coordinates of a vertex.
  pub fn grid_coords(&self, id: VertexId) -> (u32, u32) {
    let index = self.vertex(id).grid_index;
    let edge = self.edge_length as u32;
    (index % edge, index / edge)
  }

  /// Vertex node for finest-grid sample (x, y) at `level`.
  ///
  /// Returns `None` when the sample is off the grid, the level does not
  /// exist, or the sample is not part of that level.
  pub fn vertex_at(&self, level: usize, x: u32, y: u32) -> Option<VertexId> {
    if level > self.max_level || x as usize >= self.edge_length || y as usize >= self.edge_length {
      return None;
    }
    let step = ((self.edge_length - 1) >> level) as u32;
    if x % step != 0 || y % step != 0 {
      return None;
    }
    Some(self.vertex_index(level, x, y))
  }

  #[inline]
  fn vertex_index(&self, level: usize, x: u32, y: u32) -> VertexId {
    let shift = (self.max_level - level) as u32;
    let row = vertices_per_edge(level) as u32;
    VertexId(self.level_offsets[level] + (y >> shift) * row + (x >> shift))
  }

  /// Vertex lookup used during construction; a level mismatch is fatal.
  pub(crate) fn lookup_vertex(
    &self,
    level: usize,
    x: u32,
    y: u32,
    sink: &dyn ErrorSink,
  ) -> VertexId {
    let id = self.vertex_index(level, x, y);
    let found = self.vertex(id).level;
    if found as usize != level {
      fatal(
        sink,
        InvariantViolation::LevelMismatch {
          expected: level as u8,
          found,
        },
      );
    }
    id
  }

  /// Clear every frame stamp back to 0.
  pub(crate) fn reset_stamps(&mut self) {
    for vertex in self.vertices.iter_mut() {
      vertex.frame = 0;
    }
    for node in self.nodes.iter_mut() {
      node.header.frame = 0;
    }
    for leaf in self.leaves.iter_mut() {
      leaf.header.frame = 0;
    }
  }
}

/// Iterator over the collapse children of a vertex.
pub struct Children<'a> {
  hierarchy: &'a Hierarchy,
  next: Option<VertexId>,
}

impl Iterator for Children<'_> {
  type Item = VertexId;

  fn next(&mut self) -> Option<VertexId> {
    let current = self.next?;
    self.next = self.hierarchy.vertex(current).next_sibling;
    Some(current)
  }
}
