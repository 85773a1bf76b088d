//! Triangle emission from the stamped quad tree.

use glam::Vec3;

use crate::hierarchy::{Hierarchy, NodeState, QuadRef, VertexId};
use crate::types::FrameStats;

/// Append two triangles for every Boundary (or untouched) quad below
/// `quad`, descending through Active ones.
pub(crate) fn emit(
  hierarchy: &Hierarchy,
  frame: u32,
  quad: QuadRef,
  out: &mut Vec<Vec3>,
  stats: &mut FrameStats,
) {
  let header = hierarchy.header(quad);
  if header.frame == frame && header.state == NodeState::Active {
    if let Some(children) = hierarchy.quad_children(quad) {
      for child in children {
        emit(hierarchy, frame, child, out, stats);
      }
      return;
    }
  }

  let corners = header.corners;
  let resolved = corners.map(|corner| resolve(hierarchy, frame, corner));

  let mut written = 0;
  for triangle in header.diagonal.triangles() {
    let [Some(a), Some(b), Some(c)] = triangle.map(|slot| resolved[slot]) else {
      continue;
    };
    out.extend_from_slice(&[a, b, c]);
    written += 1;
  }
  if written > 0 {
    stats.emitted_quads[header.level as usize] += 1;
    stats.triangles += written;
  }
}

/// Position of `id` this frame: its own if visited, else that of its nearest
/// visited ancestor.
#[inline]
fn resolve(hierarchy: &Hierarchy, frame: u32, id: VertexId) -> Option<Vec3> {
  let mut current = Some(id);
  while let Some(id) = current {
    let vertex = hierarchy.vertex(id);
    if vertex.is_stamped(frame) {
      return Some(vertex.interpolated);
    }
    current = vertex.parent;
  }
  None
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;
