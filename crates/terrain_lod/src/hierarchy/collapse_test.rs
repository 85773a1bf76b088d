use super::*;
use crate::constants::CORNER_OFFSETS;
use crate::error::CollectingSink;
use crate::hierarchy::QuadRef;
use crate::test_utils::*;

/// 3x3 grid, flat except for one raised corner.
fn grid_with_raised_corner(slot: usize) -> Vec<Vec3> {
  let (cx, cy) = CORNER_OFFSETS[slot];
  grid_from_fn(3, |x, y| {
    if x as u32 == cx * 2 && y as u32 == cy * 2 {
      10.0
    } else {
      0.0
    }
  })
}

/// Grid from explicit heights, rows listed from y = 0 upward.
fn grid_from_rows<const N: usize>(rows: [[f32; N]; N]) -> Vec<Vec3> {
  grid_from_fn(N, |x, y| rows[y][x])
}

fn level1(hierarchy: &Hierarchy, x: u32, y: u32) -> VertexId {
  hierarchy.vertex_at(1, x, y).unwrap()
}

fn root_diagonal(hierarchy: &Hierarchy) -> Diagonal {
  hierarchy.header(hierarchy.root_quad()).diagonal()
}

#[test]
fn test_flat_quad_ties_resolve_to_second_corner() {
  let (grid, edge) = flat_grid(1);
  let h = build_hierarchy(&grid, edge);
  let [sw, se, _ne, nw] = h.root_vertices();

  // Equal distances everywhere: every midpoint takes its tie-break corner.
  assert!(h.owns(sw, level1(&h, 1, 0)), "bottom");
  assert!(h.owns(se, level1(&h, 2, 1)), "right");
  assert!(h.owns(nw, level1(&h, 1, 2)), "top");
  assert!(h.owns(sw, level1(&h, 0, 1)), "left");

  // SW is the only corner owning both of its midpoints.
  assert!(h.owns(sw, level1(&h, 1, 1)), "center");
  // NE ties to nothing, so the diagonal avoids SW-NE.
  assert_eq!(root_diagonal(&h), Diagonal::NwSe);
}

#[test]
fn test_outer_children_follow_their_corner() {
  let (grid, edge) = flat_grid(1);
  let h = build_hierarchy(&grid, edge);
  for (slot, &root) in h.root_vertices().iter().enumerate() {
    let (x, y) = CORNER_OFFSETS[slot];
    assert!(h.owns(root, level1(&h, x * 2, y * 2)));
  }
}

#[test]
fn test_center_between_two_pair_owners_goes_to_nearer() {
  let grid = grid_with_raised_corner(SW);
  let h = build_hierarchy(&grid, 3);
  let [_sw, se, _ne, nw] = h.root_vertices();

  assert!(h.owns(se, level1(&h, 1, 0)));
  assert!(h.owns(se, level1(&h, 2, 1)));
  assert!(h.owns(nw, level1(&h, 1, 2)));
  assert!(h.owns(nw, level1(&h, 0, 1)));

  // SE and NW are equidistant from the center; the tie goes to NW.
  assert!(h.owns(nw, level1(&h, 1, 1)));
  assert_eq!(root_diagonal(&h), Diagonal::NwSe);
}

#[test]
fn test_center_follows_single_pair_owner_with_tied_opposite() {
  let grid = grid_with_raised_corner(SE);
  let h = build_hierarchy(&grid, 3);
  let [sw, _se, ne, _nw] = h.root_vertices();

  assert!(h.owns(sw, level1(&h, 1, 0)));
  assert!(h.owns(ne, level1(&h, 2, 1)));
  assert!(h.owns(sw, level1(&h, 1, 1)));
  // NE holds the right midpoint, so the center diagonal is kept.
  assert_eq!(root_diagonal(&h), Diagonal::SwNe);
}

#[test]
fn test_center_between_sw_and_ne_pair_owners_goes_to_nearer() {
  let grid = grid_from_rows([
    [0.0, 0.0, 0.0],
    [0.0, 0.9, 1.0],
    [0.0, 1.0, 1.0],
  ]);
  let h = build_hierarchy(&grid, 3);
  let [sw, _se, ne, _nw] = h.root_vertices();

  assert!(h.owns(sw, level1(&h, 1, 0)));
  assert!(h.owns(sw, level1(&h, 0, 1)));
  assert!(h.owns(ne, level1(&h, 2, 1)));
  assert!(h.owns(ne, level1(&h, 1, 2)));

  // The center sits closer to the raised NE corner.
  assert!(h.owns(ne, level1(&h, 1, 1)));
  assert_eq!(root_diagonal(&h), Diagonal::SwNe);
}

/// Each corner claims exactly one midpoint, rotating counter-clockwise, so
/// no corner owns a pair and the children's diagonals decide.
#[test]
fn test_center_follows_first_child_diagonal_through_it() {
  let grid = grid_from_rows([
    [0.0, 2.0, 2.0],
    [0.0, 3.0, 4.0],
    [6.0, 6.0, 4.0],
  ]);
  let h = build_hierarchy(&grid, 3);
  let [sw, se, ne, nw] = h.root_vertices();

  assert!(h.owns(se, level1(&h, 1, 0)), "bottom");
  assert!(h.owns(ne, level1(&h, 2, 1)), "right");
  assert!(h.owns(nw, level1(&h, 1, 2)), "top");
  assert!(h.owns(sw, level1(&h, 0, 1)), "left");

  // Leaf children split NW-SE: the SE and NW children both reach the
  // center from their outer corner, and SE comes first.
  let children = h.quad_children(h.root_quad()).unwrap();
  let center = level1(&h, 1, 1);
  let reaches = |slot: usize, x: u32, y: u32| {
    h.header(children[slot])
      .is_diagonal_connected(center, level1(&h, x, y))
  };
  assert!(!reaches(SW, 0, 0));
  assert!(reaches(SE, 2, 0));
  assert!(!reaches(NE, 2, 2));
  assert!(reaches(NW, 0, 2));

  assert!(h.owns(se, center));
  assert!(!h.owns(nw, center));
  // NW holds the top midpoint, so the diagonal through SE is kept.
  assert_eq!(root_diagonal(&h), Diagonal::NwSe);
}

/// No pair owner and no child diagonal through the center: the center
/// collapses into its nearest corner.
#[test]
fn test_center_falls_back_to_nearest_corner() {
  let grid = grid_from_rows([
    [0.0, 1.0, 2.0, 0.0, 3.0],
    [2.0, 4.0, 4.0, 0.0, 0.0],
    [3.0, 0.0, 3.0, 0.0, 1.0],
    [4.0, 1.0, 0.0, 1.0, 2.0],
    [0.0, 4.0, 0.0, 0.0, 1.0],
  ]);
  let h = build_hierarchy(&grid, 5);
  let roots = h.root_vertices();
  let center = level1(&h, 2, 2);
  let midpoints = [(2, 0), (4, 2), (2, 4), (0, 2)].map(|(x, y)| level1(&h, x, y));
  let outer = [(0, 0), (4, 0), (4, 4), (0, 4)].map(|(x, y)| level1(&h, x, y));
  let children = h.quad_children(h.root_quad()).unwrap();

  for (slot, &root) in roots.iter().enumerate() {
    let adjacent = [midpoints[(slot + 3) % 4], midpoints[slot]];
    assert!(
      !adjacent.iter().all(|&m| h.owns(root, m)),
      "slot {slot} owns a midpoint pair"
    );
    assert!(!h.header(children[slot]).is_diagonal_connected(center, outer[slot]));
  }

  // SE is strictly nearest: sqrt(8) against sqrt(12) and sqrt(17).
  assert!(h.owns(roots[SE], center));
  assert_eq!(root_diagonal(&h), Diagonal::NwSe);
}

#[test]
fn test_center_is_never_left_unparented() {
  let (grid, edge) = random_grid(4, 6.0, 7);
  let h = build_hierarchy(&grid, edge);
  for id in h.node_ids() {
    let center = h.node(id).center();
    let parent = h.vertex(center).parent().unwrap();
    assert!(h.node(id).header().corners().contains(&parent));
  }
}

#[test]
fn test_diagonal_through_slots() {
  assert_eq!(diagonal_through(SW), Diagonal::SwNe);
  assert_eq!(diagonal_through(NE), Diagonal::SwNe);
  assert_eq!(diagonal_through(SE), Diagonal::NwSe);
  assert_eq!(diagonal_through(NW), Diagonal::NwSe);
  assert_eq!(other_diagonal(Diagonal::SwNe), Diagonal::NwSe);
}

#[test]
fn test_relinking_same_parent_is_a_no_op() {
  let (grid, edge) = flat_grid(1);
  let mut h = build_hierarchy(&grid, edge);
  let sink = CollectingSink::new();
  let sw = h.root_vertices()[SW];
  let before: Vec<VertexId> = h.children(sw).collect();

  h.link_child(sw, level1(&h, 1, 1), &sink);

  assert_eq!(h.children(sw).collect::<Vec<_>>(), before);
  assert!(sink.reports().is_empty());
}

#[test]
fn test_reparent_is_fatal() {
  let (grid, edge) = flat_grid(1);
  let mut h = build_hierarchy(&grid, edge);
  let sink = CollectingSink::new();
  let ne = h.root_vertices()[NE];
  let center = level1(&h, 1, 1);

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    h.link_child(ne, center, &sink);
  }));

  assert!(result.is_err());
  assert_eq!(sink.reports().len(), 1);
  assert!(sink.reports()[0].contains("already collapses into"));
}

#[test]
fn test_parent_level_gap_is_fatal() {
  let (grid, edge) = flat_grid(1);
  let mut h = build_hierarchy(&grid, edge);
  let sink = CollectingSink::new();
  let [sw, se, _, _] = h.root_vertices();

  // Roots are unparented but share level 0 with every other root.
  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    h.link_child(sw, se, &sink);
  }));

  assert!(result.is_err());
  assert_eq!(sink.reports().len(), 1);
  assert!(sink.reports()[0].contains("cannot collapse into level 0"));
}

#[test]
fn test_children_of_leaf_quads_are_leaves() {
  let (grid, edge) = flat_grid(1);
  let h = build_hierarchy(&grid, edge);
  let children = h.quad_children(h.root_quad()).unwrap();
  assert!(children.iter().all(|c| matches!(c, QuadRef::Leaf(_))));
}
