//! Constants shared by the hierarchy builder and the per-frame passes.
//!
//! # Corner Convention
//!
//! Quad corners and quad children are both stored counter-clockwise starting
//! at the grid origin. Grid `y` grows to the north.
//!
//! ```text
//!  NW(3) ─── NE(2)
//!    │         │
//!  SW(0) ─── SE(1)
//! ```

/// Activation distance of a level = cull radius of that level * ACTIVE_SCALE.
pub const ACTIVE_SCALE: f32 = 16.0;

/// Hard cap on the number of hierarchy levels (levels 0..=12).
pub const MAX_LEVEL_COUNT: usize = 13;

/// Largest accepted grid edge length (2^12 + 1 samples).
pub const MAX_EDGE_LENGTH: usize = 4097;

/// South-west corner / child slot.
pub const SW: usize = 0;
/// South-east corner / child slot.
pub const SE: usize = 1;
/// North-east corner / child slot.
pub const NE: usize = 2;
/// North-west corner / child slot.
pub const NW: usize = 3;

/// Unit offsets of the four corners, indexed by corner slot.
pub const CORNER_OFFSETS: [(u32, u32); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

/// Number of grid samples along one edge at `level` (2^level + 1).
#[inline]
pub const fn vertices_per_edge(level: usize) -> usize {
  (1 << level) + 1
}

/// Number of quads along one edge at `level` (2^level).
#[inline]
pub const fn quads_per_edge(level: usize) -> usize {
  1 << level
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
