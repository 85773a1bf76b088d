//! Error types and the injectable error sink.
//!
//! Configuration problems are ordinary `Result` errors. Invariant violations
//! mean the hierarchy is corrupt; they are reported to the sink and then
//! abort with a panic, since no caller can recover a half-linked tree.

use std::error::Error as StdError;
use std::sync::Mutex;

use thiserror::Error;

use crate::hierarchy::VertexId;

/// Grid rejected by `QuadCollapseMesh::build`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
  #[error("height field must be square, got {width}x{height}")]
  NotSquare { width: usize, height: usize },

  #[error("height field edge length {0} is not 2^k + 1")]
  InvalidEdgeLength(usize),

  #[error("height field edge length {edge} exceeds the maximum of {max}")]
  TooLarge { edge: usize, max: usize },

  #[error("height field needs {levels} hierarchy levels, the maximum is {max}")]
  TooManyLevels { levels: usize, max: usize },

  #[error("grid holds {actual} positions, expected {expected}")]
  GridLengthMismatch { expected: usize, actual: usize },
}

/// Broken hierarchy invariant. Always fatal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
  #[error("{pool} pool overflow (capacity {capacity})")]
  PoolExhausted { pool: &'static str, capacity: usize },

  #[error("vertex lookup at level {expected} found a level {found} node")]
  LevelMismatch { expected: u8, found: u8 },

  #[error("center vertex {0:?} already has a collapse parent")]
  CenterAlreadyParented(VertexId),

  #[error("vertex {child:?} (level {child_level}) cannot collapse into level {parent_level}")]
  ParentLevel {
    child: VertexId,
    child_level: u8,
    parent_level: u8,
  },

  #[error("vertex {child:?} already collapses into {current:?}, not {requested:?}")]
  Reparent {
    child: VertexId,
    current: VertexId,
    requested: VertexId,
  },

  #[error("vertex {child:?} is listed under {listed:?} but collapses into {actual:?}")]
  ParentMismatch {
    child: VertexId,
    listed: VertexId,
    actual: Option<VertexId>,
  },
}

/// Destination for engine error reports.
///
/// Passed to the engine at construction so every traversal can report
/// without a process-wide hook.
pub trait ErrorSink: Send + Sync {
  fn report(&self, error: &(dyn StdError + 'static));
}

/// Default sink: logs through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
  fn report(&self, error: &(dyn StdError + 'static)) {
    tracing::error!(%error, "terrain lod error");
  }
}

/// Sink that keeps every report as a formatted message.
#[derive(Debug, Default)]
pub struct CollectingSink {
  reports: Mutex<Vec<String>>,
}

impl CollectingSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of all messages reported so far.
  pub fn reports(&self) -> Vec<String> {
    match self.reports.lock() {
      Ok(reports) => reports.clone(),
      Err(poisoned) => poisoned.into_inner().clone(),
    }
  }
}

impl ErrorSink for CollectingSink {
  fn report(&self, error: &(dyn StdError + 'static)) {
    let mut reports = match self.reports.lock() {
      Ok(reports) => reports,
      Err(poisoned) => poisoned.into_inner(),
    };
    reports.push(error.to_string());
  }
}

/// Report an invariant violation, then abort.
#[cold]
#[track_caller]
pub(crate) fn fatal(sink: &dyn ErrorSink, violation: InvariantViolation) -> ! {
  sink.report(&violation);
  panic!("terrain lod invariant violated: {violation}");
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
