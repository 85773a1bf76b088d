//! Per-frame statistics for the quad collapse mesh.
//!
//! Compiled in always; recording only happens with the `metrics` feature and
//! the runtime toggle both on.
//!
//! # Usage
//!
//! ```ignore
//! use terrain_lod::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! mesh.update(&camera, &frustum);
//! let avg = mesh.metrics().avg_update_us();
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::constants::MAX_LEVEL_COUNT;
use crate::types::FrameStats;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// True when metrics are compiled in and switched on.
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Fixed-size history, oldest values evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    pub fn sum(&self) -> u64 {
        self.buffer.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Update timings and the shape of the latest frames.
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    /// `update` durations in microseconds.
    pub update_timings: RollingWindow<u64>,
    /// Triangle counts of recent frames.
    pub triangle_counts: RollingWindow<u64>,
    pub last_update_us: u64,
    pub last_triangles: usize,
    pub last_active_vertices: usize,
    pub last_culled_quads: usize,
    /// Emitted quads per level in the latest frame.
    pub quads_per_level: [usize; MAX_LEVEL_COUNT],
    /// Frames recorded since creation.
    pub frames: u64,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished update.
    pub fn record_frame(&mut self, update_us: u64, stats: &FrameStats) {
        if !is_enabled() {
            return;
        }
        self.update_timings.push(update_us);
        self.triangle_counts.push(stats.triangles as u64);
        self.last_update_us = update_us;
        self.last_triangles = stats.triangles;
        self.last_active_vertices = stats.active_vertices;
        self.last_culled_quads = stats.culled_quads;
        self.quads_per_level = stats.emitted_quads;
        self.frames += 1;
    }

    pub fn avg_update_us(&self) -> f64 {
        self.update_timings.average()
    }

    pub fn avg_triangles(&self) -> f64 {
        self.triangle_counts.average()
    }

    pub fn reset(&mut self) {
        self.update_timings.clear();
        self.triangle_counts.clear();
        self.last_update_us = 0;
        self.last_triangles = 0;
        self.last_active_vertices = 0;
        self.last_culled_quads = 0;
        self.quads_per_level.fill(0);
        // frames is cumulative
    }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window() {
        let mut window = RollingWindow::new(3);
        assert!(window.is_empty());

        window.push(10u64);
        window.push(20);
        window.push(30);
        assert_eq!(window.sum(), 60);
        assert_eq!(window.average(), 20.0);

        window.push(40);
        assert_eq!(window.len(), 3);
        assert_eq!(window.min_max(), Some((20, 40)));
        assert_eq!(window.last(), Some(&40));
    }

    #[test]
    fn test_zero_capacity_window_stays_empty() {
        let mut window = RollingWindow::new(0);
        window.push(1u64);
        assert!(window.is_empty());
        assert_eq!(window.min_max(), None);
    }

    #[test]
    fn test_record_frame() {
        let mut metrics = FrameMetrics::new();
        let mut stats = FrameStats {
            triangles: 8,
            active_vertices: 3,
            ..FrameStats::default()
        };
        stats.emitted_quads[2] = 4;

        metrics.record_frame(100, &stats);
        metrics.record_frame(300, &stats);

        assert_eq!(metrics.frames, 2);
        assert_eq!(metrics.avg_update_us(), 200.0);
        assert_eq!(metrics.last_triangles, 8);
        assert_eq!(metrics.quads_per_level[2], 4);

        metrics.reset();
        assert!(metrics.update_timings.is_empty());
        assert_eq!(metrics.frames, 2);
    }
}
