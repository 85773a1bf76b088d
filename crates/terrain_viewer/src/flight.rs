//! Camera placement along the configured flight path.

use glam::Vec3;
use terrain_lod::Camera;

use crate::config::{FlightPath, ViewConfig};

/// Camera for `frame` of `frames` over a terrain `size` cells wide.
pub fn camera_at(path: &FlightPath, view: &ViewConfig, size: f32, frame: u32, frames: u32) -> Camera {
	let progress = if frames <= 1 {
		0.0
	} else {
		frame as f32 / (frames - 1) as f32
	};
	let center = Vec3::new(size * 0.5, size * 0.5, 0.0);

	let (position, target) = match *path {
		FlightPath::Orbit { radius, height } => {
			let angle = progress * std::f32::consts::TAU;
			let offset = Vec3::new(angle.cos(), angle.sin(), 0.0) * radius * size;
			(center + offset + Vec3::Z * height, center)
		}
		FlightPath::Line { start, end } => {
			let start = Vec3::new(start[0] * size, start[1] * size, start[2]);
			let end = Vec3::new(end[0] * size, end[1] * size, end[2]);
			let position = start.lerp(end, progress);
			let heading = (end - start).normalize_or(Vec3::Y);
			// Look ahead and slightly down.
			(position, position + heading - Vec3::Z * 0.25)
		}
	};

	Camera {
		position,
		target,
		up: Vec3::Z,
		fov_y_degrees: view.fov_y_degrees,
		z_near: view.z_near,
		z_far: view.z_far,
	}
}

#[cfg(test)]
#[path = "flight_test.rs"]
mod flight_test;
