use super::*;

#[test]
fn test_orbit_keeps_radius_and_height() {
	let path = FlightPath::Orbit {
		radius: 0.25,
		height: 50.0,
	};
	let view = ViewConfig::default();
	for frame in 0..8 {
		let camera = camera_at(&path, &view, 512.0, frame, 8);
		let center = Vec3::new(256.0, 256.0, 0.0);
		let flat = (camera.position - center).truncate().length();
		assert!((flat - 128.0).abs() < 1e-2);
		assert_eq!(camera.position.z, 50.0);
		assert_eq!(camera.target, center);
	}
}

#[test]
fn test_line_runs_start_to_end() {
	let path = FlightPath::Line {
		start: [0.0, 0.0, 30.0],
		end: [1.0, 0.5, 10.0],
	};
	let view = ViewConfig::default();

	let first = camera_at(&path, &view, 100.0, 0, 5);
	let last = camera_at(&path, &view, 100.0, 4, 5);

	assert_eq!(first.position, Vec3::new(0.0, 0.0, 30.0));
	assert!((last.position - Vec3::new(100.0, 50.0, 10.0)).length() < 1e-4);
	assert!(first.forward().x > 0.0);
	assert!(first.forward().z < 0.0);
}

#[test]
fn test_single_frame_starts_path() {
	let path = FlightPath::default();
	let camera = camera_at(&path, &ViewConfig::default(), 64.0, 0, 1);
	assert_eq!(camera.fov_y_degrees, 70.0);
	assert!(camera.position.is_finite());
}
