use super::*;

#[test]
fn test_camera_defaults() {
  let camera = Camera::default();
  assert_eq!(camera.position, Vec3::ZERO);
  assert_eq!(camera.target, Vec3::new(0.0, 1.0, 0.0));
  assert_eq!(camera.up, Vec3::new(0.0, 0.0, 1.0));
  assert_eq!(camera.fov_y_degrees, 70.0);
  assert_eq!(camera.z_near, 1.0);
  assert_eq!(camera.z_far, 4096.0);
  assert_eq!(camera.forward(), Vec3::Y);
}

#[test]
fn test_triangle_mesh_groups_by_three() {
  let buffer = [
    Vec3::ZERO,
    Vec3::X,
    Vec3::Y,
    Vec3::X,
    Vec3::ONE,
    Vec3::Y,
  ];
  let mesh = TriangleMesh::new(&buffer);

  assert_eq!(mesh.triangle_count(), 2);
  assert!(!mesh.is_empty());
  let triangles: Vec<[Vec3; 3]> = mesh.triangles().collect();
  assert_eq!(triangles[1], [Vec3::X, Vec3::ONE, Vec3::Y]);
}

#[test]
fn test_empty_mesh() {
  let mesh = TriangleMesh::new(&[]);
  assert!(mesh.is_empty());
  assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_frame_stats_total() {
  let mut stats = FrameStats::default();
  stats.emitted_quads[0] = 1;
  stats.emitted_quads[4] = 6;
  assert_eq!(stats.emitted_quad_total(), 7);
}
