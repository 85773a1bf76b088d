use super::*;

/// Square viewport with a 90° vertical fov: lateral planes at ±45°.
fn square_view(position: Vec3, target: Vec3) -> HorizontalFrustum {
  let camera = Camera {
    position,
    target,
    fov_y_degrees: 90.0,
    ..Camera::default()
  };
  HorizontalFrustum::from_camera(512, 512, &camera)
}

fn approx(a: Vec3, b: Vec3) -> bool {
  (a - b).length() < 1e-5
}

#[test]
fn test_plane_normals_point_inward() {
  let frustum = square_view(Vec3::ZERO, Vec3::Y);
  let s = std::f32::consts::FRAC_1_SQRT_2;

  assert!(approx(frustum.left.xyz(), Vec3::new(s, s, 0.0)));
  assert!(approx(frustum.right.xyz(), Vec3::new(-s, s, 0.0)));
  assert!(frustum.left.w.abs() < 1e-6);
}

#[test]
fn test_plane_offset_follows_position() {
  let position = Vec3::new(10.0, -4.0, 3.0);
  let frustum = square_view(position, position + Vec3::Y);

  // The camera lies on both planes.
  assert!(HorizontalFrustum::signed_distance(frustum.left, position).abs() < 1e-4);
  assert!(HorizontalFrustum::signed_distance(frustum.right, position).abs() < 1e-4);
}

#[test]
fn test_culls_circles_outside_lateral_planes() {
  let frustum = square_view(Vec3::ZERO, Vec3::Y);

  assert!(!frustum.culls_circle(Vec3::new(0.0, 100.0, 0.0), 1.0));
  assert!(frustum.culls_circle(Vec3::new(-100.0, 10.0, 0.0), 5.0));
  assert!(frustum.culls_circle(Vec3::new(100.0, 10.0, 0.0), 5.0));
  // Behind the camera, both planes report outside.
  assert!(frustum.culls_circle(Vec3::new(0.0, -100.0, 0.0), 5.0));
}

#[test]
fn test_radius_keeps_straddling_circles() {
  let frustum = square_view(Vec3::ZERO, Vec3::Y);
  // 10 units left of the left plane.
  let center = Vec3::new(-20.0, 20.0 - 10.0 * std::f32::consts::SQRT_2, 0.0);
  assert!(frustum.culls_circle(center, 9.0));
  assert!(!frustum.culls_circle(center, 11.0));
}

#[test]
fn test_wide_viewport_widens_fov() {
  let camera = Camera {
    fov_y_degrees: 90.0,
    ..Camera::default()
  };
  let narrow = HorizontalFrustum::from_camera(512, 512, &camera);
  let wide = HorizontalFrustum::from_camera(1024, 512, &camera);
  let point = Vec3::new(-1.5, 1.0, 0.0);

  assert!(narrow.culls_circle(point, 0.0));
  assert!(!wide.culls_circle(point, 0.0));
}

#[test]
fn test_everything_never_culls() {
  let frustum = HorizontalFrustum::everything();
  assert!(!frustum.culls_circle(Vec3::new(-1.0e6, -1.0e6, 0.0), 0.0));
  assert_eq!(HorizontalFrustum::default(), frustum);
}
