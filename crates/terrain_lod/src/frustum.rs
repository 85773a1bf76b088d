//! Lateral frustum planes used to cull quads.
//!
//! Only the left and right planes are kept. Terrain is mostly viewed from
//! above, so top/bottom/near/far tests reject too little to pay for
//! themselves.

use glam::{Quat, Vec3, Vec4, Vec4Swizzles};

use crate::types::Camera;

/// Left and right view-frustum planes as `(normal, w)`, normals pointing
/// into the frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalFrustum {
  pub left: Vec4,
  pub right: Vec4,
}

impl HorizontalFrustum {
  /// Build the planes for a `viewport_width` x `viewport_height` view.
  ///
  /// The horizontal field of view follows from the camera's vertical one and
  /// the viewport aspect. Each plane normal is the forward vector rotated
  /// about `up` by 90° minus half the horizontal fov.
  pub fn from_camera(viewport_width: u32, viewport_height: u32, camera: &Camera) -> Self {
    let half_fov_y = camera.fov_y_degrees.to_radians() * 0.5;
    let focal = viewport_height as f32 * 0.5 / half_fov_y.tan();
    let half_fov_x = (viewport_width as f32 * 0.5 / focal).atan();

    let forward = camera.forward();
    let up = camera.up.normalize_or_zero();
    let turn = std::f32::consts::FRAC_PI_2 - half_fov_x;

    let left = Quat::from_axis_angle(up, -turn) * forward;
    let right = Quat::from_axis_angle(up, turn) * forward;

    Self {
      left: left.extend(-camera.position.dot(left)),
      right: right.extend(-camera.position.dot(right)),
    }
  }

  /// Planes that never cull anything.
  pub fn everything() -> Self {
    Self {
      left: Vec4::ZERO,
      right: Vec4::ZERO,
    }
  }

  /// Signed distance of `point` to a plane, positive inside.
  #[inline]
  pub fn signed_distance(plane: Vec4, point: Vec3) -> f32 {
    plane.xyz().dot(point) + plane.w
  }

  /// True when a circle of `radius` around `center` lies entirely outside
  /// the left or right plane.
  #[inline]
  pub fn culls_circle(&self, center: Vec3, radius: f32) -> bool {
    Self::signed_distance(self.left, center) < -radius
      || Self::signed_distance(self.right, center) < -radius
  }
}

impl Default for HorizontalFrustum {
  fn default() -> Self {
    Self::everything()
  }
}

#[cfg(test)]
#[path = "frustum_test.rs"]
mod frustum_test;
