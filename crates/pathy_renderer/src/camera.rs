//! Camera for primary ray generation.
//!
//! The camera builds right-handed view and perspective matrices once and maps
//! normalized screen coordinates back into world space through the inverse of
//! their product.

use pathy_core::CameraSettings;
use pathy_math::{Mat4, Ray, Vec3};

/// Pinhole camera with precomputed transforms.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    /// Clip space → world space
    inverse_view_proj: Mat4,
}

impl Camera {
    /// Build the camera for an image with the given aspect ratio (width / height).
    pub fn new(settings: &CameraSettings, aspect_ratio: f32) -> Self {
        assert!(
            aspect_ratio.is_finite() && aspect_ratio > 0.0,
            "invalid aspect ratio {aspect_ratio}"
        );

        // Re-orthogonalize up against the view direction
        let forward = (settings.eye - settings.look_at).normalize();
        let right = settings.up.cross(forward).normalize();
        let up = forward.cross(right);
        debug_assert!(up.is_finite(), "degenerate camera basis: {settings:?}");

        let view = Mat4::look_at_rh(settings.eye, settings.look_at, up);
        let proj = Mat4::perspective_rh(
            settings.fov_y_degrees.to_radians(),
            aspect_ratio,
            settings.near,
            settings.far,
        );

        Self {
            eye: settings.eye,
            inverse_view_proj: (proj * view).inverse(),
        }
    }

    /// Create a ray through normalized screen coordinates `u, v` in [0, 1].
    ///
    /// `(0, 0)` is the bottom-left corner of the view; the point is taken on
    /// the near plane (clip-space z = 0).
    pub fn create_ray(&self, u: f32, v: f32) -> Ray {
        let point = self
            .inverse_view_proj
            .project_point3(Vec3::new(u * 2.0 - 1.0, v * 2.0 - 1.0, 0.0));
        Ray::towards(self.eye, point)
    }
}
