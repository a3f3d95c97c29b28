//! Monte Carlo sampling routines for light estimation.
//!
//! Samplers are pure functions of their uniform variates so they can be
//! tested without a generator; callers draw the variates with [`gen_f32`].

use std::f32::consts::PI;

use pathy_math::{Onb, Vec3};
use rand::{Rng, RngCore};

/// Density of [`uniform_sphere_direction`] over solid angle.
pub const UNIFORM_SPHERE_PDF: f32 = 1.0 / (4.0 * PI);

/// Draw a uniform variate in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Map two uniform variates to a direction distributed uniformly over the
/// unit sphere (inverse CDF: azimuth `2π·u1`, polar angle `acos(1 - 2·u2)`).
#[inline]
pub fn uniform_sphere_direction(u1: f32, u2: f32) -> Vec3 {
    let azimuth = 2.0 * PI * u1;
    let z = 1.0 - 2.0 * u2;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * azimuth.cos(), r * azimuth.sin(), z)
}

/// The cone of directions under which a sphere is visible from a point.
///
/// Sampling the cone uniformly only produces directions that can reach the
/// sphere, instead of wasting samples on its back half.
#[derive(Debug, Clone, Copy)]
pub struct VisibleSphere {
    center: Vec3,
    radius: f32,
    /// Frame whose `w` axis points from the reference point to the center
    frame: Onb,
    /// sin²θmax
    sin2_theta_max: f32,
    /// 1 - cos θmax, kept separately so narrow cones do not cancel to zero
    one_minus_cos_theta_max: f32,
    pdf: f32,
}

impl VisibleSphere {
    /// Build the visible cone of the sphere (`center`, `radius`) as seen from
    /// `reference`.
    ///
    /// Returns `None` when the cone is undefined: the point lies inside or on
    /// the sphere, or the sphere has no extent.
    pub fn new(reference: Vec3, center: Vec3, radius: f32) -> Option<Self> {
        if radius <= 0.0 {
            return None;
        }

        let to_center = center - reference;
        let distance = to_center.length();
        if distance <= radius {
            return None;
        }

        // θmax = asin(radius / distance)
        let sin_theta_max = radius / distance;
        let sin2_theta_max = sin_theta_max * sin_theta_max;
        if sin2_theta_max <= 0.0 {
            return None;
        }
        let cos_theta_max = (1.0 - sin2_theta_max).max(0.0).sqrt();
        // 1 - cos = sin² / (1 + cos), without the cancellation of 1 - cos
        let one_minus_cos_theta_max = sin2_theta_max / (1.0 + cos_theta_max);

        Some(Self {
            center,
            radius,
            frame: Onb::from_w(to_center / distance),
            sin2_theta_max,
            one_minus_cos_theta_max,
            pdf: 1.0 / (2.0 * PI * one_minus_cos_theta_max),
        })
    }

    /// Density over solid angle of every sample, `1 / (2π(1 - cos θmax))`.
    #[inline]
    pub fn pdf(&self) -> f32 {
        self.pdf
    }

    #[inline]
    pub fn cos_theta_max(&self) -> f32 {
        1.0 - self.one_minus_cos_theta_max
    }

    /// Solid angle subtended by the sphere.
    #[inline]
    pub fn solid_angle(&self) -> f32 {
        2.0 * PI * self.one_minus_cos_theta_max
    }

    /// Map two uniform variates to a point on the visible cap of the sphere.
    ///
    /// A direction is drawn uniformly inside the cone and the near hit of the
    /// ray along it is expressed as an angle `α` around the center, which
    /// gives the surface point without solving a quadratic.
    pub fn sample(&self, u1: f32, u2: f32) -> Vec3 {
        // cos θ uniform in [cos θmax, 1]
        let one_minus_cos_theta = u1 * self.one_minus_cos_theta_max;
        let cos_theta = 1.0 - one_minus_cos_theta;
        let sin2_theta = one_minus_cos_theta * (2.0 - one_minus_cos_theta);
        let phi = 2.0 * PI * u2;

        // Angle at the center between the axis and the hit point
        let sin_theta_max = self.sin2_theta_max.sqrt();
        let cos_alpha = (sin2_theta / sin_theta_max
            + cos_theta * (1.0 - sin2_theta / self.sin2_theta_max).max(0.0).sqrt())
        .clamp(-1.0, 1.0);
        let sin_alpha = (1.0 - cos_alpha * cos_alpha).max(0.0).sqrt();

        // The normal at the hit points back towards the reference point
        let local = Vec3::new(sin_alpha * phi.cos(), sin_alpha * phi.sin(), cos_alpha);
        let normal = -self.frame.local(local);

        self.center + self.radius * normal
    }
}
