use crate::Vec3;

/// Tolerance used when checking that a ray direction has unit length.
pub const NORMALIZED_TOLERANCE: f32 = 1e-5;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// Every ray the renderer traces is built through [`Ray::new`], which checks
/// the unit-length invariant in debug builds. Intersection code relies on it
/// (the quadratic is solved with `a = 1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` must already be normalized.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            is_normalized(direction),
            "ray direction {direction:?} is not normalized"
        );
        Self { origin, direction }
    }

    /// Create a ray towards `target`, normalizing the direction.
    #[inline]
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Returns true if `v` has unit length within [`NORMALIZED_TOLERANCE`].
#[inline]
pub fn is_normalized(v: Vec3) -> bool {
    (v.length() - 1.0).abs() <= NORMALIZED_TOLERANCE
}
