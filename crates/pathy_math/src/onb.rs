use crate::Vec3;

/// Orthonormal basis built around a single unit direction.
///
/// `w` is the input direction; `u` and `v` complete a right-handed frame,
/// so `u.cross(v) == w`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis whose `w` axis is the unit vector `w`.
    pub fn from_w(w: Vec3) -> Self {
        // Pick a helper axis that is not close to parallel with w
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let u = a.cross(w).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Transform local coordinates (x along u, y along v, z along w) to world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
