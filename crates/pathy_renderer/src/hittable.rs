//! Hittable trait and HitRecord for ray-object intersection.
//!
//! Intersection is a linear scan over every sphere in the scene. There is no
//! acceleration structure.

use pathy_core::{Material, Scene, SceneObject, Sphere};
use pathy_math::{Interval, Ray, Vec3};

/// Smallest accepted hit distance.
///
/// Secondary rays start exactly on a surface; rejecting hits closer than this
/// keeps them from re-hitting the surface they left (shadow acne).
pub const T_MIN: f32 = 0.001;

/// The default parametric range for nearest-hit and occlusion queries.
pub const RAY_T: Interval = Interval::new(T_MIN, f32::INFINITY);

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Geometric normal, always facing out of the sphere
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the hit object in the scene
    pub object: usize,
    /// Material of the hit object
    pub material: &'a Material,
}

/// Trait for collections of objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest hit with `t` strictly inside `ray_t`.
    fn intersect_nearest(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// True if anything is hit with `t` strictly inside `ray_t`.
    ///
    /// Stops at the first hit found, which need not be the nearest.
    fn intersect_any_within(&self, ray: &Ray, ray_t: Interval) -> bool;

    /// Occlusion test over (T_MIN, +inf).
    fn intersect_any(&self, ray: &Ray) -> bool {
        self.intersect_any_within(ray, RAY_T)
    }

    /// Occlusion test for a segment of length `distance` along the ray,
    /// used for shadow rays towards lights at a finite distance.
    fn occluded(&self, ray: &Ray, distance: f32) -> bool {
        self.intersect_any_within(ray, RAY_T.with_max(distance))
    }
}

/// Intersect a ray with a single sphere.
///
/// The quadratic is solved relative to the sphere center, so the result only
/// depends on the ray's position relative to the sphere. The smaller root is
/// tried first; if it is out of range the larger one is, which handles rays
/// starting inside the sphere. Returns the accepted `t`.
#[inline]
pub fn hit_sphere(sphere: &Sphere, ray: &Ray, ray_t: Interval) -> Option<f32> {
    if sphere.is_degenerate() {
        return None;
    }

    // Direction is unit length, so a == 1
    let oc = ray.origin() - sphere.center();
    let b = oc.dot(ray.direction());
    let c = oc.length_squared() - sphere.radius2();

    let discriminant = b * b - c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    let mut root = -b - sqrtd;
    if !ray_t.surrounds(root) {
        root = -b + sqrtd;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    Some(root)
}

impl Hittable for [SceneObject] {
    fn intersect_nearest(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<(usize, f32)> = None;
        let mut closest_so_far = ray_t.max;

        for (i, object) in self.iter().enumerate() {
            if let Some(t) = hit_sphere(&object.sphere, ray, ray_t.with_max(closest_so_far)) {
                closest = Some((i, t));
                closest_so_far = t;
            }
        }

        closest.map(|(i, t)| {
            let object = &self[i];
            let p = ray.at(t);
            HitRecord {
                p,
                normal: (p - object.sphere.center()) * object.sphere.inverse_radius(),
                t,
                object: i,
                material: &object.material,
            }
        })
    }

    fn intersect_any_within(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.iter()
            .any(|object| hit_sphere(&object.sphere, ray, ray_t).is_some())
    }
}

impl Hittable for Scene {
    fn intersect_nearest(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.objects.as_slice().intersect_nearest(ray, ray_t)
    }

    fn intersect_any_within(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.objects.as_slice().intersect_any_within(ray, ray_t)
    }
}
