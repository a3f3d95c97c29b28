//! Scene description types for Pathy.
//!
//! A scene is plain owned data: built once (usually by the loader), then
//! shared read-only by every render worker.

use pathy_math::Vec3;

/// Color type alias (linear RGB, components typically 0-1)
pub type Color = Vec3;

/// A sphere primitive with cached derived values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    radius2: f32,
    inverse_radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// A zero radius is tolerated (the sphere is never hit); negative radii
    /// are a caller error.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "sphere radius must not be negative: {radius}");
        let inverse_radius = if radius > 0.0 { 1.0 / radius } else { 0.0 };
        Self {
            center,
            radius,
            radius2: radius * radius,
            inverse_radius,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// radius²
    #[inline]
    pub fn radius2(&self) -> f32 {
        self.radius2
    }

    /// 1 / radius, or 0 for a degenerate sphere.
    #[inline]
    pub fn inverse_radius(&self) -> f32 {
        self.inverse_radius
    }

    /// True if the sphere has no surface (radius ≤ 0) and is never hit.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }
}

/// Surface response: ideal mirror or Lambertian diffuse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Albedo for diffuse surfaces, reflectance for mirrors
    pub base_color: Color,

    /// Mirror (true) or Lambertian diffuse (false)
    pub is_mirror: bool,
}

impl Material {
    /// Create a Lambertian material.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            base_color: albedo,
            is_mirror: false,
        }
    }

    /// Create a perfect mirror tinted by `reflectance`.
    pub fn mirror(reflectance: Color) -> Self {
        Self {
            base_color: reflectance,
            is_mirror: true,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5)) // Grey default
    }
}

/// A sphere together with the material it is shaded with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub sphere: Sphere,
    pub material: Material,
}

impl SceneObject {
    pub fn new(sphere: Sphere, material: Material) -> Self {
        Self { sphere, material }
    }
}

/// An isotropic point emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,

    /// Radiant intensity (W/sr) per channel
    pub intensity: Color,
}

/// A spherical area emitter, sampled over its visible cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereLight {
    pub position: Vec3,
    pub radius: f32,

    /// Emitted radiance per channel
    pub intensity: Color,
}

/// Uniform environment illumination arriving from every direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantLight {
    pub radiance: Color,
}

/// Viewpoint of the render.
///
/// Defaults place the eye at (0, 2, 3) looking at the origin with a 60°
/// vertical field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,

    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 128.0,
        }
    }
}

/// A complete scene: geometry with materials, lights, and the camera.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Spheres paired with their materials
    pub objects: Vec<SceneObject>,

    pub point_lights: Vec<PointLight>,

    pub sphere_lights: Vec<SphereLight>,

    /// The environment light; black unless set
    pub constant_light: ConstantLight,

    pub camera: CameraSettings,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a sphere with its material and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere, material: Material) -> usize {
        let id = self.objects.len();
        self.objects.push(SceneObject::new(sphere, material));
        id
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_sphere_light(&mut self, light: SphereLight) {
        self.sphere_lights.push(light);
    }

    /// Builder-style setter for the environment light.
    pub fn with_constant_light(mut self, radiance: Color) -> Self {
        self.constant_light = ConstantLight { radiance };
        self
    }

    /// Builder-style setter for the camera.
    pub fn with_camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    /// Get an object by index.
    pub fn object(&self, id: usize) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Total number of emitters, including the environment light.
    pub fn light_count(&self) -> usize {
        self.point_lights.len() + self.sphere_lights.len() + 1
    }
}
