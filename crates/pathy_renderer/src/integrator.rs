//! Whitted-style radiance estimator.
//!
//! Mirrors are traced recursively up to `max_depth` bounces. Diffuse
//! surfaces gather direct light from three sources: point lights, spherical
//! area lights (sampled over their visible cone) and the constant
//! environment light (sampled over the whole sphere of directions). There is
//! no indirect diffuse lighting.

use std::f32::consts::FRAC_1_PI;

use pathy_core::{Color, Scene};
use pathy_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::{Hittable, RAY_T};
use crate::renderer::RenderConfig;
use crate::sampling::{gen_f32, uniform_sphere_direction, VisibleSphere, UNIFORM_SPHERE_PDF};

/// Result of tracing one ray: its radiance and the number of rays traced to
/// compute it (the ray itself, shadow rays and mirror bounces).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radiance {
    pub color: Color,
    /// Rays actually traced. Shadow rays are only cast towards lights above
    /// the surface (cos θ > 0), and a black environment light is not sampled
    /// at all, so this can be lower than one shadow ray per light sample.
    pub rays: u64,
}

impl Radiance {
    fn new(color: Color, rays: u64) -> Self {
        Self { color, rays }
    }
}

/// Compute the radiance arriving along `ray`.
///
/// `depth` is the number of mirror bounces already taken; primary rays start
/// at 0. It is passed explicitly so that nothing about one pixel's recursion
/// is visible to any other.
pub fn radiance(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Radiance {
    let Some(rec) = scene.intersect_nearest(ray, RAY_T) else {
        return Radiance::new(scene.constant_light.radiance, 1);
    };

    if rec.material.is_mirror {
        if depth >= config.max_depth {
            return Radiance::new(Color::ZERO, 1);
        }

        let reflected = reflect(ray.direction(), rec.normal).normalize();
        let bounce = radiance(scene, &Ray::new(rec.p, reflected), depth + 1, config, rng);
        return Radiance::new(rec.material.base_color * bounce.color, 1 + bounce.rays);
    }

    let mut shading = DiffuseShading {
        scene,
        p: rec.p,
        normal: rec.normal,
        brdf: rec.material.base_color * FRAC_1_PI,
        result: Radiance::new(Color::ZERO, 1),
    };
    shading.point_lights();
    shading.sphere_lights(config.light_samples, rng);
    shading.environment(config.light_samples, rng);
    shading.result
}

/// Debug shading: map the surface normal to a color, black on a miss.
pub fn normal_shading(scene: &Scene, ray: &Ray) -> Radiance {
    let color = scene
        .intersect_nearest(ray, RAY_T)
        .map(|rec| (rec.normal + Vec3::ONE) * 0.5)
        .unwrap_or(Color::ZERO);
    Radiance::new(color, 1)
}

/// Direct lighting at a Lambertian surface point.
struct DiffuseShading<'a> {
    scene: &'a Scene,
    p: Vec3,
    normal: Vec3,
    /// albedo / π
    brdf: Color,
    result: Radiance,
}

impl DiffuseShading<'_> {
    /// Cosine factor for a unit direction towards a light, or `None` when
    /// the light is behind the surface.
    #[inline]
    fn cosine(&self, wi: Vec3) -> Option<f32> {
        let cos_theta = self.normal.dot(wi);
        (cos_theta > 0.0).then_some(cos_theta)
    }

    /// Cast a shadow ray; true if the light is visible.
    #[inline]
    fn visible(&mut self, wi: Vec3, distance: f32) -> bool {
        self.result.rays += 1;
        let shadow = Ray::new(self.p, wi);
        if distance.is_finite() {
            !self.scene.occluded(&shadow, distance)
        } else {
            !self.scene.intersect_any(&shadow)
        }
    }

    fn point_lights(&mut self) {
        let scene = self.scene;
        for light in &scene.point_lights {
            let to_light = light.position - self.p;
            let distance2 = to_light.length_squared();
            if distance2 <= 0.0 {
                continue;
            }
            let distance = distance2.sqrt();
            let wi = to_light / distance;

            let Some(cos_theta) = self.cosine(wi) else {
                continue;
            };
            if self.visible(wi, distance) {
                self.result.color += self.brdf * cos_theta * light.intensity / distance2;
            }
        }
    }

    fn sphere_lights(&mut self, samples: u32, rng: &mut dyn RngCore) {
        if samples == 0 {
            return;
        }

        let scene = self.scene;
        for light in &scene.sphere_lights {
            // Undefined from inside the light: it contributes nothing
            let Some(cone) = VisibleSphere::new(self.p, light.position, light.radius) else {
                continue;
            };

            let mut sum = Color::ZERO;
            for _ in 0..samples {
                let point = cone.sample(gen_f32(rng), gen_f32(rng));
                let to_point = point - self.p;
                let distance = to_point.length();
                let wi = to_point / distance;

                let Some(cos_theta) = self.cosine(wi) else {
                    continue;
                };
                if self.visible(wi, distance) {
                    sum += self.brdf * cos_theta * light.intensity / cone.pdf();
                }
            }
            self.result.color += sum / samples as f32;
        }
    }

    fn environment(&mut self, samples: u32, rng: &mut dyn RngCore) {
        let radiance = self.scene.constant_light.radiance;
        if samples == 0 || radiance == Color::ZERO {
            return;
        }

        let mut sum = Color::ZERO;
        for _ in 0..samples {
            let wi = uniform_sphere_direction(gen_f32(rng), gen_f32(rng));
            let Some(cos_theta) = self.cosine(wi) else {
                continue;
            };
            if self.visible(wi, f32::INFINITY) {
                sum += self.brdf * cos_theta * (radiance / UNIFORM_SPHERE_PDF);
            }
        }
        self.result.color += sum / samples as f32;
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathy_core::{Material, PointLight, Sphere, SphereLight};
    use pathy_math::is_normalized;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    fn down_from(height: f32) -> Ray {
        Ray::new(Vec3::new(0.0, height, 0.0), -Vec3::Y)
    }

    #[test]
    fn test_miss_returns_constant_light() {
        let scene = Scene::new("empty").with_constant_light(Color::new(0.1, 0.2, 0.3));
        let mut rng = StdRng::seed_from_u64(42);

        let result = radiance(&scene, &down_from(1.0), 0, &config(), &mut rng);
        assert_eq!(result.color, Color::new(0.1, 0.2, 0.3));
        assert_eq!(result.rays, 1);
    }

    #[test]
    fn test_point_light_matches_lambert() {
        let albedo = Color::new(0.8, 0.5, 0.2);
        let intensity = Color::splat(10.0);

        let mut scene = Scene::new("lambert");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::diffuse(albedo));
        scene.add_point_light(PointLight {
            position: Vec3::new(0.0, 5.0, 0.0),
            intensity,
        });

        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&scene, &down_from(3.0), 0, &config(), &mut rng);

        // Hit at the top of the sphere, 4 units below the light, cos θ = 1
        let expected = albedo / PI * intensity / 16.0;
        assert!(
            (result.color - expected).length() < 1e-4,
            "got {:?}, expected {:?}",
            result.color,
            expected
        );
        // Camera ray + one shadow ray
        assert_eq!(result.rays, 2);
    }

    #[test]
    fn test_point_light_is_shadowed() {
        let mut scene = Scene::new("shadow");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::default());
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 3.0, 0.0), 0.5), Material::default());
        scene.add_point_light(PointLight {
            position: Vec3::new(0.0, 5.0, 0.0),
            intensity: Color::ONE,
        });

        // Hits the lower sphere at its top, right under the blocker
        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&scene, &down_from(2.0), 0, &config(), &mut rng);
        assert_eq!(result.color, Color::ZERO);
        assert_eq!(result.rays, 2);
    }

    #[test]
    fn test_occluder_behind_light_does_not_shadow() {
        let mut scene = Scene::new("behind");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::default());
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 8.0, 0.0), 1.0), Material::default());
        scene.add_point_light(PointLight {
            position: Vec3::new(0.0, 5.0, 0.0),
            intensity: Color::ONE,
        });

        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&scene, &down_from(3.0), 0, &config(), &mut rng);
        assert!(result.color.x > 0.0);
    }

    #[test]
    fn test_light_behind_surface_casts_no_shadow_ray() {
        let mut scene = Scene::new("below");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::default());
        scene.add_point_light(PointLight {
            position: Vec3::new(0.0, -5.0, 0.0),
            intensity: Color::ONE,
        });

        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&scene, &down_from(3.0), 0, &config(), &mut rng);
        assert_eq!(result.color, Color::ZERO);
        assert_eq!(result.rays, 1);
    }

    #[test]
    fn test_mirror_depth_limit() {
        // A mirror facing the sky: one bounce sees the environment
        let sky = Color::new(0.5, 0.6, 0.7);
        let tint = Color::new(0.9, 0.8, 0.7);
        let mut scene = Scene::new("mirror").with_constant_light(sky);
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::mirror(tint));

        let mut rng = StdRng::seed_from_u64(42);
        let stopped = RenderConfig {
            max_depth: 0,
            ..config()
        };
        let result = radiance(&scene, &down_from(3.0), 0, &stopped, &mut rng);
        assert_eq!(result.color, Color::ZERO);
        assert_eq!(result.rays, 1);

        let result = radiance(&scene, &down_from(3.0), 0, &config(), &mut rng);
        assert!((result.color - tint * sky).length() < 1e-6);
        assert_eq!(result.rays, 2);
    }

    #[test]
    fn test_mirror_energy_is_monotonic_and_bounded() {
        // Two facing mirrors under a white sky
        let sky = Color::ONE;
        let mut scene = Scene::new("mirrors").with_constant_light(sky);
        scene.add_sphere(
            Sphere::new(Vec3::new(-1.1, 0.0, 0.0), 1.0),
            Material::mirror(Color::splat(0.9)),
        );
        scene.add_sphere(
            Sphere::new(Vec3::new(1.1, 0.0, 0.0), 1.0),
            Material::mirror(Color::new(0.5, 0.7, 1.0)),
        );

        let rays = [
            Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(-0.15, 0.0, -1.0).normalize()),
            Ray::new(Vec3::new(0.0, 0.3, 5.0), Vec3::new(0.18, -0.05, -1.0).normalize()),
            Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.21, 0.01, -1.0).normalize()),
        ];

        let mut rng = StdRng::seed_from_u64(42);
        for ray in rays {
            let mut previous = Color::ZERO;
            for max_depth in 0..6 {
                let config = RenderConfig {
                    max_depth,
                    ..RenderConfig::default()
                };
                let color = radiance(&scene, &ray, 0, &config, &mut rng).color;

                assert!(color.cmpge(previous - Vec3::splat(1e-6)).all());
                assert!(color.cmple(sky + Vec3::splat(1e-6)).all());
                previous = color;
            }
        }
    }

    #[test]
    fn test_reflected_rays_are_normalized() {
        let n = Vec3::new(0.3, 0.9, -0.1).normalize();
        let v = Vec3::new(-0.5, -0.7, 0.2).normalize();
        assert!(is_normalized(reflect(v, n)));
        // Angle of incidence equals angle of reflection
        assert!(((-v).dot(n) - reflect(v, n).dot(n)).abs() < 1e-6);
    }

    #[test]
    fn test_inside_area_light_contributes_nothing() {
        let mut scene = Scene::new("inside");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::diffuse(Color::ONE));
        scene.add_sphere_light(SphereLight {
            position: Vec3::new(0.0, 1.0, 0.0),
            radius: 2.0,
            intensity: Color::splat(100.0),
        });

        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&scene, &down_from(3.5), 0, &config(), &mut rng);
        assert_eq!(result.color, Color::ZERO);
        assert!(result.color.is_finite());
        assert_eq!(result.rays, 1);
    }

    #[test]
    fn test_area_light_converges_to_closed_form() {
        // A unit sphere light straight above the top of a diffuse sphere, θmax = 30°.
        // Irradiance from a uniform spherical emitter: E = L · π · sin²θmax.
        let albedo = Color::splat(0.75);
        let intensity = Color::splat(2.0);
        let mut scene = Scene::new("area");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::diffuse(albedo));
        scene.add_sphere_light(SphereLight {
            position: Vec3::new(0.0, 3.0, 0.0),
            radius: 1.0,
            intensity,
        });

        let sin_theta_max = 0.5_f32;
        let expected = albedo / PI * intensity * PI * sin_theta_max * sin_theta_max;

        let ray = down_from(1.5);
        let mut errors = Vec::new();
        for light_samples in [4, 64, 4096] {
            let config = RenderConfig {
                light_samples,
                ..RenderConfig::default()
            };
            // Average several estimates to reduce noise in the comparison
            let mut rng = StdRng::seed_from_u64(1234);
            let trials = 16;
            let mut mean = Color::ZERO;
            for _ in 0..trials {
                mean += radiance(&scene, &ray, 0, &config, &mut rng).color;
            }
            mean /= trials as f32;
            errors.push(((mean.x - expected.x) / expected.x).abs());
        }

        assert!(errors[2] < 0.01, "relative error {errors:?}");
        assert!(errors[2] <= errors[0] + 1e-3, "relative error {errors:?}");
    }

    #[test]
    fn test_small_area_light_is_not_biased() {
        // Lights subtending a tiny angle: E = L · π · sin²θmax with sin θmax ≤ 1e-3
        let albedo = Color::splat(0.5);
        let intensity = Color::splat(1.0e6);
        let config = RenderConfig {
            light_samples: 256,
            ..RenderConfig::default()
        };

        for radius in [1.0e-2, 3.0e-3, 1.0e-3, 1.0e-4] {
            let mut scene = Scene::new("small light");
            scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::diffuse(albedo));
            scene.add_sphere_light(SphereLight {
                position: Vec3::new(0.0, 11.0, 0.0),
                radius,
                intensity,
            });

            let sin_theta_max = radius / 10.0;
            let expected = albedo.x * intensity.x * sin_theta_max * sin_theta_max;

            let mut rng = StdRng::seed_from_u64(5);
            let result = radiance(&scene, &down_from(3.0), 0, &config, &mut rng);
            let error = ((result.color.x - expected) / expected).abs();
            assert!(error < 1e-3, "radius={radius} got {} expected {expected}", result.color.x);
        }
    }

    #[test]
    fn test_environment_on_unoccluded_hemisphere() {
        // The top of a lone sphere sees the whole upper hemisphere of a
        // constant sky: radiance out = albedo · L
        let albedo = Color::splat(0.5);
        let sky = Color::splat(1.0);
        let mut scene = Scene::new("sky").with_constant_light(sky);
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::diffuse(albedo));

        let config = RenderConfig {
            light_samples: 16384,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        let result = radiance(&scene, &down_from(3.0), 0, &config, &mut rng);

        assert!(
            ((result.color.x - 0.5) / 0.5).abs() < 0.05,
            "got {:?}",
            result.color
        );
    }

    #[test]
    fn test_normal_shading() {
        let mut scene = Scene::new("normals");
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0), Material::default());

        let hit = normal_shading(&scene, &down_from(3.0));
        assert!((hit.color - Color::new(0.5, 1.0, 0.5)).length() < 1e-5);

        let miss = normal_shading(&scene, &Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::Y));
        assert_eq!(miss.color, Color::ZERO);
        assert_eq!(miss.rays, 1);
    }
}
