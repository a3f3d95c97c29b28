//! Pathy renderer - CPU Whitted-style ray tracing
//!
//! Renders a [`Scene`](pathy_core::Scene) of spheres into an 8-bit BGR
//! [`Image`]. Mirrors are followed recursively; diffuse surfaces sample point
//! lights, spherical area lights and a constant environment light directly.
//! Rows are rendered in parallel on a rayon thread pool.

mod bucket;
mod camera;
mod hittable;
mod image;
mod integrator;
mod renderer;
mod sampling;
mod tonemap;

pub use bucket::{generate_buckets, Bucket};
pub use camera::Camera;
pub use hittable::{hit_sphere, HitRecord, Hittable, RAY_T, T_MIN};
pub use image::{Image, BYTES_PER_PIXEL};
pub use integrator::{normal_shading, radiance, Radiance};
pub use renderer::{render, render_with_config, RenderConfig, RenderMode};
pub use sampling::{gen_f32, uniform_sphere_direction, VisibleSphere, UNIFORM_SPHERE_PDF};
pub use tonemap::{color_to_bgr, linear_to_srgb, quantize};

/// Re-export the scene types the renderer consumes
pub use pathy_core::{Color, Scene};
