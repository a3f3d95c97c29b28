//! Parallel render dispatch.
//!
//! A render is a single fork-join: the image is split into row buckets,
//! every bucket is rendered on a rayon worker pool, and the call returns
//! once all of them are done.

use std::num::NonZeroUsize;
use std::thread;

use pathy_core::Scene;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket};
use crate::camera::Camera;
use crate::image::Image;

/// What the renderer computes per pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Mirror recursion plus direct lighting
    #[default]
    Whitted,
    /// Surface normals mapped to colors, for debugging geometry
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of mirror bounces
    pub max_depth: u32,
    /// Samples per area light, and for the environment light
    pub light_samples: u32,
    /// Worker threads; 0 uses the available hardware concurrency
    pub threads: usize,
    /// Rows per unit of parallel work
    pub rows_per_bucket: usize,
    /// Base seed for the per-bucket generators
    pub seed: u64,
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            light_samples: 32,
            threads: 0,
            rows_per_bucket: 1,
            seed: 0,
            mode: RenderMode::Whitted,
        }
    }
}

impl RenderConfig {
    /// Number of workers to render with, at least 1.
    pub fn worker_count(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Read-only state shared by every bucket of a render.
pub(crate) struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: Camera,
    pub config: &'a RenderConfig,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

/// Render `scene` into every pixel of `image` with the default configuration.
///
/// Blocks until the whole image is done, then adds the number of traced rays
/// to `ray_count`.
pub fn render(scene: &Scene, image: &mut Image, ray_count: &mut u64) {
    render_with_config(scene, image, &RenderConfig::default(), ray_count);
}

/// Render `scene` into every pixel of `image`.
///
/// Blocks until the whole image is done, then adds the number of traced rays
/// to `ray_count`.
pub fn render_with_config(
    scene: &Scene,
    image: &mut Image,
    config: &RenderConfig,
    ray_count: &mut u64,
) {
    if image.is_empty() {
        log::debug!("Nothing to render for an empty image");
        return;
    }

    let ctx = RenderContext {
        scene,
        camera: Camera::new(&scene.camera, image.aspect_ratio()),
        config,
        width: image.width(),
        height: image.height(),
        pitch: image.pitch(),
    };
    // A bucket never needs more rows than the image has
    let rows_per_bucket = config.rows_per_bucket.min(ctx.height);
    let buckets = generate_buckets(ctx.height, rows_per_bucket);
    let chunk_size = ctx.pitch * rows_per_bucket;
    let workers = config.worker_count();

    log::debug!(
        "Rendering '{}' at {}x{}: {} buckets on {} threads",
        scene.name,
        ctx.width,
        ctx.height,
        buckets.len(),
        workers
    );

    let pixels = image.as_bytes_mut();
    let mut dispatch = || -> u64 {
        pixels
            .par_chunks_mut(chunk_size)
            .zip(buckets.par_iter())
            .map(|(chunk, bucket)| render_bucket(bucket, chunk, &ctx))
            .sum()
    };

    let rays = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(dispatch),
        Err(err) => {
            log::warn!("Failed to build a {workers}-thread pool ({err}), using the global pool");
            dispatch()
        }
    };

    *ray_count += rays;
}
