//! Row buckets for parallel rendering.
//!
//! The image is split into horizontal bands of whole rows. Each bucket owns
//! its rows of the pixel buffer exclusively, so buckets can be rendered in
//! parallel without synchronization.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::image::BYTES_PER_PIXEL;
use crate::integrator::{normal_shading, radiance};
use crate::renderer::{RenderContext, RenderMode};
use crate::tonemap::color_to_bgr;

/// A band of consecutive image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First row of the bucket
    pub y: usize,
    /// Number of rows in the bucket
    pub height: usize,
    /// Index of this bucket, top of the buffer first
    pub index: usize,
}

impl Bucket {
    pub fn new(y: usize, height: usize, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Rows covered by this bucket.
    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    /// Seed for this bucket's generator.
    ///
    /// Depends only on the base seed and the first row, so the image does
    /// not change with the number of worker threads.
    pub fn seed(&self, base: u64) -> u64 {
        base.wrapping_add(self.y as u64)
    }
}

/// Split `image_height` rows into buckets of `rows_per_bucket` rows each.
/// The last bucket takes whatever rows remain.
pub fn generate_buckets(image_height: usize, rows_per_bucket: usize) -> Vec<Bucket> {
    assert!(rows_per_bucket > 0, "rows_per_bucket must be at least 1");

    (0..image_height)
        .step_by(rows_per_bucket)
        .enumerate()
        .map(|(index, y)| Bucket::new(y, rows_per_bucket.min(image_height - y), index))
        .collect()
}

/// Render every pixel of a bucket into `pixels`, the bucket's slice of the
/// image buffer. Returns the number of rays traced.
pub(crate) fn render_bucket(bucket: &Bucket, pixels: &mut [u8], ctx: &RenderContext<'_>) -> u64 {
    debug_assert!(pixels.len() >= (bucket.height - 1) * ctx.pitch + ctx.width * BYTES_PER_PIXEL);

    let mut rng = StdRng::seed_from_u64(bucket.seed(ctx.config.seed));
    let mut rays = 0;

    for (local_y, y) in bucket.rows().enumerate() {
        let row = &mut pixels[local_y * ctx.pitch..];
        let v = y as f32 / ctx.height as f32;

        for x in 0..ctx.width {
            let ray = ctx.camera.create_ray(x as f32 / ctx.width as f32, v);
            let result = match ctx.config.mode {
                RenderMode::Whitted => radiance(ctx.scene, &ray, 0, ctx.config, &mut rng),
                RenderMode::Normals => normal_shading(ctx.scene, &ray),
            };
            rays += result.rays;

            let offset = x * BYTES_PER_PIXEL;
            row[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color_to_bgr(result.color));
        }
    }

    rays
}
