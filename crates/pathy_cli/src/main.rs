//! Pathy command line renderer.
//!
//! Loads a scene file, renders it on all cores and writes the image to disk.

mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pathy_renderer::{render_with_config, Image};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    log::info!("Starting Pathy");

    let scene = pathy_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let config = args.render_config();
    let mut image = Image::new(args.width as usize, args.height as usize);
    let mut ray_count = 0;

    log::info!(
        "Rendering {}x{} with {} light samples, max depth {}",
        image.width(),
        image.height(),
        config.light_samples,
        config.max_depth
    );

    let start = Instant::now();
    render_with_config(&scene, &mut image, &config, &mut ray_count);
    let seconds = start.elapsed().as_secs_f64();

    log::info!(
        "completed in {:.2} seconds ({:.2} million rays/second)",
        seconds,
        ray_count as f64 / seconds.max(f64::EPSILON) / 1.0e6
    );

    save(&image, &args)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

/// Write the render to disk, top row first, in RGB order.
fn save(frame: &Image, args: &Args) -> Result<()> {
    let rgb = image::RgbImage::from_raw(args.width, args.height, frame.to_rgb_top_down())
        .context("Pixel buffer does not match the image size")?;
    rgb.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(())
}
