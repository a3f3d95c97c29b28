use std::path::PathBuf;

use clap::Parser;
use pathy_renderer::{RenderConfig, RenderMode};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "pathy")]
#[command(about = "A small Whitted-style ray tracer for sphere scenes")]
pub struct Args {
    /// Scene file to render
    #[arg(long, default_value = "scenes/aras.json")]
    pub scene: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "pathy.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Worker threads (0 = one per hardware thread)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Samples per area light and for the environment light
    #[arg(short, long, default_value_t = 32)]
    pub samples: u32,

    /// Maximum number of mirror bounces
    #[arg(long, default_value_t = 2)]
    pub max_depth: u32,

    /// Image rows per unit of parallel work
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub rows_per_bucket: u64,

    /// Base seed for light sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Shade by surface normal instead of lighting
    #[arg(long)]
    pub normals: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.max_depth,
            light_samples: self.samples,
            threads: self.threads,
            rows_per_bucket: self.rows_per_bucket as usize,
            seed: self.seed,
            mode: if self.normals {
                RenderMode::Normals
            } else {
                RenderMode::Whitted
            },
        }
    }
}
