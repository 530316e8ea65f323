use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tilereel::ResizeFilter;
use tilereel::core::params::{
    DEFAULT_BRIGHTNESS_THRESHOLD, DEFAULT_CROP_PADDING, DEFAULT_GIF_FPS, DEFAULT_GIF_OUTPUT,
    DEFAULT_GIF_SPEED, DEFAULT_JPEG_QUALITY, DEFAULT_LOD, DEFAULT_MAX_DIMENSION,
    DEFAULT_SAMPLE_FRACTION, DEFAULT_VIDEO_INPUT,
};

#[derive(Parser)]
#[command(name = "tilereel", version, about = "tilereel CLI")]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Stitch an LOD tile tree into one Y-flipped JPEG
    Merge(MergeArgs),
    /// Convert a video into a looping GIF, cropping away black bars
    Gif(GifArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// LOD folder to process (0 for max detail, 1, 2, etc.)
    #[arg(long, default_value = DEFAULT_LOD)]
    pub lod: String,

    /// Tile tree root (default: Web/Anizay/LODS/<lod>)
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output JPEG (default: Anizay_Map_LOD<lod>_FLIPPED.jpg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Resize to an exact square of this size when either side is larger
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_dimension: u32,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Resampling filter used when resizing
    #[arg(long, value_enum, default_value_t = ResizeFilter::Lanczos3)]
    pub filter: ResizeFilter,

    /// Also write a JSON summary next to the output image
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,
}

#[derive(Args)]
pub struct GifArgs {
    /// Input video
    #[arg(short, long, default_value = DEFAULT_VIDEO_INPUT)]
    pub input: PathBuf,

    /// Output GIF
    #[arg(short, long, default_value = DEFAULT_GIF_OUTPUT)]
    pub output: PathBuf,

    /// Output frame rate
    #[arg(long, default_value_t = DEFAULT_GIF_FPS)]
    pub fps: u32,

    /// Gray level (0-255) a pixel must exceed to count as picture
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS_THRESHOLD)]
    pub threshold: f32,

    /// Pixels trimmed inward from each detected edge
    #[arg(long, default_value_t = DEFAULT_CROP_PADDING)]
    pub padding: u32,

    /// Where to sample the detection frame, as a fraction of the clip duration in [0, 1)
    #[arg(long = "sample-at", default_value_t = DEFAULT_SAMPLE_FRACTION)]
    pub sample_fraction: f64,

    /// GIF quantizer speed: 1 (best quality) to 30 (fastest)
    #[arg(long, default_value_t = DEFAULT_GIF_SPEED)]
    pub speed: i32,
}
