use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ResizeFilter;

/// Default LOD folder (0 is max detail).
pub const DEFAULT_LOD: &str = "1";
/// Browsers refuse images above this many pixels per side.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;
pub const DEFAULT_JPEG_QUALITY: u8 = 92;
pub const DEFAULT_PROGRESS_EVERY: usize = 200;

pub const DEFAULT_VIDEO_INPUT: &str = "my_video.mp4";
pub const DEFAULT_GIF_OUTPUT: &str = "final_loop.gif";
pub const DEFAULT_GIF_FPS: u32 = 15;
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 25.0;
pub const DEFAULT_CROP_PADDING: u32 = 2;
/// Sample 30% into the clip to get past black intro frames.
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.3;
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Tile merge parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeParams {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    /// LOD label; only used for naming and logging
    pub lod: String,
    /// Canvas sides above this are resized to exactly `max_dimension` square
    pub max_dimension: u32,
    pub quality: u8,
    pub filter: ResizeFilter,
    /// Log a progress line every N placed tiles
    pub progress_every: usize,
    /// Write a `<output>.json` merge summary next to the image
    pub sidecar: bool,
}

impl MergeParams {
    pub fn for_lod(lod: &str) -> Self {
        Self {
            input_dir: default_lod_dir(lod),
            output: default_merge_output(lod),
            lod: lod.to_string(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_JPEG_QUALITY,
            filter: ResizeFilter::Lanczos3,
            progress_every: DEFAULT_PROGRESS_EVERY,
            sidecar: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(Error::invalid("max_dimension", self.max_dimension));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::invalid("quality", self.quality));
        }
        if self.progress_every == 0 {
            return Err(Error::invalid("progress_every", self.progress_every));
        }
        Ok(())
    }
}

impl Default for MergeParams {
    fn default() -> Self {
        Self::for_lod(DEFAULT_LOD)
    }
}

pub fn default_lod_dir(lod: &str) -> PathBuf {
    ["Web", "Anizay", "LODS", lod].iter().collect()
}

pub fn default_merge_output(lod: &str) -> PathBuf {
    PathBuf::from(format!("Anizay_Map_LOD{lod}_FLIPPED.jpg"))
}

/// Video-to-GIF parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub fps: u32,
    /// Gray level a pixel must exceed to count as picture content
    pub threshold: f32,
    /// Pixels trimmed inward from each detected edge
    pub padding: u32,
    /// Position of the sampled frame as a fraction of clip duration, in `[0, 1)`.
    /// `1.0` would seek past the last frame.
    pub sample_fraction: f64,
    /// GIF quantizer speed, 1 (best) to 30 (fastest)
    pub speed: i32,
}

impl GifParams {
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::invalid("fps", self.fps));
        }
        if !(0.0..1.0).contains(&self.sample_fraction) {
            return Err(Error::invalid("sample_fraction", self.sample_fraction));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(Error::invalid("speed", self.speed));
        }
        if !self.threshold.is_finite() {
            return Err(Error::invalid("threshold", self.threshold));
        }
        Ok(())
    }
}

impl Default for GifParams {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_VIDEO_INPUT),
            output: PathBuf::from(DEFAULT_GIF_OUTPUT),
            fps: DEFAULT_GIF_FPS,
            threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            padding: DEFAULT_CROP_PADDING,
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            speed: DEFAULT_GIF_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lod_defaults_follow_naming_convention() {
        let p = MergeParams::for_lod("3");
        assert_eq!(p.input_dir, PathBuf::from("Web/Anizay/LODS/3"));
        assert_eq!(p.output, PathBuf::from("Anizay_Map_LOD3_FLIPPED.jpg"));
        assert_eq!(p.max_dimension, 16384);
        assert_eq!(p.quality, 92);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn merge_validation_rejects_bad_values() {
        let mut p = MergeParams::default();
        p.quality = 0;
        assert!(p.validate().is_err());

        let mut p = MergeParams::default();
        p.max_dimension = 0;
        assert!(p.validate().is_err());

        let mut p = MergeParams::default();
        p.progress_every = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn gif_validation_rejects_bad_values() {
        assert!(GifParams::default().validate().is_ok());

        let mut p = GifParams::default();
        p.fps = 0;
        assert!(p.validate().is_err());

        let mut p = GifParams::default();
        p.sample_fraction = 1.5;
        assert!(p.validate().is_err());

        let mut p = GifParams::default();
        p.sample_fraction = 1.0;
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidArgument {
                arg: "sample_fraction",
                ..
            })
        ));

        let mut p = GifParams::default();
        p.sample_fraction = 0.0;
        assert!(p.validate().is_ok());

        let mut p = GifParams::default();
        p.speed = 31;
        assert!(p.validate().is_err());
    }

    #[test]
    fn params_round_trip_through_json() {
        let p = GifParams::default();
        let json = serde_json::to_string(&p).unwrap();
        let back: GifParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
