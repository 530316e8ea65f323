//! High-level, ergonomic library API: merge a tile tree into one image (to a file
//! or in memory) and turn a letterboxed video into a looping GIF. Prefer these
//! entrypoints over the low-level processing modules when integrating tilereel.
use std::path::Path;

use image::RgbImage;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::params::{GifParams, MergeParams};
use crate::core::processing::assemble::{assemble_canvas, canvas_dimensions, probe_tile_size};
use crate::core::processing::crop::{detect_crop_box, grayscale_mean, sample_time};
use crate::core::processing::locate::locate_tiles;
use crate::core::processing::resize::fit_to_limit;
use crate::error::{Error, Result};
use crate::io::video::{FrameStream, decode_frame_rgb, probe_video};
use crate::io::writers::gif::LoopingGifWriter;
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::io::writers::metadata::write_merge_sidecar;
use crate::types::{CropBox, GridBounds};

/// Summary of one tile merge
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub bounds: GridBounds,
    pub tile_width: u32,
    pub tile_height: u32,
    pub native_width: u32,
    pub native_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub resized: bool,
    pub tiles_found: usize,
    pub tiles_placed: usize,
    pub tiles_failed: usize,
}

/// Summary of one video-to-GIF conversion
#[derive(Debug, Clone, Serialize)]
pub struct GifReport {
    pub source_width: u32,
    pub source_height: u32,
    pub source_fps: f64,
    pub sample_time_sec: f64,
    pub crop: Option<CropBox>,
    pub output_width: u32,
    pub output_height: u32,
    pub frames: u64,
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Locate, assemble and resize a tile tree without touching the output path
pub fn merge_tiles_to_buffer(params: &MergeParams) -> Result<(RgbImage, MergeReport)> {
    params.validate()?;
    info!("--- LOD {} merge with Y-flip correction ---", params.lod);

    let tiles = locate_tiles(&params.input_dir)?;
    let bounds = GridBounds::from_tiles(&tiles).ok_or_else(|| Error::NoTiles {
        path: params.input_dir.clone(),
    })?;

    let (tile_width, tile_height) = probe_tile_size(&tiles[0].path)?;
    let (native_width, native_height) = canvas_dimensions(&bounds, tile_width, tile_height)?;

    info!("Grid detected: {}", bounds);
    info!(
        "Native total resolution: {} x {} pixels",
        native_width, native_height
    );

    let assembly = assemble_canvas(
        &tiles,
        &bounds,
        tile_width,
        tile_height,
        params.progress_every,
    )?;
    if assembly.failed > 0 {
        warn!(
            "{} of {} tiles could not be placed",
            assembly.failed,
            tiles.len()
        );
    }

    let canvas = fit_to_limit(assembly.canvas, params.max_dimension, params.filter)?;
    let (output_width, output_height) = canvas.dimensions();

    let report = MergeReport {
        bounds,
        tile_width,
        tile_height,
        native_width,
        native_height,
        output_width,
        output_height,
        resized: (output_width, output_height) != (native_width, native_height),
        tiles_found: tiles.len(),
        tiles_placed: assembly.placed,
        tiles_failed: assembly.failed,
    };
    Ok((canvas, report))
}

/// Full merge pipeline ending in a JPEG (and optional JSON sidecar) on disk
pub fn merge_tiles_to_path(params: &MergeParams) -> Result<MergeReport> {
    let (canvas, report) = merge_tiles_to_buffer(params)?;

    info!("Saving final file: {:?}", params.output);
    ensure_parent_dir(&params.output)?;
    write_rgb_jpeg(&params.output, &canvas, params.quality)?;

    if params.sidecar {
        write_merge_sidecar(&params.output, &report, params)?;
    }

    info!("Map ready: {:?}", params.output);
    Ok(report)
}

/// Detect letterboxing on one sampled frame, crop the whole clip to the picture
/// area, and encode it as an endlessly looping GIF
pub fn make_gif(params: &GifParams) -> Result<GifReport> {
    params.validate()?;

    info!("Loading video {:?}", params.input);
    let info = probe_video(&params.input)?;
    info!(
        "Source {}x{} @ {:.2} fps, {:.2}s",
        info.width,
        info.height,
        info.source_fps(),
        info.duration_sec
    );

    let t = sample_time(info.duration_sec, params.sample_fraction);
    let frame = decode_frame_rgb(&info, t)?;
    let gray = grayscale_mean(&frame);

    let crop = detect_crop_box(&gray, params.threshold, params.padding);
    match &crop {
        Some(c) => info!("Smart crop applied (ignoring corners): {}", c),
        None => info!("No black bars detected."),
    }

    info!("Converting to GIF. This might take a moment depending on the video length...");
    let mut stream = FrameStream::spawn(&info, crop.as_ref(), params.fps)?;
    let (output_width, output_height) = stream.dimensions();

    ensure_parent_dir(&params.output)?;
    let mut gif = LoopingGifWriter::create(
        &params.output,
        output_width,
        output_height,
        params.fps,
        params.speed,
    )?;
    for frame in stream.by_ref() {
        gif.write_frame(frame?)?;
    }
    let frames_decoded = stream.frames_read();
    stream.finish()?;

    if frames_decoded == 0 {
        return Err(Error::Video(format!(
            "no frames decoded from '{}'",
            params.input.display()
        )));
    }

    info!(
        "Success! Saved {} frames as {:?}",
        frames_decoded, params.output
    );
    Ok(GifReport {
        source_width: info.width,
        source_height: info.height,
        source_fps: info.source_fps(),
        sample_time_sec: t,
        crop,
        output_width,
        output_height,
        frames: gif.frames_written(),
    })
}
