use std::path::Path;

use image::{ImageReader, Rgb, RgbImage, imageops};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{GridBounds, Tile};

/// Fill for grid cells that never receive a tile.
pub const CANVAS_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Result of pasting a tile set onto one canvas
#[derive(Debug, Clone)]
pub struct Assembly {
    pub canvas: RgbImage,
    pub placed: usize,
    pub failed: usize,
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    // Numeric tile names carry no extension, so sniff the format from content.
    let mut reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.no_limits();
    Ok(reader)
}

/// Read only the header of a tile to learn the per-tile pixel size.
pub fn probe_tile_size(path: &Path) -> Result<(u32, u32)> {
    Ok(open_reader(path)?.into_dimensions()?)
}

pub fn load_tile(path: &Path) -> Result<RgbImage> {
    Ok(open_reader(path)?.decode()?.into_rgb8())
}

/// Native canvas size in pixels for the full grid extent.
///
/// Spans are measured in `u128`, so bounds reaching across the whole `i64`
/// range report `CanvasTooLarge` instead of overflowing.
pub fn canvas_dimensions(bounds: &GridBounds, tile_width: u32, tile_height: u32) -> Result<(u32, u32)> {
    let too_large = || Error::CanvasTooLarge {
        cols: bounds.columns(),
        rows: bounds.rows(),
        tile_width,
        tile_height,
    };

    let width = bounds
        .columns()
        .checked_mul(u128::from(tile_width))
        .and_then(|w| u32::try_from(w).ok())
        .ok_or_else(too_large)?;
    let height = bounds
        .rows()
        .checked_mul(u128::from(tile_height))
        .and_then(|h| u32::try_from(h).ok())
        .ok_or_else(too_large)?;

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(too_large)?;

    Ok((width, height))
}

/// Top-left pixel of a tile on the canvas. Rows are flipped so the highest `y`
/// lands on the first canvas row.
///
/// `None` when the offset does not fit a `u32`; never happens for a tile inside
/// bounds that passed [`canvas_dimensions`].
pub fn tile_origin(
    tile: &Tile,
    bounds: &GridBounds,
    tile_width: u32,
    tile_height: u32,
) -> Option<(u32, u32)> {
    let col = u128::try_from(i128::from(tile.x) - i128::from(bounds.min_x)).ok()?;
    let row = u128::try_from(i128::from(bounds.max_y) - i128::from(tile.y)).ok()?;
    let px = u32::try_from(col.checked_mul(u128::from(tile_width))?).ok()?;
    let py = u32::try_from(row.checked_mul(u128::from(tile_height))?).ok()?;
    Some((px, py))
}

/// Paste every tile onto a black canvas.
///
/// Tiles are written in the given order, so a later tile at a repeated coordinate
/// replaces an earlier one. A tile that fails to load is logged and left as a
/// black gap; the run continues.
pub fn assemble_canvas(
    tiles: &[Tile],
    bounds: &GridBounds,
    tile_width: u32,
    tile_height: u32,
    progress_every: usize,
) -> Result<Assembly> {
    let (full_w, full_h) = canvas_dimensions(bounds, tile_width, tile_height)?;

    info!("Allocating {}x{} canvas", full_w, full_h);
    let mut canvas = RgbImage::from_pixel(full_w, full_h, CANVAS_FILL);

    info!("Beginning assembly with Y-flip correction...");
    let total = tiles.len();
    let mut placed = 0usize;
    let mut failed = 0usize;

    for tile in tiles {
        let img = match load_tile(&tile.path) {
            Ok(img) => img,
            Err(e) => {
                warn!("Issue with file {:?}: {}", tile.path, e);
                failed += 1;
                continue;
            }
        };

        if img.dimensions() != (tile_width, tile_height) {
            warn!(
                "Tile {:?} is {}x{}, expected {}x{}",
                tile.path,
                img.width(),
                img.height(),
                tile_width,
                tile_height
            );
        }

        let Some((px, py)) = tile_origin(tile, bounds, tile_width, tile_height) else {
            warn!("Tile {:?} at ({}, {}) lies outside {}", tile.path, tile.x, tile.y, bounds);
            failed += 1;
            continue;
        };
        imageops::replace(&mut canvas, &img, i64::from(px), i64::from(py));

        placed += 1;
        if placed % progress_every == 0 {
            info!("Processed {}/{} tiles...", placed, total);
        }
    }

    Ok(Assembly {
        canvas,
        placed,
        failed,
    })
}
