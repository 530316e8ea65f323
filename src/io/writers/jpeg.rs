use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;

use crate::error::{Error, Result};

/// Baseline JPEG with optimized Huffman tables.
pub fn write_rgb_jpeg(output: &Path, img: &RgbImage, quality: u8) -> Result<()> {
    let (cols, rows) = img.dimensions();
    let cols = u16::try_from(cols).map_err(|_| Error::invalid("jpeg width", cols))?;
    let rows = u16::try_from(rows).map_err(|_| Error::invalid("jpeg height", rows))?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = Encoder::new(&mut writer, quality);
    encoder.set_optimized_huffman_tables(true);
    encoder.encode(img.as_raw(), cols, rows, ColorType::Rgb)?;
    Ok(())
}
