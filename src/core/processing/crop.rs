//! Letterbox detection on a single sampled frame.
//!
//! Only the center row and center column are inspected, so logos or watermarks
//! sitting in the corners of the black bars never widen the detected picture area.
use image::RgbImage;
use ndarray::{Array2, ArrayView1};
use tracing::{debug, warn};

use crate::types::CropBox;

/// Gray level per pixel as the mean of its RGB channels, shaped `(rows, cols)`.
pub fn grayscale_mean(frame: &RgbImage) -> Array2<f32> {
    let (cols, rows) = frame.dimensions();
    Array2::from_shape_fn((rows as usize, cols as usize), |(r, c)| {
        let p = frame.get_pixel(c as u32, r as u32);
        (f32::from(p[0]) + f32::from(p[1]) + f32::from(p[2])) / 3.0
    })
}

/// First and last index whose value is strictly above `threshold`.
pub fn bright_span(values: ArrayView1<'_, f32>, threshold: f32) -> Option<(usize, usize)> {
    let first = values.iter().position(|&v| v > threshold)?;
    let last = values.iter().rposition(|&v| v > threshold)?;
    Some((first, last))
}

/// Derive a crop box from the center cross of a grayscale frame.
///
/// Returns `None` when either scan line has no pixel above `threshold`, or when the
/// inward padding leaves nothing to keep.
pub fn detect_crop_box(gray: &Array2<f32>, threshold: f32, padding: u32) -> Option<CropBox> {
    let (rows, cols) = gray.dim();
    if rows == 0 || cols == 0 {
        return None;
    }

    let center_row = gray.row(rows / 2);
    let center_col = gray.column(cols / 2);

    let (left, right) = bright_span(center_row, threshold)?;
    let (top, bottom) = bright_span(center_col, threshold)?;
    debug!(
        "Bright span: cols {}..={}, rows {}..={}",
        left, right, top, bottom
    );

    let pad = padding as usize;
    let top = (top + pad).min(rows - 1);
    let bottom = bottom.saturating_sub(pad);
    let left = (left + pad).min(cols - 1);
    let right = right.saturating_sub(pad);

    let crop = CropBox {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    };
    if crop.is_empty() {
        warn!("Detected picture area {} collapsed after padding", crop);
        return None;
    }
    Some(crop)
}

/// Timestamp of the frame used for detection.
pub fn sample_time(duration_sec: f64, fraction: f64) -> f64 {
    if duration_sec.is_finite() && duration_sec > 0.0 {
        duration_sec * fraction
    } else {
        0.0
    }
}
