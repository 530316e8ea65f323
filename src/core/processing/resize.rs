use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::ResizeFilter;

pub fn exceeds_limit(cols: u32, rows: u32, max_dimension: u32) -> bool {
    cols > max_dimension || rows > max_dimension
}

fn resize_alg(filter: ResizeFilter) -> ResizeAlg {
    match filter {
        ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResizeFilter::Nearest => ResizeAlg::Nearest,
    }
}

pub fn resize_rgb_image(
    img: RgbImage,
    target_cols: u32,
    target_rows: u32,
    filter: ResizeFilter,
) -> Result<RgbImage> {
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let (cols, rows) = img.dimensions();
    let src_image = Image::from_vec_u8(cols, rows, img.into_raw(), PixelType::U8x3)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer.resize(&src_image, &mut dst_image, &resize_options)?;

    RgbImage::from_raw(target_cols, target_rows, dst_image.into_vec()).ok_or_else(|| {
        Error::Processing(format!(
            "resized buffer does not match {}x{} RGB",
            target_cols, target_rows
        ))
    })
}

/// Shrink a canvas whose width or height exceeds `max_dimension` to exactly
/// `max_dimension` x `max_dimension`. Aspect ratio is not preserved.
pub fn fit_to_limit(canvas: RgbImage, max_dimension: u32, filter: ResizeFilter) -> Result<RgbImage> {
    let (cols, rows) = canvas.dimensions();
    if !exceeds_limit(cols, rows, max_dimension) {
        return Ok(canvas);
    }

    info!(
        "Resizing {}x{} to {}x{} ({})",
        cols, rows, max_dimension, max_dimension, filter
    );
    resize_rgb_image(canvas, max_dimension, max_dimension, filter)
}
