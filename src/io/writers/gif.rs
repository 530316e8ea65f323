use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};

use crate::error::{Error, Result};

/// Animated GIF that loops forever with a constant frame delay.
pub struct LoopingGifWriter {
    encoder: GifEncoder<BufWriter<File>>,
    delay: Delay,
    dimensions: (u32, u32),
    frames_written: u64,
}

impl LoopingGifWriter {
    pub fn create(output: &Path, width: u32, height: u32, fps: u32, speed: i32) -> Result<Self> {
        if fps == 0 {
            return Err(Error::invalid("fps", fps));
        }
        if width == 0 || width > u32::from(u16::MAX) {
            return Err(Error::invalid("gif width", width));
        }
        if height == 0 || height > u32::from(u16::MAX) {
            return Err(Error::invalid("gif height", height));
        }

        let file = File::create(output)?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), speed);
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            delay: Delay::from_numer_denom_ms(1000, fps),
            dimensions: (width, height),
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, frame: RgbImage) -> Result<()> {
        if frame.dimensions() != self.dimensions {
            return Err(Error::Processing(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.dimensions.0,
                self.dimensions.1
            )));
        }
        let rgba = DynamicImage::ImageRgb8(frame).into_rgba8();
        self.encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use image::Rgb;
    use image::codecs::gif::GifDecoder;
    use std::io::BufReader;

    #[test]
    fn frames_are_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.gif");

        let mut gif = LoopingGifWriter::create(&path, 8, 6, 10, 10).unwrap();
        gif.write_frame(RgbImage::from_pixel(8, 6, Rgb([255, 0, 0])))
            .unwrap();
        gif.write_frame(RgbImage::from_pixel(8, 6, Rgb([0, 0, 255])))
            .unwrap();
        assert_eq!(gif.frames_written(), 2);
        drop(gif);

        let decoder = GifDecoder::new(BufReader::new(File::open(&path).unwrap())).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].buffer().dimensions(), (8, 6));
        let first = frames[0].buffer().get_pixel(4, 3);
        assert!(first[0] > 200 && first[2] < 50);
    }

    #[test]
    fn mismatched_frame_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut gif = LoopingGifWriter::create(&dir.path().join("x.gif"), 4, 4, 15, 10).unwrap();
        assert!(gif.write_frame(RgbImage::new(5, 4)).is_err());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LoopingGifWriter::create(&dir.path().join("x.gif"), 4, 4, 0, 10).is_err());
    }
}
