//! I/O layer: ffmpeg-backed video access (`video`) and the `writers` for the
//! merged JPEG, its JSON sidecar, and looping GIF output.
pub mod video;
pub use video::{FrameStream, VideoInfo};

pub mod writers;
