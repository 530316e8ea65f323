//! Video access through the system `ffprobe` / `ffmpeg` binaries.
//!
//! Frames are exchanged as raw `rgb24` over the child's stdout, which avoids native
//! FFmpeg headers at build time. Both binaries must be on `PATH` at run time.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use image::RgbImage;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::CropBox;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    pub source_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps_num: u32,
    pub fps_den: u32,
    pub duration_sec: f64,
}

impl VideoInfo {
    pub fn source_fps(&self) -> f64 {
        if self.fps_den == 0 {
            0.0
        } else {
            f64::from(self.fps_num) / f64::from(self.fps_den)
        }
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[derive(Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeOut {
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

pub fn probe_video(source_path: &Path) -> Result<VideoInfo> {
    if !source_path.is_file() {
        return Err(Error::Video(format!(
            "video file '{}' not found",
            source_path.display()
        )));
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| Error::video(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(Error::Video(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    parse_probe_output(source_path, &out.stdout)
}

fn parse_probe_output(source_path: &Path, json: &[u8]) -> Result<VideoInfo> {
    let parsed: ProbeOut = serde_json::from_slice(json)?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| Error::video("no video stream found"))?;
    let width = stream
        .width
        .filter(|&w| w > 0)
        .ok_or_else(|| Error::video("missing video width from ffprobe"))?;
    let height = stream
        .height
        .filter(|&h| h > 0)
        .ok_or_else(|| Error::video("missing video height from ffprobe"))?;
    let (fps_num, fps_den) = parse_ff_ratio(stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| Error::video("invalid video r_frame_rate"))?;

    // Container duration first, stream duration as fallback.
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(stream.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps_num,
        fps_den,
        duration_sec,
    })
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.parse::<u32>().ok()?;
    let b = parts.next().unwrap_or("1").parse::<u32>().ok()?;
    if b == 0 {
        return None;
    }
    Some((a, b))
}

fn frame_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Decode the single frame shown at `time_sec`.
pub fn decode_frame_rgb(info: &VideoInfo, time_sec: f64) -> Result<RgbImage> {
    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{time_sec:.6}")])
        .arg("-i")
        .arg(&info.source_path)
        .args([
            "-an", "-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1",
        ])
        .output()
        .map_err(|e| Error::video(format!("failed to run ffmpeg for frame decode: {e}")))?;

    if !out.status.success() {
        return Err(Error::Video(format!(
            "ffmpeg frame decode failed for '{}': {}",
            info.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected = frame_len(info.width, info.height);
    if out.stdout.len() < expected {
        return Err(Error::Video(format!(
            "ffmpeg returned {} bytes at t={:.3}s, expected {}",
            out.stdout.len(),
            time_sec,
            expected
        )));
    }

    let mut data = out.stdout;
    data.truncate(expected);
    RgbImage::from_raw(info.width, info.height, data)
        .ok_or_else(|| Error::video("decoded frame does not match probed size"))
}

/// ffmpeg `-vf` chain: optional crop, then resample to `fps`.
///
/// `exact=1` keeps odd crop offsets on subsampled sources instead of snapping
/// them to the chroma grid.
pub fn filter_chain(crop: Option<&CropBox>, fps: u32) -> String {
    match crop {
        Some(c) => format!(
            "crop={}:{}:{}:{}:exact=1,fps={}",
            c.width(),
            c.height(),
            c.left,
            c.top,
            fps
        ),
        None => format!("fps={fps}"),
    }
}

type StderrDrain = JoinHandle<std::io::Result<Vec<u8>>>;

/// Whole-clip decoder yielding frames one at a time from an ffmpeg child.
///
/// Stderr is drained on a background thread so a chatty decoder never blocks on
/// a full pipe. Dropping the stream before [`FrameStream::finish`] kills and
/// reaps the child.
pub struct FrameStream {
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    stderr_drain: Option<StderrDrain>,
    width: u32,
    height: u32,
    frames_read: u64,
}

impl FrameStream {
    pub fn spawn(info: &VideoInfo, crop: Option<&CropBox>, fps: u32) -> Result<Self> {
        let (width, height) = match crop {
            Some(c) => (c.width(), c.height()),
            None => (info.width, info.height),
        };
        let filter = filter_chain(crop, fps);
        debug!("Decoding {:?} with filter '{}'", info.source_path, filter);

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-v", "error", "-i"])
            .arg(&info.source_path)
            .args([
                "-an", "-vf", &filter, "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1",
            ]);
        Self::from_command(cmd, width, height)
    }

    /// Run `cmd` and read `width`x`height` rgb24 frames from its stdout.
    fn from_command(mut cmd: Command, width: u32, height: u32) -> Result<Self> {
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::video(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (Some(stdout), Some(mut stderr)) = (stdout, stderr) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::video("failed to open ffmpeg stdout/stderr"));
        };
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            child: Some(child),
            stdout: Some(stdout),
            stderr_drain: Some(stderr_drain),
            width,
            height,
            frames_read: 0,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut buf = vec![0u8; frame_len(self.width, self.height)];
        let mut filled = 0;
        while filled < buf.len() {
            let n = stdout.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            self.stdout = None;
            return Ok(None);
        }
        if filled < buf.len() {
            self.stdout = None;
            return Err(Error::Video(format!(
                "ffmpeg stream ended mid-frame ({} of {} bytes)",
                filled,
                buf.len()
            )));
        }

        self.frames_read += 1;
        RgbImage::from_raw(self.width, self.height, buf)
            .map(Some)
            .ok_or_else(|| Error::video("decoded frame does not match crop size"))
    }

    fn join_stderr(&mut self) -> Result<Vec<u8>> {
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::video("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| Error::video(format!("failed to read ffmpeg stderr: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Wait for ffmpeg to exit and surface its stderr on failure.
    pub fn finish(mut self) -> Result<()> {
        drop(self.stdout.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| Error::video(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = self.join_stderr()?;

        if !status.success() {
            return Err(Error::Video(format!(
                "ffmpeg exited with status {}: {}",
                status,
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        drop(self.stdout.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = self.join_stderr();
    }
}

impl Iterator for FrameStream {
    type Item = Result<RgbImage>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}
