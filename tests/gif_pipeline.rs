use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::{Command, Stdio};

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use tilereel::{GifParams, is_ffmpeg_on_path, make_gif};

/// Render a short lossless clip with ffmpeg's lavfi source. Returns false when the
/// local ffmpeg cannot produce it.
fn synth_video(out: &Path, filter: &str, pix_fmt: &str) -> bool {
    Command::new("ffmpeg")
        .args([
            "-y",
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            "color=c=black:s=160x120:d=2:r=10",
            "-vf",
            filter,
            "-pix_fmt",
            pix_fmt,
            "-c:v",
            "ffv1",
        ])
        .arg(out)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn gif_frames(path: &Path) -> Vec<image::Frame> {
    let decoder = GifDecoder::new(BufReader::new(File::open(path).unwrap())).unwrap();
    decoder.into_frames().collect_frames().unwrap()
}

#[test]
fn letterboxed_clip_is_cropped_to_picture() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boxed.mkv");
    if !synth_video(
        &input,
        "drawbox=x=40:y=30:w=80:h=60:color=white:t=fill",
        "yuv444p",
    ) {
        eprintln!("skipping: ffmpeg could not synthesize test clip");
        return;
    }

    let params = GifParams {
        input,
        output: dir.path().join("loop.gif"),
        ..GifParams::default()
    };
    let report = make_gif(&params).unwrap();

    let crop = report.crop.expect("crop box");
    // Picture spans x 40..=119, y 30..=89; 2px trimmed inward.
    assert_eq!(
        (crop.left, crop.right, crop.top, crop.bottom),
        (42, 117, 32, 87),
        "{crop}"
    );
    assert_eq!(
        (report.output_width, report.output_height),
        (crop.width(), crop.height())
    );
    assert!(report.frames > 0);
    assert!((report.source_fps - 10.0).abs() < 1e-9);

    let frames = gif_frames(&params.output);
    assert!(!frames.is_empty());
    assert_eq!(
        frames[0].buffer().dimensions(),
        (crop.width(), crop.height())
    );
}

#[test]
fn odd_crop_offsets_survive_chroma_subsampling() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("odd.mkv");
    // 4:2:0 source with the picture starting on odd pixels.
    if !synth_video(
        &input,
        "drawbox=x=41:y=31:w=78:h=58:color=white:t=fill",
        "yuv420p",
    ) {
        eprintln!("skipping: ffmpeg could not synthesize test clip");
        return;
    }

    let params = GifParams {
        input,
        output: dir.path().join("odd.gif"),
        padding: 0,
        ..GifParams::default()
    };
    let report = make_gif(&params).unwrap();

    let crop = report.crop.expect("crop box");
    // Picture spans x 41..=118, y 31..=88; bright-span ends are exclusive.
    assert_eq!(
        (crop.left, crop.right, crop.top, crop.bottom),
        (41, 118, 31, 88),
        "{crop}"
    );

    // A crop snapped to even offsets would pull a black column/row into view.
    let frames = gif_frames(&params.output);
    let first = frames[0].buffer();
    assert_eq!(first.dimensions(), (crop.width(), crop.height()));
    let (w, h) = first.dimensions();
    for (x, y) in [(0, 0), (0, h / 2), (w / 2, 0), (w - 1, h - 1)] {
        let px = first.get_pixel(x, y);
        assert!(px[0] > 200 && px[1] > 200 && px[2] > 200, "({x},{y}) = {px:?}");
    }
}

#[test]
fn dark_clip_is_left_uncropped() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dark.mkv");
    if !synth_video(&input, "null", "yuv444p") {
        eprintln!("skipping: ffmpeg could not synthesize test clip");
        return;
    }

    let params = GifParams {
        input,
        output: dir.path().join("dark.gif"),
        fps: 5,
        ..GifParams::default()
    };
    let report = make_gif(&params).unwrap();

    assert!(report.crop.is_none());
    assert_eq!((report.output_width, report.output_height), (160, 120));
    assert_eq!(gif_frames(&params.output)[0].buffer().dimensions(), (160, 120));
}

#[test]
fn missing_video_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let params = GifParams {
        input: dir.path().join("my_video.mp4"),
        output: dir.path().join("final_loop.gif"),
        ..GifParams::default()
    };
    let err = make_gif(&params).unwrap_err();
    assert!(matches!(err, tilereel::Error::Video(_)));
    assert!(!params.output.exists());
}
