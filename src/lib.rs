#![doc = r#"
tilereel — map tile stitching and letterbox-free looping GIFs.

This crate bundles two small, independent pipelines behind one typed API:

- **merge**: walk an LOD tile tree laid out as `<x>/<y>/tile.jpg`, paste every tile
  onto a black canvas with the vertical axis flipped (highest `y` on top), shrink
  the result to a browser-safe square when it is too large, and save a JPEG.
- **gif**: sample one frame of a video, find the picture area along its center
  cross, crop the whole clip to it, and encode a GIF that loops forever.

Both power the `tilereel` CLI and can be embedded in your own Rust applications.

Requirements
------------
- `ffmpeg` and `ffprobe` on `PATH` for the video pipeline.
- Rust 2024 edition toolchain.

Quick start: merge a tile tree
------------------------------
```rust,no_run
use tilereel::{merge_tiles_to_path, MergeParams};

fn main() -> tilereel::Result<()> {
    let mut params = MergeParams::for_lod("2");
    params.sidecar = true;

    let report = merge_tiles_to_path(&params)?;
    println!(
        "placed {} of {} tiles into {}x{}",
        report.tiles_placed, report.tiles_found, report.output_width, report.output_height
    );
    Ok(())
}
```

Quick start: video to looping GIF
---------------------------------
```rust,no_run
use std::path::PathBuf;
use tilereel::{make_gif, GifParams};

fn main() -> tilereel::Result<()> {
    let params = GifParams {
        input: PathBuf::from("clips/intro.mp4"),
        output: PathBuf::from("intro.gif"),
        fps: 12,
        ..GifParams::default()
    };

    let report = make_gif(&params)?;
    match report.crop {
        Some(crop) => println!("cropped to {crop}"),
        None => println!("no letterbox found"),
    }
    Ok(())
}
```

Error handling
--------------
All public functions return `tilereel::Result<T>`. Missing inputs surface as
`Error::MissingDirectory`, `Error::NoTiles` or `Error::Video`; a single unreadable
tile is logged and skipped, never an error.

```rust,no_run
use tilereel::{merge_tiles_to_path, Error, MergeParams};

fn main() {
    match merge_tiles_to_path(&MergeParams::default()) {
        Ok(report) => println!("{} tiles failed", report.tiles_failed),
        Err(Error::MissingDirectory { path }) => eprintln!("no such folder: {}", path.display()),
        Err(Error::NoTiles { path }) => eprintln!("no tiles under {}", path.display()),
        Err(other) => eprintln!("merge failed: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points and run reports.
- [`core`] — parameters and the processing primitives of both pipelines.
- [`io`] — ffmpeg video access and JPEG/GIF/JSON writers.
- [`types`] — `Tile`, `GridBounds`, `CropBox`, `ResizeFilter`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use core::params::{GifParams, MergeParams};
pub use error::{Error, Result};
pub use types::{CropBox, GridBounds, ResizeFilter, Tile};

pub use io::video::{VideoInfo, is_ffmpeg_on_path};

pub use api::{GifReport, MergeReport, make_gif, merge_tiles_to_buffer, merge_tiles_to_path};
