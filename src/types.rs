//! Shared types used across tilereel.
//! Includes the tile-grid model (`Tile`, `GridBounds`), the video `CropBox`,
//! and the `ResizeFilter` choice for the output resizer.
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One map tile image addressed by its integer grid coordinate.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
    pub path: PathBuf,
}

/// Inclusive coordinate extent of a tile set.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl GridBounds {
    pub fn from_tiles(tiles: &[Tile]) -> Option<Self> {
        let first = tiles.first()?;
        let mut bounds = GridBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for tile in &tiles[1..] {
            bounds.min_x = bounds.min_x.min(tile.x);
            bounds.max_x = bounds.max_x.max(tile.x);
            bounds.min_y = bounds.min_y.min(tile.y);
            bounds.max_y = bounds.max_y.max(tile.y);
        }
        Some(bounds)
    }

    /// Number of tile columns spanned (`max_x - min_x + 1`). Exact for any `i64` extent.
    pub fn columns(&self) -> u128 {
        span(self.min_x, self.max_x)
    }

    /// Number of tile rows spanned (`max_y - min_y + 1`). Exact for any `i64` extent.
    pub fn rows(&self) -> u128 {
        span(self.min_y, self.max_y)
    }
}

fn span(min: i64, max: i64) -> u128 {
    (i128::from(max) - i128::from(min)) as u128 + 1
}

impl std::fmt::Display for GridBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X[{}-{}], Y[{}-{}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// Pixel rectangle applied to every frame of a clip.
/// `right` and `bottom` are exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl std::fmt::Display for CropBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(L:{} R:{} T:{} B:{})",
            self.left, self.right, self.top, self.bottom
        )
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
pub enum ResizeFilter {
    #[default]
    Lanczos3,
    CatmullRom,
    Bilinear,
    Nearest,
}

impl std::fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeFilter::Lanczos3 => write!(f, "Lanczos3"),
            ResizeFilter::CatmullRom => write!(f, "CatmullRom"),
            ResizeFilter::Bilinear => write!(f, "Bilinear"),
            ResizeFilter::Nearest => write!(f, "Nearest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i64, y: i64) -> Tile {
        Tile {
            x,
            y,
            path: PathBuf::from(format!("{x}/{y}/tile.jpg")),
        }
    }

    #[test]
    fn bounds_cover_negative_coordinates() {
        let tiles = vec![tile(-2, 5), tile(3, -1), tile(0, 0)];
        let b = GridBounds::from_tiles(&tiles).unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-2, 3, -1, 5));
        assert_eq!(b.columns(), 6);
        assert_eq!(b.rows(), 7);
    }

    #[test]
    fn span_of_full_i64_range_does_not_overflow() {
        let tiles = vec![tile(i64::MIN, 0), tile(i64::MAX, 0)];
        let b = GridBounds::from_tiles(&tiles).unwrap();
        assert_eq!(b.columns(), 1u128 << 64);
        assert_eq!(b.rows(), 1);
    }

    #[test]
    fn bounds_of_empty_set_is_none() {
        assert!(GridBounds::from_tiles(&[]).is_none());
    }

    #[test]
    fn crop_box_dimensions() {
        let b = CropBox {
            left: 10,
            top: 4,
            right: 30,
            bottom: 4,
        };
        assert_eq!(b.width(), 20);
        assert_eq!(b.height(), 0);
        assert!(b.is_empty());
    }
}
