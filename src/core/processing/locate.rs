use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::Tile;

/// A tile is either an exported `tile.jpg` (any case) or a file named by digits only.
pub fn is_tile_file_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("tile.jpg")
        || (!name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse `(x, y)` from the last two components of a tile's containing directory,
/// e.g. `.../LODS/1/12/-3` gives `(12, -3)`.
pub fn parse_grid_coordinates(dir: &Path) -> Option<(i64, i64)> {
    let mut names = dir.components().rev().map(|c| c.as_os_str().to_str());
    let y = names.next()??.trim().parse::<i64>().ok()?;
    let x = names.next()??.trim().parse::<i64>().ok()?;
    Some((x, y))
}

/// Recursively collect every tile below `root`.
///
/// Files that look like tiles but sit in folders without numeric `<x>/<y>` names are
/// skipped without comment. Fails if `root` is missing or nothing qualified.
pub fn locate_tiles(root: &Path) -> Result<Vec<Tile>> {
    if !root.exists() {
        return Err(Error::MissingDirectory {
            path: root.to_path_buf(),
        });
    }

    info!("Scanning for map tiles in {:?}", root);

    let mut tiles = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_tile_file_name(name) {
            continue;
        }
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        if let Some((x, y)) = parse_grid_coordinates(parent) {
            tiles.push(Tile {
                x,
                y,
                path: entry.into_path(),
            });
        }
    }

    if tiles.is_empty() {
        return Err(Error::NoTiles {
            path: root.to_path_buf(),
        });
    }

    debug!("Found {} tiles", tiles.len());
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn tile_names() {
        assert!(is_tile_file_name("tile.jpg"));
        assert!(is_tile_file_name("TILE.JPG"));
        assert!(is_tile_file_name("0042"));
        assert!(!is_tile_file_name(""));
        assert!(!is_tile_file_name("tile.png"));
        assert!(!is_tile_file_name("12.jpg"));
        assert!(!is_tile_file_name("-1"));
    }

    #[test]
    fn coordinates_from_last_two_folders() {
        assert_eq!(
            parse_grid_coordinates(Path::new("Web/Anizay/LODS/1/4/7")),
            Some((4, 7))
        );
        assert_eq!(parse_grid_coordinates(Path::new("root/-2/+3")), Some((-2, 3)));
        assert_eq!(parse_grid_coordinates(Path::new("root/a/3")), None);
        assert_eq!(parse_grid_coordinates(Path::new("root/3/b")), None);
        assert_eq!(parse_grid_coordinates(Path::new("5")), None);
    }

    #[test]
    fn missing_root_is_reported() {
        let err = locate_tiles(Path::new("definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory { .. }));
    }

    #[test]
    fn empty_tree_yields_no_tiles() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/tile.jpg"), b"x").unwrap();
        let err = locate_tiles(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoTiles { .. }));
    }

    #[test]
    fn collects_tiles_and_skips_malformed_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("lod");
        for rel in ["0/0/tile.jpg", "1/0/Tile.JPG", "1/1/17", "x/1/tile.jpg", "2/2/notes.txt"] {
            let p = root.join(rel);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(&p, b"x").unwrap();
        }

        let tiles = locate_tiles(&root).unwrap();
        let coords: Vec<(i64, i64)> = tiles.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(tiles[2].path, root.join(PathBuf::from("1/1/17")));
    }
}
