use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::info;

use crate::api::MergeReport;
use crate::core::params::MergeParams;
use crate::error::Result;

pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

/// Collect the merge summary and provenance into one JSON document
pub fn merge_metadata(report: &MergeReport, params: &MergeParams) -> Value {
    json!({
        "lod": params.lod,
        "source_dir": params.input_dir.display().to_string(),
        "grid": {
            "min_x": report.bounds.min_x,
            "max_x": report.bounds.max_x,
            "min_y": report.bounds.min_y,
            "max_y": report.bounds.max_y,
            "columns": u64::try_from(report.bounds.columns()).ok(),
            "rows": u64::try_from(report.bounds.rows()).ok(),
            "y_flipped": true,
        },
        "tile_size": [report.tile_width, report.tile_height],
        "native_size": [report.native_width, report.native_height],
        "output_size": [report.output_width, report.output_height],
        "resized": report.resized,
        "tiles": {
            "found": report.tiles_found,
            "placed": report.tiles_placed,
            "failed": report.tiles_failed,
        },
        "jpeg_quality": params.quality,
        "resize_filter": params.filter.to_string(),
        "conversion_tool": env!("CARGO_PKG_NAME"),
        "conversion_version": env!("CARGO_PKG_VERSION"),
        "conversion_timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

/// Write `<output>.json` next to the merged image
pub fn write_merge_sidecar(
    output_path: &Path,
    report: &MergeReport,
    params: &MergeParams,
) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(&merge_metadata(report, params))?;
    std::fs::write(&path, json_string)?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}
