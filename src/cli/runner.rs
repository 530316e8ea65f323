use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tilereel::core::params::{default_lod_dir, default_merge_output};
use tilereel::{GifParams, MergeParams, make_gif, merge_tiles_to_path};

use super::args::{CliArgs, Command, GifArgs, MergeArgs};
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn merge_params(args: MergeArgs) -> Result<MergeParams, AppError> {
    let lod = args.lod.trim().to_string();
    if lod.is_empty() || lod.contains(['/', '\\']) || lod == "." || lod == ".." {
        return Err(AppError::InvalidLod { lod });
    }

    Ok(MergeParams {
        input_dir: args.input_dir.unwrap_or_else(|| default_lod_dir(&lod)),
        output: args.output.unwrap_or_else(|| default_merge_output(&lod)),
        max_dimension: args.max_dimension,
        quality: args.quality,
        filter: args.filter,
        sidecar: args.sidecar,
        lod,
        ..MergeParams::default()
    })
}

fn gif_params(args: GifArgs) -> GifParams {
    GifParams {
        input: args.input,
        output: args.output,
        fps: args.fps,
        threshold: args.threshold,
        padding: args.padding,
        sample_fraction: args.sample_fraction,
        speed: args.speed,
    }
}

fn run_merge(args: MergeArgs) -> Result<(), AppError> {
    let params = merge_params(args)?;
    let report = merge_tiles_to_path(&params)?;
    info!(
        "Placed {}/{} tiles ({} failed), output {}x{}",
        report.tiles_placed,
        report.tiles_found,
        report.tiles_failed,
        report.output_width,
        report.output_height
    );
    Ok(())
}

fn run_gif(args: GifArgs) -> Result<(), AppError> {
    let params = gif_params(args);
    let input = params.input.clone();
    let report = make_gif(&params).inspect_err(|e| {
        if matches!(e, tilereel::Error::Video(_)) {
            error!(
                "Make sure the video {:?} exists and is readable by ffmpeg",
                input
            );
        }
    })?;
    info!(
        "Wrote {} frames at {}x{}",
        report.frames, report.output_width, report.output_height
    );
    Ok(())
}

/// Log a fatal error exactly once and map the outcome to the process status.
fn exit_code(result: Result<(), AppError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

pub fn run(args: CliArgs) -> ExitCode {
    init_logging(args.log);

    let result = match args.command {
        Command::Merge(merge) => run_merge(merge),
        Command::Gif(gif) => run_gif(gif),
    };
    exit_code(result)
}
