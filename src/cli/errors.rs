use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid LOD level: '{lod}'. Must be a single folder name")]
    InvalidLod { lod: String },

    #[error(transparent)]
    Library(#[from] tilereel::Error),
}
