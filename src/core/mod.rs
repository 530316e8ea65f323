//! Core processing building blocks: tile location, canvas assembly, output
//! resizing and letterbox crop detection. These are internal primitives
//! consumed by the high-level `api` module.
pub mod params;
pub mod processing;
