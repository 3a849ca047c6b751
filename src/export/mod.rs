//! Export modules
//!
//! Marshals a generated packing into consumer-facing formats:
//! - Texture: square RGBA float layout for GPU-side consumption
//! - Json: serialized circle list for downstream tooling
//! - Image: CPU-rasterized PNG snapshot of a disk packing

pub mod image_export;
pub mod json_export;
pub mod texture;

pub use image_export::{rasterize_disk_packing, save_png};
pub use json_export::{packing_to_json, write_packing_json};
pub use texture::CircleDataTexture;

use std::path::PathBuf;

/// Errors that can occur during export.
#[derive(Debug)]
pub enum ExportError {
    /// Failed to assemble an output buffer
    BufferCreation(String),
    /// Failed to write an output file
    Save { path: PathBuf, message: String },
    /// Invalid raster dimensions
    InvalidDimensions { width: u32, height: u32 },
    /// JSON serialization failure
    Serialize(serde_json::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::BufferCreation(message) => {
                write!(formatter, "Failed to create output buffer: {}", message)
            }
            ExportError::Save { path, message } => {
                write!(formatter, "Failed to save '{}': {}", path.display(), message)
            }
            ExportError::InvalidDimensions { width, height } => {
                write!(formatter, "Invalid dimensions: {}x{}", width, height)
            }
            ExportError::Serialize(error) => {
                write!(formatter, "Failed to serialize packing: {}", error)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Serialize(error) => Some(error),
            _ => None,
        }
    }
}
