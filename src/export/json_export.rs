//! JSON export of a generated packing.

use std::fs;
use std::path::Path;

use crate::packing::CirclePacking;

use super::ExportError;

/// Serialize a packing to pretty-printed JSON.
pub fn packing_to_json(packing: &CirclePacking) -> Result<String, ExportError> {
    serde_json::to_string_pretty(packing).map_err(ExportError::Serialize)
}

/// Write a packing to a JSON file.
pub fn write_packing_json<P: AsRef<Path>>(
    path: P,
    packing: &CirclePacking,
) -> Result<(), ExportError> {
    let contents = packing_to_json(packing)?;
    fs::write(path.as_ref(), contents).map_err(|error| ExportError::Save {
        path: path.as_ref().to_path_buf(),
        message: error.to_string(),
    })
}
