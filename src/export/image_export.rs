//! PNG snapshot of a disk packing.
//!
//! Rasterizes the placed circles with a per-pixel point-in-circle test, the
//! CPU counterpart of the fragment program that consumes the packing in
//! production, then saves the buffer with the `image` crate. Sphere packings
//! are not rasterized here: projecting them needs a camera, which belongs to
//! the rendering layer.

use std::path::Path;

use glam::Vec2;

use crate::config::OutputParameters;
use crate::packing::Circle;

use super::ExportError;

/// Rasterize a disk packing into an RGBA byte buffer.
///
/// The square image spans [-container_radius, container_radius] on both
/// axes, +y up. Pixels outside the container take the canvas color, pixels
/// inside a placed circle the circle color, the rest the background color.
///
/// Cost is O(pixels * circles); at the circle counts the packer targets this
/// stays well inside interactive budgets.
pub fn rasterize_disk_packing(
    circles: &[Circle],
    container_radius: f32,
    output: &OutputParameters,
) -> Result<Vec<u8>, ExportError> {
    let size = output.image_size;
    if size == 0 {
        return Err(ExportError::InvalidDimensions {
            width: size,
            height: size,
        });
    }

    let mut data = vec![0u8; (size as usize) * (size as usize) * 4];

    for pixel_y in 0..size {
        for pixel_x in 0..size {
            // Map the pixel center into container space
            let x = ((pixel_x as f32 + 0.5) / size as f32 * 2.0 - 1.0) * container_radius;
            let y = (1.0 - (pixel_y as f32 + 0.5) / size as f32 * 2.0) * container_radius;
            let point = Vec2::new(x, y);

            let color = if point.length() > container_radius {
                output.canvas_color
            } else if circles
                .iter()
                .any(|circle| point.distance(circle.center) < circle.radius)
            {
                output.circle_color
            } else {
                output.background_color
            };

            let offset = ((pixel_y as usize) * (size as usize) + pixel_x as usize) * 4;
            data[offset..offset + 4].copy_from_slice(&color);
        }
    }

    Ok(data)
}

/// Save raw RGBA pixel data as a PNG file.
///
/// # Arguments
/// * `path` - Output file path
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `data` - RGBA u8 pixel data (length must be width * height * 4)
pub fn save_png<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<(), ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if data.len() != expected_len {
        return Err(ExportError::BufferCreation(format!(
            "Data length {} doesn't match expected {} ({}x{}x4)",
            data.len(),
            expected_len,
            width,
            height
        )));
    }

    let image_buffer: image::ImageBuffer<image::Rgba<u8>, _> =
        image::ImageBuffer::from_raw(width, height, data.to_vec()).ok_or_else(|| {
            ExportError::BufferCreation("Failed to create image buffer from raw data".to_string())
        })?;

    image_buffer.save(path.as_ref()).map_err(|error| ExportError::Save {
        path: path.as_ref().to_path_buf(),
        message: error.to_string(),
    })?;

    Ok(())
}
