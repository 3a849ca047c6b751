//! Packing of circle data into a square RGBA float texture layout.
//!
//! Downstream renderers read circle attributes out of a data texture indexed
//! row-major by circle id. Disk packings store (x, y, radius, phase) per
//! texel; sphere packings store (x, y, z, radius). The side length is the
//! smallest square that fits the circle count and unused tail texels stay
//! zero-filled.

use std::fs;
use std::path::Path;

use crate::packing::CirclePacking;

use super::ExportError;

/// Number of float channels per texel (RGBA).
const CHANNELS: usize = 4;

/// Square RGBA f32 buffer holding one packing.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleDataTexture {
    size: u32,
    data: Vec<f32>,
}

impl CircleDataTexture {
    /// Encode a packing into the texture layout.
    pub fn encode(packing: &CirclePacking) -> Self {
        let size = texture_side(packing.len());
        let mut data = vec![0.0f32; (size as usize) * (size as usize) * CHANNELS];

        match packing {
            CirclePacking::Disk(circles) => {
                for (index, circle) in circles.iter().enumerate() {
                    let texel = &mut data[index * CHANNELS..(index + 1) * CHANNELS];
                    texel[0] = circle.center.x;
                    texel[1] = circle.center.y;
                    texel[2] = circle.radius;
                    // Animation-phase slot read by consumers
                    texel[3] = 1.0;
                }
            }
            CirclePacking::Sphere(caps) => {
                for (index, cap) in caps.iter().enumerate() {
                    let texel = &mut data[index * CHANNELS..(index + 1) * CHANNELS];
                    texel[0] = cap.center.x;
                    texel[1] = cap.center.y;
                    texel[2] = cap.center.z;
                    texel[3] = cap.radius;
                }
            }
        }

        Self { size, data }
    }

    /// Texture side length in texels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw float channel data, row-major RGBA.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Byte view of the texel data for GPU buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Write the raw texel bytes to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        fs::write(path.as_ref(), self.as_bytes()).map_err(|error| ExportError::Save {
            path: path.as_ref().to_path_buf(),
            message: error.to_string(),
        })
    }
}

/// Smallest square side that fits `count` texels.
fn texture_side(count: usize) -> u32 {
    (count as f32).sqrt().ceil() as u32
}
