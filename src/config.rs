//! Configuration module for circle packing runs.
//!
//! Defines the parameter structures for packing generation and output,
//! with JSON load/save support. Defaults match the interactive demos the
//! packer was built for.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::packing::{PackingRequest, Topology};

/// Parameters driving the packing generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingParameters {
    /// Radius of the containing disk or sphere
    #[serde(default = "default_container_radius")]
    pub container_radius: f32,

    /// Smallest circle radius
    #[serde(default = "default_min_circle_radius")]
    pub min_circle_radius: f32,

    /// Largest circle radius
    #[serde(default = "default_max_circle_radius")]
    pub max_circle_radius: f32,

    /// Consecutive failed placements tolerated before the run stops
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound on the number of placed circles
    #[serde(default = "default_max_circles")]
    pub max_circles: usize,

    /// Container topology
    #[serde(default)]
    pub topology: Topology,

    /// Fixed random seed; omit to seed from the system clock
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_container_radius() -> f32 {
    1.0
}

fn default_min_circle_radius() -> f32 {
    0.01
}

fn default_max_circle_radius() -> f32 {
    0.15
}

fn default_max_attempts() -> u32 {
    1000
}

fn default_max_circles() -> usize {
    500
}

impl Default for PackingParameters {
    fn default() -> Self {
        Self {
            container_radius: default_container_radius(),
            min_circle_radius: default_min_circle_radius(),
            max_circle_radius: default_max_circle_radius(),
            max_attempts: default_max_attempts(),
            max_circles: default_max_circles(),
            topology: Topology::default(),
            seed: None,
        }
    }
}

impl PackingParameters {
    /// Build the generator request from these parameters.
    pub fn request(&self) -> PackingRequest {
        PackingRequest {
            container_radius: self.container_radius,
            min_circle_radius: self.min_circle_radius,
            max_circle_radius: self.max_circle_radius,
            max_attempts: self.max_attempts,
            max_circles: self.max_circles,
        }
    }

    /// Span of the candidate radius range.
    pub fn radius_span(&self) -> f32 {
        self.max_circle_radius - self.min_circle_radius
    }
}

/// Parameters for image output of a packing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputParameters {
    /// Side of the square output image in pixels
    #[serde(default = "default_image_size")]
    pub image_size: u32,

    /// RGBA color for placed circles
    #[serde(default = "default_circle_color")]
    pub circle_color: [u8; 4],

    /// RGBA color for the container interior
    #[serde(default = "default_background_color")]
    pub background_color: [u8; 4],

    /// RGBA color outside the container
    #[serde(default = "default_canvas_color")]
    pub canvas_color: [u8; 4],
}

fn default_image_size() -> u32 {
    1024
}

fn default_circle_color() -> [u8; 4] {
    [255, 255, 255, 255]
}

fn default_background_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

fn default_canvas_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl Default for OutputParameters {
    fn default() -> Self {
        Self {
            image_size: default_image_size(),
            circle_color: default_circle_color(),
            background_color: default_background_color(),
            canvas_color: default_canvas_color(),
        }
    }
}

/// Complete run configuration combining all parameter groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingConfig {
    /// Generator parameters
    #[serde(default)]
    pub packing: PackingParameters,

    /// Image output parameters
    #[serde(default)]
    pub output: OutputParameters,
}

impl PackingConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Returns
    /// * `Ok(PackingConfig)` - Parsed configuration
    /// * `Err` - If file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Save configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: std::path::PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PackingConfig::default();
        assert!((config.packing.container_radius - 1.0).abs() < f32::EPSILON);
        assert!((config.packing.min_circle_radius - 0.01).abs() < f32::EPSILON);
        assert!((config.packing.max_circle_radius - 0.15).abs() < f32::EPSILON);
        assert_eq!(config.packing.max_attempts, 1000);
        assert_eq!(config.packing.max_circles, 500);
        assert_eq!(config.packing.topology, Topology::Disk);
        assert_eq!(config.output.image_size, 1024);
    }

    #[test]
    fn test_default_request_is_valid() {
        let config = PackingConfig::default();
        assert!(config.packing.request().validate().is_ok());
    }

    #[test]
    fn test_radius_span() {
        let config = PackingConfig::default();
        assert!((config.packing.radius_span() - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = PackingConfig::default();
        config.packing.topology = Topology::Sphere;
        config.packing.seed = Some(42);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PackingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.packing.topology, Topology::Sphere);
        assert_eq!(deserialized.packing.seed, Some(42));
        assert!(
            (config.packing.max_circle_radius - deserialized.packing.max_circle_radius).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "packing": { "topology": "sphere", "max_circles": 100 } }"#;
        let config: PackingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.packing.topology, Topology::Sphere);
        assert_eq!(config.packing.max_circles, 100);
        assert!((config.packing.container_radius - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.output.image_size, 1024);
    }
}
