//! Rejection-sampling circle packing generator.
//!
//! Places non-overlapping circles inside a bounded container by drawing
//! random candidates and keeping only those that clear every previously
//! placed circle. One placement loop serves both container topologies; the
//! topology contributes the candidate sampling step and the required
//! center separation for the overlap test.
//!
//! Candidate radii follow a squared-uniform distribution
//! (`r = min + (max - min) * u^2`), which skews the packing toward small
//! circles. Disk candidates use a linear radial draw rather than an
//! area-uniform one, concentrating placements near the container center.
//! Both biases are part of the output's visual contract.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::circle::{
    effective_cap_radius, spherical_to_cartesian, Circle, CirclePacking, SphericalCap,
};
use super::rng::RandomSource;

/// Container shape circles are packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Flat disk centered at the origin
    #[default]
    Disk,
    /// Surface of a sphere centered at the origin
    Sphere,
}

impl Topology {
    /// Get display name for logs and CLI output
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Disk => "disk",
            Topology::Sphere => "sphere",
        }
    }

    /// Get all topologies
    pub fn all() -> &'static [Self] {
        &[Self::Disk, Self::Sphere]
    }
}

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "disk" => Ok(Self::Disk),
            "sphere" => Ok(Self::Sphere),
            _ => Err(ParseTopologyError {
                input: input.to_string(),
            }),
        }
    }
}

/// Error returned when parsing a topology name.
#[derive(Debug, Clone)]
pub struct ParseTopologyError {
    input: String,
}

impl fmt::Display for ParseTopologyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown topology '{}', expected 'disk' or 'sphere'",
            self.input
        )
    }
}

impl std::error::Error for ParseTopologyError {}

/// Parameters for one packing run.
///
/// Constructed once per generation; the packer retains no state between
/// calls, so a new request always produces an entirely new output list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingRequest {
    /// Radius of the containing disk or sphere
    pub container_radius: f32,
    /// Smallest candidate circle radius
    pub min_circle_radius: f32,
    /// Largest candidate circle radius
    pub max_circle_radius: f32,
    /// Consecutive failed placements tolerated before the run stops
    pub max_attempts: u32,
    /// Hard cap on the number of placed circles
    pub max_circles: usize,
}

impl Default for PackingRequest {
    fn default() -> Self {
        Self {
            container_radius: 1.0,
            min_circle_radius: 0.01,
            max_circle_radius: 0.15,
            max_attempts: 1000,
            max_circles: 500,
        }
    }
}

impl PackingRequest {
    /// Check the request against the input constraints.
    ///
    /// Degenerate radii and attempt budgets are rejected here, before the
    /// placement loop, rather than surfacing mid-run. The comparisons are
    /// written so NaN inputs also fail.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(self.container_radius > 0.0) {
            return Err(RequestError::NonPositiveContainerRadius(
                self.container_radius,
            ));
        }
        if !(self.min_circle_radius > 0.0) {
            return Err(RequestError::NonPositiveMinRadius(self.min_circle_radius));
        }
        if !(self.max_circle_radius >= self.min_circle_radius) {
            return Err(RequestError::InvertedRadiusRange {
                min: self.min_circle_radius,
                max: self.max_circle_radius,
            });
        }
        if self.max_attempts < 1 {
            return Err(RequestError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Error types for request validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Container radius must be strictly positive
    NonPositiveContainerRadius(f32),
    /// Minimum circle radius must be strictly positive
    NonPositiveMinRadius(f32),
    /// Maximum circle radius must not be below the minimum
    InvertedRadiusRange { min: f32, max: f32 },
    /// At least one placement attempt must be allowed
    ZeroAttempts,
}

impl fmt::Display for RequestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NonPositiveContainerRadius(radius) => {
                write!(formatter, "container radius must be > 0, got {}", radius)
            }
            RequestError::NonPositiveMinRadius(radius) => {
                write!(formatter, "minimum circle radius must be > 0, got {}", radius)
            }
            RequestError::InvertedRadiusRange { min, max } => {
                write!(
                    formatter,
                    "maximum circle radius {} is below minimum {}",
                    max, min
                )
            }
            RequestError::ZeroAttempts => {
                write!(formatter, "attempt budget must allow at least one attempt")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Candidate accepted by the placement loop. Disk placements keep z = 0.
#[derive(Debug, Clone, Copy)]
struct Placement {
    position: Vec3,
    radius: f32,
}

/// Circle packing generator for a validated request.
///
/// The generation call is pure and synchronous: fresh local state per call,
/// no I/O, and termination guaranteed by the attempt budget and circle cap.
pub struct CirclePacker {
    request: PackingRequest,
}

impl CirclePacker {
    /// Create a packer, rejecting invalid requests before any placement work.
    pub fn new(request: PackingRequest) -> Result<Self, RequestError> {
        request.validate()?;
        Ok(Self { request })
    }

    /// The validated request this packer runs.
    pub fn request(&self) -> &PackingRequest {
        &self.request
    }

    /// Run one packing generation.
    ///
    /// The failure counter tracks consecutive rejected candidates and resets
    /// to zero on every successful placement. Failure streaks are bounded by
    /// `max_attempts`, but the total number of candidates drawn across a run
    /// is not: an alternating success/failure pattern keeps the counter low.
    pub fn generate(&self, topology: Topology, rng: &mut dyn RandomSource) -> CirclePacking {
        match topology {
            Topology::Disk => {
                let placed = self.place_all(rng, sample_disk_center, |_, a, b| a + b);
                CirclePacking::Disk(
                    placed
                        .into_iter()
                        .enumerate()
                        .map(|(id, p)| {
                            Circle::new(id as u32, Vec2::new(p.position.x, p.position.y), p.radius)
                        })
                        .collect(),
                )
            }
            Topology::Sphere => {
                let placed = self.place_all(rng, sample_sphere_center, |request, a, b| {
                    effective_cap_radius(a, request.container_radius)
                        + effective_cap_radius(b, request.container_radius)
                });
                CirclePacking::Sphere(
                    placed
                        .into_iter()
                        .enumerate()
                        .map(|(id, p)| SphericalCap::new(id as u32, p.position, p.radius))
                        .collect(),
                )
            }
        }
    }

    /// Rejection-sampling loop shared by both topologies.
    ///
    /// Every candidate is tested against all previously placed circles, so a
    /// successful placement costs O(n) and a full run O(n^2). Fine for the
    /// circle counts this is used with (hundreds); a spatial index would be
    /// the extension point for much larger packings.
    fn place_all(
        &self,
        rng: &mut dyn RandomSource,
        sample_center: fn(&PackingRequest, &mut dyn RandomSource, f32) -> Option<Vec3>,
        required_separation: impl Fn(&PackingRequest, f32, f32) -> f32,
    ) -> Vec<Placement> {
        let request = &self.request;
        let mut placed: Vec<Placement> = Vec::new();
        let mut failed_attempts = 0u32;

        while failed_attempts < request.max_attempts && placed.len() < request.max_circles {
            let radius = self.sample_radius(rng);

            // A radius the container cannot hold at all counts as a failed
            // attempt, so an infeasible minimum radius drains the budget and
            // ends with an empty result instead of looping forever.
            let Some(position) = sample_center(request, rng, radius) else {
                failed_attempts += 1;
                continue;
            };

            let overlaps = placed.iter().any(|existing| {
                (existing.position - position).length()
                    < required_separation(request, existing.radius, radius)
            });

            if overlaps {
                failed_attempts += 1;
            } else {
                placed.push(Placement { position, radius });
                failed_attempts = 0;
            }
        }

        placed
    }

    /// Draw a candidate radius, squared-uniform toward the small end.
    fn sample_radius(&self, rng: &mut dyn RandomSource) -> f32 {
        let u = rng.next_f32();
        self.request.min_circle_radius
            + (self.request.max_circle_radius - self.request.min_circle_radius) * u * u
    }
}

/// Disk candidate: uniform angle, linear radial distance within the reach
/// that keeps the whole circle inside the container.
fn sample_disk_center(
    request: &PackingRequest,
    rng: &mut dyn RandomSource,
    radius: f32,
) -> Option<Vec3> {
    let reach = request.container_radius - radius;
    if reach < 0.0 {
        return None;
    }
    let angle = rng.next_f32() * TAU;
    let distance = rng.next_f32() * reach;
    Some(Vec3::new(distance * angle.cos(), distance * angle.sin(), 0.0))
}

/// Sphere candidate: area-uniform point on the surface.
fn sample_sphere_center(
    request: &PackingRequest,
    rng: &mut dyn RandomSource,
    radius: f32,
) -> Option<Vec3> {
    if radius > request.container_radius {
        return None;
    }
    let theta = rng.next_f32() * TAU;
    let phi = (2.0 * rng.next_f32() - 1.0).acos();
    Some(spherical_to_cartesian(request.container_radius, theta, phi))
}

/// One-call surface: validate the request, run the packing, return the
/// placed set in placement order.
pub fn generate_packing(
    request: PackingRequest,
    topology: Topology,
    rng: &mut dyn RandomSource,
) -> Result<CirclePacking, RequestError> {
    Ok(CirclePacker::new(request)?.generate(topology, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::rng::Xorshift64;

    #[test]
    fn test_validation_rejects_degenerate_inputs() {
        let valid = PackingRequest::default();
        assert!(valid.validate().is_ok());

        let bad_container = PackingRequest {
            container_radius: 0.0,
            ..valid
        };
        assert!(matches!(
            bad_container.validate(),
            Err(RequestError::NonPositiveContainerRadius(_))
        ));

        let bad_min = PackingRequest {
            min_circle_radius: -0.1,
            ..valid
        };
        assert!(matches!(
            bad_min.validate(),
            Err(RequestError::NonPositiveMinRadius(_))
        ));

        let inverted = PackingRequest {
            min_circle_radius: 0.2,
            max_circle_radius: 0.1,
            ..valid
        };
        assert!(matches!(
            inverted.validate(),
            Err(RequestError::InvertedRadiusRange { .. })
        ));

        let no_attempts = PackingRequest {
            max_attempts: 0,
            ..valid
        };
        assert!(matches!(
            no_attempts.validate(),
            Err(RequestError::ZeroAttempts)
        ));
    }

    #[test]
    fn test_validation_rejects_nan_radii() {
        let request = PackingRequest {
            min_circle_radius: f32::NAN,
            ..PackingRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_packer_new_fails_fast() {
        let request = PackingRequest {
            max_attempts: 0,
            ..PackingRequest::default()
        };
        assert!(CirclePacker::new(request).is_err());
    }

    #[test]
    fn test_radius_distribution_favors_small_circles() {
        let request = PackingRequest {
            min_circle_radius: 0.0,
            max_circle_radius: 1.0,
            ..PackingRequest::default()
        };
        // Bypass validation, sample_radius only reads the radii
        let packer = CirclePacker { request };
        let mut rng = Xorshift64::new(99);

        let n = 10_000;
        let sum: f32 = (0..n).map(|_| packer.sample_radius(&mut rng)).sum();
        let mean = sum / n as f32;

        // E[u^2] = 1/3 for uniform u, well below the midpoint 1/2
        assert!((mean - 1.0 / 3.0).abs() < 0.02, "mean {}", mean);
    }

    #[test]
    fn test_ids_are_sequential_in_placement_order() {
        let request = PackingRequest {
            max_circles: 40,
            ..PackingRequest::default()
        };
        let mut rng = Xorshift64::new(3);
        let packing = generate_packing(request, Topology::Disk, &mut rng).unwrap();
        let CirclePacking::Disk(circles) = packing else {
            panic!("expected disk packing");
        };
        for (index, circle) in circles.iter().enumerate() {
            assert_eq!(circle.id, index as u32);
        }
    }

    #[test]
    fn test_max_circles_zero_returns_empty() {
        let request = PackingRequest {
            max_circles: 0,
            ..PackingRequest::default()
        };
        let mut rng = Xorshift64::new(1);
        let packing = generate_packing(request, Topology::Sphere, &mut rng).unwrap();
        assert!(packing.is_empty());
    }

    #[test]
    fn test_infeasible_min_radius_returns_empty_on_both_topologies() {
        let request = PackingRequest {
            container_radius: 1.0,
            min_circle_radius: 1.5,
            max_circle_radius: 2.0,
            max_attempts: 200,
            max_circles: 10,
        };
        for &topology in Topology::all() {
            let mut rng = Xorshift64::new(11);
            let packing = generate_packing(request, topology, &mut rng).unwrap();
            assert!(
                packing.is_empty(),
                "{} packing should be empty",
                topology.name()
            );
        }
    }

    #[test]
    fn test_exact_fit_radius_lands_at_origin() {
        // A circle as large as the container can only sit at the center
        let request = PackingRequest {
            container_radius: 1.0,
            min_circle_radius: 1.0,
            max_circle_radius: 1.0,
            max_attempts: 10,
            max_circles: 5,
        };
        let mut rng = Xorshift64::new(5);
        let packing = generate_packing(request, Topology::Disk, &mut rng).unwrap();
        let CirclePacking::Disk(circles) = packing else {
            panic!("expected disk packing");
        };
        assert_eq!(circles.len(), 1);
        assert!(circles[0].center.length() < 1e-6);
    }

    #[test]
    fn test_topology_parsing() {
        assert_eq!("disk".parse::<Topology>().unwrap(), Topology::Disk);
        assert_eq!("Sphere".parse::<Topology>().unwrap(), Topology::Sphere);
        assert!("cylinder".parse::<Topology>().is_err());
    }
}
