//! Placed circle types and overlap geometry.
//!
//! A packing run produces either flat circles inside a disk or spherical
//! caps on a sphere surface. Positions are in the container's local frame,
//! centered at the origin.
//!
//! # Overlap on the sphere
//!
//! Cap separation is tested against the straight-line (chordal) distance
//! between the two surface points, with each cap radius shrunk by a
//! first-order curvature correction so the chordal test approximates the
//! geodesic angular separation. The correction is an accepted approximation
//! of exact spherical-cap non-overlap.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Unique identifier for a placed circle, assigned in placement order.
pub type CircleId = u32;

/// Circle placed inside a flat disk container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Placement-order identifier
    pub id: CircleId,
    /// Center position in the disk's local frame
    pub center: Vec2,
    /// Circle radius
    pub radius: f32,
}

impl Circle {
    /// Create a new placed circle.
    pub fn new(id: CircleId, center: Vec2, radius: f32) -> Self {
        Self { id, center, radius }
    }

    /// Planar distance between this circle's center and another's.
    pub fn center_distance(&self, other: &Circle) -> f32 {
        self.center.distance(other.center)
    }

    /// Check if this circle overlaps with another.
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center_distance(other) < self.radius + other.radius
    }

    /// Distance from the container origin to the circle's far edge.
    pub fn outer_reach(&self) -> f32 {
        self.center.length() + self.radius
    }

    /// Area of the circle.
    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }
}

/// Cap placed on the surface of a sphere container.
///
/// `center` lies on the sphere surface (`|center| == R` within floating-point
/// tolerance); `radius` is the cap radius in the same linear units as the
/// sphere radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCap {
    /// Placement-order identifier
    pub id: CircleId,
    /// Surface point in the sphere's local frame
    pub center: Vec3,
    /// Cap radius
    pub radius: f32,
}

impl SphericalCap {
    /// Create a new placed cap.
    pub fn new(id: CircleId, center: Vec3, radius: f32) -> Self {
        Self { id, center, radius }
    }

    /// Straight-line 3D distance between this cap's surface point and another's.
    pub fn chordal_distance(&self, other: &SphericalCap) -> f32 {
        self.center.distance(other.center)
    }

    /// Cap radius after the curvature correction used by the overlap test.
    pub fn effective_radius(&self, sphere_radius: f32) -> f32 {
        effective_cap_radius(self.radius, sphere_radius)
    }

    /// Check if this cap overlaps with another under the chordal test.
    pub fn overlaps(&self, other: &SphericalCap, sphere_radius: f32) -> bool {
        self.chordal_distance(other)
            < self.effective_radius(sphere_radius) + other.effective_radius(sphere_radius)
    }

    /// Surface area of the cap, treating `radius` as a geodesic radius:
    /// A = 2*pi*R^2 * (1 - cos(r/R))
    pub fn area(&self, sphere_radius: f32) -> f32 {
        let angular_radius = self.radius / sphere_radius;
        2.0 * PI * sphere_radius * sphere_radius * (1.0 - angular_radius.cos())
    }
}

/// First-order curvature correction: shrinks a cap's nominal radius so that
/// chordal-distance overlap testing approximates geodesic separation.
pub fn effective_cap_radius(radius: f32, sphere_radius: f32) -> f32 {
    radius * (1.0 - radius / (2.0 * sphere_radius))
}

/// Convert spherical coordinates to Cartesian.
///
/// `theta` is the longitude in [0, 2*pi), `phi` the polar angle in [0, pi].
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Fully materialized output of one packing run, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", content = "circles", rename_all = "lowercase")]
pub enum CirclePacking {
    /// Circles inside a flat disk
    Disk(Vec<Circle>),
    /// Caps on a sphere surface
    Sphere(Vec<SphericalCap>),
}

impl CirclePacking {
    /// Number of placed circles.
    pub fn len(&self) -> usize {
        match self {
            CirclePacking::Disk(circles) => circles.len(),
            CirclePacking::Sphere(caps) => caps.len(),
        }
    }

    /// True when no circle was placed. An empty packing is a valid result,
    /// not an error.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fraction of the container surface covered by placed circles.
    ///
    /// For sphere packings this uses the geodesic cap-area formula, so it is
    /// an estimate consistent with the approximate overlap test.
    pub fn coverage(&self, container_radius: f32) -> f32 {
        match self {
            CirclePacking::Disk(circles) => {
                let covered: f32 = circles.iter().map(Circle::area).sum();
                covered / (PI * container_radius * container_radius)
            }
            CirclePacking::Sphere(caps) => {
                let covered: f32 = caps.iter().map(|cap| cap.area(container_radius)).sum();
                covered / (4.0 * PI * container_radius * container_radius)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap_is_symmetric() {
        let a = Circle::new(0, Vec2::new(0.0, 0.0), 0.5);
        let b = Circle::new(1, Vec2::new(0.8, 0.0), 0.5);
        let c = Circle::new(2, Vec2::new(1.2, 0.0), 0.5);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        let a = Circle::new(0, Vec2::new(0.0, 0.0), 0.5);
        let b = Circle::new(1, Vec2::new(1.0, 0.0), 0.5);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_outer_reach() {
        let circle = Circle::new(0, Vec2::new(0.3, 0.4), 0.2);
        assert!((circle.outer_reach() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_effective_radius_shrinks_with_cap_size() {
        let sphere_radius = 1.0;
        let small = effective_cap_radius(0.05, sphere_radius);
        let large = effective_cap_radius(0.4, sphere_radius);

        // Correction is relative: larger caps lose a larger fraction
        assert!((small / 0.05) > (large / 0.4));
        assert!(small < 0.05);
        assert!(large < 0.4);
    }

    #[test]
    fn test_spherical_to_cartesian_on_surface() {
        let radius = 2.5;
        for (theta, phi) in [(0.0, 0.0), (1.0, 1.0), (3.0, 2.0), (5.5, 3.0)] {
            let point = spherical_to_cartesian(radius, theta, phi);
            assert!(
                (point.length() - radius).abs() < 1e-5,
                "point not on sphere: |p| = {}, expected {}",
                point.length(),
                radius
            );
        }
    }

    #[test]
    fn test_cap_overlap_uses_curvature_correction() {
        // Caps of radius 0.4 on a unit sphere, 0.7 rad apart: the chordal
        // distance 2*sin(0.35) = 0.686 sits between the corrected separation
        // (2 * 0.4 * 0.8 = 0.64) and the nominal one (0.8)
        let sphere_radius = 1.0;
        let a = SphericalCap::new(0, Vec3::new(1.0, 0.0, 0.0), 0.4);
        let b = SphericalCap::new(1, Vec3::new((0.7f32).cos(), (0.7f32).sin(), 0.0), 0.4);

        assert!(a.chordal_distance(&b) < a.radius + b.radius);
        assert!(!a.overlaps(&b, sphere_radius));
    }

    #[test]
    fn test_disk_coverage_of_full_circle() {
        let packing = CirclePacking::Disk(vec![Circle::new(0, Vec2::ZERO, 1.0)]);
        assert!((packing.coverage(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_packing() {
        let packing = CirclePacking::Sphere(Vec::new());
        assert!(packing.is_empty());
        assert_eq!(packing.len(), 0);
        assert_eq!(packing.coverage(1.0), 0.0);
    }
}
