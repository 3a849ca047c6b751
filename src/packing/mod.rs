//! Packing generation modules
//!
//! Contains the circle packing core:
//! - Circle: placed circle and spherical cap types with overlap geometry
//! - Generator: rejection-sampling placement loop
//! - Rng: injectable pseudo-random source

pub mod circle;
pub mod generator;
pub mod rng;

pub use circle::{
    effective_cap_radius, spherical_to_cartesian, Circle, CircleId, CirclePacking, SphericalCap,
};
pub use generator::{generate_packing, CirclePacker, PackingRequest, RequestError, Topology};
pub use rng::{RandomSource, Xorshift64};
