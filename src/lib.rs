//! Circle Packing Library
//!
//! Randomized generation of maximal non-overlapping circle packings:
//! - Flat disk and sphere-surface container topologies
//! - Squared-uniform radius distribution biased toward small circles
//! - Injectable random source for reproducible runs

pub mod config;
pub mod export;
pub mod packing;

pub use config::PackingConfig;
pub use packing::{generate_packing, CirclePacker, CirclePacking, PackingRequest, Topology};
