//! Terramesh Core - Foundational types for the Terramesh exporter
//!
//! This crate provides the types that the other Terramesh crates depend on:
//! - `Vec2`, `Vec3` - Spatial types used for positions, normals and UVs
//! - `ContentHash` - SHA-256 based content hashing of exported mesh bodies
//! - Error types and Result alias

mod error;
mod hash;
mod types;

pub use error::{Result, TerrameshError};
pub use hash::{ContentHash, HashingWriter};
pub use types::{Vec2, Vec3};
