//! Engine data structures: plane meshes, textures, uniforms, instances and cards.
//!
//! - `mesh` contains the subdivided quad geometry and its GPU buffers
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `uniforms` holds the per-entity uniform block read by the fold kernel
//! - `instance` holds the immutable per-instance attribute table
//! - `plane` bundles GPU resources of single cards and instanced card grids

pub mod instance;
pub mod mesh;
pub mod plane;
pub mod texture;
pub mod uniforms;
