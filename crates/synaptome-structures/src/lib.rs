// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaptome-structures
//!
//! Value types shared across the synaptome workspace:
//! - **Value**: the element type (dtype) of generated matrices (`f32`, `f64`)
//! - **Synapses**: a weight matrix with its optional bias vector
//! - **Geometry**: unit-quaternion rotations describing unit orientations
//!
//! Everything here is a plain value. Nothing holds state across calls.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod geometry;
pub mod synapses;
pub mod value;

pub use error::{StructureError, StructureResult};
pub use geometry::{Rotation, REFERENCE_DIRECTION};
pub use synapses::{BiasPolicy, Synapses};
pub use value::{Dtype, SynapticValue};
