// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Element types for generated matrices
//!
//! Every generator is generic over [`SynapticValue`], so the caller picks the
//! dtype at the type level and gets exactly that element type back.
//! Intermediate arithmetic runs in `f64` and is converted once per entry.

use core::fmt;
use ndarray::NdFloat;
use serde::{Deserialize, Serialize};

/// Runtime name of a matrix element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// 32-bit IEEE float (default)
    #[default]
    Float32,
    /// 64-bit IEEE float
    Float64,
}

impl Dtype {
    /// Size of one element in bytes
    pub const fn size_of(&self) -> usize {
        match self {
            Dtype::Float32 => 4,
            Dtype::Float64 => 8,
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dtype::Float32 => write!(f, "float32"),
            Dtype::Float64 => write!(f, "float64"),
        }
    }
}

/// Floating-point element of a weight matrix, bias vector or tensor
///
/// # Example
/// ```
/// use synaptome_structures::{Dtype, SynapticValue};
///
/// assert_eq!(<f32 as SynapticValue>::DTYPE, Dtype::Float32);
/// assert_eq!(f64::from_f64(0.25), 0.25);
/// ```
pub trait SynapticValue: NdFloat + Default {
    /// Runtime tag of this element type
    const DTYPE: Dtype;

    /// Convert from the `f64` working precision
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`
    fn to_f64(self) -> f64;
}

impl SynapticValue for f32 {
    const DTYPE: Dtype = Dtype::Float32;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl SynapticValue for f64 {
    const DTYPE: Dtype = Dtype::Float64;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}
