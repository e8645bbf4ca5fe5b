// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Synaptome Wiring

Connectivity-matrix generators for insect-brain models:
- Deterministic patterns (uniform, diagonal, opposing, sinusoidal,
  chessboard, Kronecker pattern, roll)
- Sparse decorrelated wiring with bounded retries
- Spectral (DCT) transforms, optionally laid out by ommatidia orientation
- PCA/ZCA whitening learned from samples
- Mental rotation tensors

All builders are generic over the element type (`f32` or `f64`) and are
pure functions of their arguments and the random source they are given.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod linalg;
pub mod rng;
pub mod types;

pub use connectivity::*;
pub use rng::{rng_from_config, seeded_rng, RandomSource};
pub use types::{WiringError, WiringResult};

// Re-export core types from synaptome-structures
pub use synaptome_structures::{BiasPolicy, Dtype, Rotation, Synapses, SynapticValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_share_layout() {
        let uniform = uniform_synapses::<f32>(4, 3, 1.0, BiasPolicy::Constant(0.0)).unwrap();
        let random =
            random_synapses::<f32, _>(4, 3, 0.0, 1.0, BiasPolicy::Random, &mut seeded_rng(1))
                .unwrap();
        assert_eq!(uniform.weights().dim(), random.weights().dim());
        assert_eq!(uniform.bias().unwrap().len(), 3);
        assert_eq!(random.bias().unwrap().len(), 3);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
