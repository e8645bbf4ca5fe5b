// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity generators.

Every builder returns weights shaped `(nb_in, nb_out)`; the optional bias
has length `nb_out`. Stochastic builders take the random source explicitly.
*/

mod common;
pub mod mental_rotation;
pub mod patterns;
pub mod random;
pub mod sparse;
pub mod spectral;
pub mod whitening;

pub use mental_rotation::{mental_rotation_synapses, preference_angles, RotationParams};
pub use patterns::{
    chessboard_synapses, diagonal_synapses, opposing_synapses, pattern_synapses, roll_synapses,
    sinusoidal_synapses, uniform_synapses, RollShift,
};
pub use random::random_synapses;
pub use sparse::{sparse_synapses, sparse_synapses_with_stats, ConvergenceStats, SparseParams};
pub use spectral::{dct_omm_synapses, dct_synapses};
pub use whitening::{whitening_synapses, Whitening, WhiteningMethod};
