// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Uniformly random synapses.
*/

use crate::connectivity::common::drawn_bias;
use crate::rng::RandomSource;
use crate::types::{ensure_dimensions, WiringError, WiringResult};
use ndarray::Array2;
use synaptome_structures::{BiasPolicy, Synapses, SynapticValue};

/// Weights drawn uniformly from `[w_min, w_max)`, row by row.
///
/// A `Random` bias is drawn from the same range after the weights.
pub fn random_synapses<F, R>(
    nb_in: usize,
    nb_out: usize,
    w_min: f64,
    w_max: f64,
    bias: BiasPolicy,
    rng: &mut R,
) -> WiringResult<Synapses<F>>
where
    F: SynapticValue,
    R: RandomSource + ?Sized,
{
    ensure_dimensions(nb_in, nb_out)?;
    if !(w_min.is_finite() && w_max.is_finite()) || w_max < w_min {
        return Err(WiringError::InvalidParameters(format!(
            "weight range must be finite with w_min <= w_max, got [{}, {})",
            w_min, w_max
        )));
    }

    let weights =
        Array2::from_shape_fn((nb_in, nb_out), |_| F::from_f64(rng.uniform_range(w_min, w_max)));
    let bias = drawn_bias(bias, nb_out, w_min, w_max, rng);
    Ok(Synapses::new(weights, bias))
}
