// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Bias construction shared by the generators.
*/

use crate::rng::RandomSource;
use crate::types::{WiringError, WiringResult};
use ndarray::Array1;
use synaptome_structures::{BiasPolicy, SynapticValue};

/// Bias for generators without a random source; `Random` is rejected
pub(crate) fn fixed_bias<F: SynapticValue>(
    policy: BiasPolicy,
    len: usize,
) -> WiringResult<Option<Array1<F>>> {
    match policy {
        BiasPolicy::None => Ok(None),
        BiasPolicy::Constant(value) => Ok(Some(Array1::from_elem(len, F::from_f64(value)))),
        BiasPolicy::Random => Err(WiringError::InvalidParameters(
            "a random bias needs a generator that takes a random source".to_string(),
        )),
    }
}

/// Bias for stochastic generators; `Random` draws each entry in `[low, high)`
pub(crate) fn drawn_bias<F, R>(
    policy: BiasPolicy,
    len: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Option<Array1<F>>
where
    F: SynapticValue,
    R: RandomSource + ?Sized,
{
    match policy {
        BiasPolicy::None => None,
        BiasPolicy::Constant(value) => Some(Array1::from_elem(len, F::from_f64(value))),
        BiasPolicy::Random => Some(Array1::from_shape_fn(len, |_| {
            F::from_f64(rng.uniform_range(low, high))
        })),
    }
}
