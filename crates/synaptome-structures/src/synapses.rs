// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Generated connectivity: a weight matrix and an optional bias vector

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// How a generator should build the bias vector
///
/// - `None`: only the weights are returned
/// - `Random`: the bias is drawn from the generator's random source
/// - `Constant(v)`: every bias entry equals `v`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasPolicy {
    #[default]
    None,
    Random,
    Constant(f64),
}

impl BiasPolicy {
    /// True unless the policy is `None`
    pub fn is_requested(&self) -> bool {
        !matches!(self, BiasPolicy::None)
    }
}

impl From<f64> for BiasPolicy {
    fn from(value: f64) -> Self {
        BiasPolicy::Constant(value)
    }
}

impl From<Option<f64>> for BiasPolicy {
    fn from(value: Option<f64>) -> Self {
        value.map_or(BiasPolicy::None, BiasPolicy::Constant)
    }
}

/// Connectivity between `nb_in` input units (rows) and `nb_out` output units (columns)
///
/// A zero weight means "not connected". The bias, when present, holds one
/// offset per output unit, except for whitening transforms where it carries
/// the per-channel sample mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapses<F> {
    weights: Array2<F>,
    bias: Option<Array1<F>>,
}

impl<F> Synapses<F> {
    pub fn new(weights: Array2<F>, bias: Option<Array1<F>>) -> Self {
        Self { weights, bias }
    }

    /// Weights without a bias
    pub fn weights_only(weights: Array2<F>) -> Self {
        Self {
            weights,
            bias: None,
        }
    }

    pub fn weights(&self) -> &Array2<F> {
        &self.weights
    }

    pub fn bias(&self) -> Option<&Array1<F>> {
        self.bias.as_ref()
    }

    /// Number of input units (rows)
    pub fn nb_in(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of output units (columns)
    pub fn nb_out(&self) -> usize {
        self.weights.ncols()
    }

    pub fn into_weights(self) -> Array2<F> {
        self.weights
    }

    pub fn into_parts(self) -> (Array2<F>, Option<Array1<F>>) {
        (self.weights, self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_bias_policy_conversions() {
        assert_eq!(BiasPolicy::from(0.5), BiasPolicy::Constant(0.5));
        assert_eq!(BiasPolicy::from(None), BiasPolicy::None);
        assert!(!BiasPolicy::default().is_requested());
        assert!(BiasPolicy::Random.is_requested());
    }

    #[test]
    fn test_bias_policy_serde() {
        let policy: BiasPolicy = serde_json::from_str("{\"constant\":1.5}").unwrap();
        assert_eq!(policy, BiasPolicy::Constant(1.5));
        let policy: BiasPolicy = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(policy, BiasPolicy::Random);
    }

    #[test]
    fn test_synapses_accessors() {
        let syn = Synapses::new(array![[1.0f32, 0.0, 2.0]], Some(array![0.0f32, 0.0, 0.0]));
        assert_eq!(syn.nb_in(), 1);
        assert_eq!(syn.nb_out(), 3);
        assert_eq!(syn.bias().map(|b| b.len()), Some(3));

        let (w, b) = syn.into_parts();
        assert_eq!(w[[0, 2]], 2.0);
        assert!(b.is_some());
    }
}
