// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Whitening synapses.

The generator delegates the transform itself to a [`Whitening`]
implementation; PCA and ZCA are provided by [`WhiteningMethod`].
*/

use crate::linalg::symmetric_eigen;
use crate::types::{WiringError, WiringResult};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use synaptome_config::{WhiteningConfig, WhiteningKind};
use synaptome_structures::{Synapses, SynapticValue};

/// A whitening transform learned from samples.
///
/// `samples` has one observation per row and one channel per column. The
/// result maps centred samples (`x - mean`) to `nb_out` decorrelated outputs
/// and has shape `(channels, nb_out)`.
pub trait Whitening<F: SynapticValue> {
    fn whiten(
        &self,
        samples: &ArrayView2<F>,
        nb_out: usize,
        mean: &ArrayView1<F>,
    ) -> WiringResult<Array2<F>>;
}

/// Eigen-based whitening transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhiteningMethod {
    /// `V · diag(1 / sqrt(λ + ε))`, keeping the `nb_out` strongest components
    Pca { epsilon: f64 },
    /// `V · diag(1 / sqrt(λ + ε)) · Vᵀ`, keeping the first `nb_out` columns
    Zca { epsilon: f64 },
}

impl Default for WhiteningMethod {
    fn default() -> Self {
        WhiteningMethod::Pca { epsilon: 1e-5 }
    }
}

impl WhiteningMethod {
    pub fn from_config(config: &WhiteningConfig) -> Self {
        match config.method {
            WhiteningKind::Pca => WhiteningMethod::Pca {
                epsilon: config.epsilon,
            },
            WhiteningKind::Zca => WhiteningMethod::Zca {
                epsilon: config.epsilon,
            },
        }
    }

    fn epsilon(&self) -> f64 {
        match self {
            WhiteningMethod::Pca { epsilon } | WhiteningMethod::Zca { epsilon } => *epsilon,
        }
    }
}

impl<F: SynapticValue> Whitening<F> for WhiteningMethod {
    fn whiten(
        &self,
        samples: &ArrayView2<F>,
        nb_out: usize,
        mean: &ArrayView1<F>,
    ) -> WiringResult<Array2<F>> {
        validate_shapes(samples.dim(), nb_out)?;
        if mean.len() != samples.ncols() {
            return Err(WiringError::DimensionMismatch {
                expected: (1, samples.ncols()),
                actual: (1, mean.len()),
            });
        }

        let covariance = covariance(samples, mean);
        let (eigenvalues, eigenvectors) = symmetric_eigen(&covariance.view())?;

        let epsilon = self.epsilon();
        let inv_sqrt = eigenvalues
            .iter()
            .map(|&lambda| {
                let shifted = lambda + epsilon;
                if shifted > 0.0 {
                    Ok(1.0 / shifted.sqrt())
                } else {
                    Err(WiringError::Numerical(format!(
                        "covariance eigenvalue {} is not positive after adding epsilon {}",
                        lambda, epsilon
                    )))
                }
            })
            .collect::<WiringResult<Array1<f64>>>()?;

        let scaled = &eigenvectors * &inv_sqrt;
        let transform = match self {
            WhiteningMethod::Pca { .. } => scaled.slice(s![.., ..nb_out]).to_owned(),
            WhiteningMethod::Zca { .. } => {
                scaled.dot(&eigenvectors.t()).slice(s![.., ..nb_out]).to_owned()
            }
        };
        Ok(transform.mapv(F::from_f64))
    }
}

/// Whitening weights learned from `samples` (rows = observations).
///
/// The per-channel mean is computed unless supplied. `nb_out` defaults to the
/// channel count. With `with_bias` the mean is returned as the bias.
///
/// # Errors
/// `InvalidParameters` for empty samples or an `nb_out` outside
/// `1..=channels`; `DimensionMismatch` when a supplied mean has the wrong
/// length; anything the whitening implementation reports.
pub fn whitening_synapses<F, W>(
    samples: &ArrayView2<F>,
    nb_out: Option<usize>,
    samples_mean: Option<Array1<F>>,
    method: &W,
    with_bias: bool,
) -> WiringResult<Synapses<F>>
where
    F: SynapticValue,
    W: Whitening<F> + ?Sized,
{
    let nb_channels = samples.ncols();
    let nb_out = nb_out.unwrap_or(nb_channels);
    validate_shapes(samples.dim(), nb_out)?;

    let mean = match samples_mean {
        Some(mean) if mean.len() != nb_channels => {
            return Err(WiringError::DimensionMismatch {
                expected: (1, nb_channels),
                actual: (1, mean.len()),
            });
        }
        Some(mean) => mean,
        None => channel_mean(samples),
    };

    let weights = method.whiten(samples, nb_out, &mean.view())?;
    let bias = with_bias.then_some(mean);
    Ok(Synapses::new(weights, bias))
}

/// Non-empty samples and `nb_out` within `1..=channels`
fn validate_shapes((nb_samples, nb_channels): (usize, usize), nb_out: usize) -> WiringResult<()> {
    if nb_samples == 0 || nb_channels == 0 {
        return Err(WiringError::InvalidParameters(format!(
            "whitening needs a non-empty sample matrix, got {}x{}",
            nb_samples, nb_channels
        )));
    }
    if nb_out == 0 || nb_out > nb_channels {
        return Err(WiringError::InvalidParameters(format!(
            "nb_out must be within 1..={}, got {}",
            nb_channels, nb_out
        )));
    }
    Ok(())
}

fn channel_mean<F: SynapticValue>(samples: &ArrayView2<F>) -> Array1<F> {
    let nb_samples = samples.nrows() as f64;
    samples
        .axis_iter(Axis(1))
        .map(|channel| F::from_f64(channel.iter().map(|&v| v.to_f64()).sum::<f64>() / nb_samples))
        .collect()
}

/// Population covariance `(X − μ)ᵀ (X − μ) / n` in `f64`
fn covariance<F: SynapticValue>(samples: &ArrayView2<F>, mean: &ArrayView1<F>) -> Array2<f64> {
    let centred = Array2::from_shape_fn(samples.dim(), |(i, j)| {
        samples[[i, j]].to_f64() - mean[j].to_f64()
    });
    centred.t().dot(&centred) / samples.nrows() as f64
}
