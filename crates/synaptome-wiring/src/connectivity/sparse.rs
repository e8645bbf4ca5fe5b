// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Sparse decorrelated connectivity.

Each output unit is wired to a small random number of inputs (its fan-in
target). Units are wired round-robin over the inputs starting from a random
position, then any unit whose connectivity column is too similar to another
unit's is regenerated. The loop stops once no pair of columns reaches
`min_corr` cosine similarity, or fails after `max_retries` attempts.
*/

use crate::connectivity::common::drawn_bias;
use crate::linalg::{column_cosine_similarity, permute_rows};
use crate::rng::RandomSource;
use crate::types::{ensure_dimensions, WiringError, WiringResult};
use ndarray::Array2;
use synaptome_config::SparseConfig;
use synaptome_structures::{BiasPolicy, Synapses, SynapticValue};
use tracing::{debug, info, warn};

/// Default fan-in ratios (per input unit)
pub const DEFAULT_FAN_IN_MIN_RATIO: f64 = 0.006;
pub const DEFAULT_FAN_IN_MAX_RATIO: f64 = 0.014;

/// Parameters of the sparse generator
#[derive(Debug, Clone, PartialEq)]
pub struct SparseParams {
    /// Minimum fan-in; derived from `nb_in` when `None`
    pub nb_in_min: Option<usize>,
    /// Maximum fan-in; derived from `nb_in` when `None`
    pub nb_in_max: Option<usize>,
    /// Pairwise cosine similarity a column pair must stay below
    pub min_corr: f64,
    /// Scale each column to sum to 1
    pub normalise: bool,
    /// Upper bound on regeneration attempts
    pub max_retries: usize,
    /// Redraw the fan-in targets of stalled units after this many attempts
    /// without progress
    pub reshuffle_after: Option<usize>,
    pub fan_in_min_ratio: f64,
    pub fan_in_max_ratio: f64,
}

impl Default for SparseParams {
    fn default() -> Self {
        Self {
            nb_in_min: None,
            nb_in_max: None,
            min_corr: 0.2,
            normalise: true,
            max_retries: 1000,
            reshuffle_after: None,
            fan_in_min_ratio: DEFAULT_FAN_IN_MIN_RATIO,
            fan_in_max_ratio: DEFAULT_FAN_IN_MAX_RATIO,
        }
    }
}

impl SparseParams {
    pub fn from_config(config: &SparseConfig) -> Self {
        Self {
            nb_in_min: None,
            nb_in_max: None,
            min_corr: config.min_corr,
            normalise: config.normalise,
            max_retries: config.max_retries,
            reshuffle_after: config.reshuffle_after,
            fan_in_min_ratio: config.fan_in_min_ratio,
            fan_in_max_ratio: config.fan_in_max_ratio,
        }
    }

    pub fn with_fan_in(mut self, nb_in_min: usize, nb_in_max: usize) -> Self {
        self.nb_in_min = Some(nb_in_min);
        self.nb_in_max = Some(nb_in_max);
        self
    }

    pub fn with_min_corr(mut self, min_corr: f64) -> Self {
        self.min_corr = min_corr;
        self
    }

    /// Fan-in bounds for `nb_in` inputs, filling in the ratio defaults
    pub fn fan_in_bounds(&self, nb_in: usize) -> (usize, usize) {
        let derive = |ratio: f64| ((nb_in as f64 * ratio).round() as usize).max(1);
        (
            self.nb_in_min.unwrap_or_else(|| derive(self.fan_in_min_ratio)),
            self.nb_in_max.unwrap_or_else(|| derive(self.fan_in_max_ratio)),
        )
    }
}

/// What it took to reach a decorrelated matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergenceStats {
    /// Regeneration attempts, the initial wiring included
    pub iterations: usize,
    /// Size of the regeneration set after each attempt
    pub regenerated: Vec<usize>,
    /// Number of fan-in target redraws
    pub reshuffles: usize,
}

/// Sparse decorrelated synapses of shape `(nb_in, nb_out)`.
///
/// See [`sparse_synapses_with_stats`].
pub fn sparse_synapses<F, R>(
    nb_in: usize,
    nb_out: usize,
    params: &SparseParams,
    bias: BiasPolicy,
    rng: &mut R,
) -> WiringResult<Synapses<F>>
where
    F: SynapticValue,
    R: RandomSource + ?Sized,
{
    sparse_synapses_with_stats(nb_in, nb_out, params, bias, rng).map(|(syn, _)| syn)
}

/// Sparse decorrelated synapses together with convergence statistics.
///
/// Every column ends with between `nb_in_min` and `nb_in_max` non-zero
/// entries (strictly below `nb_in_max` unless the bounds are equal), each
/// `1 / fan-in` when normalising and `1` otherwise. The rows are permuted
/// once at the end. A `Random` bias is drawn from `[0, 1)`.
///
/// # Errors
/// `InvalidParameters` on zero dimensions, inconsistent fan-in bounds, a zero
/// retry budget or a non-finite `min_corr`; `ConvergenceFailure` when the
/// retry budget runs out with units still too similar.
pub fn sparse_synapses_with_stats<F, R>(
    nb_in: usize,
    nb_out: usize,
    params: &SparseParams,
    bias: BiasPolicy,
    rng: &mut R,
) -> WiringResult<(Synapses<F>, ConvergenceStats)>
where
    F: SynapticValue,
    R: RandomSource + ?Sized,
{
    ensure_dimensions(nb_in, nb_out)?;
    let (nb_in_min, nb_in_max) = params.fan_in_bounds(nb_in);
    validate(nb_in, nb_in_min, nb_in_max, params)?;
    let min_corr = params.min_corr.clamp(0.0, 1.0);

    debug!(target: "synaptome-wiring",
        "Sparse wiring {}x{} with fan-in [{}, {}] and min_corr {}",
        nb_in, nb_out, nb_in_min, nb_in_max, min_corr);

    let mut targets: Vec<usize> = (0..nb_out)
        .map(|_| draw_target(nb_in_min, nb_in_max, rng))
        .collect();
    let mut weights = Array2::<f64>::zeros((nb_in, nb_out));
    let mut fan_in = vec![0usize; nb_out];
    let mut pending: Vec<usize> = (0..nb_out).collect();
    let mut stats = ConvergenceStats::default();
    let mut stalled = 0usize;

    while !pending.is_empty() {
        if stats.iterations >= params.max_retries {
            warn!(target: "synaptome-wiring",
                "Sparse wiring gave up after {} attempts with {} units unresolved",
                stats.iterations, pending.len());
            return Err(WiringError::ConvergenceFailure {
                attempts: stats.iterations,
                unresolved: pending.len(),
            });
        }
        stats.iterations += 1;

        for &unit in &pending {
            weights.column_mut(unit).fill(0.0);
            fan_in[unit] = 0;
        }
        wire_round_robin(
            &mut weights,
            &mut fan_in,
            &targets,
            &pending,
            params.normalise,
            rng,
        );

        let previous = pending.len();
        pending = correlated_units(&weights, min_corr);
        stats.regenerated.push(pending.len());
        debug!(target: "synaptome-wiring",
            "Attempt {}: {} units to regenerate", stats.iterations, pending.len());

        if let Some(patience) = params.reshuffle_after {
            if pending.len() < previous {
                stalled = 0;
            } else {
                stalled += 1;
            }
            if !pending.is_empty() && stalled >= patience {
                for &unit in &pending {
                    targets[unit] = draw_target(nb_in_min, nb_in_max, rng);
                }
                stalled = 0;
                stats.reshuffles += 1;
                warn!(target: "synaptome-wiring",
                    "Redrew fan-in targets of {} stalled units", pending.len());
            }
        }
    }

    info!(target: "synaptome-wiring",
        "Sparse wiring converged after {} attempts", stats.iterations);

    let weights = permute_rows(&weights.mapv(F::from_f64), rng);
    let bias = drawn_bias(bias, nb_out, 0.0, 1.0, rng);
    Ok((Synapses::new(weights, bias), stats))
}

fn validate(
    nb_in: usize,
    nb_in_min: usize,
    nb_in_max: usize,
    params: &SparseParams,
) -> WiringResult<()> {
    if nb_in_min == 0 {
        return Err(WiringError::InvalidParameters(
            "minimum fan-in must be at least 1".to_string(),
        ));
    }
    if nb_in_max < nb_in_min || nb_in_max > nb_in {
        return Err(WiringError::InvalidParameters(format!(
            "fan-in bounds [{}, {}] must satisfy min <= max <= nb_in ({})",
            nb_in_min, nb_in_max, nb_in
        )));
    }
    if params.max_retries == 0 {
        return Err(WiringError::InvalidParameters(
            "max_retries must be at least 1".to_string(),
        ));
    }
    if !params.min_corr.is_finite() {
        return Err(WiringError::InvalidParameters(format!(
            "min_corr must be finite, got {}",
            params.min_corr
        )));
    }
    Ok(())
}

/// `floor(u · (max − min) + min)` for `u ∈ [0, 1)`
fn draw_target<R: RandomSource + ?Sized>(nb_in_min: usize, nb_in_max: usize, rng: &mut R) -> usize {
    let span = (nb_in_max - nb_in_min) as f64;
    let target = (rng.uniform() * span + nb_in_min as f64).floor() as usize;
    target.clamp(nb_in_min, nb_in_max)
}

/// Wire the `pending` units up to their targets, visiting inputs circularly
fn wire_round_robin<R: RandomSource + ?Sized>(
    weights: &mut Array2<f64>,
    fan_in: &mut [usize],
    targets: &[usize],
    pending: &[usize],
    normalise: bool,
    rng: &mut R,
) {
    let nb_in = weights.nrows();
    let mut input = rng.integer(0, nb_in.saturating_sub(1));
    let mut order = pending.to_vec();

    while pending.iter().any(|&unit| fan_in[unit] < targets[unit]) {
        rng.shuffle(&mut order);
        let mut assigned = false;
        for &unit in &order {
            if fan_in[unit] >= targets[unit] || weights[[input, unit]] > 0.0 {
                continue;
            }
            weights[[input, unit]] = if normalise {
                1.0 / targets[unit] as f64
            } else {
                1.0
            };
            fan_in[unit] += 1;
            input = (input + 1) % nb_in;
            assigned = true;
        }
        if !assigned {
            input = (input + 1) % nb_in;
        }
    }
}

/// Units whose column reaches `min_corr` similarity with another column
fn correlated_units(weights: &Array2<f64>, min_corr: f64) -> Vec<usize> {
    let similarity = column_cosine_similarity(&weights.view());
    (0..weights.ncols())
        .filter(|&unit| {
            similarity
                .column(unit)
                .iter()
                .enumerate()
                .any(|(other, &c)| other != unit && c >= min_corr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn params(nb_in_min: usize, nb_in_max: usize, min_corr: f64) -> SparseParams {
        SparseParams::default()
            .with_fan_in(nb_in_min, nb_in_max)
            .with_min_corr(min_corr)
    }

    #[test]
    fn test_default_fan_in_bounds_round() {
        let params = SparseParams::default();
        assert_eq!(params.fan_in_bounds(1000), (6, 14));
        assert_eq!(params.fan_in_bounds(250), (2, 4));
        assert_eq!(params.fan_in_bounds(10), (1, 1));
    }

    #[test]
    fn test_fan_in_within_bounds() {
        let mut rng = seeded_rng(2021);
        let syn = sparse_synapses::<f32, _>(100, 40, &params(3, 6, 0.5), BiasPolicy::None, &mut rng)
            .unwrap();
        for column in syn.weights().columns() {
            let count = column.iter().filter(|&&w| w > 0.0).count();
            assert!((3..6).contains(&count), "fan-in {}", count);
            let sum: f32 = column.sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_columns_decorrelated() {
        let mut rng = seeded_rng(7);
        let syn = sparse_synapses::<f64, _>(60, 30, &params(3, 5, 0.4), BiasPolicy::None, &mut rng)
            .unwrap();
        let similarity = column_cosine_similarity(&syn.weights().view());
        for ((i, j), &c) in similarity.indexed_iter() {
            if i != j {
                assert!(c < 0.4, "columns {} and {} have similarity {}", i, j, c);
            }
        }
    }

    #[test]
    fn test_unnormalised_weights_are_binary() {
        let mut rng = seeded_rng(3);
        let params = SparseParams {
            normalise: false,
            ..params(2, 4, 0.6)
        };
        let syn = sparse_synapses::<f32, _>(50, 10, &params, BiasPolicy::Constant(0.5), &mut rng)
            .unwrap();
        assert!(syn.weights().iter().all(|&w| w == 0.0 || w == 1.0));
        assert_eq!(syn.bias().unwrap().to_vec(), vec![0.5f32; 10]);
    }

    #[test]
    fn test_reseeding_reproduces_matrix() {
        let p = params(2, 5, 0.5);
        let a = sparse_synapses::<f32, _>(80, 20, &p, BiasPolicy::Random, &mut seeded_rng(11))
            .unwrap();
        let b = sparse_synapses::<f32, _>(80, 20, &p, BiasPolicy::Random, &mut seeded_rng(11))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.bias().unwrap().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_impossible_decorrelation_fails() {
        let p = SparseParams {
            max_retries: 5,
            ..params(1, 1, 0.5)
        };
        let result =
            sparse_synapses_with_stats::<f32, _>(2, 10, &p, BiasPolicy::None, &mut seeded_rng(1));
        match result {
            Err(WiringError::ConvergenceFailure {
                attempts,
                unresolved,
            }) => {
                assert_eq!(attempts, 5);
                assert!(unresolved > 0);
            }
            other => panic!("expected convergence failure, got {:?}", other),
        }
    }

    #[test]
    fn test_reshuffle_policy_stays_within_budget() {
        let p = SparseParams {
            max_retries: 6,
            reshuffle_after: Some(2),
            ..params(1, 2, 0.5)
        };
        let result =
            sparse_synapses_with_stats::<f32, _>(2, 10, &p, BiasPolicy::None, &mut seeded_rng(1));
        assert!(matches!(result, Err(WiringError::ConvergenceFailure { attempts: 6, .. })));
    }

    #[test]
    fn test_stats_track_attempts() {
        let (_, stats) = sparse_synapses_with_stats::<f64, _>(
            200,
            20,
            &params(4, 8, 0.5),
            BiasPolicy::None,
            &mut seeded_rng(5),
        )
        .unwrap();
        assert!(stats.iterations >= 1);
        assert_eq!(stats.regenerated.len(), stats.iterations);
        assert_eq!(stats.regenerated.last(), Some(&0));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = seeded_rng(0);
        let cases = [
            (0, 5, params(1, 1, 0.2)),
            (10, 5, params(0, 2, 0.2)),
            (10, 5, params(4, 3, 0.2)),
            (10, 5, params(2, 11, 0.2)),
            (10, 5, SparseParams { max_retries: 0, ..params(1, 2, 0.2) }),
            (10, 5, params(1, 2, f64::NAN)),
        ];
        for (nb_in, nb_out, p) in cases {
            let result = sparse_synapses::<f32, _>(nb_in, nb_out, &p, BiasPolicy::None, &mut rng);
            assert!(
                matches!(result, Err(WiringError::InvalidParameters(_))),
                "{:?}",
                p
            );
        }
    }

    #[test]
    fn test_config_bridge() {
        let config = SparseConfig {
            min_corr: 0.3,
            max_retries: 10,
            reshuffle_after: Some(4),
            ..SparseConfig::default()
        };
        let p = SparseParams::from_config(&config);
        assert_eq!(p.min_corr, 0.3);
        assert_eq!(p.max_retries, 10);
        assert_eq!(p.reshuffle_after, Some(4));
        assert_eq!(p.nb_in_min, None);
    }
}
