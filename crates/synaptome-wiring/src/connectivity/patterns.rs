// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Deterministic pattern synapses.

Closed-form builders: uniform, diagonal, opposing, sinusoidal, chessboard,
generic Kronecker pattern, and circular roll of an existing matrix. Calling
any of them twice with the same arguments gives bit-identical output.
*/

use crate::connectivity::common::fixed_bias;
use crate::linalg::kron;
use crate::types::{ensure_dimensions, WiringError, WiringResult};
use ndarray::{Array2, ArrayView2, Axis};
use std::f64::consts::TAU;
use synaptome_structures::{BiasPolicy, Synapses, SynapticValue};

/// Every weight equals `fill_value`.
///
/// # Example
/// ```
/// use synaptome_structures::BiasPolicy;
/// use synaptome_wiring::uniform_synapses;
///
/// let syn = uniform_synapses::<f32>(3, 2, 1.0, BiasPolicy::None).unwrap();
/// assert_eq!(syn.weights().dim(), (3, 2));
/// assert!(syn.weights().iter().all(|&w| w == 1.0));
/// ```
pub fn uniform_synapses<F: SynapticValue>(
    nb_in: usize,
    nb_out: usize,
    fill_value: f64,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    ensure_dimensions(nb_in, nb_out)?;
    let weights = Array2::from_elem((nb_in, nb_out), F::from_f64(fill_value));
    Ok(Synapses::new(weights, fixed_bias(bias, nb_out)?))
}

/// `fill_value` on the diagonal, zero elsewhere.
///
/// With `tile`, when one dimension is an exact multiple `k > 1` of the other,
/// the identity block repeats `k` times along the larger dimension:
/// ```text
/// diagonal(3, 6, tile) = [[1, 0, 0, 1, 0, 0],
///                         [0, 1, 0, 0, 1, 0],
///                         [0, 0, 1, 0, 0, 1]]
/// ```
/// When the ratio is below 2 the untiled diagonal is returned.
///
/// # Errors
/// `PreconditionViolation` when tiling is requested and the larger dimension is at
/// least twice the smaller but not an exact multiple of it.
pub fn diagonal_synapses<F: SynapticValue>(
    nb_in: usize,
    nb_out: usize,
    fill_value: f64,
    tile: bool,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    ensure_dimensions(nb_in, nb_out)?;
    let fill = F::from_f64(fill_value);

    let tile_rows = tile && nb_in / nb_out > 1;
    let tile_cols = tile && nb_out / nb_in > 1;
    if (tile_rows && nb_in % nb_out != 0) || (tile_cols && nb_out % nb_in != 0) {
        return Err(WiringError::PreconditionViolation(format!(
            "cannot tile a diagonal over {}x{}: the larger size is not a multiple of the smaller",
            nb_in, nb_out
        )));
    }

    let weights = Array2::from_shape_fn((nb_in, nb_out), |(i, j)| {
        let on_diagonal = if tile_rows {
            i % nb_out == j
        } else if tile_cols {
            j % nb_in == i
        } else {
            i == j
        };
        if on_diagonal {
            fill
        } else {
            F::zero()
        }
    });
    Ok(Synapses::new(weights, fixed_bias(bias, nb_out)?))
}

/// Each half of the inputs drives the opposite half of the outputs.
///
/// Built as `kron(fill · [[0, 1], [1, 0]], eye(nb_in / 2, nb_out / 2))`:
/// ```text
/// opposing(4, 4, fill 2) = [[0, 0, 2, 0],
///                           [0, 0, 0, 2],
///                           [2, 0, 0, 0],
///                           [0, 2, 0, 0]]
/// ```
///
/// # Errors
/// `PreconditionViolation` unless both dimensions are even.
pub fn opposing_synapses<F: SynapticValue>(
    nb_in: usize,
    nb_out: usize,
    fill_value: f64,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    ensure_dimensions(nb_in, nb_out)?;
    if nb_in % 2 != 0 || nb_out % 2 != 0 {
        return Err(WiringError::PreconditionViolation(format!(
            "opposing synapses need even sizes, got {}x{}",
            nb_in, nb_out
        )));
    }

    let fill = F::from_f64(fill_value);
    let block = Array2::from_shape_fn((2, 2), |(i, j)| if i != j { fill } else { F::zero() });
    let identity = Array2::from_shape_fn((nb_in / 2, nb_out / 2), |(i, j)| {
        if i == j {
            F::one()
        } else {
            F::zero()
        }
    });
    let weights = kron(&block.view(), &identity.view());
    Ok(Synapses::new(weights, fixed_bias(bias, nb_out)?))
}

/// Raised-cosine tuning: input `i` prefers angle `φ_i = 2πi / nb_in` and
/// reaches output `j` (angle `θ_j = 2πj / nb_out`) with
/// `fill · (1 − cos(θ_j + φ_i)) / 2`, so every weight lies in `[0, fill]`.
pub fn sinusoidal_synapses<F: SynapticValue>(
    nb_in: usize,
    nb_out: usize,
    fill_value: f64,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    ensure_dimensions(nb_in, nb_out)?;
    let weights = Array2::from_shape_fn((nb_in, nb_out), |(i, j)| {
        let pref_in = TAU * i as f64 / nb_in as f64;
        let pref_out = TAU * j as f64 / nb_out as f64;
        F::from_f64(fill_value * (1.0 - (pref_out + pref_in).cos()) / 2.0)
    });
    Ok(Synapses::new(weights, fixed_bias(bias, nb_out)?))
}

/// Checkerboard of `nb_rows × nb_cols` cells, each expanded into a
/// `(nb_in / nb_rows) × (nb_out / nb_cols)` patch of `fill_value`.
///
/// A cell is "on" where its row and column parity agree.
///
/// # Errors
/// `InvalidParameters` for an empty board, `DimensionMismatch` when the
/// board does not divide the layer sizes.
pub fn chessboard_synapses<F: SynapticValue>(
    nb_in: usize,
    nb_out: usize,
    fill_value: f64,
    nb_rows: usize,
    nb_cols: usize,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    ensure_dimensions(nb_in, nb_out)?;
    if nb_rows == 0 || nb_cols == 0 {
        return Err(WiringError::InvalidParameters(format!(
            "chessboard needs at least one row and column, got {}x{}",
            nb_rows, nb_cols
        )));
    }
    if nb_in % nb_rows != 0 || nb_out % nb_cols != 0 {
        return Err(WiringError::DimensionMismatch {
            expected: (
                nb_rows * (nb_in / nb_rows).max(1),
                nb_cols * (nb_out / nb_cols).max(1),
            ),
            actual: (nb_in, nb_out),
        });
    }

    let board = Array2::from_shape_fn((nb_rows, nb_cols), |(i, j)| {
        if (i % 2 == 0) == (j % 2 == 0) {
            F::one()
        } else {
            F::zero()
        }
    });
    let patch = Array2::from_elem((nb_in / nb_rows, nb_out / nb_cols), F::from_f64(fill_value));
    pattern_synapses(&board.view(), &patch.view(), bias)
}

/// Repeat `patch` over `pattern`: the Kronecker product `kron(pattern, patch)`.
///
/// A requested bias spans the product's column count.
pub fn pattern_synapses<F: SynapticValue>(
    pattern: &ArrayView2<F>,
    patch: &ArrayView2<F>,
    bias: BiasPolicy,
) -> WiringResult<Synapses<F>> {
    let weights = kron(pattern, patch);
    let nb_out = weights.ncols();
    Ok(Synapses::new(weights, fixed_bias(bias, nb_out)?))
}

/// Circular shift request for [`roll_synapses`].
///
/// `left` wins over `right` and `up` wins over `down` when both of a pair
/// are set. The horizontal and vertical magnitudes are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollShift {
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub up: Option<usize>,
    pub down: Option<usize>,
}

impl RollShift {
    pub fn left(positions: usize) -> Self {
        Self {
            left: Some(positions),
            ..Self::default()
        }
    }

    pub fn right(positions: usize) -> Self {
        Self {
            right: Some(positions),
            ..Self::default()
        }
    }

    pub fn up(positions: usize) -> Self {
        Self {
            up: Some(positions),
            ..Self::default()
        }
    }

    pub fn down(positions: usize) -> Self {
        Self {
            down: Some(positions),
            ..Self::default()
        }
    }

    pub fn with_up(mut self, positions: usize) -> Self {
        self.up = Some(positions);
        self
    }

    pub fn with_down(mut self, positions: usize) -> Self {
        self.down = Some(positions);
        self
    }

    /// Signed column shift: positive moves columns left
    fn horizontal(&self) -> Option<isize> {
        self.left
            .map(|n| n as isize)
            .or_else(|| self.right.map(|n| -(n as isize)))
    }

    /// Signed row shift: positive moves rows up
    fn vertical(&self) -> Option<isize> {
        self.up
            .map(|n| n as isize)
            .or_else(|| self.down.map(|n| -(n as isize)))
    }
}

/// Circularly shift the columns and/or rows of `weights`.
///
/// Rolling left by `n` moves column `n` to position 0; rolling up by `n`
/// moves row `n` to position 0. Shifts wrap modulo the axis length.
pub fn roll_synapses<F: Clone>(weights: &ArrayView2<F>, shift: RollShift) -> Array2<F> {
    let mut rolled = weights.to_owned();
    if let Some(offset) = shift.horizontal() {
        rolled = rotate_axis(&rolled.view(), Axis(1), offset);
    }
    if let Some(offset) = shift.vertical() {
        rolled = rotate_axis(&rolled.view(), Axis(0), offset);
    }
    rolled
}

fn rotate_axis<F: Clone>(weights: &ArrayView2<F>, axis: Axis, offset: isize) -> Array2<F> {
    let len = weights.len_of(axis);
    if len == 0 {
        return weights.to_owned();
    }
    let start = offset.rem_euclid(len as isize) as usize;
    let order: Vec<usize> = (0..len).map(|k| (k + start) % len).collect();
    weights.select(axis, &order)
}
