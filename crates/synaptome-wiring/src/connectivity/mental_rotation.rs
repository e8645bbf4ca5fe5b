// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Mental rotation of a visual input.

For every preference angle the tensor holds a map that re-expresses the
input as if the eye were turned about the vertical axis by that angle.
*/

use crate::linalg::softmax;
use crate::types::{WiringError, WiringResult};
use ndarray::{s, Array1, Array2, Array3};
use std::f64::consts::TAU;
use synaptome_config::RotationConfig;
use synaptome_structures::{Rotation, SynapticValue};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters of the mental rotation builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    /// Softmax temperature ("mental radius" of each unit)
    pub sigma: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self { sigma: 0.02 }
    }
}

impl RotationParams {
    pub fn from_config(config: &RotationConfig) -> Self {
        Self {
            sigma: config.sigma,
        }
    }
}

/// `nb_out` angles evenly spaced over `[0, 2π)`
pub fn preference_angles(nb_out: usize) -> Vec<f64> {
    (0..nb_out)
        .map(|k| TAU * k as f64 / nb_out as f64)
        .collect()
}

/// Mental rotation tensor of shape `(nb_in, nb_in, nb_out)` where `nb_in`
/// is the number of orientations.
///
/// Slice `k` rotates every orientation by `Rz(−φ_k)` and, for each unit `j`,
/// `tensor[j, :, k]` is the softmax (temperature `sigma`) of
/// `1 − ‖dir_j − dir'_i‖ / 2` over the rotated units `i`. Preference angles
/// default to [`preference_angles`].
///
/// # Errors
/// `PreconditionViolation` when `phi_out` does not hold `nb_out` angles;
/// `InvalidParameters` for empty orientations, `nb_out == 0`, a
/// non-positive `sigma` or non-finite angles.
pub fn mental_rotation_synapses<F: SynapticValue>(
    orientations: &[Rotation],
    nb_out: usize,
    phi_out: Option<&[f64]>,
    sigma: f64,
) -> WiringResult<Array3<F>> {
    let nb_in = orientations.len();
    if nb_in == 0 || nb_out == 0 {
        return Err(WiringError::InvalidParameters(format!(
            "mental rotation needs orientations and preference angles, got {} and {}",
            nb_in, nb_out
        )));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(WiringError::InvalidParameters(format!(
            "sigma must be positive, got {}",
            sigma
        )));
    }

    let angles = match phi_out {
        Some(angles) if angles.len() != nb_out => {
            return Err(WiringError::PreconditionViolation(format!(
                "expected {} preference angles, got {}",
                nb_out,
                angles.len()
            )));
        }
        Some(angles) => angles.to_vec(),
        None => preference_angles(nb_out),
    };
    if let Some(angle) = angles.iter().find(|a| !a.is_finite()) {
        return Err(WiringError::InvalidParameters(format!(
            "preference angles must be finite, got {}",
            angle
        )));
    }

    let directions: Vec<[f64; 3]> = orientations.iter().map(Rotation::direction).collect();

    // Slices are independent; sequential fallback without rayon
    #[cfg(feature = "parallel")]
    let slices: Vec<Array2<f64>> = angles
        .par_iter()
        .map(|&phi| rotation_slice(orientations, &directions, phi, sigma))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let slices: Vec<Array2<f64>> = angles
        .iter()
        .map(|&phi| rotation_slice(orientations, &directions, phi, sigma))
        .collect();

    let mut tensor = Array3::<F>::zeros((nb_in, nb_in, nb_out));
    for (k, slice) in slices.iter().enumerate() {
        tensor
            .slice_mut(s![.., .., k])
            .assign(&slice.mapv(F::from_f64));
    }
    Ok(tensor)
}

/// `(nb_in, nb_in)` map for a single preference angle
fn rotation_slice(
    orientations: &[Rotation],
    directions: &[[f64; 3]],
    phi: f64,
    sigma: f64,
) -> Array2<f64> {
    let turn = Rotation::about_z(-phi);
    let rotated: Vec<[f64; 3]> = orientations
        .iter()
        .map(|ori| (turn * *ori).direction())
        .collect();

    let nb_in = orientations.len();
    let mut slice = Array2::zeros((nb_in, nb_in));
    for (j, target) in directions.iter().enumerate() {
        let closeness: Array1<f64> = rotated
            .iter()
            .map(|r| 1.0 - distance(target, r) / 2.0)
            .collect();
        slice.row_mut(j).assign(&softmax(&closeness.view(), sigma));
    }
    slice
}

fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
