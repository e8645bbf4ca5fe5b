// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Discrete Cosine Transform (type II) synapses.

The plain basis is indexed by unit position. The ommatidia variant indexes
the same basis by the units' angular rank, so the spectrum follows the eye's
layout instead of the storage order of its units.
*/

use crate::linalg::argsort;
use crate::types::{WiringError, WiringResult};
use ndarray::Array2;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU};
use synaptome_structures::{Rotation, SynapticValue};

/// Orthonormal DCT-II basis of size `nb_in × nb_in`.
///
/// `A[m, n] = sqrt(2/N) · c_m · cos(π·m·(2n + 1) / (2N))` with `c_0 = 1/√2`
/// and `c_m = 1` otherwise, so `A · Aᵀ = I`.
pub fn dct_synapses<F: SynapticValue>(nb_in: usize) -> WiringResult<Array2<F>> {
    if nb_in == 0 {
        return Err(WiringError::InvalidParameters(
            "DCT needs at least one input unit".to_string(),
        ));
    }
    Ok(Array2::from_shape_fn((nb_in, nb_in), |(m, n)| {
        F::from_f64(dct_coefficient(nb_in, m, n))
    }))
}

/// DCT basis ordered by ommatidia orientation.
///
/// Each orientation is decomposed into intrinsic Z-Y-X angles; the azimuth
/// `φ` is wrapped to `[0, 2π)` and the elevation shifted to `θ ∈ [0, π)`.
/// With `m = argsort(φ)` and `n = argsort(θ)` the basis
/// `A[a, b] = sqrt(2/N) · c(m[a]) · cos(π·m[a]·(2·n[b] + 1) / (2N))`
/// is built and returned transposed.
pub fn dct_omm_synapses<F: SynapticValue>(orientations: &[Rotation]) -> WiringResult<Array2<F>> {
    let nb_in = orientations.len();
    if nb_in == 0 {
        return Err(WiringError::InvalidParameters(
            "DCT needs at least one ommatidium orientation".to_string(),
        ));
    }

    let (phi, theta): (Vec<f64>, Vec<f64>) = orientations
        .iter()
        .map(|ori| {
            let (yaw, pitch, _) = ori.to_euler_zyx();
            (yaw.rem_euclid(TAU), (FRAC_PI_2 + pitch).rem_euclid(PI))
        })
        .unzip();
    let m = argsort(&phi);
    let n = argsort(&theta);

    Ok(Array2::from_shape_fn((nb_in, nb_in), |(b, a)| {
        F::from_f64(dct_coefficient(nb_in, m[a], n[b]))
    }))
}

#[inline]
fn dct_coefficient(size: usize, m: usize, n: usize) -> f64 {
    let size_f = size as f64;
    let c = if m == 0 { FRAC_1_SQRT_2 } else { 1.0 };
    (2.0 / size_f).sqrt() * c * (PI * m as f64 * (2 * n + 1) as f64 / (2.0 * size_f)).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(a: &Array2<f64>) {
        let product = a.dot(&a.t());
        for ((i, j), &v) in product.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((v - expected).abs() < 1e-10, "({}, {}) = {}", i, j, v);
        }
    }

    fn ommatidia(count: usize) -> Vec<Rotation> {
        (0..count)
            .map(|i| {
                let i = i as f64;
                Rotation::from_euler_zyx(0.1 + 0.5 * i, -1.0 + 0.2 * i, 0.0).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_dct_is_orthonormal() {
        assert_orthonormal(&dct_synapses::<f64>(8).unwrap());
        assert_orthonormal(&dct_synapses::<f64>(1).unwrap());
    }

    #[test]
    fn test_dct_dc_row_is_flat() {
        let a = dct_synapses::<f32>(4).unwrap();
        assert!(a.row(0).iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_dct_omm_sorted_layout_matches_plain_basis() {
        let plain = dct_synapses::<f64>(6).unwrap();
        let omm = dct_omm_synapses::<f64>(&ommatidia(6)).unwrap();
        for ((i, j), &v) in omm.indexed_iter() {
            assert!((v - plain[[j, i]]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dct_omm_follows_orientation_not_storage_order() {
        let sorted = dct_omm_synapses::<f64>(&ommatidia(5)).unwrap();
        let mut reversed_units = ommatidia(5);
        reversed_units.reverse();
        let reversed = dct_omm_synapses::<f64>(&reversed_units).unwrap();

        for ((b, a), &v) in reversed.indexed_iter() {
            assert!((v - sorted[[4 - b, 4 - a]]).abs() < 1e-12);
        }
        assert_orthonormal(&reversed);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        assert!(dct_synapses::<f32>(0).is_err());
        assert!(dct_omm_synapses::<f32>(&[]).is_err());
    }
}
