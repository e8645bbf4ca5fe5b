// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity Integration Tests

Exercises the public builders through the crate root:
- Deterministic patterns and their algebraic properties
- Sparse wiring constraints and reproducibility
- Spectral and whitening transforms on realistic inputs
*/

use ndarray::{array, Array2};
use proptest::prelude::*;
use synaptome_wiring::linalg::column_cosine_similarity;
use synaptome_wiring::{
    chessboard_synapses, dct_omm_synapses, dct_synapses, diagonal_synapses, opposing_synapses,
    pattern_synapses, roll_synapses, seeded_rng, sinusoidal_synapses, sparse_synapses_with_stats,
    uniform_synapses, whitening_synapses, BiasPolicy, RandomSource, RollShift, Rotation,
    SparseParams, WhiteningMethod, WiringError,
};

fn small_matrix() -> impl Strategy<Value = Array2<f64>> {
    (1usize..4, 1usize..4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-9i32..10, rows * cols).prop_map(move |values| {
            let values = values.into_iter().map(f64::from).collect();
            Array2::from_shape_vec((rows, cols), values).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn pattern_is_kronecker_product(pattern in small_matrix(), patch in small_matrix()) {
        let syn = pattern_synapses(&pattern.view(), &patch.view(), BiasPolicy::None).unwrap();
        let (pr, pc) = patch.dim();
        prop_assert_eq!(syn.weights().dim(), (pattern.nrows() * pr, pattern.ncols() * pc));
        for ((i, j), &w) in syn.weights().indexed_iter() {
            prop_assert_eq!(w, pattern[[i / pr, j / pc]] * patch[[i % pr, j % pc]]);
        }
    }

    #[test]
    fn roll_round_trips(rows in 1usize..6, cols in 1usize..6, h in 0usize..10, v in 0usize..10) {
        let weights = Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64);
        let rolled = roll_synapses(&weights.view(), RollShift::left(h).with_up(v));
        let back = roll_synapses(&rolled.view(), RollShift::right(h).with_down(v));
        prop_assert_eq!(back, weights);
    }
}

#[test]
fn test_diagonal_examples() {
    let syn = diagonal_synapses::<f32>(3, 3, 2.0, false, BiasPolicy::None).unwrap();
    assert_eq!(syn.weights(), &(Array2::<f32>::eye(3) * 2.0));

    let tiled = diagonal_synapses::<f32>(3, 6, 1.0, true, BiasPolicy::Constant(0.5)).unwrap();
    assert_eq!(
        tiled.weights(),
        &array![
            [1.0f32, 0.0, 0.0, 1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
        ]
    );
    assert_eq!(tiled.bias().unwrap().len(), 6);
}

#[test]
fn test_chessboard_blocks() {
    let syn = chessboard_synapses::<f64>(4, 4, 1.0, 2, 2, BiasPolicy::None).unwrap();
    let expected = array![
        [1.0, 1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 1.0],
        [0.0, 0.0, 1.0, 1.0]
    ];
    assert_eq!(syn.weights(), &expected);
}

#[test]
fn test_deterministic_builders_repeat_exactly() {
    let bias = BiasPolicy::Constant(0.25);
    let uniform = || uniform_synapses::<f32>(5, 7, 0.3, bias).unwrap();
    assert_eq!(uniform(), uniform());

    let diagonal = || diagonal_synapses::<f32>(4, 12, 1.5, true, bias).unwrap();
    assert_eq!(diagonal(), diagonal());

    let opposing = || opposing_synapses::<f64>(6, 4, 2.0, bias).unwrap();
    assert_eq!(opposing(), opposing());

    let sinusoidal = || sinusoidal_synapses::<f64>(9, 5, 1.0, bias).unwrap();
    assert_eq!(sinusoidal(), sinusoidal());

    let chessboard = || chessboard_synapses::<f32>(6, 6, 1.0, 3, 2, bias).unwrap();
    assert_eq!(chessboard(), chessboard());

    let dct = || dct_synapses::<f64>(11).unwrap();
    assert_eq!(dct(), dct());

    let orientations: Vec<Rotation> = (0..8)
        .map(|i| Rotation::from_euler_zyx(0.3 * i as f64, -0.1 * i as f64, 0.0).unwrap())
        .collect();
    let dct_omm = || dct_omm_synapses::<f32>(&orientations).unwrap();
    assert_eq!(dct_omm(), dct_omm());
}

#[test]
fn test_dct_is_orthonormal() {
    let w = dct_synapses::<f64>(16).unwrap();
    let product = w.dot(&w.t());
    for ((i, j), &v) in product.indexed_iter() {
        let expected = if i == j { 1.0 } else { 0.0 };
        assert!((v - expected).abs() < 1e-10);
    }
}

#[test]
fn test_sparse_constraints_hold() {
    let params = SparseParams::default().with_fan_in(5, 10).with_min_corr(0.3);
    let (syn, stats) = sparse_synapses_with_stats::<f32, _>(
        400,
        100,
        &params,
        BiasPolicy::Random,
        &mut seeded_rng(2021),
    )
    .unwrap();

    let weights = syn.weights().mapv(f64::from);
    for column in weights.columns() {
        let fan_in = column.iter().filter(|&&w| w > 0.0).count();
        assert!((5..10).contains(&fan_in));
        assert!((column.sum() - 1.0).abs() < 1e-5);
    }
    let similarity = column_cosine_similarity(&weights.view());
    for ((i, j), &c) in similarity.indexed_iter() {
        assert!(i == j || c < 0.3);
    }
    assert_eq!(syn.bias().unwrap().len(), 100);
    assert_eq!(stats.regenerated.len(), stats.iterations);
}

#[test]
fn test_sparse_equal_bounds_fix_fan_in() {
    let params = SparseParams::default().with_fan_in(3, 3).with_min_corr(0.7);
    let (syn, _) = sparse_synapses_with_stats::<f64, _>(
        90,
        30,
        &params,
        BiasPolicy::None,
        &mut seeded_rng(9),
    )
    .unwrap();
    for column in syn.weights().columns() {
        assert_eq!(column.iter().filter(|&&w| w > 0.0).count(), 3);
    }
}

#[test]
fn test_sparse_different_seeds_differ() {
    let params = SparseParams::default().with_fan_in(3, 6).with_min_corr(0.5);
    let draw = |seed| {
        let mut rng = seeded_rng(seed);
        sparse_synapses_with_stats::<f32, _>(100, 20, &params, BiasPolicy::None, &mut rng)
            .unwrap()
            .0
    };
    let (a, b) = (draw(1), draw(2));
    assert_ne!(a, b);
}

#[test]
fn test_sparse_failure_is_structured() {
    let params = SparseParams {
        max_retries: 3,
        ..SparseParams::default().with_fan_in(1, 1).with_min_corr(0.5)
    };
    let mut rng = seeded_rng(0);
    let err = sparse_synapses_with_stats::<f32, _>(2, 10, &params, BiasPolicy::None, &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        WiringError::ConvergenceFailure {
            attempts: 3,
            unresolved: 10
        }
    );
}

#[test]
fn test_whitening_of_random_samples() {
    let mut rng = seeded_rng(4);
    let samples = Array2::from_shape_fn((300, 4), |(_, j)| rng.uniform() * (j + 1) as f64);
    let syn = whitening_synapses(
        &samples.view(),
        None,
        None,
        &WhiteningMethod::Zca { epsilon: 1e-9 },
        true,
    )
    .unwrap();
    let mean = syn.bias().unwrap();
    let projected = (&samples - mean).dot(syn.weights());
    let cov = projected.t().dot(&projected) / 300.0;
    for ((i, j), &v) in cov.indexed_iter() {
        let expected = if i == j { 1.0 } else { 0.0 };
        assert!((v - expected).abs() < 1e-3);
    }
}
