// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Benchmarks for the stochastic and tensor generators
//!
//! - sparse decorrelated wiring at mushroom-body-like sizes
//! - mental rotation tensors over a ring of ommatidia

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use synaptome_wiring::{
    mental_rotation_synapses, preference_angles, seeded_rng, sparse_synapses, BiasPolicy,
    Rotation, SparseParams,
};

fn bench_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_synapses");
    group.sample_size(10);
    for &(nb_in, nb_out) in &[(200, 100), (500, 400)] {
        let params = SparseParams::default().with_fan_in(4, 8).with_min_corr(0.5);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", nb_in, nb_out)),
            &(nb_in, nb_out),
            |b, &(nb_in, nb_out)| {
                b.iter(|| {
                    let mut rng = seeded_rng(2021);
                    sparse_synapses::<f32, _>(
                        black_box(nb_in),
                        black_box(nb_out),
                        &params,
                        BiasPolicy::None,
                        &mut rng,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_mental_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mental_rotation_synapses");
    for &nb_omm in &[64usize, 256] {
        let orientations: Vec<Rotation> = preference_angles(nb_omm)
            .into_iter()
            .map(Rotation::about_z)
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(nb_omm),
            &orientations,
            |b, orientations| {
                b.iter(|| mental_rotation_synapses::<f32>(black_box(orientations), 8, None, 0.02))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sparse, bench_mental_rotation);
criterion_main!(benches);
