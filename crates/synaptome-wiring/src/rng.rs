// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random source used by the stochastic generators.

Every stochastic generator takes the source as an explicit `&mut` argument;
there is no process-wide default. Any `rand::Rng` is a [`RandomSource`], and
[`seeded_rng`] gives a reproducible one: the same seed yields the same
sequence of draws and therefore bit-identical matrices.
*/

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use synaptome_config::RandomConfig;

/// Draws consumed by the generators
pub trait RandomSource {
    /// Uniform real in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform real in `[low, high)`; returns `low` for an empty range
    fn uniform_range(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high)`; returns `low` for an empty range
    fn integer(&mut self, low: usize, high: usize) -> usize;

    /// Shuffle indices in place
    fn shuffle(&mut self, items: &mut [usize]);

    /// Random permutation of `0..n`
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn uniform_range(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.gen_range(low..high)
        } else {
            low
        }
    }

    fn integer(&mut self, low: usize, high: usize) -> usize {
        if high > low {
            self.gen_range(low..high)
        } else {
            low
        }
    }

    fn shuffle(&mut self, items: &mut [usize]) {
        items.shuffle(self);
    }
}

/// Reproducible random source
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random source seeded from configuration
pub fn rng_from_config(config: &RandomConfig) -> StdRng {
    seeded_rng(config.seed)
}
