// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Configuration-driven wiring.

A [`WiringSession`] validates a [`SynaptomeConfig`] once, seeds its random
source from it, and hands the configured parameters to the builders. Two
sessions built from the same configuration produce identical matrices when
called in the same order.
*/

use ndarray::{Array1, Array3, ArrayView2};
use rand::rngs::StdRng;
use synaptome_config::{validate_config, ConfigResult, SynaptomeConfig};
use synaptome_structures::{BiasPolicy, Dtype, Rotation, Synapses, SynapticValue};
use synaptome_wiring::{
    mental_rotation_synapses, rng_from_config, sparse_synapses_with_stats, whitening_synapses,
    RotationParams, SparseParams, WhiteningMethod, WiringResult,
};
use tracing::{debug, info};

/// Builders bound to a validated configuration and its seeded random source
pub struct WiringSession {
    config: SynaptomeConfig,
    sparse: SparseParams,
    rotation: RotationParams,
    whitening: WhiteningMethod,
    rng: StdRng,
}

impl WiringSession {
    /// Validate `config` and seed the session from it
    pub fn new(config: SynaptomeConfig) -> ConfigResult<Self> {
        validate_config(&config)?;
        info!(target: "synaptome",
            "Wiring session seeded with {} (dtype {})", config.random.seed, config.system.dtype);
        Ok(Self {
            sparse: SparseParams::from_config(&config.sparse),
            rotation: RotationParams::from_config(&config.rotation),
            whitening: WhiteningMethod::from_config(&config.whitening),
            rng: rng_from_config(&config.random),
            config,
        })
    }

    pub fn config(&self) -> &SynaptomeConfig {
        &self.config
    }

    /// Element type requested by the configuration.
    ///
    /// The session's builders take the element type as a type parameter and
    /// do not consult this; match on it to pick `f32` or `f64`.
    pub fn dtype(&self) -> Dtype {
        self.config.system.dtype
    }

    /// Random source for builders the session does not wrap
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Sparse decorrelated synapses with the configured parameters
    pub fn sparse<F: SynapticValue>(
        &mut self,
        nb_in: usize,
        nb_out: usize,
        bias: BiasPolicy,
    ) -> WiringResult<Synapses<F>> {
        let (syn, stats) =
            sparse_synapses_with_stats(nb_in, nb_out, &self.sparse, bias, &mut self.rng)?;
        debug!(target: "synaptome",
            "Sparse {}x{} needed {} attempts and {} reshuffles",
            nb_in, nb_out, stats.iterations, stats.reshuffles);
        Ok(syn)
    }

    /// Mental rotation tensor with the configured `sigma`
    pub fn mental_rotation<F: SynapticValue>(
        &self,
        orientations: &[Rotation],
        nb_out: usize,
        phi_out: Option<&[f64]>,
    ) -> WiringResult<Array3<F>> {
        mental_rotation_synapses(orientations, nb_out, phi_out, self.rotation.sigma)
    }

    /// Whitening with the configured method
    pub fn whitening<F: SynapticValue>(
        &self,
        samples: &ArrayView2<F>,
        nb_out: Option<usize>,
        samples_mean: Option<Array1<F>>,
        with_bias: bool,
    ) -> WiringResult<Synapses<F>> {
        whitening_synapses(samples, nb_out, samples_mean, &self.whitening, with_bias)
    }
}
