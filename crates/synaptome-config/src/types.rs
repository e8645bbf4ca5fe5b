// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `synaptome.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use synaptome_structures::Dtype;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SynaptomeConfig {
    pub system: SystemConfig,
    pub logging: LoggingConfig,
    pub random: RandomConfig,
    pub sparse: SparseConfig,
    pub rotation: RotationConfig,
    pub whitening: WhiteningConfig,
}

/// System-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Element type callers should instantiate the generators with.
    ///
    /// Advisory only: the builders are generic over the element type and
    /// never read this value. Callers dispatch on it themselves.
    pub dtype: Dtype,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Directory for timestamped run folders (requires the `file-logging` feature)
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            log_dir: None,
        }
    }
}

/// Random source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { seed: 2021 }
    }
}

/// Sparse decorrelated connectivity defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SparseConfig {
    /// Cosine similarity at or above which two output units count as duplicates
    pub min_corr: f64,
    /// Scale each output unit's weights so they sum to 1
    pub normalise: bool,
    /// Default minimum fan-in as a fraction of the input count
    pub fan_in_min_ratio: f64,
    /// Default maximum fan-in as a fraction of the input count
    pub fan_in_max_ratio: f64,
    /// Regeneration passes allowed before giving up
    pub max_retries: usize,
    /// Redraw fan-in targets after this many passes without progress
    pub reshuffle_after: Option<usize>,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            min_corr: 0.2,
            normalise: true,
            fan_in_min_ratio: 0.006,
            fan_in_max_ratio: 0.014,
            max_retries: 1000,
            reshuffle_after: None,
        }
    }
}

/// Mental rotation defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Softmax temperature ("mental radius" of each unit)
    pub sigma: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { sigma: 0.02 }
    }
}

/// Whitening transform family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteningKind {
    #[default]
    Pca,
    Zca,
}

/// Whitening defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WhiteningConfig {
    pub method: WhiteningKind,
    /// Added to every eigenvalue before the inverse square root
    pub epsilon: f64,
}

impl Default for WhiteningConfig {
    fn default() -> Self {
        Self {
            method: WhiteningKind::Pca,
            epsilon: 1e-5,
        }
    }
}
