// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Collects every problem in one pass so a bad file is fixed in one edit.

use crate::{ConfigError, ConfigResult, SynaptomeConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange {
        field: String,
        value: f64,
        range: String,
    },
    MissingRequired {
        field: String,
    },
    InvalidValue {
        field: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                range,
            } => write!(f, "{} = {} is outside {}", field, value, range),
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &SynaptomeConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_logging(config, &mut errors);
    validate_sparse(config, &mut errors);
    validate_rotation(config, &mut errors);
    validate_whitening(config, &mut errors);

    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn validate_logging(config: &SynaptomeConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.trim().to_lowercase();
    if level.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.level".to_string(),
        });
    } else if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
}

fn validate_sparse(config: &SynaptomeConfig, errors: &mut Vec<ConfigValidationError>) {
    let sparse = &config.sparse;

    if !(0.0..=1.0).contains(&sparse.min_corr) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "sparse.min_corr".to_string(),
            value: sparse.min_corr,
            range: "[0, 1]".to_string(),
        });
    }

    for (field, ratio) in [
        ("sparse.fan_in_min_ratio", sparse.fan_in_min_ratio),
        ("sparse.fan_in_max_ratio", sparse.fan_in_max_ratio),
    ] {
        if !(ratio > 0.0 && ratio <= 1.0) {
            errors.push(ConfigValidationError::OutOfRange {
                field: field.to_string(),
                value: ratio,
                range: "(0, 1]".to_string(),
            });
        }
    }

    if sparse.fan_in_max_ratio < sparse.fan_in_min_ratio {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sparse.fan_in_max_ratio".to_string(),
            reason: "must not be smaller than sparse.fan_in_min_ratio".to_string(),
        });
    }

    if sparse.max_retries == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sparse.max_retries".to_string(),
            reason: "must allow at least one pass".to_string(),
        });
    }

    if sparse.reshuffle_after == Some(0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sparse.reshuffle_after".to_string(),
            reason: "must be positive when set".to_string(),
        });
    }
}

fn validate_rotation(config: &SynaptomeConfig, errors: &mut Vec<ConfigValidationError>) {
    let sigma = config.rotation.sigma;
    if !(sigma.is_finite() && sigma > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "rotation.sigma".to_string(),
            reason: "must be positive".to_string(),
        });
    }
}

fn validate_whitening(config: &SynaptomeConfig, errors: &mut Vec<ConfigValidationError>) {
    let epsilon = config.whitening.epsilon;
    if !(epsilon.is_finite() && epsilon >= 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "whitening.epsilon".to_string(),
            reason: "must be non-negative".to_string(),
        });
    }
}
