// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later tiers win:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, LogFormat, SynaptomeConfig, WhiteningKind};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use synaptome_structures::Dtype;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "synaptome.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "SYNAPTOME_CONFIG_PATH";

/// Overridable settings: (environment variable, CLI key)
const OVERRIDES: &[(&str, &str)] = &[
    ("SYNAPTOME_DTYPE", "dtype"),
    ("SYNAPTOME_LOG_LEVEL", "log_level"),
    ("SYNAPTOME_LOG_FORMAT", "log_format"),
    ("SYNAPTOME_LOG_DIR", "log_dir"),
    ("SYNAPTOME_SEED", "seed"),
    ("SYNAPTOME_MIN_CORR", "min_corr"),
    ("SYNAPTOME_NORMALISE", "normalise"),
    ("SYNAPTOME_FAN_IN_MIN_RATIO", "fan_in_min_ratio"),
    ("SYNAPTOME_FAN_IN_MAX_RATIO", "fan_in_max_ratio"),
    ("SYNAPTOME_MAX_RETRIES", "max_retries"),
    ("SYNAPTOME_RESHUFFLE_AFTER", "reshuffle_after"),
    ("SYNAPTOME_SIGMA", "sigma"),
    ("SYNAPTOME_WHITENING", "whitening"),
    ("SYNAPTOME_WHITENING_EPSILON", "whitening_epsilon"),
];

/// Find the configuration file
///
/// Search order:
/// 1. `SYNAPTOME_CONFIG_PATH` environment variable
/// 2. Current working directory: `./synaptome.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.extend(
            cwd.ancestors()
                .take(6)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file and apply overrides
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found or contains invalid TOML.
/// Validation is a separate step, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SynaptomeConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SynaptomeConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported variables: `SYNAPTOME_DTYPE`, `SYNAPTOME_LOG_LEVEL`,
/// `SYNAPTOME_LOG_FORMAT`, `SYNAPTOME_LOG_DIR`, `SYNAPTOME_SEED`,
/// `SYNAPTOME_MIN_CORR`, `SYNAPTOME_NORMALISE`, `SYNAPTOME_FAN_IN_MIN_RATIO`,
/// `SYNAPTOME_FAN_IN_MAX_RATIO`, `SYNAPTOME_MAX_RETRIES`,
/// `SYNAPTOME_RESHUFFLE_AFTER`, `SYNAPTOME_SIGMA`, `SYNAPTOME_WHITENING`,
/// `SYNAPTOME_WHITENING_EPSILON`.
///
/// Unparseable values are ignored and leave the current setting untouched.
pub fn apply_environment_overrides(config: &mut SynaptomeConfig) {
    for (env_key, field) in OVERRIDES {
        if let Ok(value) = env::var(env_key) {
            set_field(config, field, &value);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments keyed by setting (e.g., `{"seed": "7", "min_corr": "0.1"}`)
pub fn apply_cli_overrides(config: &mut SynaptomeConfig, cli_args: &HashMap<String, String>) {
    for (_, field) in OVERRIDES {
        if let Some(value) = cli_args.get(*field) {
            set_field(config, field, value);
        }
    }
}

fn set_field(config: &mut SynaptomeConfig, field: &str, value: &str) {
    match field {
        "dtype" => set_parsed(&mut config.system.dtype, parse_dtype(value)),
        "log_level" => config.logging.level = value.to_string(),
        "log_format" => set_parsed(&mut config.logging.format, parse_log_format(value)),
        "log_dir" => config.logging.log_dir = Some(PathBuf::from(value)),
        "seed" => set_parsed(&mut config.random.seed, parse(value)),
        "min_corr" => set_parsed(&mut config.sparse.min_corr, parse(value)),
        "normalise" => config.sparse.normalise = parse_flag(value),
        "fan_in_min_ratio" => set_parsed(&mut config.sparse.fan_in_min_ratio, parse(value)),
        "fan_in_max_ratio" => set_parsed(&mut config.sparse.fan_in_max_ratio, parse(value)),
        "max_retries" => set_parsed(&mut config.sparse.max_retries, parse(value)),
        "reshuffle_after" => {
            if let Some(passes) = parse::<usize>(value) {
                config.sparse.reshuffle_after = (passes > 0).then_some(passes);
            }
        }
        "sigma" => set_parsed(&mut config.rotation.sigma, parse(value)),
        "whitening" => set_parsed(&mut config.whitening.method, parse_whitening(value)),
        "whitening_epsilon" => set_parsed(&mut config.whitening.epsilon, parse(value)),
        _ => {}
    }
}

fn set_parsed<T>(slot: &mut T, parsed: Option<T>) {
    if let Some(value) = parsed {
        *slot = value;
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn parse_dtype(value: &str) -> Option<Dtype> {
    match value.trim().to_lowercase().as_str() {
        "float32" | "f32" => Some(Dtype::Float32),
        "float64" | "f64" => Some(Dtype::Float64),
        _ => None,
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.trim().to_lowercase().as_str() {
        "text" => Some(LogFormat::Text),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn parse_whitening(value: &str) -> Option<WhiteningKind> {
    match value.trim().to_lowercase().as_str() {
        "pca" => Some(WhiteningKind::Pca),
        "zca" => Some(WhiteningKind::Zca),
        _ => None,
    }
}
