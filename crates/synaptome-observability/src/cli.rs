// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Supports `--debug-synaptome-wiring` style arguments, `--debug-all`, and the
//! `SYNAPTOME_DEBUG` environment variable.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "SYNAPTOME_DEBUG";

/// Crates whose logs should be raised to `debug`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// # Example
    /// ```
    /// use synaptome_observability::CrateDebugFlags;
    ///
    /// let flags = CrateDebugFlags::from_args(vec!["--debug-synaptome-wiring".to_string()]);
    /// assert!(flags.is_enabled("synaptome-wiring"));
    /// ```
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Parse a `SYNAPTOME_DEBUG`-style value: `all` or comma-separated crate names
    pub fn from_env_value(value: &str) -> Self {
        let mut flags = Self::default();
        if value.trim() == "all" {
            flags.enable_all();
        } else {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .for_each(|name| flags.enable(name));
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Union of two flag sets
    pub fn merge(mut self, other: CrateDebugFlags) -> Self {
        self.enabled_crates.extend(other.enabled_crates);
        self
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    /// Log level for a crate: `DEBUG` if flagged, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Build an `EnvFilter` directive string on top of `base_level`
    ///
    /// Format: `"synaptome-wiring=debug,info"`, or just the base level when
    /// nothing is flagged.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|name| format!("{}=debug", name))
            .chain(std::iter::once(base_level.to_lowercase()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Debug flags from the process arguments merged with `SYNAPTOME_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let flags = CrateDebugFlags::from_args(env::args());
    match env::var(DEBUG_ENV) {
        Ok(value) => flags.merge(CrateDebugFlags::from_env_value(&value)),
        Err(_) => flags,
    }
}
