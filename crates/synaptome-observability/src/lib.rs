// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaptome-observability
//!
//! Logging setup shared by every synaptome crate, with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: write a timestamped run folder next to console output

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known crate names (also the `tracing` targets they log under)
pub const KNOWN_CRATES: &[&str] = &[
    "synaptome-structures",
    "synaptome-config",
    "synaptome-wiring",
    "synaptome",
];
