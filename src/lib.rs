// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synaptome - connectivity matrices for insect brain models
//!
//! Synaptome builds the synaptic weight matrices used by insect-brain
//! simulations: fixed patterns (uniform, diagonal, opposing, sinusoidal,
//! chessboard, roll), sparse decorrelated projections, spectral and
//! whitening transforms, and mental rotation tensors.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! synaptome = "0.1"  # Default: parallel mental rotation
//! ```
//!
//! ## Feature Flags
//! - **`parallel`** (default): compute mental rotation slices with rayon
//! - **`file-logging`**: write logs to a timestamped run folder
//!
//! ## Usage Examples
//!
//! ### Direct builders
//!
//! ```rust
//! use synaptome::prelude::*;
//!
//! let mut rng = seeded_rng(2021);
//! let params = SparseParams::default().with_fan_in(2, 4).with_min_corr(0.6);
//! let syn = sparse_synapses::<f32, _>(100, 20, &params, BiasPolicy::None, &mut rng)?;
//! assert_eq!(syn.weights().dim(), (100, 20));
//! # Ok::<(), synaptome::WiringError>(())
//! ```
//!
//! ### Configuration-driven session
//!
//! ```rust
//! use synaptome::prelude::*;
//!
//! let mut config = SynaptomeConfig::default();
//! config.sparse.min_corr = 0.6;
//! let mut session = WiringSession::new(config)?;
//! // Fan-in follows the configured ratios: 2 to 5 of the 360 inputs
//! let kc = session.sparse::<f32>(360, 40, BiasPolicy::None)?;
//! assert_eq!(kc.weights().dim(), (360, 40));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod session;

// Re-export foundation
pub use synaptome_config as config;
pub use synaptome_structures as structures;

// Re-export infrastructure
pub use synaptome_observability as observability;

// Re-export algorithms
pub use synaptome_wiring as wiring;

pub use session::WiringSession;
pub use synaptome_wiring::{WiringError, WiringResult};

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::session::WiringSession;
    pub use synaptome_config::{load_config, SynaptomeConfig};
    pub use synaptome_structures::{BiasPolicy, Dtype, Rotation, Synapses, SynapticValue};
    pub use synaptome_wiring::connectivity::*;
    pub use synaptome_wiring::{seeded_rng, RandomSource, WiringError, WiringResult};
}
