// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for wiring operations.
*/

use synaptome_structures::StructureError;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors that can occur while generating connectivity
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WiringError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error(
        "Sparse connectivity did not decorrelate after {attempts} passes \
         ({unresolved} output units still correlated)"
    )]
    ConvergenceFailure { attempts: usize, unresolved: usize },

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Reject zero-sized layers up front
pub(crate) fn ensure_dimensions(nb_in: usize, nb_out: usize) -> WiringResult<()> {
    if nb_in == 0 || nb_out == 0 {
        return Err(WiringError::InvalidParameters(format!(
            "layer sizes must be positive, got nb_in={} nb_out={}",
            nb_in, nb_out
        )));
    }
    Ok(())
}
