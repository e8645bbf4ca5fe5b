// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for structure construction

/// Result type for structure operations
pub type StructureResult<T> = Result<T, StructureError>;

/// Errors raised while building value types from raw caller data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("Invalid quaternion: {0}")]
    InvalidQuaternion(String),

    #[error("Invalid angle: {0}")]
    InvalidAngle(String),
}
