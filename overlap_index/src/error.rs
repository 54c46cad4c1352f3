// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for geometry construction and index configuration.

use thiserror::Error;

/// Rejected geometry construction.
///
/// Geometries are validated when built, so anything reaching an index is well formed.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A box extent was zero.
    #[error("box extent along axis {axis} must be positive")]
    ZeroExtent {
        /// Offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
    },

    /// The far corner `min + extent - 1` does not fit in `i64`.
    #[error("box extent along axis {axis} overflows the coordinate range")]
    ExtentOverflow {
        /// Offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
    },

    /// The maximum corner lies below the minimum corner.
    #[error("box corners are inverted along axis {axis}")]
    InvertedCorners {
        /// Offending axis (0 = x, 1 = y, 2 = z).
        axis: usize,
    },

    /// Interval with `min > max`.
    #[error("interval minimum {min} exceeds maximum {max}")]
    InvertedInterval {
        /// Lower endpoint as given.
        min: f64,
        /// Upper endpoint as given.
        max: f64,
    },

    /// Interval endpoint was NaN.
    #[error("interval endpoint is NaN")]
    NotANumber,
}

/// Rejected index configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The branching factor (maximum children per node) must be at least 2.
    #[error("branching factor must be at least 2, got {0}")]
    InvalidBranching(usize),
}

/// Result alias for index construction.
pub type Result<T, E = IndexError> = core::result::Result<T, E>;
