// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `rtree`: balanced R-tree generic over any [`Geometry`][crate::Geometry] (default).
//! - `flatvec`: flat vector with linear scans (small, simple).
//!
//! SAH note
//! --------
//! The R-tree splits overflowing nodes with an SAH-like heuristic.
//! For a split point `k` along a sorted axis we minimize:
//!
//! `cost(k) = measure(LB_k) * k + measure(RB_k) * (n - k)`
//!
//! where `LB_k` and `RB_k` bound the first `k` and remaining `n - k` children and `measure` is
//! volume for boxes and length for intervals. All `k` are evaluated in O(n) per axis using
//! prefix/suffix bounds. Bulk loading uses an STR pass (sort-tile-recursive over every axis)
//! to seed packed leaves and parents.

pub(crate) mod flatvec;
pub(crate) mod rtree;

pub use flatvec::FlatVec;
pub use rtree::{DEFAULT_BRANCHING, RTree};
