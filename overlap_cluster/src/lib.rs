// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overlap_cluster --heading-base-level=0

//! Overlap Cluster: partition geometries into groups connected by overlap.
//!
//! Given elements and a function mapping each one to a [`Geometry`][overlap_index::Geometry],
//! [`separate`] returns the connected components of the overlap graph: two elements share a
//! cluster exactly when a chain of pairwise-overlapping geometries links them.
//!
//! - Every input element appears in exactly one cluster, duplicates included.
//! - Neighbours come from an [`overlap_index`] R-tree built over the input, so large inputs
//!   avoid an all-pairs scan.
//! - Components are tracked in an arena-backed [`DisjointSet`].
//!
//! # Example
//!
//! ```rust
//! use overlap_cluster::separate;
//! use overlap_index::{Aabb3D, Point3D};
//!
//! let cube = |x, e| Aabb3D::new(Point3D::new(x, 0, 0), [e, e, e]).unwrap();
//! let detections = [cube(0, 10), cube(100, 5), cube(8, 10), cube(16, 4)];
//!
//! let clusters = separate(detections, |b| *b);
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].len(), 3);
//! assert_eq!(clusters[1], vec![cube(100, 5)]);
//! ```
//!
//! Use [`ClusterBuilder`] to tune the internal index, to get set-valued clusters, or to reuse an
//! index you already maintain.

#![no_std]

extern crate alloc;

mod disjoint_set;
mod separate;

pub use disjoint_set::DisjointSet;
pub use separate::{ClusterBuilder, separate};
