// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overlap_index --heading-base-level=0

//! Overlap Index: a multiset spatial index over 3D voxel boxes and 1D intervals.
//!
//! Overlap Index is a reusable building block for spatial queries over detected objects.
//!
//! - Add and remove `(geometry, payload)` entries; duplicates of either (or both) are kept.
//! - Query by point ([`SpatialIndex::contains`]) or by overlapping geometry
//!   ([`SpatialIndex::intersects_with`]); results are the distinct payloads.
//! - [`SpatialIndex::len`] counts every stored entry, duplicates included.
//!
//! Geometries are validated when constructed, so an index never sees a zero-extent box or an
//! inverted interval. Both kinds implement [`Geometry`], which is all the index needs.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API
//! churn. The default backend is a balanced R-tree; a flat vector backend is available for tiny
//! sets.
//!
//! # Example
//!
//! ```rust
//! use overlap_index::{Aabb3D, BoxIndex, Point3D};
//!
//! let a = Aabb3D::new(Point3D::new(0, 0, 0), [10, 10, 10]).unwrap();
//! let b = Aabb3D::new(Point3D::new(5, 5, 5), [10, 10, 10]).unwrap();
//!
//! // Create an index with branching factor 8 and add three entries.
//! let mut idx: BoxIndex<u32> = BoxIndex::new(8).unwrap();
//! idx.add(a, 1);
//! idx.add(b, 2);
//! idx.add(b, 2);
//! assert_eq!(idx.len(), 3);
//!
//! // Query a point inside both boxes; duplicate payloads collapse.
//! let hits = idx.contains(Point3D::new(6, 6, 6));
//! assert_eq!(hits.len(), 2);
//!
//! // Remove exactly one copy of `(b, 2)`.
//! assert!(idx.remove(&b, &2));
//! assert_eq!(idx.len(), 2);
//! assert!(idx.intersects_with(&b).contains(&2));
//! ```
//!
//! Intervals work the same way:
//!
//! ```rust
//! use overlap_index::{Interval, IntervalIndex};
//!
//! let mut idx: IntervalIndex<&str> = IntervalIndex::new(4).unwrap();
//! idx.add(Interval::new(0.0, 1.5).unwrap(), "early");
//! idx.add(Interval::new(1.5, 3.0).unwrap(), "late");
//!
//! // Closed intervals: the shared endpoint belongs to both.
//! assert_eq!(idx.contains(1.5).len(), 2);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`RTree`][backends::RTree] (default): balanced tree with SAH-like splits, STR bulk
//!   loading ([`SpatialIndex::from_entries`]) and condense-on-remove.
//! - [`FlatVec`][backends::FlatVec]: linear scans. Good for very small sets.
//!
//! ## Concurrency
//!
//! The index has no internal locking. Mutation takes `&mut self`; share it across threads
//! behind a lock of your choosing.
//!
//! ### Float semantics
//!
//! [`Interval`] rejects NaN endpoints. Queries at a NaN point match nothing.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod error;
mod index;
mod types;
pub(crate) mod util;

pub use backend::Backend;
pub use error::{GeometryError, IndexError, Result};
pub use index::{BoxIndex, IntervalIndex, SpatialIndex};
pub use types::{Aabb3D, Geometry, Interval, Point3D};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counts_every_add() {
        let g = Aabb3D::new(Point3D::ORIGIN, [2, 2, 2]).unwrap();
        let mut idx: BoxIndex<u8> = BoxIndex::default();
        for n in 1..=25 {
            idx.add(g, 0);
            assert_eq!(idx.len(), n);
        }
        assert_eq!(idx.contains(Point3D::new(1, 1, 1)).len(), 1);
    }

    #[test]
    fn removal_decrements_by_exactly_one() {
        let iv = Interval::new(-1.0, 1.0).unwrap();
        let mut idx: IntervalIndex<i32> = IntervalIndex::default();
        idx.extend([(iv, 1), (iv, 1), (iv, 2)]);
        let before = idx.len();
        assert!(idx.remove(&iv, &1));
        assert_eq!(idx.len(), before - 1);
        assert!(!idx.remove(&iv, &3));
        assert_eq!(idx.len(), before - 1);
    }

    #[test]
    fn intersects_is_symmetric() {
        let boxes = [
            Aabb3D::new(Point3D::new(0, 0, 0), [4, 4, 4]).unwrap(),
            Aabb3D::new(Point3D::new(3, 3, 3), [1, 1, 1]).unwrap(),
            Aabb3D::new(Point3D::new(4, 0, 0), [4, 4, 4]).unwrap(),
            Aabb3D::new(Point3D::new(-9, 2, 2), [10, 1, 1]).unwrap(),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
    }
}
