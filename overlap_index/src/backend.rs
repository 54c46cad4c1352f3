// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use crate::types::Geometry;

/// Spatial backend abstraction used by [`SpatialIndex`][crate::SpatialIndex].
///
/// Backends only know about slots (dense entry numbers handed out by the index) and their
/// geometry. Payloads and multiplicity live in the index itself.
pub trait Backend<G: Geometry> {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, geometry: G);

    /// Remove a slot from the spatial structure. Returns `false` if the slot was not present.
    fn remove(&mut self, slot: usize) -> bool;

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Number of live slots.
    fn len(&self) -> usize;

    /// Whether no slot is live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents with `items` in one pass.
    ///
    /// The default implementation clears and inserts one by one; tree backends pack instead.
    fn bulk_load(&mut self, items: &[(usize, G)]) {
        self.clear();
        for &(slot, geometry) in items {
            self.insert(slot, geometry);
        }
    }

    /// Visit slots whose geometry contains the point.
    fn visit_point<F: FnMut(usize)>(&self, point: G::Point, f: F);

    /// Visit slots whose geometry intersects `query`.
    fn visit_intersecting<F: FnMut(usize)>(&self, query: &G, f: F);
}
