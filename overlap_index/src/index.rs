// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`SpatialIndex`] API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::backend::Backend;
use crate::backends::RTree;
use crate::error::Result;
use crate::types::{Aabb3D, Geometry, Interval};

#[derive(Clone, Debug)]
struct Entry<G, P> {
    geometry: G,
    payload: P,
}

/// A multiset of `(geometry, payload)` entries with point and overlap queries.
///
/// Identical geometries, identical payloads, or both may be stored any number of times;
/// [`len`][Self::len] counts every stored entry. Query methods returning a [`HashSet`] report
/// each distinct payload once, while the `visit_*` methods see every raw entry.
///
/// Entries live in a slab of slots; the backend only indexes slot numbers.
#[derive(Debug)]
pub struct SpatialIndex<G: Geometry, P, B: Backend<G> = RTree<G>> {
    entries: Vec<Option<Entry<G, P>>>,
    free_list: Vec<usize>,
    len: usize,
    backend: B,
}

impl<G: Geometry, P> SpatialIndex<G, P> {
    /// Create an empty R-tree-backed index.
    ///
    /// `branching` is the maximum number of children per tree node. It tunes performance only
    /// and must be at least 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_index::{BoxIndex, IndexError};
    ///
    /// assert!(BoxIndex::<u32>::new(8).is_ok());
    /// assert_eq!(BoxIndex::<u32>::new(1).unwrap_err(), IndexError::InvalidBranching(1));
    /// ```
    pub fn new(branching: usize) -> Result<Self> {
        Ok(Self::with_backend(RTree::with_branching(branching)?))
    }

    /// Build an R-tree-backed index in bulk from entries.
    ///
    /// Produces the same contents as calling [`add`][Self::add] for each entry, with a packed
    /// tree instead of one grown by repeated splits.
    pub fn from_entries<I>(branching: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (G, P)>,
    {
        let mut idx = Self::new(branching)?;
        idx.load(entries);
        Ok(idx)
    }
}

impl<G: Geometry, P, B: Backend<G> + Default> Default for SpatialIndex<G, P, B> {
    fn default() -> Self {
        Self::with_backend(B::default())
    }
}

impl<G: Geometry, P, B: Backend<G>> SpatialIndex<G, P, B> {
    /// Create an empty index using an explicit backend instance.
    ///
    /// The backend must be empty.
    pub fn with_backend(backend: B) -> Self {
        debug_assert!(backend.is_empty(), "backend must start empty");
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            backend,
        }
    }

    /// Reserve space for at least `n` additional entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n.saturating_sub(self.free_list.len()));
    }

    /// Number of stored entries, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The spatial backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store an entry. Duplicates are never rejected.
    pub fn add(&mut self, geometry: G, payload: P) {
        let entry = Some(Entry { geometry, payload });
        let slot = if let Some(slot) = self.free_list.pop() {
            self.entries[slot] = entry;
            slot
        } else {
            self.entries.push(entry);
            self.entries.len() - 1
        };
        self.backend.insert(slot, geometry);
        self.len += 1;
    }

    /// Remove every entry (the backend keeps its configuration).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list.clear();
        self.len = 0;
        self.backend.clear();
    }

    /// Visit entries whose geometry contains the point (does not allocate result storage).
    ///
    /// Calls `f(geometry, payload)` once per stored entry, so duplicates are visited
    /// repeatedly. The order is backend-dependent.
    pub fn visit_containing<F: FnMut(&G, &P)>(&self, point: G::Point, mut f: F) {
        self.backend.visit_point(point, |slot| {
            if let Some(Some(e)) = self.entries.get(slot) {
                f(&e.geometry, &e.payload);
            }
        });
    }

    /// Visit entries whose geometry intersects `query` (does not allocate result storage).
    ///
    /// Calls `f(geometry, payload)` once per stored entry, so duplicates are visited
    /// repeatedly. The order is backend-dependent.
    pub fn visit_intersecting<F: FnMut(&G, &P)>(&self, query: &G, mut f: F) {
        self.backend.visit_intersecting(query, |slot| {
            if let Some(Some(e)) = self.entries.get(slot) {
                f(&e.geometry, &e.payload);
            }
        });
    }

    /// Number of stored entries containing the point, duplicates included.
    pub fn count_containing(&self, point: G::Point) -> usize {
        let mut n = 0;
        self.backend.visit_point(point, |_| n += 1);
        n
    }

    /// Number of stored entries intersecting `query`, duplicates included.
    pub fn count_intersecting(&self, query: &G) -> usize {
        let mut n = 0;
        self.backend.visit_intersecting(query, |_| n += 1);
        n
    }

    /// Iterate over every stored entry in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&G, &P)> + '_ {
        self.entries
            .iter()
            .flatten()
            .map(|e| (&e.geometry, &e.payload))
    }

    /// Replace the contents with `entries`, letting the backend pack them in one pass.
    fn load<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (G, P)>,
    {
        self.entries.clear();
        self.free_list.clear();
        self.entries.extend(
            entries
                .into_iter()
                .map(|(geometry, payload)| Some(Entry { geometry, payload })),
        );
        self.len = self.entries.len();
        let pairs: Vec<(usize, G)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| e.as_ref().map(|e| (slot, e.geometry)))
            .collect();
        self.backend.bulk_load(&pairs);
    }
}

impl<G: Geometry, P: PartialEq, B: Backend<G>> SpatialIndex<G, P, B> {
    /// Remove exactly one entry equal to `(geometry, payload)`.
    ///
    /// When several entries match, the one in the lowest slot goes. Returns `false` and leaves
    /// the index untouched when nothing matches.
    pub fn remove(&mut self, geometry: &G, payload: &P) -> bool {
        let mut victim: Option<usize> = None;
        self.backend.visit_intersecting(geometry, |slot| {
            if let Some(Some(e)) = self.entries.get(slot)
                && e.geometry == *geometry
                && e.payload == *payload
                && victim.is_none_or(|v| slot < v)
            {
                victim = Some(slot);
            }
        });
        let Some(slot) = victim else {
            return false;
        };
        self.backend.remove(slot);
        self.entries[slot] = None;
        self.free_list.push(slot);
        self.len -= 1;
        true
    }
}

impl<G: Geometry, P: Clone + Eq + Hash, B: Backend<G>> SpatialIndex<G, P, B> {
    /// Distinct payloads of the entries whose geometry contains the point.
    pub fn contains(&self, point: G::Point) -> HashSet<P> {
        let mut out = HashSet::new();
        self.visit_containing(point, |_, p| {
            if !out.contains(p) {
                out.insert(p.clone());
            }
        });
        out
    }

    /// Distinct payloads of the entries whose geometry intersects `query`.
    ///
    /// Closed semantics: geometries touching only on their boundary intersect.
    pub fn intersects_with(&self, query: &G) -> HashSet<P> {
        let mut out = HashSet::new();
        self.visit_intersecting(query, |_, p| {
            if !out.contains(p) {
                out.insert(p.clone());
            }
        });
        out
    }
}

impl<G: Geometry, P, B: Backend<G>> Extend<(G, P)> for SpatialIndex<G, P, B> {
    fn extend<I: IntoIterator<Item = (G, P)>>(&mut self, iter: I) {
        for (geometry, payload) in iter {
            self.add(geometry, payload);
        }
    }
}

/// Bulk-loads an R-tree with the default branching factor.
impl<G: Geometry, P> FromIterator<(G, P)> for SpatialIndex<G, P> {
    fn from_iter<I: IntoIterator<Item = (G, P)>>(iter: I) -> Self {
        let mut idx = Self::default();
        idx.load(iter);
        idx
    }
}

/// Index over 3D voxel boxes.
pub type BoxIndex<P, B = RTree<Aabb3D>> = SpatialIndex<Aabb3D, P, B>;

/// Index over closed 1D intervals.
pub type IntervalIndex<P, B = RTree<Interval>> = SpatialIndex<Interval, P, B>;
