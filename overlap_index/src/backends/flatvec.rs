// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Geometry;

/// Flat vector backend with linear scans.
pub struct FlatVec<G: Geometry> {
    slots: Vec<Option<G>>,
    live: usize,
}

impl<G: Geometry> Default for FlatVec<G> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }
}

impl<G: Geometry> Debug for FlatVec<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("total_slots", &self.slots.len())
            .field("alive", &self.live)
            .finish_non_exhaustive()
    }
}

impl<G: Geometry> Backend<G> for FlatVec<G> {
    fn insert(&mut self, slot: usize, geometry: G) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        if self.slots[slot].replace(geometry).is_none() {
            self.live += 1;
        }
    }

    fn remove(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(_) => {
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    fn len(&self) -> usize {
        self.live
    }

    fn visit_point<F: FnMut(usize)>(&self, point: G::Point, mut f: F) {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(g) = slot
                && g.contains(point)
            {
                f(i);
            }
        }
    }

    fn visit_intersecting<F: FnMut(usize)>(&self, query: &G, mut f: F) {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(g) = slot
                && g.intersects(query)
            {
                f(i);
            }
        }
    }
}
