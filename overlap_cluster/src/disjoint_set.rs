// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed disjoint-set forest.

use alloc::vec;
use alloc::vec::Vec;

/// Disjoint-set (union-find) over the dense elements `0..len`.
///
/// Parents live in one flat array; `find` compresses paths and `union` links by rank, so both
/// run in near-constant amortized time.
///
/// # Examples
///
/// ```
/// use overlap_cluster::DisjointSet;
///
/// let mut sets = DisjointSet::new(4);
/// assert!(sets.union(0, 2));
/// assert!(!sets.union(2, 0));
/// assert!(sets.same_set(0, 2));
/// assert_eq!(sets.set_count(), 3);
/// assert_eq!(sets.groups(), vec![vec![0, 2], vec![1], vec![3]]);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSet {
    /// Create `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Representative of the set holding `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            core::cmp::Ordering::Less => self.parent[ra] = rb,
            core::cmp::Ordering::Greater => self.parent[rb] = ra,
            core::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        self.sets -= 1;
        true
    }

    /// Whether `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Dense set label per element, numbered in order of each set's smallest element.
    pub fn labels(&mut self) -> Vec<usize> {
        let mut label_of_root: Vec<Option<usize>> = vec![None; self.len()];
        let mut next = 0;
        (0..self.len())
            .map(|x| {
                let root = self.find(x);
                *label_of_root[root].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }

    /// Elements grouped by set, each group ascending, groups ordered by smallest element.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); self.sets];
        for (x, label) in self.labels().into_iter().enumerate() {
            groups[label].push(x);
        }
        groups
    }
}
