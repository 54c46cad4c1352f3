// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree backend generic over [`Geometry`] with SAH-like splits.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use smallvec::{SmallVec, smallvec};

use crate::backend::Backend;
use crate::error::{IndexError, Result};
use crate::types::Geometry;
use crate::util::iroot_ceil;

/// Branching factor used by [`RTree::default`].
pub const DEFAULT_BRANCHING: usize = 8;

/// R-tree backend using SAH-like overflow splits, STR bulk loading, and condense-on-remove.
///
/// All leaves sit at the same depth. Nodes other than the root hold between
/// `max(1, branching / 2)` and `branching` children after an insert or remove; packed bulk
/// loads may leave the last node of a slab under-filled.
pub struct RTree<G: Geometry> {
    max_children: usize,
    min_children: usize,
    root: Option<NodeIdx>,
    arena: Vec<RNode<G>>,
    free_nodes: Vec<NodeIdx>,
    slots: Vec<Option<G>>,
    live: usize,
}

type Children<G> = SmallVec<[RChild<G>; DEFAULT_BRANCHING]>;

#[derive(Clone)]
struct RNode<G: Geometry> {
    bbox: G,
    leaf: bool,
    children: Children<G>,
}

#[derive(Copy, Clone)]
enum RChild<G: Geometry> {
    Node(NodeIdx),
    Item { slot: usize, bbox: G },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn get(self) -> usize {
        self.0
    }
}

impl<G: Geometry> Default for RTree<G> {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_BRANCHING)
    }
}

impl<G: Geometry> RTree<G> {
    /// Create an empty tree holding at most `max_children` children per node.
    ///
    /// The branching factor only affects performance. Values below 2 are rejected.
    pub fn with_branching(max_children: usize) -> Result<Self> {
        if max_children < 2 {
            return Err(IndexError::InvalidBranching(max_children));
        }
        log::debug!("rtree: created with branching factor {max_children}");
        Ok(Self::new_unchecked(max_children))
    }

    fn new_unchecked(max_children: usize) -> Self {
        Self {
            max_children,
            min_children: (max_children / 2).max(1),
            root: None,
            arena: Vec::new(),
            free_nodes: Vec::new(),
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Maximum number of children per node.
    pub fn branching(&self) -> usize {
        self.max_children
    }

    /// Number of levels from the root to the leaves (0 when empty).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.root;
        while let Some(idx) = cur {
            depth += 1;
            let node = &self.arena[idx.get()];
            cur = match node.children.first() {
                Some(RChild::Node(child)) if !node.leaf => Some(*child),
                _ => None,
            };
        }
        depth
    }

    fn alloc_node(&mut self, node: RNode<G>) -> NodeIdx {
        if let Some(idx) = self.free_nodes.pop() {
            self.arena[idx.get()] = node;
            idx
        } else {
            self.arena.push(node);
            NodeIdx(self.arena.len() - 1)
        }
    }

    fn free_node(&mut self, idx: NodeIdx) {
        self.arena[idx.get()].children.clear();
        self.free_nodes.push(idx);
    }

    fn child_bbox(&self, child: &RChild<G>) -> G {
        match child {
            RChild::Node(i) => self.arena[i.get()].bbox,
            RChild::Item { bbox, .. } => *bbox,
        }
    }

    /// Union of the children's bounds; `None` for an empty list.
    fn bounds_of(&self, children: &[RChild<G>]) -> Option<G> {
        let mut it = children.iter();
        let first = self.child_bbox(it.next()?);
        Some(it.fold(first, |acc, c| acc.union(&self.child_bbox(c))))
    }

    fn refresh_bbox(&mut self, node: NodeIdx) {
        if let Some(bbox) = self.bounds_of(&self.arena[node.get()].children) {
            self.arena[node.get()].bbox = bbox;
        }
    }

    /// Pick the child needing the least enlargement; ties go to the smaller child.
    fn choose_child(&self, node: NodeIdx, bbox: &G) -> usize {
        let mut best_idx = 0_usize;
        let mut best: Option<(f64, f64)> = None;
        for (i, c) in self.arena[node.get()].children.iter().enumerate() {
            let cb = self.child_bbox(c);
            let measure = cb.measure();
            let cost = (cb.union(bbox).measure() - measure, measure);
            if best.is_none_or(|b| cost < b) {
                best = Some(cost);
                best_idx = i;
            }
        }
        best_idx
    }

    /// SAH-like split: for each axis, sort by center, precompute prefix/suffix bounds, and
    /// choose `k` minimizing `measure(L_k) * k + measure(R_k) * (n - k)`.
    fn sah_split(&self, children: Children<G>) -> (Children<G>, Children<G>) {
        let n = children.len();
        let min = self.min_children;
        debug_assert!(n >= 2 * min, "split requires an overflowing node");
        let mut order: Vec<(f64, RChild<G>)> = children.into_iter().map(|c| (0.0, c)).collect();
        let mut prefix: Vec<G> = Vec::with_capacity(n);
        let mut suffix: Vec<G> = Vec::with_capacity(n);
        let mut best: Option<(f64, usize, usize)> = None;

        for axis in 0..G::AXES {
            self.sort_on_axis(&mut order, axis);

            prefix.clear();
            for (_, c) in &order {
                let bb = self.child_bbox(c);
                let next = prefix.last().map_or(bb, |prev| prev.union(&bb));
                prefix.push(next);
            }
            suffix.clear();
            for (_, c) in order.iter().rev() {
                let bb = self.child_bbox(c);
                let next = suffix.last().map_or(bb, |prev| bb.union(prev));
                suffix.push(next);
            }
            suffix.reverse();

            for k in min..=(n - min) {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Node sizes are tiny compared to f64 precision."
                )]
                let cost =
                    prefix[k - 1].measure() * k as f64 + suffix[k].measure() * (n - k) as f64;
                if best.is_none_or(|(c, _, _)| cost < c) {
                    best = Some((cost, axis, k));
                }
            }
        }

        let (_, axis, k) = best.unwrap_or((0.0, 0, n / 2));
        if axis + 1 != G::AXES {
            self.sort_on_axis(&mut order, axis);
        }
        let right = order.split_off(k);
        log::trace!("rtree: split {n} children on axis {axis} at {k}");
        (
            order.into_iter().map(|(_, c)| c).collect(),
            right.into_iter().map(|(_, c)| c).collect(),
        )
    }

    fn sort_on_axis(&self, order: &mut [(f64, RChild<G>)], axis: usize) {
        for (key, c) in order.iter_mut() {
            *key = self.child_bbox(c).center(axis);
        }
        order.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    /// Split an overflowing node in place; returns the new right sibling.
    fn split(&mut self, node: NodeIdx) -> NodeIdx {
        let children = core::mem::take(&mut self.arena[node.get()].children);
        let leaf = self.arena[node.get()].leaf;
        let (left, right) = self.sah_split(children);
        let l_bbox = self.bounds_of(&left);
        let r_bbox = self.bounds_of(&right);
        let (Some(l_bbox), Some(r_bbox)) = (l_bbox, r_bbox) else {
            unreachable!("split halves are never empty");
        };
        let n = &mut self.arena[node.get()];
        n.children = left;
        n.bbox = l_bbox;
        self.alloc_node(RNode {
            bbox: r_bbox,
            leaf,
            children: right,
        })
    }

    fn insert_rec(&mut self, node: NodeIdx, slot: usize, bbox: G) -> Option<NodeIdx> {
        if self.arena[node.get()].leaf {
            let n = &mut self.arena[node.get()];
            n.children.push(RChild::Item { slot, bbox });
            n.bbox = n.bbox.union(&bbox);
            if n.children.len() <= self.max_children {
                return None;
            }
            return Some(self.split(node));
        }

        let pick = self.choose_child(node, &bbox);
        let RChild::Node(child) = self.arena[node.get()].children[pick] else {
            unreachable!("internal nodes hold only child nodes");
        };
        let split = self.insert_rec(child, slot, bbox);
        let n = &mut self.arena[node.get()];
        n.bbox = n.bbox.union(&bbox);
        if let Some(right) = split {
            n.children.insert(pick + 1, RChild::Node(right));
            if n.children.len() > self.max_children {
                return Some(self.split(node));
            }
        }
        None
    }

    /// Place an item in the tree without touching slot bookkeeping.
    fn place(&mut self, slot: usize, bbox: G) {
        let Some(root) = self.root else {
            let leaf = self.alloc_node(RNode {
                bbox,
                leaf: true,
                children: smallvec![RChild::Item { slot, bbox }],
            });
            self.root = Some(leaf);
            return;
        };
        if let Some(right) = self.insert_rec(root, slot, bbox) {
            let bbox = self.arena[root.get()]
                .bbox
                .union(&self.arena[right.get()].bbox);
            let new_root = self.alloc_node(RNode {
                bbox,
                leaf: false,
                children: smallvec![RChild::Node(root), RChild::Node(right)],
            });
            self.root = Some(new_root);
        }
    }

    /// Remove `slot` below `node`. Under-filled children are detached and their items pushed
    /// to `orphans` for reinsertion.
    fn remove_rec(
        &mut self,
        node: NodeIdx,
        slot: usize,
        bbox: &G,
        orphans: &mut Vec<(usize, G)>,
    ) -> bool {
        if !self.arena[node.get()].bbox.intersects(bbox) {
            return false;
        }
        if self.arena[node.get()].leaf {
            let children = &mut self.arena[node.get()].children;
            let Some(pos) = children
                .iter()
                .position(|c| matches!(c, RChild::Item { slot: s, .. } if *s == slot))
            else {
                return false;
            };
            children.remove(pos);
            self.refresh_bbox(node);
            return true;
        }

        for i in 0..self.arena[node.get()].children.len() {
            let RChild::Node(child) = self.arena[node.get()].children[i] else {
                continue;
            };
            if self.remove_rec(child, slot, bbox, orphans) {
                if self.arena[child.get()].children.len() < self.min_children {
                    self.arena[node.get()].children.remove(i);
                    self.collect_and_free(child, orphans);
                }
                self.refresh_bbox(node);
                return true;
            }
        }
        false
    }

    fn collect_and_free(&mut self, node: NodeIdx, out: &mut Vec<(usize, G)>) {
        let mut stack: SmallVec<[NodeIdx; 16]> = smallvec![node];
        while let Some(idx) = stack.pop() {
            for c in &self.arena[idx.get()].children {
                match *c {
                    RChild::Node(child) => stack.push(child),
                    RChild::Item { slot, bbox } => out.push((slot, bbox)),
                }
            }
            self.free_node(idx);
        }
    }

    /// Drop empty roots and collapse single-child internal roots.
    fn shrink_root(&mut self) {
        while let Some(root) = self.root {
            let node = &self.arena[root.get()];
            if node.children.is_empty() {
                self.free_node(root);
                self.root = None;
            } else if let [RChild::Node(only)] = &node.children[..]
                && !node.leaf
            {
                let only = *only;
                self.free_node(root);
                self.root = Some(only);
            } else {
                break;
            }
        }
    }

    /// Order `entries` into STR runs of at most `max_children`, recording each run's range.
    fn str_runs<T, F>(
        entries: &mut [T],
        axis: usize,
        slabs: usize,
        cap: usize,
        center: &F,
        base: usize,
        out: &mut Vec<Range<usize>>,
    ) where
        F: Fn(&T, usize) -> f64,
    {
        entries.sort_by(|a, b| center(a, axis).total_cmp(&center(b, axis)));
        if axis + 1 >= G::AXES {
            let mut start = base;
            for chunk in entries.chunks(cap) {
                out.push(start..start + chunk.len());
                start += chunk.len();
            }
            return;
        }
        let slab_len = entries.len().div_ceil(slabs).div_ceil(cap) * cap;
        let mut start = base;
        for slab in entries.chunks_mut(slab_len) {
            let len = slab.len();
            Self::str_runs(slab, axis + 1, slabs, cap, center, start, out);
            start += len;
        }
    }

    fn pack_level(&mut self, level: &mut [NodeIdx]) -> Vec<NodeIdx> {
        let cap = self.max_children;
        let slabs = iroot_ceil(level.len().div_ceil(cap), G::AXES);
        let mut runs = Vec::new();
        let arena = &self.arena;
        Self::str_runs(
            level,
            0,
            slabs,
            cap,
            &|n: &NodeIdx, axis| arena[n.get()].bbox.center(axis),
            0,
            &mut runs,
        );
        let mut parents = Vec::with_capacity(runs.len());
        for run in runs {
            let children: Children<G> = level[run].iter().map(|&n| RChild::Node(n)).collect();
            let Some(bbox) = self.bounds_of(&children) else {
                continue;
            };
            parents.push(self.alloc_node(RNode {
                bbox,
                leaf: false,
                children,
            }));
        }
        parents
    }
}

impl<G: Geometry> Backend<G> for RTree<G> {
    fn insert(&mut self, slot: usize, geometry: G) {
        if self.slots.get(slot).is_some_and(Option::is_some) {
            self.remove(slot);
        }
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(geometry);
        self.live += 1;
        self.place(slot, geometry);
    }

    fn remove(&mut self, slot: usize) -> bool {
        let Some(bbox) = self.slots.get_mut(slot).and_then(Option::take) else {
            return false;
        };
        self.live -= 1;
        let mut orphans = Vec::new();
        let found = match self.root {
            Some(root) => self.remove_rec(root, slot, &bbox, &mut orphans),
            None => false,
        };
        debug_assert!(found, "rtree invariant violated: live slot {slot} missing from tree");
        self.shrink_root();
        if !orphans.is_empty() {
            log::trace!("rtree: reinserting {} orphaned entries", orphans.len());
        }
        for (slot, bbox) in orphans {
            self.place(slot, bbox);
        }
        found
    }

    fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.free_nodes.clear();
        self.slots.clear();
        self.live = 0;
    }

    fn len(&self) -> usize {
        self.live
    }

    fn bulk_load(&mut self, items: &[(usize, G)]) {
        self.clear();
        for &(slot, geometry) in items {
            if self.slots.len() <= slot {
                self.slots.resize_with(slot + 1, || None);
            }
            if self.slots[slot].replace(geometry).is_none() {
                self.live += 1;
            }
        }
        // Pack from the deduplicated slot table so a repeated slot is indexed once.
        let mut pending: Vec<(usize, G)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, g)| g.map(|g| (slot, g)))
            .collect();
        if pending.is_empty() {
            return;
        }

        let cap = self.max_children;
        let slabs = iroot_ceil(pending.len().div_ceil(cap), G::AXES);
        let mut runs = Vec::new();
        Self::str_runs(
            &mut pending,
            0,
            slabs,
            cap,
            &|e: &(usize, G), axis| e.1.center(axis),
            0,
            &mut runs,
        );
        let mut level: Vec<NodeIdx> = Vec::with_capacity(runs.len());
        for run in runs {
            let children: Children<G> = pending[run]
                .iter()
                .map(|&(slot, bbox)| RChild::Item { slot, bbox })
                .collect();
            let Some(bbox) = self.bounds_of(&children) else {
                continue;
            };
            level.push(self.alloc_node(RNode {
                bbox,
                leaf: true,
                children,
            }));
        }
        while level.len() > 1 {
            level = self.pack_level(&mut level);
        }
        self.root = level.first().copied();
        log::debug!(
            "rtree: bulk loaded {} entries into {} nodes, depth {}",
            self.live,
            self.arena.len(),
            self.depth()
        );
    }

    fn visit_point<F: FnMut(usize)>(&self, point: G::Point, mut f: F) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[NodeIdx; 32]> = smallvec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.contains(point) {
                continue;
            }
            for c in &n.children {
                match c {
                    RChild::Node(ci) => stack.push(*ci),
                    RChild::Item { slot, bbox } => {
                        if bbox.contains(point) {
                            f(*slot);
                        }
                    }
                }
            }
        }
    }

    fn visit_intersecting<F: FnMut(usize)>(&self, query: &G, mut f: F) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[NodeIdx; 32]> = smallvec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.intersects(query) {
                continue;
            }
            for c in &n.children {
                match c {
                    RChild::Node(ci) => stack.push(*ci),
                    RChild::Item { slot, bbox } => {
                        if bbox.intersects(query) {
                            f(*slot);
                        }
                    }
                }
            }
        }
    }
}

impl<G: Geometry> Debug for RTree<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("arena_nodes", &self.arena.len())
            .field("free_nodes", &self.free_nodes.len())
            .field("total_slots", &self.slots.len())
            .field("alive", &self.live)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Aabb3D, Interval, Point3D};
    use alloc::vec;

    fn bx(x: i64, y: i64, z: i64, e: u64) -> Aabb3D {
        Aabb3D::new(Point3D::new(x, y, z), [e, e, e]).unwrap()
    }

    /// Walks the tree and checks structural invariants; returns the slots seen in leaves.
    fn check<G: Geometry>(t: &RTree<G>) -> Vec<usize> {
        let mut seen = Vec::new();
        let Some(root) = t.root else {
            assert_eq!(t.live, 0);
            return seen;
        };
        let mut leaf_depths = Vec::new();
        let mut stack = vec![(root, 1_usize)];
        while let Some((idx, depth)) = stack.pop() {
            let n = &t.arena[idx.get()];
            assert!(!n.children.is_empty(), "empty node in tree");
            assert!(n.children.len() <= t.max_children, "overfull node");
            assert_eq!(t.bounds_of(&n.children), Some(n.bbox), "stale bbox");
            if n.leaf {
                leaf_depths.push(depth);
            }
            for c in &n.children {
                match *c {
                    RChild::Node(ci) => {
                        assert!(!n.leaf, "leaf holds a node");
                        stack.push((ci, depth + 1));
                    }
                    RChild::Item { slot, bbox } => {
                        assert!(n.leaf, "internal node holds an item");
                        assert_eq!(t.slots[slot], Some(bbox));
                        seen.push(slot);
                    }
                }
            }
        }
        assert!(leaf_depths.windows(2).all(|w| w[0] == w[1]), "unbalanced");
        assert_eq!(leaf_depths[0], t.depth());
        seen.sort_unstable();
        assert_eq!(seen.len(), t.live);
        seen
    }

    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 33) % bound
        }
    }

    #[allow(clippy::cast_possible_wrap, reason = "test coordinates are small")]
    fn random_boxes(n: usize, seed: u64) -> Vec<Aabb3D> {
        let mut rng = Lcg(seed);
        (0..n)
            .map(|_| {
                let p = Point3D::new(
                    rng.next(200) as i64 - 100,
                    rng.next(200) as i64 - 100,
                    rng.next(200) as i64 - 100,
                );
                Aabb3D::new(p, [1 + rng.next(20), 1 + rng.next(20), 1 + rng.next(20)]).unwrap()
            })
            .collect()
    }

    #[test]
    fn branching_is_validated() {
        assert_eq!(
            RTree::<Aabb3D>::with_branching(1).unwrap_err(),
            IndexError::InvalidBranching(1)
        );
        assert!(RTree::<Aabb3D>::with_branching(0).is_err());
        assert_eq!(RTree::<Aabb3D>::with_branching(2).unwrap().branching(), 2);
    }

    #[test]
    fn basic_insert_query() {
        let mut t: RTree<Aabb3D> = RTree::default();
        t.insert(0, bx(0, 0, 0, 10));
        t.insert(1, bx(5, 5, 5, 10));
        let mut hits = Vec::new();
        t.visit_point(Point3D::new(6, 6, 6), |s| hits.push(s));
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1]);

        hits.clear();
        t.visit_intersecting(&bx(12, 12, 12, 8), |s| hits.push(s));
        assert_eq!(hits, vec![1]);
        assert_eq!(check(&t), vec![0, 1]);
    }

    #[test]
    fn incremental_inserts_stay_balanced_and_match_scan() {
        for branching in [2, 3, 8, 16] {
            let boxes = random_boxes(300, 7 + branching as u64);
            let mut t: RTree<Aabb3D> = RTree::with_branching(branching).unwrap();
            for (i, b) in boxes.iter().enumerate() {
                t.insert(i, *b);
            }
            assert_eq!(check(&t), (0..300).collect::<Vec<_>>());
            assert!(t.depth() > 1);

            for q in random_boxes(40, 99) {
                let mut hits = Vec::new();
                t.visit_intersecting(&q, |s| hits.push(s));
                hits.sort_unstable();
                let expected: Vec<_> = (0..boxes.len())
                    .filter(|&i| boxes[i].overlaps(&q))
                    .collect();
                assert_eq!(hits, expected, "branching {branching}");
            }
        }
    }

    #[test]
    fn removal_condenses_and_keeps_remaining_entries() {
        let boxes = random_boxes(200, 3);
        let mut t: RTree<Aabb3D> = RTree::with_branching(4).unwrap();
        for (i, b) in boxes.iter().enumerate() {
            t.insert(i, *b);
        }
        for i in (0..200).step_by(3) {
            assert!(t.remove(i));
            assert!(!t.remove(i));
        }
        let remaining: Vec<_> = (0..200).filter(|i| i % 3 != 0).collect();
        assert_eq!(check(&t), remaining);

        let q = bx(-20, -20, -20, 40);
        let mut hits = Vec::new();
        t.visit_intersecting(&q, |s| hits.push(s));
        hits.sort_unstable();
        let expected: Vec<_> = remaining
            .iter()
            .copied()
            .filter(|&i| boxes[i].overlaps(&q))
            .collect();
        assert_eq!(hits, expected);

        for &i in &remaining {
            assert!(t.remove(i));
        }
        assert!(t.root.is_none());
        assert_eq!(t.len(), 0);
        assert_eq!(t.depth(), 0);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let boxes = random_boxes(100, 11);
        let mut t: RTree<Aabb3D> = RTree::with_branching(4).unwrap();
        let mut peak = None;
        for _ in 0..3 {
            for (i, b) in boxes.iter().enumerate() {
                t.insert(i, *b);
            }
            for i in 0..boxes.len() {
                assert!(t.remove(i));
            }
            assert!(t.is_empty());
            assert_eq!(t.free_nodes.len(), t.arena.len());
            match peak {
                None => peak = Some(t.arena.len()),
                Some(p) => assert_eq!(t.arena.len(), p, "arena keeps growing"),
            }
        }
    }

    #[test]
    fn bulk_load_matches_incremental() {
        let boxes = random_boxes(500, 21);
        let items: Vec<_> = boxes.iter().copied().enumerate().collect();
        let mut packed: RTree<Aabb3D> = RTree::with_branching(6).unwrap();
        packed.bulk_load(&items);
        assert_eq!(check(&packed), (0..500).collect::<Vec<_>>());

        let p = Point3D::new(0, 0, 0);
        let mut hits = Vec::new();
        packed.visit_point(p, |s| hits.push(s));
        hits.sort_unstable();
        let expected: Vec<_> = (0..500).filter(|&i| boxes[i].contains_point(p)).collect();
        assert_eq!(hits, expected);

        // Packed trees keep accepting inserts and removals.
        packed.insert(500, bx(0, 0, 0, 1));
        assert!(packed.remove(0));
        assert_eq!(check(&packed).len(), 500);
    }

    #[test]
    fn bulk_load_empty_and_single() {
        let mut t: RTree<Interval> = RTree::default();
        t.bulk_load(&[]);
        assert!(t.root.is_none());
        t.bulk_load(&[(4, Interval::new(1.0, 2.0).unwrap())]);
        assert_eq!(check(&t), vec![4]);
        assert_eq!(t.depth(), 1);
    }

    #[test]
    fn intervals_with_identical_bounds() {
        let mut t: RTree<Interval> = RTree::with_branching(3).unwrap();
        let iv = Interval::point(5.0).unwrap();
        for i in 0..50 {
            t.insert(i, iv);
        }
        assert_eq!(check(&t).len(), 50);
        let mut n = 0;
        t.visit_point(5.0, |_| n += 1);
        assert_eq!(n, 50);
        for i in 0..50 {
            assert!(t.remove(i));
        }
        assert!(t.root.is_none());
    }
}
