// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial separation: connected components of the overlap graph.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;
use overlap_index::backends::DEFAULT_BRANCHING;
use overlap_index::{Backend, Geometry, IndexError, SpatialIndex};

use crate::disjoint_set::DisjointSet;

/// Partitions elements into clusters of transitively overlapping geometries.
///
/// Neighbours are found with index queries rather than by comparing every pair, so the cost
/// grows with the number of actual overlaps instead of quadratically.
///
/// Clusters come back ordered by their first element's input position; inside a cluster,
/// elements keep input order.
///
/// # Examples
///
/// ```
/// use overlap_cluster::ClusterBuilder;
/// use overlap_index::Interval;
///
/// let spans = [(0.0, 1.0), (0.5, 2.0), (5.0, 6.0), (1.5, 1.8)];
/// let clusters = ClusterBuilder::new().separate(spans, |&(a, b)| Interval::new(a, b).unwrap());
/// assert_eq!(
///     clusters,
///     vec![vec![(0.0, 1.0), (0.5, 2.0), (1.5, 1.8)], vec![(5.0, 6.0)]]
/// );
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ClusterBuilder {
    branching: usize,
}

impl Default for ClusterBuilder {
    fn default() -> Self {
        Self {
            branching: DEFAULT_BRANCHING,
        }
    }
}

impl ClusterBuilder {
    /// Builder using the default R-tree branching factor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose internal index uses `branching` children per node (at least 2).
    pub fn with_branching(branching: usize) -> Result<Self, IndexError> {
        if branching < 2 {
            return Err(IndexError::InvalidBranching(branching));
        }
        Ok(Self { branching })
    }

    /// Group `elements` into clusters of transitively overlapping `geometry_of(element)`.
    ///
    /// Every element lands in exactly one cluster, duplicates included. Empty input yields no
    /// clusters.
    pub fn separate<E, G, I, F>(&self, elements: I, mut geometry_of: F) -> Vec<Vec<E>>
    where
        G: Geometry,
        I: IntoIterator<Item = E>,
        F: FnMut(&E) -> G,
    {
        let elements: Vec<E> = elements.into_iter().collect();
        let geometries: Vec<G> = elements.iter().map(&mut geometry_of).collect();
        let mut sets = self.components(&geometries);

        let mut clusters: Vec<Vec<E>> = (0..sets.set_count()).map(|_| Vec::new()).collect();
        for (element, label) in elements.into_iter().zip(sets.labels()) {
            clusters[label].push(element);
        }
        log::debug!(
            "separate: {} elements into {} clusters",
            geometries.len(),
            clusters.len()
        );
        clusters
    }

    /// Like [`separate`][Self::separate], but clusters are sets: equal elements collapse.
    ///
    /// Equal elements always share a cluster, since they map to equal geometries.
    pub fn separate_distinct<E, G, I, F>(&self, elements: I, geometry_of: F) -> Vec<HashSet<E>>
    where
        E: Eq + Hash,
        G: Geometry,
        I: IntoIterator<Item = E>,
        F: FnMut(&E) -> G,
    {
        self.separate(elements, geometry_of)
            .into_iter()
            .map(|cluster| cluster.into_iter().collect())
            .collect()
    }

    /// Cluster positions `0..geometries.len()` using an index the caller already built.
    ///
    /// Payloads of `index` must be positions into `geometries`; payloads out of range are
    /// ignored. Two overlapping positions are linked when at least one of them is indexed.
    /// Returns groups of positions, each ascending.
    pub fn separate_indexed<G, B>(
        &self,
        geometries: &[G],
        index: &SpatialIndex<G, usize, B>,
    ) -> Vec<Vec<usize>>
    where
        G: Geometry,
        B: Backend<G>,
    {
        union_neighbours(geometries, index).groups()
    }

    fn components<G: Geometry>(&self, geometries: &[G]) -> DisjointSet {
        let index = match SpatialIndex::from_entries(
            self.branching,
            geometries.iter().copied().zip(0_usize..),
        ) {
            Ok(index) => index,
            Err(err) => unreachable!("branching validated at construction: {err}"),
        };
        union_neighbours(geometries, &index)
    }
}

/// Group `elements` into clusters of transitively overlapping geometries.
///
/// Shorthand for [`ClusterBuilder::separate`] with the default builder.
pub fn separate<E, G, I, F>(elements: I, geometry_of: F) -> Vec<Vec<E>>
where
    G: Geometry,
    I: IntoIterator<Item = E>,
    F: FnMut(&E) -> G,
{
    ClusterBuilder::default().separate(elements, geometry_of)
}

fn union_neighbours<G, B>(geometries: &[G], index: &SpatialIndex<G, usize, B>) -> DisjointSet
where
    G: Geometry,
    B: Backend<G>,
{
    let n = geometries.len();
    let mut sets = DisjointSet::new(n);
    for (i, geometry) in geometries.iter().enumerate() {
        // A caller's index may hold only one side of a pair, so look from both ends.
        index.visit_intersecting(geometry, |_, &j| {
            if j != i && j < n {
                sets.union(i, j);
            }
        });
    }
    log::trace!(
        "separate: {n} geometries form {} components",
        sets.set_count()
    );
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use overlap_index::backends::FlatVec;
    use overlap_index::{Aabb3D, Interval, Point3D};

    fn bx(x: i64, y: i64, z: i64, e: u64) -> Aabb3D {
        Aabb3D::new(Point3D::new(x, y, z), [e, e, e]).unwrap()
    }

    /// Clusters as sorted position lists, sorted, for order-free comparison.
    fn canonical(mut clusters: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for c in &mut clusters {
            c.sort_unstable();
        }
        clusters.sort();
        clusters
    }

    /// Connected components by comparing every pair.
    fn brute_force<G: Geometry>(geometries: &[G]) -> Vec<Vec<usize>> {
        let n = geometries.len();
        let mut label: Vec<Option<usize>> = vec![None; n];
        let mut out = Vec::new();
        for start in 0..n {
            if label[start].is_some() {
                continue;
            }
            let mut members = vec![start];
            label[start] = Some(out.len());
            let mut stack = vec![start];
            while let Some(i) = stack.pop() {
                for j in 0..n {
                    if label[j].is_none() && geometries[i].intersects(&geometries[j]) {
                        label[j] = Some(out.len());
                        members.push(j);
                        stack.push(j);
                    }
                }
            }
            out.push(members);
        }
        canonical(out)
    }

    #[test]
    fn small_known_partition() {
        let boxes = [
            bx(0, 0, 0, 10),
            bx(50, 0, 0, 10),
            bx(3, 3, 3, 10),
            bx(100, 100, 100, 5),
            bx(55, 5, 5, 3),
            bx(6, 6, 6, 10),
        ];
        let clusters = separate(0..boxes.len(), |&i| boxes[i]);
        assert_eq!(clusters, vec![vec![0, 2, 5], vec![1, 4], vec![3]]);
        assert_eq!(canonical(clusters), brute_force(&boxes));
    }

    #[test]
    fn long_chain_and_far_group_with_duplicates() {
        let mut boxes: Vec<Aabb3D> = (0..100).map(|i| bx(3 * i, 3 * i, 3 * i, 20)).collect();
        boxes.extend((0..20).map(|i| bx(10_000 + 3 * i, 10_000 + 3 * i, 10_000 + 3 * i, 20)));
        boxes.extend((0..5).map(|i| bx(3 * i, 3 * i, 3 * i, 20)));

        let clusters = separate(boxes.iter().copied(), |b| *b);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 105);
        assert_eq!(clusters[1].len(), 20);
        assert!(clusters[1].iter().all(|b| b.min().x >= 10_000));

        let distinct = ClusterBuilder::new().separate_distinct(boxes.iter().copied(), |b| *b);
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].len(), 100);
        assert_eq!(distinct[1].len(), 20);
    }

    #[test]
    fn empty_input_has_no_clusters() {
        let clusters = separate(Vec::<Aabb3D>::new(), |b| *b);
        assert!(clusters.is_empty());
    }

    #[test]
    fn disjoint_input_gives_singletons() {
        let boxes: Vec<_> = (0..50).map(|i| bx(i * 10, 0, 0, 5)).collect();
        let clusters = separate(boxes.iter().copied(), |b| *b);
        assert_eq!(clusters.len(), 50);
        assert!(clusters.iter().zip(&boxes).all(|(c, b)| c == &vec![*b]));
    }

    #[test]
    fn identical_geometries_share_a_cluster() {
        let g = Interval::new(0.0, 1.0).unwrap();
        let clusters = separate(["a", "b", "a", "c"], |_| g);
        assert_eq!(clusters, vec![vec!["a", "b", "a", "c"]]);
        let distinct: Vec<HashSet<&str>> =
            ClusterBuilder::new().separate_distinct(["a", "b", "a", "c"], |_| g);
        assert_eq!(distinct.len(), 1);
        assert_eq!(distinct[0].len(), 3);
    }

    #[test]
    fn touching_intervals_connect() {
        let spans = [(0.0, 1.0), (2.0, 3.0), (1.0, 2.0), (3.5, 4.0)];
        let clusters =
            ClusterBuilder::new().separate(spans, |&(a, b)| Interval::new(a, b).unwrap());
        assert_eq!(
            clusters,
            vec![vec![(0.0, 1.0), (2.0, 3.0), (1.0, 2.0)], vec![(3.5, 4.0)]]
        );
    }

    #[test]
    fn matches_brute_force_on_random_boxes() {
        let mut state = 0x9e37_79b9_7f4a_7c15_u64;
        let mut next = |bound: u64| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % bound
        };
        for (round, branching) in [2, 4, 8, 32].into_iter().enumerate() {
            #[allow(clippy::cast_possible_wrap, reason = "test coordinates are small")]
            let boxes: Vec<Aabb3D> = (0..150 + 50 * round)
                .map(|_| {
                    Aabb3D::new(
                        Point3D::new(next(300) as i64, next(300) as i64, next(300) as i64),
                        [1 + next(25), 1 + next(25), 1 + next(25)],
                    )
                    .unwrap()
                })
                .collect();
            let builder = ClusterBuilder::with_branching(branching).unwrap();
            let clusters = builder.separate(0..boxes.len(), |&i| boxes[i]);
            assert_eq!(canonical(clusters), brute_force(&boxes), "branching {branching}");
        }
    }

    #[test]
    fn reuses_caller_index() {
        let spans: Vec<Interval> = [(0.0, 1.0), (4.0, 5.0), (0.9, 4.1), (7.0, 8.0)]
            .into_iter()
            .map(|(a, b)| Interval::new(a, b).unwrap())
            .collect();
        let mut index: SpatialIndex<Interval, usize, FlatVec<Interval>> = SpatialIndex::default();
        index.extend(spans.iter().copied().zip(0..));
        // Entries pointing outside `spans` are skipped.
        index.add(spans[3], 99);

        let groups = ClusterBuilder::new().separate_indexed(&spans, &index);
        assert_eq!(groups, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn caller_index_with_one_side_of_a_pair() {
        let spans = [Interval::new(0.0, 2.0).unwrap(), Interval::new(1.0, 3.0).unwrap()];
        for indexed in 0..spans.len() {
            let mut index: SpatialIndex<Interval, usize> = SpatialIndex::default();
            index.add(spans[indexed], indexed);
            let groups = ClusterBuilder::new().separate_indexed(&spans, &index);
            assert_eq!(groups, vec![vec![0, 1]], "only position {indexed} indexed");
        }
    }

    #[test]
    fn branching_is_validated() {
        assert_eq!(
            ClusterBuilder::with_branching(1).unwrap_err(),
            IndexError::InvalidBranching(1)
        );
        assert!(ClusterBuilder::with_branching(2).is_ok());
    }
}
