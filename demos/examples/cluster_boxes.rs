// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index detected objects by bounding box, query them, then merge overlapping detections.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p overlap_demos --example cluster_boxes`

use overlap_cluster::ClusterBuilder;
use overlap_index::{Aabb3D, BoxIndex, GeometryError, Point3D};

/// A detected object: an id plus its voxel bounding box.
#[derive(Clone, Copy, Debug)]
struct Detection {
    id: u32,
    bounds: Aabb3D,
}

fn detection(id: u32, min: (i64, i64, i64), extent: u64) -> Result<Detection, GeometryError> {
    Ok(Detection {
        id,
        bounds: Aabb3D::new(min.into(), [extent; 3])?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut detections = Vec::new();
    // A chain of touching nuclei, each overlapping the next.
    for i in 0..12 {
        detections.push(detection(i, (3 * i64::from(i), 0, 0), 5)?);
    }
    // A separate pair far away.
    detections.push(detection(100, (500, 500, 40), 8)?);
    detections.push(detection(101, (504, 503, 44), 8)?);
    // An isolated speck.
    let speck = detection(200, (-300, 20, 7), 1)?;
    detections.push(speck);

    let mut index: BoxIndex<u32> = BoxIndex::new(8)?;
    for d in &detections {
        index.add(d.bounds, d.id);
    }
    log::info!("indexed {} detections", index.len());

    let point = Point3D::new(7, 2, 2);
    let mut at_point: Vec<_> = index.contains(point).into_iter().collect();
    at_point.sort_unstable();
    println!("detections covering {point:?}: {at_point:?}");

    let roi = Aabb3D::new(Point3D::new(495, 495, 35), [10, 10, 10])?;
    let mut in_roi: Vec<_> = index.intersects_with(&roi).into_iter().collect();
    in_roi.sort_unstable();
    println!("detections touching the region of interest: {in_roi:?}");

    // Drop the speck as noise.
    index.remove(&speck.bounds, &speck.id);
    println!("{} detections remain indexed", index.len());

    let clusters = ClusterBuilder::with_branching(8)?.separate(detections, |d| d.bounds);
    for (n, cluster) in clusters.iter().enumerate() {
        let ids: Vec<u32> = cluster.iter().map(|d| d.id).collect();
        println!("cluster {n}: {ids:?}");
    }
    Ok(())
}
