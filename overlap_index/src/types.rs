// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and the [`Geometry`] capability trait.

use core::fmt::Debug;
use core::ops::{Add, Sub};

use crate::error::GeometryError;

/// Capability shared by every geometry kind the index can store.
///
/// Implementors are closed under [`union`][Geometry::union], so the R-tree can use the same
/// type for node bounds as for stored entries. Both predicates are closed: shared boundaries
/// count as contact.
pub trait Geometry: Copy + PartialEq + Debug {
    /// Point type accepted by [`contains`][Geometry::contains].
    type Point: Copy + Debug;

    /// Number of axes considered by split and bulk-load heuristics.
    const AXES: usize;

    /// Whether the two geometries share at least one point.
    fn intersects(&self, other: &Self) -> bool;

    /// Whether the point lies inside this geometry (boundary included).
    fn contains(&self, point: Self::Point) -> bool;

    /// The smallest geometry enclosing both.
    fn union(&self, other: &Self) -> Self;

    /// Size metric (volume or length) used by the SAH-like split heuristic.
    ///
    /// Computed in `f64`; it only steers tree shape, never query results.
    fn measure(&self) -> f64;

    /// Center along `axis`, used for ordering during splits and bulk loading.
    fn center(&self, axis: usize) -> f64;
}

/// Integer point in 3D voxel space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point3D {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Z coordinate.
    pub z: i64,
}

impl Point3D {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a point from its coordinates.
    #[inline(always)]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    const fn axis(self, axis: usize) -> i64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }
}

/// Component-wise saturating addition.
impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, i64::saturating_add)
    }
}

/// Component-wise saturating subtraction.
impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, i64::saturating_sub)
    }
}

impl From<(i64, i64, i64)> for Point3D {
    #[inline]
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

/// Axis-aligned box in 3D voxel space.
///
/// Described by a minimum corner and a strictly positive extent per axis. The box covers the
/// voxels `min ..= min + extent - 1` on every axis; both corners are stored inclusively.
///
/// # Examples
///
/// ```
/// use overlap_index::{Aabb3D, Point3D};
///
/// let a = Aabb3D::new(Point3D::new(0, 0, 0), [10, 10, 10]).unwrap();
/// let b = Aabb3D::new(Point3D::new(9, 9, 9), [5, 5, 5]).unwrap();
/// assert!(a.overlaps(&b));
///
/// // Adjacent voxel boxes share no voxel.
/// let c = Aabb3D::new(Point3D::new(10, 0, 0), [5, 5, 5]).unwrap();
/// assert!(!a.overlaps(&c));
///
/// assert!(Aabb3D::new(Point3D::ORIGIN, [0, 1, 1]).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aabb3D {
    min: Point3D,
    max: Point3D,
}

impl Aabb3D {
    /// Create a box from its minimum corner and per-axis extent.
    ///
    /// Fails if any extent is zero or the far corner does not fit in `i64`.
    pub fn new(min: Point3D, extent: [u64; 3]) -> Result<Self, GeometryError> {
        let mut max = [0_i64; 3];
        for (axis, (&len, out)) in extent.iter().zip(max.iter_mut()).enumerate() {
            if len == 0 {
                return Err(GeometryError::ZeroExtent { axis });
            }
            let far = i128::from(min.axis(axis)) + i128::from(len - 1);
            *out = i64::try_from(far).map_err(|_| GeometryError::ExtentOverflow { axis })?;
        }
        Ok(Self {
            min,
            max: Point3D::new(max[0], max[1], max[2]),
        })
    }

    /// Create a box from inclusive minimum and maximum corners.
    pub fn from_corners(min: Point3D, max: Point3D) -> Result<Self, GeometryError> {
        for axis in 0..3 {
            if max.axis(axis) < min.axis(axis) {
                return Err(GeometryError::InvertedCorners { axis });
            }
        }
        Ok(Self { min, max })
    }

    /// Single-voxel box at `point`.
    #[inline]
    pub const fn voxel(point: Point3D) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Minimum (inclusive) corner.
    #[inline]
    pub const fn min(&self) -> Point3D {
        self.min
    }

    /// Maximum (inclusive) corner, `min + extent - 1`.
    #[inline]
    pub const fn max(&self) -> Point3D {
        self.max
    }

    /// Number of voxels spanned along each axis.
    ///
    /// Saturates at `u64::MAX` for a box spanning the whole `i64` range.
    pub fn extent(&self) -> [u64; 3] {
        let span = |axis: usize| {
            let len = i128::from(self.max.axis(axis)) - i128::from(self.min.axis(axis)) + 1;
            u64::try_from(len).unwrap_or(u64::MAX)
        };
        [span(0), span(1), span(2)]
    }

    /// Number of voxels covered, saturating at `u128::MAX`.
    pub fn volume(&self) -> u128 {
        let [x, y, z] = self.extent();
        u128::from(x)
            .saturating_mul(u128::from(y))
            .saturating_mul(u128::from(z))
    }

    /// Whether the voxel at `point` lies inside the box.
    #[inline]
    pub fn contains_point(&self, point: Point3D) -> bool {
        (0..3).all(|a| self.min.axis(a) <= point.axis(a) && point.axis(a) <= self.max.axis(a))
    }

    /// Whether the two boxes share at least one voxel.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|a| {
            self.min.axis(a) <= other.max.axis(a) && other.min.axis(a) <= self.max.axis(a)
        })
    }

    /// The common part of two boxes, if they overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            min: self.min.zip_with(other.min, i64::max),
            max: self.max.zip_with(other.max, i64::min),
        })
    }

    /// The smallest box enclosing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.zip_with(other.min, i64::min),
            max: self.max.zip_with(other.max, i64::max),
        }
    }
}

impl Geometry for Aabb3D {
    type Point = Point3D;

    const AXES: usize = 3;

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        self.overlaps(other)
    }

    #[inline]
    fn contains(&self, point: Point3D) -> bool {
        self.contains_point(point)
    }

    #[inline]
    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "The split metric tolerates rounding of very large extents."
    )]
    fn measure(&self) -> f64 {
        let [x, y, z] = self.extent();
        x as f64 * y as f64 * z as f64
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "Centers only order entries for packing; rounding is harmless."
    )]
    #[inline]
    fn center(&self, axis: usize) -> f64 {
        0.5 * (self.min.axis(axis) as f64 + self.max.axis(axis) as f64)
    }
}

/// Closed 1D interval `[min, max]`.
///
/// # Examples
///
/// ```
/// use overlap_index::Interval;
///
/// let a = Interval::new(0.0, 1.0).unwrap();
/// let b = Interval::new(1.0, 2.0).unwrap();
/// // Touching endpoints overlap.
/// assert!(a.overlaps(&b));
/// assert!(Interval::new(2.0, 1.0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Create an interval. Fails if an endpoint is NaN or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, GeometryError> {
        if min.is_nan() || max.is_nan() {
            return Err(GeometryError::NotANumber);
        }
        if min > max {
            return Err(GeometryError::InvertedInterval { min, max });
        }
        Ok(Self { min, max })
    }

    /// Degenerate interval `[value, value]`.
    pub fn point(value: f64) -> Result<Self, GeometryError> {
        Self::new(value, value)
    }

    /// Lower endpoint.
    #[inline]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper endpoint.
    #[inline]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies in `[min, max]`. NaN is never contained.
    #[inline]
    pub fn contains_value(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether the two intervals share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// The common part of two intervals, if they overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.overlaps(other).then(|| Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// The smallest interval enclosing both.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Geometry for Interval {
    type Point = f64;

    const AXES: usize = 1;

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        self.overlaps(other)
    }

    #[inline]
    fn contains(&self, point: f64) -> bool {
        self.contains_value(point)
    }

    #[inline]
    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    #[inline]
    fn measure(&self) -> f64 {
        self.length()
    }

    #[inline]
    fn center(&self, _axis: usize) -> f64 {
        0.5 * (self.min + self.max)
    }
}
