//! Small value types shared by the geometry and the segmentation engine.
//!
//! Positions are in millimetres. Grid indices are `(column, row)`, with the
//! column running along x and the row along y.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// Integer indices of a pad on a pad grid.
///
/// Used both for motif-local indices and for slat-wide indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct GridIndices {
    /// Index along x.
    pub column: i32,
    /// Index along y.
    pub row: i32,
}

impl GridIndices {
    /// Marker carried by [`crate::mapping::Pad::INVALID`].
    pub const INVALID: Self = Self::new(-1, -1);

    /// Creates a new index pair.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns `true` if both indices are non-negative.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.column >= 0 && self.row >= 0
    }
}

impl Add for GridIndices {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.column + rhs.column, self.row + rhs.row)
    }
}

impl Sub for GridIndices {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.column - rhs.column, self.row - rhs.row)
    }
}

impl fmt::Display for GridIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

/// Front-end electronics identity of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElectronicsAddress {
    /// Identity of the motif placement (front-end board).
    pub connector_id: i32,
    /// Channel within the connector.
    pub channel_id: i32,
}

impl ElectronicsAddress {
    /// Marker carried by [`crate::mapping::Pad::INVALID`].
    pub const INVALID: Self = Self::new(-1, -1);

    /// Creates a new electronics address.
    #[must_use]
    pub const fn new(connector_id: i32, channel_id: i32) -> Self {
        Self {
            connector_id,
            channel_id,
        }
    }
}

impl fmt::Display for ElectronicsAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.connector_id, self.channel_id)
    }
}

/// A 2D vector or point (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Vector2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:e},{:e})", self.x, self.y)
    }
}

/// An axis-aligned rectangle described by its centre and half-size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Area {
    /// Centre of the rectangle.
    pub center: Vector2,
    /// Half-extents along x and y.
    pub half_size: Vector2,
}

impl Area {
    /// Creates a new area.
    #[must_use]
    pub const fn new(center: Vector2, half_size: Vector2) -> Self {
        Self { center, half_size }
    }

    /// Creates an area from its lower-left corner and full size.
    #[must_use]
    pub fn from_corner(lower_left: Vector2, size: Vector2) -> Self {
        let half_size = size * 0.5;
        Self::new(lower_left + half_size, half_size)
    }

    /// Minimum x.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.center.x - self.half_size.x
    }

    /// Maximum x.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.center.x + self.half_size.x
    }

    /// Minimum y.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_size.y
    }

    /// Maximum y.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.y + self.half_size.y
    }

    /// Surface of the rectangle.
    #[must_use]
    pub fn surface(&self) -> f64 {
        4.0 * self.half_size.x * self.half_size.y
    }

    /// Returns the area shifted by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vector2) -> Self {
        Self::new(self.center + offset, self.half_size)
    }

    /// Half-open containment test: the low edges belong to the area, the
    /// high edges do not.
    ///
    /// Neighbouring areas sharing an edge therefore never both contain a
    /// point lying on it.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.bottom()
            && point.y < self.top()
    }

    /// Returns `true` if the two areas share a region of non-zero surface.
    ///
    /// Areas that only touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_indices_arithmetic() {
        let a = GridIndices::new(3, 5);
        let b = GridIndices::new(1, 2);
        assert_eq!(a + b, GridIndices::new(4, 7));
        assert_eq!(a - b, GridIndices::new(2, 3));
        assert!(!(b - a).is_valid());
    }

    #[test]
    fn area_edges() {
        let area = Area::from_corner(Vector2::new(1.0, 2.0), Vector2::new(4.0, 2.0));
        assert!((area.left() - 1.0).abs() < f64::EPSILON);
        assert!((area.right() - 5.0).abs() < f64::EPSILON);
        assert!((area.bottom() - 2.0).abs() < f64::EPSILON);
        assert!((area.top() - 4.0).abs() < f64::EPSILON);
        assert!((area.surface() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn area_contains_is_half_open() {
        let area = Area::from_corner(Vector2::ZERO, Vector2::new(2.0, 2.0));
        assert!(area.contains(Vector2::new(0.0, 0.0)));
        assert!(area.contains(Vector2::new(1.0, 1.0)));
        assert!(!area.contains(Vector2::new(2.0, 1.0)));
        assert!(!area.contains(Vector2::new(1.0, 2.0)));
        assert!(!area.contains(Vector2::new(-0.1, 1.0)));
    }

    #[test]
    fn touching_areas_do_not_overlap() {
        let a = Area::from_corner(Vector2::ZERO, Vector2::new(2.0, 2.0));
        let b = Area::from_corner(Vector2::new(2.0, 0.0), Vector2::new(2.0, 2.0));
        let c = Area::from_corner(Vector2::new(1.5, 0.5), Vector2::new(2.0, 1.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }
}
