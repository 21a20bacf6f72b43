//! A motif placed inside a slat.

use super::types::{Area, GridIndices, Vector2};

/// Index of a motif in its slat's motif arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotifId(pub(crate) usize);

impl MotifId {
    /// Position of the motif in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One placed instance of a motif, with its own connector id.
///
/// Positions are in the slat frame (origin at the slat's lower-left corner).
/// The corners are stored as placed, so neighbouring placements share their
/// edges exactly.
#[derive(Debug, Clone)]
pub struct MotifPosition {
    pub(crate) connector_id: i32,
    pub(crate) motif: MotifId,
    pub(crate) lower_left: Vector2,
    pub(crate) upper_right: Vector2,
    pub(crate) low_indices: GridIndices,
    pub(crate) high_indices: GridIndices,
}

impl MotifPosition {
    /// Electronics identity of this placement.
    #[must_use]
    pub const fn connector_id(&self) -> i32 {
        self.connector_id
    }

    /// The placed motif.
    #[must_use]
    pub const fn motif(&self) -> MotifId {
        self.motif
    }

    /// Lower-left corner in the slat frame.
    #[must_use]
    pub const fn lower_left(&self) -> Vector2 {
        self.lower_left
    }

    /// Upper-right corner in the slat frame.
    #[must_use]
    pub const fn upper_right(&self) -> Vector2 {
        self.upper_right
    }

    /// Centre of the placement in the slat frame.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        (self.lower_left + self.upper_right) * 0.5
    }

    /// Physical extent in the slat frame.
    #[must_use]
    pub fn area(&self) -> Area {
        Area::new(self.center(), (self.upper_right - self.lower_left) * 0.5)
    }

    /// Slat-wide indices of local pad (0, 0).
    #[must_use]
    pub const fn low_indices(&self) -> GridIndices {
        self.low_indices
    }

    /// Slat-wide indices of the last local pad (inclusive).
    #[must_use]
    pub const fn high_indices(&self) -> GridIndices {
        self.high_indices
    }

    /// Returns `true` if slat-wide `indices` fall inside this placement's
    /// index range.
    #[must_use]
    pub const fn contains_indices(&self, indices: GridIndices) -> bool {
        indices.column >= self.low_indices.column
            && indices.column <= self.high_indices.column
            && indices.row >= self.low_indices.row
            && indices.row <= self.high_indices.row
    }

    /// Returns `true` if `point` (slat frame) lies inside this placement.
    ///
    /// Containment is half-open: the lower and left edges belong to the
    /// placement, the upper and right edges to its neighbours.
    #[must_use]
    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.lower_left.x
            && point.x < self.upper_right.x
            && point.y >= self.lower_left.y
            && point.y < self.upper_right.y
    }

    /// Converts local indices to slat-wide indices.
    #[must_use]
    pub fn global_indices(&self, local: GridIndices) -> GridIndices {
        local + self.low_indices
    }

    /// Converts slat-wide indices to local indices.
    #[must_use]
    pub fn local_indices(&self, global: GridIndices) -> GridIndices {
        global - self.low_indices
    }

    /// Returns `true` if the two placements share more than a `tolerance`
    /// wide strip along both axes.
    pub(crate) fn overlaps(&self, other: &Self, tolerance: f64) -> bool {
        self.lower_left.x < other.upper_right.x - tolerance
            && other.lower_left.x < self.upper_right.x - tolerance
            && self.lower_left.y < other.upper_right.y - tolerance
            && other.lower_left.y < self.upper_right.y - tolerance
    }

    pub(crate) fn index_ranges_overlap(&self, other: &Self) -> bool {
        self.low_indices.column <= other.high_indices.column
            && other.low_indices.column <= self.high_indices.column
            && self.low_indices.row <= other.high_indices.row
            && other.low_indices.row <= self.high_indices.row
    }
}
