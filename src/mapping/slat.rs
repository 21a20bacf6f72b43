//! Slats: rectangular modules tiled by motif placements.
//!
//! A [`Slat`] owns its motifs (an arena addressed by [`MotifId`]) and its
//! motif positions (keyed by connector id, kept in placement order). It is
//! assembled once through [`SlatBuilder`], which checks the construction
//! invariants, and is read-only afterwards.
//!
//! Two frames are used:
//!
//! - the **slat frame**, origin at the lower-left corner, in which motif
//!   positions are stored;
//! - the **module frame**, origin at the slat centre, in which pads are
//!   reported.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use super::error::{GeometryError, GeometryResult};
use super::motif::Motif;
use super::motif_position::{MotifId, MotifPosition};
use super::types::{Area, GridIndices, Vector2};

/// Relative tolerance used when comparing placement edges.
const TILING_TOLERANCE: f64 = 1e-9;

/// A rectangular detector module made of motif placements.
#[derive(Debug, Clone)]
pub struct Slat {
    id: String,
    half_size: Vector2,
    motifs: Vec<Motif>,
    positions: IndexMap<i32, MotifPosition>,
    nof_pads_x: i32,
    max_nof_pads_y: i32,
}

impl Slat {
    /// Starts building a slat with the given half-extents.
    #[must_use]
    pub fn builder(id: impl Into<String>, half_size: Vector2) -> SlatBuilder {
        SlatBuilder::new(id, half_size)
    }

    /// Slat identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Half-extents of the slat.
    #[must_use]
    pub const fn half_size(&self) -> Vector2 {
        self.half_size
    }

    /// Physical extent of the slat in the module frame.
    #[must_use]
    pub const fn area(&self) -> Area {
        Area::new(Vector2::ZERO, self.half_size)
    }

    /// Number of pad columns.
    #[must_use]
    pub const fn nof_pads_x(&self) -> i32 {
        self.nof_pads_x
    }

    /// Number of pad rows in the tallest part of the slat.
    #[must_use]
    pub const fn max_nof_pads_y(&self) -> i32 {
        self.max_nof_pads_y
    }

    /// Number of connected pads.
    #[must_use]
    pub fn nof_pads(&self) -> usize {
        self.positions
            .values()
            .map(|mp| self.motif(mp.motif).nof_pads())
            .sum()
    }

    /// The motif with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this slat.
    #[must_use]
    pub fn motif(&self, id: MotifId) -> &Motif {
        &self.motifs[id.0]
    }

    /// Motif positions, in placement order.
    pub fn motif_positions(&self) -> impl ExactSizeIterator<Item = &MotifPosition> + '_ {
        self.positions.values()
    }

    /// Motif position at `index` in placement order.
    #[must_use]
    pub fn motif_position_at(&self, index: usize) -> Option<&MotifPosition> {
        self.positions.get_index(index).map(|(_, mp)| mp)
    }

    /// Motif position with the given connector id.
    #[must_use]
    pub fn find_motif_position_by_connector(&self, connector_id: i32) -> Option<&MotifPosition> {
        self.positions.get(&connector_id)
    }

    /// Motif position whose index range holds `indices`.
    #[must_use]
    pub fn find_motif_position_by_indices(&self, indices: GridIndices) -> Option<&MotifPosition> {
        if !indices.is_valid() {
            return None;
        }
        self.positions
            .values()
            .find(|mp| mp.contains_indices(indices))
    }

    /// Motif position containing `point`, given in the slat frame.
    #[must_use]
    pub fn find_motif_position_by_point(&self, point: Vector2) -> Option<&MotifPosition> {
        self.positions.values().find(|mp| mp.contains_point(point))
    }

    /// Converts a module-frame point to the slat frame.
    #[must_use]
    pub fn to_slat_frame(&self, point: Vector2) -> Vector2 {
        point + self.half_size
    }

    /// Converts a slat-frame point to the module frame.
    #[must_use]
    pub fn to_module_frame(&self, point: Vector2) -> Vector2 {
        point - self.half_size
    }
}

/// A placement request, resolved when the slat is built.
#[derive(Debug, Clone, Copy)]
struct Placement {
    motif: MotifId,
    connector_id: i32,
    lower_left: Vector2,
    low_indices: GridIndices,
}

/// Builder for [`Slat`].
///
/// ```
/// use slat_segmentation::mapping::{Connection, GridIndices, Motif, Slat, Vector2};
///
/// let connections = (0..4).map(|ch| Connection::new(ch, ch % 2, ch / 2));
/// let motif = Motif::uniform("2x2", 2, 2, Vector2::new(0.5, 0.5), connections).unwrap();
///
/// let mut builder = Slat::builder("demo", Vector2::new(2.0, 1.0));
/// let id = builder.add_motif(motif);
/// builder
///     .place(id, 10, Vector2::new(0.0, 0.0), GridIndices::new(0, 0))
///     .place(id, 20, Vector2::new(2.0, 0.0), GridIndices::new(2, 0));
/// let slat = builder.build().unwrap();
///
/// assert_eq!(slat.nof_pads_x(), 4);
/// assert_eq!(slat.nof_pads(), 8);
/// ```
#[derive(Debug)]
pub struct SlatBuilder {
    id: String,
    half_size: Vector2,
    motifs: Vec<Motif>,
    placements: Vec<Placement>,
}

impl SlatBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(id: impl Into<String>, half_size: Vector2) -> Self {
        Self {
            id: id.into(),
            half_size,
            motifs: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Adds a motif to the arena and returns its id.
    pub fn add_motif(&mut self, motif: Motif) -> MotifId {
        self.motifs.push(motif);
        MotifId(self.motifs.len() - 1)
    }

    /// Places a motif with its lower-left corner at `lower_left` (slat frame)
    /// and its local pad (0, 0) at slat-wide `low_indices`.
    pub fn place(
        &mut self,
        motif: MotifId,
        connector_id: i32,
        lower_left: Vector2,
        low_indices: GridIndices,
    ) -> &mut Self {
        self.placements.push(Placement {
            motif,
            connector_id,
            lower_left,
            low_indices,
        });
        self
    }

    /// Validates the placements and builds the slat.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the slat size is not positive or there are no placements
    /// - a placement refers to an unknown motif
    /// - a connector id or low index is negative
    /// - two placements share a connector id
    /// - a placement leaves the slat rectangle
    /// - two placements overlap physically or in index space
    /// - the placements do not cover the whole slat
    pub fn build(self) -> GeometryResult<Slat> {
        let Self {
            id,
            half_size,
            motifs,
            placements,
        } = self;

        if !(half_size.x > 0.0 && half_size.y > 0.0 && half_size.x.is_finite() && half_size.y.is_finite()) {
            return Err(GeometryError::invalid_slat(&id, "size must be positive"));
        }
        if placements.is_empty() {
            return Err(GeometryError::invalid_slat(&id, "no motif positions"));
        }

        let size = half_size * 2.0;
        let tolerance = TILING_TOLERANCE * size.x.max(size.y);
        let mut resolved = placements
            .iter()
            .map(|placement| resolve_placement(&motifs, placement))
            .collect::<GeometryResult<Vec<_>>>()?;
        snap_edges(&mut resolved, size, tolerance);

        let mut positions: IndexMap<i32, MotifPosition> = IndexMap::with_capacity(resolved.len());
        for mp in resolved {
            if mp.lower_left.x < -tolerance
                || mp.lower_left.y < -tolerance
                || mp.upper_right.x > size.x + tolerance
                || mp.upper_right.y > size.y + tolerance
            {
                return Err(GeometryError::invalid_placement(
                    mp.connector_id,
                    "placement extends beyond the slat",
                ));
            }

            for other in positions.values() {
                if other.overlaps(&mp, tolerance) {
                    return Err(overlap(&id, other, &mp, "position"));
                }
                if other.index_ranges_overlap(&mp) {
                    return Err(overlap(&id, other, &mp, "indices"));
                }
            }

            match positions.entry(mp.connector_id) {
                Entry::Occupied(_) => {
                    return Err(GeometryError::DuplicateConnector {
                        slat: id,
                        connector_id: mp.connector_id,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(mp);
                }
            }
        }

        let covered: f64 = positions.values().map(|mp| mp.area().surface()).sum();
        let expected = size.x * size.y;
        if (covered - expected).abs() > TILING_TOLERANCE * expected {
            return Err(GeometryError::IncompleteTiling {
                slat: id,
                covered,
                expected,
            });
        }

        let nof_pads_x = positions
            .values()
            .map(|mp| mp.high_indices.column + 1)
            .max()
            .unwrap_or(0);
        let max_nof_pads_y = positions
            .values()
            .map(|mp| mp.high_indices.row + 1)
            .max()
            .unwrap_or(0);

        debug!(
            slat = %id,
            motifs = motifs.len(),
            motif_positions = positions.len(),
            nof_pads_x,
            max_nof_pads_y,
            "Slat built"
        );

        Ok(Slat {
            id,
            half_size,
            motifs,
            positions,
            nof_pads_x,
            max_nof_pads_y,
        })
    }
}

fn resolve_placement(motifs: &[Motif], placement: &Placement) -> GeometryResult<MotifPosition> {
    let motif = motifs
        .get(placement.motif.0)
        .ok_or(GeometryError::UnknownMotif {
            id: placement.motif.0,
        })?;

    if placement.connector_id < 0 {
        return Err(GeometryError::invalid_placement(
            placement.connector_id,
            "connector id must not be negative",
        ));
    }
    if !placement.low_indices.is_valid() {
        return Err(GeometryError::invalid_placement(
            placement.connector_id,
            format!("low indices {} must not be negative", placement.low_indices),
        ));
    }

    // Motif grids are checked to fit in i32 when the motif is built.
    let extent = GridIndices::new(
        i32::try_from(motif.columns()).unwrap_or(i32::MAX) - 1,
        i32::try_from(motif.rows()).unwrap_or(i32::MAX) - 1,
    );
    let high_indices = GridIndices::new(
        placement.low_indices.column.checked_add(extent.column).ok_or_else(|| {
            GeometryError::invalid_placement(placement.connector_id, "column index overflow")
        })?,
        placement.low_indices.row.checked_add(extent.row).ok_or_else(|| {
            GeometryError::invalid_placement(placement.connector_id, "row index overflow")
        })?,
    );

    if !(placement.lower_left.x.is_finite() && placement.lower_left.y.is_finite()) {
        return Err(GeometryError::invalid_placement(
            placement.connector_id,
            "lower-left corner must be finite",
        ));
    }

    Ok(MotifPosition {
        connector_id: placement.connector_id,
        motif: placement.motif,
        lower_left: placement.lower_left,
        upper_right: placement.lower_left + motif.size(),
        low_indices: placement.low_indices,
        high_indices,
    })
}

/// Moves every placement edge lying within `tolerance` of another
/// placement's lower-left edge, or of the slat boundary, onto that edge.
///
/// Upper-right corners are sums of pad pitches and rarely land exactly on
/// the neighbour's corner; after snapping, adjacent placements share their
/// edges bit for bit and half-open containment leaves no sliver between them.
fn snap_edges(placed: &mut [MotifPosition], size: Vector2, tolerance: f64) {
    let xs: Vec<f64> = placed
        .iter()
        .map(|mp| mp.lower_left.x)
        .chain([0.0, size.x])
        .collect();
    let ys: Vec<f64> = placed
        .iter()
        .map(|mp| mp.lower_left.y)
        .chain([0.0, size.y])
        .collect();

    for mp in placed {
        mp.lower_left.x = snap(mp.lower_left.x, &xs, tolerance);
        mp.lower_left.y = snap(mp.lower_left.y, &ys, tolerance);
        mp.upper_right.x = snap(mp.upper_right.x, &xs, tolerance);
        mp.upper_right.y = snap(mp.upper_right.y, &ys, tolerance);
    }
}

fn snap(value: f64, edges: &[f64], tolerance: f64) -> f64 {
    edges
        .iter()
        .copied()
        .filter(|edge| (edge - value).abs() <= tolerance)
        .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
        .unwrap_or(value)
}

fn overlap(slat: &str, first: &MotifPosition, second: &MotifPosition, what: &'static str) -> GeometryError {
    GeometryError::Overlap {
        slat: slat.to_string(),
        first: first.connector_id,
        second: second.connector_id,
        what,
    }
}
