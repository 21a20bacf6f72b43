//! Motifs: the repeated front-end footprints a slat is assembled from.
//!
//! A motif is a small local pad grid. Each occupied cell carries one
//! electronics channel; cells without a channel are gaps in the footprint.
//! Column widths and row heights may vary, so a cell's size is
//! `(width[column], height[row])`.
//!
//! Local coordinates are relative to the motif centre.

use std::collections::HashMap;

use super::error::{GeometryError, GeometryResult};
use super::types::{Area, GridIndices, Vector2};

/// One channel wired to one local pad cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Channel number within the connector.
    pub channel_id: i32,
    /// Local indices of the pad the channel is wired to.
    pub local: GridIndices,
}

impl Connection {
    /// Creates a new connection.
    #[must_use]
    pub const fn new(channel_id: i32, column: i32, row: i32) -> Self {
        Self {
            channel_id,
            local: GridIndices::new(column, row),
        }
    }
}

/// A motif: local pad grid, pad sizes and channel wiring.
#[derive(Debug, Clone)]
pub struct Motif {
    id: String,
    columns: usize,
    rows: usize,
    /// Cumulative pad edges along x, starting at 0 (`columns + 1` entries).
    x_edges: Vec<f64>,
    /// Cumulative pad edges along y, starting at 0 (`rows + 1` entries).
    y_edges: Vec<f64>,
    /// Channel per cell, row-major.
    channels: Vec<Option<i32>>,
    locals: HashMap<i32, GridIndices>,
}

impl Motif {
    /// Creates a motif whose pads all share the same size.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, the pad size is not positive,
    /// or the connection table is not a bijection onto grid cells.
    pub fn uniform(
        id: impl Into<String>,
        columns: usize,
        rows: usize,
        pad_half_size: Vector2,
        connections: impl IntoIterator<Item = Connection>,
    ) -> GeometryResult<Self> {
        Self::with_pitches(
            id,
            vec![2.0 * pad_half_size.x; columns],
            vec![2.0 * pad_half_size.y; rows],
            connections,
        )
    }

    /// Creates a motif with per-column pad widths and per-row pad heights.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, a width or height is not a
    /// positive finite number, or the connection table is not a bijection
    /// onto grid cells.
    pub fn with_pitches(
        id: impl Into<String>,
        column_widths: Vec<f64>,
        row_heights: Vec<f64>,
        connections: impl IntoIterator<Item = Connection>,
    ) -> GeometryResult<Self> {
        let id = id.into();
        let columns = column_widths.len();
        let rows = row_heights.len();

        if columns == 0 || rows == 0 {
            return Err(GeometryError::invalid_motif(&id, "pad grid is empty"));
        }
        if i32::try_from(columns).is_err() || i32::try_from(rows).is_err() {
            return Err(GeometryError::invalid_motif(&id, "pad grid is too large"));
        }
        let x_edges = cumulative_edges(&id, &column_widths)?;
        let y_edges = cumulative_edges(&id, &row_heights)?;

        let mut motif = Self {
            id,
            columns,
            rows,
            x_edges,
            y_edges,
            channels: vec![None; columns * rows],
            locals: HashMap::new(),
        };

        for connection in connections {
            motif.connect(connection)?;
        }
        if motif.locals.is_empty() {
            return Err(GeometryError::invalid_motif(&motif.id, "no connections"));
        }

        Ok(motif)
    }

    fn connect(&mut self, connection: Connection) -> GeometryResult<()> {
        let Connection { channel_id, local } = connection;
        let cell = self
            .cell(local)
            .filter(|_| channel_id >= 0)
            .ok_or_else(|| GeometryError::ConnectionOutOfRange {
                motif: self.id.clone(),
                channel_id,
                local,
            })?;

        if self.locals.contains_key(&channel_id) {
            return Err(GeometryError::DuplicateChannel {
                motif: self.id.clone(),
                channel_id,
            });
        }
        if self.channels[cell].is_some() {
            return Err(GeometryError::DuplicateCell {
                motif: self.id.clone(),
                local,
            });
        }

        self.channels[cell] = Some(channel_id);
        self.locals.insert(channel_id, local);
        Ok(())
    }

    /// `(column, row)` as array positions, for in-range local indices.
    fn coords(&self, local: GridIndices) -> Option<(usize, usize)> {
        let column = usize::try_from(local.column).ok()?;
        let row = usize::try_from(local.row).ok()?;
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    /// Row-major cell number for in-range local indices.
    fn cell(&self, local: GridIndices) -> Option<usize> {
        self.coords(local).map(|(column, row)| row * self.columns + column)
    }

    /// Motif identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of local columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of local rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of connected pads.
    #[must_use]
    pub fn nof_pads(&self) -> usize {
        self.locals.len()
    }

    /// Half-extents of the whole motif.
    #[must_use]
    pub fn half_size(&self) -> Vector2 {
        self.size() * 0.5
    }

    /// Full extents of the whole motif.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        Vector2::new(self.total_width(), self.total_height())
    }

    fn total_width(&self) -> f64 {
        self.x_edges[self.columns]
    }

    fn total_height(&self) -> f64 {
        self.y_edges[self.rows]
    }

    /// Local indices of the pad wired to `channel_id`.
    #[must_use]
    pub fn local_indices_for_channel(&self, channel_id: i32) -> Option<GridIndices> {
        self.locals.get(&channel_id).copied()
    }

    /// Channel wired to the pad at `local`, if any.
    #[must_use]
    pub fn channel_for_local_indices(&self, local: GridIndices) -> Option<i32> {
        self.cell(local).and_then(|cell| self.channels[cell])
    }

    /// Local indices of the cell containing `point` (relative to the motif
    /// centre), or `None` if the point lies outside the motif.
    ///
    /// The cell is found by binary search over the cumulative pad edges. A
    /// point on the high edge of the motif is attributed to the last cell.
    #[must_use]
    pub fn local_indices_for_point(&self, point: Vector2) -> Option<GridIndices> {
        let offset = point + self.half_size();
        let size = self.size();
        if !(offset.x >= 0.0 && offset.x <= size.x && offset.y >= 0.0 && offset.y <= size.y) {
            return None;
        }
        self.local_indices_at_offset(offset)
    }

    /// Local indices of the cell holding `offset`, measured from the motif's
    /// lower-left corner.
    ///
    /// The offset is clamped onto the motif first: callers have already
    /// decided the point belongs to this motif, and placement edges may sit
    /// a rounding step away from the cumulative pad edges.
    pub(crate) fn local_indices_at_offset(&self, offset: Vector2) -> Option<GridIndices> {
        let column = edge_bin(&self.x_edges, offset.x)?;
        let row = edge_bin(&self.y_edges, offset.y)?;
        Some(GridIndices::new(
            i32::try_from(column).ok()?,
            i32::try_from(row).ok()?,
        ))
    }

    /// Half-size of the cell at `local`.
    #[must_use]
    pub fn pad_half_size(&self, local: GridIndices) -> Option<Vector2> {
        self.pad_area_local(local).map(|area| area.half_size)
    }

    /// Centre of the cell at `local`, relative to the motif centre.
    #[must_use]
    pub fn pad_offset_local(&self, local: GridIndices) -> Option<Vector2> {
        self.pad_area_local(local).map(|area| area.center)
    }

    /// Extent of the cell at `local`, relative to the motif centre.
    #[must_use]
    pub fn pad_area_local(&self, local: GridIndices) -> Option<Area> {
        self.pad_area_from_corner(local)
            .map(|area| area.translate(self.half_size() * -1.0))
    }

    /// Extent of the cell at `local`, relative to the motif's lower-left
    /// corner.
    pub(crate) fn pad_area_from_corner(&self, local: GridIndices) -> Option<Area> {
        let (column, row) = self.coords(local)?;
        let lower_left = Vector2::new(self.x_edges[column], self.y_edges[row]);
        let size = Vector2::new(
            self.x_edges[column + 1] - self.x_edges[column],
            self.y_edges[row + 1] - self.y_edges[row],
        );
        Some(Area::from_corner(lower_left, size))
    }

    /// Range of local columns whose cells overlap `(low, high)` along x,
    /// measured from the lower-left corner.
    pub(crate) fn column_span(&self, low: f64, high: f64) -> std::ops::Range<usize> {
        edge_span(&self.x_edges, low, high)
    }

    /// Range of local rows whose cells overlap `(low, high)` along y,
    /// measured from the lower-left corner.
    pub(crate) fn row_span(&self, low: f64, high: f64) -> std::ops::Range<usize> {
        edge_span(&self.y_edges, low, high)
    }

    /// Iterates over the connections, row by row.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.channels.iter().enumerate().filter_map(move |(cell, channel)| {
            let channel_id = (*channel)?;
            let column = i32::try_from(cell % self.columns).ok()?;
            let row = i32::try_from(cell / self.columns).ok()?;
            Some(Connection::new(channel_id, column, row))
        })
    }
}

fn cumulative_edges(id: &str, sizes: &[f64]) -> GeometryResult<Vec<f64>> {
    let mut edges = Vec::with_capacity(sizes.len() + 1);
    let mut total = 0.0;
    edges.push(total);
    for &size in sizes {
        if !(size.is_finite() && size > 0.0) {
            return Err(GeometryError::invalid_motif(
                id,
                format!("pad size {size} is not positive"),
            ));
        }
        total += size;
        edges.push(total);
    }
    Ok(edges)
}

/// Bin of `edges` holding `value`, clamped onto the first and last bins.
fn edge_bin(edges: &[f64], value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    let bins = edges.len() - 1;
    let bin = edges.partition_point(|&edge| edge <= value).saturating_sub(1);
    Some(bin.min(bins - 1))
}

/// Bins of `edges` overlapping the open interval `(low, high)`.
fn edge_span(edges: &[f64], low: f64, high: f64) -> std::ops::Range<usize> {
    let bins = edges.len() - 1;
    // first bin whose high edge lies above `low`
    let first = edges[1..].partition_point(|&edge| edge <= low);
    // bins whose low edge lies below `high`
    let end = edges[..bins].partition_point(|&edge| edge < high);
    first..end.max(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Motif {
        let connections = (0..4).map(|channel| Connection::new(channel, channel % 2, channel / 2));
        Motif::uniform("2x2", 2, 2, Vector2::new(0.5, 0.5), connections).unwrap()
    }

    fn staggered() -> Motif {
        // Two short rows below one tall row, widths 1, 2, 1.
        let connections = [
            Connection::new(0, 0, 0),
            Connection::new(1, 1, 0),
            Connection::new(2, 2, 0),
            Connection::new(5, 0, 2),
            Connection::new(6, 2, 2),
        ];
        Motif::with_pitches("stag", vec![1.0, 2.0, 1.0], vec![0.5, 0.5, 2.0], connections).unwrap()
    }

    #[test]
    fn channel_table_is_bijective() {
        let motif = two_by_two();
        for connection in motif.connections() {
            assert_eq!(
                motif.local_indices_for_channel(connection.channel_id),
                Some(connection.local)
            );
            assert_eq!(
                motif.channel_for_local_indices(connection.local),
                Some(connection.channel_id)
            );
        }
        assert_eq!(motif.nof_pads(), 4);
        assert_eq!(motif.connections().count(), 4);
    }

    #[test]
    fn unoccupied_cell_has_no_connection() {
        let motif = staggered();
        assert_eq!(motif.channel_for_local_indices(GridIndices::new(1, 2)), None);
        assert_eq!(motif.channel_for_local_indices(GridIndices::new(0, 1)), None);
        assert_eq!(motif.channel_for_local_indices(GridIndices::new(3, 0)), None);
        assert_eq!(motif.channel_for_local_indices(GridIndices::new(-1, 0)), None);
        assert_eq!(motif.local_indices_for_channel(3), None);
    }

    #[test]
    fn uniform_pad_geometry() {
        let motif = two_by_two();
        assert_eq!(motif.half_size(), Vector2::new(1.0, 1.0));
        assert_eq!(
            motif.pad_offset_local(GridIndices::new(1, 1)),
            Some(Vector2::new(0.5, 0.5))
        );
        assert_eq!(
            motif.pad_half_size(GridIndices::new(0, 1)),
            Some(Vector2::new(0.5, 0.5))
        );
        assert_eq!(motif.pad_offset_local(GridIndices::new(2, 0)), None);
    }

    #[test]
    fn point_lookup_uniform() {
        let motif = two_by_two();
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(-0.5, -0.5)),
            Some(GridIndices::new(0, 0))
        );
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(0.0, 0.0)),
            Some(GridIndices::new(1, 1))
        );
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(1.0, 1.0)),
            Some(GridIndices::new(1, 1))
        );
        assert_eq!(motif.local_indices_for_point(Vector2::new(1.01, 0.0)), None);
        assert_eq!(motif.local_indices_for_point(Vector2::new(0.0, -1.01)), None);
    }

    #[test]
    fn point_lookup_follows_row_heights() {
        let motif = staggered();
        // Motif is 4 x 3, centred: x in [-2, 2), y in [-1.5, 1.5).
        assert_eq!(motif.half_size(), Vector2::new(2.0, 1.5));
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(-1.9, -1.4)),
            Some(GridIndices::new(0, 0))
        );
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(0.9, -0.6)),
            Some(GridIndices::new(1, 1))
        );
        assert_eq!(
            motif.local_indices_for_point(Vector2::new(1.5, 0.0)),
            Some(GridIndices::new(2, 2))
        );
    }

    #[test]
    fn non_uniform_pad_geometry() {
        let motif = staggered();
        let tall = motif.pad_area_local(GridIndices::new(2, 2)).unwrap();
        assert_eq!(tall.center, Vector2::new(1.5, 0.5));
        assert_eq!(tall.half_size, Vector2::new(0.5, 1.0));

        let wide = motif.pad_area_local(GridIndices::new(1, 0)).unwrap();
        assert_eq!(wide.center, Vector2::new(0.0, -1.25));
        assert_eq!(wide.half_size, Vector2::new(1.0, 0.25));
    }

    #[test]
    fn spans_select_overlapping_cells() {
        let motif = staggered();
        assert_eq!(motif.column_span(0.0, 4.0), 0..3);
        assert_eq!(motif.column_span(1.0, 3.0), 1..2);
        assert_eq!(motif.column_span(0.5, 1.5), 0..2);
        assert_eq!(motif.row_span(0.0, 0.5), 0..1);
        assert_eq!(motif.row_span(4.5, 5.5), 3..3);
        assert!(motif.row_span(-3.5, -2.5).is_empty());
    }

    #[test]
    fn offset_lookup_clamps_onto_motif() {
        let motif = staggered();
        assert_eq!(motif.size(), Vector2::new(4.0, 3.0));
        assert_eq!(
            motif.local_indices_at_offset(Vector2::new(4.0 + 1e-12, 3.0 + 1e-12)),
            Some(GridIndices::new(2, 2))
        );
        assert_eq!(
            motif.local_indices_at_offset(Vector2::new(-1e-12, 0.0)),
            Some(GridIndices::new(0, 0))
        );
        assert_eq!(motif.local_indices_at_offset(Vector2::new(f64::NAN, 0.0)), None);

        let corner = motif.pad_area_from_corner(GridIndices::new(1, 0)).unwrap();
        assert_eq!(corner.center, Vector2::new(2.0, 0.25));
    }

    #[test]
    fn offset_lookup_with_fine_pitches() {
        let connections = (0..12).map(|ch| Connection::new(ch, ch % 3, ch / 3));
        let motif = Motif::with_pitches("fine", vec![0.63; 3], vec![0.714; 4], connections).unwrap();
        for connection in motif.connections() {
            let cell = motif.pad_area_from_corner(connection.local).unwrap();
            assert_eq!(motif.local_indices_at_offset(cell.center), Some(connection.local));
            let centred = motif.pad_area_local(connection.local).unwrap();
            assert_eq!(motif.local_indices_for_point(centred.center), Some(connection.local));
        }
        assert_eq!(
            motif.local_indices_at_offset(Vector2::new(3.0 * 0.63, 4.0 * 0.714)),
            Some(GridIndices::new(2, 3))
        );
    }

    #[test]
    fn reject_duplicate_channel() {
        let connections = [Connection::new(1, 0, 0), Connection::new(1, 1, 0)];
        let err = Motif::uniform("dup", 2, 1, Vector2::new(0.5, 0.5), connections).unwrap_err();
        assert!(matches!(err, GeometryError::DuplicateChannel { channel_id: 1, .. }));
    }

    #[test]
    fn reject_duplicate_cell() {
        let connections = [Connection::new(1, 0, 0), Connection::new(2, 0, 0)];
        let err = Motif::uniform("dup", 2, 1, Vector2::new(0.5, 0.5), connections).unwrap_err();
        assert!(matches!(err, GeometryError::DuplicateCell { .. }));
    }

    #[test]
    fn reject_out_of_range_connection() {
        let connections = [Connection::new(1, 2, 0)];
        let err = Motif::uniform("oor", 2, 1, Vector2::new(0.5, 0.5), connections).unwrap_err();
        assert!(matches!(err, GeometryError::ConnectionOutOfRange { .. }));
    }

    #[test]
    fn reject_degenerate_grid() {
        assert!(Motif::uniform("empty", 0, 2, Vector2::new(0.5, 0.5), []).is_err());
        assert!(Motif::uniform("flat", 1, 1, Vector2::new(0.0, 0.5), [Connection::new(0, 0, 0)]).is_err());
        assert!(Motif::uniform("bare", 1, 1, Vector2::new(0.5, 0.5), []).is_err());
    }
}
