//! Iteration over the pads of a slat intersecting an area.

use std::iter::FusedIterator;
use std::ops::Range;

use super::slat::assemble_pad;
use super::PadIterator;
use crate::mapping::{Area, GridIndices, MotifPosition, Pad, Slat};

/// Pads of a slat whose extent overlaps an area.
///
/// Motif positions are visited in placement order; within each, cells are
/// visited row by row. Unconnected cells are skipped. Once exhausted the
/// iterator keeps returning `None` until [`PadIterator::reset`] is called.
#[derive(Debug, Clone)]
pub struct SlatPadIterator<'a> {
    slat: &'a Slat,
    area: Area,
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    Created,
    Active {
        /// Index of the current motif position in placement order.
        position: usize,
        /// Cells of the current motif position still to visit.
        window: Option<Window>,
    },
    Exhausted,
}

/// Row-major walk over a rectangle of local cells.
#[derive(Debug, Clone)]
struct Window {
    columns: Range<usize>,
    rows: Range<usize>,
    column: usize,
    row: usize,
}

impl Window {
    fn new(columns: Range<usize>, rows: Range<usize>) -> Option<Self> {
        if columns.is_empty() || rows.is_empty() {
            return None;
        }
        Some(Self {
            column: columns.start,
            row: rows.start,
            columns,
            rows,
        })
    }

    fn advance(&mut self) -> Option<GridIndices> {
        if self.row >= self.rows.end {
            return None;
        }
        let current = GridIndices::new(
            i32::try_from(self.column).ok()?,
            i32::try_from(self.row).ok()?,
        );
        self.column += 1;
        if self.column >= self.columns.end {
            self.column = self.columns.start;
            self.row += 1;
        }
        Some(current)
    }
}

impl<'a> SlatPadIterator<'a> {
    /// Creates an iterator over the pads of `slat` overlapping `area`
    /// (module frame).
    #[must_use]
    pub const fn new(slat: &'a Slat, area: Area) -> Self {
        Self {
            slat,
            area,
            state: State::Created,
        }
    }

    /// The queried area.
    #[must_use]
    pub const fn area(&self) -> Area {
        self.area
    }

    /// Returns `true` once the iterator has returned `None`.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }
}

/// Cells of `mp` that may overlap `area` (module frame).
fn window_for(slat: &Slat, area: &Area, mp: &MotifPosition) -> Option<Window> {
    let query = Area::new(slat.to_slat_frame(area.center), area.half_size);
    if !mp.area().overlaps(&query) {
        return None;
    }
    let motif = slat.motif(mp.motif());
    let origin = mp.lower_left();
    Window::new(
        motif.column_span(query.left() - origin.x, query.right() - origin.x),
        motif.row_span(query.bottom() - origin.y, query.top() - origin.y),
    )
}

impl Iterator for SlatPadIterator<'_> {
    type Item = Pad;

    fn next(&mut self) -> Option<Pad> {
        let slat = self.slat;
        let area = self.area;
        loop {
            match &mut self.state {
                State::Exhausted => return None,
                State::Created => {
                    self.state = State::Active {
                        position: 0,
                        window: None,
                    };
                }
                State::Active { position, window } => {
                    let Some(mp) = slat.motif_position_at(*position) else {
                        self.state = State::Exhausted;
                        return None;
                    };

                    if window.is_none() {
                        *window = window_for(slat, &area, mp);
                        if window.is_none() {
                            *position += 1;
                            continue;
                        }
                    }

                    let Some(local) = window.as_mut().and_then(Window::advance) else {
                        *window = None;
                        *position += 1;
                        continue;
                    };

                    let motif = slat.motif(mp.motif());
                    if let Some(channel_id) = motif.channel_for_local_indices(local) {
                        let pad = assemble_pad(slat, mp, local, channel_id);
                        if pad.is_valid() && pad.area().overlaps(&area) {
                            return Some(pad);
                        }
                    }
                }
            }
        }
    }
}

impl FusedIterator for SlatPadIterator<'_> {}

impl PadIterator for SlatPadIterator<'_> {
    fn reset(&mut self) {
        self.state = State::Created;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Connection, Motif, Vector2};

    /// One 3x2 motif with the middle bottom cell unconnected.
    fn holed_slat() -> Slat {
        let connections = [
            Connection::new(0, 0, 0),
            Connection::new(2, 2, 0),
            Connection::new(3, 0, 1),
            Connection::new(4, 1, 1),
            Connection::new(5, 2, 1),
        ];
        let motif = Motif::uniform("holed", 3, 2, Vector2::new(0.5, 0.5), connections).unwrap();
        let mut builder = Slat::builder("holed", Vector2::new(1.5, 1.0));
        let id = builder.add_motif(motif);
        builder.place(id, 7, Vector2::ZERO, GridIndices::new(0, 0));
        builder.build().unwrap()
    }

    #[test]
    fn walks_rows_and_skips_gaps() {
        let slat = holed_slat();
        let channels: Vec<i32> = SlatPadIterator::new(&slat, slat.area())
            .map(|pad| pad.electronics_address().channel_id)
            .collect();
        assert_eq!(channels, vec![0, 2, 3, 4, 5]);
    }

    #[test]
    fn restricts_to_area() {
        let slat = holed_slat();
        // Covers the right column only: x in (0.6, 1.4).
        let area = Area::new(Vector2::new(1.0, 0.0), Vector2::new(0.4, 1.0));
        let indices: Vec<GridIndices> = SlatPadIterator::new(&slat, area)
            .map(|pad| pad.grid_indices())
            .collect();
        assert_eq!(indices, vec![GridIndices::new(2, 0), GridIndices::new(2, 1)]);
    }

    #[test]
    fn area_outside_slat_yields_nothing() {
        let slat = holed_slat();
        let area = Area::new(Vector2::new(10.0, 10.0), Vector2::new(1.0, 1.0));
        let mut iter = SlatPadIterator::new(&slat, area);
        assert_eq!(iter.next(), None);
        assert!(iter.is_exhausted());
    }

    #[test]
    fn exhaustion_is_idempotent_and_reset_restarts() {
        let slat = holed_slat();
        let mut iter = SlatPadIterator::new(&slat, slat.area());
        let first: Vec<Pad> = iter.by_ref().collect();
        assert_eq!(first.len(), 5);
        assert!(iter.is_exhausted());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        iter.reset();
        assert!(!iter.is_exhausted());
        let second: Vec<Pad> = iter.collect();
        assert_eq!(first, second);
    }
}
