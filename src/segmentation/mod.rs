//! Pad segmentation: resolving pads by electronics address, grid indices
//! or position.
//!
//! Every lookup returns either a pad consistent in all three coordinate
//! systems or [`Pad::INVALID`]. Lookups never fail; when the caller asks for
//! it, a miss is additionally reported to a [`DiagnosticSink`].
//!
//! # Example
//!
//! ```
//! use slat_segmentation::mapping::{Connection, ElectronicsAddress, GridIndices, Motif, Slat, Vector2};
//! use slat_segmentation::segmentation::{Segmentation, SlatSegmentation};
//!
//! let connections = (0..4).map(|ch| Connection::new(ch, ch % 2, ch / 2));
//! let motif = Motif::uniform("2x2", 2, 2, Vector2::new(0.5, 0.5), connections).unwrap();
//! let mut builder = Slat::builder("demo", Vector2::new(1.0, 1.0));
//! let id = builder.add_motif(motif);
//! builder.place(id, 10, Vector2::new(0.0, 0.0), GridIndices::new(0, 0));
//! let slat = builder.build().unwrap();
//!
//! let seg = SlatSegmentation::new(&slat);
//! let pad = seg.pad_by_electronics_address(ElectronicsAddress::new(10, 3), true);
//! assert_eq!(pad.grid_indices(), GridIndices::new(1, 1));
//! assert_eq!(seg.pad_by_position(pad.position(), true), pad);
//! ```

pub mod diagnostics;
pub mod iterator;
pub mod slat;

pub use diagnostics::{DiagnosticSink, LookupMiss, RecordingSink, TracingSink};
pub use iterator::SlatPadIterator;
pub use slat::SlatSegmentation;

use std::iter::FusedIterator;

use crate::mapping::{Area, ElectronicsAddress, GridIndices, Pad, Vector2};

/// A restartable, finite sequence of pads.
///
/// After returning `None` once, an iterator keeps returning `None` until
/// [`reset`](Self::reset) starts it over.
pub trait PadIterator: Iterator<Item = Pad> + FusedIterator {
    /// Restarts the traversal from the first pad.
    fn reset(&mut self);
}

/// The lookup capabilities of a segmentation.
///
/// Positions are in the module frame (origin at the module centre).
pub trait Segmentation {
    /// Pad wired to `address`, or [`Pad::INVALID`].
    fn pad_by_electronics_address(&self, address: ElectronicsAddress, warn_on_miss: bool) -> Pad;

    /// Pad at slat-wide `indices`, or [`Pad::INVALID`].
    fn pad_by_grid_indices(&self, indices: GridIndices, warn_on_miss: bool) -> Pad;

    /// Pad containing `position`, or [`Pad::INVALID`].
    ///
    /// The returned pad's position is the pad centre, not the query point.
    fn pad_by_position(&self, position: Vector2, warn_on_miss: bool) -> Pad;

    /// Returns `true` if a pad exists at `indices`. Never reports a miss.
    fn has_pad(&self, indices: GridIndices) -> bool {
        self.pad_by_grid_indices(indices, false).is_valid()
    }

    /// Largest valid row index.
    fn max_grid_index_row(&self) -> i32;

    /// Largest valid column index.
    fn max_grid_index_column(&self) -> i32;

    /// Fresh iterator over the pads overlapping `area`.
    fn create_iterator(&self, area: &Area) -> Box<dyn PadIterator + '_>;
}
