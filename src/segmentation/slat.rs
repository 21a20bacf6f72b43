//! Segmentation of a single slat.

use tracing::debug;

use super::diagnostics::{DiagnosticSink, LookupMiss, TracingSink};
use super::iterator::SlatPadIterator;
use super::{PadIterator, Segmentation};
use crate::mapping::{
    Area, ElectronicsAddress, GridIndices, MotifPosition, Pad, Slat, Vector2,
};

/// Pad lookups over a borrowed [`Slat`].
///
/// The engine holds no mutable state: any number of engines and iterators
/// may read the same slat concurrently.
#[derive(Debug, Clone)]
pub struct SlatSegmentation<'a, S = TracingSink> {
    slat: &'a Slat,
    sink: S,
}

impl<'a> SlatSegmentation<'a> {
    /// Creates an engine reporting misses through `tracing`.
    #[must_use]
    pub fn new(slat: &'a Slat) -> Self {
        Self::with_sink(slat, TracingSink)
    }
}

impl<'a, S: DiagnosticSink> SlatSegmentation<'a, S> {
    /// Creates an engine reporting misses to `sink`.
    #[must_use]
    pub fn with_sink(slat: &'a Slat, sink: S) -> Self {
        debug!(slat = slat.id(), "Slat segmentation created");
        Self { slat, sink }
    }

    /// The segmented slat.
    #[must_use]
    pub const fn slat(&self) -> &'a Slat {
        self.slat
    }

    /// Concrete pad iterator over `area` (module frame).
    #[must_use]
    pub fn iter_area(&self, area: Area) -> SlatPadIterator<'a> {
        SlatPadIterator::new(self.slat, area)
    }

    fn miss(&self, warn_on_miss: bool, miss: impl FnOnce() -> LookupMiss) -> Pad {
        if warn_on_miss {
            self.sink.report(self.slat.id(), &miss());
        }
        Pad::INVALID
    }
}

impl<S: DiagnosticSink> Segmentation for SlatSegmentation<'_, S> {
    fn pad_by_electronics_address(&self, address: ElectronicsAddress, warn_on_miss: bool) -> Pad {
        let connector_id = address.connector_id;
        let Some(mp) = self.slat.find_motif_position_by_connector(connector_id) else {
            return self.miss(warn_on_miss, || LookupMiss::UnknownConnector { connector_id });
        };

        let motif = self.slat.motif(mp.motif());
        let Some(local) = motif.local_indices_for_channel(address.channel_id) else {
            return self.miss(warn_on_miss, || LookupMiss::UnconnectedChannel { address });
        };

        assemble_pad(self.slat, mp, local, address.channel_id)
    }

    fn pad_by_grid_indices(&self, indices: GridIndices, warn_on_miss: bool) -> Pad {
        let Some(mp) = self.slat.find_motif_position_by_indices(indices) else {
            return self.miss(warn_on_miss, || LookupMiss::NoMotifAtIndices { indices });
        };

        let local = mp.local_indices(indices);
        let motif = self.slat.motif(mp.motif());
        let Some(channel_id) = motif.channel_for_local_indices(local) else {
            return self.miss(warn_on_miss, || LookupMiss::NoConnectionAtIndices { indices });
        };

        assemble_pad(self.slat, mp, local, channel_id)
    }

    fn pad_by_position(&self, position: Vector2, warn_on_miss: bool) -> Pad {
        let point = self.slat.to_slat_frame(position);
        let Some(mp) = self.slat.find_motif_position_by_point(point) else {
            return self.miss(warn_on_miss, || LookupMiss::PositionOutsideSlat { position });
        };

        let motif = self.slat.motif(mp.motif());
        let Some((local, channel_id)) = motif
            .local_indices_at_offset(point - mp.lower_left())
            .and_then(|local| Some((local, motif.channel_for_local_indices(local)?)))
        else {
            return self.miss(warn_on_miss, || LookupMiss::PositionInGap { position });
        };

        assemble_pad(self.slat, mp, local, channel_id)
    }

    fn max_grid_index_row(&self) -> i32 {
        self.slat.max_nof_pads_y() - 1
    }

    fn max_grid_index_column(&self) -> i32 {
        self.slat.nof_pads_x() - 1
    }

    fn create_iterator(&self, area: &Area) -> Box<dyn PadIterator + '_> {
        Box::new(self.iter_area(*area))
    }
}

/// Builds the pad for a connected local cell of `mp`.
///
/// Every lookup direction and the iterator go through here, so a pad found
/// one way is bit-for-bit equal to the same pad found another way.
pub(crate) fn assemble_pad(
    slat: &Slat,
    mp: &MotifPosition,
    local: GridIndices,
    channel_id: i32,
) -> Pad {
    let Some(cell) = slat.motif(mp.motif()).pad_area_from_corner(local) else {
        return Pad::INVALID;
    };
    Pad::new(
        ElectronicsAddress::new(mp.connector_id(), channel_id),
        mp.global_indices(local),
        slat.to_module_frame(mp.lower_left() + cell.center),
        cell.half_size,
    )
}
