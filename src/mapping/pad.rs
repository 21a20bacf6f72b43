//! The pad value type returned by every segmentation lookup.

use serde::Serialize;

use super::types::{Area, ElectronicsAddress, GridIndices, Vector2};

/// One sensor pad, resolved in all three coordinate systems.
///
/// A pad is either fully consistent with the geometry it came from, or it is
/// [`Pad::INVALID`]. Fields are private so no partially-filled pad can be
/// built outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pad {
    address: ElectronicsAddress,
    indices: GridIndices,
    position: Vector2,
    half_size: Vector2,
}

impl Pad {
    /// The canonical "no pad here" value.
    pub const INVALID: Self = Self {
        address: ElectronicsAddress::INVALID,
        indices: GridIndices::INVALID,
        position: Vector2::ZERO,
        half_size: Vector2::ZERO,
    };

    pub(crate) const fn new(
        address: ElectronicsAddress,
        indices: GridIndices,
        position: Vector2,
        half_size: Vector2,
    ) -> Self {
        Self {
            address,
            indices,
            position,
            half_size,
        }
    }

    /// Returns `true` unless this is [`Pad::INVALID`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Returns the pad if it is valid.
    #[must_use]
    pub fn valid(&self) -> Option<&Self> {
        self.is_valid().then_some(self)
    }

    /// Electronics address (connector id, channel id).
    #[must_use]
    pub const fn electronics_address(&self) -> ElectronicsAddress {
        self.address
    }

    /// Slat-wide grid indices.
    #[must_use]
    pub const fn grid_indices(&self) -> GridIndices {
        self.indices
    }

    /// Pad centre in the module frame.
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        self.position
    }

    /// Half-extents of the pad.
    #[must_use]
    pub const fn half_size(&self) -> Vector2 {
        self.half_size
    }

    /// Physical extent of the pad in the module frame.
    #[must_use]
    pub const fn area(&self) -> Area {
        Area::new(self.position, self.half_size)
    }
}
