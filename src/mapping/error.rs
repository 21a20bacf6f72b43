//! Error types for geometry construction.
//!
//! These errors describe a geometry description that breaks one of the
//! construction invariants (bijective channel table, unique connector ids,
//! non-overlapping placements tiling the slat). Pad lookups on a built
//! geometry never produce them.

use thiserror::Error;

use super::types::GridIndices;

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised while building motifs and slats.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A motif has an empty or degenerate pad grid.
    #[error("Invalid motif '{motif}': {message}")]
    InvalidMotif {
        /// Motif identifier.
        motif: String,
        /// Description of what's wrong.
        message: String,
    },

    /// A connection points outside the motif grid.
    #[error("Motif '{motif}': connection for channel {channel_id} at {local} is outside the pad grid")]
    ConnectionOutOfRange {
        /// Motif identifier.
        motif: String,
        /// Channel of the offending connection.
        channel_id: i32,
        /// Local indices of the offending connection.
        local: GridIndices,
    },

    /// Two connections share a channel id.
    #[error("Motif '{motif}': channel {channel_id} is connected twice")]
    DuplicateChannel {
        /// Motif identifier.
        motif: String,
        /// The duplicated channel.
        channel_id: i32,
    },

    /// Two connections occupy the same cell.
    #[error("Motif '{motif}': pad {local} is connected twice")]
    DuplicateCell {
        /// Motif identifier.
        motif: String,
        /// The doubly-occupied cell.
        local: GridIndices,
    },

    /// The slat itself is malformed.
    #[error("Invalid slat '{slat}': {message}")]
    InvalidSlat {
        /// Slat identifier.
        slat: String,
        /// Description of what's wrong.
        message: String,
    },

    /// A placement refers to a motif that was never added.
    #[error("Unknown motif id {id}")]
    UnknownMotif {
        /// The unknown arena index.
        id: usize,
    },

    /// Invalid placement parameter.
    #[error("Invalid placement of connector {connector_id}: {message}")]
    InvalidPlacement {
        /// Connector id of the placement.
        connector_id: i32,
        /// Description of what's wrong.
        message: String,
    },

    /// Two placements share a connector id.
    #[error("Connector id {connector_id} is used twice in slat '{slat}'")]
    DuplicateConnector {
        /// Slat identifier.
        slat: String,
        /// The duplicated connector id.
        connector_id: i32,
    },

    /// Two placements overlap, physically or in index space.
    #[error("Connectors {first} and {second} overlap in slat '{slat}' ({what})")]
    Overlap {
        /// Slat identifier.
        slat: String,
        /// First connector id.
        first: i32,
        /// Second connector id.
        second: i32,
        /// Which space the overlap was found in.
        what: &'static str,
    },

    /// The placements do not cover the slat rectangle.
    #[error("Placements cover {covered} mm² of slat '{slat}' which is {expected} mm²")]
    IncompleteTiling {
        /// Slat identifier.
        slat: String,
        /// Surface covered by the placements.
        covered: f64,
        /// Surface of the slat.
        expected: f64,
    },
}

impl GeometryError {
    /// Creates an invalid motif error.
    pub fn invalid_motif(motif: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMotif {
            motif: motif.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid slat error.
    pub fn invalid_slat(slat: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSlat {
            slat: slat.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid placement error.
    pub fn invalid_placement(connector_id: i32, message: impl Into<String>) -> Self {
        Self::InvalidPlacement {
            connector_id,
            message: message.into(),
        }
    }
}
