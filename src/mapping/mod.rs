//! Detector geometry: motifs, motif positions and slats.
//!
//! This module holds the read-only geometry graph the segmentation engine
//! walks:
//!
//! - [`Motif`] — a local pad grid with channel wiring and pad sizes
//! - [`MotifPosition`] — one placed motif with its own connector id
//! - [`Slat`] — a rectangular module tiled by motif positions
//! - [`Pad`] — the result of a lookup, valid or [`Pad::INVALID`]
//!
//! # Ownership
//!
//! A slat owns its motifs in an arena and its motif positions refer to them
//! by [`MotifId`]. Once built, a slat is never mutated; segmentation engines
//! and pad iterators borrow it.

pub mod error;
pub mod motif;
pub mod motif_position;
pub mod pad;
pub mod slat;
pub mod types;

pub use error::{GeometryError, GeometryResult};
pub use motif::{Connection, Motif};
pub use motif_position::{MotifId, MotifPosition};
pub use pad::Pad;
pub use slat::{Slat, SlatBuilder};
pub use types::{Area, ElectronicsAddress, GridIndices, Vector2};
