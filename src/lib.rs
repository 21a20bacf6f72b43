//! slat-segmentation: pad lookups for slat detector modules
//!
//! A slat is a rectangular tracking-detector module tiled by repeated
//! front-end footprints (motifs). Each sensor pad can be named three ways:
//!
//! - **Electronics address**: (connector id, channel id)
//! - **Grid indices**: (column, row) on the slat-wide pad grid
//! - **Position**: (x, y) in mm, relative to the slat centre
//!
//! This library resolves any of the three into a fully-populated pad, and
//! iterates over the pads intersecting an area.
//!
//! # Modules
//!
//! - [`mapping`] — Geometry: motifs, motif positions, slats and pads
//! - [`segmentation`] — Lookup engine, pad iterator and miss diagnostics
//! - [`config`] — Configuration loading and validation
//! - [`demo`] — Regular slats generated from configuration
//! - [`error`] — Error types

pub mod config;
pub mod demo;
pub mod error;
pub mod mapping;
pub mod segmentation;
