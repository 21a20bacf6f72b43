//! Regular slats generated from [`DemoSlatConfig`].
//!
//! The slat is one row of identical rectangular motifs. Channels are wired
//! row by row inside each motif, and connector ids increase from left to
//! right.

use crate::config::DemoSlatConfig;
use crate::error::ConfigError;
use crate::mapping::{Connection, GeometryError, GridIndices, Motif, Slat, Vector2};

/// Identifier given to generated slats.
pub const DEMO_SLAT_ID: &str = "demo";

/// Builds the regular slat described by `config`.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if a parameter is out of range and
/// [`ConfigError::InvalidLayout`] if the parameters do not describe a valid
/// geometry.
pub fn demo_slat(config: &DemoSlatConfig) -> Result<Slat, ConfigError> {
    config.validate()?;
    let too_large = || GeometryError::invalid_slat(DEMO_SLAT_ID, "layout is too large");
    let columns = i32::try_from(config.motif_columns).map_err(|_| too_large())?;
    let rows = i32::try_from(config.motif_rows).map_err(|_| too_large())?;
    let channels = columns.checked_mul(rows).ok_or_else(too_large)?;

    let pad_half_size = Vector2::new(config.pad_width / 2.0, config.pad_height / 2.0);
    let motif = Motif::uniform(
        "demo-motif",
        config.motif_columns,
        config.motif_rows,
        pad_half_size,
        (0..channels).map(|channel| Connection::new(channel, channel % columns, channel / columns)),
    )?;

    let motif_size = motif.size();
    #[allow(clippy::cast_precision_loss)] // motif counts are small
    let half_size = Vector2::new(motif_size.x * config.motif_count as f64 / 2.0, motif_size.y / 2.0);

    let mut builder = Slat::builder(DEMO_SLAT_ID, half_size);
    let id = builder.add_motif(motif);
    let mut connector_id = config.first_connector_id;
    let mut low_column = 0_i32;
    for index in 0..config.motif_count {
        #[allow(clippy::cast_precision_loss)]
        let left = motif_size.x * index as f64;
        builder.place(id, connector_id, Vector2::new(left, 0.0), GridIndices::new(low_column, 0));
        connector_id = connector_id.checked_add(config.connector_step).ok_or_else(too_large)?;
        low_column = low_column.checked_add(columns).ok_or_else(too_large)?;
    }
    Ok(builder.build()?)
}
