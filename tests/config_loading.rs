//! Integration tests for configuration loading and the demo slat it drives.

use std::fs;

use slat_segmentation::config::{load_config, load_config_or_default};
use slat_segmentation::demo::demo_slat;
use slat_segmentation::error::ConfigError;
use slat_segmentation::mapping::{ElectronicsAddress, GridIndices};
use slat_segmentation::segmentation::{Segmentation, SlatSegmentation};
use tempfile::tempdir;

#[test]
fn test_load_config_from_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "lookup": { "warn_on_miss": false },
            "demo_slat": {
                "motif_count": 2,
                "motif_columns": 3,
                "motif_rows": 2,
                "pad_width": 1.0,
                "pad_height": 1.0,
                "first_connector_id": 40
            },
            "logging": { "level": "info" }
        }"#,
    )
    .expect("Failed to write config");

    let config = load_config(Some(&path)).expect("Failed to load config");
    assert!(!config.lookup.warn_on_miss);
    assert_eq!(config.logging.level, "info");

    let slat = demo_slat(&config.demo_slat).expect("Failed to build demo slat");
    let seg = SlatSegmentation::new(&slat);
    assert_eq!(seg.max_grid_index_column(), 5);
    assert_eq!(seg.max_grid_index_row(), 1);

    // Second motif, local (1, 1): channel 1 + 1 * 3.
    let pad = seg.pad_by_electronics_address(ElectronicsAddress::new(41, 4), false);
    assert_eq!(pad.grid_indices(), GridIndices::new(4, 1));
    assert_eq!(seg.pad_by_position(pad.position(), false), pad);
}

#[test]
fn test_malformed_config_is_a_parse_error() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").expect("Failed to write config");

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_invalid_values_fail_validation() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "demo_slat": { "motif_rows": 0 } }"#).expect("Failed to write config");

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_missing_explicit_config_is_not_defaulted() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.json");

    let result = load_config_or_default(Some(&path));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}
