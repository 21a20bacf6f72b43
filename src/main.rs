//! slat-segmentation: query pads of a regular demonstration slat
//!
//! The slat layout comes from the configuration file (`demo_slat` section).
//! Pads are printed as JSON, one per line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use slat_segmentation::config;
use slat_segmentation::demo::demo_slat;
use slat_segmentation::mapping::{Area, ElectronicsAddress, GridIndices, Pad, Vector2};
use slat_segmentation::segmentation::{Segmentation, SlatSegmentation};

/// Resolve slat pads by electronics address, grid indices or position.
#[derive(Parser, Debug)]
#[command(name = "slat-segmentation")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pad wired to a connector channel
    Address {
        /// Connector id
        connector: i32,
        /// Channel within the connector
        channel: i32,
    },
    /// Pad at slat-wide grid indices
    Indices {
        /// Column (along x)
        #[arg(allow_hyphen_values = true)]
        column: i32,
        /// Row (along y)
        #[arg(allow_hyphen_values = true)]
        row: i32,
    },
    /// Pad containing a position (mm, relative to the slat centre)
    Position {
        /// X coordinate
        #[arg(allow_hyphen_values = true)]
        x: f64,
        /// Y coordinate
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    /// All pads overlapping an area (the whole slat by default)
    Iterate {
        /// Area centre x
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        /// Area centre y
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
        /// Area half-width
        #[arg(long)]
        dx: Option<f64>,
        /// Area half-height
        #[arg(long)]
        dy: Option<f64>,
    },
    /// Slat dimensions and pad counts
    Summary,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_pad(pad: &Pad) -> Result<(), serde_json::Error> {
    let line = if pad.is_valid() {
        serde_json::to_string(pad)?
    } else {
        serde_json::json!({ "invalid": true }).to_string()
    };
    println!("{line}");
    Ok(())
}

/// Entry point for the slat-segmentation CLI.
fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match config::load_config_or_default(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let slat = match demo_slat(&cfg.demo_slat) {
        Ok(slat) => slat,
        Err(e) => {
            error!(error = %e, "Configuration error");
            return ExitCode::FAILURE;
        }
    };
    info!(
        slat = slat.id(),
        motif_positions = slat.motif_positions().len(),
        pads = slat.nof_pads(),
        "Slat ready"
    );

    let seg = SlatSegmentation::new(&slat);
    let warn = cfg.lookup.warn_on_miss;

    let result = match args.command {
        Command::Address { connector, channel } => {
            print_pad(&seg.pad_by_electronics_address(ElectronicsAddress::new(connector, channel), warn))
        }
        Command::Indices { column, row } => {
            print_pad(&seg.pad_by_grid_indices(GridIndices::new(column, row), warn))
        }
        Command::Position { x, y } => print_pad(&seg.pad_by_position(Vector2::new(x, y), warn)),
        Command::Iterate { x, y, dx, dy } => {
            let whole = slat.area();
            let area = Area::new(
                Vector2::new(x.unwrap_or(whole.center.x), y.unwrap_or(whole.center.y)),
                Vector2::new(dx.unwrap_or(whole.half_size.x), dy.unwrap_or(whole.half_size.y)),
            );
            seg.create_iterator(&area).try_for_each(|pad| print_pad(&pad))
        }
        Command::Summary => {
            let summary = serde_json::json!({
                "slat": slat.id(),
                "half_size": slat.half_size(),
                "motif_positions": slat.motif_positions().len(),
                "pads": slat.nof_pads(),
                "max_grid_index_column": seg.max_grid_index_column(),
                "max_grid_index_row": seg.max_grid_index_row(),
            });
            println!("{summary}");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to write output");
            ExitCode::FAILURE
        }
    }
}
