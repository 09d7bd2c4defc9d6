//! mesh-gauge: Command-line interface for mesh analysis and measurement.
//!
//! This tool provides access to mesh-gauge functionality from the command
//! line, suitable for quoting scripts and CI checks on exported parts.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=mesh_gauge=info` - Basic operation logging
//! - `RUST_LOG=mesh_gauge=debug` - Detailed progress logging
//! - `RUST_LOG=mesh_gauge::timing=debug` - Performance timing
//! - `RUST_LOG=mesh_gauge::ruler=debug` - Ruler state transitions
//!
//! # Example
//!
//! ```bash
//! # Volume, area and weight in sterling silver
//! mesh-gauge analyze ring.stl --material "Sterling Silver 925"
//!
//! # Machine-readable report
//! mesh-gauge --format json analyze ring.stl --density 19.32
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mesh_gauge::StandardView;
use nalgebra::Point3;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::annotate::AnnotationEdits;
use commands::{DensityArgs, analyze, annotate, materials, measure, scale};

/// mesh-gauge - Measure 3D models for manufacturing.
///
/// Report volume, surface area, center of mass, watertightness and weight
/// of STL models, and take point-to-point measurements.
#[derive(Parser)]
#[command(name = "mesh-gauge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Report volume, area, centroid, watertightness and weight
    Analyze {
        /// Input STL file
        input: PathBuf,

        #[command(flatten)]
        density: DensityArgs,
    },

    /// List the built-in material densities
    Materials,

    /// Scale a model so it weighs a target amount
    Scale {
        /// Input STL file
        input: PathBuf,

        /// Desired weight in grams
        #[arg(long)]
        target_grams: f64,

        #[command(flatten)]
        density: DensityArgs,

        /// Write the scaled model to this STL file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Measure the distance between two points on a model
    Measure {
        /// Input STL file
        input: PathBuf,

        /// Standard view to measure in (front, side, top, bottom, rear, left)
        #[arg(long, default_value = "front")]
        view: StandardView,

        /// First point as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point3<f64>,

        /// Second point as X,Y,Z
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point3<f64>,

        /// Decimal places in the distance label
        #[arg(long, default_value = "2")]
        precision: usize,
    },

    /// List or edit the notes pinned to a model
    Annotate {
        /// Input STL file; notes live in <name>.annotations.json beside it
        input: PathBuf,

        #[command(flatten)]
        edits: AnnotationEdits,
    },
}

/// Parse `"x,y,z"` into a point.
fn parse_point(s: &str) -> Result<Point3<f64>, String> {
    let coords = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in {s:?}: {e}"))?;

    match coords.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected X,Y,Z, got {s:?}")),
    }
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    // If quiet, don't initialize any tracing
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "mesh_gauge=info",
            2 => "mesh_gauge=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Nicer panic reports in development builds
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Analyze { input, density } => analyze::run(input, density, &cli),
        Commands::Materials => materials::run(&cli),
        Commands::Scale {
            input,
            target_grams,
            density,
            output,
        } => scale::run(input, *target_grams, density, output.as_deref(), &cli),
        Commands::Measure {
            input,
            view,
            from,
            to,
            precision,
        } => measure::run(input, *view, *from, *to, *precision, &cli),
        Commands::Annotate { input, edits } => annotate::run(input, edits, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(mesh_err) = e.downcast_ref::<mesh_gauge::MeshError>() {
                eprintln!("{}: {}", "Error".red().bold(), mesh_err);
                eprintln!("  {}: {}", "Code".cyan(), mesh_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    mesh_err.recovery_suggestion()
                );
                if let Some(location) = mesh_err.location() {
                    eprintln!("  {}: {}", "Location".yellow(), location);
                }
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
