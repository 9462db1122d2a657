//! Verdant CLI - satellite crop-health auditing

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use verdant_algorithms::audit::vegetation_audit;
use verdant_core::io::read_geotiff;
use verdant_core::raster::Band;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about = "Satellite crop-health auditing", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Compute NDVI from Red and NIR bands and report crop health
    Audit {
        /// Red band file (Sentinel-2: B04)
        #[arg(long)]
        red: PathBuf,
        /// NIR band file (Sentinel-2: B08)
        #[arg(long)]
        nir: PathBuf,
        /// Output GeoTIFF
        output: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_band(path: &PathBuf) -> Result<Band> {
    let pb = spinner("Reading raster...");
    let band = read_geotiff(path, None).context("Failed to read raster")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", band.cols(), band.rows());
    Ok(band)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let band = read_band(&input)?;
            let profile = band.profile();
            let bounds = band.bounds();
            let stats = band.statistics();

            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} pixels)",
                profile.width,
                profile.height,
                band.len()
            );
            println!("Bands in source: {}", profile.count);
            println!("Pixel type: {}", profile.dtype);
            println!("Cell size: {}", band.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(crs) = profile.crs {
                println!("CRS: {}", crs);
            }
            if let Some(nodata) = profile.nodata {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid pixels: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / band.len() as f64
            );
        }

        // ── Audit ────────────────────────────────────────────────────
        Commands::Audit { red, nir, output } => {
            let pb = spinner("Auditing scene...");
            let start = Instant::now();
            let outcome =
                vegetation_audit(&red, &nir, &output).context("Failed to audit scene")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            info!("Mean NDVI: {:.4}", outcome.mean_ndvi);
            info!("Processing time: {:.2?}", elapsed);

            println!("Audit Complete. Truth Map saved to {}", output.display());
            println!("{}", outcome.status);
        }
    }

    Ok(())
}
