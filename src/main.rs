use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use diffloc::detection::annotate::{find_system_font, load_font};
use diffloc::io::load_image;
use diffloc::{DetectionPipeline, DetectorConfig};

#[derive(Parser)]
#[command(name = "diffloc")]
#[command(about = "Locate objects by differencing against a background image")]
struct Cli {
    /// Image of the empty scene
    #[arg(value_name = "BACKGROUND")]
    background: PathBuf,

    /// Image of the same scene possibly containing objects
    #[arg(value_name = "FOREGROUND")]
    foreground: PathBuf,

    /// Where to write the annotated image
    #[arg(short, long, value_name = "FILE", default_value = "annotated_image.png")]
    output: PathBuf,

    /// Seed value for the Otsu threshold call
    #[arg(long, default_value_t = 20)]
    low_thresh: u8,

    /// Value written to changed pixels in the mask
    #[arg(long, default_value_t = 255)]
    high_thresh: u8,

    /// Minimum Otsu level accepted as a real change
    #[arg(long, default_value_t = 40)]
    sensitivity: u8,

    /// Smallest object area as a fraction of the image area (exclusive)
    #[arg(long, default_value_t = 0.005)]
    min_ratio: f64,

    /// Largest object area as a fraction of the image area (exclusive)
    #[arg(long, default_value_t = 0.05)]
    max_ratio: f64,

    /// TrueType font for the labels (common system fonts are tried otherwise)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the detections as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> DetectorConfig {
        DetectorConfig::default()
            .with_thresholds(self.low_thresh, self.high_thresh)
            .with_sensitivity(self.sensitivity)
            .with_area_ratios(self.min_ratio, self.max_ratio)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = args.config();
    config.validate().context("Invalid detection parameters")?;

    // Keep stdout clean for the JSON report.
    let verbose = args.verbose && !args.json;

    if verbose {
        println!("Loading background: {:?}", args.background);
        println!("Loading foreground: {:?}", args.foreground);
    }
    let background = load_image(&args.background)?;
    let foreground = load_image(&args.foreground)?;

    let mut pipeline = DetectionPipeline::new(config).with_verbose(verbose);

    if let Some(debug_dir) = args.debug_out.clone() {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    match &args.font {
        Some(path) => {
            pipeline = pipeline.with_font(load_font(path)?);
        }
        None => match find_system_font() {
            Some((path, font)) => {
                tracing::debug!(font = %path.display(), "using system font for labels");
                pipeline = pipeline.with_font(font);
            }
            None => tracing::warn!("no label font found, annotations will have no text"),
        },
    }

    let report = pipeline.detect(&background, &foreground)?;

    report
        .annotated
        .save(&args.output)
        .with_context(|| format!("Failed to save annotated image to {}", args.output.display()))?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("\n=== Object Detection Results ===");
        println!("Otsu level: {} (changed: {})", report.otsu_level, report.changed);
        println!("Total objects detected: {}", report.detections.len());
        for (i, d) in report.detections.iter().enumerate() {
            println!(
                "  Object {} at ({}, {}) - angle: {:.1} deg, area: {:.1}",
                i + 1,
                d.centroid.x,
                d.centroid.y,
                d.angle,
                d.area
            );
        }
        println!("Annotated image saved to {}", args.output.display());
    }

    Ok(())
}
