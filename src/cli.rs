//! Command-line interface for batch background removal

use crate::{
    batch::{self, BatchOptions},
    config::{Device, RemovalConfig},
    processor::BackgroundRemovalProcessor,
    tracing_config::TracingConfig,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// BiRefNet background removal over a directory of images
#[derive(Parser, Debug)]
#[command(name = "bgcut")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the BiRefNet ONNX model file
    #[arg(long = "onnx_path", default_value = "../models/onnx/model_fp16.onnx")]
    pub onnx_path: PathBuf,

    /// Directory of input images (searched recursively)
    #[arg(long = "input_dir", default_value = "./")]
    pub input_dir: PathBuf,

    /// Directory for mask and composite outputs
    #[arg(long = "output_dir", default_value = "../output")]
    pub output_dir: PathBuf,

    /// Execution device (cpu|cuda); anything but cpu falls back to cpu
    #[arg(long, default_value = "cpu")]
    pub device: String,

    /// Mirror the input directory tree under the output directory
    #[arg(long = "keep_tree", default_value_t = false)]
    pub keep_tree: bool,

    /// Foreground threshold in (0, 1] for the composite output
    #[arg(long, default_value_t = 0.1)]
    pub threshold: f32,

    /// Enable verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run the CLI. Errors map to exit code 1 in the binary.
///
/// # Errors
/// - Missing model file or input directory
/// - Invalid threshold
/// - Unrecoverable batch failures (output directory not writable, etc.)
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version surface as clap "errors" but exit 0;
            // real parse failures exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        },
    };
    run_with(cli)
}

fn run_with(cli: Cli) -> Result<()> {
    TracingConfig::new(cli.verbose)
        .init()
        .context("Failed to initialize tracing")?;

    let device = Device::parse_lenient(&cli.device);
    if !cli.device.eq_ignore_ascii_case("cpu") {
        warn!(
            requested = %cli.device,
            "Only cpu execution is supported; forcing cpu"
        );
    }

    let config = RemovalConfig::builder()
        .model_path(cli.onnx_path.clone())
        .device(device)
        .threshold(cli.threshold)
        .build()
        .context("Invalid arguments")?;

    info!(
        model = %config.model_path.display(),
        input = %cli.input_dir.display(),
        output = %cli.output_dir.display(),
        threshold = config.threshold,
        keep_tree = cli.keep_tree,
        "Starting batch background removal"
    );

    let mut processor = BackgroundRemovalProcessor::with_onnx(config);
    let options = BatchOptions {
        keep_tree: cli.keep_tree,
        threshold: cli.threshold,
    };
    let summary = batch::process_directory(
        &mut processor,
        &cli.input_dir,
        &cli.output_dir,
        &options,
    )?;

    info!(
        "Processed {} image(s) in {:.2}s ({} skipped, {} composite failures)",
        summary.processed,
        summary.elapsed.as_secs_f64(),
        summary.skipped,
        summary.composite_failures
    );
    Ok(())
}
