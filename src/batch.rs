//! Batch processing over an input directory tree
//!
//! Enumerates supported image files, runs the pipeline per file, writes a
//! grayscale mask PNG and a white-background composite PNG for each, and
//! keeps going when individual files fail.

use crate::{
    error::{BgCutError, Result},
    processor::BackgroundRemovalProcessor,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use walkdir::WalkDir;

/// File extensions considered batch input (case-insensitive)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["bmp", "jpeg", "jpg", "png", "tif", "tiff", "webp"];

/// Options controlling batch output layout and compositing
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Mirror the input directory tree under the output directory
    pub keep_tree: bool,

    /// Foreground threshold for the composite output
    pub threshold: f32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            keep_tree: false,
            threshold: 0.1,
        }
    }
}

/// Aggregate outcome of a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Files fully processed (mask written)
    pub processed: usize,

    /// Files skipped after a core processing failure
    pub skipped: usize,

    /// Files whose composite save failed (mask still written)
    pub composite_failures: usize,

    /// Wall-clock duration of the whole batch
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Recursively enumerate supported image files under `input_dir`, sorted
/// lexicographically by full path for a deterministic processing order.
///
/// # Errors
/// - [`BgCutError::InputDirNotFound`] when the directory does not exist
pub fn discover_images(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(BgCutError::InputDirNotFound(input_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| has_supported_extension(path))
        .collect();
    files.sort();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
}

/// Compute the mask output path for `input`, either mirroring the input
/// tree or flattened to the file name. The `_masked` composite path is
/// derived from this one.
fn output_base(input: &Path, input_dir: &Path, output_dir: &Path, keep_tree: bool) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    if keep_tree {
        let relative = input
            .parent()
            .and_then(|parent| parent.strip_prefix(input_dir).ok())
            .unwrap_or_else(|| Path::new(""));
        output_dir.join(relative).join(stem)
    } else {
        output_dir.join(stem)
    }
}

/// Process every supported image under `input_dir`, writing
/// `<base>.png` (grayscale mask) and `<base>_masked.png` (white-background
/// composite) under `output_dir`.
///
/// A failure in core processing or mask saving skips that file; a failure
/// in the composite save is logged as a warning and does not affect the
/// already-written mask. An empty input directory is a success.
///
/// # Errors
/// - [`BgCutError::InputDirNotFound`] when `input_dir` does not exist
/// - Backend initialization failures (model missing or unreadable)
/// - Failure to create the output directory
pub fn process_directory(
    processor: &mut BackgroundRemovalProcessor,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let files = discover_images(input_dir)?;
    info!(count = files.len(), input = %input_dir.display(), "Discovered batch inputs");

    // Fail fast on configuration-level problems before touching any file
    processor.initialize()?;
    std::fs::create_dir_all(output_dir)?;

    let start = Instant::now();
    let mut summary = BatchSummary::default();

    for file in &files {
        let base = output_base(file, input_dir, output_dir, options.keep_tree);
        if let Some(parent) = base.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(file = %file.display(), error = %e, "Skipping file: output directory creation failed");
                summary.skipped += 1;
                continue;
            }
        }
        let mask_path = mask_sibling(&base);

        let result = match processor.process_file(file) {
            Ok(result) => result,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping file: processing failed");
                summary.skipped += 1;
                continue;
            },
        };

        if let Err(e) = result.save_mask_png(&mask_path) {
            warn!(file = %file.display(), error = %e, "Skipping file: mask save failed");
            summary.skipped += 1;
            continue;
        }

        let masked_path = masked_sibling(&mask_path);
        if let Err(e) = result.save_masked_png(&masked_path, options.threshold) {
            let err = BgCutError::composite_save(&masked_path, &e);
            warn!(file = %file.display(), error = %err, "Composite save failed; mask kept");
            summary.composite_failures += 1;
        }

        info!(
            input = %file.display(),
            mask = %mask_path.display(),
            "Processed ({})",
            result.timings.summary()
        );
        summary.processed += 1;
    }

    summary.elapsed = start.elapsed();
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        composite_failures = summary.composite_failures,
        elapsed_s = format!("{:.2}", summary.elapsed.as_secs_f64()),
        "Batch complete"
    );
    Ok(summary)
}

/// `out/name` -> `out/name.png`. Appends rather than replacing an
/// extension so dotted stems like `photo.v2` survive intact.
fn mask_sibling(base: &Path) -> PathBuf {
    let mut name = base
        .file_name()
        .map_or_else(|| std::ffi::OsString::from("output"), std::ffi::OsStr::to_os_string);
    name.push(".png");
    base.with_file_name(name)
}

/// `out/name.png` -> `out/name_masked.png`
fn masked_sibling(mask_path: &Path) -> PathBuf {
    let stem = mask_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    mask_path.with_file_name(format!("{stem}_masked.png"))
}
