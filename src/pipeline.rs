//! End-to-end dataset construction.
//!
//! Drives the whole build: list candidate images, split them into train and
//! validation at the file level, then per file decode, tile, augment
//! (train only), variance-filter, downscale, and persist HR/LR pairs.
//! Finishes by writing a plain-text manifest describing the build.
//!
//! Per-file failures (bad decode, undersized image) are logged and skipped;
//! the only fatal error is a missing input directory, caught before any
//! processing starts.

use anyhow::{Context, Result};
use image::RgbImage;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

use crate::augment::augment_patch;
use crate::config::DatasetConfig;
use crate::downscale::downscale;
use crate::error::PipelineError;
use crate::filter;
use crate::split::split_files;
use crate::tiler::extract_patches;

/// File extensions admitted into the candidate set, lowercase.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Counters accumulated across one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// HR/LR pairs written across both partitions.
    pub patches_written: usize,
    /// Patches dropped by the variance filter.
    pub patches_rejected: usize,
}

/// Which half of the dataset a source image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Validation,
}

impl Partition {
    fn dir_name(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Validation => "validation",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Partition::Train => "training",
            Partition::Validation => "validation",
        }
    }

    fn is_train(self) -> bool {
        matches!(self, Partition::Train)
    }
}

/// Output directory layout for one build.
struct OutputLayout {
    root: PathBuf,
    scale: u32,
}

impl OutputLayout {
    fn new(root: &Path, scale: u32) -> Self {
        Self {
            root: root.to_path_buf(),
            scale,
        }
    }

    fn hr_dir(&self, partition: Partition) -> PathBuf {
        self.root.join(partition.dir_name()).join("HR")
    }

    fn lr_dir(&self, partition: Partition) -> PathBuf {
        self.root
            .join(partition.dir_name())
            .join(format!("LR_x{}", self.scale))
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join("dataset_info.txt")
    }

    fn create(&self) -> Result<()> {
        for partition in [Partition::Train, Partition::Validation] {
            for dir in [self.hr_dir(partition), self.lr_dir(partition)] {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }
}

/// Per-partition progress reporting, a bar when the feature is enabled and
/// plain lines otherwise.
struct FileProgress {
    #[cfg(feature = "progress-bar")]
    bar: indicatif::ProgressBar,
}

impl FileProgress {
    fn new(total: u64) -> Self {
        #[cfg(feature = "progress-bar")]
        {
            Self {
                bar: indicatif::ProgressBar::new(total),
            }
        }
        #[cfg(not(feature = "progress-bar"))]
        {
            let _ = total;
            Self {}
        }
    }

    fn println(&self, msg: &str) {
        #[cfg(feature = "progress-bar")]
        self.bar.println(msg);
        #[cfg(not(feature = "progress-bar"))]
        println!("{}", msg);
    }

    fn inc(&self) {
        #[cfg(feature = "progress-bar")]
        self.bar.inc(1);
    }

    fn finish(&self) {
        #[cfg(feature = "progress-bar")]
        self.bar.finish_and_clear();
    }
}

/// Run a full dataset build as described by `config`.
///
/// Returns the accumulated run counters; a missing input directory or an
/// out-of-range parameter is the only way this fails outright.
pub fn process_dataset(config: &DatasetConfig) -> Result<RunStatistics> {
    config.validate()?;

    if !config.input_dir.is_dir() {
        return Err(PipelineError::InputDirNotFound(config.input_dir.clone()).into());
    }

    let layout = OutputLayout::new(&config.output_dir, config.scale);
    layout.create()?;

    let files = list_image_files(&config.input_dir)?;
    if files.is_empty() {
        warn!("No images found in {}", config.input_dir.display());
        println!("No images found in {}", config.input_dir.display());
        return Ok(RunStatistics::default());
    }
    println!("Found {} images", files.len());

    let (train_files, validation_files) = match config.seed {
        Some(seed) => split_files(files, config.train_split, &mut StdRng::seed_from_u64(seed)),
        None => split_files(files, config.train_split, &mut rand::thread_rng()),
    };
    println!(
        "Train: {} images, Validation: {} images",
        train_files.len(),
        validation_files.len()
    );

    let mut stats = RunStatistics::default();
    for (partition, files) in [
        (Partition::Train, &train_files),
        (Partition::Validation, &validation_files),
    ] {
        process_partition(config, &layout, partition, files, &mut stats);
    }

    println!("\nDataset creation complete!");
    println!("Total patches created: {}", stats.patches_written);
    if stats.patches_rejected > 0 {
        println!("Patches rejected (low variance): {}", stats.patches_rejected);
    }

    write_manifest(config, &layout, &stats)?;
    println!("\nDataset info saved to: {}", layout.manifest_path().display());

    Ok(stats)
}

/// List candidate images in `dir`, sorted by name for a stable shuffle
/// input. Files with unrecognized extensions are silently excluded.
fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Process every file of one partition, converting per-file errors into log
/// lines so a single bad input never aborts the run.
fn process_partition(
    config: &DatasetConfig,
    layout: &OutputLayout,
    partition: Partition,
    files: &[PathBuf],
    stats: &mut RunStatistics,
) {
    println!("\nProcessing {} set...", partition.label());
    info!(
        "Processing {} set: {} files",
        partition.label(),
        files.len()
    );

    let progress = FileProgress::new(files.len() as u64);
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match process_file(config, layout, partition, path) {
            Ok(outcome) => {
                stats.patches_written += outcome.written;
                stats.patches_rejected += outcome.rejected;
                if let Some(msg) = outcome.skip_reason {
                    progress.println(&format!("  Skipping {} ({})", name, msg));
                } else {
                    progress.println(&format!("  Processed {}: {} patches", name, outcome.written));
                }
            }
            Err(err) => {
                warn!("Error processing {}: {:#}", name, err);
                progress.println(&format!("  Error processing {}: {:#}", name, err));
            }
        }
        progress.inc();
    }
    progress.finish();
}

/// Counts for one source image.
#[derive(Debug, Default)]
struct FileOutcome {
    written: usize,
    rejected: usize,
    skip_reason: Option<&'static str>,
}

/// Decode one source image and write all surviving HR/LR patch pairs.
///
/// Filenames are `{stem}_{index:04}.png` where the index is the patch's
/// position in the post-augmentation sequence, so variance-rejected patches
/// leave gaps rather than renumbering their successors.
fn process_file(
    config: &DatasetConfig,
    layout: &OutputLayout,
    partition: Partition,
    path: &Path,
) -> Result<FileOutcome> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?
        .to_rgb8();

    let mut outcome = FileOutcome::default();
    if image.width() < config.patch_size || image.height() < config.patch_size {
        outcome.skip_reason = Some("too small");
        return Ok(outcome);
    }

    let patches = extract_patches(&image, config.patch_size, config.stride());

    // Augmentation applies to the train partition only; validation keeps
    // the raw tiling so its patch counts stay faithful to the source.
    let patches: Vec<RgbImage> = if partition.is_train() && !config.augmentations.is_empty() {
        patches
            .iter()
            .flat_map(|patch| augment_patch(patch, &config.augmentations))
            .collect()
    } else {
        patches
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("File has no stem: {}", path.display()))?;
    let hr_dir = layout.hr_dir(partition);
    let lr_dir = layout.lr_dir(partition);

    for (patch_idx, patch) in patches.iter().enumerate() {
        if !filter::accepts(patch, config.min_std) {
            outcome.rejected += 1;
            continue;
        }

        let file_name = format!("{}_{:04}.png", stem, patch_idx);

        let hr_path = hr_dir.join(&file_name);
        patch
            .save(&hr_path)
            .with_context(|| format!("Failed to save HR patch: {}", hr_path.display()))?;

        let lr_patch = downscale(patch, config.scale, config.kernel);
        let lr_path = lr_dir.join(&file_name);
        lr_patch
            .save(&lr_path)
            .with_context(|| format!("Failed to save LR patch: {}", lr_path.display()))?;

        outcome.written += 1;
    }

    Ok(outcome)
}

/// Count regular files directly under `dir`.
fn count_files(dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    let mut count = 0;
    for entry in entries {
        if entry?.path().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Write `dataset_info.txt` describing the build.
///
/// Per-partition counts come from re-listing the HR output directories
/// rather than trusting the in-memory counters.
fn write_manifest(
    config: &DatasetConfig,
    layout: &OutputLayout,
    stats: &RunStatistics,
) -> Result<()> {
    let augmentations = if config.augmentations.is_empty() {
        "None".to_string()
    } else {
        config
            .augmentations
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut contents = String::new();
    contents.push_str("Dataset Information\n");
    contents.push_str("==================\n\n");
    contents.push_str(&format!("Source directory: {}\n", config.input_dir.display()));
    contents.push_str(&format!(
        "Patch size: {}x{}\n",
        config.patch_size, config.patch_size
    ));
    contents.push_str(&format!("Downscale factor: {}x\n", config.scale));
    contents.push_str(&format!("Stride: {}\n", config.stride()));
    contents.push_str(&format!("Augmentations: {}\n", augmentations));
    contents.push_str(&format!(
        "Train/Val split: {:.0}%/{:.0}%\n",
        config.train_split * 100.0,
        (1.0 - config.train_split) * 100.0
    ));
    contents.push_str(&format!("Total patches: {}\n", stats.patches_written));
    contents.push_str(&format!(
        "Training patches: {}\n",
        count_files(&layout.hr_dir(Partition::Train))?
    ));
    contents.push_str(&format!(
        "Validation patches: {}\n",
        count_files(&layout.hr_dir(Partition::Validation))?
    ));

    let path = layout.manifest_path();
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
    Ok(())
}
