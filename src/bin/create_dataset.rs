//! Build a paired HR/LR patch dataset from a directory of images.
//!
//! All knobs are available as flags; `--config` loads the same settings
//! from a YAML file instead.

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use patchforge::config::{load_config, Augmentation, DatasetConfig, ResampleKernel};
use patchforge::pipeline::process_dataset;

#[derive(Parser, Debug)]
#[command(
    name = "create_dataset",
    about = "Create an HR/LR patch dataset for super-resolution training"
)]
struct Cli {
    /// Input directory containing source images
    #[arg(required_unless_present = "config")]
    input_dir: Option<PathBuf>,

    /// Output directory for the dataset
    #[arg(required_unless_present = "config")]
    output_dir: Option<PathBuf>,

    /// Size of the square patches to extract
    #[arg(long, default_value_t = 96)]
    patch_size: u32,

    /// Downscaling factor between HR and LR patches
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// Stride for patch extraction (default: patch size)
    #[arg(long)]
    stride: Option<u32>,

    /// Data augmentation methods (train partition only)
    #[arg(long = "augment", value_enum, num_args = 1..)]
    augment: Vec<Augmentation>,

    /// Proportion of source images assigned to training
    #[arg(long, default_value_t = 0.8)]
    train_split: f64,

    /// Minimum patch standard deviation (0 disables filtering)
    #[arg(long, default_value_t = 10.0)]
    min_std: f64,

    /// Resampling kernel for downscaling
    #[arg(long, value_enum, default_value = "bicubic")]
    kernel: ResampleKernel,

    /// Seed for the train/validation shuffle (omit for a random split)
    #[arg(long)]
    seed: Option<u64>,

    /// Load all settings from a YAML file instead of flags
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<DatasetConfig> {
        if let Some(path) = self.config {
            return load_config(path);
        }

        Ok(DatasetConfig {
            input_dir: self
                .input_dir
                .ok_or_else(|| anyhow!("input directory is required"))?,
            output_dir: self
                .output_dir
                .ok_or_else(|| anyhow!("output directory is required"))?,
            patch_size: self.patch_size,
            scale: self.scale,
            stride: self.stride,
            augmentations: self.augment,
            train_split: self.train_split,
            min_std: self.min_std,
            kernel: self.kernel,
            seed: self.seed,
        })
    }
}

fn main() -> Result<()> {
    patchforge::logging::init_logger();

    let config = Cli::parse().into_config()?;
    info!(
        "Starting dataset build: {} -> {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    println!("Creating dataset from: {}", config.input_dir.display());
    println!("Output directory: {}", config.output_dir.display());

    process_dataset(&config)?;

    info!("Dataset build completed successfully");
    Ok(())
}
