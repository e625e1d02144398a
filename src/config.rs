//! Dataset build configuration.
//!
//! The full knob set can come from CLI flags or from a YAML file with the
//! same field names; both paths produce the same `DatasetConfig`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Geometric augmentations applied to training patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Augmentation {
    #[serde(rename = "flip_h")]
    #[value(name = "flip_h")]
    FlipH,
    #[serde(rename = "flip_v")]
    #[value(name = "flip_v")]
    FlipV,
    /// Requesting this produces all three rotations (90/180/270).
    #[serde(rename = "rotate_90")]
    #[value(name = "rotate_90")]
    Rotate90,
}

impl fmt::Display for Augmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Augmentation::FlipH => "flip_h",
            Augmentation::FlipV => "flip_v",
            Augmentation::Rotate90 => "rotate_90",
        };
        write!(f, "{}", name)
    }
}

/// Resampling kernel used when generating the low-resolution counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResampleKernel {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos,
}

impl Default for ResampleKernel {
    fn default() -> Self {
        ResampleKernel::Bicubic
    }
}

impl ResampleKernel {
    pub fn filter_type(self) -> image::imageops::FilterType {
        match self {
            ResampleKernel::Nearest => image::imageops::FilterType::Nearest,
            ResampleKernel::Bilinear => image::imageops::FilterType::Triangle,
            ResampleKernel::Bicubic => image::imageops::FilterType::CatmullRom,
            ResampleKernel::Lanczos => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Full configuration for one dataset build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Side length of the square HR patches.
    #[serde(default = "default_patch_size")]
    pub patch_size: u32,

    /// Integer downscale factor between HR and LR.
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Offset between consecutive patch origins; `None` means `patch_size`
    /// (non-overlapping tiling).
    #[serde(default)]
    pub stride: Option<u32>,

    /// Augmentations applied to the train partition only.
    #[serde(default)]
    pub augmentations: Vec<Augmentation>,

    /// Fraction of source images assigned to the train partition.
    #[serde(default = "default_train_split")]
    pub train_split: f64,

    /// Minimum per-patch pixel standard deviation; zero disables filtering.
    #[serde(default = "default_min_std")]
    pub min_std: f64,

    #[serde(default)]
    pub kernel: ResampleKernel,

    /// Optional seed for the train/validation shuffle. Unset means a fresh
    /// entropy source per run, so partition membership is not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_patch_size() -> u32 {
    96
}

fn default_scale() -> u32 {
    4
}

fn default_train_split() -> f64 {
    0.8
}

fn default_min_std() -> f64 {
    10.0
}

impl DatasetConfig {
    /// Effective stride, falling back to the patch size.
    pub fn stride(&self) -> u32 {
        self.stride.unwrap_or(self.patch_size)
    }

    /// Check parameter ranges before any filesystem work happens.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.patch_size == 0 {
            return Err(PipelineError::InvalidParameter(
                "patch_size must be a positive integer".to_string(),
            ));
        }
        if self.scale < 2 {
            return Err(PipelineError::InvalidParameter(format!(
                "scale must be >= 2, got {}",
                self.scale
            )));
        }
        if let Some(stride) = self.stride {
            if stride == 0 {
                return Err(PipelineError::InvalidParameter(
                    "stride must be a positive integer".to_string(),
                ));
            }
        }
        if !(self.train_split > 0.0 && self.train_split <= 1.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "train_split must be in (0, 1], got {}",
                self.train_split
            )));
        }
        if self.min_std < 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "min_std must be >= 0, got {}",
                self.min_std
            )));
        }
        Ok(())
    }
}

/// Load a `DatasetConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DatasetConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DatasetConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> DatasetConfig {
        DatasetConfig {
            input_dir: PathBuf::from("in"),
            output_dir: PathBuf::from("out"),
            patch_size: 96,
            scale: 4,
            stride: None,
            augmentations: vec![],
            train_split: 0.8,
            min_std: 10.0,
            kernel: ResampleKernel::default(),
            seed: None,
        }
    }

    #[test]
    fn test_default_stride_is_patch_size() {
        let config = base_config();
        assert_eq!(config.stride(), 96);

        let mut overlapping = base_config();
        overlapping.stride = Some(48);
        assert_eq!(overlapping.stride(), 48);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = base_config();
        config.scale = 1;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.patch_size = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.stride = Some(0);
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.train_split = 0.0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.train_split = 1.5;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.min_std = -1.0;
        assert!(config.validate().is_err());

        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = "input_dir: /data/in\noutput_dir: /data/out\n";
        let config: DatasetConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.patch_size, 96);
        assert_eq!(config.scale, 4);
        assert_eq!(config.stride, None);
        assert!(config.augmentations.is_empty());
        assert_eq!(config.train_split, 0.8);
        assert_eq!(config.min_std, 10.0);
        assert_eq!(config.kernel, ResampleKernel::Bicubic);
    }

    #[test]
    fn test_yaml_augmentation_names() {
        let yaml = concat!(
            "input_dir: in\n",
            "output_dir: out\n",
            "augmentations: [flip_h, rotate_90]\n",
            "kernel: lanczos\n",
        );
        let config: DatasetConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.augmentations,
            vec![Augmentation::FlipH, Augmentation::Rotate90]
        );
        assert_eq!(config.kernel, ResampleKernel::Lanczos);
    }
}
