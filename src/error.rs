//! Typed errors for the fatal, pre-flight failure modes.
//!
//! Everything that can go wrong per-file (bad decode, undersized image) is
//! handled at the file-processing boundary and never surfaces as an error;
//! these variants are the ones that abort a run before it starts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
