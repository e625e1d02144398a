//! Train/validation split at the source-image level.
//!
//! Splitting whole files (never individual patches) keeps near-duplicate
//! spatial content from leaking between partitions. The RNG is a parameter
//! so callers can thread a seeded generator through for reproducible
//! builds.

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::PathBuf;

/// Shuffle `files` and split into (train, validation).
///
/// Train receives `floor(n * train_split)` files, validation the rest. The
/// two sets are disjoint and their union is the input; an empty input
/// yields two empty sets.
pub fn split_files<R: Rng>(
    mut files: Vec<PathBuf>,
    train_split: f64,
    rng: &mut R,
) -> (Vec<PathBuf>, Vec<PathBuf>) {
    files.shuffle(rng);
    let split_idx = ((files.len() as f64 * train_split) as usize).min(files.len());
    let validation = files.split_off(split_idx);
    (files, validation)
}
