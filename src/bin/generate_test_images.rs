//! Generate synthetic test images for exercising the dataset pipeline.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use patchforge::synth::generate_test_images;

#[derive(Parser, Debug)]
#[command(
    name = "generate_test_images",
    about = "Create synthetic images for testing the dataset pipeline"
)]
struct Cli {
    /// Directory to write the generated images into
    output_dir: PathBuf,

    /// Number of images to generate
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Seed for reproducible image content
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    patchforge::logging::init_logger();

    let cli = Cli::parse();
    match cli.seed {
        Some(seed) => {
            generate_test_images(&cli.output_dir, cli.count, &mut StdRng::seed_from_u64(seed))
        }
        None => generate_test_images(&cli.output_dir, cli.count, &mut rand::thread_rng()),
    }
}
