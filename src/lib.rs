pub mod augment;
pub mod config;
pub mod downscale;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod split;
pub mod synth;
pub mod tiler;

// Re-export common types
pub use config::{load_config, Augmentation, DatasetConfig, ResampleKernel};
pub use error::PipelineError;
pub use pipeline::{process_dataset, RunStatistics};

pub mod logging {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    pub fn init_logger() {
        Builder::new()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] - {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.args()
                )
            })
            .filter(None, LevelFilter::Info)
            .init();
    }
}
