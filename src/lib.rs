#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod dataset;
pub mod domain;
pub mod utils;

// Re-export commonly used types
pub use config::DatasetConfig;
pub use data::{AssetSeries, load_assets};
pub use dataset::{PrepSummary, PreparedDataset, SequenceSample, prepare_dataset};
pub use domain::{PrepError, RawKline};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding one headerless OHLCV csv per asset
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Asset whose close price the label is derived from
    #[arg(long)]
    pub predict: Option<String>,

    /// How many rows ahead the label looks
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Length of each emitted feature sequence
    #[arg(long)]
    pub seq_len: Option<usize>,

    /// Fraction of the latest timestamps reserved for validation
    #[arg(long)]
    pub validation_fraction: Option<f64>,

    /// Seed for the within-split sample shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
