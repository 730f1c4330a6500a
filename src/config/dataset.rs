//! Dataset preparation configuration
//!
//! One explicit structure passed into each pipeline stage, instead of
//! module-level constants scattered across the stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::domain::PrepError;

/// Default directory scanned for per-asset kline csv files
pub const DEFAULT_DATA_DIR: &str = "crypto_data";

/// Default asset whose close price the label is derived from
pub const DEFAULT_PREDICT_ASSET: &str = "LTC-USD";

/// How many rows ahead the label looks by default
pub const DEFAULT_HORIZON: usize = 3;

/// Default length of each emitted feature sequence
pub const DEFAULT_SEQ_LEN: usize = 60;

/// Fraction of the latest timestamps reserved for validation by default
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.05;

/// Default seed for the within-split sample shuffle
pub const DEFAULT_SHUFFLE_SEED: u64 = 42;

/// Configuration for one preparation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding one headerless OHLCV csv per asset
    pub data_dir: PathBuf,
    /// Asset whose close price the label is derived from
    pub predict_asset: String,
    /// How many rows ahead the label looks
    pub horizon: usize,
    /// Length of each emitted feature sequence
    pub seq_len: usize,
    /// Fraction of the latest timestamps reserved for validation
    pub validation_fraction: f64,
    /// Seed for the within-split sample shuffle
    pub shuffle_seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            predict_asset: DEFAULT_PREDICT_ASSET.to_string(),
            horizon: DEFAULT_HORIZON,
            seq_len: DEFAULT_SEQ_LEN,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
            shuffle_seed: DEFAULT_SHUFFLE_SEED,
        }
    }
}

impl DatasetConfig {
    /// Defaults overridden by whatever flags were given on the command line.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(asset) = &cli.predict {
            config.predict_asset = asset.clone();
        }
        if let Some(horizon) = cli.horizon {
            config.horizon = horizon;
        }
        if let Some(seq_len) = cli.seq_len {
            config.seq_len = seq_len;
        }
        if let Some(fraction) = cli.validation_fraction {
            config.validation_fraction = fraction;
        }
        if let Some(seed) = cli.seed {
            config.shuffle_seed = seed;
        }
        config
    }

    /// Reject values no stage can do anything sensible with.
    pub fn validate(&self) -> Result<(), PrepError> {
        if self.horizon == 0 {
            return Err(PrepError::Format {
                what: "configuration".to_string(),
                detail: "horizon must be at least 1".to_string(),
            });
        }
        if self.seq_len == 0 {
            return Err(PrepError::Format {
                what: "configuration".to_string(),
                detail: "seq_len must be at least 1".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(PrepError::Format {
                what: "configuration".to_string(),
                detail: format!(
                    "validation_fraction must be in [0, 1), got {}",
                    self.validation_fraction
                ),
            });
        }
        Ok(())
    }
}
