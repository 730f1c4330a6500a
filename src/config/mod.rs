//! Configuration module for the kline-seq pipeline.

pub mod dataset;

// Re-export commonly used items
pub use dataset::{
    DEFAULT_DATA_DIR, DEFAULT_HORIZON, DEFAULT_PREDICT_ASSET, DEFAULT_SEQ_LEN,
    DEFAULT_SHUFFLE_SEED, DEFAULT_VALIDATION_FRACTION, DatasetConfig,
};
