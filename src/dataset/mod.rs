// The preparation pipeline, stage by stage:
// merge -> label -> split -> normalize -> window
pub mod label;
pub mod merge;
pub mod normalize;
pub mod split;
pub mod window;

// Re-export commonly used types
pub use label::{LabeledFrame, label_frame};
pub use merge::{Column, MergedFrame, merge_assets};
pub use normalize::{NormalizedFrame, normalize};
pub use split::chronological_split;
pub use window::{RollingWindow, SequenceSample, build_windows, shuffle_samples};

use anyhow::Result;
use serde::Serialize;

use crate::config::DatasetConfig;
use crate::data::load_assets;
use crate::utils::time_utils;

/// Everything a downstream trainer needs: shuffled windows per split, plus
/// the run's bookkeeping.
pub struct PreparedDataset {
    pub train: Vec<SequenceSample>,
    pub validation: Vec<SequenceSample>,
    pub summary: PrepSummary,
}

/// Row and window counts per stage, for logging and the `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct PrepSummary {
    pub assets: Vec<String>,
    pub merged_rows: usize,
    pub labeled_rows: usize,
    /// First validation timestamp, when the validation split is non-empty
    pub cut_timestamp: Option<i64>,
    pub cut_date_utc: Option<String>,
    /// Rows per split after percent-change cleaning
    pub train_rows: usize,
    pub validation_rows: usize,
    pub train_windows: usize,
    pub validation_windows: usize,
}

/// Run the whole pipeline over the configured data directory.
///
/// Each stage consumes the previous stage's output; nothing is shared or
/// mutated across stages and nothing is persisted. Splits are normalized,
/// windowed and shuffled independently, so no window mixes rows from both
/// sides of the chronological boundary.
pub fn prepare_dataset(config: &DatasetConfig) -> Result<PreparedDataset> {
    config.validate()?;

    let assets = load_assets(&config.data_dir)?;
    let asset_names: Vec<String> = assets.iter().map(|s| s.asset.clone()).collect();

    let merged = merge_assets(&assets);
    let labeled = label_frame(&merged, &config.predict_asset, config.horizon)?;
    let (train, validation) = chronological_split(&labeled, config.validation_fraction);
    let cut_timestamp = validation.timestamps.first().copied();

    let train = normalize(&train);
    let validation = normalize(&validation);

    let mut train_windows = build_windows(&train, config.seq_len);
    let mut validation_windows = build_windows(&validation, config.seq_len);
    shuffle_samples(&mut train_windows, config.shuffle_seed);
    shuffle_samples(&mut validation_windows, config.shuffle_seed);

    let summary = PrepSummary {
        assets: asset_names,
        merged_rows: merged.rows(),
        labeled_rows: labeled.rows(),
        cut_timestamp,
        cut_date_utc: cut_timestamp.map(time_utils::epoch_sec_to_utc),
        train_rows: train.rows(),
        validation_rows: validation.rows(),
        train_windows: train_windows.len(),
        validation_windows: validation_windows.len(),
    };
    log::info!(
        "prepared {} training and {} validation windows",
        summary.train_windows,
        summary.validation_windows
    );

    Ok(PreparedDataset {
        train: train_windows,
        validation: validation_windows,
        summary,
    })
}
