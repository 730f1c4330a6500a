use itertools::Itertools;

use crate::dataset::label::LabeledFrame;
use crate::utils::time_utils;

/// Partition a labeled frame chronologically. The latest `fraction` of
/// distinct timestamps becomes the validation set; everything earlier stays
/// in training. Deterministic for a fixed timestamp set, and no timestamp
/// can land in both splits, so training never sees validation-period data.
pub fn chronological_split(frame: &LabeledFrame, fraction: f64) -> (LabeledFrame, LabeledFrame) {
    if frame.rows() == 0 || fraction <= 0.0 {
        let empty = frame.filter_rows(&vec![false; frame.rows()]);
        return (frame.clone(), empty);
    }

    // Timestamps arrive sorted from the merge; dedup is enough for "distinct"
    let times: Vec<i64> = frame.timestamps.iter().copied().dedup().collect();

    let cut_idx = (((1.0 - fraction) * times.len() as f64).floor() as usize).min(times.len() - 1);
    let cut = times[cut_idx];

    let train_mask: Vec<bool> = frame.timestamps.iter().map(|ts| *ts < cut).collect();
    let validation_mask: Vec<bool> = train_mask.iter().map(|keep| !keep).collect();

    let train = frame.filter_rows(&train_mask);
    let validation = frame.filter_rows(&validation_mask);

    log::info!(
        "split at {} ({}): {} training rows, {} validation rows",
        cut,
        time_utils::epoch_sec_to_utc(cut),
        train.rows(),
        validation.rows()
    );
    (train, validation)
}
