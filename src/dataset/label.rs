use crate::dataset::merge::{Column, MergedFrame};
use crate::domain::PrepError;

// ============================================================================
// LabeledFrame: merged rows plus future price and binary target
// ============================================================================

#[derive(Debug, Clone)]
pub struct LabeledFrame {
    pub timestamps: Vec<i64>,
    pub columns: Vec<Column>,
    /// Close of the primary asset `horizon` rows ahead. Only needed to
    /// derive `targets`; the normalizer discards it.
    pub future: Vec<f64>,
    /// 1 when the future close is strictly above the current close
    pub targets: Vec<u8>,
}

impl LabeledFrame {
    pub fn rows(&self) -> usize {
        self.timestamps.len()
    }

    /// Keep only rows where `mask` is true, across every parallel vector.
    pub fn filter_rows(&self, mask: &[bool]) -> LabeledFrame {
        debug_assert_eq!(mask.len(), self.rows());
        LabeledFrame {
            timestamps: filtered(self.timestamps.iter().copied(), mask).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: filtered(c.values.iter().copied(), mask).collect(),
                })
                .collect(),
            future: filtered(self.future.iter().copied(), mask).collect(),
            targets: filtered(self.targets.iter().copied(), mask).collect(),
        }
    }
}

fn filtered<'a, T: 'a>(
    values: impl Iterator<Item = T> + 'a,
    mask: &'a [bool],
) -> impl Iterator<Item = T> + 'a {
    values
        .zip(mask.iter())
        .filter(|(_, keep)| **keep)
        .map(|(v, _)| v)
}

/// Did the price rise? Strict comparison: an unchanged price is not a rise,
/// and a NAN on either side is not a rise either.
fn classify(current: f64, future: f64) -> u8 {
    if future > current { 1 } else { 0 }
}

/// Attach `future` and `targets` derived from the primary asset's close
/// shifted `horizon` rows ahead. The trailing `horizon` rows have no valid
/// future and are dropped from the output.
pub fn label_frame(
    merged: &MergedFrame,
    predict_asset: &str,
    horizon: usize,
) -> Result<LabeledFrame, PrepError> {
    let close_name = format!("{}_close", predict_asset);
    let close = merged
        .column(&close_name)
        .ok_or_else(|| PrepError::Format {
            what: "merged frame".to_string(),
            detail: format!(
                "no column `{}`; is {} present in the data directory?",
                close_name, predict_asset
            ),
        })?
        .values
        .clone();

    let usable = merged.rows().saturating_sub(horizon);

    let future: Vec<f64> = (0..usable).map(|t| close[t + horizon]).collect();
    let targets: Vec<u8> = (0..usable).map(|t| classify(close[t], future[t])).collect();

    let labeled = LabeledFrame {
        timestamps: merged.timestamps[..usable].to_vec(),
        columns: merged
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: c.values[..usable].to_vec(),
            })
            .collect(),
        future,
        targets,
    };

    log::info!(
        "labeled {} rows against {} (horizon {}, {} tail rows dropped)",
        labeled.rows(),
        predict_asset,
        horizon,
        merged.rows() - usable
    );
    Ok(labeled)
}
