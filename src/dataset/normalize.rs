use crate::dataset::label::LabeledFrame;
use crate::dataset::merge::Column;
use crate::utils::maths_utils;

// ============================================================================
// NormalizedFrame: percent-changed, z-scaled feature rows
// ============================================================================

#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    pub timestamps: Vec<i64>,
    pub columns: Vec<Column>,
    pub targets: Vec<u8>,
}

impl NormalizedFrame {
    pub fn rows(&self) -> usize {
        self.timestamps.len()
    }

    /// One feature vector per row, in column order, target excluded.
    pub fn feature_row(&self, row: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c.values[row]).collect()
    }
}

/// Normalize one split. Applied to training and validation independently:
/// each split is scaled by its own statistics (see DESIGN.md).
///
/// Per feature column: percent-change from the previous row, then z-scaling
/// by the column's own mean and population standard deviation. Rows where
/// any column's percent-change is non-finite (the first row, gaps, division
/// by zero) are dropped before the statistics are taken. The `future` column
/// is not carried over; it was only needed for labelling.
pub fn normalize(frame: &LabeledFrame) -> NormalizedFrame {
    let changed: Vec<Vec<f64>> = frame
        .columns
        .iter()
        .map(|c| maths_utils::pct_change(&c.values))
        .collect();

    let keep: Vec<bool> = (0..frame.rows())
        .map(|row| changed.iter().all(|col| col[row].is_finite()))
        .collect();
    let kept = keep.iter().filter(|k| **k).count();
    let dropped = frame.rows() - kept;
    if dropped > 0 {
        log::info!("dropped {} rows with undefined percent-change", dropped);
    }

    let timestamps: Vec<i64> = mask_rows(frame.timestamps.iter().copied(), &keep);
    let targets: Vec<u8> = mask_rows(frame.targets.iter().copied(), &keep);

    let columns = frame
        .columns
        .iter()
        .zip(changed)
        .map(|(column, values)| {
            let values: Vec<f64> = mask_rows(values.into_iter(), &keep);
            Column {
                name: column.name.clone(),
                values: scale(&column.name, values),
            }
        })
        .collect();

    NormalizedFrame {
        timestamps,
        columns,
        targets,
    }
}

fn mask_rows<T>(values: impl Iterator<Item = T>, keep: &[bool]) -> Vec<T> {
    values
        .zip(keep.iter())
        .filter(|(_, k)| **k)
        .map(|(v, _)| v)
        .collect()
}

/// Rescale to zero mean and unit variance. A column without spread carries
/// no signal and becomes all zeros.
fn scale(name: &str, values: Vec<f64>) -> Vec<f64> {
    if values.is_empty() {
        return values;
    }
    let (mean, std) = maths_utils::mean_std(&values);
    if std > 0.0 && std.is_finite() {
        values.into_iter().map(|v| (v - mean) / std).collect()
    } else {
        log::warn!("column {} has zero spread, scaling to zeros", name);
        vec![0.0; values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AssetSeries;
    use crate::dataset::label::label_frame;
    use crate::dataset::merge::merge_assets;
    use crate::domain::RawKline;

    fn labeled_from_closes(closes: &[f64]) -> LabeledFrame {
        let klines = closes
            .iter()
            .enumerate()
            .map(|(i, close)| RawKline::new(i as i64 * 60, 0.0, 0.0, 0.0, *close, (i + 1) as f64))
            .collect();
        let merged = merge_assets(&[AssetSeries::from_rows("AAA", klines)]);
        label_frame(&merged, "AAA", 1).unwrap()
    }

    #[test]
    fn test_output_has_zero_mean_unit_variance() {
        let frame = labeled_from_closes(&[10.0, 11.0, 9.5, 12.0, 13.5, 12.5, 14.0, 15.5]);
        let normalized = normalize(&frame);

        // first row dropped by percent-change
        assert_eq!(normalized.rows(), frame.rows() - 1);
        for column in &normalized.columns {
            let n = column.values.len() as f64;
            let mean: f64 = column.values.iter().sum::<f64>() / n;
            let var: f64 = column.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-10, "{} mean {}", column.name, mean);
            assert!((var - 1.0).abs() < 1e-10, "{} var {}", column.name, var);
        }
    }

    #[test]
    fn test_rows_with_undefined_change_are_dropped() {
        // a zero close makes the next row's percent-change undefined
        let frame = labeled_from_closes(&[10.0, 0.0, 12.0, 13.0, 14.0]);
        let normalized = normalize(&frame);
        // rows dropped: first (no predecessor), the 0.0 row's change is
        // defined (-1.0), but the row after it divides by zero
        assert_eq!(normalized.rows(), 2);
    }

    #[test]
    fn test_targets_follow_surviving_rows() {
        let frame = labeled_from_closes(&[1.0, 2.0, 3.0, 2.5]);
        let normalized = normalize(&frame);
        assert_eq!(normalized.targets, frame.targets[1..].to_vec());
        assert_eq!(normalized.timestamps, frame.timestamps[1..].to_vec());
    }

    #[test]
    fn test_feature_row_excludes_target() {
        let frame = labeled_from_closes(&[1.0, 2.0, 3.0, 2.5]);
        let normalized = normalize(&frame);
        assert_eq!(normalized.feature_row(0).len(), normalized.columns.len());
    }
}
