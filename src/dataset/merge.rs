use std::collections::HashMap;

use itertools::Itertools;

use crate::data::AssetSeries;

// ============================================================================
// MergedFrame: one time-indexed table across all assets
// ============================================================================

/// A named feature column. NAN marks cells where the source asset has no
/// kline at that timestamp.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Join of every asset's (close, volume) columns over the sorted union of
/// their timestamps.
#[derive(Debug, Clone)]
pub struct MergedFrame {
    /// Ascending, distinct
    pub timestamps: Vec<i64>,
    /// `{asset}_close`, `{asset}_volume` per asset, in input asset order
    pub columns: Vec<Column>,
}

impl MergedFrame {
    pub fn rows(&self) -> usize {
        self.timestamps.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Outer-join all series on their time index. Only close and volume survive,
/// renamed to asset-qualified column names so they cannot collide. For a
/// fixed input set the result does not depend on the order of `series`
/// beyond column ordering.
pub fn merge_assets(series: &[AssetSeries]) -> MergedFrame {
    let timestamps: Vec<i64> = series
        .iter()
        .flat_map(|s| s.timestamps.iter().copied())
        .sorted()
        .dedup()
        .collect();

    let row_of: HashMap<i64, usize> = timestamps
        .iter()
        .enumerate()
        .map(|(row, ts)| (*ts, row))
        .collect();

    let mut columns = Vec::with_capacity(series.len() * 2);
    for s in series {
        let mut close = vec![f64::NAN; timestamps.len()];
        let mut volume = vec![f64::NAN; timestamps.len()];
        for (i, ts) in s.timestamps.iter().enumerate() {
            let row = row_of[ts];
            close[row] = s.close_prices[i];
            volume[row] = s.volumes[i];
        }
        columns.push(Column {
            name: format!("{}_close", s.asset),
            values: close,
        });
        columns.push(Column {
            name: format!("{}_volume", s.asset),
            values: volume,
        });
    }

    log::info!(
        "merged {} assets into {} rows x {} columns",
        series.len(),
        timestamps.len(),
        columns.len()
    );

    MergedFrame {
        timestamps,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawKline;

    fn series(asset: &str, rows: &[(i64, f64, f64)]) -> AssetSeries {
        let klines = rows
            .iter()
            .map(|(ts, close, volume)| RawKline::new(*ts, 0.0, 0.0, 0.0, *close, *volume))
            .collect();
        AssetSeries::from_rows(asset, klines)
    }

    #[test]
    fn test_outer_join_leaves_gaps_as_nan() {
        let a = series("AAA", &[(10, 1.0, 5.0), (20, 2.0, 6.0)]);
        let b = series("BBB", &[(20, 3.0, 7.0), (30, 4.0, 8.0)]);

        let merged = merge_assets(&[a, b]);
        assert_eq!(merged.timestamps, vec![10, 20, 30]);
        assert_eq!(merged.columns.len(), 4);

        let a_close = merged.column("AAA_close").unwrap();
        assert_eq!(a_close.values[0], 1.0);
        assert_eq!(a_close.values[1], 2.0);
        assert!(a_close.values[2].is_nan(), "AAA has no kline at t=30");

        let b_volume = merged.column("BBB_volume").unwrap();
        assert!(b_volume.values[0].is_nan());
        assert_eq!(b_volume.values[2], 8.0);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = series("AAA", &[(10, 1.0, 5.0), (20, 2.0, 6.0)]);
        let b = series("BBB", &[(15, 3.0, 7.0), (20, 4.0, 8.0)]);

        let ab = merge_assets(&[a.clone(), b.clone()]);
        let ba = merge_assets(&[b, a]);

        assert_eq!(ab.timestamps, ba.timestamps);
        for column in &ab.columns {
            let other = ba.column(&column.name).expect("column set must match");
            for (x, y) in column.values.iter().zip(other.values.iter()) {
                assert!(
                    (x.is_nan() && y.is_nan()) || x == y,
                    "{} diverges between orders",
                    column.name
                );
            }
        }
    }

    #[test]
    fn test_merge_empty_input() {
        let merged = merge_assets(&[]);
        assert_eq!(merged.rows(), 0);
        assert!(merged.columns.is_empty());
    }
}
