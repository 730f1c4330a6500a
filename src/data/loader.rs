use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::domain::{PrepError, RawKline};

/// Fixed column order of every input row: time,low,high,open,close,volume
const FIELDS_PER_ROW: usize = 6;

// ============================================================================
// AssetSeries: raw time series data for one asset
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AssetSeries {
    pub asset: String,

    pub timestamps: Vec<i64>,

    // Prices
    pub low_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub open_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    // Volumes
    pub volumes: Vec<f64>,
}

impl AssetSeries {
    /// Build a series from parsed rows, sorted timestamp-ascending.
    pub fn from_rows(asset: impl Into<String>, mut rows: Vec<RawKline>) -> Self {
        rows.sort_by_key(|k| k.timestamp);

        let mut series = AssetSeries {
            asset: asset.into(),
            ..Default::default()
        };
        for row in rows {
            series.timestamps.push(row.timestamp);
            series.low_prices.push(row.low);
            series.high_prices.push(row.high);
            series.open_prices.push(row.open);
            series.close_prices.push(row.close);
            series.volumes.push(row.volume);
        }
        series
    }

    pub fn klines(&self) -> usize {
        self.timestamps.len()
    }

    pub fn kline(&self, idx: usize) -> RawKline {
        RawKline::new(
            self.timestamps[idx],
            self.low_prices[idx],
            self.high_prices[idx],
            self.open_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }
}

// ============================================================================
// Discovery and parsing
// ============================================================================

/// Enumerate csv files in `dir`; the file name minus extension is the asset
/// identifier. Identifiers are sorted lexicographically so downstream column
/// order does not depend on platform directory-listing order.
pub fn discover_assets(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| PrepError::Io {
        path: dir.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PrepError::Io {
            path: dir.to_path_buf(),
            detail: e.to_string(),
        })?;
        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
            _ => continue,
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        found.push((stem.to_string(), path));
    }

    found.sort();
    Ok(found)
}

/// Parse one headerless six-field csv into a column-oriented series.
pub fn load_asset(asset: &str, path: &Path) -> Result<AssetSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // field-count mismatches are reported by us, with a line number
        .from_path(path)
        .map_err(|e| PrepError::Io {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = result.map_err(|e| PrepError::Format {
            what: format!("{} line {}", path.display(), line),
            detail: e.to_string(),
        })?;
        if record.len() != FIELDS_PER_ROW {
            return Err(PrepError::Format {
                what: format!("{} line {}", path.display(), line),
                detail: format!("expected {} fields, got {}", FIELDS_PER_ROW, record.len()),
            }
            .into());
        }

        let timestamp: i64 = parse_field(&record, 0, "time", path, line)?;
        let low: f64 = parse_field(&record, 1, "low", path, line)?;
        let high: f64 = parse_field(&record, 2, "high", path, line)?;
        let open: f64 = parse_field(&record, 3, "open", path, line)?;
        let close: f64 = parse_field(&record, 4, "close", path, line)?;
        let volume: f64 = parse_field(&record, 5, "volume", path, line)?;

        rows.push(RawKline::new(timestamp, low, high, open, close, volume));
    }

    let non_finite = rows.iter().filter(|k| !k.is_finite()).count();
    if non_finite > 0 {
        log::warn!(
            "{}: {} rows carry non-finite values; they will be dropped during cleaning",
            asset,
            non_finite
        );
    }

    Ok(AssetSeries::from_rows(asset, rows))
}

/// Load every asset csv found under `dir`, in lexicographic asset order.
/// A malformed file aborts the entire run.
pub fn load_assets(dir: &Path) -> Result<Vec<AssetSeries>> {
    let found = discover_assets(dir)?;
    if found.is_empty() {
        log::warn!("no csv files found in {}", dir.display());
    }

    let mut all = Vec::with_capacity(found.len());
    for (asset, path) in &found {
        let series =
            load_asset(asset, path).with_context(|| format!("while loading asset {}", asset))?;
        log::info!("{}: {} klines", asset, series.klines());
        all.push(series);
    }
    Ok(all)
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    path: &Path,
    line: usize,
) -> Result<T, PrepError> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim().parse::<T>().map_err(|_| PrepError::Format {
        what: format!("{} line {}", path.display(), line),
        detail: format!("field `{}` is not numeric: {:?}", name, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_assets_sorted_and_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "ETH-USD.csv",
            "100,9.0,11.0,10.0,10.5,3.0\n160,10.0,12.0,10.5,11.0,4.0\n",
        );
        write_csv(
            dir.path(),
            "BTC-USD.csv",
            "160,95.0,105.0,100.0,101.0,1.0\n100,94.0,104.0,99.0,100.0,2.0\n",
        );
        write_csv(dir.path(), "notes.txt", "not a data file");

        let assets = load_assets(dir.path()).unwrap();
        assert_eq!(assets.len(), 2, "txt file must be ignored");
        assert_eq!(assets[0].asset, "BTC-USD", "assets sorted lexicographically");
        assert_eq!(assets[1].asset, "ETH-USD");

        // BTC rows were written out of order; loading must sort them
        assert_eq!(assets[0].timestamps, vec![100, 160]);
        let first = assets[0].kline(0);
        assert_eq!(first.close, 100.0);
        assert_eq!(first.volume, 2.0);
    }

    #[test]
    fn test_malformed_row_aborts_with_line_number() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "BAD-USD.csv",
            "100,1.0,2.0,1.5,1.8,10.0\n160,1.0,2.0,1.5\n",
        );

        let err = load_assets(dir.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"), "got: {}", message);
    }

    #[test]
    fn test_non_numeric_field_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "BAD-USD.csv", "100,1.0,2.0,abc,1.8,10.0\n");

        let err = load_assets(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("open"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = load_assets(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.downcast_ref::<PrepError>().is_some());
        assert!(matches!(
            err.downcast_ref::<PrepError>().unwrap(),
            PrepError::Io { .. }
        ));
    }
}
