//! Historical return tables keyed by time-horizon bucket

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Available time-horizon buckets, in years
pub const HORIZON_BUCKETS: [u32; 6] = [5, 10, 15, 20, 25, 30];

/// Select the nearest available horizon bucket by minimal absolute difference.
/// Ties resolve to the smaller horizon.
pub fn nearest_horizon_bucket(horizon_years: f64) -> u32 {
    HORIZON_BUCKETS
        .iter()
        .copied()
        .fold(HORIZON_BUCKETS[0], |best, candidate| {
            let best_distance = (best as f64 - horizon_years).abs();
            let candidate_distance = (candidate as f64 - horizon_years).abs();
            if candidate_distance < best_distance {
                candidate
            } else {
                best
            }
        })
}

/// Observed annual returns per asset class, bucketed by investment horizon
///
/// Each bucket maps to an ordered list of annual return percentages; an
/// allocation entry references a position in that list. Asset ordering:
/// 0 = equities, 1 = government bonds, 2 = real estate, 3 = commodities,
/// 4 = crypto, 5 = cash deposits.
#[derive(Debug, Clone)]
pub struct HistoricalReturnsTable {
    by_horizon: HashMap<u32, Vec<f64>>,
}

impl HistoricalReturnsTable {
    /// Build a table from explicit per-horizon rows
    pub fn new(by_horizon: HashMap<u32, Vec<f64>>) -> Self {
        Self { by_horizon }
    }

    /// In-memory table of long-run observed returns, so the engine runs
    /// without any data files present
    pub fn default_observed() -> Self {
        let mut by_horizon = HashMap::new();
        by_horizon.insert(5, vec![8.2, 3.1, 6.0, 4.2, 24.0, 1.8]);
        by_horizon.insert(10, vec![9.1, 3.5, 6.4, 4.0, 18.5, 2.0]);
        by_horizon.insert(15, vec![9.6, 3.8, 6.8, 3.9, 14.0, 2.1]);
        by_horizon.insert(20, vec![10.2, 4.1, 7.1, 3.8, 11.0, 2.2]);
        by_horizon.insert(25, vec![10.4, 4.3, 7.3, 3.7, 9.0, 2.3]);
        by_horizon.insert(30, vec![10.8, 4.5, 7.5, 3.6, 7.5, 2.4]);
        Self { by_horizon }
    }

    /// Load a table from `historical_returns.csv` in the given directory
    ///
    /// Expected columns: horizon_years, asset_index, annual_return
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path.join("historical_returns.csv"))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut by_horizon: HashMap<u32, Vec<f64>> = HashMap::new();

        for result in reader.records() {
            let record = result?;
            let horizon: u32 = record[0].parse()?;
            let index: usize = record[1].parse()?;
            let rate: f64 = record[2].parse()?;

            let row = by_horizon.entry(horizon).or_default();
            if row.len() <= index {
                row.resize(index + 1, 0.0);
            }
            row[index] = rate;
        }

        Ok(Self { by_horizon })
    }

    /// Annual return for an asset position within a horizon bucket.
    /// Missing buckets or positions are degraded data, not errors.
    pub fn asset_return(&self, bucket: u32, asset_index: usize) -> Option<f64> {
        self.by_horizon
            .get(&bucket)
            .and_then(|row| row.get(asset_index))
            .copied()
    }

    /// Number of horizon buckets present
    pub fn len(&self) -> usize {
        self.by_horizon.len()
    }

    /// Check if the table has no buckets
    pub fn is_empty(&self) -> bool {
        self.by_horizon.is_empty()
    }
}

impl Default for HistoricalReturnsTable {
    fn default() -> Self {
        Self::default_observed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_bucket_exact() {
        assert_eq!(nearest_horizon_bucket(5.0), 5);
        assert_eq!(nearest_horizon_bucket(30.0), 30);
    }

    #[test]
    fn test_nearest_bucket_rounds_to_closest() {
        assert_eq!(nearest_horizon_bucket(6.0), 5);
        assert_eq!(nearest_horizon_bucket(9.0), 10);
        assert_eq!(nearest_horizon_bucket(28.0), 30);
        assert_eq!(nearest_horizon_bucket(60.0), 30);
        assert_eq!(nearest_horizon_bucket(0.0), 5);
    }

    #[test]
    fn test_nearest_bucket_tie_prefers_smaller() {
        assert_eq!(nearest_horizon_bucket(7.5), 5);
        assert_eq!(nearest_horizon_bucket(22.5), 20);
        assert_eq!(nearest_horizon_bucket(27.5), 25);
    }

    #[test]
    fn test_missing_bucket_is_none() {
        let table = HistoricalReturnsTable::default_observed();
        assert!(table.asset_return(7, 0).is_none());
        assert!(table.asset_return(10, 99).is_none());
        assert!(table.asset_return(10, 0).is_some());
    }
}
