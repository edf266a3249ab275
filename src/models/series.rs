//! Price series models

use chrono::{DateTime, Utc};

/// One OHLCV row.
///
/// `timestamp` is the wall-clock time at the listing exchange, carried as a
/// `DateTime<Utc>` so that daily bars sit at midnight of their trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Bars ordered by strictly ascending timestamp
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting bars and keeping the first bar of any repeated timestamp
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn max_volume(&self) -> f64 {
        self.bars.iter().map(|b| b.volume).fold(0.0, f64::max)
    }

    /// (min, max) of closing prices, `None` for an empty series
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.bars.is_empty() {
            return None;
        }
        let min = self.bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
        let max = self.bars.iter().map(|b| b.close).fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Index of the bar closest in time to `target`.
    ///
    /// On an exact tie the earlier bar wins.
    pub fn nearest_index(&self, target: DateTime<Utc>) -> Option<usize> {
        self.bars
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| (b.timestamp - target).num_milliseconds().abs())
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(ts: DateTime<Utc>, close: f64, volume: f64) -> PriceBar {
        PriceBar {
            timestamp: ts,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn test_new_sorts_and_drops_repeated_timestamps() {
        let a = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let series = PriceSeries::new(vec![bar(b, 2.0, 10.0), bar(a, 1.0, 5.0), bar(b, 3.0, 7.0)]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].timestamp, a);
        assert_eq!(series.bars()[1].close, 2.0);
        assert!(series.bars().windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_nearest_index_prefers_earlier_bar_on_tie() {
        let nine = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let eleven = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap();
        let series = PriceSeries::new(vec![bar(nine, 10.0, 1.0), bar(eleven, 11.0, 1.0)]);

        let ten = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(series.nearest_index(ten), Some(0));

        let ten_thirty = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(series.nearest_index(ten_thirty), Some(1));
    }

    #[test]
    fn test_nearest_index_outside_range_clamps_to_ends() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let series = PriceSeries::new(vec![bar(a, 1.0, 1.0), bar(b, 2.0, 1.0)]);

        assert_eq!(series.nearest_index(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()), Some(0));
        assert_eq!(series.nearest_index(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()), Some(1));
        assert_eq!(PriceSeries::default().nearest_index(a), None);
    }

    #[test]
    fn test_ranges() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let series = PriceSeries::new(vec![bar(a, 5.0, 300.0), bar(b, 7.5, 900.0)]);

        assert_eq!(series.close_range(), Some((5.0, 7.5)));
        assert_eq!(series.max_volume(), 900.0);
        assert_eq!(PriceSeries::default().close_range(), None);
    }
}
