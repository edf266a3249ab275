use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::yahoo::{ChartResponse, YahooClient};
use crate::models::config::{Interval, Period};
use crate::models::series::{PriceBar, PriceSeries};
use crate::utils::errors::ChartError;

/// Fetch historical OHLCV bars for a symbol.
///
/// An empty result is reported as a fetch failure, never as an empty series.
pub async fn fetch_price_series(
    client: &YahooClient,
    symbol: &str,
    period: Period,
    interval: Interval,
) -> Result<PriceSeries, ChartError> {
    if symbol.trim().is_empty() {
        return Err(ChartError::Fetch("Symbol cannot be empty".to_string()));
    }

    let response = client
        .get_chart(symbol, period.as_str(), interval.as_str())
        .await?;

    let series = series_from_response(response, interval)?;
    info!("Fetched {} bars for {} ({} / {})", series.len(), symbol, period, interval);
    Ok(series)
}

/// Convert a chart payload into a series.
///
/// Bars without a close are skipped. Timestamps are shifted to the exchange's
/// wall clock; non-intraday bars are pinned to midnight of their trading day.
pub fn series_from_response(response: ChartResponse, interval: Interval) -> Result<PriceSeries, ChartError> {
    if let Some(err) = response.chart.error {
        return Err(ChartError::Fetch(format!("{} ({})", err.description, err.code)));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ChartError::Fetch("Provider returned no result".to_string()))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmt_offset;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (idx, &ts) in result.timestamp.iter().enumerate() {
        let Some(close) = quote.close_at(idx) else {
            debug!("Skipping bar {} of {}: no close", idx, result.meta.symbol);
            continue;
        };
        let Some(timestamp) = exchange_time(ts, offset, interval) else {
            continue;
        };

        bars.push(PriceBar {
            timestamp,
            open: quote.open_at(idx).unwrap_or(close),
            high: quote.high_at(idx).unwrap_or(close),
            low: quote.low_at(idx).unwrap_or(close),
            close,
            volume: quote.volume_at(idx).unwrap_or(0.0),
        });
    }

    let series = PriceSeries::new(bars);
    if series.is_empty() {
        return Err(ChartError::Fetch(format!(
            "No price data found for {}",
            result.meta.symbol
        )));
    }

    Ok(series)
}

fn exchange_time(unix_seconds: i64, gmt_offset: i64, interval: Interval) -> Option<DateTime<Utc>> {
    let local = DateTime::<Utc>::from_timestamp(unix_seconds + gmt_offset, 0)?;
    if interval.is_intraday() {
        Some(local)
    } else {
        let midnight = local.date_naive().and_hms_opt(0, 0, 0)?;
        Some(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn response(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    const DAILY: &str = r#"{"chart":{"result":[{
        "meta":{"symbol":"AAPL","currency":"USD","gmtoffset":-14400,"exchangeTimezoneName":"America/New_York"},
        "timestamp":[1685453400,1685539800,1685626200],
        "indicators":{"quote":[{
            "open":[177.3,177.7,177.7],
            "high":[179.35,179.35,180.12],
            "low":[176.76,176.57,176.93],
            "close":[177.3,177.25,180.09],
            "volume":[55964400,99625300,68901800]
        }]}
    }],"error":null}}"#;

    #[test]
    fn test_daily_response_becomes_ascending_midnight_bars() {
        let series = series_from_response(response(DAILY), Interval::Daily).unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.bars().windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(
            series.bars()[2].timestamp,
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(series.bars()[2].close, 180.09);
        assert_eq!(series.bars()[1].volume, 99625300.0);
    }

    #[test]
    fn test_hourly_bars_keep_exchange_wall_clock() {
        let series = series_from_response(response(DAILY), Interval::Hourly).unwrap();
        let first = series.bars()[0].timestamp;
        assert_eq!((first.hour(), first.minute()), (9, 30));
    }

    #[test]
    fn test_null_closes_are_skipped() {
        let json = r#"{"chart":{"result":[{
            "meta":{"symbol":"BTC-USD","gmtoffset":0},
            "timestamp":[1700000000,1700086400],
            "indicators":{"quote":[{"close":[null,37000.5],"volume":[null,null]}]}
        }],"error":null}}"#;
        let series = series_from_response(response(json), Interval::Daily).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.bars()[0].open, 37000.5);
        assert_eq!(series.bars()[0].volume, 0.0);
    }

    #[test]
    fn test_provider_error_and_empty_results_fail() {
        let not_found = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = series_from_response(response(not_found), Interval::Daily).unwrap_err();
        assert!(matches!(err, ChartError::Fetch(ref msg) if msg.contains("delisted")));

        let empty = r#"{"chart":{"result":[{"meta":{"symbol":"ZZZZ"},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(matches!(
            series_from_response(response(empty), Interval::Daily),
            Err(ChartError::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_symbol_is_rejected_before_fetching() {
        let client = YahooClient::with_base_url("not a url".to_string());
        let err = fetch_price_series(&client, "  ", Period::OneYear, Interval::Daily)
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::Fetch(ref msg) if msg == "Symbol cannot be empty"));
        assert_eq!(err.to_string(), "Error loading data: Symbol cannot be empty");
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_fetch_error() {
        let client = YahooClient::with_base_url("not a url".to_string());
        let err = fetch_price_series(&client, "AAPL", Period::OneYear, Interval::Daily)
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::Fetch(_)));
    }
}
