//! Yahoo Finance chart API adapter.
//!
//! Requests `/v8/finance/chart/{symbol}` with an explicit `period1`/`period2`
//! span and `interval=1d`, and keeps only the timestamp and close of each bar.
//! `range=max` is not used: the API coarsens the bar size for long ranges.

use crate::domain::error::MarketPerfError;
use crate::domain::price_series::PricePoint;
use crate::domain::run_config::ProviderConfig;
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 1900-01-01T00:00:00Z, earlier than any series the API serves.
const EARLIEST_PERIOD: i64 = -2_208_988_800;
const DAILY: &str = "1d";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    gmtoffset: Option<i64>,
    data_granularity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn provider_error(symbol: &str, reason: impl Into<String>) -> MarketPerfError {
    MarketPerfError::Provider {
        symbol: symbol.to_string(),
        reason: reason.into(),
    }
}

/// Decode a chart response body into close points.
///
/// Bars are dated in the exchange's local calendar. Bars with a null close
/// are dropped.
pub fn parse_chart(symbol: &str, body: &str) -> Result<Vec<PricePoint>, MarketPerfError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| provider_error(symbol, format!("invalid chart response: {e}")))?;
    chart_points(symbol, response)
}

fn chart_points(
    symbol: &str,
    response: ChartResponse,
) -> Result<Vec<PricePoint>, MarketPerfError> {
    if let Some(err) = response.chart.error {
        return Err(provider_error(
            symbol,
            format!("{}: {}", err.code, err.description),
        ));
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(MarketPerfError::NoData {
            symbol: symbol.to_string(),
        });
    };

    match data.meta.data_granularity.as_deref() {
        Some(granularity) if granularity != DAILY => {
            return Err(provider_error(
                symbol,
                format!("expected daily bars, got {granularity}"),
            ));
        }
        _ => {}
    }

    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let offset = data.meta.gmtoffset.unwrap_or(0);
    let points = data
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close?;
            let date = DateTime::from_timestamp(ts.checked_add(offset)?, 0)?.date_naive();
            Some(PricePoint::new(date, close))
        })
        .collect();

    Ok(points)
}

pub struct YahooChartAdapter {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl YahooChartAdapter {
    pub fn new(config: &ProviderConfig) -> Result<Self, MarketPerfError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| provider_error("*", format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Daily bars for `symbol` from the earliest available date up to `until`.
    pub fn chart_url(&self, symbol: &str, until: DateTime<Utc>) -> Result<Url, MarketPerfError> {
        let base_error = |reason: String| provider_error(symbol, reason);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| base_error(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| base_error(format!("base url {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("period1", &EARLIEST_PERIOD.to_string())
            .append_pair("period2", &until.timestamp().to_string())
            .append_pair("interval", DAILY);
        Ok(url)
    }
}

impl MarketDataPort for YahooChartAdapter {
    fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketPerfError> {
        let url = self.chart_url(symbol, Utc::now())?;
        debug!(%url, "requesting chart");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| provider_error(symbol, format!("request failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| provider_error(symbol, format!("failed to read body: {e}")))?;

        // Unknown symbols come back as a 404 with a chart.error body; prefer
        // that description over the bare status.
        let response: ChartResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(_) if !status.is_success() => {
                return Err(provider_error(symbol, format!("HTTP {status}")));
            }
            Err(e) => {
                return Err(provider_error(symbol, format!("invalid chart response: {e}")));
            }
        };
        chart_points(symbol, response)
    }
}
