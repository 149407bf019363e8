//! Yahoo Finance chart API adapter implementing QuotePort.
//!
//! Requests a trailing daily window from the v8 chart endpoint and returns
//! the unadjusted close series. Yahoo has no official API; any shape it
//! returns that we cannot read is a provider error, which the domain turns
//! into a missing quote.

use crate::domain::error::BriefingError;
use crate::ports::quote_port::QuotePort;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

pub const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

pub struct YahooQuoteAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooQuoteAdapter {
    pub fn new(timeout: Duration) -> Result<Self, BriefingError> {
        Self::with_base_url(CHART_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, BriefingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BriefingError::Provider {
                symbol: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/<symbol>?range=<n>d&interval=1d`, with the symbol percent-encoded
    /// as a single path segment.
    pub fn chart_url(&self, symbol: &str, lookback_days: u32) -> Result<Url, BriefingError> {
        let provider_err = |reason: String| BriefingError::Provider {
            symbol: symbol.to_string(),
            reason,
        };
        let mut url =
            Url::parse(&self.base_url).map_err(|e| provider_err(format!("bad base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| provider_err("base url cannot take a path".into()))?
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", &format!("{lookback_days}d"))
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "false");
        Ok(url)
    }

    /// Extracts the close series from a chart response body.
    pub fn parse_closes(symbol: &str, body: &str) -> Result<Vec<Option<f64>>, BriefingError> {
        let resp: ChartResponse =
            serde_json::from_str(body).map_err(|e| BriefingError::Provider {
                symbol: symbol.to_string(),
                reason: format!("unreadable chart response: {e}"),
            })?;

        if let Some(err) = resp.chart.error {
            if err.code == "Not Found" {
                return Ok(Vec::new());
            }
            return Err(BriefingError::Provider {
                symbol: symbol.to_string(),
                reason: format!(
                    "{}: {}",
                    err.code,
                    err.description.unwrap_or_default()
                ),
            });
        }

        let Some(data) = resp.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };

        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default();

        // Only sessions present in both arrays count.
        let sessions = data.timestamp.map_or(closes.len(), |t| t.len().min(closes.len()));
        Ok(closes.into_iter().take(sessions).collect())
    }
}

impl QuotePort for YahooQuoteAdapter {
    fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<Option<f64>>, BriefingError> {
        let url = self.chart_url(symbol, lookback_days)?;
        tracing::debug!(symbol, %url, "requesting chart");

        let provider_err = |reason: String| BriefingError::Provider {
            symbol: symbol.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| provider_err(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().map_err(|e| provider_err(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            // Unknown symbols come back as 404 with a chart error body.
            return Self::parse_closes(symbol, &body).or(Ok(Vec::new()));
        }
        if !status.is_success() {
            return Err(provider_err(format!("HTTP {status}")));
        }

        Self::parse_closes(symbol, &body)
    }
}
