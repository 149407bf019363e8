//! Close-pair selection and day-over-day change arithmetic.
//!
//! Missing data is `None` all the way through: a value that cannot be
//! derived is never defaulted to zero.

use crate::domain::diagnostics::Diagnostics;
use crate::ports::quote_port::QuotePort;

/// Symbols whose provider quote is ten times the actual percentage yield.
pub const YIELD_SCALED_SYMBOLS: &[&str] = &["^IRX", "^FVX", "^TNX", "^TYX"];

/// The two most recent valid closes of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClosePair {
    pub last: Option<f64>,
    pub previous: Option<f64>,
}

impl ClosePair {
    pub fn new(last: Option<f64>, previous: Option<f64>) -> Self {
        Self { last, previous }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    /// Absolute and percentage change of `last` over `previous`.
    pub fn change(&self) -> PriceChange {
        let (change, change_pct) = change_and_percent(self.last, self.previous);
        PriceChange {
            last: self.last,
            change,
            change_pct,
        }
    }

    /// Applies the yield scale correction to both readings.
    pub fn normalized(&self, symbol: &str) -> Self {
        Self {
            last: normalize(symbol, self.last),
            previous: normalize(symbol, self.previous),
        }
    }
}

/// Last value plus its change against the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceChange {
    pub last: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

/// Picks the latest two non-missing closes from a time-ordered series.
///
/// Gaps are skipped, so a missing session in the middle of the window does
/// not hide the prior close. A single valid close is kept as `last`.
pub fn select_recent_closes(series: &[Option<f64>]) -> ClosePair {
    let mut valid = series.iter().rev().filter_map(|c| *c).filter(|c| !c.is_nan());
    let last = valid.next();
    let previous = valid.next();
    ClosePair { last, previous }
}

pub fn change_and_percent(last: Option<f64>, previous: Option<f64>) -> (Option<f64>, Option<f64>) {
    let change = match (last, previous) {
        (Some(l), Some(p)) => Some(l - p),
        _ => None,
    };
    let pct = match (change, previous) {
        (Some(c), Some(p)) if p != 0.0 => Some(c / p * 100.0),
        _ => None,
    };
    (change, pct)
}

pub fn to_secondary_currency(value: Option<f64>, rate: Option<f64>) -> Option<f64> {
    Some(value? * rate?)
}

pub fn is_yield_scaled(symbol: &str) -> bool {
    YIELD_SCALED_SYMBOLS.contains(&symbol)
}

pub fn normalize(symbol: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if is_yield_scaled(symbol) => Some(v / 10.0),
        other => other,
    }
}

/// Fetches a trailing window for `symbol` and reduces it to a [`ClosePair`].
///
/// Provider failures are logged and recorded in `diagnostics`, then
/// downgraded to a missing pair so one bad symbol never aborts the run.
pub fn fetch_recent_closes(
    port: &dyn QuotePort,
    symbol: &str,
    lookback_days: u32,
    diagnostics: &mut Diagnostics,
) -> ClosePair {
    let series = match port.fetch_daily_closes(symbol, lookback_days) {
        Ok(series) => series,
        Err(e) => {
            tracing::warn!(symbol, error = %e, "quote fetch failed");
            diagnostics.error(symbol, e.to_string());
            return ClosePair::missing();
        }
    };

    if series.is_empty() {
        tracing::warn!(symbol, "history empty");
        diagnostics.warn(symbol, "history empty (len=0)");
        return ClosePair::missing();
    }

    let pair = select_recent_closes(&series);
    match (pair.last, pair.previous) {
        (Some(last), Some(prev)) => {
            tracing::debug!(symbol, last, prev, "closes fetched");
            diagnostics.ok(symbol, format!("last={last}, prev={prev}"));
        }
        (Some(last), None) => {
            tracing::info!(symbol, last, "only one valid close");
            diagnostics.info(symbol, format!("closes len=1, last={last}"));
        }
        (None, _) => {
            tracing::warn!(symbol, sessions = series.len(), "no valid closes");
            diagnostics.warn(symbol, "closes len=0");
        }
    }
    pair
}
