#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use market_briefing::domain::error::BriefingError;
use market_briefing::domain::settings::BriefingSettings;
use market_briefing::ports::quote_port::QuotePort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// In-memory quote source. Unknown symbols return an empty series.
pub struct MockQuotePort {
    pub closes: HashMap<String, Vec<Option<f64>>>,
    pub errors: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            closes: HashMap::new(),
            errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_closes(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.closes
            .insert(symbol.to_string(), closes.iter().copied().map(Some).collect());
        self
    }

    pub fn with_series(mut self, symbol: &str, series: Vec<Option<f64>>) -> Self {
        self.closes.insert(symbol.to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn call_count(&self, symbol: &str) -> usize {
        self.calls.borrow().iter().filter(|s| *s == symbol).count()
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_daily_closes(
        &self,
        symbol: &str,
        _lookback_days: u32,
    ) -> Result<Vec<Option<f64>>, BriefingError> {
        self.calls.borrow_mut().push(symbol.to_string());
        if let Some(reason) = self.errors.get(symbol) {
            return Err(BriefingError::Provider {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.closes.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn run_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-03-04T07:05:00+09:00").unwrap()
}

/// Default settings with every output rooted at `dir`.
pub fn settings_in(dir: &Path) -> BriefingSettings {
    let mut settings = BriefingSettings::default();
    settings.output.base_dir = dir.to_path_buf();
    settings
}
