//! The briefing pipeline: quotes in, formatted section tables out.
//!
//! Stages run strictly forward. Each symbol is fetched at most once per
//! run through a [`QuoteBook`], so derived groups (the sector summary) and
//! the conversion rate reuse earlier fetches.

use crate::domain::diagnostics::Diagnostics;
use crate::domain::quote::{ClosePair, PriceChange, fetch_recent_closes, to_secondary_currency};
use crate::domain::settings::FetchSettings;
use crate::domain::table::{Column, Layout, RawValue, Record, Table, build_table};
use crate::domain::universe::{Instrument, InstrumentGroup};
use crate::ports::quote_port::QuotePort;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;

pub const KST_OFFSET_SECS: i32 = 9 * 3600;

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

pub fn kst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// Close pairs fetched during one run, keyed by symbol.
pub struct QuoteBook<'a> {
    port: &'a dyn QuotePort,
    lookback_days: u32,
    pairs: HashMap<String, ClosePair>,
    diagnostics: Diagnostics,
}

impl<'a> QuoteBook<'a> {
    pub fn new(port: &'a dyn QuotePort, lookback_days: u32) -> Self {
        Self {
            port,
            lookback_days,
            pairs: HashMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn pair(&mut self, symbol: &str) -> ClosePair {
        if let Some(pair) = self.pairs.get(symbol) {
            return *pair;
        }
        let pair = fetch_recent_closes(self.port, symbol, self.lookback_days, &mut self.diagnostics);
        self.pairs.insert(symbol.to_string(), pair);
        pair
    }

    pub fn fetched(&self) -> usize {
        self.pairs.len()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Computed metrics for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentRow {
    pub symbol: String,
    pub label: String,
    pub quote: PriceChange,
    /// Last value in KRW; only set for layouts that carry `Price_KRW`.
    pub secondary: Option<f64>,
}

impl InstrumentRow {
    pub fn compute(instrument: &Instrument, pair: ClosePair, layout: Layout, rate: Option<f64>) -> Self {
        let quote = pair.normalized(instrument.symbol).change();
        let secondary = if layout.converts_currency() {
            to_secondary_currency(quote.last, rate)
        } else {
            None
        };
        Self {
            symbol: instrument.symbol.to_string(),
            label: instrument.label.to_string(),
            quote,
            secondary,
        }
    }

    pub fn record(&self) -> Record {
        vec![
            (Column::Ticker, RawValue::from(self.symbol.as_str())),
            (Column::Name, RawValue::from(self.label.as_str())),
            (Column::Sector, RawValue::from(self.label.as_str())),
            (Column::Price, self.quote.last.into()),
            (Column::Yield, self.quote.last.into()),
            (Column::Change, self.quote.change.into()),
            (Column::ChangePct, self.quote.change_pct.into()),
            (Column::PriceKrw, self.secondary.into()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
    pub table: Table,
}

#[derive(Debug, Clone)]
pub struct Briefing {
    pub generated_at: DateTime<FixedOffset>,
    pub sections: Vec<Section>,
    pub diagnostics: Diagnostics,
    pub include_diagnostics: bool,
}

impl Briefing {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn group_keys(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.key).collect()
    }
}

pub fn build_section(
    book: &mut QuoteBook<'_>,
    group: &InstrumentGroup,
    groups: &[InstrumentGroup],
    rate: Option<f64>,
) -> Section {
    let records: Vec<Record> = group
        .instruments(groups)
        .iter()
        .map(|inst| {
            let pair = book.pair(inst.symbol);
            InstrumentRow::compute(inst, pair, group.layout, rate).record()
        })
        .collect();

    Section {
        key: group.key,
        title: group.title,
        table: build_table(group.layout, &records),
    }
}

/// Runs the whole pipeline for `groups`, in order.
pub fn build_briefing(
    port: &dyn QuotePort,
    groups: &[InstrumentGroup],
    fetch: &FetchSettings,
    generated_at: DateTime<FixedOffset>,
) -> Briefing {
    let mut book = QuoteBook::new(port, fetch.lookback_days);

    let rate = book.pair(&fetch.conversion_symbol).last;
    match rate {
        Some(r) => tracing::info!(symbol = %fetch.conversion_symbol, rate = r, "conversion rate fixed for run"),
        None => tracing::warn!(symbol = %fetch.conversion_symbol, "conversion rate unavailable, KRW prices left blank"),
    }

    let sections = groups
        .iter()
        .map(|group| {
            let section = build_section(&mut book, group, groups, rate);
            tracing::info!(group = group.key, rows = section.table.len(), "section built");
            section
        })
        .collect();

    tracing::info!(symbols = book.fetched(), "quotes collected");

    Briefing {
        generated_at,
        sections,
        diagnostics: book.into_diagnostics(),
        include_diagnostics: true,
    }
}
