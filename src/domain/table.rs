//! Uniform tables of instrument metrics.
//!
//! Records are coerced column by column into typed cells: label columns stay
//! text, every other column becomes `Option<f64>` and anything that does not
//! parse as a finite number turns into `None`.

use crate::domain::format::{fmt_integer_krw, fmt_percent, fmt_price_or_change};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Ticker,
    Name,
    Sector,
    Price,
    Yield,
    Change,
    ChangePct,
    PriceKrw,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Ticker => "Ticker",
            Column::Name => "Name",
            Column::Sector => "Sector",
            Column::Price => "Price",
            Column::Yield => "Yield",
            Column::Change => "Change",
            Column::ChangePct => "Change %",
            Column::PriceKrw => "Price_KRW",
        }
    }

    pub fn is_label(self) -> bool {
        matches!(self, Column::Ticker | Column::Name | Column::Sector)
    }

    pub fn format(self, value: Option<f64>) -> String {
        match self {
            Column::ChangePct => fmt_percent(value),
            Column::PriceKrw => fmt_integer_krw(value),
            _ => fmt_price_or_change(value),
        }
    }
}

/// Column set of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Indices, ETFs and commodities: price with KRW conversion.
    Priced,
    /// Single stocks listed by ticker only.
    MegaCap,
    Fx,
    Rates,
    /// Sector ETFs ranked by percentage change.
    SectorSummary,
}

impl Layout {
    pub fn columns(self) -> &'static [Column] {
        use Column::*;
        match self {
            Layout::Priced => &[Ticker, Name, Price, Change, ChangePct, PriceKrw],
            Layout::MegaCap => &[Ticker, Price, Change, ChangePct, PriceKrw],
            Layout::Fx => &[Ticker, Name, Price, Change, ChangePct],
            Layout::Rates => &[Ticker, Name, Yield, Change, ChangePct],
            Layout::SectorSummary => &[Ticker, Sector, ChangePct],
        }
    }

    pub fn converts_currency(self) -> bool {
        matches!(self, Layout::Priced | Layout::MegaCap)
    }
}

/// A value before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawValue::Missing, RawValue::Number)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One unvalidated row: column/value pairs in any order.
pub type Record = Vec<(Column, RawValue)>;

pub fn coerce_numeric(value: &RawValue) -> Option<f64> {
    let n = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Missing => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_label(value: &RawValue) -> String {
    match value {
        RawValue::Text(s) => s.clone(),
        RawValue::Number(n) => n.to_string(),
        RawValue::Missing => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Label(String),
    Number(Option<f64>),
}

impl Cell {
    pub fn display(&self, column: Column) -> String {
        match self {
            Cell::Label(s) => s.clone(),
            Cell::Number(v) => column.format(*v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub layout: Layout,
    pub rows: Vec<Vec<Cell>>,
}

pub fn build_table(layout: Layout, records: &[Record]) -> Table {
    let mut rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            layout
                .columns()
                .iter()
                .map(|&col| {
                    let raw = record
                        .iter()
                        .find(|(c, _)| *c == col)
                        .map(|(_, v)| v)
                        .unwrap_or(&RawValue::Missing);
                    if col.is_label() {
                        Cell::Label(coerce_label(raw))
                    } else {
                        Cell::Number(coerce_numeric(raw))
                    }
                })
                .collect()
        })
        .collect();

    if layout == Layout::SectorSummary {
        let idx = column_index(layout, Column::ChangePct);
        rows.sort_by(|a, b| descending_nulls_last(number_at(a, idx), number_at(b, idx)));
    }

    Table { layout, rows }
}

fn column_index(layout: Layout, column: Column) -> Option<usize> {
    layout.columns().iter().position(|c| *c == column)
}

fn number_at(row: &[Cell], idx: Option<usize>) -> Option<f64> {
    match idx.and_then(|i| row.get(i)) {
        Some(Cell::Number(v)) => *v,
        _ => None,
    }
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Table {
    pub fn columns(&self) -> &'static [Column] {
        self.layout.columns()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.header()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw numeric value at `row` for `column`, if that column is present.
    pub fn number(&self, row: usize, column: Column) -> Option<f64> {
        number_at(self.rows.get(row)?, column_index(self.layout, column))
    }

    pub fn label(&self, row: usize, column: Column) -> Option<&str> {
        let idx = column_index(self.layout, column)?;
        match self.rows.get(row)?.get(idx)? {
            Cell::Label(s) => Some(s.as_str()),
            Cell::Number(_) => None,
        }
    }

    /// Display strings for every row, in column order.
    pub fn formatted_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.columns())
                    .map(|(cell, &col)| cell.display(col))
                    .collect()
            })
            .collect()
    }

    /// Plain-text grid: right-aligned fixed-width columns, header row, no index.
    pub fn to_text(&self) -> String {
        let headers = self.headers();
        let body = self.formatted_rows();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                body.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_line = join_padded(headers.iter().copied(), &widths);
        let lines = body
            .iter()
            .map(|r| join_padded(r.iter().map(String::as_str), &widths));

        std::iter::once(header_line)
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:>w$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(ticker: &str, pct: Option<f64>) -> Record {
        vec![
            (Column::Ticker, ticker.into()),
            (Column::Sector, format!("{ticker} sector").as_str().into()),
            (Column::ChangePct, pct.into()),
        ]
    }

    #[test]
    fn coerce_numeric_rules() {
        assert_eq!(coerce_numeric(&RawValue::Number(1.5)), Some(1.5));
        assert_eq!(coerce_numeric(&RawValue::Text(" 2.25 ".into())), Some(2.25));
        assert_eq!(coerce_numeric(&RawValue::Text("n/a".into())), None);
        assert_eq!(coerce_numeric(&RawValue::Number(f64::NAN)), None);
        assert_eq!(coerce_numeric(&RawValue::Missing), None);
    }

    #[test]
    fn columns_follow_layout_order() {
        let record = vec![
            (Column::PriceKrw, RawValue::Number(1_350_000.0)),
            (Column::Price, RawValue::Number(1000.0)),
            (Column::Ticker, "SPY".into()),
        ];
        let table = build_table(Layout::MegaCap, &[record]);
        assert_eq!(table.headers(), vec!["Ticker", "Price", "Change", "Change %", "Price_KRW"]);
        assert_eq!(table.label(0, Column::Ticker), Some("SPY"));
        assert_eq!(table.number(0, Column::Price), Some(1000.0));
        assert_eq!(table.number(0, Column::Change), None);
        assert_eq!(table.number(0, Column::Name), None);
    }

    #[test]
    fn unparseable_numeric_becomes_missing() {
        let record = vec![
            (Column::Ticker, "^TNX".into()),
            (Column::Yield, RawValue::Text("--".into())),
        ];
        let table = build_table(Layout::Rates, &[record]);
        assert_eq!(table.number(0, Column::Yield), None);
    }

    #[test]
    fn sector_summary_sorts_descending_nulls_last() {
        let records = vec![
            sector("A", Some(1.2)),
            sector("B", None),
            sector("C", Some(-0.5)),
            sector("D", Some(3.0)),
        ];
        let table = build_table(Layout::SectorSummary, &records);
        let order: Vec<_> = (0..4).map(|i| table.label(i, Column::Ticker).unwrap()).collect();
        assert_eq!(order, vec!["D", "A", "C", "B"]);
    }

    #[test]
    fn sector_summary_ties_keep_input_order() {
        let records = vec![
            sector("X1", Some(0.5)),
            sector("X2", None),
            sector("X3", Some(0.5)),
            sector("X4", None),
        ];
        let table = build_table(Layout::SectorSummary, &records);
        let order: Vec<_> = (0..4).map(|i| table.label(i, Column::Ticker).unwrap()).collect();
        assert_eq!(order, vec!["X1", "X3", "X2", "X4"]);
    }

    #[test]
    fn other_layouts_keep_insertion_order() {
        let records = vec![
            vec![(Column::Ticker, "B".into()), (Column::ChangePct, RawValue::Number(-1.0))],
            vec![(Column::Ticker, "A".into()), (Column::ChangePct, RawValue::Number(5.0))],
        ];
        let table = build_table(Layout::Fx, &records);
        assert_eq!(table.label(0, Column::Ticker), Some("B"));
    }

    #[test]
    fn to_text_right_aligns_columns() {
        let records = vec![
            vec![
                (Column::Ticker, "KRW=X".into()),
                (Column::Name, "USD/KRW".into()),
                (Column::Price, RawValue::Number(1385.24)),
                (Column::Change, RawValue::Number(-2.0)),
                (Column::ChangePct, RawValue::Number(-0.1442)),
            ],
            vec![(Column::Ticker, "JPY=X".into()), (Column::Name, "USD/JPY".into())],
        ];
        let text = build_table(Layout::Fx, &records).to_text();
        let expected = "Ticker    Name   Price Change Change %\n \
                        KRW=X USD/KRW 1,385.2   -2.0    -0.1%\n \
                        JPY=X USD/JPY                        ";
        assert_eq!(text, expected);
    }
}
