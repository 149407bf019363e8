//! End-to-end pipeline tests against a mock quote source.

mod common;

use common::*;
use market_briefing::domain::briefing::{build_briefing, build_section, QuoteBook};
use market_briefing::domain::table::{Column, Layout};
use market_briefing::domain::universe::{
    GroupSource, Instrument, InstrumentGroup, STANDARD_GROUPS, USD_KRW,
};

mod two_symbol_group {
    use super::*;

    const PAIR: &[Instrument] = &[
        Instrument { symbol: "X", label: "Ex" },
        Instrument { symbol: "Y", label: "Why" },
    ];

    const GROUP: InstrumentGroup = InstrumentGroup {
        key: "pair",
        title: "pair",
        layout: Layout::Fx,
        source: GroupSource::Instruments(PAIR),
    };

    #[test]
    fn populated_and_empty_rows() {
        let port = MockQuotePort::new().with_closes("X", &[100.0, 110.0]);
        let mut book = QuoteBook::new(&port, 15);
        let section = build_section(&mut book, &GROUP, &[GROUP], None);

        let rows = section.table.formatted_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["X", "Ex", "110.0", "10.0", "+10.0%"]);
        assert_eq!(rows[1], vec!["Y", "Why", "", "", ""]);

        assert_eq!(section.table.number(0, Column::Price), Some(110.0));
        assert_eq!(section.table.number(1, Column::Change), None);
    }

    #[test]
    fn provider_failure_only_blanks_that_row() {
        let port = MockQuotePort::new()
            .with_closes("Y", &[50.0, 49.0])
            .with_error("X", "connection reset");
        let mut book = QuoteBook::new(&port, 15);
        let section = build_section(&mut book, &GROUP, &[GROUP], None);

        let rows = section.table.formatted_rows();
        assert_eq!(rows[0], vec!["X", "Ex", "", "", ""]);
        assert_eq!(rows[1], vec!["Y", "Why", "49.0", "-1.0", "-2.0%"]);

        let diagnostics = book.into_diagnostics();
        assert_eq!(diagnostics.failures(), 1);
        assert!(diagnostics.lines()[0].starts_with("[ERR] X:"));
    }

    #[test]
    fn gaps_in_the_series_are_skipped() {
        let port = MockQuotePort::new()
            .with_series("X", vec![Some(100.0), None, Some(105.0), None]);
        let mut book = QuoteBook::new(&port, 15);
        let section = build_section(&mut book, &GROUP, &[GROUP], None);
        assert_eq!(
            section.table.formatted_rows()[0],
            vec!["X", "Ex", "105.0", "5.0", "+5.0%"]
        );
    }
}

mod standard_universe {
    use super::*;
    use market_briefing::domain::settings::{BriefingSettings, FetchSettings};

    fn fetch() -> FetchSettings {
        BriefingSettings::default().fetch
    }

    #[test]
    fn every_group_in_order() {
        let port = MockQuotePort::new();
        let briefing = build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());
        let keys: Vec<_> = STANDARD_GROUPS.iter().map(|g| g.key).collect();
        assert_eq!(briefing.group_keys(), keys);
    }

    #[test]
    fn conversion_rate_applies_to_priced_groups_only() {
        let port = MockQuotePort::new()
            .with_closes(USD_KRW, &[1_300.0, 1_350.0])
            .with_closes("AAPL", &[200.0, 210.0])
            .with_closes("JPY=X", &[150.0, 151.0]);
        let briefing = build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());

        let megacaps = &briefing.section("megacaps").unwrap().table;
        assert_eq!(megacaps.number(0, Column::PriceKrw), Some(283_500.0));
        assert_eq!(megacaps.formatted_rows()[0][4], "283,500");

        let fx = &briefing.section("fx").unwrap().table;
        assert!(!fx.columns().contains(&Column::PriceKrw));
        assert_eq!(fx.formatted_rows()[1][2], "151.0");
    }

    #[test]
    fn missing_rate_blanks_krw_column() {
        let port = MockQuotePort::new().with_closes("AAPL", &[200.0, 210.0]);
        let briefing = build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());

        let row = &briefing.section("megacaps").unwrap().table.formatted_rows()[0];
        assert_eq!(row, &vec!["AAPL", "210.0", "10.0", "+5.0%", ""]);
    }

    #[test]
    fn each_symbol_fetched_once() {
        let port = MockQuotePort::new().with_closes(USD_KRW, &[1_300.0, 1_350.0]);
        build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());

        assert_eq!(port.call_count(USD_KRW), 1);
        assert_eq!(port.call_count("XLK"), 1);
        let calls = port.calls.borrow();
        let mut unique = calls.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), calls.len());
    }

    #[test]
    fn rates_are_normalized_before_change() {
        let port = MockQuotePort::new()
            .with_closes("^TNX", &[42.0, 43.0])
            .with_closes("^MOVE", &[100.0, 110.0]);
        let briefing = build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());

        let rates = &briefing.section("rates").unwrap().table;
        assert_eq!(rates.label(2, Column::Ticker), Some("^TNX"));
        assert_eq!(rates.formatted_rows()[2][2..], ["4.3", "0.1", "+2.4%"]);
        assert_eq!(rates.formatted_rows()[4][2..], ["110.0", "10.0", "+10.0%"]);
    }

    #[test]
    fn sector_summary_sorted_descending_nulls_last() {
        let port = MockQuotePort::new()
            .with_closes("XLK", &[100.0, 101.2])
            .with_closes("XLF", &[100.0, 99.5])
            .with_closes("XLE", &[100.0, 103.0]);
        let briefing = build_briefing(&port, STANDARD_GROUPS, &fetch(), run_time());

        let sector = &briefing.section("sector_perf").unwrap().table;
        let tickers: Vec<_> = (0..sector.len())
            .map(|i| sector.label(i, Column::Ticker).unwrap())
            .collect();
        assert_eq!(&tickers[..3], ["XLE", "XLK", "XLF"]);
        assert_eq!(tickers.len(), 10);
        assert!(tickers[3..].iter().all(|t| t.starts_with("XL")));
        assert_eq!(sector.number(3, Column::ChangePct), None);
    }
}
