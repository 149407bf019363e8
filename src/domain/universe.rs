//! Fixed instrument universe, in report order.

use crate::domain::table::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: &'static str,
    pub label: &'static str,
}

const fn inst(symbol: &'static str, label: &'static str) -> Instrument {
    Instrument { symbol, label }
}

/// Where a group's rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSource {
    Instruments(&'static [Instrument]),
    /// Members of another group whose symbol starts with `prefix`. The
    /// referenced group must list its instruments directly; a subset of a
    /// subset resolves to nothing.
    Subset {
        group: &'static str,
        prefix: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentGroup {
    /// Stable identifier, also the CSV file stem.
    pub key: &'static str,
    pub title: &'static str,
    pub layout: Layout,
    pub source: GroupSource,
}

/// Exchange rate used for the `Price_KRW` column.
pub const USD_KRW: &str = "KRW=X";

pub const US_INDICES: &[Instrument] = &[
    inst("^GSPC", "S&P 500"),
    inst("^IXIC", "Nasdaq"),
    inst("^DJI", "Dow Jones"),
];

pub const GLOBAL_INDICES: &[Instrument] = &[
    inst("^N225", "Nikkei 225"),
    inst("^KS11", "KOSPI"),
    inst("000001.SS", "Shanghai Composite"),
    inst("^HSI", "Hang Seng"),
    inst("^GDAXI", "DAX"),
    inst("^FTSE", "FTSE 100"),
];

pub const ETF_US_T1: &[Instrument] = &[
    inst("SPY", "S&P500 / 미국 대형주 / 전체시장"),
    inst("QQQ", "Nasdaq100 / 빅테크 중심 / AAPL·MSFT·NVDA"),
    inst("IWM", "러셀2000 / 스몰캡 / 경기민감"),
    inst("DIA", "다우30 / 안정 대형주 / 블루칩"),
    inst("XLK", "IT 섹터 / 성장주 / AAPL·MSFT·AVGO"),
    inst("XLF", "금융 / 은행·보험 / JPM·BAC·GS"),
    inst("XLV", "헬스케어 / 제약·의료 / UNH·LLY·JNJ"),
    inst("XLE", "에너지 / 정유·가스 / XOM·CVX·SLB"),
    inst("XLI", "산업재 / 제조·운송 / CAT·GE·HON"),
    inst("XLB", "소재 / 화학·금속 / LIN·SHW"),
    inst("XLY", "임의소비재 / 소비경기 / AMZN·TSLA·NKE"),
    inst("XLU", "유틸리티 / 방어 / NEE·DUK"),
    inst("XLRE", "리츠 / 상업·데이터센터 / PLD·AMT"),
    inst("XLC", "커뮤니케이션 / 플랫폼·광고 / GOOGL·META"),
    inst("TLT", "미국 장기채 / 금리민감 / 20년+"),
    inst("HYG", "하이일드 채권 / 위험선호 지표"),
];

pub const ETF_GLOBAL_T2: &[Instrument] = &[
    inst("EEM", "신흥국 / 광범위 EM"),
    inst("EWY", "한국 / KOSPI 대형주"),
    inst("EWJ", "일본 / 니케이 구성"),
    inst("EFA", "선진국 ex-US / 유럽+일본"),
    inst("VWO", "신흥국 / FTSE EM"),
    inst("FXI", "중국 대형주 / 홍콩 상장"),
    inst("ASHR", "중국 A주 / 본토시장"),
    inst("EWZ", "브라질 / Bovespa 대형주"),
    inst("INDA", "인도 / Nifty50 기반"),
];

pub const MEGACAPS: &[Instrument] = &[
    inst("AAPL", "Apple"),
    inst("MSFT", "Microsoft"),
    inst("NVDA", "NVIDIA"),
    inst("AMZN", "Amazon"),
    inst("GOOGL", "Alphabet"),
    inst("META", "Meta Platforms"),
    inst("TSLA", "Tesla"),
];

pub const FX: &[Instrument] = &[
    inst(USD_KRW, "USD/KRW"),
    inst("JPY=X", "USD/JPY"),
    inst("EURUSD=X", "EUR/USD"),
    inst("DX-Y.NYB", "US Dollar Index"),
];

pub const RATES: &[Instrument] = &[
    inst("^IRX", "US 13W T-Bill (≈3M)"),
    inst("^FVX", "US 5Y"),
    inst("^TNX", "US 10Y"),
    inst("^TYX", "US 30Y"),
    inst("^MOVE", "MOVE (Bond Vol)"),
];

pub const COMMODITIES: &[Instrument] = &[
    inst("CL=F", "WTI Crude"),
    inst("BZ=F", "Brent Crude"),
    inst("GC=F", "Gold Futures"),
    inst("BTC-USD", "Bitcoin"),
];

pub const STANDARD_GROUPS: &[InstrumentGroup] = &[
    InstrumentGroup {
        key: "us_indices",
        title: "1) 미국 3대 지수",
        layout: Layout::Priced,
        source: GroupSource::Instruments(US_INDICES),
    },
    InstrumentGroup {
        key: "global_indices",
        title: "2) 글로벌 주요 지수",
        layout: Layout::Priced,
        source: GroupSource::Instruments(GLOBAL_INDICES),
    },
    InstrumentGroup {
        key: "etf_us_t1",
        title: "3) ETF T1 (미국/섹터)",
        layout: Layout::Priced,
        source: GroupSource::Instruments(ETF_US_T1),
    },
    InstrumentGroup {
        key: "etf_global_t2",
        title: "3) ETF T2 (글로벌/EM)",
        layout: Layout::Priced,
        source: GroupSource::Instruments(ETF_GLOBAL_T2),
    },
    InstrumentGroup {
        key: "sector_perf",
        title: "4) 섹터 성과 요약",
        layout: Layout::SectorSummary,
        source: GroupSource::Subset {
            group: "etf_us_t1",
            prefix: "XL",
        },
    },
    InstrumentGroup {
        key: "megacaps",
        title: "5) 메가캡",
        layout: Layout::MegaCap,
        source: GroupSource::Instruments(MEGACAPS),
    },
    InstrumentGroup {
        key: "fx",
        title: "6) 환율",
        layout: Layout::Fx,
        source: GroupSource::Instruments(FX),
    },
    InstrumentGroup {
        key: "rates",
        title: "6) 금리",
        layout: Layout::Rates,
        source: GroupSource::Instruments(RATES),
    },
    InstrumentGroup {
        key: "commodities",
        title: "6) 원자재",
        layout: Layout::Priced,
        source: GroupSource::Instruments(COMMODITIES),
    },
];

impl InstrumentGroup {
    /// Resolves the member instruments, following a `Subset` source one level into `groups`.
    pub fn instruments(&self, groups: &[InstrumentGroup]) -> Vec<Instrument> {
        match self.source {
            GroupSource::Instruments(list) => list.to_vec(),
            GroupSource::Subset { group, prefix } => {
                match groups.iter().find(|g| g.key == group).map(|g| g.source) {
                    Some(GroupSource::Instruments(list)) => list
                        .iter()
                        .filter(|i| i.symbol.starts_with(prefix))
                        .copied()
                        .collect(),
                    _ => Vec::new(),
                }
            }
        }
    }
}
