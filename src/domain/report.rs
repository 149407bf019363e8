//! Text assembly of a briefing and the inline highlight pass used by the HTML page.

use crate::domain::briefing::{Briefing, Section};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::LazyLock;

pub const REPORT_TITLE: &str = "전일 종가 브리핑";
pub const FOOTER_LINE: &str =
    "9) CNN Fear & Greed Index → https://money.cnn.com/data/fear-and-greed/";
pub const DATA_SOURCES: &str = "Yahoo Finance / CNN Fear & Greed Index";

static POSITIVE_CHANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d+(?:\.\d+)?%").expect("valid positive pattern"));
static NEGATIVE_CHANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+(?:\.\d+)?%").expect("valid negative pattern"));

/// `YYYY-MM-DD HH:MM KST`
pub fn timestamp_kst(at: &DateTime<FixedOffset>) -> String {
    format!("{} KST", at.format("%Y-%m-%d %H:%M"))
}

pub fn render_section(section: &Section) -> String {
    format!("===== {} =====\n{}", section.title, section.table.to_text())
}

/// Timestamp line, one block per section, then the reference footer,
/// separated by blank lines. The timestamp line carries its own trailing
/// newline, so two blank lines precede the first section.
pub fn render_text(briefing: &Briefing) -> String {
    let mut blocks = Vec::with_capacity(briefing.sections.len() + 2);
    blocks.push(format!(
        "{REPORT_TITLE} 생성시각: {}\n",
        timestamp_kst(&briefing.generated_at)
    ));
    blocks.extend(briefing.sections.iter().map(render_section));
    blocks.push(FOOTER_LINE.to_string());
    blocks.join("\n\n")
}

/// Wraps signed percentages in `pos`/`neg` spans; every other character is
/// left untouched.
pub fn highlight_changes(text: &str) -> String {
    let text = POSITIVE_CHANGE.replace_all(text, r#"<span class="pos">$0</span>"#);
    NEGATIVE_CHANGE
        .replace_all(&text, r#"<span class="neg">$0</span>"#)
        .into_owned()
}
