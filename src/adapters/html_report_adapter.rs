//! HTML report adapter implementing ReportPort.
//!
//! Renders the plain-text briefing inside a `<pre>` block with signed
//! percentages highlighted, using an Askama template.

use std::fs;
use std::path::PathBuf;

use crate::adapters::ensure_parent;
use crate::domain::briefing::Briefing;
use crate::domain::error::BriefingError;
use crate::domain::report::{
    DATA_SOURCES, REPORT_TITLE, highlight_changes, render_text, timestamp_kst,
};
use crate::ports::report_port::ReportPort;

use askama::Template;

#[derive(Template)]
#[template(path = "briefing.html")]
struct BriefingTemplate<'a> {
    title: &'a str,
    /// Escaped and highlighted report text; inserted verbatim.
    body: String,
    debug_lines: Vec<String>,
    generated_at: String,
    sources: &'a str,
}

pub struct HtmlReportAdapter {
    output_path: PathBuf,
}

fn render_error(e: askama::Error) -> BriefingError {
    BriefingError::Render {
        reason: e.to_string(),
    }
}

/// Escapes report text for the `<pre>` block. Digits, signs and `%` pass
/// through, so the highlight pass sees the same spans as in plain text.
fn escape_text(text: &str) -> Result<String, BriefingError> {
    askama::filters::escape(askama::Html, text)
        .map(|escaped| escaped.to_string())
        .map_err(render_error)
}

impl HtmlReportAdapter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn render(briefing: &Briefing) -> Result<String, BriefingError> {
        let body = highlight_changes(&escape_text(&render_text(briefing))?);
        let debug_lines = if briefing.include_diagnostics {
            briefing.diagnostics.lines()
        } else {
            Vec::new()
        };

        let template = BriefingTemplate {
            title: REPORT_TITLE,
            body,
            debug_lines,
            generated_at: timestamp_kst(&briefing.generated_at),
            sources: DATA_SOURCES,
        };

        template.render().map_err(render_error)
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, briefing: &Briefing) -> Result<Vec<PathBuf>, BriefingError> {
        let html = Self::render(briefing)?;
        ensure_parent(&self.output_path)?;
        fs::write(&self.output_path, html).map_err(|e| BriefingError::sink(&self.output_path, e))?;
        Ok(vec![self.output_path.clone()])
    }
}
