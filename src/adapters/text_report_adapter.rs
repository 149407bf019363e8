//! Plain-text report file implementing ReportPort.

use crate::adapters::ensure_parent;
use crate::domain::briefing::Briefing;
use crate::domain::error::BriefingError;
use crate::domain::report::render_text;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::PathBuf;

pub struct TextReportAdapter {
    output_path: PathBuf,
}

impl TextReportAdapter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, briefing: &Briefing) -> Result<Vec<PathBuf>, BriefingError> {
        ensure_parent(&self.output_path)?;
        fs::write(&self.output_path, render_text(briefing))
            .map_err(|e| BriefingError::sink(&self.output_path, e))?;
        Ok(vec![self.output_path.clone()])
    }
}
