//! Per-group CSV export adapter implementing ReportPort.
//!
//! Cells are written as displayed in the report, not as raw numbers. Files
//! start with a UTF-8 byte-order mark so spreadsheet tools pick the right
//! encoding for the Korean labels.

use crate::adapters::ensure_parent;
use crate::domain::briefing::{Briefing, Section};
use crate::domain::error::BriefingError;
use crate::domain::settings::OutputSettings;
use crate::ports::report_port::ReportPort;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvExportAdapter {
    output: OutputSettings,
}

impl CsvExportAdapter {
    pub fn new(output: OutputSettings) -> Self {
        Self { output }
    }

    fn write_section(path: &Path, section: &Section) -> Result<(), BriefingError> {
        let mut file = File::create(path).map_err(|e| BriefingError::sink(path, e))?;
        file.write_all(UTF8_BOM)
            .map_err(|e| BriefingError::sink(path, e))?;

        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(section.table.headers())?;
        for row in section.table.formatted_rows() {
            wtr.write_record(&row)?;
        }
        wtr.flush().map_err(|e| BriefingError::sink(path, e))?;
        Ok(())
    }

    /// Run timestamp followed by one group key per line.
    pub fn index_contents(briefing: &Briefing) -> String {
        let mut out = format!("{}\n", briefing.generated_at.format("%Y-%m-%d_%H%M"));
        for key in briefing.group_keys() {
            out.push_str(key);
            out.push('\n');
        }
        out
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, briefing: &Briefing) -> Result<Vec<PathBuf>, BriefingError> {
        let mut written = Vec::with_capacity(briefing.sections.len() + 1);

        for section in &briefing.sections {
            let path = self.output.csv_file(section.key);
            ensure_parent(&path)?;
            Self::write_section(&path, section)?;
            tracing::debug!(group = section.key, path = %path.display(), "csv written");
            written.push(path);
        }

        if self.output.write_index {
            let path = self.output.index_file();
            ensure_parent(&path)?;
            fs::write(&path, Self::index_contents(briefing))
                .map_err(|e| BriefingError::sink(&path, e))?;
            written.push(path);
        }

        Ok(written)
    }
}
