//! Output sink port.

use crate::domain::briefing::Briefing;
use crate::domain::error::BriefingError;
use std::path::PathBuf;

/// Writes a rendered briefing somewhere, overwriting previous output.
pub trait ReportPort {
    /// Returns the paths that were written.
    fn write(&self, briefing: &Briefing) -> Result<Vec<PathBuf>, BriefingError>;
}
