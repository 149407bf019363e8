//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod html_report_adapter;
pub mod text_report_adapter;
pub mod yahoo_adapter;

use crate::domain::error::BriefingError;
use std::fs;
use std::path::Path;

/// Creates the directory `path` will be written into, if it has one.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), BriefingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BriefingError::sink(parent, e))?;
    }
    Ok(())
}
