//! Run settings, resolved from an optional config file and validated up front.

use crate::domain::error::BriefingError;
use crate::domain::universe::USD_KRW;
use crate::ports::config_port::{ConfigPort, parse_bool};
use std::path::PathBuf;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 15;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    pub lookback_days: u32,
    pub timeout_secs: u64,
    pub conversion_symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub base_dir: PathBuf,
    pub report_path: PathBuf,
    pub html_path: PathBuf,
    pub csv_dir: PathBuf,
    pub csv_prefix: String,
    pub write_index: bool,
    pub index_path: PathBuf,
}

impl OutputSettings {
    pub fn report_file(&self) -> PathBuf {
        self.base_dir.join(&self.report_path)
    }

    pub fn html_file(&self) -> PathBuf {
        self.base_dir.join(&self.html_path)
    }

    pub fn csv_file(&self, group_key: &str) -> PathBuf {
        self.base_dir
            .join(&self.csv_dir)
            .join(format!("{}{}.csv", self.csv_prefix, group_key))
    }

    pub fn index_file(&self) -> PathBuf {
        self.base_dir.join(&self.index_path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BriefingSettings {
    pub fetch: FetchSettings,
    pub output: OutputSettings,
    pub include_diagnostics: bool,
    pub log_level: String,
}

impl Default for BriefingSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings {
                lookback_days: DEFAULT_LOOKBACK_DAYS,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                conversion_symbol: USD_KRW.to_string(),
            },
            output: OutputSettings {
                base_dir: PathBuf::from("."),
                report_path: PathBuf::from("output/report.txt"),
                html_path: PathBuf::from("docs/index.html"),
                csv_dir: PathBuf::from("."),
                csv_prefix: "out_".to_string(),
                write_index: true,
                index_path: PathBuf::from("output/index.txt"),
            },
            include_diagnostics: true,
            log_level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn invalid(section: &str, key: &str, reason: &str) -> BriefingError {
    BriefingError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<String>, BriefingError> {
    match config.get_string(section, key) {
        Some(v) if v.trim().is_empty() => Err(invalid(section, key, "value must not be empty")),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

/// Integer key; present but unparseable is an error, absent is `default`.
fn int_setting(config: &dyn ConfigPort, section: &str, key: &str, default: i64) -> Result<i64, BriefingError> {
    if let Some(raw) = config.get_string(section, key) {
        if raw.trim().parse::<i64>().is_err() {
            return Err(invalid(section, key, &format!("expected an integer, got {raw:?}")));
        }
    }
    Ok(config.get_int(section, key, default))
}

fn bool_setting(config: &dyn ConfigPort, section: &str, key: &str, default: bool) -> Result<bool, BriefingError> {
    if let Some(raw) = config.get_string(section, key) {
        if parse_bool(&raw).is_none() {
            return Err(invalid(section, key, &format!("expected true or false, got {raw:?}")));
        }
    }
    Ok(config.get_bool(section, key, default))
}

impl BriefingSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BriefingError> {
        let mut settings = Self::default();

        let lookback = int_setting(config, "fetch", "lookback_days", DEFAULT_LOOKBACK_DAYS as i64)?;
        if !(2..=365).contains(&lookback) {
            return Err(invalid(
                "fetch",
                "lookback_days",
                "lookback_days must be between 2 and 365",
            ));
        }
        settings.fetch.lookback_days = lookback as u32;

        let timeout = int_setting(config, "fetch", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;
        if timeout <= 0 {
            return Err(invalid("fetch", "timeout_secs", "timeout_secs must be positive"));
        }
        settings.fetch.timeout_secs = timeout as u64;

        if let Some(symbol) = non_empty(config, "fetch", "conversion_symbol")? {
            settings.fetch.conversion_symbol = symbol;
        }

        let out = &mut settings.output;
        if let Some(v) = non_empty(config, "output", "base_dir")? {
            out.base_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(config, "output", "report_path")? {
            out.report_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(config, "output", "html_path")? {
            out.html_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(config, "output", "csv_dir")? {
            out.csv_dir = PathBuf::from(v);
        }
        if let Some(v) = config.get_string("output", "csv_prefix") {
            out.csv_prefix = v.trim().to_string();
        }
        out.write_index = bool_setting(config, "output", "write_index", out.write_index)?;
        if let Some(v) = non_empty(config, "output", "index_path")? {
            out.index_path = PathBuf::from(v);
        }

        settings.include_diagnostics = bool_setting(
            config,
            "report",
            "include_diagnostics",
            settings.include_diagnostics,
        )?;

        if let Some(level) = non_empty(config, "logging", "level")? {
            let level = level.to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid(
                    "logging",
                    "level",
                    "level must be one of trace, debug, info, warn, error, off",
                ));
            }
            settings.log_level = level;
        }

        Ok(settings)
    }
}
