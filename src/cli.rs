//! CLI definition and run orchestration.

use chrono::{DateTime, FixedOffset};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::csv_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::adapters::yahoo_adapter::YahooQuoteAdapter;
use crate::domain::briefing::{build_briefing, kst_now};
use crate::domain::error::BriefingError;
use crate::domain::settings::BriefingSettings;
use crate::domain::universe::STANDARD_GROUPS;
use crate::ports::config_port::EmptyConfig;
use crate::ports::quote_port::QuotePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "market-briefing",
    about = "Previous-close market briefing: text report, HTML page and CSV exports"
)]
pub struct Cli {
    /// INI file overriding fetch, output, report and logging defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Validate settings and print the output locations without fetching
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    init_tracing(&settings.log_level);

    if cli.dry_run {
        print_plan(&settings);
        return ExitCode::SUCCESS;
    }

    let port = match YahooQuoteAdapter::new(Duration::from_secs(settings.fetch.timeout_secs)) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "quote client unavailable");
            return ExitCode::from(&e);
        }
    };

    match run_briefing(&port, &settings, kst_now()) {
        Ok(written) => {
            for path in &written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "briefing failed");
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

/// Defaults when `path` is `None`; otherwise the INI file layered on top.
pub fn load_settings(path: Option<&Path>) -> Result<BriefingSettings, BriefingError> {
    match path {
        Some(path) => {
            let adapter = FileConfigAdapter::from_file(path)?;
            BriefingSettings::from_config(&adapter)
        }
        None => BriefingSettings::from_config(&EmptyConfig),
    }
}

/// `RUST_LOG` wins over the configured level. Safe to call more than once.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn print_plan(settings: &BriefingSettings) {
    let out = &settings.output;
    println!(
        "lookback {}d, timeout {}s, conversion via {}",
        settings.fetch.lookback_days, settings.fetch.timeout_secs, settings.fetch.conversion_symbol
    );
    println!("report: {}", out.report_file().display());
    println!("html:   {}", out.html_file().display());
    for group in STANDARD_GROUPS {
        println!("csv:    {}", out.csv_file(group.key).display());
    }
    if out.write_index {
        println!("index:  {}", out.index_file().display());
    }
}

/// Fetches every group through `port`, then writes the text report, the
/// HTML page and the CSV exports. Returns every path written.
pub fn run_briefing(
    port: &dyn QuotePort,
    settings: &BriefingSettings,
    generated_at: DateTime<FixedOffset>,
) -> Result<Vec<PathBuf>, BriefingError> {
    let mut briefing = build_briefing(port, STANDARD_GROUPS, &settings.fetch, generated_at);
    briefing.include_diagnostics = settings.include_diagnostics;

    let failures = briefing.diagnostics.failures();
    if failures > 0 {
        tracing::warn!(failures, "some symbols have no data");
    }

    let out = &settings.output;
    let sinks: Vec<Box<dyn ReportPort>> = vec![
        Box::new(TextReportAdapter::new(out.report_file())),
        Box::new(HtmlReportAdapter::new(out.html_file())),
        Box::new(CsvExportAdapter::new(out.clone())),
    ];

    let mut written = Vec::new();
    for sink in &sinks {
        let paths = sink.write(&briefing)?;
        for path in &paths {
            tracing::info!(path = %path.display(), "written");
        }
        written.extend(paths);
    }
    Ok(written)
}
