use clap::Parser;
use market_briefing::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
