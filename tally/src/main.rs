//! tally CLI entry point.
//!
//! Usage:
//!   tally              # Interactive calculator
//!   tally --help       # Show usage

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tally::{Calculator, Config, HISTORY_FILE_ENV, PLUGIN_DIR_ENV};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the menu
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            let config = Config::from_env();
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut calculator = Calculator::new(&config, stdin.lock(), stdout.lock());
            calculator.run().context("calculator session failed")?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'tally --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(r#"tally v{}

Usage:
  tally                        Interactive calculator

Options:
  -h, --help                   Show this help
  -V, --version                Show version

Environment:
  {}           History file (default: data/history.csv)
  {}             Plugin descriptor directory (default: plugins)
  RUST_LOG                     Log filter (default: warn)
"#, env!("CARGO_PKG_VERSION"), HISTORY_FILE_ENV, PLUGIN_DIR_ENV);
}
