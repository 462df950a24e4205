//! Interactive driver for the project filter engine.
//!
//! # Responsibility
//! - Load a project catalog from a JSON file.
//! - Replay tag/search events from stdin and print row visibility.

mod catalog_file;
mod command;
mod error;
mod session;

use clap::Parser;
use error::CliError;
use log::info;
use projfilter_core::{
    core_version, default_log_level, init_logging, FilterConfig, FilterEngine,
    DEFAULT_QUERY_DEBOUNCE_MS,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "projfilter", version, about = "Filter a project catalog by tags and name")]
struct Args {
    /// JSON file holding an array of projects.
    catalog: PathBuf,
    /// Quiet period before search text is applied.
    #[arg(long, default_value_t = DEFAULT_QUERY_DEBOUNCE_MS)]
    debounce_ms: u64,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log level for the files under `--log-dir`.
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("projfilter: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let catalog = catalog_file::load_catalog(&args.catalog)?;
    info!(
        "event=session_start module=cli status=ok version={} projects={} debounce_ms={}",
        core_version(),
        catalog.len(),
        args.debounce_ms
    );

    let engine = FilterEngine::new(catalog, FilterConfig::with_debounce_ms(args.debounce_ms));
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    session::run_session(engine, stdin.lock(), &mut stdout).map_err(|source| CliError::Io {
        path: PathBuf::from("<stdio>"),
        source,
    })
}
