//! satchel binary entrypoint: admin CLI over the config document and item blobs.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

struct SatchelTimer;

impl tracing_subscriber::fmt::time::FormatTime for SatchelTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Install the global subscriber writing to `<data_dir>/logs/satchel.log`.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(args: &args::Args) {
    let level = args::determine_log_level(args);
    let data_dir = satchel::paths::data_dir(args.data_dir.as_deref());
    let log_path = satchel::paths::logs_dir(&data_dir).join("satchel.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(SatchelTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(SatchelTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args);
    tracing::info!(command = ?args.command, "satchel starting");
    match args::process_args(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("satchel: {err}");
            ExitCode::FAILURE
        }
    }
}
