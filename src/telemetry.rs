use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app_dirs::AppDirs;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "FLAGQUIZ_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Route tracing output to the log file in the state directory.
///
/// The terminal belongs to the TUI, so nothing is ever written to stdout.
/// Returns false when no log file could be opened; the game runs without logs.
pub fn init_tracing() -> bool {
    match AppDirs::log_path() {
        Some(path) => init_tracing_to(&path).is_ok(),
        None => false,
    }
}

pub fn init_tracing_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init();
    Ok(())
}
