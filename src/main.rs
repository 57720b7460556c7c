//! Binary entry point that glues the file-backed record store to the TUI.
//! The bootstrapping pipeline: resolve the data paths, point the tracing
//! subscriber at a log file (stdout belongs to the terminal UI), load the
//! ledger, and drive the Ratatui event loop until the user exits.
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use service_ledger::{
    default_data_path, default_log_path, ensure_parent_dir, run_app, App, RecordStore,
};

/// Resolve paths, initialize logging and persistence, and launch the event
/// loop. Returning a `Result` bubbles fatal initialization problems (for
/// example an unreadable home directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let data_path = default_data_path()?;
    ensure_parent_dir(&data_path)?;
    init_logging(default_log_path()?);

    let store = RecordStore::open(&data_path)?;
    let mut app = App::new(store);
    run_app(&mut app)
}

/// Send tracing output to the log file beside the ledger. The writer opens
/// the file per event and falls back to discarding when it cannot; losing a
/// diagnostic line must never take the application down.
fn init_logging(log_path: PathBuf) {
    let writer = move || -> Box<dyn io::Write> {
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => Box::new(file),
            Err(_) => Box::new(io::sink()),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(writer)
        .init();
}
