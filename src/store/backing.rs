//! Plumbing around the backing text file. Each helper performs one scoped
//! file operation: the handle is opened, used, and released before the
//! function returns, so no code path leaves a half-finished writer alive.
//! Exclusive single-process access to the file is assumed; another process
//! editing it between our load and a later rewrite is out of scope.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".service-ledger";
/// Ledger file name stored inside the application data directory.
const LEDGER_FILE_NAME: &str = "records.txt";
/// Diagnostic log written beside the ledger; the terminal belongs to the TUI.
const LOG_FILE_NAME: &str = "service-ledger.log";

/// Resolve the default ledger path inside the user's home. The store itself
/// accepts any path, so tests and tooling can point it at a scratch file.
pub fn default_data_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LEDGER_FILE_NAME))
}

/// Resolve the log file path next to the ledger.
pub fn default_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}

fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Create the directory a ledger file lives in, if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    Ok(())
}

/// Read every line of the backing file in order. A file that does not exist
/// yet is an empty ledger, not an error.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::storage("read", err)),
    };

    Ok(contents.lines().map(str::to_string).collect())
}

/// Append one encoded line to the backing file. This is the cheap path for
/// the common "add one record" case; nothing else in the file is touched.
pub(crate) fn append_line(path: &Path, line: &str) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| StoreError::storage("open", err))?;

    writeln!(file, "{line}").map_err(|err| StoreError::storage("append to", err))
}

/// Overwrite the backing file with the given lines, in order. Deletes and
/// payments go through here because positional line identity means the whole
/// file must be rewritten to drop or change a row.
pub(crate) fn rewrite_all(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|err| StoreError::storage("rewrite", err))
}
