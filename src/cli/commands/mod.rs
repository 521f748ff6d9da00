//! CLI command handlers for `UniTrack`.
//!
//! Each command is implemented in its own submodule. Handlers return
//! `Err` with a ready-to-print message (prefixed with `✗`) on failure.

pub mod attendance;
pub mod cgpa;
pub mod config;
pub mod dashboard;
pub mod extract;
pub mod gpa;
pub mod history;
pub mod import;
pub mod target;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use unitrack::config::Config;
use unitrack::core::store::{AcademicStore, FileStore, StoreError};
use unitrack::error;

/// Store backed by the configured data directory
pub type Store = AcademicStore<FileStore>;

/// Open the store in `config.paths.data_dir`
pub fn open_store(config: &Config) -> Store {
    AcademicStore::new(FileStore::new(&config.paths.data_dir))
}

/// Turn a store failure into a printable message
pub fn store_failure(e: &StoreError) -> String {
    error!("Store access failed: {e}");
    format!("✗ {e}")
}

/// Read a whole file, or stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|e| {
            error!("Failed to read stdin: {e}");
            format!("✗ Failed to read stdin: {e}")
        })?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| {
        error!("Failed to read {}: {e}", path.display());
        format!("✗ Failed to read {}: {e}", path.display())
    })
}

/// Write `text` to `path`, creating parent directories, or to stdout when
/// `path` is `-`
pub fn write_output(path: &Path, text: &str) -> Result<(), String> {
    if path.as_os_str() == "-" {
        println!("{text}");
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                format!("✗ Failed to create directory {}: {e}", parent.display())
            })?;
        }
    }
    fs::write(path, format!("{text}\n")).map_err(|e| {
        error!("Failed to write {}: {e}", path.display());
        format!("✗ Failed to write {}: {e}", path.display())
    })
}

/// Ask a yes/no question on stdin
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

/// Handle the top-level reset command
pub fn reset_all(config: &Config, yes: bool) -> Result<(), String> {
    if !yes && !confirm("Delete all stored sheets, forms and history?") {
        println!("✗ Reset cancelled");
        return Ok(());
    }
    open_store(config)
        .reset_all()
        .map_err(|e| store_failure(&e))?;
    println!("✓ All stored data removed");
    Ok(())
}
