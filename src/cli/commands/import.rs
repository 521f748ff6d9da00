//! Import and export command handlers

use super::{open_store, read_input, store_failure, write_output};
use chrono::Local;
use std::path::{Path, PathBuf};
use unitrack::config::Config;
use unitrack::core::import::{export_payload, parse_import};
use unitrack::{error, info};

/// Import subjects and/or semesters from a JSON document.
///
/// Nothing is written when the document is rejected.
pub fn run_import(input: &Path, config: &Config) -> Result<(), String> {
    let text = read_input(input)?;
    let payload = parse_import(&text).map_err(|e| {
        error!("Import of {} rejected: {e}", input.display());
        format!("✗ {e}")
    })?;

    let summary = open_store(config)
        .apply_import(&payload)
        .map_err(|e| store_failure(&e))?;

    if let Some(count) = summary.subjects {
        println!("✓ Imported {count} subjects into the GPA sheet");
    }
    if let Some(count) = summary.semesters {
        println!("✓ Imported {count} semesters into the CGPA sheet");
    }
    if summary.rejected_subjects > 0 {
        println!(
            "  Skipped {} subjects without a usable id, credit or grade",
            summary.rejected_subjects
        );
    }
    info!("Imported data from {}", input.display());
    Ok(())
}

/// Export the stored sheets.
///
/// Without `output` the document goes to a timestamped file in the
/// configured exports directory.
pub fn run_export(output: Option<&PathBuf>, config: &Config) -> Result<(), String> {
    let store = open_store(config);
    let subjects = store.subjects().map_err(|e| store_failure(&e))?;
    let semesters = store.semesters().map_err(|e| store_failure(&e))?;

    let json = export_payload(&subjects, &semesters).map_err(|e| {
        error!("Failed to encode export: {e}");
        format!("✗ Failed to encode export: {e}")
    })?;

    let path = output.cloned().unwrap_or_else(|| {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        PathBuf::from(&config.paths.exports_dir).join(format!("unitrack-{stamp}.json"))
    });
    write_output(&path, &json)?;
    if path.as_os_str() != "-" {
        println!("✓ Exported to {}", path.display());
    }
    Ok(())
}
