//! Extract command handler

use super::{open_store, read_input, store_failure, write_output};
use std::path::{Path, PathBuf};
use unitrack::config::Config;
use unitrack::core::extract::{extract_courses, matcher_by_name, Extraction};
use unitrack::core::import::ImportPayload;
use unitrack::{error, info, verbose};

/// Message shown when no grade rows were found
const NO_DATA: &str = "No grade data found. Make sure the page contains a table with course and grade columns.";

/// Run the extract command.
///
/// # Arguments
/// * `input` - HTML file, or `-` for stdin
/// * `output` - Where to write the import document; stdout when `None`
/// * `import` - Also replace the stored GPA sheet
/// * `matcher` - Matcher name overriding the configured one
pub fn run(
    input: &Path,
    output: Option<&PathBuf>,
    import: bool,
    matcher: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let matcher_name = matcher.unwrap_or(&config.extract.matcher);
    let matcher = matcher_by_name(matcher_name).ok_or_else(|| {
        error!("Unknown matcher '{matcher_name}'");
        format!("✗ Unknown matcher: '{matcher_name}' (expected substring or strict)")
    })?;

    let document = read_input(input)?;
    let extraction = extract_courses(&document, &*matcher);
    info!(
        "Scanned {} tables in {}, {} matched, {} subjects",
        extraction.tables_scanned,
        input.display(),
        extraction.tables_matched,
        extraction.subjects.len()
    );

    if extraction.is_empty() {
        return Err(format!("✗ {NO_DATA}"));
    }

    report(&extraction, output, import);
    let json = extraction.to_json().map_err(|e| {
        error!("Failed to encode extracted subjects: {e}");
        format!("✗ Failed to encode extracted subjects: {e}")
    })?;

    match output {
        Some(path) => {
            write_output(path, &json)?;
            eprintln!("✓ Wrote {} subjects to {}", extraction.subjects.len(), path.display());
        }
        None if !import => println!("{json}"),
        None => {}
    }

    if import {
        let payload = ImportPayload::from_subjects(extraction.subjects);
        let summary = open_store(config)
            .apply_import(&payload)
            .map_err(|e| store_failure(&e))?;
        eprintln!(
            "✓ Imported {} subjects into the GPA sheet",
            summary.subjects.unwrap_or_default()
        );
    }
    Ok(())
}

fn report(extraction: &Extraction, output: Option<&PathBuf>, import: bool) {
    // Keep stdout clean when it carries the JSON document
    if output.is_none() && !import {
        return;
    }
    verbose!(
        "{} of {} tables looked like grade tables",
        extraction.tables_matched,
        extraction.tables_scanned
    );
    for subject in &extraction.subjects {
        verbose!(
            "  {:<32} {:>4}  {}",
            subject.name,
            subject.credit,
            subject.grade
        );
    }
}
