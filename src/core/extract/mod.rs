//! Grade-table extraction from saved portal pages
//!
//! Scans every table of an HTML document, keeps the ones whose headers look
//! like a course/grade listing, and turns their body rows into
//! [`CourseRecord`]s.
//!
//! Ids are assigned fresh on every run (1, 2, 3, ... across all tables), so
//! re-running on the same page gives identical records with identical ids,
//! but ids carry no meaning beyond the run that produced them.

pub mod columns;
pub mod html;

pub use columns::{matcher_by_name, ColumnMap, ColumnMatcher, StrictMatcher, SubstringMatcher};
pub use html::{parse_tables, HtmlTable};

pub use crate::core::import::to_import_json;
use crate::core::models::{CourseRecord, Grade};
use crate::core::numeric::parse_float_prefix;
use crate::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Credit used when a row has no readable, non-zero credit
pub const DEFAULT_CREDIT: f64 = 3.0;

/// Longest grade token accepted, in characters
pub const MAX_GRADE_LEN: usize = 2;

/// Grade cells must consist only of these letters. `P`, `S` and `W` are
/// accepted here even though they carry no grade points.
static GRADE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[OABCDEFPSW]+$").expect("valid grade token pattern"));

/// Result of scanning one document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    /// Course rows found, in document order
    pub subjects: Vec<CourseRecord>,
    /// Number of tables in the document
    pub tables_scanned: usize,
    /// Number of tables that looked like grade tables
    pub tables_matched: usize,
}

impl Extraction {
    /// No usable course rows were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Import document for the extracted rows: `{ "subjects": [...] }`,
    /// pretty-printed with two-space indentation
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_import_json(&self.subjects)
    }
}

/// Extract course rows from an HTML document.
///
/// A table qualifies when `matcher` finds both a course and a grade column.
/// For each body row of a qualifying table:
/// - the row needs more cells than the larger of the course and grade positions;
/// - the grade cell must be 1-2 characters from `O A B C D E F P S W`;
/// - the credit is read from the credit column, falling back to 3 when the
///   column or cell is missing, unreadable, zero or infinite;
/// - the name is the course cell text.
///
/// A table that qualifies but has no valid rows contributes nothing.
#[must_use]
pub fn extract_courses(document: &str, matcher: &dyn ColumnMatcher) -> Extraction {
    let tables = parse_tables(document);
    let mut extraction = Extraction {
        tables_scanned: tables.len(),
        ..Extraction::default()
    };

    for (index, table) in tables.iter().enumerate() {
        let columns = matcher.locate(&table.headers);
        if !columns.is_grade_table() {
            continue;
        }
        extraction.tables_matched += 1;
        debug!(
            "Table {index} looks like a grade table ({} matcher): {columns:?}",
            matcher.name()
        );

        for row in &table.rows {
            if let Some((name, credit, grade)) = read_row(row, &columns) {
                if grade.parse::<Grade>().is_err() {
                    debug!("Row '{name}' has grade '{grade}' with no point value");
                }
                let id = u32::try_from(extraction.subjects.len() + 1).unwrap_or(u32::MAX);
                extraction
                    .subjects
                    .push(CourseRecord::new(id, name, credit, grade));
            }
        }
    }

    extraction
}

/// Read `(name, credit, grade)` from a body row, or `None` if the row is not
/// a grade row
fn read_row(row: &[String], columns: &ColumnMap) -> Option<(String, f64, String)> {
    let required = columns.required_index()?;
    if row.len() <= required {
        return None;
    }

    let grade = row.get(columns.grade?)?;
    if !is_grade_token(grade) {
        return None;
    }

    let credit = columns
        .credit
        .and_then(|index| row.get(index))
        .and_then(|text| parse_float_prefix(text))
        .filter(|credit| credit.is_finite() && *credit != 0.0)
        .unwrap_or(DEFAULT_CREDIT);

    let name = columns
        .course
        .and_then(|index| row.get(index))
        .cloned()
        .unwrap_or_default();

    Some((name, credit, grade.clone()))
}

/// Whether `text` looks like a grade: 1-2 characters from the grade alphabet
#[must_use]
pub fn is_grade_token(text: &str) -> bool {
    !text.is_empty() && text.chars().count() <= MAX_GRADE_LEN && GRADE_TOKEN.is_match(text)
}
