//! Integration tests for grade-table extraction

use pretty_assertions::assert_eq;
use unitrack::core::extract::{extract_courses, StrictMatcher, SubstringMatcher};
use unitrack::core::import::parse_import;
use unitrack::core::models::CourseRecord;

const PORTAL_PAGE: &str = r#"
<html>
  <body>
    <table class="layout">
      <tr><td>Student: Jane Doe</td><td>Reg No: RA2111003010001</td></tr>
    </table>
    <table id="grades">
      <thead>
        <tr><th>Course Code</th><th>Course Title</th><th>Credit</th><th>Grade</th></tr>
      </thead>
      <tbody>
        <tr><td>21MAB101T</td><td>Calculus</td><td>4</td><td>O</td></tr>
        <tr><td>21PHY101J</td><td>Physics</td><td>5</td><td>A</td></tr>
        <tr><td>21CSS101J</td><td>Programming</td><td>3</td><td>A+</td></tr>
        <tr><td>21LEM101T</td><td>Ethics</td><td></td><td>P</td></tr>
        <tr><td>21EES101T</td><td>Environment</td><td>0</td><td>Ab</td></tr>
        <tr><td colspan="4">Total credits: 17</td></tr>
      </tbody>
    </table>
  </body>
</html>
"#;

#[test]
fn extracts_rows_from_portal_page() {
    let extraction = extract_courses(PORTAL_PAGE, &SubstringMatcher);

    assert_eq!(extraction.tables_scanned, 2);
    assert_eq!(extraction.tables_matched, 1);
    assert_eq!(
        extraction.subjects,
        vec![
            CourseRecord::new(1, "21MAB101T", 4.0, "O"),
            CourseRecord::new(2, "21PHY101J", 5.0, "A"),
            // "A+" fails the grade token check; "Ab" is not upper case
            CourseRecord::new(3, "21LEM101T", 3.0, "P"),
        ]
    );
}

#[test]
fn extraction_is_repeatable() {
    let first = extract_courses(PORTAL_PAGE, &SubstringMatcher);
    let second = extract_courses(PORTAL_PAGE, &SubstringMatcher);
    assert_eq!(first, second);
}

#[test]
fn rows_from_several_tables_are_concatenated() {
    let page = r"
        <table>
          <tr><th>Subject</th><th>Credits</th><th>Result</th></tr>
          <tr><td>Chemistry</td><td>3</td><td>B</td></tr>
        </table>
        <table>
          <tr><th>Subject</th><th>Credits</th><th>Result</th></tr>
          <tr><td>Biology</td><td>2</td><td>C</td></tr>
          <tr><td>Botany</td><td>1.5</td><td>F</td></tr>
        </table>
    ";

    let extraction = extract_courses(page, &SubstringMatcher);

    assert_eq!(extraction.tables_matched, 2);
    let summary: Vec<(u32, &str, f64)> = extraction
        .subjects
        .iter()
        .map(|s| (s.id, s.name.as_str(), s.credit))
        .collect();
    assert_eq!(
        summary,
        vec![(1, "Chemistry", 3.0), (2, "Biology", 2.0), (3, "Botany", 1.5)]
    );
}

#[test]
fn missing_credit_column_defaults_to_three() {
    let page = r"
        <table>
          <tr><th>Course</th><th>Grade</th></tr>
          <tr><td>Seminar</td><td>S</td></tr>
          <tr><td>Workshop</td><td>B</td></tr>
        </table>
    ";

    let extraction = extract_courses(page, &SubstringMatcher);
    assert!(extraction.subjects.iter().all(|s| s.credit == 3.0));
    assert_eq!(extraction.subjects.len(), 2);
}

#[test]
fn page_without_grade_tables_is_empty() {
    let no_tables = extract_courses("<html><body><p>Session expired</p></body></html>", &SubstringMatcher);
    assert!(no_tables.is_empty());
    assert_eq!(no_tables.tables_scanned, 0);

    let attendance_only = extract_courses(
        "<table><tr><th>Course</th><th>Attendance %</th></tr><tr><td>Maths</td><td>80</td></tr></table>",
        &SubstringMatcher,
    );
    assert!(attendance_only.is_empty());
    assert_eq!(attendance_only.tables_scanned, 1);
    assert_eq!(attendance_only.tables_matched, 0);
}

#[test]
fn matching_table_without_valid_rows_is_empty() {
    let page = r"
        <table>
          <tr><th>Course</th><th>Grade</th></tr>
          <tr><td>Maths</td><td>Withheld</td></tr>
        </table>
    ";
    let extraction = extract_courses(page, &SubstringMatcher);
    assert_eq!(extraction.tables_matched, 1);
    assert!(extraction.is_empty());
}

#[test]
fn strict_matcher_skips_loosely_labelled_tables() {
    let page = r"
        <table>
          <tr><th>Course Registration Status</th><th>Grade Sheet Link</th></tr>
          <tr><td>Registered</td><td>A</td></tr>
        </table>
        <table>
          <tr><th>Subject Code</th><th>Credits</th><th>Grade</th></tr>
          <tr><td>21MAB201T</td><td>4</td><td>B</td></tr>
        </table>
    ";

    let loose = extract_courses(page, &SubstringMatcher);
    assert_eq!(loose.subjects.len(), 2);

    let strict = extract_courses(page, &StrictMatcher);
    assert_eq!(strict.tables_matched, 1);
    assert_eq!(strict.subjects, vec![CourseRecord::new(1, "21MAB201T", 4.0, "B")]);
}

#[test]
fn output_document_imports_cleanly() {
    let extraction = extract_courses(PORTAL_PAGE, &SubstringMatcher);
    let json = extraction.to_json().expect("encodes");

    assert!(json.starts_with("{\n  \"subjects\": ["));

    let payload = parse_import(&json).expect("extracted document is importable");
    assert_eq!(payload.subjects, Some(extraction.subjects));
    assert_eq!(payload.semesters, None);
}

#[test]
fn grade_cells_are_read_as_rendered_text() {
    let page = r"
        <table>
          <tr><th>Course</th><th>Credit</th><th>Grade</th></tr>
          <tr><td>Calculus</td><td>&#52;</td><td>&#65;</td></tr>
          <tr><td>Physics</td><td>3</td><td><script>highlight(this)</script>O</td></tr>
          <tr><td>Art<style>.x { }</style></td><td>2</td><td>&#x42;</td></tr>
        </table>
    ";

    let extraction = extract_courses(page, &SubstringMatcher);
    assert_eq!(
        extraction.subjects,
        vec![
            CourseRecord::new(1, "Calculus", 4.0, "A"),
            CourseRecord::new(2, "Physics", 3.0, "O"),
            CourseRecord::new(3, "Art", 2.0, "B"),
        ]
    );
}
