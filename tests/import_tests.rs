//! Integration tests for the JSON import/export document

use pretty_assertions::assert_eq;
use unitrack::core::import::{export_payload, parse_import, ImportError};
use unitrack::core::models::{add_blank, CourseRecord, SemesterRecord};

#[test]
fn export_then_import_restores_sheets() {
    let subjects = vec![
        CourseRecord::new(1, "Calculus", 4.0, "O"),
        CourseRecord::new(2, "Physics", 1.5, "B+"),
    ];
    let semesters = vec![SemesterRecord::new(1, 8.75), SemesterRecord::new(2, 9.1)];

    let json = export_payload(&subjects, &semesters).expect("encodes");
    let payload = parse_import(&json).expect("decodes");

    assert_eq!(payload.subjects, Some(subjects));
    assert_eq!(payload.semesters, Some(semesters));
    assert_eq!(payload.rejected_subjects, 0);
}

#[test]
fn blank_rows_do_not_survive_export() {
    let subjects = vec![CourseRecord::new(1, "Calculus", 4.0, "O"), CourseRecord::blank(2)];
    let json = export_payload(&subjects, &[]).expect("encodes");
    let payload = parse_import(&json).expect("decodes");

    assert_eq!(payload.subjects, Some(vec![CourseRecord::new(1, "Calculus", 4.0, "O")]));
    assert_eq!(payload.rejected_subjects, 1);
    assert_eq!(payload.semesters, Some(vec![]));
}

#[test]
fn only_blank_subjects_and_no_semesters_is_rejected() {
    let json = r#"{"subjects": [{"id": 1, "name": "", "credit": 0, "grade": ""}]}"#;
    assert_eq!(parse_import(json), Err(ImportError::NoValidData));
}

#[test]
fn semesters_alone_are_enough() {
    let payload = parse_import(r#"{"semesters": [{"id": 1, "gpa": 7.2}], "theme": "dark"}"#)
        .expect("decodes");
    assert_eq!(payload.subjects, None);
    assert_eq!(payload.semesters, Some(vec![SemesterRecord::new(1, 7.2)]));
}

#[test]
fn malformed_document_is_invalid_json() {
    let err = parse_import("{'subjects': []}").unwrap_err();
    assert_eq!(err, ImportError::InvalidJson);
    assert_eq!(
        err.to_string(),
        "Invalid JSON format. Please copy the data correctly."
    );
}

#[test]
fn largest_imported_id_leaves_no_room_for_a_new_row() {
    let json = r#"{"subjects": [{"id": 4294967295, "name": "Thesis", "credit": 3, "grade": "A"}]}"#;
    let mut subjects = parse_import(json).expect("id fits in u32").subjects.expect("subjects");
    assert_eq!(subjects[0].id, u32::MAX);

    assert_eq!(add_blank(&mut subjects), None);
    assert_eq!(subjects.len(), 1);
}

#[test]
fn subject_fields_must_convert_as_well_as_be_truthy() {
    // Each of these is truthy but has no usable id, credit or grade
    let json = r#"{"subjects": [
        {"id": 1.5, "name": "Fractional id", "credit": 3, "grade": "A"},
        {"id": -3, "name": "Negative id", "credit": 3, "grade": "A"},
        {"id": "a1", "name": "Text id", "credit": 3, "grade": "A"},
        {"id": 4, "name": "Text credit", "credit": "abc", "grade": "A"},
        {"id": 5, "name": "Numeric grade", "credit": 3, "grade": 9},
        {"id": "6", "name": "Numeric text id", "credit": "4 credits", "grade": "B"}
    ]}"#;

    let payload = parse_import(json).expect("one subject survives");
    assert_eq!(
        payload.subjects,
        Some(vec![CourseRecord::new(6, "Numeric text id", 4.0, "B")])
    );
    assert_eq!(payload.rejected_subjects, 5);
}
