//! Integration tests for the calculators, driven the way the forms feed them

use unitrack::core::metrics::{
    compute_attendance, compute_cgpa, compute_gpa, compute_required_gpa, is_reachable,
};
use unitrack::core::models::{
    default_semesters, default_subjects, AttendanceInput, AttendanceStatus, CourseRecord,
    CourseType, SemesterRecord, TargetInput,
};

#[test]
fn default_sheets_compute_zero() {
    assert_eq!(compute_gpa(&default_subjects()), "0.00");
    assert_eq!(compute_cgpa(&default_semesters()), "0.00");
}

#[test]
fn incomplete_rows_never_change_gpa() {
    let base = vec![
        CourseRecord::new(1, "Calculus", 4.0, "O"),
        CourseRecord::new(2, "Physics", 3.0, "A+"),
    ];
    let expected = compute_gpa(&base);
    assert_eq!(expected, "9.57");

    for extra in [
        CourseRecord::new(3, "No credit", 0.0, "F"),
        CourseRecord::new(3, "No grade", 4.0, ""),
        CourseRecord::blank(3),
    ] {
        let mut rows = base.clone();
        rows.push(extra);
        assert_eq!(compute_gpa(&rows), expected);
    }
}

#[test]
fn failing_grade_counts_with_zero_points() {
    let rows = vec![
        CourseRecord::new(1, "Calculus", 4.0, "O"),
        CourseRecord::new(2, "Physics", 4.0, "F"),
    ];
    assert_eq!(compute_gpa(&rows), "5.00");
}

#[test]
fn attendance_from_form_text() {
    let low = compute_attendance(&AttendanceInput::from_text("4", "40", CourseType::Theory));
    assert_eq!(low.percentage, "66.67");
    assert_eq!(low.total_hours, 60);
    assert_eq!(low.status, AttendanceStatus::Low);

    let full = compute_attendance(&AttendanceInput::from_text("4", "60", CourseType::Theory));
    assert_eq!(full.allowable_leave, "15");
    assert_eq!(full.status, AttendanceStatus::Good);

    let lab = compute_attendance(&AttendanceInput::from_text("2", "20", CourseType::Practical));
    assert_eq!(lab.total_hours, 45);
    assert_eq!(lab.percentage, "44.44");
}

#[test]
fn attending_needed_hours_reaches_threshold() {
    let mut input = AttendanceInput::new(3, 20, CourseType::Joint);
    let result = compute_attendance(&input);
    let needed = result.hours_needed.expect("attendance is low");

    // Each class attended adds to both attended and total hours
    let attended = f64::from(input.hours_attended + needed);
    let total = f64::from(result.total_hours + needed);
    assert!(attended / total >= 0.75);

    input.adjust_hours(i64::from(result.total_hours));
    assert_eq!(compute_attendance(&input).hours_needed, None);
}

#[test]
fn required_gpa_from_form_text() {
    let input = TargetInput {
        current_cgpa: "8.0".to_string(),
        completed_credits: "100".to_string(),
        target_cgpa: "8.2".to_string(),
        next_sem_credits: "20".to_string(),
    };
    let [current, completed, target, next] = input.values();
    let required = compute_required_gpa(current, completed, target, next);
    assert_eq!(required.as_deref(), Some("9.20"));
    assert!(is_reachable("9.20"));

    let half_filled = TargetInput {
        target_cgpa: String::new(),
        ..input
    };
    let [current, completed, target, next] = half_filled.values();
    assert_eq!(compute_required_gpa(current, completed, target, next), None);
}

#[test]
fn infinite_form_values_have_no_required_gpa() {
    let input = TargetInput {
        current_cgpa: "Infinity".to_string(),
        completed_credits: "100".to_string(),
        target_cgpa: "8.2".to_string(),
        next_sem_credits: "20".to_string(),
    };
    let [current, completed, target, next] = input.values();
    assert_eq!(compute_required_gpa(current, completed, target, next), None);
}

#[test]
fn cgpa_is_unweighted_mean_of_entered_semesters() {
    let semesters = vec![
        SemesterRecord::new(1, 9.0),
        SemesterRecord::new(2, 8.0),
        SemesterRecord::new(3, 0.0),
    ];
    assert_eq!(compute_cgpa(&semesters), "8.50");
}
