//! GPA, CGPA, attendance and target-GPA calculations
//!
//! Every function here is pure: the same rows always give the same text.
//! Results are formatted the way they are displayed, with a fixed number of
//! decimals.

use crate::core::models::{
    AttendanceInput, AttendanceResult, AttendanceStatus, CourseRecord, SemesterRecord,
};
use crate::core::numeric::to_fixed;

/// Contact hours per credit over a semester
pub const HOURS_PER_CREDIT: u32 = 15;

/// Extra contact hours for courses with a lab block
pub const LAB_HOURS: u32 = 15;

/// Minimum attendance, as a fraction of total hours
pub const ATTENDANCE_THRESHOLD: f64 = 0.75;

/// Highest GPA on the grading scale
pub const MAX_GPA: f64 = 10.0;

/// Text shown when there is nothing to average
const ZERO: &str = "0.00";

/// Compute the credit-weighted GPA of a semester.
///
/// Rows with no credit, a blank grade, or a grade without a point value
/// (`P`, `S`, `W`, ...) are left out of both sums.
///
/// # Returns
/// The GPA with two decimals, or `"0.00"` when no row counts.
#[must_use]
pub fn compute_gpa(subjects: &[CourseRecord]) -> String {
    let (points, credits) = subjects
        .iter()
        .filter_map(|subject| {
            let grade = subject.letter_grade()?;
            (subject.credit > 0.0).then(|| (f64::from(grade.points()) * subject.credit, subject.credit))
        })
        .fold((0.0, 0.0), |(points, credits), (p, c)| (points + p, credits + c));

    if credits > 0.0 {
        to_fixed(points / credits, 2)
    } else {
        ZERO.to_string()
    }
}

/// Sum of credits of the rows that count toward the GPA
#[must_use]
pub fn total_credits(subjects: &[CourseRecord]) -> f64 {
    subjects
        .iter()
        .filter(|subject| subject.counts_toward_gpa())
        .map(|subject| subject.credit)
        .sum()
}

/// Compute the CGPA as the plain mean of entered semester GPAs.
///
/// Semesters are not weighted by credits. Semesters with a GPA of 0 are
/// treated as not entered yet and skipped.
///
/// # Returns
/// The CGPA with two decimals, or `"0.00"` when no semester is set.
#[must_use]
pub fn compute_cgpa(semesters: &[SemesterRecord]) -> String {
    let set: Vec<f64> = semesters
        .iter()
        .filter(|semester| semester.is_set())
        .map(|semester| semester.gpa)
        .collect();

    if set.is_empty() {
        return ZERO.to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let count = set.len() as f64;
    to_fixed(set.iter().sum::<f64>() / count, 2)
}

/// Semester GPAs in sheet order, for plotting progress on the 0-10 scale.
///
/// Unset semesters (GPA 0) are left out, as [`compute_cgpa`] does.
#[must_use]
pub fn gpa_progress(semesters: &[SemesterRecord]) -> Vec<(u32, f64)> {
    semesters
        .iter()
        .filter(|semester| semester.is_set())
        .map(|semester| (semester.id, semester.gpa))
        .collect()
}

/// Compute attendance figures for one course.
///
/// Total hours are 15 per credit, plus one extra block of 15 for practical
/// and joint courses. Allowable leave is the slack at the 75% threshold over
/// the whole course, independent of hours already missed.
///
/// When attendance is low, `hours_needed` is the smallest number of further
/// classes `x` (each adding to both attended and total hours) such that
/// `(attended + x) / (total + x) >= 0.75`, i.e. `3 * total - 4 * attended`.
#[must_use]
pub fn compute_attendance(input: &AttendanceInput) -> AttendanceResult {
    let mut total_hours = input.credit.saturating_mul(HOURS_PER_CREDIT);
    if input.course_type.has_lab() {
        total_hours = total_hours.saturating_add(LAB_HOURS);
    }

    let total = f64::from(total_hours);
    let attended = f64::from(input.hours_attended);
    let percentage = if total_hours > 0 {
        attended / total * 100.0
    } else {
        0.0
    };

    let allowable_leave = total - total * ATTENDANCE_THRESHOLD;
    let status = if percentage >= ATTENDANCE_THRESHOLD * 100.0 {
        AttendanceStatus::Good
    } else {
        AttendanceStatus::Low
    };

    let hours_needed = (status == AttendanceStatus::Low).then(|| {
        let needed = 3 * i64::from(total_hours) - 4 * i64::from(input.hours_attended);
        u32::try_from(needed.max(0)).unwrap_or(u32::MAX)
    });

    AttendanceResult {
        percentage: to_fixed(percentage, 2),
        total_hours,
        allowable_leave: to_fixed(allowable_leave, 0),
        status,
        hours_needed,
    }
}

/// Compute the GPA needed next semester to reach `target_cgpa`.
///
/// Uses `(target * (completed + next) - current * completed) / next`.
/// A result above 10 means the target cannot be reached in one semester;
/// deciding how to present that is left to the caller (see [`is_reachable`]).
///
/// # Returns
/// The required GPA with two decimals, or `None` if any input or the result
/// is not a finite number, or `next_sem_credits` is 0.
#[must_use]
pub fn compute_required_gpa(
    current_cgpa: f64,
    completed_credits: f64,
    target_cgpa: f64,
    next_sem_credits: f64,
) -> Option<String> {
    let inputs = [current_cgpa, completed_credits, target_cgpa, next_sem_credits];
    if inputs.iter().any(|value| !value.is_finite()) || next_sem_credits == 0.0 {
        return None;
    }

    let total_credits = completed_credits + next_sem_credits;
    let required_points = target_cgpa * total_credits - current_cgpa * completed_credits;
    let required = required_points / next_sem_credits;
    required.is_finite().then(|| to_fixed(required, 2))
}

/// Whether a required GPA (as returned by [`compute_required_gpa`]) is
/// achievable on the 10-point scale
#[must_use]
pub fn is_reachable(required: &str) -> bool {
    required
        .parse::<f64>()
        .is_ok_and(|value| value.is_finite() && value <= MAX_GPA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseType;

    fn subject(id: u32, credit: f64, grade: &str) -> CourseRecord {
        CourseRecord::new(id, "", credit, grade)
    }

    #[test]
    fn test_gpa_weighted_average() {
        let subjects = vec![subject(1, 4.0, "O"), subject(2, 3.0, "A+")];
        assert_eq!(compute_gpa(&subjects), "9.57");
    }

    #[test]
    fn test_gpa_empty() {
        assert_eq!(compute_gpa(&[]), "0.00");
        assert_eq!(compute_gpa(&[subject(1, 0.0, "")]), "0.00");
    }

    #[test]
    fn test_gpa_ignores_rows_without_credit_or_grade() {
        let subjects = vec![subject(1, 4.0, "O"), subject(2, 0.0, "A"), subject(3, 3.0, "")];
        assert_eq!(compute_gpa(&subjects), "10.00");
    }

    #[test]
    fn test_gpa_ignores_grades_without_points() {
        let base = vec![subject(1, 4.0, "A"), subject(2, 2.0, "F")];
        let mut with_pass = base.clone();
        with_pass.push(subject(3, 2.0, "P"));
        with_pass.push(subject(4, 1.0, "W"));
        assert_eq!(compute_gpa(&base), compute_gpa(&with_pass));
        assert_eq!(compute_gpa(&[subject(1, 3.0, "S")]), "0.00");
    }

    #[test]
    fn test_gpa_fractional_credits() {
        let subjects = vec![subject(1, 1.5, "B"), subject(2, 4.0, "A")];
        // (9 + 32) / 5.5 = 7.4545...
        assert_eq!(compute_gpa(&subjects), "7.45");
    }

    #[test]
    fn test_total_credits() {
        let subjects = vec![subject(1, 4.0, "O"), subject(2, 1.5, "C"), subject(3, 3.0, "")];
        assert!((total_credits(&subjects) - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cgpa_mean() {
        let semesters = vec![SemesterRecord::new(1, 9.0), SemesterRecord::new(2, 8.0)];
        assert_eq!(compute_cgpa(&semesters), "8.50");
    }

    #[test]
    fn test_cgpa_skips_unset() {
        assert_eq!(compute_cgpa(&[SemesterRecord::new(1, 0.0)]), "0.00");
        let semesters = vec![
            SemesterRecord::new(1, 7.0),
            SemesterRecord::new(2, 0.0),
            SemesterRecord::new(3, 8.0),
        ];
        assert_eq!(compute_cgpa(&semesters), "7.50");
    }

    #[test]
    fn test_attendance_theory() {
        let result = compute_attendance(&AttendanceInput::new(4, 40, CourseType::Theory));
        assert_eq!(result.percentage, "66.67");
        assert_eq!(result.total_hours, 60);
        assert_eq!(result.allowable_leave, "15");
        assert_eq!(result.status, AttendanceStatus::Low);
        // (40 + 20) / (60 + 20) = 0.75
        assert_eq!(result.hours_needed, Some(20));
    }

    #[test]
    fn test_attendance_full() {
        let result = compute_attendance(&AttendanceInput::new(4, 60, CourseType::Theory));
        assert_eq!(result.percentage, "100.00");
        assert_eq!(result.allowable_leave, "15");
        assert_eq!(result.status, AttendanceStatus::Good);
        assert_eq!(result.hours_needed, None);
    }

    #[test]
    fn test_attendance_practical_adds_lab_hours() {
        let result = compute_attendance(&AttendanceInput::new(2, 20, CourseType::Practical));
        assert_eq!(result.total_hours, 45);
        assert_eq!(result.percentage, "44.44");
    }

    #[test]
    fn test_attendance_joint_adds_lab_hours() {
        let result = compute_attendance(&AttendanceInput::new(5, 90, CourseType::Joint));
        assert_eq!(result.total_hours, 90);
        // 90 * 0.25 = 22.5 rounds up
        assert_eq!(result.allowable_leave, "23");
        assert_eq!(result.status, AttendanceStatus::Good);
    }

    #[test]
    fn test_attendance_exact_threshold_is_good() {
        let result = compute_attendance(&AttendanceInput::new(4, 45, CourseType::Theory));
        assert_eq!(result.percentage, "75.00");
        assert_eq!(result.status, AttendanceStatus::Good);
    }

    #[test]
    fn test_attendance_zero_credit() {
        let result = compute_attendance(&AttendanceInput::new(0, 10, CourseType::Theory));
        assert_eq!(result.total_hours, 0);
        assert_eq!(result.percentage, "0.00");
        assert_eq!(result.allowable_leave, "0");
        assert_eq!(result.status, AttendanceStatus::Low);
        // 3 * 0 - 4 * 10 is negative, clamped
        assert_eq!(result.hours_needed, Some(0));
    }

    #[test]
    fn test_required_gpa() {
        assert_eq!(
            compute_required_gpa(8.0, 100.0, 8.2, 20.0),
            Some("9.20".to_string())
        );
    }

    #[test]
    fn test_gpa_progress_skips_unset_semesters() {
        let semesters = vec![
            SemesterRecord::new(1, 8.2),
            SemesterRecord::new(2, 0.0),
            SemesterRecord::new(4, 9.1),
        ];
        assert_eq!(gpa_progress(&semesters), vec![(1, 8.2), (4, 9.1)]);
        assert!(gpa_progress(&[SemesterRecord::new(1, 0.0)]).is_empty());
    }

    #[test]
    fn test_required_gpa_rejects_invalid_input() {
        assert_eq!(compute_required_gpa(f64::NAN, 100.0, 8.2, 20.0), None);
        assert_eq!(compute_required_gpa(8.0, 100.0, f64::NAN, 20.0), None);
        assert_eq!(compute_required_gpa(8.0, 100.0, 8.2, 0.0), None);
        assert_eq!(compute_required_gpa(f64::INFINITY, 100.0, 8.2, 20.0), None);
        assert_eq!(compute_required_gpa(8.0, 100.0, 8.2, f64::NEG_INFINITY), None);
        // Finite inputs whose result overflows
        assert_eq!(compute_required_gpa(8.0, 1e308, 9.0, 1e-308), None);
    }

    #[test]
    fn test_required_gpa_unreachable_is_still_returned() {
        let required = compute_required_gpa(6.0, 120.0, 9.0, 20.0).unwrap();
        // (9 * 140 - 6 * 120) / 20 = 27
        assert_eq!(required, "27.00");
        assert!(!is_reachable(&required));
        assert!(is_reachable("9.20"));
        assert!(is_reachable("10.00"));
        assert!(!is_reachable("-Infinity"));
        assert!(!is_reachable("NaN"));
    }
}
