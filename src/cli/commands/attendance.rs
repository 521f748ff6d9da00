//! Attendance command handler

use super::{open_store, store_failure};
use crate::args::AttendanceAction;
use unitrack::config::Config;
use unitrack::core::metrics::compute_attendance;
use unitrack::core::models::{AttendanceInput, AttendanceStatus};
use unitrack::core::numeric::{clamp_to_u32, parse_int_prefix};

/// Dispatch attendance actions; no action shows the figures
pub fn run(action: Option<AttendanceAction>, config: &Config) -> Result<(), String> {
    let mut store = open_store(config);
    let mut input = store.attendance().map_err(|e| store_failure(&e))?;

    match action.unwrap_or(AttendanceAction::Show) {
        AttendanceAction::Show => {
            print_result(&input);
            return Ok(());
        }
        AttendanceAction::Set {
            credit,
            hours,
            course_type,
        } => {
            let read = |text: &str| parse_int_prefix(text).map_or(0, clamp_to_u32);
            if let Some(credit) = credit {
                input.credit = read(&credit);
            }
            if let Some(hours) = hours {
                input.hours_attended = read(&hours);
            }
            if let Some(course_type) = course_type {
                input.course_type = course_type.into();
            }
        }
        AttendanceAction::Attend { hours } => input.adjust_hours(i64::from(hours)),
        AttendanceAction::Unattend { hours } => input.adjust_hours(-i64::from(hours)),
    }

    store
        .save_attendance(&input)
        .map_err(|e| store_failure(&e))?;
    print_result(&input);
    Ok(())
}

fn print_result(input: &AttendanceInput) {
    let result = compute_attendance(input);
    println!(
        "Course: {} credits, {} ({} hours attended)",
        input.credit, input.course_type, input.hours_attended
    );
    println!("Attendance:      {}%", result.percentage);
    println!("Total hours:     {}", result.total_hours);
    println!("Allowable leave: {} hours", result.allowable_leave);
    println!("Status:          {}", result.status);
    if let (AttendanceStatus::Low, Some(needed)) = (result.status, result.hours_needed) {
        println!("Attend the next {needed} hours in a row to reach 75%");
    }
}
