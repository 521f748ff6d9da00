//! Dashboard command handler

use super::{open_store, store_failure};
use unitrack::config::Config;
use unitrack::core::metrics::{compute_attendance, compute_cgpa, compute_gpa, gpa_progress, MAX_GPA};
use unitrack::core::numeric::to_fixed;

/// Width of a 10.00 GPA bar in the progress chart
const BAR_WIDTH: usize = 20;

/// Print the headline figures of every calculator and the GPA trend
pub fn run(config: &Config) -> Result<(), String> {
    let store = open_store(config);
    let subjects = store.subjects().map_err(|e| store_failure(&e))?;
    let semesters = store.semesters().map_err(|e| store_failure(&e))?;
    let attendance = compute_attendance(&store.attendance().map_err(|e| store_failure(&e))?);

    let progress = gpa_progress(&semesters);

    println!("\n=== UniTrack ===\n");
    println!("Overall CGPA:  {}  ({} semesters)", compute_cgpa(&semesters), progress.len());
    println!("Current GPA:   {}", compute_gpa(&subjects));
    println!(
        "Attendance:    {}%  ({})",
        attendance.percentage, attendance.status
    );

    println!("\nGPA progress (0-10)");
    if progress.is_empty() {
        println!("  Add semester GPAs with `unitrack cgpa` to see your progress");
    }
    for (id, gpa) in progress {
        println!("  Sem {id:<3} {:<BAR_WIDTH$} {}", bar(gpa), to_fixed(gpa, 2));
    }
    Ok(())
}

// The clamp keeps the scaled value within 0..=BAR_WIDTH
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(gpa: f64) -> String {
    let filled = (gpa.clamp(0.0, MAX_GPA) / MAX_GPA * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}
