//! GPA command handler

use super::history::{self, Outcome};
use super::{open_store, store_failure, Store};
use crate::args::GpaAction;
use unitrack::config::Config;
use unitrack::core::metrics::{compute_gpa, total_credits};
use unitrack::core::models::{add_blank, default_subjects, remove_by_id, update, CourseRecord, Grade};
use unitrack::core::numeric::{clamp_to_u32, parse_int_prefix};
use unitrack::{error, info, verbose};

/// Dispatch gpa actions; no action shows the sheet
pub fn run(action: Option<GpaAction>, config: &Config) -> Result<(), String> {
    let mut store = open_store(config);
    match action.unwrap_or(GpaAction::Show) {
        GpaAction::Show => show(&store),
        GpaAction::Add {
            name,
            credit,
            grade,
        } => {
            let grade = grade.as_deref().map(check_grade).transpose()?;
            let mut subjects = store.subjects().map_err(|e| store_failure(&e))?;
            let id = add_blank(&mut subjects).ok_or_else(|| {
                error!("No subject id left after {}", u32::MAX);
                "✗ No subject id left to assign; remove or renumber rows first".to_string()
            })?;
            update(&mut subjects, id, |subject| {
                apply_fields(subject, name, credit.as_deref(), grade);
            });
            save(&mut store, &subjects)?;
            println!("✓ Added subject {id}");
            show(&store)
        }
        GpaAction::Set {
            id,
            name,
            credit,
            grade,
        } => {
            let grade = grade.as_deref().map(check_grade).transpose()?;
            let mut subjects = store.subjects().map_err(|e| store_failure(&e))?;
            if !update(&mut subjects, id, |subject| {
                apply_fields(subject, name, credit.as_deref(), grade);
            }) {
                return Err(format!("✗ No subject with id {id}"));
            }
            save(&mut store, &subjects)?;
            println!("✓ Updated subject {id}");
            show(&store)
        }
        GpaAction::Remove { id } => {
            let mut subjects = store.subjects().map_err(|e| store_failure(&e))?;
            if subjects.len() <= 1 {
                return Err("✗ The last subject cannot be removed".to_string());
            }
            if !remove_by_id(&mut subjects, id) {
                return Err(format!("✗ No subject with id {id}"));
            }
            save(&mut store, &subjects)?;
            println!("✓ Removed subject {id}");
            show(&store)
        }
        GpaAction::Reset => {
            save(&mut store, &default_subjects())?;
            println!("✓ GPA sheet reset");
            Ok(())
        }
        GpaAction::Save => {
            let subjects = store.subjects().map_err(|e| store_failure(&e))?;
            let mut log = store.gpa_history().map_err(|e| store_failure(&e))?;
            let gpa = compute_gpa(&subjects);
            let id = log.record(gpa.clone(), &subjects).id;
            store
                .save_gpa_history(&log)
                .map_err(|e| store_failure(&e))?;
            info!("Saved GPA snapshot {id}");
            println!("✓ Saved GPA {gpa} (snapshot {id})");
            Ok(())
        }
        GpaAction::History { action } => {
            let mut log = store.gpa_history().map_err(|e| store_failure(&e))?;
            if let Outcome::Changed = history::run(action, &mut log, "GPA", print_subjects)? {
                store
                    .save_gpa_history(&log)
                    .map_err(|e| store_failure(&e))?;
            }
            Ok(())
        }
    }
}

/// Grade text as entered: empty clears the grade, anything else must be a
/// letter grade
fn check_grade(text: &str) -> Result<String, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }
    text.parse::<Grade>()
        .map(|grade| grade.to_string())
        .map_err(|e| format!("✗ {e}"))
}

/// Apply edited fields. Credits are whole numbers; unreadable text clears
/// the credit.
fn apply_fields(
    subject: &mut CourseRecord,
    name: Option<String>,
    credit: Option<&str>,
    grade: Option<String>,
) {
    if let Some(name) = name {
        subject.name = name;
    }
    if let Some(credit) = credit {
        subject.credit = f64::from(parse_int_prefix(credit).map_or(0, clamp_to_u32));
    }
    if let Some(grade) = grade {
        subject.grade = grade;
    }
}

fn save(store: &mut Store, subjects: &[CourseRecord]) -> Result<(), String> {
    store
        .save_subjects(subjects)
        .map_err(|e| store_failure(&e))?;
    verbose!("Saved {} subjects", subjects.len());
    Ok(())
}

fn show(store: &Store) -> Result<(), String> {
    let subjects = store.subjects().map_err(|e| store_failure(&e))?;
    print_subjects(&subjects);

    let counted = subjects.iter().filter(|s| s.counts_toward_gpa()).count();
    println!();
    println!("GPA: {}", compute_gpa(&subjects));
    println!(
        "Based on {counted} subjects, {} credits",
        total_credits(&subjects)
    );
    Ok(())
}

fn print_subjects(subjects: &[CourseRecord]) {
    println!("{:>4}  {:<32} {:>6}  {:<5}", "ID", "Subject", "Credit", "Grade");
    for subject in subjects {
        let name = if subject.name.is_empty() {
            "-"
        } else {
            subject.name.as_str()
        };
        let grade = if subject.grade.is_empty() {
            "-"
        } else {
            subject.grade.as_str()
        };
        println!(
            "{:>4}  {:<32} {:>6}  {:<5}",
            subject.id, name, subject.credit, grade
        );
    }
}
