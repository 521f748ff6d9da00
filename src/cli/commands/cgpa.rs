//! CGPA command handler

use super::history::{self, Outcome};
use super::{open_store, store_failure, Store};
use crate::args::CgpaAction;
use unitrack::config::Config;
use unitrack::core::metrics::compute_cgpa;
use unitrack::core::models::{add_blank, default_semesters, remove_by_id, update, SemesterRecord};
use unitrack::core::numeric::parse_float_prefix;
use unitrack::{error, info, verbose};

/// Dispatch cgpa actions; no action shows the sheet
pub fn run(action: Option<CgpaAction>, config: &Config) -> Result<(), String> {
    let mut store = open_store(config);
    match action.unwrap_or(CgpaAction::Show) {
        CgpaAction::Show => show(&store),
        CgpaAction::Add { gpa } => {
            let gpa = gpa.as_deref().map(read_gpa);
            let mut semesters = store.semesters().map_err(|e| store_failure(&e))?;
            let id = add_blank(&mut semesters).ok_or_else(|| {
                error!("No semester id left after {}", u32::MAX);
                "✗ No semester id left to assign; remove or renumber rows first".to_string()
            })?;
            if let Some(gpa) = gpa {
                update(&mut semesters, id, |semester| semester.gpa = gpa);
            }
            save(&mut store, &semesters)?;
            println!("✓ Added semester {id}");
            show(&store)
        }
        CgpaAction::Set { id, gpa } => {
            let gpa = read_gpa(&gpa);
            let mut semesters = store.semesters().map_err(|e| store_failure(&e))?;
            if !update(&mut semesters, id, |semester| semester.gpa = gpa) {
                return Err(format!("✗ No semester with id {id}"));
            }
            save(&mut store, &semesters)?;
            println!("✓ Updated semester {id}");
            show(&store)
        }
        CgpaAction::Remove { id } => {
            let mut semesters = store.semesters().map_err(|e| store_failure(&e))?;
            if semesters.len() <= 1 {
                return Err("✗ The last semester cannot be removed".to_string());
            }
            if !remove_by_id(&mut semesters, id) {
                return Err(format!("✗ No semester with id {id}"));
            }
            save(&mut store, &semesters)?;
            println!("✓ Removed semester {id}");
            show(&store)
        }
        CgpaAction::Reset => {
            save(&mut store, &default_semesters())?;
            println!("✓ CGPA sheet reset");
            Ok(())
        }
        CgpaAction::Save => {
            let semesters = store.semesters().map_err(|e| store_failure(&e))?;
            let mut log = store.cgpa_history().map_err(|e| store_failure(&e))?;
            let cgpa = compute_cgpa(&semesters);
            let id = log.record(cgpa.clone(), &semesters).id;
            store
                .save_cgpa_history(&log)
                .map_err(|e| store_failure(&e))?;
            info!("Saved CGPA snapshot {id}");
            println!("✓ Saved CGPA {cgpa} (snapshot {id})");
            Ok(())
        }
        CgpaAction::History { action } => {
            let mut log = store.cgpa_history().map_err(|e| store_failure(&e))?;
            if let Outcome::Changed = history::run(action, &mut log, "CGPA", print_semesters)? {
                store
                    .save_cgpa_history(&log)
                    .map_err(|e| store_failure(&e))?;
            }
            Ok(())
        }
    }
}

/// Unreadable or non-finite GPA text counts as 0 (not entered)
fn read_gpa(text: &str) -> f64 {
    parse_float_prefix(text)
        .filter(|gpa| gpa.is_finite())
        .unwrap_or(0.0)
}

fn save(store: &mut Store, semesters: &[SemesterRecord]) -> Result<(), String> {
    store
        .save_semesters(semesters)
        .map_err(|e| store_failure(&e))?;
    verbose!("Saved {} semesters", semesters.len());
    Ok(())
}

fn show(store: &Store) -> Result<(), String> {
    let semesters = store.semesters().map_err(|e| store_failure(&e))?;
    print_semesters(&semesters);

    let entered = semesters.iter().filter(|s| s.is_set()).count();
    println!();
    println!("CGPA: {}", compute_cgpa(&semesters));
    println!("Based on {entered} semesters");
    Ok(())
}

fn print_semesters(semesters: &[SemesterRecord]) {
    println!("{:>8}  {:>6}", "Semester", "GPA");
    for semester in semesters {
        if semester.is_set() {
            println!("{:>8}  {:>6.2}", semester.id, semester.gpa);
        } else {
            println!("{:>8}  {:>6}", semester.id, "-");
        }
    }
}
