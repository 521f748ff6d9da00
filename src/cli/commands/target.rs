//! Target-GPA command handler

use super::{open_store, store_failure};
use unitrack::config::Config;
use unitrack::core::metrics::{compute_required_gpa, is_reachable};
use unitrack::core::models::TargetInput;

/// Update the stored target form with any given fields and print the
/// required GPA
pub fn run(fields: TargetInput, reset: bool, config: &Config) -> Result<(), String> {
    let mut store = open_store(config);
    let mut input = if reset {
        TargetInput::default()
    } else {
        store.target().map_err(|e| store_failure(&e))?
    };

    let TargetInput {
        current_cgpa,
        completed_credits,
        target_cgpa,
        next_sem_credits,
    } = fields;
    for (slot, value) in [
        (&mut input.current_cgpa, current_cgpa),
        (&mut input.completed_credits, completed_credits),
        (&mut input.target_cgpa, target_cgpa),
        (&mut input.next_sem_credits, next_sem_credits),
    ] {
        if !value.is_empty() {
            *slot = value;
        }
    }

    store.save_target(&input).map_err(|e| store_failure(&e))?;

    println!("Current CGPA:       {}", display_field(&input.current_cgpa));
    println!("Completed credits:  {}", display_field(&input.completed_credits));
    println!("Target CGPA:        {}", display_field(&input.target_cgpa));
    println!("Next sem credits:   {}", display_field(&input.next_sem_credits));
    println!();

    let [current, completed, target, next] = input.values();
    match compute_required_gpa(current, completed, target, next) {
        Some(required) if is_reachable(&required) => {
            println!("Required GPA next semester: {required}");
        }
        Some(required) => {
            println!("Required GPA next semester: {required}");
            println!("✗ Not reachable in one semester (maximum is 10.00)");
        }
        None => println!("Fill in all four fields with finite numbers (next semester credits must be non-zero)"),
    }
    Ok(())
}

fn display_field(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
