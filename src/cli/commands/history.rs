//! History subcommands shared by `gpa` and `cgpa`

use super::confirm;
use crate::args::HistoryAction;
use unitrack::core::models::History;

/// Outcome of a history action
pub enum Outcome {
    /// The log was only read
    Unchanged,
    /// The log was modified and must be saved
    Changed,
}

/// Apply `action` to `history`, printing the result.
///
/// `label` names the metric ("GPA" or "CGPA"); `render` prints the rows of
/// one snapshot.
pub fn run<T: Clone>(
    action: HistoryAction,
    history: &mut History<T>,
    label: &str,
    render: impl Fn(&[T]),
) -> Result<Outcome, String> {
    match action {
        HistoryAction::List => {
            if history.is_empty() {
                println!("No saved {label} snapshots");
                return Ok(Outcome::Unchanged);
            }
            println!("{:<15} {:<17} {:>6}  {}", "ID", "Saved", label, "Rows");
            for item in history.items() {
                println!(
                    "{:<15} {:<17} {:>6}  {}",
                    item.id,
                    item.date,
                    item.metric,
                    item.records.len()
                );
            }
            Ok(Outcome::Unchanged)
        }
        HistoryAction::Show { id } => {
            let item = history
                .get(id)
                .ok_or_else(|| format!("✗ No {label} snapshot with id {id}"))?;
            println!("{label} {} saved {}", item.metric, item.date);
            render(&item.records);
            Ok(Outcome::Unchanged)
        }
        HistoryAction::Delete { id } => {
            if !history.remove(id) {
                return Err(format!("✗ No {label} snapshot with id {id}"));
            }
            println!("✓ Deleted {label} snapshot {id}");
            Ok(Outcome::Changed)
        }
        HistoryAction::Clear { yes } => {
            if history.is_empty() {
                println!("✓ No {label} snapshots to clear");
                return Ok(Outcome::Unchanged);
            }
            if !yes && !confirm(&format!("Delete all {} {label} snapshots?", history.len())) {
                println!("✗ Clear cancelled");
                return Ok(Outcome::Unchanged);
            }
            history.clear();
            println!("✓ Cleared {label} history");
            Ok(Outcome::Changed)
        }
    }
}
