//! Row editing shared by the GPA and CGPA sheets

/// A row with a stable numeric id
pub trait Identified: Sized {
    /// Row identifier
    fn id(&self) -> u32;

    /// A fresh empty row with the given id
    fn blank(id: u32) -> Self;
}

/// Next free id: one past the largest id in use, starting at 1.
///
/// `None` once the largest id is `u32::MAX`.
#[must_use]
pub fn next_id<T: Identified>(rows: &[T]) -> Option<u32> {
    rows.iter().map(Identified::id).max().unwrap_or(0).checked_add(1)
}

/// Append a blank row and return its id.
///
/// Nothing is appended when no id is left after the largest one in use.
pub fn add_blank<T: Identified>(rows: &mut Vec<T>) -> Option<u32> {
    let id = next_id(rows)?;
    rows.push(T::blank(id));
    Some(id)
}

/// Remove the row with `id`.
///
/// The last remaining row is never removed, so a sheet always has at least
/// one row to edit.
///
/// # Returns
/// `true` when a row was removed
pub fn remove_by_id<T: Identified>(rows: &mut Vec<T>, id: u32) -> bool {
    if rows.len() <= 1 {
        return false;
    }
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    rows.len() != before
}

/// Apply `edit` to the row with `id`
///
/// # Returns
/// `true` when the row exists
pub fn update<T: Identified>(rows: &mut [T], id: u32, edit: impl FnOnce(&mut T)) -> bool {
    rows.iter_mut().find(|row| row.id() == id).map(edit).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseRecord, SemesterRecord};

    #[test]
    fn test_next_id_after_gaps() {
        let rows = vec![SemesterRecord::new(1, 8.0), SemesterRecord::new(5, 9.0)];
        assert_eq!(next_id(&rows), Some(6));
        assert_eq!(next_id::<SemesterRecord>(&[]), Some(1));
    }

    #[test]
    fn test_add_blank() {
        let mut rows = vec![CourseRecord::new(2, "Physics", 4.0, "A")];
        let id = add_blank(&mut rows);
        assert_eq!(id, Some(3));
        assert_eq!(rows[1], CourseRecord::blank(3));
    }

    #[test]
    fn test_add_blank_after_largest_id() {
        let mut rows = vec![CourseRecord::new(u32::MAX, "Thesis", 3.0, "A")];
        assert_eq!(next_id(&rows), None);
        assert_eq!(add_blank(&mut rows), None);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_remove_keeps_last_row() {
        let mut rows = vec![SemesterRecord::new(1, 8.0), SemesterRecord::new(2, 9.0)];
        assert!(remove_by_id(&mut rows, 1));
        assert!(!remove_by_id(&mut rows, 2));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut rows = vec![SemesterRecord::new(1, 8.0), SemesterRecord::new(2, 9.0)];
        assert!(!remove_by_id(&mut rows, 9));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_update() {
        let mut rows = vec![SemesterRecord::new(1, 0.0)];
        assert!(update(&mut rows, 1, |s| s.gpa = 8.4));
        assert!(!update(&mut rows, 2, |s| s.gpa = 1.0));
        assert!((rows[0].gpa - 8.4).abs() < f64::EPSILON);
    }
}
