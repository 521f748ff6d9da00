//! Semester record

use super::collection::Identified;
use serde::{Deserialize, Serialize};

/// A completed semester and the GPA earned in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Semester number
    pub id: u32,

    /// Semester GPA on the 10-point scale; 0 means not entered yet
    #[serde(default)]
    pub gpa: f64,
}

impl SemesterRecord {
    /// Create a new semester record
    #[must_use]
    pub const fn new(id: u32, gpa: f64) -> Self {
        Self { id, gpa }
    }

    /// Whether a GPA has been entered. A GPA of exactly 0 means unset.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.gpa > 0.0
    }
}

impl Identified for SemesterRecord {
    fn id(&self) -> u32 {
        self.id
    }

    fn blank(id: u32) -> Self {
        Self::new(id, 0.0)
    }
}

/// Default CGPA sheet: a single unset semester
#[must_use]
pub fn default_semesters() -> Vec<SemesterRecord> {
    vec![SemesterRecord::new(1, 0.0)]
}
