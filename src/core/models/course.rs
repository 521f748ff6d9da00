//! Course record and letter grades

use super::collection::Identified;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grades with a point value on the 10-point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// Outstanding (10 points)
    O,
    /// Excellent (9 points)
    APlus,
    /// Very good (8 points)
    A,
    /// Good (7 points)
    BPlus,
    /// Above average (6 points)
    B,
    /// Average (5 points)
    C,
    /// Fail (0 points)
    F,
}

impl Grade {
    /// Every grade with a point value, best first
    pub const ALL: [Self; 7] = [
        Self::O,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::C,
        Self::F,
    ];

    /// Grade points earned per credit
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::O => 10,
            Self::APlus => 9,
            Self::A => 8,
            Self::BPlus => 7,
            Self::B => 6,
            Self::C => 5,
            Self::F => 0,
        }
    }

    /// Token as printed on grade sheets (e.g. "A+")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == s)
            .ok_or_else(|| format!("Unknown grade '{s}' (expected one of O, A+, A, B+, B, C, F)"))
    }
}

/// A single course entry in the GPA calculator
///
/// The grade is kept as raw text: blank rows carry an empty grade, and
/// scraped rows may carry tokens such as `P` or `W` that have no point value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Sequential identifier (1-based)
    pub id: u32,

    /// Course name or code; empty when unknown
    #[serde(default)]
    pub name: String,

    /// Credit weight of the course
    #[serde(default)]
    pub credit: f64,

    /// Letter grade text (may be empty)
    #[serde(default)]
    pub grade: String,
}

impl CourseRecord {
    /// Create a new course record
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, credit: f64, grade: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            credit,
            grade: grade.into(),
        }
    }

    /// An empty row: no name, zero credit, no grade
    #[must_use]
    pub const fn blank(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            credit: 0.0,
            grade: String::new(),
        }
    }

    /// The grade as a recognized letter grade, if it has a point value
    #[must_use]
    pub fn letter_grade(&self) -> Option<Grade> {
        self.grade.parse().ok()
    }

    /// Whether this record takes part in the GPA: positive credit and a
    /// grade that has a point value
    #[must_use]
    pub fn counts_toward_gpa(&self) -> bool {
        self.credit > 0.0 && self.letter_grade().is_some()
    }
}

impl Identified for CourseRecord {
    fn id(&self) -> u32 {
        self.id
    }

    fn blank(id: u32) -> Self {
        Self::blank(id)
    }
}

/// Default GPA sheet: three blank rows
#[must_use]
pub fn default_subjects() -> Vec<CourseRecord> {
    (1..=3).map(CourseRecord::blank).collect()
}
