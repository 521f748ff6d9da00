//! Attendance input and derived result

use crate::core::numeric::{clamp_to_u32, lenient_u32, parse_int_prefix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of course, which decides the number of contact hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseType {
    /// Lecture-only course
    #[default]
    Theory,
    /// Lab course
    Practical,
    /// Lecture with an attached lab
    Joint,
}

impl CourseType {
    /// Whether the course carries an extra block of lab hours
    #[must_use]
    pub const fn has_lab(self) -> bool {
        matches!(self, Self::Practical | Self::Joint)
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Theory => "Theory",
            Self::Practical => "Practical",
            Self::Joint => "Joint",
        };
        f.write_str(name)
    }
}

impl FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theory" => Ok(Self::Theory),
            "practical" => Ok(Self::Practical),
            "joint" => Ok(Self::Joint),
            _ => Err(format!(
                "Unknown course type '{s}' (expected Theory, Practical or Joint)"
            )),
        }
    }
}

/// Attendance figures entered for a single course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    /// Course credit (1-5 in practice)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub credit: u32,

    /// Contact hours attended so far
    #[serde(default, deserialize_with = "lenient_u32")]
    pub hours_attended: u32,

    /// Course kind
    #[serde(default)]
    pub course_type: CourseType,
}

impl AttendanceInput {
    /// Create a new attendance input
    #[must_use]
    pub const fn new(credit: u32, hours_attended: u32, course_type: CourseType) -> Self {
        Self {
            credit,
            hours_attended,
            course_type,
        }
    }

    /// Build from form text. Unreadable or negative numbers become 0.
    #[must_use]
    pub fn from_text(credit: &str, hours_attended: &str, course_type: CourseType) -> Self {
        let read = |text: &str| parse_int_prefix(text).map_or(0, clamp_to_u32);
        Self::new(read(credit), read(hours_attended), course_type)
    }

    /// Add (or, with a negative delta, remove) attended hours, never going below 0
    pub fn adjust_hours(&mut self, delta: i64) {
        self.hours_attended = clamp_to_u32(i64::from(self.hours_attended) + delta);
    }
}

/// Whether attendance meets the 75% threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// At or above 75%
    Good,
    /// Below 75%
    Low,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Good => "Good",
            Self::Low => "Low",
        })
    }
}

/// Derived attendance figures. Recomputed from [`AttendanceInput`] on every
/// read and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResult {
    /// Attendance percentage with two decimals (e.g. "66.67")
    pub percentage: String,
    /// Total contact hours for the course
    pub total_hours: u32,
    /// Hours that may be missed while staying at 75%, no decimals
    pub allowable_leave: String,
    /// Threshold status
    pub status: AttendanceStatus,
    /// Consecutive classes to attend to climb back to 75% (only when low)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_needed: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let input = AttendanceInput::from_text("4", "40", CourseType::Theory);
        assert_eq!(input, AttendanceInput::new(4, 40, CourseType::Theory));

        let input = AttendanceInput::from_text("", "abc", CourseType::Joint);
        assert_eq!(input, AttendanceInput::new(0, 0, CourseType::Joint));
    }

    #[test]
    fn test_adjust_hours_floors_at_zero() {
        let mut input = AttendanceInput::new(3, 1, CourseType::Theory);
        input.adjust_hours(-1);
        assert_eq!(input.hours_attended, 0);
        input.adjust_hours(-1);
        assert_eq!(input.hours_attended, 0);
        input.adjust_hours(5);
        assert_eq!(input.hours_attended, 5);
    }

    #[test]
    fn test_deserialize_stored_strings() {
        let input: AttendanceInput = serde_json::from_str(
            r#"{"credit": "2", "hoursAttended": "20", "courseType": "Practical"}"#,
        )
        .unwrap();
        assert_eq!(input, AttendanceInput::new(2, 20, CourseType::Practical));
    }

    #[test]
    fn test_deserialize_blank_form() {
        let input: AttendanceInput =
            serde_json::from_str(r#"{"credit": "", "hoursAttended": "", "courseType": "Theory"}"#)
                .unwrap();
        assert_eq!(input, AttendanceInput::default());
    }

    #[test]
    fn test_course_type_parse() {
        assert_eq!("practical".parse::<CourseType>(), Ok(CourseType::Practical));
        assert_eq!("Joint".parse::<CourseType>(), Ok(CourseType::Joint));
        assert!("lab".parse::<CourseType>().is_err());
    }
}
