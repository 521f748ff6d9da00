//! Header-to-column mapping for grade tables
//!
//! Deciding which column holds the course, credit and grade is the fragile
//! part of scraping an unknown page, so it sits behind [`ColumnMatcher`].

/// Column positions found in a table header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMap {
    /// Course name/code column
    pub course: Option<usize>,
    /// Credit column
    pub credit: Option<usize>,
    /// Grade/result column
    pub grade: Option<usize>,
}

impl ColumnMap {
    /// A table is a grade table when both a course and a grade column exist.
    /// The credit column is optional.
    #[must_use]
    pub const fn is_grade_table(&self) -> bool {
        self.course.is_some() && self.grade.is_some()
    }

    /// Highest of the course and grade positions. A body row needs more
    /// cells than this to be read.
    #[must_use]
    pub fn required_index(&self) -> Option<usize> {
        Some(self.course?.max(self.grade?))
    }
}

/// Strategy for locating columns from header cell texts
pub trait ColumnMatcher {
    /// Short name used in configuration
    fn name(&self) -> &'static str;

    /// Map header texts (in column order) to column positions
    fn locate(&self, headers: &[String]) -> ColumnMap;
}

const COURSE_KEYWORDS: &[&str] = &["course", "subject", "code"];
const CREDIT_KEYWORDS: &[&str] = &["credit"];
const GRADE_KEYWORDS: &[&str] = &["grade", "result"];

/// Lower-cased substring search; the first header containing any keyword wins.
///
/// This is deliberately loose: "Course Code" and "Subject Title" both match
/// the course column, and "Credits Earned" matches the credit column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl SubstringMatcher {
    fn first_containing(headers: &[String], keywords: &[&str]) -> Option<usize> {
        headers.iter().position(|header| {
            let header = header.to_lowercase();
            keywords.iter().any(|keyword| header.contains(keyword))
        })
    }
}

impl ColumnMatcher for SubstringMatcher {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn locate(&self, headers: &[String]) -> ColumnMap {
        ColumnMap {
            course: Self::first_containing(headers, COURSE_KEYWORDS),
            credit: Self::first_containing(headers, CREDIT_KEYWORDS),
            grade: Self::first_containing(headers, GRADE_KEYWORDS),
        }
    }
}

const COURSE_LABELS: &[&str] = &[
    "course",
    "course code",
    "course name",
    "course title",
    "subject",
    "subject code",
    "subject name",
    "subject title",
    "code",
];
const CREDIT_LABELS: &[&str] = &["credit", "credits", "credit hours", "cr"];
const GRADE_LABELS: &[&str] = &["grade", "grades", "letter grade", "grade obtained", "result"];

/// Whole-label matching on normalized headers.
///
/// Headers are lower-cased and punctuation is folded to single spaces, so
/// "Course&nbsp;Code" and "course-code" both read as `course code`, but
/// "Course Registration Status" matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictMatcher;

impl StrictMatcher {
    fn normalize(header: &str) -> String {
        header
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn first_equal(normalized: &[String], labels: &[&str]) -> Option<usize> {
        normalized
            .iter()
            .position(|header| labels.contains(&header.as_str()))
    }
}

impl ColumnMatcher for StrictMatcher {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn locate(&self, headers: &[String]) -> ColumnMap {
        let normalized: Vec<String> = headers.iter().map(|h| Self::normalize(h)).collect();
        ColumnMap {
            course: Self::first_equal(&normalized, COURSE_LABELS),
            credit: Self::first_equal(&normalized, CREDIT_LABELS),
            grade: Self::first_equal(&normalized, GRADE_LABELS),
        }
    }
}

/// Look up a matcher by its configuration name (case-insensitive)
#[must_use]
pub fn matcher_by_name(name: &str) -> Option<Box<dyn ColumnMatcher>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "substring" | "" => Some(Box::new(SubstringMatcher)),
        "strict" => Some(Box::new(StrictMatcher)),
        _ => None,
    }
}
