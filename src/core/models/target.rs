//! Target-GPA planner input

use crate::core::numeric::parse_float_prefix;
use serde::{Deserialize, Serialize};

/// The four fields of the target-GPA planner, kept as the text the user
/// entered so that a half-filled form survives a restart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInput {
    /// Current CGPA
    #[serde(default)]
    pub current_cgpa: String,
    /// Credits completed so far
    #[serde(default)]
    pub completed_credits: String,
    /// CGPA to reach
    #[serde(default)]
    pub target_cgpa: String,
    /// Credits in the coming semester
    #[serde(default)]
    pub next_sem_credits: String,
}

impl TargetInput {
    /// Numeric values of the four fields, in calculator argument order.
    /// Unreadable fields become NaN so the calculator rejects them.
    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        [
            &self.current_cgpa,
            &self.completed_credits,
            &self.target_cgpa,
            &self.next_sem_credits,
        ]
        .map(|field| parse_float_prefix(field).unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_reads_prefixes() {
        let input = TargetInput {
            current_cgpa: "8.0".to_string(),
            completed_credits: "100".to_string(),
            target_cgpa: "8.2".to_string(),
            next_sem_credits: "20 credits".to_string(),
        };
        assert_eq!(input.values(), [8.0, 100.0, 8.2, 20.0]);
    }

    #[test]
    fn test_blank_field_is_nan() {
        let values = TargetInput::default().values();
        assert!(values.iter().all(|v| v.is_nan()));
    }
}
