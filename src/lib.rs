//! Shared library for `UniTrack`
//! Academic tracking: GPA, CGPA, attendance and target-GPA calculators,
//! grade-table extraction from saved portal pages, and local persistence.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
