//! Data models for `UniTrack`

pub mod attendance;
pub mod collection;
pub mod course;
pub mod history;
pub mod semester;
pub mod target;

pub use attendance::{AttendanceInput, AttendanceResult, AttendanceStatus, CourseType};
pub use collection::{add_blank, next_id, remove_by_id, update, Identified};
pub use course::{default_subjects, CourseRecord, Grade};
pub use history::{CgpaHistoryItem, GpaHistoryItem, History, HistoryItem};
pub use semester::{default_semesters, SemesterRecord};
pub use target::TargetInput;
