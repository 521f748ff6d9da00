//! Local persistence for the calculator sheets
//!
//! Everything is kept as JSON text under a handful of fixed keys. The
//! [`KeyValueStore`] trait is the raw text layer; [`AcademicStore`] adds the
//! typed load/save operations the commands use.

use crate::core::import::ImportPayload;
use crate::core::models::{
    default_semesters, default_subjects, AttendanceInput, CourseRecord, History, SemesterRecord,
    TargetInput,
};
use crate::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key of the GPA sheet rows
pub const SUBJECTS_KEY: &str = "gpa_subjects";
/// Key of the CGPA sheet rows
pub const SEMESTERS_KEY: &str = "cgpa_semesters";
/// Key of the attendance form
pub const ATTENDANCE_KEY: &str = "attendance_data";
/// Key of the target-GPA form
pub const TARGET_KEY: &str = "target_gpa_data";
/// Key of the GPA history log
pub const GPA_HISTORY_KEY: &str = "gpa_history";
/// Key of the CGPA history log
pub const CGPA_HISTORY_KEY: &str = "cgpa_history";

/// Every key the store writes
pub const ALL_KEYS: [&str; 6] = [
    SUBJECTS_KEY,
    SEMESTERS_KEY,
    ATTENDANCE_KEY,
    TARGET_KEY,
    GPA_HISTORY_KEY,
    CGPA_HISTORY_KEY,
];

/// Errors from reading or writing stored data
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file could not be read, written or removed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A value could not be encoded as JSON
    #[error("Failed to encode '{key}': {source}")]
    Encode {
        /// Store key being written
        key: String,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },
}

/// Raw text storage addressed by key
pub trait KeyValueStore {
    /// Stored text for `key`, or `None` when nothing is stored
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Forget `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// In-memory store, used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// What an import changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Subjects written, when the GPA sheet was replaced
    pub subjects: Option<usize>,
    /// Semesters written, when the CGPA sheet was replaced
    pub semesters: Option<usize>,
    /// Subject entries dropped by validation
    pub rejected_subjects: usize,
}

/// Typed access to the stored sheets, forms and history logs
#[derive(Debug, Clone)]
pub struct AcademicStore<S> {
    backend: S,
}

impl<S: KeyValueStore> AcademicStore<S> {
    /// Wrap a raw store
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Underlying raw store
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    fn load_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, StoreError> {
        let Some(text) = self.backend.get(key)? else {
            debug!("No stored '{key}', using defaults");
            return Ok(default());
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Stored '{key}' is unreadable ({e}); using defaults");
                Ok(default())
            }
        }
    }

    fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StoreError> {
        serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })
    }

    fn save_value<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = Self::encode(key, value)?;
        self.backend.set(key, &text)
    }

    /// GPA sheet rows. An empty stored sheet loads as the default three rows.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn subjects(&self) -> Result<Vec<CourseRecord>, StoreError> {
        let subjects: Vec<CourseRecord> = self.load_or(SUBJECTS_KEY, default_subjects)?;
        Ok(if subjects.is_empty() {
            default_subjects()
        } else {
            subjects
        })
    }

    /// Replace the GPA sheet rows
    ///
    /// # Errors
    /// Returns an error if the rows cannot be written.
    pub fn save_subjects(&mut self, subjects: &[CourseRecord]) -> Result<(), StoreError> {
        self.save_value(SUBJECTS_KEY, subjects)
    }

    /// CGPA sheet rows. An empty stored sheet loads as a single unset semester.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn semesters(&self) -> Result<Vec<SemesterRecord>, StoreError> {
        let semesters: Vec<SemesterRecord> = self.load_or(SEMESTERS_KEY, default_semesters)?;
        Ok(if semesters.is_empty() {
            default_semesters()
        } else {
            semesters
        })
    }

    /// Replace the CGPA sheet rows
    ///
    /// # Errors
    /// Returns an error if the rows cannot be written.
    pub fn save_semesters(&mut self, semesters: &[SemesterRecord]) -> Result<(), StoreError> {
        self.save_value(SEMESTERS_KEY, semesters)
    }

    /// Attendance form
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn attendance(&self) -> Result<AttendanceInput, StoreError> {
        self.load_or(ATTENDANCE_KEY, AttendanceInput::default)
    }

    /// Replace the attendance form
    ///
    /// # Errors
    /// Returns an error if the form cannot be written.
    pub fn save_attendance(&mut self, input: &AttendanceInput) -> Result<(), StoreError> {
        self.save_value(ATTENDANCE_KEY, input)
    }

    /// Target-GPA form
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn target(&self) -> Result<TargetInput, StoreError> {
        self.load_or(TARGET_KEY, TargetInput::default)
    }

    /// Replace the target-GPA form
    ///
    /// # Errors
    /// Returns an error if the form cannot be written.
    pub fn save_target(&mut self, input: &TargetInput) -> Result<(), StoreError> {
        self.save_value(TARGET_KEY, input)
    }

    /// GPA history log
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn gpa_history(&self) -> Result<History<CourseRecord>, StoreError> {
        self.load_or(GPA_HISTORY_KEY, History::default)
    }

    /// Replace the GPA history log
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    pub fn save_gpa_history(&mut self, history: &History<CourseRecord>) -> Result<(), StoreError> {
        self.save_value(GPA_HISTORY_KEY, history)
    }

    /// CGPA history log
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    pub fn cgpa_history(&self) -> Result<History<SemesterRecord>, StoreError> {
        self.load_or(CGPA_HISTORY_KEY, History::default)
    }

    /// Replace the CGPA history log
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    pub fn save_cgpa_history(
        &mut self,
        history: &History<SemesterRecord>,
    ) -> Result<(), StoreError> {
        self.save_value(CGPA_HISTORY_KEY, history)
    }

    /// Replace the sheets present in `payload`; the others are left alone.
    ///
    /// Both collections are encoded before anything is written. If the
    /// semesters cannot be written after the subjects were, the previous
    /// subjects are put back so the import applies in full or not at all.
    ///
    /// # Errors
    /// Returns an error if the data cannot be written.
    pub fn apply_import(&mut self, payload: &ImportPayload) -> Result<ImportSummary, StoreError> {
        let subjects = payload
            .subjects
            .as_ref()
            .map(|subjects| Self::encode(SUBJECTS_KEY, subjects).map(|text| (subjects.len(), text)))
            .transpose()?;
        let semesters = payload
            .semesters
            .as_ref()
            .map(|semesters| {
                Self::encode(SEMESTERS_KEY, semesters).map(|text| (semesters.len(), text))
            })
            .transpose()?;

        let mut summary = ImportSummary {
            rejected_subjects: payload.rejected_subjects,
            ..ImportSummary::default()
        };
        let previous_subjects = if subjects.is_some() && semesters.is_some() {
            Some(self.backend.get(SUBJECTS_KEY)?)
        } else {
            None
        };
        if let Some((count, text)) = subjects {
            self.backend.set(SUBJECTS_KEY, &text)?;
            summary.subjects = Some(count);
        }
        if let Some((count, text)) = semesters {
            if let Err(e) = self.backend.set(SEMESTERS_KEY, &text) {
                if let Some(previous) = previous_subjects {
                    self.restore(SUBJECTS_KEY, previous.as_deref());
                }
                return Err(e);
            }
            summary.semesters = Some(count);
        }
        Ok(summary)
    }

    /// Put `key` back to `previous`, removing it when nothing was stored
    fn restore(&mut self, key: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(text) => self.backend.set(key, text),
            None => self.backend.remove(key),
        };
        match restored {
            Ok(()) => debug!("Restored '{key}' after a failed import"),
            Err(e) => warn!("Could not restore '{key}' after a failed import: {e}"),
        }
    }

    /// Remove every stored key, so the next load sees defaults
    ///
    /// # Errors
    /// Returns an error if a key cannot be removed.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.backend.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseType;
    use pretty_assertions::assert_eq;

    fn store() -> AcademicStore<MemoryStore> {
        AcademicStore::new(MemoryStore::new())
    }

    #[test]
    fn test_missing_keys_load_defaults() {
        let store = store();
        assert_eq!(store.subjects().unwrap(), default_subjects());
        assert_eq!(store.semesters().unwrap(), default_semesters());
        assert_eq!(store.attendance().unwrap(), AttendanceInput::default());
        assert_eq!(store.target().unwrap(), TargetInput::default());
        assert!(store.gpa_history().unwrap().is_empty());
        assert!(store.cgpa_history().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_value_loads_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(SUBJECTS_KEY, "{not json").unwrap();
        backend.set(ATTENDANCE_KEY, "[]").unwrap();
        let store = AcademicStore::new(backend);
        assert_eq!(store.subjects().unwrap(), default_subjects());
        assert_eq!(store.attendance().unwrap(), AttendanceInput::default());
    }

    #[test]
    fn test_empty_sheet_loads_defaults() {
        let mut store = store();
        store.save_semesters(&[]).unwrap();
        assert_eq!(store.semesters().unwrap(), default_semesters());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = store();
        let subjects = vec![CourseRecord::new(1, "Maths", 4.0, "O")];
        store.save_subjects(&subjects).unwrap();
        assert_eq!(store.subjects().unwrap(), subjects);

        let input = AttendanceInput::new(3, 30, CourseType::Joint);
        store.save_attendance(&input).unwrap();
        assert_eq!(store.attendance().unwrap(), input);
    }

    #[test]
    fn test_apply_import_replaces_only_present_sheets() {
        let mut store = store();
        store.save_semesters(&[SemesterRecord::new(1, 9.0)]).unwrap();

        let payload = ImportPayload::from_subjects(vec![CourseRecord::new(1, "Art", 2.0, "A")]);
        let summary = store.apply_import(&payload).unwrap();

        assert_eq!(summary.subjects, Some(1));
        assert_eq!(summary.semesters, None);
        assert_eq!(store.semesters().unwrap(), vec![SemesterRecord::new(1, 9.0)]);
        assert_eq!(store.subjects().unwrap()[0].name, "Art");
    }

    /// Memory store that refuses to write one key
    struct RefusingStore {
        inner: MemoryStore,
        refused: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.refused {
                return Err(StoreError::Io {
                    path: PathBuf::from(format!("{key}.json")),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_import_keeps_previous_sheets() {
        let mut inner = MemoryStore::new();
        let kept = vec![CourseRecord::new(1, "Maths", 4.0, "O")];
        inner
            .set(SUBJECTS_KEY, &serde_json::to_string(&kept).unwrap())
            .unwrap();
        let mut store = AcademicStore::new(RefusingStore {
            inner,
            refused: SEMESTERS_KEY,
        });

        let payload = ImportPayload {
            subjects: Some(vec![CourseRecord::new(1, "Art", 2.0, "A")]),
            semesters: Some(vec![SemesterRecord::new(1, 8.0)]),
            rejected_subjects: 0,
        };
        assert!(store.apply_import(&payload).is_err());
        assert_eq!(store.subjects().unwrap(), kept);
    }

    #[test]
    fn test_failed_import_removes_new_subjects_key() {
        let mut store = AcademicStore::new(RefusingStore {
            inner: MemoryStore::new(),
            refused: SEMESTERS_KEY,
        });

        let payload = ImportPayload {
            subjects: Some(vec![CourseRecord::new(1, "Art", 2.0, "A")]),
            semesters: Some(vec![]),
            rejected_subjects: 0,
        };
        assert!(store.apply_import(&payload).is_err());
        assert!(store.backend().inner.is_empty());
    }

    #[test]
    fn test_reset_all() {
        let mut store = store();
        store.save_subjects(&[CourseRecord::new(1, "Maths", 4.0, "O")]).unwrap();
        store.save_target(&TargetInput::default()).unwrap();
        store.reset_all().unwrap();
        assert!(store.backend().is_empty());
        assert_eq!(store.subjects().unwrap(), default_subjects());
    }
}
