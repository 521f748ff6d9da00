//! CLI argument definitions for `UniTrack`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use unitrack::config::ConfigOverrides;
use unitrack::core::models::CourseType;
use unitrack::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// CLI course type argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum CourseTypeArg {
    /// Lecture-only course
    Theory,
    /// Lab course
    Practical,
    /// Lecture with an attached lab
    Joint,
}

impl From<CourseTypeArg> for CourseType {
    fn from(arg: CourseTypeArg) -> Self {
        match arg {
            CourseTypeArg::Theory => Self::Theory,
            CourseTypeArg::Practical => Self::Practical,
            CourseTypeArg::Joint => Self::Joint,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `matcher`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Saved-snapshot management shared by `gpa` and `cgpa`
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List saved snapshots, oldest first.
    List,
    /// Show the rows of one snapshot.
    Show {
        /// Snapshot id as printed by `history list`
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Delete one snapshot.
    Delete {
        /// Snapshot id as printed by `history list`
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Delete every snapshot (requires confirmation unless --yes).
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum GpaAction {
    /// Show the course sheet and the computed GPA.
    Show,
    /// Append a course row. Without options the row is blank.
    Add {
        /// Course name or code
        #[arg(long)]
        name: Option<String>,
        /// Credit weight
        #[arg(long)]
        credit: Option<String>,
        /// Letter grade (O, A+, A, B+, B, C, F)
        #[arg(long)]
        grade: Option<String>,
    },
    /// Edit fields of an existing course row.
    Set {
        /// Row id
        #[arg(value_name = "ID")]
        id: u32,
        /// Course name or code
        #[arg(long)]
        name: Option<String>,
        /// Credit weight
        #[arg(long)]
        credit: Option<String>,
        /// Letter grade (O, A+, A, B+, B, C, F); pass "" to clear
        #[arg(long)]
        grade: Option<String>,
    },
    /// Remove a course row (the last row is kept).
    Remove {
        /// Row id
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Restore the default three blank rows.
    Reset,
    /// Save the current GPA and rows as a history snapshot.
    Save,
    /// Manage saved GPA snapshots.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CgpaAction {
    /// Show the semester sheet and the computed CGPA.
    Show,
    /// Append a semester row, optionally with its GPA.
    Add {
        /// Semester GPA
        #[arg(value_name = "GPA")]
        gpa: Option<String>,
    },
    /// Set the GPA of an existing semester row.
    Set {
        /// Row id
        #[arg(value_name = "ID")]
        id: u32,
        /// Semester GPA (0 marks the semester as not entered)
        #[arg(value_name = "GPA")]
        gpa: String,
    },
    /// Remove a semester row (the last row is kept).
    Remove {
        /// Row id
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Restore the default single unset semester.
    Reset,
    /// Save the current CGPA and rows as a history snapshot.
    Save,
    /// Manage saved CGPA snapshots.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum AttendanceAction {
    /// Show attendance figures for the stored course.
    Show,
    /// Update the stored course. Omitted fields keep their value.
    Set {
        /// Course credit
        #[arg(long)]
        credit: Option<String>,
        /// Hours attended so far
        #[arg(long)]
        hours: Option<String>,
        /// Course type
        #[arg(long = "type", value_enum)]
        course_type: Option<CourseTypeArg>,
    },
    /// Record attended hours.
    Attend {
        /// Hours to add
        #[arg(value_name = "HOURS", default_value_t = 1)]
        hours: u32,
    },
    /// Take back attended hours (never below zero).
    Unattend {
        /// Hours to remove
        #[arg(value_name = "HOURS", default_value_t = 1)]
        hours: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Extract course rows from a saved grade-report page.
    ///
    /// Prints the rows as an import document, writes them to a file, or
    /// imports them directly.
    Extract {
        /// HTML file to scan ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the import document here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Replace the stored GPA sheet with the extracted rows
        #[arg(long)]
        import: bool,

        /// Header matcher (substring or strict); defaults to config `matcher`
        #[arg(long, value_name = "NAME")]
        matcher: Option<String>,
    },
    /// Import subjects and/or semesters from a JSON document.
    Import {
        /// JSON file to import ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Export the stored subjects and semesters as a JSON document.
    Export {
        /// Output file ("-" writes to stdout); defaults to a file in config `exports_dir`
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Semester GPA calculator.
    Gpa {
        #[command(subcommand)]
        action: Option<GpaAction>,
    },
    /// Cumulative GPA calculator.
    Cgpa {
        #[command(subcommand)]
        action: Option<CgpaAction>,
    },
    /// Attendance calculator for a single course.
    Attendance {
        #[command(subcommand)]
        action: Option<AttendanceAction>,
    },
    /// GPA needed next semester to reach a target CGPA.
    ///
    /// Given fields are stored; omitted fields keep their stored value.
    Target {
        /// Current CGPA
        #[arg(long, value_name = "CGPA")]
        current: Option<String>,
        /// Credits completed so far
        #[arg(long, value_name = "CREDITS")]
        completed: Option<String>,
        /// CGPA to reach
        #[arg(long, value_name = "CGPA")]
        target: Option<String>,
        /// Credits in the coming semester
        #[arg(long, value_name = "CREDITS")]
        next: Option<String>,
        /// Clear all stored fields first
        #[arg(long)]
        reset: bool,
    },
    /// Summary of GPA, CGPA and attendance.
    Dashboard,
    /// Delete all stored data (requires confirmation unless --yes).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "unitrack",
    about = "UniTrack academic tracker",
    version = unitrack::get_version()
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config exports directory
    #[arg(long = "config-exports-dir", value_name = "DIR")]
    pub config_exports_dir: Option<PathBuf>,

    /// Override config header matcher
    #[arg(long = "config-matcher", value_name = "NAME")]
    pub config_matcher: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form
    /// flags (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_text = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_text),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .or(self.config_data_dir.as_ref())
                .map(path_text),
            exports_dir: self.config_exports_dir.as_ref().map(path_text),
            matcher: self.config_matcher.clone(),
        }
    }
}
