//! Core module: calculators, extraction, import/export and persistence

pub mod config;
pub mod extract;
pub mod import;
pub mod metrics;
pub mod models;
pub mod numeric;
pub mod store;

/// Returns the current version of the `UniTrack` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
