//! Error types for settings loading.
//!
//! Responsibilities:
//! - Define error variants for all settings-loading failures.
//!
//! Does NOT handle:
//! - Per-candidate file-access problems; those are non-fatal and surface as
//!   `Warning`s through the diagnostics channel (see diagnostics.rs).
//!
//! Invariants:
//! - `FieldRequired` names canonical field keys, never file paths.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret
//!   leakage; they carry only the parse position or the I/O error kind.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// One or more required fields received no value from any source.
    #[error("required fields have no value from any source: {}", .keys.join(", "))]
    FieldRequired { keys: Vec<String> },

    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Failed to parse a `.env` file due to invalid syntax.
    ///
    /// Only the byte index of the failure is included, NOT the offending
    /// line content.
    #[error(
        "failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read a `.env` file due to an I/O error.
    #[error("failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
