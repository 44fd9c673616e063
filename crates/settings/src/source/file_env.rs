//! File-backed environment-variable source (the `_FILE` secrets pattern).
//!
//! Responsibilities:
//! - For each candidate variable `N` of a field, look up the companion
//!   variable `N_FILE` and, when it names a readable regular file, return
//!   the file's contents as the field's raw value.
//! - Downgrade every file-access problem to a `Warning` and fall through to
//!   the next candidate.
//!
//! Does NOT handle:
//! - Direct variable values (see env.rs).
//! - Required-field failures; an absent result falls through to validation
//!   (see settings.rs).
//!
//! Invariants:
//! - At most one file is read per field per resolution pass: the first
//!   candidate whose `_FILE` variable names a readable regular file wins
//!   and enumeration stops.
//! - File contents are returned verbatim: no trimming, no decoding beyond
//!   UTF-8 text. An empty file contributes an empty string, which is
//!   distinct from an absent value.
//! - Paths resolve relative to the process working directory unless
//!   absolute; no canonicalization beyond existence/type/readability.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{FieldValue, Source};
use crate::diagnostics::{Diagnostics, Warning};
use crate::field::FieldSpec;
use crate::snapshot::EnvSnapshot;

const FILE_SUFFIX: &str = "_FILE";

/// Resolves field values from files named by `_FILE` companion variables.
///
/// This is the Docker/Kubernetes secrets pattern: the secret is mounted as
/// a file and `FOO_FILE` carries its path, keeping the secret itself out of
/// the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEnvSource;

impl FileEnvSource {
    pub fn new() -> Self {
        Self
    }

    /// Read the file named by one `_FILE` variable, reporting any problem
    /// as a warning and returning `None` so the caller tries the next
    /// candidate.
    fn read_reference(var: String, path: &Path, diagnostics: &mut Diagnostics) -> Option<String> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                diagnostics.warn(Warning::MissingFile {
                    var,
                    path: path.to_path_buf(),
                });
                return None;
            }
            Err(e) => {
                diagnostics.warn(Warning::NoReadPermission {
                    var,
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
                return None;
            }
        };

        // fs::metadata follows symlinks, so a symlink to a regular file
        // passes this check.
        if !metadata.is_file() {
            diagnostics.warn(Warning::NotAFile {
                var,
                path: path.to_path_buf(),
            });
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                diagnostics.warn(Warning::NoReadPermission {
                    var,
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
                None
            }
        }
    }
}

impl Source for FileEnvSource {
    fn name(&self) -> &'static str {
        "file-env"
    }

    fn resolve(
        &self,
        field: &FieldSpec,
        env: &EnvSnapshot,
        diagnostics: &mut Diagnostics,
    ) -> FieldValue {
        for candidate in field.candidates(env) {
            let file_var = env.apply_case(&format!("{}{}", candidate.env_name, FILE_SUFFIX));
            let Some(raw_path) = env.get(&file_var) else {
                continue;
            };
            // An empty _FILE variable is "no file reference", not an error.
            if raw_path.is_empty() {
                continue;
            }
            let path = Path::new(raw_path);
            if let Some(contents) = Self::read_reference(file_var, path, diagnostics) {
                return FieldValue::found(candidate.key.as_str(), contents, candidate.complex);
            }
        }
        FieldValue::absent()
    }
}
