//! Non-fatal diagnostics for file-backed variable resolution.
//!
//! Responsibilities:
//! - Define the warning taxonomy for unreadable `_FILE` references.
//! - Collect warnings during a load and mirror them to `tracing`.
//!
//! Does NOT handle:
//! - Fatal validation failures (see error.rs); no warning ever aborts a
//!   load.
//!
//! Invariants:
//! - Every warning carries the offending variable name and path; permission
//!   failures additionally carry the OS error text.
//! - All kinds belong to the single "unreadable file reference" family, so
//!   callers can match broadly or on a specific kind.

use std::fmt;
use std::path::{Path, PathBuf};

/// A `_FILE` variable referenced a file that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The referenced path does not exist.
    MissingFile { var: String, path: PathBuf },
    /// The referenced path exists but is not a regular file or a symlink to
    /// one (e.g. a directory).
    NotAFile { var: String, path: PathBuf },
    /// The referenced path is a regular file but reading it failed at the
    /// OS level.
    NoReadPermission {
        var: String,
        path: PathBuf,
        error: String,
    },
}

/// Discriminant for [`Warning`], for callers that match on kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    MissingFile,
    NotAFile,
    NoReadPermission,
}

impl Warning {
    pub fn kind(&self) -> WarningKind {
        match self {
            Warning::MissingFile { .. } => WarningKind::MissingFile,
            Warning::NotAFile { .. } => WarningKind::NotAFile,
            Warning::NoReadPermission { .. } => WarningKind::NoReadPermission,
        }
    }

    /// Every kind specializes the base "unreadable file reference" category.
    pub fn is_unreadable_file(&self) -> bool {
        matches!(
            self.kind(),
            WarningKind::MissingFile | WarningKind::NotAFile | WarningKind::NoReadPermission
        )
    }

    /// The environment variable that carried the file reference.
    pub fn var(&self) -> &str {
        match self {
            Warning::MissingFile { var, .. }
            | Warning::NotAFile { var, .. }
            | Warning::NoReadPermission { var, .. } => var,
        }
    }

    /// The referenced path.
    pub fn path(&self) -> &Path {
        match self {
            Warning::MissingFile { path, .. }
            | Warning::NotAFile { path, .. }
            | Warning::NoReadPermission { path, .. } => path,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingFile { var, path } => write!(
                f,
                "environment variable {var} references non-existent file: {}",
                path.display()
            ),
            Warning::NotAFile { var, path } => write!(
                f,
                "environment variable {var} references file that is not a regular file or symlink: {}",
                path.display()
            ),
            Warning::NoReadPermission { var, error, .. } => write!(
                f,
                "environment variable {var} references file that we have insufficient permissions to read: {error}"
            ),
        }
    }
}

/// Collects warnings for one load and mirrors each to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(
            kind = ?warning.kind(),
            var = warning.var(),
            path = %warning.path().display(),
            "{warning}"
        );
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_variable_and_path() {
        let missing = Warning::MissingFile {
            var: "baz_file".into(),
            path: PathBuf::from("/run/secrets/missing"),
        };
        assert_eq!(
            missing.to_string(),
            "environment variable baz_file references non-existent file: /run/secrets/missing"
        );

        let not_a_file = Warning::NotAFile {
            var: "baz_file".into(),
            path: PathBuf::from("/run/secrets"),
        };
        assert_eq!(
            not_a_file.to_string(),
            "environment variable baz_file references file that is not a regular file or symlink: /run/secrets"
        );
    }

    #[test]
    fn permission_message_includes_os_error_text() {
        let warning = Warning::NoReadPermission {
            var: "baz_file".into(),
            path: PathBuf::from("/run/secrets/baz"),
            error: "Permission denied (os error 13)".into(),
        };
        assert!(warning.to_string().contains("insufficient permissions"));
        assert!(warning.to_string().contains("Permission denied"));
    }

    #[test]
    fn every_kind_is_in_the_unreadable_file_family() {
        let warnings = [
            Warning::MissingFile {
                var: "a".into(),
                path: PathBuf::from("x"),
            },
            Warning::NotAFile {
                var: "b".into(),
                path: PathBuf::from("y"),
            },
            Warning::NoReadPermission {
                var: "c".into(),
                path: PathBuf::from("z"),
                error: "denied".into(),
            },
        ];
        assert!(warnings.iter().all(Warning::is_unreadable_file));
    }

    #[test]
    fn diagnostics_collects_in_emission_order() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.warn(Warning::MissingFile {
            var: "first".into(),
            path: PathBuf::from("1"),
        });
        diags.warn(Warning::NotAFile {
            var: "second".into(),
            path: PathBuf::from("2"),
        });

        let vars: Vec<&str> = diags.warnings().iter().map(Warning::var).collect();
        assert_eq!(vars, ["first", "second"]);
    }
}
