//! Immutable environment snapshots.
//!
//! Responsibilities:
//! - Capture the process environment (or an explicit variable map) once per
//!   load into an immutable name -> value mapping.
//! - Carry the naming policy for the load: optional env prefix and case
//!   sensitivity.
//!
//! Does NOT handle:
//! - Candidate enumeration for a field (see field.rs).
//! - Deciding which variable supplies a field's value (see source/).
//!
//! Invariants:
//! - A snapshot never changes for the duration of one resolution pass.
//! - With `CaseSensitivity::Insensitive` (the default), variable names are
//!   stored lowercased and every lookup name must be normalized through
//!   `apply_case` before calling `get`.

use std::collections::BTreeMap;

/// Whether environment variable names are matched exactly or normalized to
/// lowercase before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

/// An immutable view of the environment for one resolution pass.
#[derive(Debug, Clone)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
    prefix: String,
    case: CaseSensitivity,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process(prefix: impl Into<String>, case: CaseSensitivity) -> Self {
        Self::from_vars(std::env::vars(), prefix, case)
    }

    /// Build a snapshot from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I, prefix: impl Into<String>, case: CaseSensitivity) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let normalized = vars
            .into_iter()
            .map(|(k, v)| {
                let name = match case {
                    CaseSensitivity::Sensitive => k.into(),
                    CaseSensitivity::Insensitive => k.into().to_lowercase(),
                };
                (name, v.into())
            })
            .collect();
        Self {
            vars: normalized,
            prefix: prefix.into(),
            case,
        }
    }

    /// The env prefix applied to field-derived variable names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    /// Normalize a variable name according to the snapshot's case policy.
    pub fn apply_case(&self, name: &str) -> String {
        match self.case {
            CaseSensitivity::Sensitive => name.to_string(),
            CaseSensitivity::Insensitive => name.to_lowercase(),
        }
    }

    /// Look up a variable by its already-normalized name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}
