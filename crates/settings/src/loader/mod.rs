//! Settings loader: dotenv stage, snapshot capture, and the source chain.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` that captures an environment
//!   snapshot and runs every schema field through the ordered source chain.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading
//!   in tests.
//!
//! Does NOT handle:
//! - Per-source resolution logic (see source/).
//! - Validation and typed access (see settings.rs).
//!
//! Invariants / Assumptions:
//! - For each field, the first source in the chain that contributes a value
//!   wins; later sources are not consulted for that field.
//! - Programmatic overrides sit ahead of every other source.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading and
//!   runs BEFORE snapshot capture; it never overrides variables already set.
//! - The default chain is direct env vars, then `_FILE` env vars.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::SettingsError;
use crate::field::Schema;
use crate::settings::{Entry, Resolved, Settings};
use crate::snapshot::{CaseSensitivity, EnvSnapshot};
use crate::source::{EnvSource, FileEnvSource, OverridesSource, Source};

/// Builder that loads settings for a schema from an ordered source chain.
pub struct SettingsLoader {
    schema: Schema,
    prefix: String,
    case: CaseSensitivity,
    overrides: OverridesSource,
    sources: Vec<Box<dyn Source>>,
    vars: Option<Vec<(String, String)>>,
}

impl std::fmt::Debug for SettingsLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsLoader")
            .field("schema", &self.schema)
            .field("prefix", &self.prefix)
            .field("case", &self.case)
            .field("sources", &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SettingsLoader {
    /// Create a loader with the default chain: env vars, then `_FILE` vars.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            prefix: String::new(),
            case: CaseSensitivity::Insensitive,
            overrides: OverridesSource::new(),
            sources: vec![Box::new(EnvSource::new()), Box::new(FileEnvSource::new())],
            vars: None,
        }
    }

    /// Prefix applied to field-derived variable names (not to aliases).
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    /// Set a programmatic override for one field, ahead of every source.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.set(key, value);
        self
    }

    /// Replace the source chain (overrides stay ahead regardless).
    pub fn with_sources(mut self, sources: Vec<Box<dyn Source>>) -> Self {
        self.sources = sources;
        self
    }

    /// Resolve against an explicit variable set instead of the process
    /// environment. Primarily for tests.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file in the working
    /// directory, if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or
    /// "1", the `.env` file is not loaded (useful for testing). Missing
    /// `.env` files are silently ignored.
    ///
    /// Error messages never include raw `.env` line contents.
    pub fn load_dotenv(self) -> Result<Self, SettingsError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(Self::map_dotenv_error(e)),
        }
    }

    /// Load environment variables from an explicit `.env` file path.
    ///
    /// Unlike [`load_dotenv`](Self::load_dotenv), a missing file is an
    /// error: the caller named the path deliberately.
    pub fn load_dotenv_from(self, path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::from_path(path.as_ref()) {
            Ok(()) => Ok(self),
            Err(e) => Err(Self::map_dotenv_error(e)),
        }
    }

    fn map_dotenv_error(error: dotenvy::Error) -> SettingsError {
        match error {
            dotenvy::Error::LineParse(_, idx) => SettingsError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => SettingsError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => SettingsError::DotenvUnknown,
        }
    }

    /// Capture the snapshot and run every field through the chain.
    ///
    /// Never fails: file-access problems surface as warnings on the
    /// returned [`Resolved`].
    pub fn resolve(self) -> Resolved {
        let snapshot = match self.vars {
            Some(vars) => EnvSnapshot::from_vars(vars, self.prefix, self.case),
            None => EnvSnapshot::from_process(self.prefix, self.case),
        };

        let mut diagnostics = Diagnostics::new();
        let mut entries = BTreeMap::new();

        for field in self.schema.fields() {
            let mut chosen = None;

            let from_overrides = self.overrides.resolve(field, &snapshot, &mut diagnostics);
            if !from_overrides.is_absent() {
                chosen = Some((from_overrides, self.overrides.name()));
            } else {
                for source in &self.sources {
                    let value = source.resolve(field, &snapshot, &mut diagnostics);
                    if !value.is_absent() {
                        chosen = Some((value, source.name()));
                        break;
                    }
                }
            }

            if let Some((value, source)) = chosen
                && let Some(raw) = value.value
            {
                tracing::debug!(field = field.key(), source, "field resolved");
                entries.insert(
                    field.key().to_string(),
                    Entry {
                        raw,
                        complex: value.complex,
                        source,
                    },
                );
            }
        }

        Resolved::new(self.schema, entries, diagnostics)
    }

    /// Resolve and build in one step.
    pub fn load(self) -> Result<Settings, SettingsError> {
        self.resolve().build()
    }
}
