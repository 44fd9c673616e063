//! Resolution outcome and the built settings value.
//!
//! Responsibilities:
//! - Hold the raw per-field values a resolution pass produced (`Resolved`).
//! - Validate and build the final `Settings`: apply field defaults, parse
//!   complex values as JSON, fail on required fields with no value.
//! - Provide typed accessors on the built settings.
//!
//! Does NOT handle:
//! - Source ordering or per-source resolution (see loader/ and source/).
//!
//! Invariants:
//! - `FieldRequired` names canonical field keys in schema order, never file
//!   paths or alias names.
//! - Warnings collected during resolution stay observable on both
//!   `Resolved` and the built `Settings`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use secrecy::SecretString;

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::SettingsError;
use crate::field::Schema;

/// One field's raw contribution, with source attribution.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub raw: String,
    pub complex: bool,
    pub source: &'static str,
}

/// The outcome of one resolution pass, before validation.
///
/// Kept separate from [`Settings`] so callers (and tests) can inspect
/// warnings even when validation subsequently fails.
#[derive(Debug)]
pub struct Resolved {
    schema: Schema,
    entries: BTreeMap<String, Entry>,
    diagnostics: Diagnostics,
}

impl Resolved {
    pub(crate) fn new(
        schema: Schema,
        entries: BTreeMap<String, Entry>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            schema,
            entries,
            diagnostics,
        }
    }

    /// The raw value resolved for a field, if any source contributed one.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.raw.as_str())
    }

    /// Which source contributed the field's value.
    pub fn source(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(|e| e.source)
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    /// Validate and build the final settings.
    ///
    /// Applies field defaults, parses complex values as JSON, and fails
    /// with [`SettingsError::FieldRequired`] when a required field received
    /// no value from any source.
    pub fn build(self) -> Result<Settings, SettingsError> {
        let mut values = BTreeMap::new();
        let mut missing = Vec::new();

        for field in self.schema.fields() {
            let (raw, complex) = match self.entries.get(field.key()) {
                Some(entry) => (Some(entry.raw.clone()), entry.complex),
                None => (field.default().map(str::to_string), field.is_complex()),
            };
            let Some(raw) = raw else {
                if field.is_required() {
                    missing.push(field.key().to_string());
                }
                continue;
            };
            let value = if complex {
                let parsed: serde_json::Value =
                    serde_json::from_str(&raw).map_err(|e| SettingsError::InvalidValue {
                        field: field.key().to_string(),
                        message: format!("invalid JSON for complex field: {e}"),
                    })?;
                ResolvedValue::Complex(parsed)
            } else {
                ResolvedValue::Text(raw)
            };
            values.insert(field.key().to_string(), value);
        }

        if !missing.is_empty() {
            return Err(SettingsError::FieldRequired { keys: missing });
        }

        Ok(Settings {
            values,
            warnings: self.diagnostics.into_warnings(),
        })
    }
}

/// A built field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Text(String),
    Complex(serde_json::Value),
}

impl ResolvedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(s) => Some(s),
            ResolvedValue::Complex(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResolvedValue::Text(_) => None,
            ResolvedValue::Complex(v) => Some(v),
        }
    }
}

/// Validated settings, keyed by canonical field key.
#[derive(Debug, Clone)]
pub struct Settings {
    values: BTreeMap<String, ResolvedValue>,
    warnings: Vec<Warning>,
}

impl Settings {
    /// The raw text value of a non-complex field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(ResolvedValue::as_str)
    }

    /// The parsed JSON value of a complex field.
    pub fn json(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key).and_then(ResolvedValue::as_json)
    }

    /// Parse a text field into `T`.
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>, SettingsError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e: T::Err| SettingsError::InvalidValue {
                    field: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    /// A text field wrapped so it is not exposed by Debug formatting.
    pub fn secret(&self, key: &str) -> Option<SecretString> {
        self.get(key)
            .map(|raw| SecretString::new(raw.to_owned().into()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Non-fatal warnings emitted while resolving this load.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
