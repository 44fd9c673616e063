//! Programmatic override source (the "init-args" layer).

use std::collections::BTreeMap;

use super::{FieldValue, Source};
use crate::diagnostics::Diagnostics;
use crate::field::FieldSpec;
use crate::snapshot::EnvSnapshot;

/// Explicit values supplied by the embedding program, keyed by canonical
/// field key. Placed ahead of every other source by the loader.
#[derive(Debug, Clone, Default)]
pub struct OverridesSource {
    values: BTreeMap<String, String>,
}

impl OverridesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Source for OverridesSource {
    fn name(&self) -> &'static str {
        "overrides"
    }

    fn resolve(
        &self,
        field: &FieldSpec,
        _env: &EnvSnapshot,
        _diagnostics: &mut Diagnostics,
    ) -> FieldValue {
        match self.values.get(field.key()) {
            Some(value) => FieldValue::found(field.key(), value.as_str(), field.is_complex()),
            None => FieldValue::absent(),
        }
    }
}
