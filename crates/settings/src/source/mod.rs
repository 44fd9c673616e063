//! Settings sources and the per-field resolution contract.
//!
//! Responsibilities:
//! - Define the `Source` trait every layer in the chain implements.
//! - Define `FieldValue`, the per-field resolution result.
//!
//! Does NOT handle:
//! - Chain ordering or first-wins selection (see loader/).
//! - Validation of resolved values (see settings.rs).
//!
//! Invariants:
//! - An absent value (`value: None`) is distinct from a contributed empty
//!   string and always pairs with an empty key and `complex: false`.

mod env;
mod file_env;
mod overrides;

pub use env::EnvSource;
pub use file_env::FileEnvSource;
pub use overrides::OverridesSource;

use crate::diagnostics::Diagnostics;
use crate::field::FieldSpec;
use crate::snapshot::EnvSnapshot;

/// The raw value one source contributes for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// The raw value, or `None` when this source has nothing to contribute.
    pub value: Option<String>,
    /// Canonical field key; empty for an absent value.
    pub key: String,
    /// Whether the value is parsed as JSON downstream; false when absent.
    pub complex: bool,
}

impl FieldValue {
    /// "This source has nothing to contribute for this field."
    pub fn absent() -> Self {
        Self {
            value: None,
            key: String::new(),
            complex: false,
        }
    }

    pub fn found(key: impl Into<String>, value: impl Into<String>, complex: bool) -> Self {
        Self {
            value: Some(value.into()),
            key: key.into(),
            complex,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// One layer in the ordered settings chain.
///
/// Sources are pure with respect to the snapshot: resolution reads the
/// immutable snapshot (plus, for file-backed sources, the filesystem) and
/// returns a result. File-access problems are reported through
/// `diagnostics` and never raised to the caller.
pub trait Source {
    /// Short name used in logs and source attribution.
    fn name(&self) -> &'static str;

    /// Produce this source's value for `field`, or an absent result.
    fn resolve(
        &self,
        field: &FieldSpec,
        env: &EnvSnapshot,
        diagnostics: &mut Diagnostics,
    ) -> FieldValue;
}
