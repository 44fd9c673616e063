//! Direct environment-variable source.
//!
//! Responsibilities:
//! - Resolve a field from the first candidate variable present in the
//!   snapshot.
//!
//! Does NOT handle:
//! - `_FILE` companion variables (see file_env.rs).
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.

use super::{FieldValue, Source};
use crate::diagnostics::Diagnostics;
use crate::field::FieldSpec;
use crate::snapshot::EnvSnapshot;

/// Reads field values straight from the environment snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        Self
    }
}

impl Source for EnvSource {
    fn name(&self) -> &'static str {
        "env"
    }

    fn resolve(
        &self,
        field: &FieldSpec,
        env: &EnvSnapshot,
        _diagnostics: &mut Diagnostics,
    ) -> FieldValue {
        for candidate in field.candidates(env) {
            if let Some(value) = env.get(&candidate.env_name) {
                if value.trim().is_empty() {
                    continue;
                }
                return FieldValue::found(candidate.key.as_str(), value, candidate.complex);
            }
        }
        FieldValue::absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CaseSensitivity;

    fn snapshot(vars: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_vars(vars.iter().copied(), "", CaseSensitivity::Insensitive)
    }

    #[test]
    fn resolves_from_own_name() {
        let mut diags = Diagnostics::new();
        let value = EnvSource::new().resolve(
            &FieldSpec::new("baz"),
            &snapshot(&[("BAZ", "9000")]),
            &mut diags,
        );

        assert_eq!(value.value.as_deref(), Some("9000"));
        assert_eq!(value.key, "baz");
    }

    #[test]
    fn first_candidate_wins_over_later_aliases() {
        let field = FieldSpec::new("baz").alias("bazington").alias("mc_baz");
        let mut diags = Diagnostics::new();
        let value = EnvSource::new().resolve(
            &field,
            &snapshot(&[("BAZINGTON", "12"), ("MC_BAZ", "13")]),
            &mut diags,
        );

        assert_eq!(value.value.as_deref(), Some("12"));
        assert_eq!(value.key, "baz", "key is canonical, not the alias");
    }

    #[test]
    fn empty_and_whitespace_variables_are_unset() {
        let field = FieldSpec::new("baz").alias("mc_baz");
        let mut diags = Diagnostics::new();
        let value = EnvSource::new().resolve(
            &field,
            &snapshot(&[("BAZ", "   "), ("MC_BAZ", "42")]),
            &mut diags,
        );

        assert_eq!(value.value.as_deref(), Some("42"));
    }

    #[test]
    fn absent_when_no_candidate_is_set() {
        let mut diags = Diagnostics::new();
        let value = EnvSource::new().resolve(&FieldSpec::new("baz"), &snapshot(&[]), &mut diags);

        assert!(value.is_absent());
        assert_eq!(value.key, "");
        assert!(!value.complex);
    }
}
