//! Field descriptors and the settings schema.
//!
//! Responsibilities:
//! - Describe one configuration field: canonical key, declared aliases,
//!   complex/required flags, optional default raw value.
//! - Enumerate a field's candidate environment-variable names in declared
//!   order under a snapshot's naming policy.
//!
//! Does NOT handle:
//! - Reading any variable or file (see source/).
//! - Required-field validation (see settings.rs).
//!
//! Invariants:
//! - Candidate order is the field's own name first, then aliases in
//!   declaration order.
//! - The env prefix applies only to the field's own name; aliases are
//!   explicit variable names and are taken verbatim (case policy still
//!   applies).

use crate::snapshot::EnvSnapshot;

/// Descriptor for one configuration field.
///
/// Constructed once per field and read-only during resolution.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: String,
    aliases: Vec<String>,
    complex: bool,
    required: bool,
    default: Option<String>,
}

/// One candidate environment-variable name for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The field's canonical key.
    pub key: String,
    /// The variable name to look up, prefixed and case-normalized.
    pub env_name: String,
    /// Whether the resolved raw value is parsed as JSON downstream.
    pub complex: bool,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            complex: false,
            required: false,
            default: None,
        }
    }

    /// Declare an additional environment-variable name for this field.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// Mark the raw value as a structured (JSON) value.
    pub fn complex(mut self) -> Self {
        self.complex = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Raw value used when no source contributes one.
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_complex(&self) -> bool {
        self.complex
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Enumerate candidate variable names under the snapshot's naming policy.
    pub fn candidates(&self, env: &EnvSnapshot) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(1 + self.aliases.len());
        let own = format!("{}{}", env.prefix(), self.key);
        out.push(Candidate {
            key: self.key.clone(),
            env_name: env.apply_case(&own),
            complex: self.complex,
        });
        for alias in &self.aliases {
            out.push(Candidate {
                key: self.key.clone(),
                env_name: env.apply_case(alias),
                complex: self.complex,
            });
        }
        out
    }
}

/// The full set of fields for one settings struct.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key() == key)
    }
}
