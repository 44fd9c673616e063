//! Layered settings loading with file-backed environment secrets.
//!
//! This crate provides a small, ordered chain of settings sources. Each
//! field declared in a [`Schema`] is offered to every source in turn and the
//! first source that contributes a value wins. The built-in chain is:
//! programmatic overrides, direct environment variables, then `_FILE`
//! environment variables (`FOO_FILE=/run/secrets/foo` reads the file at that
//! path as the value of `FOO`). The `_FILE` pattern keeps secret material
//! out of the process environment when secrets are mounted as files, as
//! Docker and Kubernetes do.
//!
//! File-access problems never abort a load. They are downgraded to
//! [`Warning`]s and the next candidate variable is tried; a required field
//! that ends up with no value from any source fails at build time with
//! [`SettingsError::FieldRequired`].

mod diagnostics;
mod error;
mod field;
mod loader;
mod settings;
mod snapshot;
pub mod source;

pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::SettingsError;
pub use field::{Candidate, FieldSpec, Schema};
pub use loader::SettingsLoader;
pub use settings::{Resolved, ResolvedValue, Settings};
pub use snapshot::{CaseSensitivity, EnvSnapshot};
pub use source::{EnvSource, FieldValue, FileEnvSource, OverridesSource, Source};
