//! Tests for the settings loader.
//!
//! Responsibilities:
//! - Test source-chain ordering and first-wins selection.
//! - Test required-field validation and warning observability.
//! - Test dotenv loading and the `DOTENV_DISABLED` gate.
//! - Test typed accessors on built settings.
//!
//! Does NOT handle:
//! - Per-source resolution logic (tested next to each source).
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test`, `temp_env`
//!   and `global_test_lock()`; everything else resolves against explicit
//!   variable sets via `with_vars` and can run in parallel.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

use tempfile::TempDir;

pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write a scratch file and return its path as a string.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}
