//! Required-field validation and warning observability tests.

use super::write_file;
use crate::diagnostics::WarningKind;
use crate::error::SettingsError;
use crate::field::{FieldSpec, Schema};
use crate::loader::SettingsLoader;
use tempfile::TempDir;

fn schema() -> Schema {
    Schema::new()
        .field(FieldSpec::new("foo_bar").required())
        .field(FieldSpec::new("baz").required())
}

#[test]
fn missing_file_warns_and_required_field_fails_by_key() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let resolved = SettingsLoader::new(schema())
        .with_override("foo_bar", "a")
        .with_vars([("BAZ_FILE", missing.to_str().unwrap())])
        .resolve();

    // The warning names the variable and the path...
    assert_eq!(resolved.warnings().len(), 1);
    assert_eq!(resolved.warnings()[0].kind(), WarningKind::MissingFile);
    assert_eq!(resolved.warnings()[0].var(), "baz_file");
    assert_eq!(resolved.warnings()[0].path(), missing.as_path());

    // ...while the fatal error names the canonical field key, not the path.
    let err = resolved.build().unwrap_err();
    match err {
        SettingsError::FieldRequired { ref keys } => assert_eq!(keys, &["baz"]),
        other => panic!("expected FieldRequired, got {other:?}"),
    }
    assert!(err.to_string().contains("baz"));
    assert!(!err.to_string().contains("missing"));
}

#[test]
fn directory_reference_warns_and_required_field_fails() {
    let dir = TempDir::new().unwrap();
    let non_file = dir.path().join("non-file");
    std::fs::create_dir(&non_file).unwrap();

    let resolved = SettingsLoader::new(schema())
        .with_override("foo_bar", "a")
        .with_vars([("BAZ_FILE", non_file.to_str().unwrap())])
        .resolve();

    assert_eq!(resolved.warnings().len(), 1);
    assert_eq!(resolved.warnings()[0].kind(), WarningKind::NotAFile);

    assert!(matches!(
        resolved.build(),
        Err(SettingsError::FieldRequired { keys }) if keys == ["baz"]
    ));
}

#[cfg(unix)]
#[test]
fn unreadable_file_warns_and_required_field_fails() {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("file-without-read-perm");
    std::fs::write(&path, "blah").unwrap();
    if std::fs::metadata(&path).unwrap().uid() == 0 {
        // Root reads regardless of mode bits.
        return;
    }
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

    let resolved = SettingsLoader::new(schema())
        .with_override("foo_bar", "a")
        .with_vars([("BAZ_FILE", path.to_str().unwrap())])
        .resolve();

    assert_eq!(resolved.warnings().len(), 1);
    assert_eq!(resolved.warnings()[0].kind(), WarningKind::NoReadPermission);
    assert!(
        resolved.warnings()[0]
            .to_string()
            .to_lowercase()
            .contains("permission denied")
    );

    assert!(matches!(
        resolved.build(),
        Err(SettingsError::FieldRequired { keys }) if keys == ["baz"]
    ));
}

#[test]
fn all_missing_required_fields_are_reported() {
    let err = SettingsLoader::new(schema())
        .with_vars(std::iter::empty::<(String, String)>())
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        SettingsError::FieldRequired { ref keys } if keys == &["foo_bar", "baz"]
    ));
}

#[test]
fn defaults_fill_unresolved_fields() {
    let settings = SettingsLoader::new(
        Schema::new().field(FieldSpec::new("max_results").default_value("1000")),
    )
    .with_vars(std::iter::empty::<(String, String)>())
    .load()
    .unwrap();

    assert_eq!(settings.parse::<u64>("max_results").unwrap(), Some(1000));
}

#[test]
fn resolved_value_beats_default() {
    let settings = SettingsLoader::new(
        Schema::new().field(FieldSpec::new("max_results").default_value("1000")),
    )
    .with_vars([("MAX_RESULTS", "500")])
    .load()
    .unwrap();

    assert_eq!(settings.parse::<u64>("max_results").unwrap(), Some(500));
}

#[test]
fn optional_field_without_value_is_simply_absent() {
    let settings = SettingsLoader::new(Schema::new().field(FieldSpec::new("color")))
        .with_vars(std::iter::empty::<(String, String)>())
        .load()
        .unwrap();

    assert_eq!(settings.get("color"), None);
    assert!(!settings.contains("color"));
}

#[test]
fn complex_field_parses_as_json() {
    let dir = TempDir::new().unwrap();
    let flags_path = write_file(&dir, "flags", r#"{"beta": true, "limit": 3}"#);

    let settings = SettingsLoader::new(Schema::new().field(FieldSpec::new("flags").complex()))
        .with_vars([("FLAGS_FILE", flags_path)])
        .load()
        .unwrap();

    let flags = settings.json("flags").unwrap();
    assert_eq!(flags["beta"], serde_json::json!(true));
    assert_eq!(flags["limit"], serde_json::json!(3));
}

#[test]
fn invalid_json_in_complex_field_is_an_invalid_value_error() {
    let err = SettingsLoader::new(Schema::new().field(FieldSpec::new("flags").complex()))
        .with_vars([("FLAGS", "{not json")])
        .load()
        .unwrap_err();

    match err {
        SettingsError::InvalidValue { field, message } => {
            assert_eq!(field, "flags");
            assert!(message.contains("invalid JSON"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn warnings_survive_onto_built_settings() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good", "frob");
    let missing = dir.path().join("gone");

    let settings = SettingsLoader::new(
        Schema::new().field(FieldSpec::new("baz").alias("mc_baz").required()),
    )
    .with_vars([
        ("BAZ_FILE", missing.to_str().unwrap()),
        ("MC_BAZ_FILE", good.as_str()),
    ])
    .load()
    .unwrap();

    assert_eq!(settings.get("baz"), Some("frob"));
    assert_eq!(settings.warnings().len(), 1);
    assert!(settings.warnings()[0].is_unreadable_file());
}

#[test]
fn repeated_loads_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let baz_path = write_file(&dir, "2", "42");
    let vars = [("BAZ_FILE", baz_path)];

    let first = SettingsLoader::new(Schema::new().field(FieldSpec::new("baz").required()))
        .with_vars(vars.clone())
        .load()
        .unwrap();
    let second = SettingsLoader::new(Schema::new().field(FieldSpec::new("baz").required()))
        .with_vars(vars)
        .load()
        .unwrap();

    assert_eq!(first.get("baz"), second.get("baz"));
    assert_eq!(first.warnings(), second.warnings());
}
