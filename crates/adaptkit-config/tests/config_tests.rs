// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the AdaptKit configuration system.

use std::sync::{Arc, Mutex};

use adaptkit_config::diagnostic::{suggest_key, ConfigError, Table};
use adaptkit_config::model::{
    AdaptKitConfig, FOLDER_KEYS, INSPECT_KEYS, LOGFILE_KEY, LOGPANEL_KEY, LOG_KEYS, SECTION_KEYS,
    TOP_LEVEL_KEYS,
};
use adaptkit_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, SettingsStore,
};
use adaptkit_core::Uri;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_adaptkit_config() {
    let toml = r#"
[log]
section = "testExplorer"
output_name = "Test Explorer"

[log.inspect]
depth = 3
max_array_length = 10
max_string_length = 200
pretty = true
sort_keys = true

[sections.testExplorer]
logpanel = true
logfile = "/tmp/explorer.log"

[folders."/work/a".sections.testExplorer]
logpanel = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.section, "testExplorer");
    assert_eq!(config.log.output_name, "Test Explorer");
    assert_eq!(config.log.inspect.depth, Some(3));
    assert_eq!(config.log.inspect.max_array_length, Some(10));
    assert_eq!(config.log.inspect.max_string_length, Some(200));
    assert_eq!(config.log.inspect.pretty, Some(true));
    assert_eq!(config.log.inspect.sort_keys, Some(true));
    assert_eq!(config.sections["testExplorer"].logpanel, Some(true));
    assert_eq!(
        config.folders["/work/a"].sections["testExplorer"].logpanel,
        Some(false)
    );
}

/// Missing sections fall back to defaults.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    let defaults = AdaptKitConfig::default();
    assert_eq!(config, defaults);
}

/// Unknown field in a section table is rejected.
#[test]
fn unknown_field_in_section_produces_error() {
    let toml = r#"
[sections.ext]
logpanle = true
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logpanle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level table is rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
section = "x"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// The key lists used for suggestions are exactly what each table accepts.
#[test]
fn known_key_lists_match_the_model() {
    use figment::error::Kind;

    let cases: [(&str, &[&str]); 5] = [
        ("bogus = 1\n", &TOP_LEVEL_KEYS),
        ("[log]\nbogus = 1\n", &LOG_KEYS),
        ("[log.inspect]\nbogus = 1\n", &INSPECT_KEYS),
        ("[sections.ext]\nbogus = 1\n", &SECTION_KEYS),
        ("[folders.\"/w\"]\nbogus = 1\n", &FOLDER_KEYS),
    ];
    for (toml, keys) in cases {
        let err = load_config_from_str(toml).expect_err(toml);
        let expected = err
            .into_iter()
            .find_map(|e| match e.kind {
                Kind::UnknownField(_, expected) => Some(expected),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no unknown-field error for {toml:?}"));
        assert_eq!(expected, keys, "{toml:?}");
    }
}

#[test]
fn diagnostic_logpanle_suggests_logpanel() {
    let suggestion = suggest_key("logpanle", &["logpanel", "logfile"]);
    assert_eq!(suggestion.as_deref(), Some("logpanel"));
}

/// Error output from load_and_validate_str includes the unknown key and a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[sections.ext]
logfiel = "/tmp/x.log"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "logfiel"
                && suggestion.as_deref() == Some("logfile")
                && valid_keys.contains("logpanel")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'logfiel' with suggestion 'logfile', got: {errors:?}"
    );
}

/// A typo inside a folder-scoped section is reported against that table.
#[test]
fn diagnostic_unknown_key_in_folder_section() {
    let toml = r#"
[folders."/work/a".sections.ext]
logPanel = true
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let table = Table::FolderSection {
        folder: "/work/a".to_string(),
        name: "ext".to_string(),
    };
    assert!(
        errors.iter().any(|e| matches!(e, ConfigError::UnknownKey { key, table: t, suggestion, .. } if {
            key == "logPanel" && *t == table && suggestion.as_deref() == Some("logpanel")
        })),
        "got: {errors:?}"
    );
}

/// A per-section key written at the top level points at the section tables.
#[test]
fn diagnostic_section_key_at_top_level() {
    use miette::Diagnostic;

    let errors = load_and_validate_str("logfile = \"/tmp/x.log\"\n").expect_err("should fail");
    let error = errors
        .iter()
        .find(|e| matches!(e, ConfigError::UnknownKey { table: Table::Root, .. }))
        .unwrap_or_else(|| panic!("expected a top-level unknown key, got: {errors:?}"));
    let help = error.help().unwrap().to_string();
    assert!(help.contains("[sections.<name>]"), "{help}");
    assert!(help.contains("sections"), "{help}");
}

/// A wrongly typed section value names the full key and the expected shape.
#[test]
fn diagnostic_invalid_value_names_key_and_expectation() {
    let errors = load_and_validate_str("[sections.ext]\nlogpanel = \"yes\"\n")
        .expect_err("should fail");
    assert!(
        errors.iter().any(|e| matches!(e, ConfigError::InvalidValue { key, expected, .. } if {
            key == "sections.ext.logpanel" && expected.contains("boolean")
        })),
        "got: {errors:?}"
    );
}

/// An explicit path that does not exist is its own error.
#[test]
fn load_and_validate_path_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], ConfigError::MissingFile { path } if path.ends_with("absent.toml")));
}

/// Invalid type (string where bool expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[sections.ext]
logpanel = "yes"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("logpanel"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "logpanle".to_string(),
        table: Table::Section {
            name: "ext".to_string(),
        },
        suggestion: Some("logpanel".to_string()),
        valid_keys: "logpanel, logfile".to_string(),
        span: None,
        src: None,
    };
    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `logpanel`"), "got: {help}");

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("logpanle"), "rendered report should mention the key");
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_catches_relative_folder_key() {
    let toml = r#"
[folders."not/absolute".sections.ext]
logpanel = true
"#;

    let errors = load_and_validate_str(toml).expect_err("relative folder should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("absolute path"))
    ));
}

/// An explicit config file on disk is loaded and validated.
#[test]
fn load_and_validate_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adaptkit.toml");
    std::fs::write(
        &path,
        "[log]\nsection = \"ext\"\n\n[sections.ext]\nlogpanel = true\n",
    )
    .unwrap();

    let config = load_and_validate_path(&path).expect("file should validate");
    assert_eq!(config.log.section, "ext");
    assert_eq!(config.sections["ext"].logpanel, Some(true));
}

/// Settings loaded from TOML feed the reactive store, and updates notify listeners.
#[test]
fn store_built_from_loaded_config_notifies() {
    let config = load_and_validate_str(
        r#"
[sections.ext]
logpanel = true

[folders."/work/a".sections.ext]
logfile = "/tmp/a.log"
"#,
    )
    .unwrap();
    let store = SettingsStore::new(config);
    let a = Uri::file("/work/a");

    assert_eq!(
        store.get("ext", LOGFILE_KEY, Some(&a)),
        Some(serde_json::json!("/tmp/a.log"))
    );
    assert_eq!(store.get("ext", LOGFILE_KEY, None), None);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = store.on_did_change(move |event| {
        sink.lock().unwrap().push(event.affects_configuration("ext.logpanel", Some(&a)));
    });

    store
        .update("ext", LOGPANEL_KEY, serde_json::json!(false), None)
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![true]);
}
