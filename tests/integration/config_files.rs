//! Rule configuration loaded from TOML files

use tasklint::config::CONFIG_FILE_NAME;
use tasklint::template::TEMPLATE;
use tasklint::validate::ErrorKind;
use tasklint::{check_document, LintConfig, LintError};

use super::helpers::{template_with, Workspace};

#[test]
fn test_config_file_overrides_limits() {
    let ws = Workspace::new();
    let config_path = ws.write(
        CONFIG_FILE_NAME,
        r#"
[kpi]
max_lines_per_function = 10
"#,
    );

    let (config, source) = LintConfig::discover(Some(&config_path)).unwrap();
    assert_eq!(source.as_deref(), Some(config_path.as_path()));

    let report = check_document(TEMPLATE, &config).unwrap();
    let message = report.outcome().unwrap_err();
    assert!(message.contains("is 12 which exceeds the maximum of 10"), "{message}");
}

#[test]
fn test_custom_status_vocabulary() {
    let ws = Workspace::new();
    let config_path = ws.write(
        "rules.toml",
        r#"
[status]
values = ["Planned", "In Progress", "Review", "Completed", "Blocked", "Done"]
"#,
    );
    let config = LintConfig::from_file(&config_path).unwrap();

    let text = template_with("**Status**: Planned", "**Status**: Done");
    let report = check_document(&text, &config).unwrap();
    assert!(report.is_valid(), "{}", report.result.error_report());
    // The table still says Planned
    assert_eq!(report.result.warnings.len(), 1);
    assert_eq!(report.result.warnings[0].kind, ErrorKind::InvalidStatus);
}

#[test]
fn test_custom_category_ranges() {
    let ws = Workspace::new();
    let config_path = ws.write(
        "rules.toml",
        r#"
[[categories]]
name = "platform"
start = 1
end = 99
sections = ["**Platform Notes**"]
"#,
    );
    let config = LintConfig::from_file(&config_path).unwrap();

    let report = check_document(TEMPLATE, &config).unwrap();
    let kinds: Vec<_> = report.result.errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::MissingCategorySection; 3]);
    assert!(report.result.errors[0]
        .message
        .contains("required for platform tasks"));
}

#[test]
fn test_disabled_validators_from_file() {
    let ws = Workspace::new();
    let config_path = ws.write("rules.toml", "disabled_validators = [\"kpi\", \"category\"]\n");
    let config = LintConfig::from_file(&config_path).unwrap();

    let text = template_with("- Call depth: 2", "- Call depth: 50")
        .replacen("**Architecture Impact**: Establishes the module layout.\n", "", 1);
    assert!(check_document(&text, &config).unwrap().is_valid());
}

#[test]
fn test_invalid_config_rejected() {
    let ws = Workspace::new();

    let unknown_key = ws.write("unknown.toml", "colour = \"blue\"\n");
    let err = LintConfig::from_file(&unknown_key).unwrap_err();
    assert!(matches!(err, LintError::InvalidConfig(_)));

    let bad_pattern = ws.write("pattern.toml", "id_pattern = \"([A-Z\"\n");
    let err = LintConfig::from_file(&bad_pattern).unwrap_err();
    assert!(matches!(err, LintError::InvalidPattern { field: "id_pattern", .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);

    let overlap = ws.write(
        "overlap.toml",
        r#"
[[categories]]
name = "a"
start = 1
end = 50

[[categories]]
name = "b"
start = 50
end = 99
"#,
    );
    let err = LintConfig::from_file(&overlap).unwrap_err();
    assert!(err.to_string().contains("overlap"));
}

#[test]
fn test_missing_explicit_config_is_error() {
    let ws = Workspace::new();
    let err = LintConfig::discover(Some(&ws.path("nope.toml"))).unwrap_err();
    assert!(matches!(err, LintError::Io { .. }));
}
