//! Checking task lists read from disk

use tasklint::template::{write_template, TEMPLATE};
use tasklint::validate::ErrorKind;
use tasklint::{check_file, LintConfig, LintError, SUCCESS_MESSAGE};

use super::helpers::{template_with, Workspace};

#[test]
fn test_written_template_passes() {
    let ws = Workspace::new();
    let path = ws.path("docs/TASKS.md");
    write_template(&path, false).unwrap();

    let report = check_file(&path, &LintConfig::default()).unwrap();
    assert_eq!(report.outcome(), Ok(SUCCESS_MESSAGE));
}

#[test]
fn test_missing_file_is_io_failure() {
    let ws = Workspace::new();
    let err = check_file(&ws.path("absent.md"), &LintConfig::default()).unwrap_err();

    assert!(matches!(err, LintError::Io { .. }));
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert!(err.to_string().contains("absent.md"));
}

#[test]
fn test_windows_line_endings() {
    let ws = Workspace::new();
    let path = ws.write("TASKS.md", &TEMPLATE.replace('\n', "\r\n"));

    let report = check_file(&path, &LintConfig::default()).unwrap();
    assert!(report.is_valid(), "{}", report.result.error_report());
}

#[test]
fn test_all_problems_reported_in_one_pass() {
    let ws = Workspace::new();
    let text = template_with("**Status**: Planned", "**Status**: Done");
    let text = text.replacen("**Priority**: Medium", "**Priority**: Urgent", 1);
    let text = text.replacen("**Dependencies**: CORE001", "**Dependencies**: CORE404", 1);
    let text = text.replacen("- Call depth: 2", "- Call depth: 7", 1);
    let text = text.replacen("**Review Rating**: 4.5", "**Review Rating**: 9", 1);
    let path = ws.write("TASKS.md", &text);

    let report = check_file(&path, &LintConfig::default()).unwrap();
    let kinds: Vec<ErrorKind> = report.result.errors.iter().map(|e| e.kind).collect();

    assert_eq!(kinds.len(), 5, "{}", report.result.error_report());
    for kind in [
        ErrorKind::InvalidStatus,
        ErrorKind::InvalidPriority,
        ErrorKind::InvalidDependency,
        ErrorKind::KpiExceedsLimit,
        ErrorKind::InvalidReviewRating,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }

    let report_text = report.outcome().unwrap_err();
    assert_eq!(report_text.lines().count(), 5);
    assert!(report_text.contains("Unknown dependency: 'CORE404'"));
}

#[test]
fn test_findings_grouped_by_task() {
    let ws = Workspace::new();
    let text = template_with("- Call depth: 2", "- Call depth: 7")
        .replacen("**Status**: Planned", "**Status**: Done", 1)
        .replacen("**Review Rating**: 4.5\n", "", 1);
    let path = ws.write("TASKS.md", &text);

    let report = check_file(&path, &LintConfig::default()).unwrap();
    let ids: Vec<_> = report
        .result
        .errors
        .iter()
        .map(|e| e.task_id.clone().unwrap_or_default())
        .collect();

    assert_eq!(ids, vec!["CORE001", "CORE001", "CORE002"]);
    // Within a task, higher-priority validators report first
    assert_eq!(report.result.errors[0].kind, ErrorKind::KpiExceedsLimit);
    assert_eq!(report.result.errors[1].kind, ErrorKind::MissingReviewRating);
}

#[test]
fn test_references_resolved_regardless_of_position() {
    let ws = Workspace::new();
    let definition = "## #{{kpi-standard}}\n**Code Quality KPIs**:\n- Functions per module: 8\n- Lines per function: 15\n- Call depth: 3\n";
    let moved = TEMPLATE.replacen(definition, "", 1);
    let text = format!("{definition}\n{moved}");
    let path = ws.write("TASKS.md", &text);

    let report = check_file(&path, &LintConfig::default()).unwrap();
    assert!(report.is_valid(), "{}", report.result.error_report());
}
