//! Registering validators beyond the built-in set

use tasklint::check::check_document_with;
use tasklint::tasks::TaskDetail;
use tasklint::template::TEMPLATE;
use tasklint::validate::{
    ErrorKind, Severity, TaskValidator, ValidationContext, ValidationError, ValidationPipeline,
    ValidationResult,
};
use tasklint::LintConfig;

/// Requires every task title to start with an uppercase letter
struct TitleCaseValidator;

impl TaskValidator for TitleCaseValidator {
    fn name(&self) -> &'static str {
        "title-case"
    }

    fn priority(&self) -> u8 {
        10
    }

    fn validate(&self, task: &TaskDetail, _ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        if !task.title.starts_with(|c: char| c.is_ascii_uppercase()) {
            result.push(
                ValidationError::new(
                    ErrorKind::MissingRequiredSection,
                    &task.id,
                    format!("Title '{}' must start with a capital letter", task.title),
                )
                .at_line(task.line),
            );
        }
        result
    }
}

/// Rejects every task with a critical finding
struct Gatekeeper;

impl TaskValidator for Gatekeeper {
    fn name(&self) -> &'static str {
        "gatekeeper"
    }

    fn priority(&self) -> u8 {
        200
    }

    fn validate(&self, task: &TaskDetail, _ctx: &ValidationContext<'_>) -> ValidationResult {
        ValidationResult::from_findings([ValidationError::new(
            ErrorKind::InvalidIdFormat,
            &task.id,
            "gate closed",
        )
        .with_severity(Severity::Critical)])
    }
}

#[test]
fn test_registered_validator_runs_last() {
    let mut pipeline = ValidationPipeline::default();
    pipeline.register(Box::new(TitleCaseValidator));
    assert_eq!(pipeline.names().last(), Some(&"title-case"));

    let text = TEMPLATE.replacen("### CORE002: Config file watcher", "### CORE002: config file watcher", 1);
    let report = check_document_with(&text, &LintConfig::default(), &pipeline).unwrap();

    assert_eq!(
        report.outcome().unwrap_err(),
        "Task 'CORE002': Title 'config file watcher' must start with a capital letter"
    );
}

#[test]
fn test_critical_validator_short_circuits_each_task() {
    let mut pipeline = ValidationPipeline::default();
    pipeline.register(Box::new(Gatekeeper));
    assert_eq!(pipeline.names()[0], "gatekeeper");

    let text = TEMPLATE.replacen("**Status**: Planned", "**Status**: Done", 1);
    let report = check_document_with(&text, &LintConfig::default(), &pipeline).unwrap();

    // One finding per task; the invalid status is never reached
    assert_eq!(report.result.errors.len(), 3);
    assert!(report.result.errors.iter().all(|e| e.message == "gate closed"));
}
