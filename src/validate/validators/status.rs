//! Status and priority enumerations

use crate::tasks::{FieldValue, TaskDetail};
use crate::validate::{
    ErrorKind, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

pub struct StatusValidator;

fn check_enum(
    task: &TaskDetail,
    field: &FieldValue,
    label: &str,
    allowed: &[String],
    kind: ErrorKind,
) -> Option<ValidationError> {
    let line = task.document_line(field.offset);
    let message = if field.value.is_empty() {
        format!("{label} field is empty (expected one of: {})", allowed.join(", "))
    } else if !allowed.contains(&field.value) {
        format!(
            "Invalid {} '{}' (expected one of: {})",
            label.to_lowercase(),
            field.value,
            allowed.join(", ")
        )
    } else {
        return None;
    };

    Some(ValidationError::new(kind, &task.id, message).at_line(line))
}

fn missing_field(
    task: &TaskDetail,
    label: &str,
    allowed: &[String],
    kind: ErrorKind,
) -> ValidationError {
    ValidationError::new(
        kind,
        &task.id,
        format!(
            "Task has no **{label}** field (expected one of: {})",
            allowed.join(", ")
        ),
    )
    .at_line(task.line)
}

impl TaskValidator for StatusValidator {
    fn name(&self) -> &'static str {
        "status"
    }

    fn priority(&self) -> u8 {
        80
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let status_config = &ctx.config.status;

        match task.field("Status") {
            None => result.push(missing_field(
                task,
                "Status",
                &status_config.values,
                ErrorKind::InvalidStatus,
            )),
            Some(status) => {
                if let Some(finding) = check_enum(
                    task,
                    &status,
                    "Status",
                    &status_config.values,
                    ErrorKind::InvalidStatus,
                ) {
                    result.push(finding);
                } else {
                    check_consistency(task, &status, ctx, &mut result);
                }
            }
        }

        let finding = match task.field("Priority") {
            Some(priority) => check_enum(
                task,
                &priority,
                "Priority",
                &status_config.priorities,
                ErrorKind::InvalidPriority,
            ),
            None => Some(missing_field(
                task,
                "Priority",
                &status_config.priorities,
                ErrorKind::InvalidPriority,
            )),
        };
        if let Some(finding) = finding {
            result.push(finding);
        }

        result
    }
}

/// Rules that apply once the status itself is valid
fn check_consistency(
    task: &TaskDetail,
    status: &FieldValue,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let status_config = &ctx.config.status;

    if status.value == status_config.in_progress && task.subtasks.is_empty() {
        result.push(
            ValidationError::new(
                ErrorKind::MissingSubtasks,
                &task.id,
                format!("Status is '{}' but the task has no subtasks", status.value),
            )
            .at_line(task.document_line(status.offset)),
        );
    }

    for stub in ctx.stubs_for(&task.id) {
        let Some(table_status) = stub.raw_status.as_deref() else {
            continue;
        };
        let known = status_config
            .values
            .iter()
            .any(|v| v.eq_ignore_ascii_case(table_status));
        if known && !table_status.eq_ignore_ascii_case(&status.value) {
            result.warn(
                ValidationError::new(
                    ErrorKind::InvalidStatus,
                    &task.id,
                    format!(
                        "Status '{}' in the {} table (line {}) differs from detail status '{}'",
                        table_status, stub.origin, stub.source_line, status.value
                    ),
                )
                .at_line(stub.source_line),
            );
        }
    }
}
