//! ID grammar, document-wide uniqueness, and subtask prefix checks. Any failure here is
//! critical.

use super::{malformed_subtask, prefix_mismatch};
use crate::tasks::TaskDetail;
use crate::validate::{
    ErrorKind, Severity, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

pub struct IdValidator;

impl TaskValidator for IdValidator {
    fn name(&self) -> &'static str {
        "id"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let id_re = &ctx.patterns.id;

        if !id_re.is_match(&task.id) {
            result.push(
                ValidationError::new(
                    ErrorKind::InvalidIdFormat,
                    &task.id,
                    format!(
                        "Invalid task ID format '{}' (expected pattern {})",
                        task.id, ctx.config.id_pattern
                    ),
                )
                .with_severity(Severity::Critical)
                .at_line(task.line),
            );
        }

        // Reported once, on every section after the first
        if let Some(first) = ctx
            .tasks
            .iter()
            .find(|other| other.id == task.id && other.line < task.line)
        {
            result.push(
                ValidationError::new(
                    ErrorKind::DuplicateId,
                    &task.id,
                    format!(
                        "Duplicate detail section for task ID '{}' at line {} (first defined at line {})",
                        task.id, task.line, first.line
                    ),
                )
                .with_severity(Severity::Critical)
                .at_line(task.line),
            );
        }

        for subtask in &task.subtasks {
            if !subtask.has_valid_extraction() {
                result.push(malformed_subtask(task, subtask, Severity::Critical));
                continue;
            }

            let line = task.document_line(subtask.line_offset);
            if !id_re.is_match(&subtask.id) {
                result.push(
                    ValidationError::new(
                        ErrorKind::InvalidIdFormat,
                        &task.id,
                        format!(
                            "Invalid subtask ID format '{}' at line {}",
                            subtask.id, line
                        ),
                    )
                    .with_severity(Severity::Critical)
                    .at_line(line),
                );
                continue;
            }

            if let Some(finding) = prefix_mismatch(task, subtask, Severity::Critical) {
                result.push(finding);
            }

            if ctx.is_task_id(&subtask.id) {
                result.push(
                    ValidationError::new(
                        ErrorKind::DuplicateId,
                        &task.id,
                        format!(
                            "Subtask ID '{}' at line {} is already used as a task ID",
                            subtask.id, line
                        ),
                    )
                    .with_severity(Severity::Critical)
                    .at_line(line),
                );
            } else if let Some(first) = ctx
                .first_subtask_line(&subtask.id)
                .filter(|&first| first < line)
            {
                result.push(
                    ValidationError::new(
                        ErrorKind::DuplicateId,
                        &task.id,
                        format!(
                            "Duplicate subtask ID '{}' at line {} (first used at line {})",
                            subtask.id, line, first
                        ),
                    )
                    .with_severity(Severity::Critical)
                    .at_line(line),
                );
            }
        }

        result
    }
}
