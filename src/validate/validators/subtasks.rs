//! Per-subtask rules. Numbered subtasks carry their own fields; checkbox subtasks only
//! need a well-formed line.

use super::{malformed_subtask, prefix_mismatch};
use crate::references::placeholder_names;
use crate::tasks::{field_value, Subtask, SubtaskFormat, TaskDetail};
use crate::validate::{
    ErrorKind, Severity, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

pub struct SubtaskValidator;

impl SubtaskValidator {
    fn check_numbered(
        &self,
        task: &TaskDetail,
        subtask: &Subtask,
        ctx: &ValidationContext<'_>,
        result: &mut ValidationResult,
    ) {
        let body = task.subtask_body(subtask);
        let heading_line = task.document_line(subtask.line_offset);
        // Body starts on the line after the subtask heading
        let body_line = |offset: usize| heading_line + 1 + offset;
        let sections = &ctx.config.sections;
        let status_config = &ctx.config.status;

        let status = field_value(body, "Status");
        match &status {
            None => result.push(
                ValidationError::new(
                    ErrorKind::MissingSubtaskSection,
                    &task.id,
                    format!("Subtask '{}' is missing a **Status** field", subtask.id),
                )
                .at_line(heading_line),
            ),
            Some(field) if !status_config.values.contains(&field.value) => result.push(
                ValidationError::new(
                    ErrorKind::InvalidStatus,
                    &task.id,
                    format!(
                        "Subtask '{}' has invalid status '{}' (expected one of: {})",
                        subtask.id,
                        field.value,
                        status_config.values.join(", ")
                    ),
                )
                .at_line(body_line(field.offset)),
            ),
            Some(_) => {}
        }

        let uses_error_reference = placeholder_names(body)
            .any(|name| name.starts_with(&sections.error_handling_reference_prefix));
        if !uses_error_reference {
            for marker in &sections.subtask_error_handling {
                if !body.iter().any(|line| line.contains(marker.as_str())) {
                    result.push(
                        ValidationError::new(
                            ErrorKind::MissingSubtaskSection,
                            &task.id,
                            format!("Subtask '{}' is missing section {marker}", subtask.id),
                        )
                        .at_line(heading_line),
                    );
                }
            }
        }

        let completed = status
            .as_ref()
            .is_some_and(|field| field.value == status_config.completed);
        if !completed {
            return;
        }

        match field_value(body, "Review Rating") {
            Some(rating) if !rating.value.is_empty() => {
                if !ctx.patterns.rating.is_match(&rating.value) {
                    result.push(
                        ValidationError::new(
                            ErrorKind::InvalidReviewRating,
                            &task.id,
                            format!(
                                "Subtask '{}' has invalid review rating '{}' (expected 1-5 with optional one decimal and optional '(partial)')",
                                subtask.id, rating.value
                            ),
                        )
                        .at_line(body_line(rating.offset)),
                    );
                }
            }
            _ => result.push(
                ValidationError::new(
                    ErrorKind::MissingReviewRating,
                    &task.id,
                    format!(
                        "Subtask '{}' is completed but missing review rating",
                        subtask.id
                    ),
                )
                .at_line(heading_line),
            ),
        }
    }
}

impl TaskValidator for SubtaskValidator {
    fn name(&self) -> &'static str {
        "subtasks"
    }

    fn priority(&self) -> u8 {
        40
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();

        for subtask in &task.subtasks {
            if !subtask.has_valid_extraction() {
                result.push(malformed_subtask(task, subtask, Severity::Error));
                continue;
            }

            if let Some(finding) = prefix_mismatch(task, subtask, Severity::Error) {
                result.push(finding);
            }

            // Checkbox subtasks are complete on their single line and rating-exempt
            if let SubtaskFormat::Numbered { .. } = subtask.format {
                self.check_numbered(task, subtask, ctx, &mut result);
            }
        }

        result
    }
}
