//! Default validator set

mod category;
mod dependencies;
mod id;
mod kpi;
mod sections;
mod status;
mod subtasks;

#[cfg(test)]
pub(crate) mod test_support;

pub use category::CategoryValidator;
pub use dependencies::DependencyValidator;
pub use id::IdValidator;
pub use kpi::KpiValidator;
pub use sections::SectionValidator;
pub use status::StatusValidator;
pub use subtasks::SubtaskValidator;

use super::pipeline::TaskValidator;
use super::result::{ErrorKind, Severity, ValidationError};
use crate::tasks::{letter_prefix, Subtask, SubtaskFormat, TaskDetail};

pub fn default_validators() -> Vec<Box<dyn TaskValidator>> {
    vec![
        Box::new(IdValidator),
        Box::new(SectionValidator),
        Box::new(StatusValidator),
        Box::new(DependencyValidator),
        Box::new(KpiValidator),
        Box::new(CategoryValidator),
        Box::new(SubtaskValidator),
    ]
}

/// Prefix-consistency check shared by the ID and subtask validators
pub(crate) fn prefix_mismatch(
    task: &TaskDetail,
    subtask: &Subtask,
    severity: Severity,
) -> Option<ValidationError> {
    let parent = letter_prefix(&task.id);
    let child = letter_prefix(&subtask.id);
    if parent == child {
        return None;
    }

    Some(
        ValidationError::new(
            ErrorKind::SubtaskPrefixMismatch,
            &task.id,
            format!(
                "Subtask '{}' ({}) has prefix '{}' but its parent task uses prefix '{}'",
                subtask.id,
                subtask.format_name(),
                child,
                parent
            ),
        )
        .with_severity(severity)
        .at_line(task.document_line(subtask.line_offset)),
    )
}

/// Location-specific finding for a subtask line whose ID could not be extracted
pub(crate) fn malformed_subtask(
    task: &TaskDetail,
    subtask: &Subtask,
    severity: Severity,
) -> ValidationError {
    let line = task.document_line(subtask.line_offset);
    let label = match subtask.format {
        SubtaskFormat::Numbered { number, .. } => format!("Numbered subtask {number}"),
        SubtaskFormat::Checkbox { .. } => "Checkbox subtask".to_string(),
    };
    ValidationError::new(
        ErrorKind::InvalidIdFormat,
        &task.id,
        format!(
            "{label} '{}' at line {line} has no extractable ID",
            subtask.description
        ),
    )
    .with_severity(severity)
    .at_line(line)
}
