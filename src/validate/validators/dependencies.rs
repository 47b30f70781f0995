use crate::tasks::TaskDetail;
use crate::validate::{
    ErrorKind, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

/// Values that mean "no dependencies"
const NONE_VALUES: &[&str] = &["none", "n/a", "-"];

pub struct DependencyValidator;

impl TaskValidator for DependencyValidator {
    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn priority(&self) -> u8 {
        70
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();

        let Some(field) = task.field("Dependencies") else {
            return result;
        };
        let value = field.value.trim();
        if value.is_empty() || NONE_VALUES.iter().any(|v| value.eq_ignore_ascii_case(v)) {
            return result;
        }

        let line = task.document_line(field.offset);
        let deps = value
            .split(',')
            .map(|dep| dep.trim().trim_matches(|c: char| c == '`' || c == '*').trim())
            .filter(|dep| !dep.is_empty());

        for dep in deps {
            let message = if dep == task.id {
                "Task cannot depend on itself".to_string()
            } else if !ctx.is_known_id(dep) {
                format!("Unknown dependency: '{dep}'")
            } else {
                continue;
            };
            result.push(
                ValidationError::new(ErrorKind::InvalidDependency, &task.id, message).at_line(line),
            );
        }

        result
    }
}
