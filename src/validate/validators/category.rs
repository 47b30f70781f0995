use crate::tasks::{id_number, TaskDetail};
use crate::validate::{
    ErrorKind, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

/// Maps the numeric part of a task ID onto its category and checks the category's
/// extra sections.
pub struct CategoryValidator;

impl TaskValidator for CategoryValidator {
    fn name(&self) -> &'static str {
        "category"
    }

    fn priority(&self) -> u8 {
        50
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();

        // Malformed IDs are the ID validator's concern
        let Some(number) = id_number(&task.id) else {
            return result;
        };

        let Some(category) = ctx.config.category_for(number) else {
            let ranges: Vec<String> = ctx
                .config
                .categories
                .iter()
                .map(|c| format!("{} {}-{}", c.name, c.start, c.end))
                .collect();
            result.push(
                ValidationError::new(
                    ErrorKind::CategoryOutOfRange,
                    &task.id,
                    format!(
                        "Task number {number} is outside every category range ({})",
                        ranges.join(", ")
                    ),
                )
                .at_line(task.line),
            );
            return result;
        };

        for marker in &category.sections {
            if !task.contains_marker(marker) {
                result.push(
                    ValidationError::new(
                        ErrorKind::MissingCategorySection,
                        &task.id,
                        format!(
                            "Missing section {marker} required for {} tasks",
                            category.name
                        ),
                    )
                    .at_line(task.line),
                );
            }
        }

        result
    }
}
