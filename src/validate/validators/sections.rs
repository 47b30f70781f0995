//! Required, error-handling, and completion section checks

use crate::tasks::TaskDetail;
use crate::validate::{
    ErrorKind, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

pub struct SectionValidator;

impl TaskValidator for SectionValidator {
    fn name(&self) -> &'static str {
        "sections"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let sections = &ctx.config.sections;

        for requirement in &sections.required {
            let substituted = requirement
                .reference
                .as_deref()
                .is_some_and(|name| task.uses_placeholder(name));
            if substituted || task.contains_marker(&requirement.marker) {
                continue;
            }

            let message = match &requirement.reference {
                Some(name) => format!(
                    "Missing required section {} (or placeholder {{{{{name}}}}})",
                    requirement.marker
                ),
                None => format!("Missing required section {}", requirement.marker),
            };
            result.push(
                ValidationError::new(ErrorKind::MissingRequiredSection, &task.id, message)
                    .at_line(task.line),
            );
        }

        if !task.uses_placeholder_prefix(&sections.error_handling_reference_prefix) {
            for marker in &sections.error_handling {
                if !task.contains_marker(marker) {
                    result.push(
                        ValidationError::new(
                            ErrorKind::MissingRequiredSection,
                            &task.id,
                            format!(
                                "Missing error handling section {marker} (or a {{{{{}...}}}} placeholder)",
                                sections.error_handling_reference_prefix
                            ),
                        )
                        .at_line(task.line),
                    );
                }
            }
        }

        if ctx.is_completed(task) {
            for marker in &sections.completion {
                if !task.contains_marker(marker) {
                    result.push(
                        ValidationError::new(
                            ErrorKind::MissingCompletionSection,
                            &task.id,
                            format!("Completed task is missing section {marker}"),
                        )
                        .at_line(task.line),
                    );
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validators::test_support::{messages, Fixture};

    const COMPLETE_BASE: &str = "\
### ABC001: Task
**Description**: Something
**Status**: Planned
**Priority**: High
**Dependencies**: None
**Acceptance Criteria**: It works
**Error Handling Strategy**: Report
**Error Recovery**: Retry
";

    #[test]
    fn test_all_sections_present() {
        let result = Fixture::new(COMPLETE_BASE).run(&SectionValidator, "ABC001");
        assert!(result.valid, "{:?}", messages(&result));
    }

    #[test]
    fn test_missing_section_reported() {
        let doc = COMPLETE_BASE.replace("**Priority**: High\n", "");
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");

        assert_eq!(
            messages(&result),
            vec!["Missing required section **Priority**"]
        );
        assert_eq!(result.errors[0].kind, ErrorKind::MissingRequiredSection);
    }

    #[test]
    fn test_placeholder_substitutes_section() {
        let doc = COMPLETE_BASE.replace(
            "**Acceptance Criteria**: It works",
            "{{acceptance-criteria}}",
        );
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert!(result.valid, "{:?}", messages(&result));
    }

    #[test]
    fn test_wrong_placeholder_does_not_substitute() {
        let doc = COMPLETE_BASE.replace("**Acceptance Criteria**: It works", "{{other}}");
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0]
            .message
            .contains("(or placeholder {{acceptance-criteria}})"));
    }

    #[test]
    fn test_error_handling_placeholder() {
        let doc = COMPLETE_BASE
            .replace("**Error Handling Strategy**: Report\n", "")
            .replace("**Error Recovery**: Retry\n", "{{error-handling-default}}\n");
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert!(result.valid, "{:?}", messages(&result));
    }

    #[test]
    fn test_error_handling_required_without_placeholder() {
        let doc = COMPLETE_BASE.replace("**Error Recovery**: Retry\n", "");
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("**Error Recovery**"));
    }

    #[test]
    fn test_completed_task_needs_completion_sections() {
        let doc = COMPLETE_BASE.replace("**Status**: Planned", "**Status**: Completed");
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");

        assert_eq!(result.errors.len(), 4);
        assert!(result
            .errors
            .iter()
            .all(|e| e.kind == ErrorKind::MissingCompletionSection));
        assert!(messages(&result)
            .iter()
            .any(|m| m.contains("**Error Handling Implementation**")));
    }

    #[test]
    fn test_completed_table_entry_needs_completion_sections() {
        let doc = format!(
            "## Completed Tasks\n| ID | Title | Status |\n|---|---|---|\n| ABC001 | Task | Done |\n\n{COMPLETE_BASE}"
        );
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert_eq!(result.errors.len(), 4);
    }

    #[test]
    fn test_completed_with_all_sections() {
        let doc = format!(
            "{}**Implementation Notes**: n\n**Complexity Assessment**: low\n**Maintenance Impact**: none\n**Error Handling Implementation**: done\n",
            COMPLETE_BASE.replace("**Status**: Planned", "**Status**: Completed")
        );
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert!(result.valid, "{:?}", messages(&result));
    }

    #[test]
    fn test_fields_inside_numbered_subtask_do_not_count() {
        let doc = COMPLETE_BASE.replace("**Status**: Planned\n", "")
            + "#### 1. Watch (ABC001-1)\n**Status**: Planned\n";
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");

        assert_eq!(
            messages(&result),
            vec!["Missing required section **Status**"]
        );
        assert_eq!(result.errors[0].line, Some(1));
    }

    #[test]
    fn test_subtask_error_handling_placeholder_does_not_cover_task() {
        let doc = COMPLETE_BASE
            .replace("**Error Handling Strategy**: Report\n", "")
            .replace("**Error Recovery**: Retry\n", "")
            + "#### 1. Step (ABC001-1)\n**Status**: Planned\n{{error-handling-subtask}}\n";
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");

        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].message.contains("**Error Handling Strategy**"));
        assert!(result.errors[1].message.contains("**Error Recovery**"));
    }

    #[test]
    fn test_checkbox_subtasks_stay_in_task_lines() {
        let doc = COMPLETE_BASE.replacen(
            "### ABC001: Task\n",
            "### ABC001: Task\n- [ ] Step [ABC001a]\n",
            1,
        );
        let result = Fixture::new(&doc).run(&SectionValidator, "ABC001");
        assert!(result.valid, "{:?}", messages(&result));
    }
}
