//! Shared fixture for validator unit tests

use crate::config::{LintConfig, Patterns};
use crate::document::Document;
use crate::references::{extract_references, ReferenceMap};
use crate::tasks::{extract_task_details, extract_task_table, TableOrigin, TaskDetail, TaskStub};
use crate::validate::{TaskValidator, ValidationContext, ValidationResult};

pub(crate) struct Fixture {
    pub tasks: Vec<TaskDetail>,
    pub stubs: Vec<TaskStub>,
    pub references: ReferenceMap,
    pub config: LintConfig,
    pub patterns: Patterns,
}

impl Fixture {
    pub fn new(doc: &str) -> Self {
        Self::with_config(doc, LintConfig::default())
    }

    pub fn with_config(doc: &str, config: LintConfig) -> Self {
        let document = Document::parse(doc);
        let patterns = config.compile_patterns().unwrap();
        let mut stubs = Vec::new();
        for (title, origin) in [
            (&config.tables.active_title, TableOrigin::Active),
            (&config.tables.completed_title, TableOrigin::Completed),
        ] {
            if let Some(table) = extract_task_table(&document, title, origin, &patterns.id).unwrap()
            {
                stubs.extend(table.stubs);
            }
        }

        Self {
            tasks: extract_task_details(&document),
            stubs,
            references: extract_references(&document),
            config,
            patterns,
        }
    }

    pub fn run(&self, validator: &dyn TaskValidator, task_id: &str) -> ValidationResult {
        let ctx = ValidationContext::new(
            &self.tasks,
            &self.stubs,
            &self.references,
            &self.config,
            &self.patterns,
        );
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .unwrap_or_else(|| panic!("task {task_id} not in fixture"));
        validator.validate(task, &ctx)
    }
}

/// Messages of the failing findings
pub(crate) fn messages(result: &ValidationResult) -> Vec<String> {
    result.errors.iter().map(|e| e.message.clone()).collect()
}
