//! Whole-document check.
//!
//! Runs the stages in order: reference resolution, summary tables, detail sections, and
//! the validator pipeline. Structural failures abort with a [`LintError`]; everything
//! else is collected into one [`CheckReport`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;

use crate::config::LintConfig;
use crate::document::Document;
use crate::error::LintError;
use crate::references::{extract_references, resolve_references, unused_references, ReferenceMap};
use crate::tasks::{extract_task_details, extract_task_table, TableOrigin, TaskDetail, TaskStub};
use crate::validate::{
    ErrorKind, Severity, ValidationContext, ValidationError, ValidationPipeline,
    ValidationResult,
};

/// Confirmation returned by [`CheckReport::outcome`] for a clean document
pub const SUCCESS_MESSAGE: &str = "Task list validation passed";

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Rows across both summary tables
    pub task_count: usize,
    pub detail_count: usize,
    pub reference_count: usize,
    pub result: ValidationResult,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    /// Whether the document passes; in strict mode warnings fail it too (info does not).
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid()
            && (!strict
                || self
                    .result
                    .warnings
                    .iter()
                    .all(|w| w.severity < Severity::Warning))
    }

    /// The confirmation message, or every failing finding on its own line
    pub fn outcome(&self) -> Result<&'static str, String> {
        if self.is_valid() {
            Ok(SUCCESS_MESSAGE)
        } else {
            Err(self.result.error_report())
        }
    }
}

/// Read and check a task list file
pub fn check_file(path: &Path, config: &LintConfig) -> Result<CheckReport, LintError> {
    let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "checking task list");
    check_document(&content, config)
}

/// Check a task list with the validators enabled in `config`
pub fn check_document(content: &str, config: &LintConfig) -> Result<CheckReport, LintError> {
    let pipeline = ValidationPipeline::from_config(config);
    check_document_with(content, config, &pipeline)
}

/// Check a task list with a caller-supplied pipeline
pub fn check_document_with(
    content: &str,
    config: &LintConfig,
    pipeline: &ValidationPipeline,
) -> Result<CheckReport, LintError> {
    let patterns = config.compile_patterns()?;
    let doc = Document::parse(content);
    if doc.is_empty() {
        return Err(LintError::NoTasksFound);
    }
    tracing::debug!(lines = doc.len(), "parsed document");

    let references = extract_references(&doc);
    let mut result = reference_findings(&doc, &references);

    let mut stubs = Vec::new();
    for (title, origin) in [
        (&config.tables.active_title, TableOrigin::Active),
        (&config.tables.completed_title, TableOrigin::Completed),
    ] {
        let Some(table) = extract_task_table(&doc, title, origin, &patterns.id)? else {
            continue;
        };
        if !table.has_header_row {
            result.warn(
                ValidationError::document(
                    ErrorKind::MalformedTable,
                    format!(
                        "Heading '## {title}' at line {} is not followed by a table",
                        table.heading_line
                    ),
                )
                .at_line(table.heading_line),
            );
        }
        stubs.extend(table.stubs);
    }

    if stubs.is_empty() {
        return Err(LintError::NoTasksFound);
    }

    let tasks = extract_task_details(&doc);

    if let Some(finding) = duplicate_ids(&stubs) {
        result.push(finding);
    }
    result = result.combine(missing_details(&stubs, &tasks, config));

    tracing::debug!(validators = ?pipeline, tasks = tasks.len(), "running validators");
    let ctx = ValidationContext::new(&tasks, &stubs, &references, config, &patterns);
    result = result.combine(pipeline.validate_all(&ctx));
    result.sort_for_report();

    tracing::info!(
        valid = result.is_valid(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "check finished"
    );

    Ok(CheckReport {
        task_count: stubs.len(),
        detail_count: tasks.len(),
        reference_count: references.len(),
        result,
    })
}

fn reference_findings(doc: &Document, references: &ReferenceMap) -> ValidationResult {
    let mut result = ValidationResult::success();

    if let Err(missing) = resolve_references(doc, references) {
        for miss in missing {
            result.push(
                ValidationError::document(ErrorKind::MissingReferenceDefinition, miss.to_string())
                    .at_line(miss.line),
            );
        }
    }

    for shadowed in references.shadowed() {
        let winner = references
            .get(&shadowed.name)
            .map(|r| r.line)
            .unwrap_or(shadowed.line);
        result.warn(
            ValidationError::document(
                ErrorKind::DuplicateReferenceDefinition,
                format!(
                    "Reference '{}' defined at line {} is overridden by the definition at line {}",
                    shadowed.name, shadowed.line, winner
                ),
            )
            .at_line(shadowed.line),
        );
    }

    for unused in unused_references(doc, references) {
        result.push(
            ValidationError::document(
                ErrorKind::UnusedReference,
                format!(
                    "Reference '{}' defined at line {} is never used",
                    unused.name, unused.line
                ),
            )
            .with_severity(Severity::Info)
            .at_line(unused.line),
        );
    }

    result
}

/// One finding covering every ID that appears more than once across both tables
fn duplicate_ids(stubs: &[TaskStub]) -> Option<ValidationError> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&TaskStub>> = HashMap::new();
    for stub in stubs {
        let entries = groups.entry(stub.id.as_str()).or_default();
        if entries.is_empty() {
            order.push(&stub.id);
        }
        entries.push(stub);
    }

    let duplicated: Vec<&Vec<&TaskStub>> = order
        .iter()
        .filter_map(|id| groups.get(id))
        .filter(|entries| entries.len() > 1)
        .collect();
    let first_repeat = duplicated.first().map(|entries| entries[1].source_line)?;

    let described: Vec<String> = duplicated
        .iter()
        .map(|entries| {
            let places: Vec<String> = entries
                .iter()
                .map(|s| format!("{} table line {}", s.origin, s.source_line))
                .collect();
            format!("{} ({})", entries[0].id, places.join(", "))
        })
        .collect();

    Some(
        ValidationError::document(
            ErrorKind::DuplicateId,
            format!("Duplicate task IDs found: {}", described.join("; ")),
        )
        .at_line(first_repeat),
    )
}

/// Table rows without a detail section. Completed tasks may omit theirs.
fn missing_details(
    stubs: &[TaskStub],
    tasks: &[TaskDetail],
    config: &LintConfig,
) -> ValidationResult {
    let described: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut reported = HashSet::new();

    ValidationResult::from_findings(
        stubs
            .iter()
            .filter(|s| !described.contains(s.id.as_str()))
            .filter(|s| !s.is_completed(&config.status.completed))
            .filter(|s| reported.insert(s.id.as_str()))
            .map(|s| {
                ValidationError::new(
                    ErrorKind::MissingDetailSection,
                    &s.id,
                    format!(
                        "Task listed in the {} table at line {} has no detail section",
                        s.origin, s.source_line
                    ),
                )
                .at_line(s.source_line)
            }),
    )
}
