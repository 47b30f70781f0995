//! Finding and result types shared by every validator

use serde::Serialize;

/// Failure class of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidIdFormat,
    DuplicateId,
    MissingDetailSection,
    MissingRequiredSection,
    MissingCompletionSection,
    InvalidStatus,
    InvalidPriority,
    MissingSubtasks,
    SubtaskPrefixMismatch,
    MissingSubtaskSection,
    InvalidReviewRating,
    MissingReviewRating,
    InvalidDependency,
    MissingKpi,
    KpiExceedsLimit,
    CategoryOutOfRange,
    MissingCategorySection,
    MissingReferenceDefinition,
    DuplicateReferenceDefinition,
    UnusedReference,
    MalformedTable,
    NoTasksFound,
    InvalidConfig,
    IoFailure,
}

/// How serious a finding is.
///
/// `Critical` findings stop the remaining validators for the same task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A single finding with context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub task_id: Option<String>,
    pub message: String,
    pub severity: Severity,
    /// 1-based document line, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id: Some(task_id.into()),
            message: message.into(),
            severity: Severity::Error,
            line: None,
        }
    }

    /// Finding that belongs to the document rather than a single task
    pub fn document(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id: None,
            message: message.into(),
            severity: Severity::Error,
            line: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = &self.task_id {
            write!(f, "Task '{}': {}", id, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Findings gathered by one or more validators.
///
/// `combine` is associative and keeps insertion order, so results can be folded in
/// any grouping without changing the final list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Build a result from a list of findings, routing each by severity.
    pub fn from_findings(findings: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut result = Self::success();
        for finding in findings {
            result.push(finding);
        }
        result
    }

    /// Record a finding; `Error` and `Critical` fail the result.
    pub fn push(&mut self, finding: ValidationError) {
        match finding.severity {
            Severity::Error | Severity::Critical => {
                self.valid = false;
                self.errors.push(finding);
            }
            Severity::Info | Severity::Warning => self.warnings.push(finding),
        }
    }

    /// Record a finding capped at warning severity
    pub fn warn(&mut self, finding: ValidationError) {
        let severity = finding.severity.min(Severity::Warning);
        self.push(finding.with_severity(severity));
    }

    pub fn combine(mut self, other: ValidationResult) -> ValidationResult {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    pub fn has_critical(&self) -> bool {
        self.errors.iter().any(ValidationError::is_critical)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Stable ordering for presentation: document-level findings first, then grouped
    /// by task ID with the original order kept inside each group.
    pub fn sort_for_report(&mut self) {
        self.errors.sort_by(|a, b| a.task_id.cmp(&b.task_id));
        self.warnings.sort_by(|a, b| a.task_id.cmp(&b.task_id));
    }

    /// All failing findings as newline-separated lines
    pub fn error_report(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ValidationResult::success(), ValidationResult::combine)
    }
}
