//! Validation rules configuration
//!
//! Every rule threshold and vocabulary the validators consult lives here. The defaults
//! describe the canonical task-list schema; a `tasklint.toml` file can override any part
//! of it.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// Project-level config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tasklint.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Task ID grammar
    pub id_pattern: String,
    /// Review rating grammar for completed numbered subtasks
    pub rating_pattern: String,
    pub tables: TableConfig,
    pub status: StatusConfig,
    pub sections: SectionConfig,
    pub kpi: KpiConfig,
    pub categories: Vec<CategoryRange>,
    /// Validator names to leave out of the pipeline
    pub disabled_validators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub active_title: String,
    pub completed_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusConfig {
    pub values: Vec<String>,
    pub priorities: Vec<String>,
    /// Status that requires at least one subtask
    pub in_progress: String,
    /// Status that requires completion sections and review ratings
    pub completed: String,
}

/// A section marker a task must contain, optionally satisfied by a placeholder instead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionRequirement {
    pub marker: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionConfig {
    pub required: Vec<SectionRequirement>,
    /// Extra sections for tasks whose status is completed
    pub completion: Vec<String>,
    /// Task-level error handling sections
    pub error_handling: Vec<String>,
    /// Error handling sections for numbered subtasks
    pub subtask_error_handling: Vec<String>,
    /// Placeholder names starting with this prefix stand in for error handling sections
    pub error_handling_reference_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KpiConfig {
    pub section: String,
    /// Placeholder names starting with this prefix stand in for the KPI section
    pub reference_prefix: String,
    pub max_functions_per_module: u32,
    pub max_lines_per_function: u32,
    pub max_call_depth: u32,
}

/// Inclusive band of ID numbers mapped to a task category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRange {
    pub name: String,
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub sections: Vec<String>,
}

impl CategoryRange {
    pub fn contains(&self, number: u32) -> bool {
        (self.start..=self.end).contains(&number)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            active_title: "Active Tasks".to_string(),
            completed_title: "Completed Tasks".to_string(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            values: strings(&["Planned", "In Progress", "Review", "Completed", "Blocked"]),
            priorities: strings(&["Critical", "High", "Medium", "Low"]),
            in_progress: "In Progress".to_string(),
            completed: "Completed".to_string(),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        let required = [
            ("**Description**", None),
            ("**Status**", None),
            ("**Priority**", None),
            ("**Dependencies**", None),
            ("**Acceptance Criteria**", Some("acceptance-criteria")),
        ]
        .into_iter()
        .map(|(marker, reference)| SectionRequirement {
            marker: marker.to_string(),
            reference: reference.map(str::to_string),
        })
        .collect();

        Self {
            required,
            completion: strings(&[
                "**Implementation Notes**",
                "**Complexity Assessment**",
                "**Maintenance Impact**",
                "**Error Handling Implementation**",
            ]),
            error_handling: strings(&["**Error Handling Strategy**", "**Error Recovery**"]),
            subtask_error_handling: strings(&["**Error Handling**"]),
            error_handling_reference_prefix: "error-handling".to_string(),
        }
    }
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            section: "**Code Quality KPIs**".to_string(),
            reference_prefix: "kpi".to_string(),
            max_functions_per_module: 8,
            max_lines_per_function: 15,
            max_call_depth: 3,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        let categories = [
            ("core", 1, 199, "**Architecture Impact**"),
            ("feature", 200, 499, "**User Impact**"),
            ("integration", 500, 699, "**Integration Points**"),
            ("testing", 700, 899, "**Test Coverage**"),
            ("maintenance", 900, 999, "**Maintenance Scope**"),
            ("research", 1000, 9999, "**Research Questions**"),
        ]
        .into_iter()
        .map(|(name, start, end, section)| CategoryRange {
            name: name.to_string(),
            start,
            end,
            sections: vec![section.to_string()],
        })
        .collect();

        Self {
            id_pattern: r"^[A-Z]{2,4}[0-9]{3,4}(-[0-9]+|[a-z])?$".to_string(),
            rating_pattern: r"^[1-5](\.[0-9])?\s*(\(partial\))?$".to_string(),
            tables: TableConfig::default(),
            status: StatusConfig::default(),
            sections: SectionConfig::default(),
            kpi: KpiConfig::default(),
            categories,
            disabled_validators: Vec::new(),
        }
    }
}

/// Regexes compiled once per run from the configured grammars
#[derive(Debug, Clone)]
pub struct Patterns {
    pub id: Regex,
    pub rating: Regex,
}

impl LintConfig {
    /// Parse a TOML config; omitted keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, LintError> {
        let config: LintConfig =
            toml::from_str(content).map_err(|e| LintError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, LintError> {
        let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Locate and load configuration.
    ///
    /// Order: explicit path, `./tasklint.toml`, `<config dir>/tasklint/config.toml`,
    /// built-in defaults. Returns the file used, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), LintError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        let candidates = [
            Some(PathBuf::from(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("tasklint").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Ok((Self::from_file(&path)?, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Check internal consistency: compilable grammars and disjoint category ranges.
    pub fn validate(&self) -> Result<(), LintError> {
        self.compile_patterns()?;

        if self.status.values.is_empty() {
            return Err(LintError::InvalidConfig(
                "status.values cannot be empty".to_string(),
            ));
        }
        if self.status.priorities.is_empty() {
            return Err(LintError::InvalidConfig(
                "status.priorities cannot be empty".to_string(),
            ));
        }

        for range in &self.categories {
            if range.start > range.end {
                return Err(LintError::InvalidConfig(format!(
                    "category '{}' has start {} greater than end {}",
                    range.name, range.start, range.end
                )));
            }
        }

        let mut sorted: Vec<&CategoryRange> = self.categories.iter().collect();
        sorted.sort_by_key(|r| r.start);
        for pair in sorted.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(LintError::InvalidConfig(format!(
                    "category ranges '{}' and '{}' overlap",
                    pair[0].name, pair[1].name
                )));
            }
        }

        Ok(())
    }

    pub fn compile_patterns(&self) -> Result<Patterns, LintError> {
        let id = Regex::new(&self.id_pattern).map_err(|source| LintError::InvalidPattern {
            field: "id_pattern",
            source,
        })?;
        let rating =
            Regex::new(&self.rating_pattern).map_err(|source| LintError::InvalidPattern {
                field: "rating_pattern",
                source,
            })?;
        Ok(Patterns { id, rating })
    }

    /// Category whose range contains `number`
    pub fn category_for(&self, number: u32) -> Option<&CategoryRange> {
        self.categories.iter().find(|range| range.contains(number))
    }
}
