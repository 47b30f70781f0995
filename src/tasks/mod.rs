//! Task model recovered from the summary tables and detail sections

mod detail;
mod fields;
mod subtask;
mod table;

pub use detail::extract_task_details;
pub use fields::{field_value, FieldValue};
pub use subtask::{extract_subtasks, INVALID_SUBTASK_ID};
pub use table::{extract_task_table, TaskTable};

use crate::references::placeholder_names;

/// Which summary table a stub came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOrigin {
    Active,
    Completed,
}

impl std::fmt::Display for TableOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableOrigin::Active => write!(f, "active"),
            TableOrigin::Completed => write!(f, "completed"),
        }
    }
}

/// A row of a summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStub {
    pub id: String,
    /// 1-based line of the table row
    pub source_line: usize,
    pub raw_status: Option<String>,
    pub origin: TableOrigin,
}

impl TaskStub {
    /// Completed tasks need no detail section.
    pub fn is_completed(&self, completed_status: &str) -> bool {
        self.origin == TableOrigin::Completed
            || self
                .raw_status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(completed_status))
    }
}

/// Subtask notation, with the fields only that notation carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtaskFormat {
    /// `#### 3. Description (ID)`; its body runs up to `body_end` (offset, exclusive)
    Numbered { number: u32, body_end: usize },
    /// `- [x] Description [ID]`
    Checkbox { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    /// Offset of the subtask line within the parent's content (heading is 0)
    pub line_offset: usize,
    pub description: String,
    pub format: SubtaskFormat,
}

impl Subtask {
    pub fn has_valid_extraction(&self) -> bool {
        self.id != INVALID_SUBTASK_ID
    }

    pub fn format_name(&self) -> &'static str {
        match self.format {
            SubtaskFormat::Numbered { .. } => "numbered",
            SubtaskFormat::Checkbox { .. } => "checkbox",
        }
    }
}

/// A `### ID: Title` section with everything up to the next heading of level 3 or less
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    pub id: String,
    pub title: String,
    /// 1-based line of the heading
    pub line: usize,
    /// Section lines, heading included
    pub content_lines: Vec<String>,
    pub subtasks: Vec<Subtask>,
}

impl TaskDetail {
    /// 1-based document line for an offset into `content_lines`
    pub fn document_line(&self, offset: usize) -> usize {
        self.line + offset
    }

    /// Lines before the first numbered subtask; task-level fields live here
    pub fn header_lines(&self) -> &[String] {
        let end = self
            .subtasks
            .iter()
            .filter(|s| matches!(s.format, SubtaskFormat::Numbered { .. }))
            .map(|s| s.line_offset)
            .min()
            .unwrap_or(self.content_lines.len());
        &self.content_lines[..end]
    }

    /// Task-level field such as `**Status**`
    pub fn field(&self, label: &str) -> Option<FieldValue> {
        field_value(self.header_lines(), label)
    }

    /// Marker text in the task's own lines; numbered subtask bodies do not count
    pub fn contains_marker(&self, marker: &str) -> bool {
        self.header_lines().iter().any(|line| line.contains(marker))
    }

    pub fn uses_placeholder(&self, name: &str) -> bool {
        placeholder_names(self.header_lines()).any(|used| used == name)
    }

    pub fn uses_placeholder_prefix(&self, prefix: &str) -> bool {
        placeholder_names(self.header_lines()).any(|used| used.starts_with(prefix))
    }

    /// Lines belonging to a subtask: the body under a numbered heading, or the single
    /// checkbox line
    pub fn subtask_body(&self, subtask: &Subtask) -> &[String] {
        let start = subtask.line_offset.min(self.content_lines.len());
        match subtask.format {
            SubtaskFormat::Numbered { body_end, .. } => {
                let end = body_end.clamp(start, self.content_lines.len());
                &self.content_lines[(start + 1).min(end)..end]
            }
            SubtaskFormat::Checkbox { .. } => {
                &self.content_lines[start..(start + 1).min(self.content_lines.len())]
            }
        }
    }
}

/// Leading uppercase letters of an ID (`ABC` for `ABC001-2`)
pub fn letter_prefix(id: &str) -> &str {
    let end = id
        .char_indices()
        .find(|(_, c)| !c.is_ascii_uppercase())
        .map(|(idx, _)| idx)
        .unwrap_or(id.len());
    &id[..end]
}

/// Numeric part following the letter prefix (`1` for `ABC001-2`)
pub fn id_number(id: &str) -> Option<u32> {
    let rest = &id[letter_prefix(id).len()..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
