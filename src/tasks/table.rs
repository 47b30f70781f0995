//! Summary table extraction

use regex::Regex;

use super::{TableOrigin, TaskStub};
use crate::document::{heading_level, Document};
use crate::error::LintError;

/// Rows read from one summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTable {
    pub origin: TableOrigin,
    /// 1-based line of the `## Title` heading
    pub heading_line: usize,
    /// False when the heading is not followed by a table at all
    pub has_header_row: bool,
    pub stubs: Vec<TaskStub>,
}

fn is_table_heading(line: &str, title: &str) -> bool {
    heading_level(line) == Some(2)
        && line
            .trim()
            .trim_start_matches('#')
            .trim()
            .eq_ignore_ascii_case(title)
}

fn is_separator_row(line: &str) -> bool {
    line.starts_with('|') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn split_row(line: &str) -> Vec<&str> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn clean_id(cell: &str) -> &str {
    cell.trim_matches(|c: char| c == '*' || c == '`').trim()
}

/// Read the summary table under `## {title}`.
///
/// Returns `Ok(None)` when the heading is absent. Blank lines between the heading and the
/// table are tolerated; if the first non-blank line is not a table row the result has
/// `has_header_row == false` and no stubs. Rows end at a blank line or any heading.
/// A row whose ID does not match `id_pattern` aborts the run.
pub fn extract_task_table(
    doc: &Document,
    title: &str,
    origin: TableOrigin,
    id_pattern: &Regex,
) -> Result<Option<TaskTable>, LintError> {
    let lines = doc.lines();
    let Some(heading_idx) = lines.iter().position(|l| is_table_heading(l, title)) else {
        tracing::debug!(title, "table heading not found");
        return Ok(None);
    };

    let mut table = TaskTable {
        origin,
        heading_line: heading_idx + 1,
        has_header_row: false,
        stubs: Vec::new(),
    };

    let Some(header_idx) = (heading_idx + 1..lines.len()).find(|&i| !lines[i].trim().is_empty())
    else {
        return Ok(Some(table));
    };
    if !lines[header_idx].trim_start().starts_with('|') {
        return Ok(Some(table));
    }
    table.has_header_row = true;

    for (idx, raw) in lines.iter().enumerate().skip(header_idx + 1) {
        let line = raw.trim();
        if line.is_empty() || heading_level(line).is_some() {
            break;
        }
        if !line.starts_with('|') || is_separator_row(line) {
            continue;
        }

        let cells = split_row(line);
        let id = clean_id(cells.first().copied().unwrap_or_default());
        if !id_pattern.is_match(id) {
            return Err(LintError::InvalidTableId {
                id: id.to_string(),
                line: idx + 1,
            });
        }

        let raw_status = cells
            .get(2)
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        table.stubs.push(TaskStub {
            id: id.to_string(),
            source_line: idx + 1,
            raw_status,
            origin,
        });
    }

    tracing::debug!(title, rows = table.stubs.len(), "extracted task table");
    Ok(Some(table))
}
