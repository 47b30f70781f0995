//! Task detail section extraction

use std::sync::LazyLock;

use regex::Regex;

use super::{extract_subtasks, TaskDetail};
use crate::document::{heading_level, Document};

static DETAIL_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*###\s+([^\s:]+):\s*(.*)$").expect("detail heading pattern compiles")
});

/// Find every `### ID: Title` section.
///
/// A section runs from its heading up to the next heading of level 3 or shallower, or the
/// end of the document. Subtasks are extracted from each section's lines.
pub fn extract_task_details(doc: &Document) -> Vec<TaskDetail> {
    let lines = doc.lines();
    let mut details = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = DETAIL_HEADING_RE.captures(line) else {
            continue;
        };

        let end = lines
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, l)| heading_level(l).is_some_and(|level| level <= 3))
            .map(|(i, _)| i)
            .unwrap_or(lines.len());

        let content_lines = lines[idx..end].to_vec();
        let subtasks = extract_subtasks(&content_lines);

        details.push(TaskDetail {
            id: caps[1].to_string(),
            title: caps[2].trim().to_string(),
            line: idx + 1,
            content_lines,
            subtasks,
        });
    }

    tracing::debug!(tasks = details.len(), "extracted task detail sections");
    details
}
