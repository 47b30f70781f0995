//! Subtask extraction for both notations

use std::sync::LazyLock;

use regex::Regex;

use super::{Subtask, SubtaskFormat};
use crate::document::heading_level;

/// Stand-in ID for a subtask line whose ID could not be extracted
pub const INVALID_SUBTASK_ID: &str = "INVALID_FORMAT";

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*####\s+(\d+)\.\s*(.*)$").expect("numbered subtask pattern compiles")
});

static NUMBERED_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([^()]*)\)\s*$").expect("numbered subtask id pattern compiles")
});

static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*]\s+\[([ xX])\]\s*(.*)$").expect("checkbox pattern compiles")
});

static CHECKBOX_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\s*$").expect("checkbox suffix pattern compiles")
});

static BOLD_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([A-Z]+[0-9][A-Za-z0-9-]*)\*\*").expect("bold id pattern compiles")
});

fn non_empty(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

fn numbered_id(text: &str) -> Option<String> {
    NUMBERED_ID_RE
        .captures(text)
        .and_then(|caps| non_empty(&caps[1]))
}

fn checkbox_id(text: &str) -> Option<String> {
    CHECKBOX_SUFFIX_RE
        .captures(text)
        .and_then(|caps| non_empty(&caps[1]))
        .or_else(|| BOLD_ID_RE.captures(text).and_then(|caps| non_empty(&caps[1])))
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Locate subtasks in a task section. Offsets are relative to `content`.
///
/// Lines inside fenced code blocks are ignored. A numbered subtask's body ends at the
/// next numbered subtask, the next heading of level 4 or less, or the end of `content`.
pub fn extract_subtasks(content: &[String]) -> Vec<Subtask> {
    let mut subtasks = Vec::new();
    let mut in_fence = false;

    for (offset, line) in content.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = NUMBERED_RE.captures(line) {
            let number = caps[1].parse().unwrap_or(0);
            let text = caps[2].trim();
            let id = numbered_id(text).unwrap_or_else(|| INVALID_SUBTASK_ID.to_string());
            subtasks.push(Subtask {
                id,
                line_offset: offset,
                description: NUMBERED_ID_RE.replace(text, "").trim().to_string(),
                format: SubtaskFormat::Numbered {
                    number,
                    body_end: numbered_body_end(content, offset),
                },
            });
        } else if let Some(caps) = CHECKBOX_RE.captures(line) {
            let checked = caps[1].eq_ignore_ascii_case("x");
            let text = caps[2].trim();
            let id = checkbox_id(text).unwrap_or_else(|| INVALID_SUBTASK_ID.to_string());
            subtasks.push(Subtask {
                id,
                line_offset: offset,
                description: text.to_string(),
                format: SubtaskFormat::Checkbox { checked },
            });
        }
    }

    subtasks
}

fn numbered_body_end(content: &[String], start: usize) -> usize {
    content
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| {
            NUMBERED_RE.is_match(line) || heading_level(line).is_some_and(|level| level <= 4)
        })
        .map(|(idx, _)| idx)
        .unwrap_or(content.len())
}
