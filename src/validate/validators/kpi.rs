//! Code-quality KPI thresholds

use std::sync::LazyLock;

use regex::Regex;

use crate::config::KpiConfig;
use crate::tasks::TaskDetail;
use crate::validate::{
    ErrorKind, TaskValidator, ValidationContext, ValidationError, ValidationResult,
};

static FUNCTIONS_PER_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)functions?\s+per\s+module[*_\s]*:[*_\s]*(\d+)")
        .expect("functions-per-module pattern compiles")
});

static LINES_PER_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)lines?\s+per\s+function[*_\s]*:[*_\s]*(\d+)")
        .expect("lines-per-function pattern compiles")
});

static CALL_DEPTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)call\s+depth[*_\s]*:[*_\s]*(\d+)").expect("call-depth pattern compiles")
});

struct Metric {
    label: &'static str,
    pattern: &'static LazyLock<Regex>,
    max: u32,
}

fn metrics(config: &KpiConfig) -> [Metric; 3] {
    [
        Metric {
            label: "Functions per module",
            pattern: &FUNCTIONS_PER_MODULE_RE,
            max: config.max_functions_per_module,
        },
        Metric {
            label: "Lines per function",
            pattern: &LINES_PER_FUNCTION_RE,
            max: config.max_lines_per_function,
        },
        Metric {
            label: "Call depth",
            pattern: &CALL_DEPTH_RE,
            max: config.max_call_depth,
        },
    ]
}

/// Offsets of the KPI section: its marker line up to the next field or heading
fn kpi_section(task: &TaskDetail, marker: &str) -> Option<std::ops::Range<usize>> {
    let header = task.header_lines();
    let start = header.iter().position(|line| line.contains(marker))?;
    let end = header
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| {
            let trimmed = line.trim_start();
            trimmed.starts_with("**") || crate::document::heading_level(line).is_some()
        })
        .map(|(idx, _)| idx)
        .unwrap_or(header.len());
    Some(start..end)
}

pub struct KpiValidator;

impl TaskValidator for KpiValidator {
    fn name(&self) -> &'static str {
        "kpi"
    }

    fn priority(&self) -> u8 {
        60
    }

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let config = &ctx.config.kpi;

        if task.uses_placeholder_prefix(&config.reference_prefix) {
            return result;
        }

        let Some(section) = kpi_section(task, &config.section) else {
            result.push(
                ValidationError::new(
                    ErrorKind::MissingKpi,
                    &task.id,
                    format!(
                        "Missing KPI section {} (or a {{{{{}...}}}} placeholder)",
                        config.section, config.reference_prefix
                    ),
                )
                .at_line(task.line),
            );
            return result;
        };

        for metric in metrics(config) {
            let found = task.content_lines[section.clone()]
                .iter()
                .enumerate()
                .find_map(|(idx, line)| {
                    let caps = metric.pattern.captures(line)?;
                    // Digits too long for u64 are over any limit
                    let value = caps[1].parse::<u64>().unwrap_or(u64::MAX);
                    Some((section.start + idx, value))
                });

            match found {
                None => result.push(
                    ValidationError::new(
                        ErrorKind::MissingKpi,
                        &task.id,
                        format!("Missing KPI metric '{}'", metric.label),
                    )
                    .at_line(task.document_line(section.start)),
                ),
                Some((offset, value)) if value > u64::from(metric.max) => result.push(
                    ValidationError::new(
                        ErrorKind::KpiExceedsLimit,
                        &task.id,
                        format!(
                            "KPI '{}' is {} which exceeds the maximum of {}",
                            metric.label, value, metric.max
                        ),
                    )
                    .at_line(task.document_line(offset)),
                ),
                Some(_) => {}
            }
        }

        result
    }
}
