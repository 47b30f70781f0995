//! `tasklint check`: validate one or more task list files and report per file

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use colored::{ColoredString, Colorize};
use glob::glob;
use serde::Serialize;

use crate::check::{check_file, CheckReport};
use crate::config::LintConfig;
use crate::error::LintError;
use crate::validate::{ErrorKind, Severity, ValidationError};

/// Report format for the check command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Explicit config file; otherwise discovered
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    /// Fail on warnings as well as errors
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct FatalError {
    kind: ErrorKind,
    message: String,
}

#[derive(Debug, Serialize)]
struct FileEntry {
    path: String,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<CheckReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<FatalError>,
}

impl FileEntry {
    fn new(path: &Path, outcome: Result<CheckReport, LintError>, strict: bool) -> Self {
        let path = path.display().to_string();
        match outcome {
            Ok(report) => Self {
                path,
                passed: report.passes(strict),
                report: Some(report),
                error: None,
            },
            Err(err) => Self {
                path,
                passed: false,
                report: None,
                error: Some(FatalError {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            },
        }
    }
}

fn has_glob_chars(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expand the command-line inputs into files. Existing paths are taken as-is; anything
/// else is treated as a glob pattern that must match at least one file.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);
        if path.exists() {
            paths.push(path);
            continue;
        }
        if !has_glob_chars(input) {
            bail!("No such file: {input}");
        }

        let mut matches: Vec<PathBuf> = glob(input)
            .map_err(|e| anyhow!("Invalid glob pattern '{input}': {e}"))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            bail!("No files match pattern: {input}");
        }
        matches.sort();
        paths.extend(matches);
    }

    paths.dedup();
    Ok(paths)
}

/// Execute the check command
pub fn execute(inputs: &[String], options: &CheckOptions) -> Result<()> {
    let (config, source) = LintConfig::discover(options.config.as_deref())
        .context("Failed to load tasklint configuration")?;
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "using config file"),
        None => tracing::debug!("using built-in rules"),
    }

    let paths = resolve_inputs(inputs)?;
    let entries: Vec<FileEntry> = paths
        .iter()
        .map(|path| FileEntry::new(path, check_file(path, &config), options.strict))
        .collect();

    match options.format {
        OutputFormat::Text => {
            for entry in &entries {
                print_entry(entry);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("Failed to serialize report")?
            );
        }
    }

    let failed = entries.iter().filter(|e| !e.passed).count();
    if failed > 0 {
        bail!(
            "{failed} of {} task list{} failed validation",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<8}", severity.to_string());
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::Error => label.red(),
        Severity::Warning => label.yellow(),
        Severity::Info => label.dimmed(),
    }
}

fn print_finding(finding: &ValidationError) {
    let mut location = String::new();
    if let Some(id) = &finding.task_id {
        location.push_str(&format!("[{id}] "));
    }
    if let Some(line) = finding.line {
        location.push_str(&format!("line {line}: "));
    }
    println!(
        "    {} {}{}",
        severity_label(finding.severity),
        location.dimmed(),
        finding.message
    );
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn print_entry(entry: &FileEntry) {
    let mark = if entry.passed {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };

    if let Some(err) = &entry.error {
        println!("{} {}: {}", mark, entry.path.bold(), err.message);
        return;
    }
    let Some(report) = &entry.report else {
        return;
    };

    let result = &report.result;
    if let Ok(message) = report.outcome() {
        println!(
            "{} {}: {} {}",
            mark,
            entry.path.bold(),
            message,
            format!(
                "({}, {}, {})",
                plural(report.task_count, "task"),
                plural(report.detail_count, "detail section"),
                plural(report.reference_count, "reference")
            )
            .dimmed()
        );
    } else {
        println!(
            "{} {}: {}, {}",
            mark,
            entry.path.bold(),
            plural(result.errors.len(), "error"),
            plural(result.warnings.len(), "warning")
        );
    }

    for finding in result.errors.iter().chain(&result.warnings) {
        print_finding(finding);
    }
}
