//! Canonical task list written by `tasklint init`

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A complete task list that passes every default rule. It shows both subtask notations,
/// placeholder substitution for shared sections, and a completed task.
pub const TEMPLATE: &str = include_str!("../templates/tasks.md");

/// Write the template to `path`, refusing to replace an existing file unless `force` is set.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, TEMPLATE)
        .with_context(|| format!("Failed to write template to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote task list template");
    Ok(())
}
