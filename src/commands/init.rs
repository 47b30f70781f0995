use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::template::write_template;

/// Execute the init command
pub fn execute(path: &Path, force: bool) -> Result<()> {
    write_template(path, force)?;

    println!(
        "{} Task list template written to {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    println!(
        "  {} tasklint check {}",
        "Next:".dimmed(),
        path.display()
    );
    Ok(())
}
