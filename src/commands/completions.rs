//! Shell completion scripts

use std::io::{self, Write};

use anyhow::Result;
use clap::{Command, ValueEnum};
use clap_complete::{generate, shells};

/// Shells with a completion generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Write the completion script for `shell` to `out`
pub fn write_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, cmd, bin_name, out),
        Shell::Zsh => generate(shells::Zsh, cmd, bin_name, out),
        Shell::Fish => generate(shells::Fish, cmd, bin_name, out),
    }
}

/// Execute the completions command, printing the script to stdout
pub fn execute(cmd: &mut Command, shell: Shell) -> Result<()> {
    write_completions(cmd, shell, &mut io::stdout());
    Ok(())
}
