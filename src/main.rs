use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tasklint::commands::check::{CheckOptions, OutputFormat};
use tasklint::commands::completions::Shell;
use tasklint::commands::{check, completions, init};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tasklint")]
#[command(about = "Validate markdown task lists against a task schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check task list files (paths or glob patterns)
    Check {
        /// Files or glob patterns to check
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Config file (default: ./tasklint.toml, then the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Write a task list template that passes every default rule
    Init {
        /// Where to write the template
        #[arg(default_value = "TASKS.md")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "tasklint=warn",
        1 => "tasklint=info",
        _ => "tasklint=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            inputs,
            config,
            format,
            strict,
        } => {
            let options = CheckOptions {
                config,
                format,
                strict,
            };
            check::execute(&inputs, &options)
        }
        Commands::Init { path, force } => init::execute(&path, force),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::execute(&mut cmd, shell)
        }
    }
}
