//! CLI entry point for sandguard.
//!
//! Argument parsing, file loading, rendering and exit codes live here.
//! All checking logic lives in `sandguard-core`.

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sandguard_core::{describe, CheckId, Document, Report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code when at least one violation was found.
const EXIT_VIOLATIONS: u8 = 1;
/// Exit code when the input could not be loaded or the command was invalid.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sandguard",
    version,
    about = "Sandbox hardening guard for compose files"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG applies otherwise.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a compose file against the hardening checklist.
    Check {
        /// Path to the compose YAML (or JSON) file.
        file: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List every check with its requirement.
    List,

    /// Explain a check id with remediation guidance.
    Explain {
        /// The check id (e.g., "fs.tmpfs").
        id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.cmd {
        Commands::Check { file, format } => cmd_check(&file, format),
        Commands::List => {
            print!("{}", output::render_check_list());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Explain { id } => {
            let id: CheckId = id.parse()?;
            print!("{}", output::render_explain(describe(id)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_check(file: &Path, format: Format) -> anyhow::Result<ExitCode> {
    let document = Document::from_yaml_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    tracing::info!(file = %file.display(), services = document.services().len(), "loaded compose file");

    let report = Report::build(file.display().to_string(), &document);

    match format {
        Format::Text => print!("{}", output::render_text(&report)),
        Format::Json => println!("{}", report.to_json().context("failed to serialize report")?),
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_VIOLATIONS)
    })
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
