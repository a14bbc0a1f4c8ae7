//! `screenspec` command-line entry point.

mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use screenspec_codegen::Framework;
use screenspec_compiler::{CompileOptions, Compiler, CompilerConfig};

/// Compile screen specs into framework source.
#[derive(Parser, Debug)]
#[command(name = "screenspec", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Compiler config file.
    #[arg(short, long, global = true, value_name = "FILE", default_value = "screenspec.json")]
    config: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, env = "SCREENSPEC_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile every screen and write changed files.
    Compile {
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,

        /// Override the configured framework.
        #[arg(long, value_name = "NAME")]
        framework: Option<String>,

        /// Override the configured output root.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Validate every screen without emitting.
    Validate,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.log_level).context("Failed to initialize logging")?;

    let mut config = load_config(&cli.config)?;

    match cli.command {
        Command::Compile {
            dry_run,
            framework,
            out_dir,
        } => {
            if let Some(name) = framework {
                config.backend.framework = name
                    .parse::<Framework>()
                    .with_context(|| format!("Invalid --framework {name:?}"))?;
            }
            if let Some(dir) = out_dir {
                config.out_dir = dir;
            }

            let compiler = Compiler::from_config(config).context("Failed to load compiler inputs")?;
            let report = compiler
                .compile(CompileOptions { dry_run })
                .context("Compilation aborted")?;

            for error in &report.errors {
                eprintln!("error: {error}");
            }
            if dry_run {
                for path in &report.changed {
                    println!("would write {}", path.display());
                }
            }
            println!(
                "{} succeeded, {} failed, {} written, {} unchanged",
                report.succeeded, report.failed, report.written, report.skipped
            );
            Ok(exit_code(report.is_success()))
        }
        Command::Validate => {
            let compiler = Compiler::from_config(config).context("Failed to load compiler inputs")?;
            let summary = compiler.validate_all().context("Validation aborted")?;

            for error in &summary.errors {
                eprintln!("error: {error}");
            }
            println!(
                "{} checked, {} invalid",
                summary.checked,
                summary.errors.len()
            );
            Ok(exit_code(summary.is_success()))
        }
    }
}

/// Read the config file, or fall back to defaults relative to the working
/// directory when it does not exist.
fn load_config(path: &Path) -> Result<CompilerConfig> {
    if path.exists() {
        CompilerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))
    } else {
        tracing::warn!(path = %path.display(), "config not found, using defaults");
        Ok(CompilerConfig::default())
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
