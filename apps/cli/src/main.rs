//! # tagval
//!
//! Generates Rust validators from tagged record manifests, checks manifests
//! for tag errors, and validates JSON instances by interpreting the same
//! plans.

mod commands;
mod config;
mod manifest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CheckArgs, GenerateArgs, ValidateArgs, run_check, run_generate, run_validate,
};
use config::CliConfig;

/// Tag-driven validator generation.
#[derive(Parser, Debug)]
#[command(name = "tagval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file (default: ./tagval.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write `<namespace>_tagval.rs` validators for a manifest.
    Generate(GenerateArgs),

    /// Report whether a manifest has validation tags and that they compile.
    Check(CheckArgs),

    /// Validate a JSON instance against a record of a manifest.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };

    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let result = match &cli.command {
        Commands::Generate(args) => run_generate(args, &config),
        Commands::Check(args) => run_check(args),
        Commands::Validate(args) => run_validate(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v`/`-vv` or the configured level.
fn init_tracing(verbose: u8, log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => log_level,
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
