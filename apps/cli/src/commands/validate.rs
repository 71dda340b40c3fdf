//! `tagval validate`: interpret a record's plan against a JSON instance.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use tagval_codegen::PlanCompiler;
use tagval_validator::ValidationResult;

use crate::manifest;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Record manifest (.toml, .json, .yaml).
    pub manifest: PathBuf,

    /// Record to validate the input as.
    #[arg(short, long)]
    pub record: String,

    /// JSON file holding the record instance.
    #[arg(short, long)]
    pub input: PathBuf,
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<u8> {
    let schema = manifest::load(&args.manifest)?;
    let plan = PlanCompiler::new(&schema).compile(&args.record)?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input {}", args.input.display()))?;
    let instance: Value = serde_json::from_str(&text)
        .with_context(|| format!("input {} is not valid JSON", args.input.display()))?;

    let result = match plan {
        Some(plan) => plan.execute(&instance),
        None => {
            tracing::info!(record = %args.record, "record has no validation tags");
            ValidationResult::success()
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(u8::from(!result.pass()))
}
