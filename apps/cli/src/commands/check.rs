//! `tagval check`: report whether a manifest carries validation tags and
//! whether every tag compiles.

use std::path::PathBuf;

use clap::Args;
use tagval_codegen::{GeneratorConfig, PlanCompiler, RustEmitter};

use crate::manifest;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Record manifest (.toml, .json, .yaml).
    pub manifest: PathBuf,
}

pub fn run_check(args: &CheckArgs) -> anyhow::Result<u8> {
    let schema = manifest::load(&args.manifest)?;

    if !schema.has_tags() {
        println!("no validation tags found");
        return Ok(0);
    }

    let plans = PlanCompiler::new(&schema).compile_all()?;

    // names the emitter cannot spell fail here too, not only in `generate`
    let config = GeneratorConfig::default();
    let emitter = RustEmitter::new(&config);
    for plan in &plans {
        emitter.emit_impl(plan)?;
    }

    println!(
        "validation tags found: {} of {} record(s) have validators",
        plans.len(),
        schema.len()
    );
    for plan in &plans {
        if plan.namespace().is_empty() {
            println!("  {}: {} step(s)", plan.record(), plan.len());
        } else {
            println!(
                "  {}::{}: {} step(s)",
                plan.namespace(),
                plan.record(),
                plan.len()
            );
        }
    }

    Ok(0)
}
