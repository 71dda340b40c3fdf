//! `tagval generate`: write one validator file per namespace.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tagval_codegen::generate;

use crate::config::CliConfig;
use crate::manifest;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Record manifest (.toml, .json, .yaml).
    pub manifest: PathBuf,

    /// Directory the generated files are written to.
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Path of the runtime crate in generated code.
    #[arg(long)]
    pub runtime_path: Option<String>,

    /// Omit the "generated, do not edit" banner.
    #[arg(long)]
    pub no_header: bool,
}

pub fn run_generate(args: &GenerateArgs, config: &CliConfig) -> anyhow::Result<u8> {
    let mut generator = config.generator.clone();
    if let Some(path) = &args.runtime_path {
        generator.runtime_path.clone_from(path);
    }
    if args.no_header {
        generator.header = false;
    }

    let schema = manifest::load(&args.manifest)?;
    let files = generate(&schema, &generator)?;

    if files.is_empty() {
        println!("no validation tags found; nothing written");
        return Ok(0);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    for file in &files {
        let path = args.out_dir.join(&file.file_name);
        std::fs::write(&path, &file.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(namespace = %file.namespace, path = %path.display(), "wrote validators");
        println!("wrote {}", path.display());
    }

    Ok(0)
}
