//! Record manifests: the descriptors `generate`, `check` and `validate` read.
//!
//! ```toml
//! [[record]]
//! name = "FooStruct"
//! namespace = "accounts"
//!
//! [[record.field]]
//! name = "email"
//! kind = "text"
//! tag = "req,email"
//! ```
//!
//! JSON and YAML manifests use the same shape with a `records` list.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use tagval_codegen::{RecordDescriptor, Schema};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default, alias = "record")]
    records: Vec<RecordDescriptor>,
}

/// Manifest syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
    Yaml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads the manifest at `path` into a schema.
pub fn load(path: &Path) -> anyhow::Result<Schema> {
    let Some(format) = ManifestFormat::from_path(path) else {
        bail!(
            "unsupported manifest {}: expected a .toml, .json, .yaml or .yml file",
            path.display()
        );
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let schema =
        parse(&text, format).with_context(|| format!("invalid manifest {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        records = schema.len(),
        "loaded manifest"
    );
    Ok(schema)
}

/// Parses manifest text.
pub fn parse(text: &str, format: ManifestFormat) -> anyhow::Result<Schema> {
    let manifest: Manifest = match format {
        ManifestFormat::Toml => toml::from_str(text)?,
        ManifestFormat::Json => serde_json::from_str(text)?,
        ManifestFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(Schema::new(manifest.records))
}
