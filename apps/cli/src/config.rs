//! Layered CLI configuration.
//!
//! Later layers win: built-in defaults, then `tagval.toml` in the working
//! directory (or the file given with `--config`), then `TAGVAL_*` environment
//! variables. Command flags are applied on top by each command.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tagval_codegen::GeneratorConfig;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tagval.toml";

/// Prefix of configuration environment variables.
///
/// Nested keys use `__`, e.g. `TAGVAL_GENERATOR__HEADER=false`.
pub const ENV_PREFIX: &str = "TAGVAL_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub generator: GeneratorConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration, reading `explicit` instead of `tagval.toml` when set.
    ///
    /// A missing default file is fine; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file)
            .extract()
            .with_context(|| format!("invalid configuration (file {})", file.display()))
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
