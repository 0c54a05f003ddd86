// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ExtractError, Result};
use crate::exporter::OutputFormat;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Keep records that classify as UNKNOWN.
    #[serde(default)]
    pub pass_unknown: bool,
    /// Report URLs as found instead of collapsing to the host.
    #[serde(default)]
    pub url_original: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("IOC_EXTRACT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            output: OutputConfig { format: OutputFormat::Text, path: None },
        }
    }
}
