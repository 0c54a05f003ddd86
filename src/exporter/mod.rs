// file: src/exporter/mod.rs
// description: report serialization module exports
// reference: internal module structure

pub mod csv;
pub mod json;
pub mod text;

pub use csv::{render_csv, write_csv};
pub use json::{render_json, write_json};
pub use text::{render_text, write_text};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}
