// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod document;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod normalizer;
pub mod patterns;
pub mod rules;
pub mod utils;

pub use config::{Config, ExtractionConfig, OutputConfig};
pub use document::{Block, Document, DocxLoader, Paragraph, Run, Table, TableCell, TableRow};
pub use error::{ExtractError, Result};
pub use exporter::OutputFormat;
pub use extractor::{ExtractOptions, IocExtractor};
pub use models::{ExtractionResult, Ioc, IocType};
pub use normalizer::IocNormalizer;
pub use rules::{
    ExtractionRule, ListAfterColonRule, MitreAttackRule, RegexSweepRule, TableAfterHeaderRule,
};
