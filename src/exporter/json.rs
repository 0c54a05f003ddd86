// file: src/exporter/json.rs
// description: json report writer keyed by filepath in batch order

use crate::error::Result;
use crate::models::ExtractionResult;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn render_json(results: &[ExtractionResult]) -> Result<String> {
    let mut files = Map::new();

    for result in results {
        let iocs: Vec<Value> = result
            .iocs
            .iter()
            .map(|ioc| {
                json!({
                    "value": ioc.value,
                    "type": ioc.ioc_type.as_str(),
                    "original": ioc.original_value,
                    "defanged": ioc.defanged,
                    "context": ioc.source_context,
                    "rule": ioc.rule_extracted,
                })
            })
            .collect();

        files.insert(
            result.filepath.clone(),
            json!({ "iocs": iocs, "errors": result.errors }),
        );
    }

    let report = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "results": Value::Object(files),
    });

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_json(results: &[ExtractionResult], output_path: &Path) -> Result<()> {
    fs::write(output_path, render_json(results)?)?;
    info!("JSON report written to {}", output_path.display());
    Ok(())
}
