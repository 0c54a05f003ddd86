// file: src/exporter/csv.rs
// description: csv report writer, one row per extracted indicator

use crate::error::Result;
use crate::models::ExtractionResult;
use std::fs;
use std::path::Path;
use tracing::info;

const HEADER: &str = "filepath,value,ioc_type,source_context,defanged,original_value,rule_extracted";

pub fn render_csv(results: &[ExtractionResult]) -> String {
    let mut lines = vec![HEADER.to_string()];

    for result in results {
        for ioc in &result.iocs {
            lines.push(
                [
                    quote(&result.filepath),
                    quote(&ioc.value),
                    quote(ioc.ioc_type.as_str()),
                    quote(&ioc.source_context),
                    ioc.defanged.to_string(),
                    quote(&ioc.original_value),
                    quote(&ioc.rule_extracted),
                ]
                .join(","),
            );
        }
    }

    lines.join("\n") + "\n"
}

pub fn write_csv(results: &[ExtractionResult], output_path: &Path) -> Result<()> {
    fs::write(output_path, render_csv(results))?;
    info!("CSV report written to {}", output_path.display());
    Ok(())
}

// Minimal RFC 4180 quoting: every text field is quoted, embedded quotes are
// doubled, newlines collapse to spaces so one indicator stays on one row.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\"").replace('\n', " "))
}
