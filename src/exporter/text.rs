// file: src/exporter/text.rs
// description: plain text report writer grouping indicators per file

use crate::error::Result;
use crate::models::ExtractionResult;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn render_text(results: &[ExtractionResult]) -> String {
    let mut lines = Vec::new();

    for result in results {
        lines.push(format!("\n{}", "=".repeat(60)));
        lines.push(format!("File: {}", result.filepath));
        lines.push(format!("IoCs found: {}", result.len()));

        if result.has_errors() {
            lines.push(format!("Errors: {}", result.errors.join(", ")));
        }

        lines.push("-".repeat(60));

        for ioc in &result.iocs {
            let defang_marker = if ioc.defanged { " (defanged)" } else { "" };
            lines.push(format!(
                "[{}] {}{}",
                ioc.ioc_type.as_str(),
                ioc.value,
                defang_marker
            ));
        }
    }

    lines.join("\n") + "\n"
}

pub fn write_text(results: &[ExtractionResult], output_path: &Path) -> Result<()> {
    fs::write(output_path, render_text(results))?;
    info!("Text report written to {}", output_path.display());
    Ok(())
}
