// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use ioc_extract::utils::logging::{format_error, format_success, format_warning};
use ioc_extract::{
    exporter, Config, ExtractOptions, IocExtractor, OutputFormat,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "ioc_extract")]
#[command(version = "0.1.0")]
#[command(about = "Extract indicators of compromise from DOCX reports", long_about = None)]
struct Cli {
    /// DOCX files or directories to scan recursively
    #[arg(required = true, value_name = "PATH")]
    inputs: Vec<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Keep UNKNOWN-typed indicators in the output
    #[arg(long)]
    unknown: bool,

    /// Report URLs as found instead of collapsing to their host
    #[arg(long)]
    url_original: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    ioc_extract::utils::logging::init_logger(cli.color, cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(Some(path)).context("Failed to load configuration")?,
        None => Config::load(None).unwrap_or_else(|_| Config::default_config()),
    };

    let files = collect_docx_files(&cli.inputs);
    if files.is_empty() {
        println!("{}", format_warning("no .docx files found in the given paths"));
        return Ok(ExitCode::SUCCESS);
    }
    info!("Processing {} file(s)", files.len());

    let options = ExtractOptions {
        pass_unknown: cli.unknown || config.extraction.pass_unknown,
        url_original: cli.url_original || config.extraction.url_original,
    };
    let extractor = IocExtractor::with_options(options);

    let results = extractor.extract_batch(&files);

    for result in &results {
        if result.has_errors() {
            warn!(
                "{}: {} indicators, errors: {}",
                result.filepath,
                result.len(),
                result.errors.join("; ")
            );
        } else {
            info!("{}: {} indicators", result.filepath, result.len());
        }
    }

    let format = cli.format.unwrap_or(config.output.format);
    let output_path = cli.output.or(config.output.path);

    let rendered = match format {
        OutputFormat::Text => exporter::render_text(&results),
        OutputFormat::Json => exporter::render_json(&results)?,
        OutputFormat::Csv => exporter::render_csv(&results),
    };

    match &output_path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{}",
                format_success(&format!("results written to {}", path.display()))
            );
        }
        None => print!("{rendered}"),
    }

    let total: usize = results.iter().map(|r| r.len()).sum();
    let failed = results.iter().filter(|r| r.has_errors()).count();
    println!(
        "{}",
        format_success(&format!(
            "extracted {} indicator(s) from {} file(s)",
            total,
            results.len()
        ))
    );

    if failed > 0 {
        println!(
            "{}",
            format_error(&format!("{failed} file(s) reported errors"))
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn collect_docx_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                let is_docx = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
                if entry.file_type().is_file() && is_docx {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            // Missing files stay in the list: the extractor turns them into
            // per-file error results instead of dropping them silently.
            files.push(input.clone());
        }
    }

    files
}
