// file: src/rules/table_after_header.rs
// description: extracts iocs from tables following an indicator section header

use crate::document::{Block, Document, Table};
use crate::error::Result;
use crate::models::Ioc;
use crate::normalizer::IocNormalizer;
use crate::rules::ExtractionRule;

// Section headers that announce an indicator table, matched case-insensitively
// as substrings. Russian spellings first: the source corpus is bilingual.
const HEADER_KEYWORDS: [&str; 4] = [
    "индикаторы компрометации",
    "indicators of compromise",
    "ioc",
    "iocs",
];

// Column-caption words filtered out of table cells.
const HEADER_WORDS: [&str; 23] = [
    "тип", "type", "значение", "value", "описание", "description", "индикатор", "indicator",
    "hash", "хэш", "ip", "domain", "домен", "url", "email", "comment", "комментарий",
    "название", "name", "sha256", "sha1", "md5", "sha512",
];

/// Walks the interleaved paragraph/table stream. A keyword-bearing paragraph
/// opens a search for the next table; only bold or blank paragraphs may sit
/// between the header and its table, anything else aborts that header's
/// search. Every non-caption cell line becomes a candidate, with the header
/// paragraph's full text as context.
pub struct TableAfterHeaderRule;

impl ExtractionRule for TableAfterHeaderRule {
    fn name(&self) -> &'static str {
        "table_after_header"
    }

    fn extract(&self, document: &Document) -> Result<Vec<Ioc>> {
        let mut iocs = Vec::new();

        for (i, block) in document.blocks.iter().enumerate() {
            let Block::Paragraph(paragraph) = block else {
                continue;
            };

            let text = paragraph.text();
            let lowered = text.trim().to_lowercase();
            if !HEADER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
                continue;
            }
            let context = text.trim().to_string();

            for next in &document.blocks[i + 1..] {
                match next {
                    Block::Table(table) => {
                        extract_from_table(table, &context, &mut iocs);
                        break;
                    }
                    Block::Paragraph(p) => {
                        if p.has_bold() || p.text().trim().is_empty() {
                            continue;
                        }
                        // Plain prose before any table: this header has no
                        // indicator table.
                        break;
                    }
                }
            }
        }

        Ok(iocs)
    }
}

fn extract_from_table(table: &Table, context: &str, iocs: &mut Vec<Ioc>) {
    for row in &table.rows {
        for cell in &row.cells {
            let cell_text = cell.text();
            if cell_text.is_empty() || is_caption(&cell_text) {
                continue;
            }

            // One cell may hold several indicators on separate lines.
            for line in cell_text.lines() {
                let line = line.trim();
                if !line.is_empty() && !is_caption(line) {
                    iocs.push(IocNormalizer::normalize_and_classify(line, context));
                }
            }
        }
    }
}

fn is_caption(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    HEADER_WORDS.contains(&lowered.as_str())
}
