// file: src/rules/list_after_colon.rs
// description: extracts iocs from semicolon-separated lists following a colon header

use crate::document::Document;
use crate::error::Result;
use crate::models::Ioc;
use crate::normalizer::IocNormalizer;
use crate::patterns;
use crate::rules::ExtractionRule;

/// Scans the paragraph sequence for the layout
///
/// ```text
/// Header ending with a colon:
/// indicator1;
/// indicator2;
/// last_indicator.
/// ```
///
/// Items end with `;` (list continues) or `.` (list ends). An unterminated
/// paragraph is still consumed when it looks IoC-shaped; anything else
/// closes the list and the outer scan resumes at that paragraph, so it can
/// itself open the next list. Single pass, no backtracking.
pub struct ListAfterColonRule;

impl ExtractionRule for ListAfterColonRule {
    fn name(&self) -> &'static str {
        "list_after_colon"
    }

    fn extract(&self, document: &Document) -> Result<Vec<Ioc>> {
        let paragraphs: Vec<String> = document.paragraphs().map(|p| p.text()).collect();
        let mut iocs = Vec::new();
        let mut i = 0;

        while i < paragraphs.len() {
            let text = paragraphs[i].trim();

            if !text.ends_with(':') {
                i += 1;
                continue;
            }

            let context = text.to_string();
            i += 1;

            while i < paragraphs.len() {
                let item = paragraphs[i].trim();

                // Blank paragraphs inside an open list do not terminate it.
                if item.is_empty() {
                    i += 1;
                    continue;
                }

                if let Some(stripped) = item.strip_suffix(';') {
                    let value = stripped.trim();
                    if !value.is_empty() {
                        iocs.push(IocNormalizer::normalize_and_classify(value, &context));
                    }
                    i += 1;
                    continue;
                }

                // A period marks the last item of the list.
                if let Some(stripped) = item.strip_suffix('.') {
                    let value = stripped.trim();
                    if !value.is_empty() {
                        iocs.push(IocNormalizer::normalize_and_classify(value, &context));
                    }
                    i += 1;
                    break;
                }

                if looks_like_ioc(item) {
                    iocs.push(IocNormalizer::normalize_and_classify(item, &context));
                    i += 1;
                    continue;
                }

                // Different context; leave it for the outer scan.
                break;
            }
        }

        Ok(iocs)
    }
}

fn looks_like_ioc(text: &str) -> bool {
    patterns::SHAPE_HEX_BLOB.is_match(text)
        || patterns::SHAPE_URL_SCHEME.is_match(text)
        || patterns::SHAPE_DOTTED_QUAD.is_match(text)
}
