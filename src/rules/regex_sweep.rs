// file: src/rules/regex_sweep.rs
// description: regex battery over joined paragraph text with safe UTF-8 context capture

use crate::document::Document;
use crate::error::Result;
use crate::models::Ioc;
use crate::normalizer::IocNormalizer;
use crate::patterns;
use crate::rules::ExtractionRule;
use std::collections::HashSet;

const CONTEXT_WINDOW: usize = 50;

/// Catch-all safety net: joins all paragraph text, heals line breaks that
/// split a contiguous token (documents wrap long URLs and hashes), then runs
/// the named pattern battery. Deduplicates by raw matched text before
/// normalization, so a defanged and a clean spelling of the same indicator
/// both surface here and meet again in the coordinator's dedup pass.
pub struct RegexSweepRule;

impl ExtractionRule for RegexSweepRule {
    fn name(&self) -> &'static str {
        "regex_sweep"
    }

    fn extract(&self, document: &Document) -> Result<Vec<Ioc>> {
        let parts: Vec<String> = document
            .paragraphs()
            .map(|p| p.text())
            .filter(|t| !t.is_empty())
            .collect();
        let full_text = heal_line_breaks(&parts.join("\n"));

        let mut iocs = Vec::new();
        let mut seen_raw: HashSet<String> = HashSet::new();

        for (pattern_name, pattern) in patterns::SWEEP_PATTERNS.iter() {
            for found in pattern.find_iter(&full_text) {
                if !seen_raw.insert(found.as_str().to_string()) {
                    continue;
                }

                let context = surrounding_context(&full_text, found.start(), found.end());
                iocs.push(IocNormalizer::normalize_and_classify(
                    found.as_str(),
                    &format!("[{pattern_name}] ...{context}..."),
                ));
            }
        }

        Ok(iocs)
    }
}

/// Deletes a line break sandwiched between token characters. The capture
/// rejoin consumes the right-hand character, so alternating breaks need
/// another pass; loop until stable.
fn heal_line_breaks(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let healed = patterns::TOKEN_LINE_BREAK
            .replace_all(&current, "$1$2")
            .into_owned();
        if healed == current {
            return current;
        }
        current = healed;
    }
}

fn surrounding_context(text: &str, start: usize, end: usize) -> String {
    let from = char_boundary_before(text, start.saturating_sub(CONTEXT_WINDOW));
    let to = char_boundary_after(text, (end + CONTEXT_WINDOW).min(text.len()));

    text[from..to].replace('\n', " ").trim().to_string()
}

fn char_boundary_before(text: &str, mut pos: usize) -> usize {
    pos = pos.min(text.len());
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn char_boundary_after(text: &str, mut pos: usize) -> usize {
    pos = pos.min(text.len());
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Paragraph};
    use crate::models::IocType;
    use pretty_assertions::assert_eq;

    fn document_of(lines: &[&str]) -> Document {
        Document::from_blocks(
            lines
                .iter()
                .map(|l| Block::Paragraph(Paragraph::from_text(*l)))
                .collect(),
        )
    }

    #[test]
    fn test_heal_rejoins_wrapped_tokens() {
        assert_eq!(
            heal_line_breaks("https://evil.com/very\nlong/path"),
            "https://evil.com/verylong/path"
        );
        // Consecutive wraps heal across passes.
        assert_eq!(heal_line_breaks("a\nb\nc"), "abc");
        // A break after prose punctuation-space stays.
        assert_eq!(heal_line_breaks("sentence ends \nhere"), "sentence ends \nhere");
    }

    #[test]
    fn test_sweep_finds_wrapped_hash() {
        let sha256 = "e".repeat(64);
        let (head, tail) = sha256.split_at(30);
        let document = document_of(&[&format!("hash {head}"), &format!("{tail} observed")]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        assert_eq!(iocs.len(), 1);
        assert_eq!(iocs[0].value, sha256);
        assert_eq!(iocs[0].ioc_type, IocType::HashSha256);
    }

    #[test]
    fn test_defanged_and_clean_spellings_both_reported() {
        let document = document_of(&["c2 at 1[.]2[.]3[.]4 also seen as 1.2.3.4"]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        // Raw-text dedup keeps both spellings; they collide only in the
        // coordinator once normalized.
        assert_eq!(iocs.len(), 2);
        assert!(iocs.iter().all(|i| i.value == "1.2.3.4"));
        assert_eq!(iocs.iter().filter(|i| i.defanged).count(), 1);
    }

    #[test]
    fn test_raw_duplicate_reported_once() {
        let document = document_of(&["8.8.4.4 contacted, then 8.8.4.4 again"]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        assert_eq!(iocs.len(), 1);
    }

    #[test]
    fn test_context_is_tagged_and_collapsed() {
        let document = document_of(&["first line.", "CVE-2024-1234 fired!", "third line"]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        assert_eq!(iocs.len(), 1);
        let context = &iocs[0].source_context;
        assert!(context.starts_with("[cve] ..."));
        assert!(!context.contains('\n'));
        assert!(context.contains("CVE-2024-1234 fired"));
    }

    #[test]
    fn test_context_safe_on_multibyte_text() {
        let document = document_of(&["сервер управления 1.2.3.4 зафиксирован в трафике"]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        assert_eq!(iocs.len(), 1);
        assert!(iocs[0].source_context.contains("1.2.3.4"));
    }

    #[test]
    fn test_defanged_url_swept_and_normalized() {
        let document = document_of(&["payload via hxxps[:]//evil[.]com/drop.bin observed"]);

        let iocs = RegexSweepRule.extract(&document).unwrap();

        let url = iocs
            .iter()
            .find(|i| i.ioc_type == IocType::Url)
            .expect("url candidate");
        assert_eq!(url.value, "https://evil.com/drop.bin");
        assert!(url.defanged);
        assert!(url.original_value.starts_with("hxxps[:]//"));
    }
}
