// file: src/extractor.rs
// description: rule coordinator with deduplication, post-processing and error isolation

use crate::document::{Document, DocxLoader};
use crate::models::{ExtractionResult, Ioc, IocType};
use crate::normalizer::IocNormalizer;
use crate::patterns;
use crate::rules::{
    ExtractionRule, ListAfterColonRule, RegexSweepRule, TableAfterHeaderRule,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Keep `Unknown`-typed records instead of silently dropping them.
    pub pass_unknown: bool,
    /// Report URLs as found instead of collapsing them to their host.
    pub url_original: bool,
}

/// Runs the registered rules against a document in order, inside per-rule
/// failure boundaries, then deduplicates on `(value, type)`. Registration
/// order is an observable contract: when two rules find the same indicator,
/// the earlier rule gets the attribution.
pub struct IocExtractor {
    rules: Vec<Box<dyn ExtractionRule>>,
    options: ExtractOptions,
}

impl IocExtractor {
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            rules: vec![
                Box::new(ListAfterColonRule),
                Box::new(TableAfterHeaderRule),
                Box::new(RegexSweepRule),
            ],
            options,
        }
    }

    /// Coordinator without the built-in rule set, for fully custom pipelines.
    pub fn without_default_rules(options: ExtractOptions) -> Self {
        Self { rules: Vec::new(), options }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ExtractionRule>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn remove_rule(&mut self, rule_name: &str) -> &mut Self {
        self.rules.retain(|r| r.name() != rule_name);
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Extracts from an already-materialized document.
    pub fn extract_document(&self, filepath: &str, document: &Document) -> ExtractionResult {
        let mut result = ExtractionResult::new(filepath);
        let mut seen: HashSet<(String, IocType)> = HashSet::new();

        for rule in &self.rules {
            match rule.extract(document) {
                Ok(candidates) => {
                    for ioc in candidates {
                        if !self.options.pass_unknown && ioc.ioc_type == IocType::Unknown {
                            continue;
                        }

                        let ioc = if self.options.url_original {
                            ioc
                        } else {
                            collapse_to_host(ioc)
                        };

                        if seen.insert(ioc.dedup_key()) {
                            result.iocs.push(ioc.with_rule(rule.name()));
                        }
                    }
                }
                Err(e) => {
                    // The faulting rule's partial output is discarded; the
                    // remaining rules still run.
                    warn!("rule '{}' failed on {}: {}", rule.name(), filepath, e);
                    result
                        .errors
                        .push(format!("error in rule '{}': {}", rule.name(), e));
                }
            }
        }

        debug!(
            "{}: {} indicators, {} errors",
            filepath,
            result.len(),
            result.errors.len()
        );
        result
    }

    /// Validates and loads one file, then extracts. Every failure mode
    /// degrades to a single-error result; nothing here aborts a batch.
    pub fn extract_path(&self, path: &Path) -> ExtractionResult {
        let filepath = path.display().to_string();
        let mut result = ExtractionResult::new(filepath.clone());

        if !path.exists() {
            result.errors.push(format!("file not found: {filepath}"));
            return result;
        }

        let is_docx = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
        if !is_docx {
            result.errors.push(format!("unsupported file type: {filepath}"));
            return result;
        }

        match DocxLoader::load(path) {
            Ok(document) => self.extract_document(&filepath, &document),
            Err(e) => {
                result.errors.push(format!("failed to open document: {e}"));
                result
            }
        }
    }

    /// Per-file results in input order; one bad file never affects another.
    pub fn extract_batch<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<ExtractionResult> {
        paths.iter().map(|p| self.extract_path(p.as_ref())).collect()
    }
}

impl Default for IocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// URL records collapse to their registrable host; a host that is itself a
/// dotted quad keeps the IP type. Domain records only lose a trailing port.
/// Pure transform: the incoming record is consumed, not mutated in place.
fn collapse_to_host(ioc: Ioc) -> Ioc {
    match ioc.ioc_type {
        IocType::Url => {
            let host = registrable_host(&ioc.value);
            let ioc_type = match IocNormalizer::classify(&host) {
                IocType::IpAddress => IocType::IpAddress,
                _ => IocType::Domain,
            };
            Ioc { value: host, ioc_type, ..ioc }
        }
        IocType::Domain => {
            let value = patterns::TRAILING_PORT.replace(&ioc.value, "").into_owned();
            Ioc { value, ..ioc }
        }
        _ => ioc,
    }
}

/// Host portion of a URL: scheme, path, query, fragment and numeric port
/// stripped.
fn registrable_host(url: &str) -> String {
    let after_scheme = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => url,
    };
    let host_port = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(after_scheme);

    patterns::TRAILING_PORT.replace(host_port, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Paragraph, Table};
    use crate::error::ExtractError;
    use crate::rules::MitreAttackRule;
    use pretty_assertions::assert_eq;

    struct FaultyRule;

    impl ExtractionRule for FaultyRule {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn extract(&self, _document: &Document) -> crate::error::Result<Vec<Ioc>> {
            Err(ExtractError::Rule("synthetic fault".to_string()))
        }
    }

    struct FixedValueRule {
        name: &'static str,
        value: &'static str,
    }

    impl ExtractionRule for FixedValueRule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn extract(&self, _document: &Document) -> crate::error::Result<Vec<Ioc>> {
            Ok(vec![Ioc::new(self.value, IocType::Domain, "fixed")])
        }
    }

    fn sample_document() -> Document {
        Document::from_blocks(vec![
            Block::Paragraph(Paragraph::from_text("Indicators:")),
            Block::Paragraph(Paragraph::from_text("1.2.3.4;")),
            Block::Paragraph(Paragraph::from_text("evil[.]com.")),
            Block::Paragraph(Paragraph::from_text("Indicators of compromise")),
            Block::Table(Table::from_cells(vec![vec!["1.2.3.4", "evil.com"]])),
        ])
    }

    #[test]
    fn test_dedup_across_rules_first_rule_wins() {
        let extractor = IocExtractor::new();
        let result = extractor.extract_document("sample.docx", &sample_document());

        let mut keys = HashSet::new();
        for ioc in &result.iocs {
            assert!(keys.insert(ioc.dedup_key()), "duplicate {:?}", ioc.value);
        }

        // Both the list and the table contain 1.2.3.4 and evil.com; the
        // list rule registered them first.
        let ip = result.iocs.iter().find(|i| i.value == "1.2.3.4").unwrap();
        assert_eq!(ip.rule_extracted, "list_after_colon");
        let domain = result.iocs.iter().find(|i| i.value == "evil.com").unwrap();
        assert_eq!(domain.rule_extracted, "list_after_colon");
    }

    #[test]
    fn test_attribution_follows_registration_order() {
        let mut extractor = IocExtractor::without_default_rules(ExtractOptions::default());
        extractor.add_rule(Box::new(FixedValueRule { name: "first", value: "evil.com" }));
        extractor.add_rule(Box::new(FixedValueRule { name: "second", value: "evil.com" }));

        let result = extractor.extract_document("x.docx", &Document::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result.iocs[0].rule_extracted, "first");
    }

    #[test]
    fn test_url_collapsed_to_host_and_retyped() {
        let document = Document::from_blocks(vec![Block::Paragraph(Paragraph::from_text(
            "seen at https://sub.example.com:8443/a/b?x=1 today",
        ))]);

        let extractor = IocExtractor::new();
        let result = extractor.extract_document("x.docx", &document);

        let collapsed = result
            .iocs
            .iter()
            .find(|i| i.value == "sub.example.com")
            .expect("collapsed record");
        assert_eq!(collapsed.ioc_type, IocType::Domain);
        assert!(collapsed.original_value.starts_with("https://"));
    }

    #[test]
    fn test_url_with_ip_host_keeps_ip_type() {
        let document = Document::from_blocks(vec![Block::Paragraph(Paragraph::from_text(
            "beacon to https://1.2.3.4/gate.php observed",
        ))]);

        let result = IocExtractor::new().extract_document("x.docx", &document);

        let ip = result.iocs.iter().find(|i| i.value == "1.2.3.4").unwrap();
        assert_eq!(ip.ioc_type, IocType::IpAddress);
    }

    #[test]
    fn test_url_original_keeps_full_url() {
        let document = Document::from_blocks(vec![Block::Paragraph(Paragraph::from_text(
            "seen at https://sub.example.com:8443/a/b?x=1 today",
        ))]);

        let options = ExtractOptions { url_original: true, ..Default::default() };
        let result = IocExtractor::with_options(options).extract_document("x.docx", &document);

        let url = result.iocs.iter().find(|i| i.ioc_type == IocType::Url).unwrap();
        assert_eq!(url.value, "https://sub.example.com:8443/a/b?x=1");
    }

    #[test]
    fn test_unknown_suppressed_by_default() {
        let document = Document::from_blocks(vec![Block::Paragraph(Paragraph::from_text(
            "Technique T1059.001 was used",
        ))]);

        let mut extractor = IocExtractor::new();
        extractor.add_rule(Box::new(MitreAttackRule));
        let result = extractor.extract_document("x.docx", &document);

        assert!(result.iocs.iter().all(|i| i.ioc_type != IocType::Unknown));

        let mut permissive =
            IocExtractor::with_options(ExtractOptions { pass_unknown: true, ..Default::default() });
        permissive.add_rule(Box::new(MitreAttackRule));
        let result = permissive.extract_document("x.docx", &document);

        let technique = result.iocs.iter().find(|i| i.value == "T1059.001").unwrap();
        assert_eq!(technique.ioc_type, IocType::Unknown);
        assert_eq!(technique.rule_extracted, "mitre_attack");
    }

    #[test]
    fn test_faulty_rule_is_isolated() {
        let mut extractor = IocExtractor::without_default_rules(ExtractOptions::default());
        extractor.add_rule(Box::new(FaultyRule));
        extractor.add_rule(Box::new(ListAfterColonRule));

        let result = extractor.extract_document("x.docx", &sample_document());

        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0],
            "error in rule 'faulty': Rule error: synthetic fault"
        );
        assert!(!result.is_empty(), "surviving rules still contribute");
    }

    #[test]
    fn test_remove_rule_by_name() {
        let mut extractor = IocExtractor::new();
        extractor.remove_rule("regex_sweep");

        assert_eq!(extractor.rule_names(), vec!["list_after_colon", "table_after_header"]);
    }

    #[test]
    fn test_missing_file_yields_error_result() {
        let result = IocExtractor::new().extract_path(Path::new("/nonexistent/report.docx"));

        assert!(result.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("file not found"));
    }

    #[test]
    fn test_wrong_extension_yields_error_result() {
        let file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        let result = IocExtractor::new().extract_path(file.path());

        assert!(result.is_empty());
        assert!(result.errors[0].contains("unsupported file type"));
    }

    #[test]
    fn test_batch_isolates_bad_files() {
        let extractor = IocExtractor::new();
        let results = extractor.extract_batch(&[
            Path::new("/nonexistent/a.docx"),
            Path::new("/nonexistent/b.docx"),
        ]);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.has_errors() && r.is_empty()));
        assert_eq!(results[0].filepath, "/nonexistent/a.docx");
        assert_eq!(results[1].filepath, "/nonexistent/b.docx");
    }

    #[test]
    fn test_registrable_host() {
        assert_eq!(registrable_host("https://sub.example.com:8443/a/b?x=1"), "sub.example.com");
        assert_eq!(registrable_host("http://evil.com"), "evil.com");
        assert_eq!(registrable_host("ftp://files.org/x#frag"), "files.org");
    }
}
