// file: src/rules/mitre.rs
// description: sample plug-in rule extracting MITRE ATT&CK technique ids
// reference: https://attack.mitre.org/techniques/

use crate::document::Document;
use crate::error::Result;
use crate::models::{Ioc, IocType};
use crate::patterns;
use crate::rules::ExtractionRule;

const MITRE_CONTEXT_LEN: usize = 100;

/// Demonstrates the rule plug-in contract: technique ids (`T1059`,
/// `T1059.001`) have no entry in the classification grammar, so every match
/// is typed `Unknown` and only surfaces when the caller opts into unknowns.
/// Not part of the default rule set.
pub struct MitreAttackRule;

impl ExtractionRule for MitreAttackRule {
    fn name(&self) -> &'static str {
        "mitre_attack"
    }

    fn extract(&self, document: &Document) -> Result<Vec<Ioc>> {
        let mut iocs = Vec::new();

        for paragraph in document.paragraphs() {
            let text = paragraph.text();
            for found in patterns::MITRE_TECHNIQUE.find_iter(&text) {
                iocs.push(Ioc::new(
                    found.as_str(),
                    IocType::Unknown,
                    truncate_chars(&text, MITRE_CONTEXT_LEN),
                ));
            }
        }

        Ok(iocs)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
