// file: src/normalizer.rs
// description: defang reversal and ioc classification
// reference: threat intelligence defang conventions (hxxp, [.], [at])

use crate::models::{Ioc, IocType};
use crate::patterns;

/// Stateless normalization engine: refangs obfuscated spellings, classifies
/// candidates through an ordered grammar, and builds `Ioc` records.
pub struct IocNormalizer;

impl IocNormalizer {
    /// Reverses defang obfuscation. Substitutions run in a fixed order;
    /// `hxxps`/`hxxp` must be rewritten before the bracket forms because
    /// inputs combine both (`hxxps[:]//...`). Returns the rewritten string
    /// and whether any substitution fired.
    pub fn refang(value: &str) -> (String, bool) {
        let mut result = value.to_string();
        let mut was_defanged = false;

        substitute(&mut result, &mut was_defanged, "hxxps", "https");
        substitute(&mut result, &mut was_defanged, "hxxp", "http");
        substitute(&mut result, &mut was_defanged, "[:]", ":");
        substitute(&mut result, &mut was_defanged, "[.]", ".");

        // The spelled-out word forms are the only case-insensitive entries.
        substitute_pattern(&mut result, &mut was_defanged, &patterns::DEFANG_DOT_WORD, ".");
        substitute(&mut result, &mut was_defanged, "[@]", "@");
        substitute_pattern(&mut result, &mut was_defanged, &patterns::DEFANG_AT_WORD, "@");

        (result, was_defanged)
    }

    /// Ordered type grammar: hash lengths first (hex never overlaps the
    /// URL/domain shapes), then CVE, IP, email, URL, domain. Falls closed to
    /// `Unknown` when nothing matches.
    pub fn classify(value: &str) -> IocType {
        let grammar: [(&regex::Regex, IocType); 9] = [
            (&patterns::CLASSIFY_MD5, IocType::HashMd5),
            (&patterns::CLASSIFY_SHA1, IocType::HashSha1),
            (&patterns::CLASSIFY_SHA256, IocType::HashSha256),
            (&patterns::CLASSIFY_SHA512, IocType::HashSha512),
            (&patterns::CLASSIFY_CVE, IocType::Cve),
            (&patterns::CLASSIFY_IP, IocType::IpAddress),
            (&patterns::CLASSIFY_EMAIL, IocType::Email),
            (&patterns::CLASSIFY_URL, IocType::Url),
            (&patterns::CLASSIFY_DOMAIN, IocType::Domain),
        ];

        for (pattern, ioc_type) in grammar {
            if pattern.is_match(value) {
                return ioc_type;
            }
        }

        IocType::Unknown
    }

    /// Builds a full record from a raw candidate: trims whitespace, strips
    /// trailing list-separator debris (`;`/`.` runs), refangs and classifies.
    /// `original_value` keeps the trimmed input including any separators.
    pub fn normalize_and_classify(value: &str, context: &str) -> Ioc {
        let original = value.trim();
        let cleaned = original.trim_end_matches([';', '.']);

        let (normalized, was_defanged) = Self::refang(cleaned);
        let ioc_type = Self::classify(&normalized);

        Ioc {
            value: normalized,
            ioc_type,
            source_context: context.to_string(),
            defanged: was_defanged,
            original_value: original.to_string(),
            rule_extracted: String::new(),
        }
    }
}

fn substitute(text: &mut String, changed: &mut bool, from: &str, to: &str) {
    let replaced = text.replace(from, to);
    if replaced != *text {
        *changed = true;
        *text = replaced;
    }
}

fn substitute_pattern(text: &mut String, changed: &mut bool, pattern: &regex::Regex, to: &str) {
    let replaced = pattern.replace_all(text.as_str(), to).into_owned();
    if replaced != *text {
        *changed = true;
        *text = replaced;
    }
}
