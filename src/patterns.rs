// file: src/patterns.rs
// description: compiled regex patterns for ioc classification and sweeping
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Full-string classification grammars, tried in precedence order by the
    // normalizer. Hash grammars are exact-length hex matches.
    pub static ref CLASSIFY_MD5: Regex = Regex::new(
        r"^[a-fA-F0-9]{32}$"
    ).expect("CLASSIFY_MD5 regex is valid");

    pub static ref CLASSIFY_SHA1: Regex = Regex::new(
        r"^[a-fA-F0-9]{40}$"
    ).expect("CLASSIFY_SHA1 regex is valid");

    pub static ref CLASSIFY_SHA256: Regex = Regex::new(
        r"^[a-fA-F0-9]{64}$"
    ).expect("CLASSIFY_SHA256 regex is valid");

    pub static ref CLASSIFY_SHA512: Regex = Regex::new(
        r"^[a-fA-F0-9]{128}$"
    ).expect("CLASSIFY_SHA512 regex is valid");

    pub static ref CLASSIFY_CVE: Regex = Regex::new(
        r"(?i)^CVE-\d{4}-\d{4,}$"
    ).expect("CLASSIFY_CVE regex is valid");

    pub static ref CLASSIFY_IP: Regex = Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    ).expect("CLASSIFY_IP regex is valid");

    pub static ref CLASSIFY_EMAIL: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).expect("CLASSIFY_EMAIL regex is valid");

    pub static ref CLASSIFY_URL: Regex = Regex::new(
        r"(?i)^(?:hxxps?|https?|ftp)://[^\s;.]+(?:\.[^\s;.]+)*(?:/\S*)?$"
    ).expect("CLASSIFY_URL regex is valid");

    // Labels may be joined by a literal dot or a still-bracketed [.], so a
    // partially-refanged domain still classifies.
    pub static ref CLASSIFY_DOMAIN: Regex = Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\[\.\]|\.))+[a-zA-Z]{2,}$"
    ).expect("CLASSIFY_DOMAIN regex is valid");

    // Defang substitutions applied case-insensitively (the word forms only).
    pub static ref DEFANG_DOT_WORD: Regex = Regex::new(
        r"(?i)\[dot\]"
    ).expect("DEFANG_DOT_WORD regex is valid");

    pub static ref DEFANG_AT_WORD: Regex = Regex::new(
        r"(?i)\[at\]"
    ).expect("DEFANG_AT_WORD regex is valid");

    // Lightweight shape checks used by the list rule to keep consuming
    // unterminated list items.
    pub static ref SHAPE_HEX_BLOB: Regex = Regex::new(
        r"^[a-fA-F0-9]{32,128}$"
    ).expect("SHAPE_HEX_BLOB regex is valid");

    pub static ref SHAPE_URL_SCHEME: Regex = Regex::new(
        r"(?i)^(?:hxxps?|https?|ftp)"
    ).expect("SHAPE_URL_SCHEME regex is valid");

    pub static ref SHAPE_DOTTED_QUAD: Regex = Regex::new(
        r"^\d{1,3}(?:\[?\.\]?\d{1,3}){3}"
    ).expect("SHAPE_DOTTED_QUAD regex is valid");

    // A line break between two token characters is wrapping debris; the
    // regex crate has no lookaround, so the sweep heals by capture-rejoin.
    pub static ref TOKEN_LINE_BREAK: Regex = Regex::new(
        r"([A-Za-z0-9/\-_.\[\]])\n([A-Za-z0-9/\-_.\[\]])"
    ).expect("TOKEN_LINE_BREAK regex is valid");

    pub static ref TRAILING_PORT: Regex = Regex::new(
        r":\d+$"
    ).expect("TRAILING_PORT regex is valid");

    pub static ref MITRE_TECHNIQUE: Regex = Regex::new(
        r"\bT\d{4}(?:\.\d{3})?\b"
    ).expect("MITRE_TECHNIQUE regex is valid");

    // Free-text sweep battery, name-tagged. Trailing punctuation is excluded
    // from URL matches by constraining the final character class instead of
    // the lookbehind the original grammar would use.
    pub static ref SWEEP_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("hash_sha256", Regex::new(r"\b[a-fA-F0-9]{64}\b").expect("hash_sha256 regex is valid")),
        ("hash_sha1", Regex::new(r"\b[a-fA-F0-9]{40}\b").expect("hash_sha1 regex is valid")),
        ("hash_md5", Regex::new(r"\b[a-fA-F0-9]{32}\b").expect("hash_md5 regex is valid")),
        ("hash_sha512", Regex::new(r"\b[a-fA-F0-9]{128}\b").expect("hash_sha512 regex is valid")),
        (
            "url_defanged",
            Regex::new(r#"(?i)hxxps?\[:\]//[^\s<>"';,]*[^\s<>"';,.!?:]"#)
                .expect("url_defanged regex is valid"),
        ),
        (
            "url_normal",
            Regex::new(r#"(?i)https?://[^\s<>"';,]*[^\s<>"';,.!?:]"#)
                .expect("url_normal regex is valid"),
        ),
        (
            "ip_defanged",
            Regex::new(r"\b\d{1,3}\[\.\]\d{1,3}\[\.\]\d{1,3}\[\.\]\d{1,3}\b")
                .expect("ip_defanged regex is valid"),
        ),
        (
            "ip_normal",
            Regex::new(
                r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
            ).expect("ip_normal regex is valid"),
        ),
        (
            "domain_defanged",
            Regex::new(r"\b[a-zA-Z0-9][a-zA-Z0-9-]*(?:\[\.\][a-zA-Z0-9][a-zA-Z0-9-]*)*\[\.\][a-zA-Z]{2,}\b")
                .expect("domain_defanged regex is valid"),
        ),
        ("cve", Regex::new(r"(?i)\bCVE-\d{4}-\d{4,}\b").expect("cve regex is valid")),
        (
            "email",
            Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b")
                .expect("email regex is valid"),
        ),
    ];
}
