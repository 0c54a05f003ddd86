// file: src/models/ioc.rs
// description: indicator of compromise record and type enumeration
// reference: threat intelligence ioc standards

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IocType {
    HashMd5,
    HashSha1,
    HashSha256,
    HashSha512,
    Url,
    Domain,
    IpAddress,
    Email,
    // Reserved: no classification grammar is implemented for these yet.
    FilePath,
    RegistryKey,
    Cve,
    Unknown,
}

impl IocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IocType::HashMd5 => "HASH_MD5",
            IocType::HashSha1 => "HASH_SHA1",
            IocType::HashSha256 => "HASH_SHA256",
            IocType::HashSha512 => "HASH_SHA512",
            IocType::Url => "URL",
            IocType::Domain => "DOMAIN",
            IocType::IpAddress => "IP_ADDRESS",
            IocType::Email => "EMAIL",
            IocType::FilePath => "FILE_PATH",
            IocType::RegistryKey => "REGISTRY_KEY",
            IocType::Cve => "CVE",
            IocType::Unknown => "UNKNOWN",
        }
    }
}

/// One extracted indicator. Identity is `(value, ioc_type)`; context,
/// original spelling and attribution never participate in equality, so the
/// same indicator found by two rules deduplicates to a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ioc {
    pub value: String,
    pub ioc_type: IocType,
    pub source_context: String,
    pub defanged: bool,
    pub original_value: String,
    pub rule_extracted: String,
}

impl Ioc {
    pub fn new(value: impl Into<String>, ioc_type: IocType, source_context: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            original_value: value.clone(),
            value,
            ioc_type,
            source_context: source_context.into(),
            defanged: false,
            rule_extracted: String::new(),
        }
    }

    /// Attribution is assigned by the coordinator, not by the rule itself.
    pub fn with_rule(mut self, rule_name: &str) -> Self {
        self.rule_extracted = rule_name.to_string();
        self
    }

    pub fn dedup_key(&self) -> (String, IocType) {
        (self.value.clone(), self.ioc_type)
    }
}

impl PartialEq for Ioc {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.ioc_type == other.ioc_type
    }
}

impl Eq for Ioc {}

impl Hash for Ioc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.ioc_type.hash(state);
    }
}
