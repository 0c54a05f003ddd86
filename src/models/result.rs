// file: src/models/result.rs
// description: per-file extraction result with indicators and error annotations

use crate::models::{Ioc, IocType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of extracting one file. Indicators are stored in discovery order
/// after deduplication; errors never abort the batch, they accumulate here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub filepath: String,
    pub iocs: Vec<Ioc>,
    pub errors: Vec<String>,
}

impl ExtractionResult {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            iocs: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.iocs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iocs.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn by_type(&self, ioc_type: IocType) -> Vec<&Ioc> {
        self.iocs.iter().filter(|i| i.ioc_type == ioc_type).collect()
    }

    pub fn unique_values(&self) -> HashSet<&str> {
        self.iocs.iter().map(|i| i.value.as_str()).collect()
    }
}
