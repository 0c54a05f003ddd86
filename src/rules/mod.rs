// file: src/rules/mod.rs
// description: extraction rule trait and built-in rule exports
// reference: strategy pattern over the document block model

pub mod list_after_colon;
pub mod mitre;
pub mod regex_sweep;
pub mod table_after_header;

pub use list_after_colon::ListAfterColonRule;
pub use mitre::MitreAttackRule;
pub use regex_sweep::RegexSweepRule;
pub use table_after_header::TableAfterHeaderRule;

use crate::document::Document;
use crate::error::Result;
use crate::models::Ioc;

/// One extraction strategy. Rules yield candidates in discovery order and
/// never deduplicate across each other; that is the coordinator's job. A
/// rule that faults returns `Err` and its partial output is discarded.
pub trait ExtractionRule: Send + Sync {
    /// Stable identity used for registration, removal and attribution.
    fn name(&self) -> &'static str;

    fn extract(&self, document: &Document) -> Result<Vec<Ioc>>;
}
