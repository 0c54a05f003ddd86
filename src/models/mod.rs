// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod ioc;
pub mod result;

pub use ioc::{Ioc, IocType};
pub use result::ExtractionResult;
