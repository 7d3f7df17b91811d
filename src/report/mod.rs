//! Report module - mapping preview and conversion results

pub mod mapping_report;
pub mod summary;

pub use mapping_report::*;
pub use summary::*;
