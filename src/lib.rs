//! csv2bib: CSV to BibTeX Conversion Library
//!
//! Converts tabular bibliographic exports into `@article` BibTeX records,
//! using an interactively negotiated column-to-field mapping.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
