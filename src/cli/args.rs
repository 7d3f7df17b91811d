//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    ConvertOptions, FieldDefaults, KeyPolicy, DEFAULT_MAPPING_FILE, DEFAULT_SAMPLE_ROWS,
};

/// csv2bib - Convert a CSV bibliography export into BibTeX @article records
#[derive(Parser, Debug)]
#[command(name = "csv2bib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file (comma-delimited, header row required)
    pub input: PathBuf,

    /// Output BibTeX file
    pub output: PathBuf,

    /// Where the column-to-field mapping is saved and loaded
    #[arg(long, default_value = DEFAULT_MAPPING_FILE)]
    pub mapping_file: PathBuf,

    /// Number of rows whose values are shown as examples while mapping columns
    #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS, value_parser = validate_sample_rows)]
    pub sample_rows: usize,

    /// Disambiguate repeated citation keys by appending a, b, c, ...
    #[arg(long, default_value = "false")]
    pub dedupe_keys: bool,

    /// Fill empty author/year/title/journal values with placeholders
    /// ("Unknown", "n.d.", "Untitled", "Unknown")
    #[arg(long, default_value = "false")]
    pub fill_defaults: bool,

    /// Skip interactive prompts: reuse the saved mapping, which must exist
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Hide progress bars and summary tables
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Resolve the conversion settings chosen on the command line.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            sample_rows: self.sample_rows,
            key_policy: if self.dedupe_keys {
                KeyPolicy::Suffix
            } else {
                KeyPolicy::Duplicate
            },
            defaults: if self.fill_defaults {
                FieldDefaults::historical()
            } else {
                FieldDefaults::none()
            },
            show_progress: !self.quiet,
        }
    }
}

/// Validator for sample_rows parameter
fn validate_sample_rows(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;

    if value == 0 {
        Err("sample_rows must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
