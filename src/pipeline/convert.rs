//! Conversion orchestration: validate, negotiate a mapping, write records
//!
//! The input table is validated in full before anything else happens, and
//! the output file is only created once a mapping exists. After that, a
//! failing row is reported and skipped; it never stops the batch. Finished
//! blocks are buffered and written in one pass, so a skipped row never
//! leaves part of its record behind.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{info, warn};

use super::error::ConvertError;
use super::fields::BibField;
use super::key::{generate_key, KeyAllocator, KeyPolicy};
use super::mapping::{Mapping, MappingStore};
use super::negotiate::{negotiate_mapping, Prompter, DEFAULT_SAMPLE_ROWS};
use super::render::{check_row_braces, raw_field_value, render, FieldDefaults};
use super::table::{read_table, Row};
use crate::report::{display_mapping, ConversionSummary};
use crate::utils::{
    create_progress_bar, create_spinner, finish_with_success, finish_with_warning, print_info,
    print_step_header,
};

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rows shown per column while building a mapping
    pub sample_rows: usize,
    pub key_policy: KeyPolicy,
    pub defaults: FieldDefaults,
    /// Show spinners, progress bar, and the mapping table
    pub show_progress: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            key_policy: KeyPolicy::Duplicate,
            defaults: FieldDefaults::none(),
            show_progress: true,
        }
    }
}

/// Stages of a run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validating,
    Mapping,
    Converting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Validating => "validating",
            Phase::Mapping => "mapping",
            Phase::Converting => "converting",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Convert `input` into a BibTeX file at `output`.
///
/// Returns an error (and leaves `output` untouched) if the table is
/// malformed or the mapping cannot be negotiated.
pub fn run_conversion(
    input: &Path,
    output: &Path,
    store: &dyn MappingStore,
    prompter: &mut dyn Prompter,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    info!(phase = %Phase::Validating, input = %input.display());
    print_step_header(1, "Validate Table");
    let spinner = spinner_for(options, "Reading table...");
    let table = read_table(input)
        .with_context(|| format!("Failed to read table: {}", input.display()))?;
    finish_with_success(
        &spinner,
        &format!(
            "{} row(s) × {} column(s)",
            table.rows.len(),
            table.header.len()
        ),
    );

    info!(phase = %Phase::Mapping);
    print_step_header(2, "Field Mapping");
    let mapping = negotiate_mapping(
        &table.header,
        table.sample(options.sample_rows.max(1)),
        store,
        prompter,
    )?;
    if options.show_progress {
        display_mapping(&mapping, &table.header);
    }
    if mapping.is_empty() {
        print_info("No columns mapped; records will contain keys only");
    }

    info!(phase = %Phase::Converting, output = %output.display());
    print_step_header(3, "Write BibTeX");
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let summary = match write_records(&table.rows, &mapping, options, &mut writer) {
        Ok(summary) => summary,
        Err(e) => {
            drop(writer);
            if let Err(remove) = fs::remove_file(output) {
                warn!(output = %output.display(), error = %remove, "could not remove partial output");
            }
            return Err(e)
                .with_context(|| format!("Failed to write output file: {}", output.display()));
        }
    };

    info!(
        phase = %Phase::Done,
        written = summary.records_written,
        failed = summary.failures.len()
    );
    Ok(summary)
}

/// Render every row, in input order, and write the records to `sink`.
///
/// A row that fails is logged with its number and content and left out.
/// Blocks are collected in memory and written once; an error from `sink`
/// fails the whole call.
pub fn write_records<W: Write>(
    rows: &[Row],
    mapping: &Mapping,
    options: &ConvertOptions,
    sink: &mut W,
) -> Result<ConversionSummary, ConvertError> {
    let mut summary = ConversionSummary::new(rows.len(), mapping.len());
    let mut keys = KeyAllocator::new(options.key_policy);
    let mut buffer = String::new();

    let pb = if options.show_progress {
        create_progress_bar(rows.len() as u64, "Writing records")
    } else {
        ProgressBar::hidden()
    };

    for row in rows {
        match convert_row(row, mapping, &options.defaults, &mut keys) {
            Ok(block) => {
                buffer.push_str(&block);
                summary.record_written();
            }
            Err(e) => {
                warn!(row = row.number(), content = %row.raw(), error = %e, "skipping row");
                pb.println(format!("    ⚠️  {}", e));
                summary.record_failure(row.number(), e.to_string());
            }
        }
        pb.inc(1);
    }

    if let Err(e) = sink.write_all(buffer.as_bytes()).and_then(|()| sink.flush()) {
        pb.abandon();
        return Err(ConvertError::Io(e));
    }

    summary.set_key_collisions(keys.collisions());
    if summary.failures.is_empty() {
        finish_with_success(
            &pb,
            &format!("{} record(s) written", summary.records_written),
        );
    } else {
        finish_with_warning(
            &pb,
            &format!(
                "{} record(s) written, {} row(s) skipped",
                summary.records_written,
                summary.failures.len()
            ),
        );
    }
    Ok(summary)
}

/// Render one row's block, allocating its key
fn convert_row(
    row: &Row,
    mapping: &Mapping,
    defaults: &FieldDefaults,
    keys: &mut KeyAllocator,
) -> Result<String, ConvertError> {
    check_row_braces(row, mapping)?;

    let authors = raw_field_value(row, mapping, BibField::Author, defaults);
    let year = raw_field_value(row, mapping, BibField::Year, defaults);
    let key = keys.allocate(generate_key(&authors, &year));

    Ok(render(row, mapping, &key, defaults))
}

fn spinner_for(options: &ConvertOptions, message: &str) -> ProgressBar {
    if options.show_progress {
        create_spinner(message)
    } else {
        ProgressBar::hidden()
    }
}
