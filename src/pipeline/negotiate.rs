//! Interactive column-to-field mapping negotiation
//!
//! Produces exactly one [`Mapping`] per run: either the saved one (if the
//! user agrees to reuse it) or one built column by column from the user's
//! answers, with a few sample values shown for each column.

use anyhow::Result;
use tracing::{info, warn};

use super::error::ConvertError;
use super::fields::{BibField, Requirement};
use super::mapping::{Mapping, MappingStore};
use super::table::Row;
use crate::utils::{print_column_preview, print_info, print_success, print_warning};

/// Default number of sample rows shown per column
pub const DEFAULT_SAMPLE_ROWS: usize = 3;

/// Question/answer channel to the user
pub trait Prompter {
    /// Ask a free-text question. `valid_answers` is shown as a hint only;
    /// the caller validates the reply.
    fn ask(&mut self, question: &str, valid_answers: Option<&[&str]>) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question, Some(&["y", "n"][..]))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Non-empty example values for `column` from the sample rows.
pub fn sample_values(column: &str, sample: &[Row]) -> Vec<String> {
    sample
        .iter()
        .filter_map(|row| row.get(column))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Obtain the mapping for this run, reusing or building and saving it.
///
/// Store failures are reported and otherwise ignored: a failed load means
/// "no saved mapping", a failed save leaves the run unaffected.
pub fn negotiate_mapping(
    header: &[String],
    sample: &[Row],
    store: &dyn MappingStore,
    prompter: &mut dyn Prompter,
) -> Result<Mapping> {
    let saved = match store.load() {
        Ok(saved) => saved,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable saved mapping");
            print_warning(&format!("Could not read saved mapping: {}", e));
            None
        }
    };

    if let Some(mapping) = saved {
        let question = format!(
            "Reuse the saved field mapping from {} ({} column(s))?",
            store.location(),
            mapping.len()
        );
        if prompter.confirm(&question)? {
            info!(entries = mapping.len(), "reusing saved mapping");
            return Ok(mapping);
        }
    }

    let mapping = build_mapping(header, sample, prompter)?;

    if prompter.confirm(&format!("Save this mapping to {}?", store.location()))? {
        match store.save(&mapping) {
            Ok(()) => print_success(&format!("Mapping saved to {}", store.location())),
            Err(e) => {
                warn!(error = %e, "failed to save mapping");
                print_warning(&format!("Could not save mapping: {}", e));
            }
        }
    }

    Ok(mapping)
}

/// Ask for a target field for every column, one attempt each.
///
/// Columns with a blank name are never asked about. Blank answers skip the
/// column; unknown field names are reported and the column is skipped.
pub fn build_mapping(
    header: &[String],
    sample: &[Row],
    prompter: &mut dyn Prompter,
) -> Result<Mapping> {
    let columns: Vec<&String> = header.iter().filter(|c| !c.trim().is_empty()).collect();
    if columns.is_empty() {
        return Err(ConvertError::Format("table has no columns to map".to_string()).into());
    }

    print_info(&format!(
        "Required: {}",
        BibField::names_with(Requirement::Required).join(", ")
    ));
    print_info(&format!(
        "Optional: {}",
        BibField::names_with(Requirement::Optional).join(", ")
    ));
    print_info(&format!(
        "Non-standard: {}",
        BibField::names_with(Requirement::NonStandard).join(", ")
    ));
    print_info("Leave the answer blank to skip a column.");

    let valid = BibField::all_names();
    let mut mapping = Mapping::new();

    for (i, column) in columns.iter().enumerate() {
        print_column_preview(i + 1, columns.len(), column, &sample_values(column, sample));

        let question = format!("BibTeX field for '{}'", column);
        let answer = prompter.ask(&question, Some(valid.as_slice()))?;
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }

        match answer.parse::<BibField>() {
            Ok(field) => mapping.insert(column.to_string(), field),
            Err(e) => {
                warn!(column = %column, answer, "rejected mapping target");
                print_warning(&format!("{}; skipping column '{}'", e, column));
            }
        }
    }

    Ok(mapping)
}
