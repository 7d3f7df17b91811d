//! BibTeX record rendering
//!
//! Turns one [`Row`] into an `@article` block using a [`Mapping`]. Rendering
//! never fails: missing columns and empty cells simply contribute no line.

use std::fmt;

use super::error::ConvertError;
use super::fields::BibField;
use super::mapping::Mapping;
use super::table::Row;

/// Record type tag written at the top of every block
pub const RECORD_TYPE: &str = "article";

/// Per-field fallback values used when a mapped cell is empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDefaults {
    values: Vec<(BibField, String)>,
}

impl FieldDefaults {
    /// No defaults: empty values are left out of the record.
    pub fn none() -> Self {
        Self::default()
    }

    /// Placeholders for the required fields of an article.
    pub fn historical() -> Self {
        let mut defaults = Self::none();
        defaults.set(BibField::Author, "Unknown");
        defaults.set(BibField::Year, "n.d.");
        defaults.set(BibField::Title, "Untitled");
        defaults.set(BibField::Journal, "Unknown");
        defaults
    }

    pub fn set(&mut self, field: BibField, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn get(&self, field: BibField) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A rendered-to-be record: key plus the non-empty fields in mapping order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub fields: Vec<(BibField, String)>,
}

impl Record {
    /// Collect the mapped, formatted fields of `row`.
    ///
    /// When several columns map to the same field, the later column's
    /// non-empty value wins but keeps the position of the first.
    pub fn from_row(row: &Row, mapping: &Mapping, key: String, defaults: &FieldDefaults) -> Self {
        let mut slots: Vec<(BibField, Option<String>)> = Vec::new();

        for (column, field) in mapping.iter() {
            let cell = row
                .get(column)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            match slots.iter_mut().find(|(f, _)| *f == field) {
                Some(slot) => {
                    if cell.is_some() {
                        slot.1 = cell;
                    }
                }
                None => slots.push((field, cell)),
            }
        }

        let fields = slots
            .into_iter()
            .filter_map(|(field, value)| {
                let value = value.or_else(|| defaults.get(field).map(str::to_string))?;
                if field.preserves_case() {
                    Some((field, mask_capitals(&value)))
                } else {
                    Some((field, value))
                }
            })
            .collect();

        Self { key, fields }
    }

    pub fn get(&self, field: BibField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@{}{{{},", RECORD_TYPE, self.key)?;
        for (field, value) in &self.fields {
            writeln!(f, "  {} = {{{}}},", field, value)?;
        }
        writeln!(f, "}}")?;
        writeln!(f)
    }
}

/// Value of `field` for key generation: the last non-empty mapped column,
/// trimmed, with default fallback.
///
/// Read before formatting, so capital masking never reaches the key.
pub fn raw_field_value(
    row: &Row,
    mapping: &Mapping,
    field: BibField,
    defaults: &FieldDefaults,
) -> String {
    mapping
        .columns_for(field)
        .filter_map(|column| row.get(column).map(str::trim))
        .filter(|v| !v.is_empty())
        .last()
        .or_else(|| defaults.get(field))
        .unwrap_or("")
        .to_string()
}

/// Render one row as a complete `@article` block, trailing blank line included.
pub fn render(row: &Row, mapping: &Mapping, key: &str, defaults: &FieldDefaults) -> String {
    Record::from_row(row, mapping, key.to_string(), defaults).to_string()
}

/// Wrap every upper-case letter in its own brace group: `Deep Work` -> `{D}eep {W}ork`.
pub fn mask_capitals(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if c.is_uppercase() {
            out.push('{');
            out.push(c);
            out.push('}');
        } else {
            out.push(c);
        }
    }
    out
}

/// Check that braces in `value` nest properly.
pub fn braces_balanced(value: &str) -> bool {
    let mut depth: usize = 0;
    for c in value.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// Reject rows whose mapped values would break the surrounding `{...}` delimiters.
pub fn check_row_braces(row: &Row, mapping: &Mapping) -> Result<(), ConvertError> {
    for (column, field) in mapping.iter() {
        if let Some(value) = row.get(column) {
            if !braces_balanced(value) {
                return Err(ConvertError::RowProcessing {
                    row: row.number(),
                    message: format!(
                        "unbalanced braces in column '{}' (field {}): {}",
                        column, field, value
                    ),
                });
            }
        }
    }
    Ok(())
}
