//! Column-to-field mapping and its persistence
//!
//! A [`Mapping`] keeps entries in the order they were built or loaded; the
//! renderer emits fields in that order. On disk it is a flat JSON object
//! `{"<column>": "<field>"}`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::error::ConvertError;
use super::fields::BibField;

/// Default location of the persisted mapping, relative to the working directory
pub const DEFAULT_MAPPING_FILE: &str = "field_mapping.json";

/// Ordered association from input column name to BibTeX field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, BibField)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `column` to `field`. A column maps to one field only, so an
    /// existing entry for the column is replaced in place.
    pub fn insert(&mut self, column: impl Into<String>, field: BibField) {
        let column = column.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((column, field)),
        }
    }

    pub fn get(&self, column: &str) -> Option<BibField> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| *f)
    }

    /// Columns mapped to `field`, in mapping order
    pub fn columns_for(&self, field: BibField) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(_, f)| *f == field)
            .map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, BibField)> {
        self.entries.iter().map(|(c, f)| (c.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, BibField)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (S, BibField)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (column, field) in iter {
            mapping.insert(column, field);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, field) in &self.entries {
            map.serialize_entry(column, field)?;
        }
        map.end()
    }
}

/// Persistence capability for a negotiated mapping
pub trait MappingStore {
    /// Load the saved mapping; `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Mapping>, ConvertError>;

    fn save(&self, mapping: &Mapping) -> Result<(), ConvertError>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}

/// Mapping store backed by a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonMappingStore {
    path: PathBuf,
}

impl JsonMappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, message: impl ToString) -> ConvertError {
        ConvertError::Store {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl Default for JsonMappingStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAPPING_FILE)
    }
}

impl MappingStore for JsonMappingStore {
    fn load(&self) -> Result<Option<Mapping>, ConvertError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved mapping");
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).map_err(|e| self.store_error(e))?;
        // preserve_order keeps the object's keys in file order
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| self.store_error(e))?;

        let mut mapping = Mapping::new();
        for (column, value) in object {
            let field = match value {
                serde_json::Value::String(name) => name
                    .parse::<BibField>()
                    .map_err(|e| self.store_error(e))?,
                other => {
                    return Err(self.store_error(format!(
                        "column '{}' maps to {} instead of a field name",
                        column, other
                    )))
                }
            };
            mapping.insert(column, field);
        }

        debug!(path = %self.path.display(), entries = mapping.len(), "loaded saved mapping");
        Ok(Some(mapping))
    }

    fn save(&self, mapping: &Mapping) -> Result<(), ConvertError> {
        let json = serde_json::to_string_pretty(mapping).map_err(|e| self.store_error(e))?;
        fs::write(&self.path, json).map_err(|e| self.store_error(e))?;
        debug!(path = %self.path.display(), entries = mapping.len(), "saved mapping");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
