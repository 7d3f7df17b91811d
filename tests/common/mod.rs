//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use csv2bib::pipeline::{ConvertError, ConvertOptions, Mapping, MappingStore};
use tempfile::TempDir;

/// Header and rows shaped like a Scopus export
pub const SCOPUS_CSV: &str = "\
Authors,Year,Title,Source title,Volume,Page start,Page end,DOI
\"Smith, John\",2021,Deep Work,Journal of Focus,5,10,20,10.1000/xyz
\"Lee, Ann; Park, Min\",2019,graph methods,Networks,,1,9,
Jane Doe,2020,A Study of Things,Annals of Stuff,12,,,10.1000/abc
";

/// Create a temporary directory containing a CSV file with `content`
pub fn create_temp_csv(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("input.csv");
    std::fs::write(&csv_path, content).unwrap();
    (temp_dir, csv_path)
}

/// Options with all terminal decoration turned off
pub fn quiet_options() -> ConvertOptions {
    ConvertOptions {
        show_progress: false,
        ..Default::default()
    }
}

/// In-memory mapping store with switchable failures
#[derive(Default)]
pub struct MemoryStore {
    pub saved: RefCell<Option<Mapping>>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn with(mapping: Mapping) -> Self {
        Self {
            saved: RefCell::new(Some(mapping)),
            ..Default::default()
        }
    }

    fn error(&self, message: &str) -> ConvertError {
        ConvertError::Store {
            path: PathBuf::from("memory"),
            message: message.to_string(),
        }
    }
}

impl MappingStore for MemoryStore {
    fn load(&self) -> Result<Option<Mapping>, ConvertError> {
        if self.fail_load {
            return Err(self.error("load failed"));
        }
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, mapping: &Mapping) -> Result<(), ConvertError> {
        *self.saves.borrow_mut() += 1;
        if self.fail_save {
            return Err(self.error("save failed"));
        }
        *self.saved.borrow_mut() = Some(mapping.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Count `@article{` blocks in rendered output
pub fn block_count(text: &str) -> usize {
    text.matches("@article{").count()
}
