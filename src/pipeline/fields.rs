//! BibTeX field vocabulary for `@article` records
//!
//! The set of output fields is closed. Every mapping target is one of these
//! variants, so an unknown name is rejected when it is parsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConvertError;

/// How strongly BibTeX expects a field on an `@article` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    Required,
    Optional,
    NonStandard,
}

impl Requirement {
    pub fn label(&self) -> &'static str {
        match self {
            Requirement::Required => "Required",
            Requirement::Optional => "Optional",
            Requirement::NonStandard => "Non-standard",
        }
    }
}

/// An output field name accepted in a column mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibField {
    Author,
    Title,
    Journal,
    Year,
    Volume,
    Number,
    Pages,
    Month,
    Note,
    Doi,
    Issn,
    Zblnumber,
    Eprint,
    Url,
}

impl BibField {
    /// All fields, grouped Required, Optional, Non-standard
    pub const ALL: [BibField; 14] = [
        BibField::Author,
        BibField::Title,
        BibField::Journal,
        BibField::Year,
        BibField::Volume,
        BibField::Number,
        BibField::Pages,
        BibField::Month,
        BibField::Note,
        BibField::Doi,
        BibField::Issn,
        BibField::Zblnumber,
        BibField::Eprint,
        BibField::Url,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BibField::Author => "author",
            BibField::Title => "title",
            BibField::Journal => "journal",
            BibField::Year => "year",
            BibField::Volume => "volume",
            BibField::Number => "number",
            BibField::Pages => "pages",
            BibField::Month => "month",
            BibField::Note => "note",
            BibField::Doi => "doi",
            BibField::Issn => "issn",
            BibField::Zblnumber => "zblnumber",
            BibField::Eprint => "eprint",
            BibField::Url => "url",
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            BibField::Author | BibField::Title | BibField::Journal | BibField::Year => {
                Requirement::Required
            }
            BibField::Volume
            | BibField::Number
            | BibField::Pages
            | BibField::Month
            | BibField::Note => Requirement::Optional,
            BibField::Doi
            | BibField::Issn
            | BibField::Zblnumber
            | BibField::Eprint
            | BibField::Url => Requirement::NonStandard,
        }
    }

    /// Title-like fields whose capital letters must survive BibTeX styles
    /// that lower-case everything outside braces.
    pub fn preserves_case(&self) -> bool {
        matches!(self, BibField::Title)
    }

    /// Field names belonging to one requirement class, in vocabulary order
    pub fn names_with(requirement: Requirement) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|f| f.requirement() == requirement)
            .map(|f| f.name())
            .collect()
    }

    /// Every field name, in vocabulary order
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }
}

impl fmt::Display for BibField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BibField {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| ConvertError::InvalidFieldName(wanted.to_string()))
    }
}
