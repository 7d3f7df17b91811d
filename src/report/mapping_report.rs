//! Tabular display of a negotiated field mapping

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::Mapping;

/// Build the mapping table: every named header column with its target
/// field, or a dimmed "skipped" when the column is unmapped.
pub fn mapping_table(mapping: &Mapping, header: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("BibTeX Field").add_attribute(Attribute::Bold),
        Cell::new("Class").add_attribute(Attribute::Bold),
    ]);

    for column in header.iter().filter(|c| !c.trim().is_empty()) {
        match mapping.get(column) {
            Some(field) => table.add_row(vec![
                Cell::new(column),
                Cell::new(field.name()).fg(Color::Green),
                Cell::new(field.requirement().label()),
            ]),
            None => table.add_row(vec![
                Cell::new(column),
                Cell::new("skipped").fg(Color::DarkGrey),
                Cell::new(""),
            ]),
        };
    }

    // Saved mappings may name columns this table does not have
    for (column, field) in mapping.iter() {
        if !header.iter().any(|h| h == column) {
            table.add_row(vec![
                Cell::new(format!("{} (not in table)", column)).fg(Color::Yellow),
                Cell::new(field.name()),
                Cell::new(field.requirement().label()),
            ]);
        }
    }

    table
}

pub fn display_mapping(mapping: &Mapping, header: &[String]) {
    println!();
    println!(
        "    {} {}",
        style("🔗").cyan(),
        style("FIELD MAPPING").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    for line in mapping_table(mapping, header).to_string().lines() {
        println!("    {}", line);
    }
}
