//! Conversion summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one conversion run
#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub rows_read: usize,
    pub records_written: usize,
    pub columns_mapped: usize,
    pub key_collisions: usize,
    /// Skipped rows: (row number, reason)
    pub failures: Vec<(usize, String)>,
}

impl ConversionSummary {
    pub fn new(rows_read: usize, columns_mapped: usize) -> Self {
        Self {
            rows_read,
            columns_mapped,
            ..Default::default()
        }
    }

    pub fn record_written(&mut self) {
        self.records_written += 1;
    }

    pub fn record_failure(&mut self, row: usize, reason: String) {
        self.failures.push((row, reason));
    }

    pub fn set_key_collisions(&mut self, collisions: usize) {
        self.key_collisions = collisions;
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.records_written == self.rows_read
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Read"), Cell::new(self.rows_read)]);
        table.add_row(vec![
            Cell::new("🔗 Columns Mapped"),
            Cell::new(self.columns_mapped),
        ]);
        table.add_row(vec![
            Cell::new("✅ Records Written"),
            Cell::new(self.records_written)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Rows Skipped"),
            Cell::new(self.failures.len()).fg(if self.failures.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🔑 Repeated Keys"),
            Cell::new(self.key_collisions).fg(if self.key_collisions == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.failures.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("SKIPPED ROWS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for (row, reason) in &self.failures {
                println!(
                    "        {} {} {}",
                    style("•").dim(),
                    style(format!("row {}:", row)).yellow(),
                    reason
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = ConversionSummary::new(3, 2);
        summary.record_written();
        summary.record_written();
        assert!(!summary.is_complete());
        summary.record_written();
        assert!(summary.is_complete());
        summary.record_failure(2, "bad".to_string());
        assert!(!summary.is_complete());
    }
}
