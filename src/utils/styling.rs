//! Terminal styling utilities for consistent, readable console output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static BOOKS: Emoji<'_, '_> = Emoji("📚 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        BOOKS,
        style("csv2bib").cyan().bold()
    );
    println!(
        "    {}",
        style("Tabular bibliographies to BibTeX").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(input: &Path, output: &Path, mapping_file: &Path) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:   {:<38}│",
        FOLDER,
        truncate_path(input, 37)
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        truncate_path(output, 37)
    );
    println!(
        "    │  {} Mapping: {:<38}│",
        LINK,
        truncate_path(mapping_file, 37)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a recoverable problem
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print a fatal diagnostic to stderr
pub fn print_error(message: &str) {
    eprintln!(
        "    {} {}",
        style("✗").red().bold(),
        style(message).red()
    );
}

/// Show one column and its sample values ahead of the mapping prompt
pub fn print_column_preview(position: usize, total: usize, column: &str, examples: &[String]) {
    println!();
    for line in column_preview_lines(position, total, column, examples) {
        println!("{}", line);
    }
}

/// Lines of a column preview: the position and name, then one line per
/// example value (or a placeholder when there are none)
pub fn column_preview_lines(
    position: usize,
    total: usize,
    column: &str,
    examples: &[String],
) -> Vec<String> {
    let mut lines = vec![format!(
        "    {} {}",
        style(format!("[{}/{}]", position, total)).dim(),
        style(column).white().bold()
    )];
    if examples.is_empty() {
        lines.push(format!("      {}", style("(no example values)").dim().italic()));
    } else {
        lines.extend(examples.iter().map(|example| {
            format!("      {} {}", style("•").dim(), truncate_string(example, 60))
        }));
    }
    lines
}

/// Print the final completion message
pub fn print_completion(output: &Path) {
    println!();
    println!(
        "    {}{} {}",
        BOOKS,
        style("BibTeX written to").green().bold(),
        style(output.display()).green()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
