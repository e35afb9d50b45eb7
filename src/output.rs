//! Output formatting and styling module.
//!
//! Centralizes user-facing stdout/stderr output: colored status lines, the
//! progress bar shown while files are moved, and the per-category summary
//! table printed after a run.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::file_category::Category;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for the file move loop.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table of per-category file counts in table order.
    ///
    /// `counts` comes from the reporter, so the table matches the written
    /// report and the actual directory state.
    pub fn summary_table(counts: &[(Category, usize)]) {
        Self::header("SUMMARY");

        let width = counts
            .iter()
            .map(|(category, _)| category.display_name().len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in counts {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category.display_name(),
                count.to_string().green(),
                file_word,
                width = width
            );
        }

        let total: usize = counts.iter().map(|(_, count)| count).sum();
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
            width = width
        );
    }
}
