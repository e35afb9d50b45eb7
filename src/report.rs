//! Summary reporting over the organized directory tree.
//!
//! Counts are taken from the final directory state rather than from the
//! organizer's bookkeeping, so the report reflects what is actually on disk,
//! prior runs included.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::file_category::Category;

/// Name of the report file written at the organized root.
pub const REPORT_FILE_NAME: &str = "organization_report.txt";

/// Errors that can occur while producing the summary report.
#[derive(Debug)]
pub enum ReportError {
    /// Failed to list a category directory while counting files.
    CategoryListing { path: PathBuf, source: io::Error },
    /// Failed to write the report file.
    WriteFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryListing { path, source } => {
                write!(
                    f,
                    "Failed to list category directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::WriteFailed { path, source } => {
                write!(f, "Failed to write report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Generates and writes the plain-text organization report.
pub struct Reporter;

impl Reporter {
    /// Counts regular files directly inside each category subfolder, in
    /// table order.
    pub fn category_counts(organized_root: &Path) -> ReportResult<Vec<(Category, usize)>> {
        Category::ALL
            .iter()
            .map(|category| {
                let dir = organized_root.join(category.dir_name());
                count_regular_files(&dir).map(|count| (*category, count))
            })
            .collect()
    }

    /// Renders the fixed-format report text: a title line, a separator line,
    /// then one `Name: N files` line per category, with misc rendered as
    /// `Miscellaneous`.
    pub fn render(counts: &[(Category, usize)]) -> String {
        let mut lines = Vec::with_capacity(counts.len() + 2);
        lines.push("File Organization Report".to_string());
        lines.push("=".repeat(25));
        for (category, count) in counts {
            lines.push(format!("{}: {} files", category.display_name(), count));
        }
        lines.join("\n")
    }

    /// Writes the report into `organized_root`, overwriting any prior
    /// report, and returns the counts it was rendered from.
    ///
    /// A failure here never undoes the organize step that preceded it.
    pub fn write(organized_root: &Path) -> ReportResult<Vec<(Category, usize)>> {
        let counts = Self::category_counts(organized_root)?;
        let report_path = organized_root.join(REPORT_FILE_NAME);
        fs::write(&report_path, Self::render(&counts)).map_err(|e| ReportError::WriteFailed {
            path: report_path.clone(),
            source: e,
        })?;
        tracing::info!("Report written to {}", report_path.display());
        Ok(counts)
    }
}

fn count_regular_files(dir: &Path) -> ReportResult<usize> {
    let entries = fs::read_dir(dir).map_err(|e| ReportError::CategoryListing {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut count = 0;
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            count += 1;
        }
    }
    Ok(count)
}
