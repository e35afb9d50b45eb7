//! Command-line surface and run orchestration.
//!
//! Parses the argument surface (source directory plus an optional filter
//! configuration file) and drives the workflow: load filters, organize,
//! write the report, print the stdout summary.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::FilterConfig;
use crate::file_category::CategoryTable;
use crate::file_organizer::{ORGANIZED_DIR_NAME, Organizer};
use crate::logging::LOG_FILE_NAME;
use crate::output::OutputFormatter;
use crate::report::{REPORT_FILE_NAME, Reporter};

/// Organize a directory's files into category subfolders and write a
/// plain-text summary report.
#[derive(Debug, Parser)]
#[command(name = "tidyshelf", version, about)]
pub struct Cli {
    /// Directory whose files should be organized.
    pub path: PathBuf,

    /// TOML file with exclusion filter rules.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Runs the full organize-then-report workflow for a source directory.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use tidyshelf::cli::run;
///
/// match run(Path::new("/path/to/downloads")) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run(dir_path: &Path) -> Result<(), String> {
    run_with_config(dir_path, None)
}

/// Runs the workflow with an explicit filter configuration file.
///
/// Each failure is logged with context before being surfaced as a plain
/// message for the binary to print; the run stops at the first error with no
/// retry and no rollback of files already moved.
pub fn run_with_config(dir_path: &Path, config_path: Option<&Path>) -> Result<(), String> {
    let config = FilterConfig::load(config_path).map_err(|e| {
        let message = format!("Error loading configuration: {e}");
        tracing::error!("{message}");
        message
    })?;
    let filters = config.compile().map_err(|e| {
        let message = format!("Error compiling filters: {e}");
        tracing::error!("{message}");
        message
    })?;

    let table = CategoryTable::default();

    OutputFormatter::info(&format!("Organizing contents of: {}", dir_path.display()));

    let summary = Organizer::organize(dir_path, &table, &filters).map_err(|e| {
        let message = format!("Error organizing files: {e}");
        tracing::error!("{message}");
        message
    })?;

    let organized_root = dir_path.join(ORGANIZED_DIR_NAME);
    let counts = Reporter::write(&organized_root).map_err(|e| {
        let message = format!("Error generating report: {e}");
        tracing::error!("{message}");
        message
    })?;

    OutputFormatter::success("Organization complete!");
    OutputFormatter::plain(&format!(
        "Processed {} of {} files",
        summary.organized, summary.total
    ));
    OutputFormatter::summary_table(&counts);
    OutputFormatter::plain(&format!(
        "Check '{REPORT_FILE_NAME}' in the {ORGANIZED_DIR_NAME} directory for details"
    ));
    OutputFormatter::plain(&format!("Check '{LOG_FILE_NAME}' for detailed operation logs"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_path_and_config() {
        let cli = Cli::parse_from(["tidyshelf", "/some/dir", "--config", "rules.toml"]);
        assert_eq!(cli.path, PathBuf::from("/some/dir"));
        assert_eq!(cli.config, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn test_cli_config_is_optional() {
        let cli = Cli::parse_from(["tidyshelf", "/some/dir"]);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_run_rejects_missing_directory() {
        let result = run(Path::new("/non/existent/path"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid source directory"));
    }
}
