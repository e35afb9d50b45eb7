/// File organization: scan a source directory, classify each regular file by
/// its extension, and move it into the matching category subfolder under the
/// organized root.
///
/// The pipeline is one-shot with no state across runs. Moves never overwrite
/// an existing destination file; collisions get a timestamp-disambiguated
/// name instead.
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::CompiledFilters;
use crate::file_category::CategoryTable;
use crate::layout;
use crate::logging::LOG_FILE_NAME;
use crate::output::OutputFormatter;

/// Name of the directory created under the source directory to hold the
/// organized category subfolders.
pub const ORGANIZED_DIR_NAME: &str = "organized_files";

/// Counts from a completed organization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeSummary {
    /// Files successfully moved into a category subfolder.
    pub organized: usize,
    /// Regular files considered in the source directory.
    pub total: usize,
}

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// The source path does not exist, is not a directory, or cannot be read.
    InvalidSourceDirectory {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to create the organized root or a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSourceDirectory { path, source } => {
                write!(f, "Invalid source directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Organizes files by moving them into category subdirectories.
pub struct Organizer;

impl Organizer {
    /// Runs the scan-classify-move pipeline over `source_dir`.
    ///
    /// Provisions `source_dir/organized_files` first, then walks the direct
    /// children of `source_dir`. Only regular files are considered;
    /// subdirectories are left in place and never recursed into. The process
    /// log file and any filter-excluded names are skipped entirely. The
    /// first per-file failure aborts the run, leaving files organized so far
    /// where they landed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use tidyshelf::config::FilterConfig;
    /// use tidyshelf::file_category::CategoryTable;
    /// use tidyshelf::file_organizer::Organizer;
    ///
    /// let table = CategoryTable::default();
    /// let filters = FilterConfig::default().compile().expect("default rules compile");
    /// match Organizer::organize(Path::new("/path/to/downloads"), &table, &filters) {
    ///     Ok(summary) => println!("Processed {} of {} files", summary.organized, summary.total),
    ///     Err(e) => eprintln!("Organization failed: {e}"),
    /// }
    /// ```
    pub fn organize(
        source_dir: &Path,
        table: &CategoryTable,
        filters: &CompiledFilters,
    ) -> OrganizeResult<OrganizeSummary> {
        validate_source_dir(source_dir)?;

        let organized_root = source_dir.join(ORGANIZED_DIR_NAME);
        layout::ensure_layout(&organized_root)?;

        let files = scan_source(source_dir, filters)?;
        let total = files.len();

        let progress = OutputFormatter::create_progress_bar(total as u64);
        let mut organized = 0;

        for file_path in &files {
            let suffix = file_suffix(file_path);
            let category = table.classify(&suffix);
            let destination =
                resolve_destination(&organized_root, category.dir_name(), file_path)?;
            move_file(file_path, &destination)?;
            organized += 1;
            if let Some(name) = file_path.file_name() {
                tracing::info!(
                    "Moved '{}' to {} folder",
                    name.to_string_lossy(),
                    category.dir_name()
                );
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::info!("Organization complete. Processed {organized} of {total} files");

        Ok(OrganizeSummary { organized, total })
    }
}

fn validate_source_dir(path: &Path) -> OrganizeResult<()> {
    if !path.is_dir() {
        return Err(OrganizeError::InvalidSourceDirectory {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                "path does not exist or is not a directory",
            ),
        });
    }
    Ok(())
}

/// Collects the regular files directly inside `source_dir` that qualify for
/// organization. Subdirectories, the process log file, and filter-excluded
/// names are skipped.
fn scan_source(source_dir: &Path, filters: &CompiledFilters) -> OrganizeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(source_dir).map_err(|e| OrganizeError::InvalidSourceDirectory {
        path: source_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
            && entry.file_name() != LOG_FILE_NAME
        {
            let path = entry.path();
            if filters.should_include(&path) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

/// Returns the dotted extension of `path`, or the empty string when the file
/// has none. Mirrors the `Path::extension` rules: dotfiles without a second
/// dot and names with a bare trailing dot both yield the empty string, and a
/// multi-dot name keeps only its last component.
fn file_suffix(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

/// Computes the destination path inside the category directory.
///
/// When the initial path is already taken, a `_YYYYMMDD_HHMMSS` suffix
/// (local clock at move time) is inserted between stem and extension so the
/// existing file is never overwritten. Two collisions on the same name
/// within the same second remain a known boundary condition.
fn resolve_destination(
    organized_root: &Path,
    category_dir_name: &str,
    file_path: &Path,
) -> OrganizeResult<PathBuf> {
    let category_path = organized_root.join(category_dir_name);
    let file_name = file_path
        .file_name()
        .ok_or_else(|| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: category_path.clone(),
            source_error: io::Error::new(
                io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;

    let destination = category_path.join(file_name);
    if !destination.exists() {
        return Ok(destination);
    }

    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let suffix = file_suffix(file_path);
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(category_path.join(format!("{stem}_{timestamp}{suffix}")))
}

/// Moves `source` to `destination`, preferring an atomic rename.
///
/// When the rename fails because the paths live on different filesystems,
/// falls back to copy followed by delete; that path is not atomic and a
/// failure mid-way can leave both copies behind.
fn move_file(source: &Path, destination: &Path) -> OrganizeResult<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_and_delete(source, destination)
        }
        Err(e) => Err(move_error(source, destination, e)),
    }
}

fn copy_and_delete(source: &Path, destination: &Path) -> OrganizeResult<()> {
    fs::copy(source, destination).map_err(|e| move_error(source, destination, e))?;
    fs::remove_file(source).map_err(|e| move_error(source, destination, e))
}

fn move_error(source: &Path, destination: &Path, source_error: io::Error) -> OrganizeError {
    OrganizeError::FileMoveFailure {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error,
    }
}
