//! Destination directory provisioning.
//!
//! Creates the organized root and its fixed set of category subfolders before
//! any file is moved.

use std::fs;
use std::path::Path;

use crate::file_category::Category;
use crate::file_organizer::{OrganizeError, OrganizeResult};

/// Creates `root` and one subfolder per category, `misc` included.
///
/// Idempotent: existing directories are left untouched, and calling it twice
/// yields the same directory set with no errors. A creation failure
/// (insufficient permissions, a regular file occupying a directory path) is
/// fatal to the run.
pub fn ensure_layout(root: &Path) -> OrganizeResult<()> {
    create_dir_if_missing(root)?;
    for category in Category::ALL {
        create_dir_if_missing(&root.join(category.dir_name()))?;
    }
    tracing::info!("Directory structure ready under {}", root.display());
    Ok(())
}

fn create_dir_if_missing(path: &Path) -> OrganizeResult<()> {
    fs::create_dir_all(path).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
