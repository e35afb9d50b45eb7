/// File categorization for organizing files by extension.
///
/// Maps dotted file extensions (e.g. ".pdf") to the broad categories used as
/// destination subfolder names. The category set and its extension table are
/// fixed at build time.
///
/// # Examples
///
/// ```
/// use tidyshelf::file_category::{Category, CategoryTable};
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify(".pdf"), Category::Documents);
/// assert_eq!(table.classify(".JPG"), Category::Images);
/// assert_eq!(table.classify(".unknown"), Category::Misc);
/// ```
use std::collections::HashMap;

/// Represents a destination category for organized files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Document files (PDF, DOCX, TXT, etc.)
    Documents,
    /// Image files (JPG, PNG, GIF, etc.)
    Images,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Video files (MP4, AVI, MKV, etc.)
    Videos,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Source code files (Python, JavaScript, C++, etc.)
    Code,
    /// Fallback for files whose extension matches no other category.
    Misc,
}

impl Category {
    /// All categories in the fixed enumeration order used for classification,
    /// directory provisioning, and reporting. `Misc` is always last.
    pub const ALL: [Category; 7] = [
        Category::Documents,
        Category::Images,
        Category::Audio,
        Category::Videos,
        Category::Archives,
        Category::Code,
        Category::Misc,
    ];

    /// Returns the destination directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyshelf::file_category::Category;
    ///
    /// assert_eq!(Category::Documents.dir_name(), "documents");
    /// assert_eq!(Category::Misc.dir_name(), "misc");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "documents",
            Category::Images => "images",
            Category::Audio => "audio",
            Category::Videos => "videos",
            Category::Archives => "archives",
            Category::Code => "code",
            Category::Misc => "misc",
        }
    }

    /// Returns the name used for this category in the summary report.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Audio => "Audio",
            Category::Videos => "Videos",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Misc => "Miscellaneous",
        }
    }

    /// Returns the dotted, lowercase extensions belonging to this category.
    ///
    /// `Misc` owns no extensions; it catches everything unmatched.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Documents => &[".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt"],
            Category::Images => &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"],
            Category::Audio => &[".mp3", ".wav", ".flac", ".m4a"],
            Category::Videos => &[".mp4", ".avi", ".mkv", ".mov"],
            Category::Archives => &[".zip", ".rar", ".7z", ".tar", ".gz"],
            Category::Code => &[".py", ".js", ".html", ".css", ".java", ".cpp"],
            Category::Misc => &[],
        }
    }
}

/// Immutable extension lookup table handed to the organizer.
///
/// Built once at startup from the per-category extension sets. Should the
/// same extension ever appear in more than one category, the first category
/// in [`Category::ALL`] order wins; the shipped sets are disjoint.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    extension_map: HashMap<String, Category>,
}

impl CategoryTable {
    /// Creates the table from the fixed per-category extension sets.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();
        for category in Category::ALL {
            for ext in category.extensions() {
                extension_map.entry((*ext).to_string()).or_insert(category);
            }
        }
        Self { extension_map }
    }

    /// Classifies a dotted extension into its category.
    ///
    /// Total over all strings: matching is case-insensitive, and anything
    /// without a table entry (the empty string included) is `Misc`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyshelf::file_category::{Category, CategoryTable};
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.classify(".mp3"), Category::Audio);
    /// assert_eq!(table.classify(""), Category::Misc);
    /// ```
    pub fn classify(&self, extension: &str) -> Category {
        self.extension_map
            .get(&extension.to_lowercase())
            .copied()
            .unwrap_or(Category::Misc)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Documents.dir_name(), "documents");
        assert_eq!(Category::Images.dir_name(), "images");
        assert_eq!(Category::Audio.dir_name(), "audio");
        assert_eq!(Category::Videos.dir_name(), "videos");
        assert_eq!(Category::Archives.dir_name(), "archives");
        assert_eq!(Category::Code.dir_name(), "code");
        assert_eq!(Category::Misc.dir_name(), "misc");
    }

    #[test]
    fn test_category_display_names() {
        assert_eq!(Category::Documents.display_name(), "Documents");
        assert_eq!(Category::Misc.display_name(), "Miscellaneous");
    }

    #[test]
    fn test_classify_documents() {
        let table = CategoryTable::default();
        for ext in [".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt"] {
            assert_eq!(table.classify(ext), Category::Documents, "{ext}");
        }
    }

    #[test]
    fn test_classify_every_table_extension() {
        let table = CategoryTable::default();
        for category in Category::ALL {
            for ext in category.extensions() {
                assert_eq!(table.classify(ext), category, "{ext}");
            }
        }
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(table.classify(".JPG"), Category::Images);
        assert_eq!(table.classify(".Jpg"), Category::Images);
        assert_eq!(table.classify(".PDF"), Category::Documents);
        assert_eq!(table.classify(".7Z"), Category::Archives);
    }

    #[test]
    fn test_classify_unknown_is_misc() {
        let table = CategoryTable::default();
        assert_eq!(table.classify(".xyz"), Category::Misc);
        assert_eq!(table.classify(".log"), Category::Misc);
        assert_eq!(table.classify("pdf"), Category::Misc); // dot is part of the key
    }

    #[test]
    fn test_classify_empty_string_is_misc() {
        let table = CategoryTable::default();
        assert_eq!(table.classify(""), Category::Misc);
    }

    #[test]
    fn test_extension_sets_are_disjoint() {
        let mut seen = HashMap::new();
        for category in Category::ALL {
            for ext in category.extensions() {
                let previous = seen.insert(*ext, category);
                assert!(previous.is_none(), "{ext} appears in two categories");
            }
        }
    }
}
