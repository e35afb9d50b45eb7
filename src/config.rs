//! File exclusion configuration.
//!
//! Loads optional TOML rules describing files the organizer should leave in
//! place. Three exclusion strategies are supported:
//! - exact filename matching
//! - glob pattern matching
//! - file extension matching
//!
//! # Configuration File Format
//!
//! ```toml
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.partial"]
//! extensions = ["tmp", "bak"]
//! ```
//!
//! Without a configuration file nothing is excluded; the category table
//! itself is fixed at build time and not configurable here.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the current directory when no
/// explicit path is given.
const LOCAL_CONFIG_FILE: &str = ".tidyshelf.toml";

/// Errors that can occur during configuration loading and filtering.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for file exclusion rules.
///
/// Deserialized from TOML; the default excludes nothing, so every regular
/// file in the source directory is organized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// Root-level filter rules configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Rules for excluding files from organization.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to leave in place (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to leave in place (e.g., "*.partial").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// File extensions (without the dot) to leave in place.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl FilterConfig {
    /// Load configuration, falling back to the empty default.
    ///
    /// Lookup order:
    /// 1. an explicitly provided path (missing or malformed files are errors)
    /// 2. `.tidyshelf.toml` in the current directory
    /// 3. the default configuration, which excludes nothing
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile the rules into matcher structures, validating glob patterns.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

/// Compiled filter structures for efficient per-file matching.
///
/// Glob patterns are validated and parsed once at compile time rather than
/// on every file.
pub struct CompiledFilters {
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_patterns,
        })
    }

    /// Check if a file should be considered for organization.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Exact filename match - if matched, exclude
    /// 2. File extension match (case-insensitive) - if matched, exclude
    /// 3. Glob pattern match - if matched, exclude
    /// 4. Default: include
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_excludes_nothing() {
        let compiled = FilterConfig::default().compile().unwrap();

        assert!(compiled.should_include(Path::new("photo.jpg")));
        assert!(compiled.should_include(Path::new(".hidden")));
        assert!(compiled.should_include(Path::new("no_extension")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    filenames: vec!["Thumbs.db".to_string(), ".DS_Store".to_string()],
                    ..Default::default()
                },
            },
        };
        let compiled = config.compile().unwrap();

        assert!(!compiled.should_include(Path::new("Thumbs.db")));
        assert!(!compiled.should_include(Path::new(".DS_Store")));
        assert!(compiled.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    extensions: vec!["bak".to_string(), "tmp".to_string()],
                    ..Default::default()
                },
            },
        };
        let compiled = config.compile().unwrap();

        assert!(!compiled.should_include(Path::new("file.bak")));
        assert!(!compiled.should_include(Path::new("file.TMP")));
        assert!(compiled.should_include(Path::new("file.txt")));
    }

    #[test]
    fn test_exclude_glob_patterns() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["*.partial".to_string(), "download_[0-9]*".to_string()],
                    ..Default::default()
                },
            },
        };
        let compiled = config.compile().unwrap();

        assert!(!compiled.should_include(Path::new("movie.mkv.partial")));
        assert!(!compiled.should_include(Path::new("download_42")));
        assert!(compiled.should_include(Path::new("movie.mkv")));
        assert!(compiled.should_include(Path::new("download_a")));
    }

    #[test]
    fn test_invalid_glob_pattern_returns_error() {
        let config = FilterConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[invalid".to_string()],
                    ..Default::default()
                },
            },
        };

        let result = config.compile();
        assert!(matches!(result, Err(ConfigError::InvalidGlobPattern(_))));
    }

    #[test]
    fn test_load_explicit_missing_file_is_an_error() {
        let result = FilterConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "[filters.exclude]\nfilenames = [\"skip.me\"]\nextensions = [\"tmp\"]"
        )
        .expect("Failed to write config");

        let config = FilterConfig::load(Some(file.path())).expect("Failed to load config");
        let compiled = config.compile().unwrap();

        assert!(!compiled.should_include(Path::new("skip.me")));
        assert!(!compiled.should_include(Path::new("x.tmp")));
        assert!(compiled.should_include(Path::new("keep.txt")));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "filters = not-toml").expect("Failed to write config");

        let result = FilterConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }
}
