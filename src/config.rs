//! User configuration for folder mappings and file filtering.
//!
//! Configuration is optional. When present it is a TOML file that can add or
//! override extension mappings, keep files out of a run, and turn on content
//! sniffing for files without an extension.
//!
//! # Configuration File Format
//!
//! ```toml
//! [folders]
//! ".heic" = "Images"
//! "blend" = "3D"
//!
//! [filters]
//! enable_hidden_files = false
//! exclude_filenames = [".DS_Store", "Thumbs.db"]
//! exclude_extensions = ["part", "crdownload"]
//! exclude_patterns = ["*.tmp"]
//! exclude_regex = []
//!
//! [classify]
//! sniff_content = false
//! ```

use crate::classifier::Classifier;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".filesorterrc.toml";

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    Invalid(String),
    /// A glob pattern could not be parsed.
    InvalidGlobPattern(String),
    /// A regex could not be compiled.
    InvalidRegexPattern {
        pattern: String,
        reason: String,
    },
    /// The file exists but could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, as deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SorterConfig {
    /// Extension to folder overrides, layered over the built-in table.
    #[serde(default)]
    pub folders: BTreeMap<String, String>,

    #[serde(default)]
    pub filters: FilterRules,

    #[serde(default)]
    pub classify: ClassifyOptions,
}

/// Which files a run leaves alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether files starting with "." are sorted. Off by default.
    #[serde(default)]
    pub enable_hidden_files: bool,

    /// Exact filenames to leave alone.
    #[serde(default)]
    pub exclude_filenames: Vec<String>,

    /// Extensions to leave alone, with or without the leading dot.
    #[serde(default)]
    pub exclude_extensions: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Regexes matched against the file name.
    #[serde(default)]
    pub exclude_regex: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyOptions {
    /// Detect the type of extensionless files from their content.
    #[serde(default)]
    pub sniff_content: bool,
}

impl SorterConfig {
    /// Loads configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given
    /// 2. `.filesorterrc.toml` in the current directory
    /// 3. `~/.config/filesorter/config.toml`
    /// 4. built-in defaults
    ///
    /// # Errors
    ///
    /// Fails if a file is found (or explicitly named) but cannot be read or
    /// parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("filesorter")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// The built-in classifier with this configuration's folder overrides
    /// applied.
    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        let mut classifier = Classifier::default();
        for (ext, folder) in &self.folders {
            let folder = folder.trim();
            if ext.trim().is_empty() || folder.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "empty extension or folder in mapping '{}' = '{}'",
                    ext, folder
                )));
            }
            if folder.contains(['/', '\\']) || folder == "." || folder == ".." {
                return Err(ConfigError::Invalid(format!(
                    "folder '{}' for '{}' must be a plain folder name",
                    folder, ext
                )));
            }
            classifier.add_mapping(ext, folder);
        }
        Ok(classifier)
    }

    /// Compiles the filter rules for matching.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.filters)
    }
}

/// Filter rules with patterns parsed up front.
pub struct CompiledFilters {
    enable_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude_regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enable_hidden_files: rules.enable_hidden_files,
            exclude_filenames: rules.exclude_filenames.iter().cloned().collect(),
            exclude_extensions: rules
                .exclude_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Whether a file should be handed to the sorter.
    ///
    /// Checks run in order: hidden files, exact names, extensions, globs,
    /// regexes. Anything not excluded is included.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension()
            && self
                .exclude_extensions
                .contains(&ext.to_string_lossy().to_lowercase())
        {
            return false;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name))
        {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }
}

impl Default for CompiledFilters {
    fn default() -> Self {
        Self {
            enable_hidden_files: false,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }
}
