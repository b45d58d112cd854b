//! Extension-based classification of files into destination folders.
//!
//! Extensions are handled in the form produced by a path suffix, leading dot
//! included (`".jpg"`), and compared case-insensitively. Anything the table
//! does not know about lands in [`DEFAULT_FOLDER`].
//!
//! # Examples
//!
//! ```
//! use filesorter::classifier::Classifier;
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.resolve(".png"), "Images");
//! assert_eq!(classifier.resolve(".PDF"), "Documents");
//! assert_eq!(classifier.resolve(".nope"), "Other");
//! ```
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Folder used for every extension without a mapping.
pub const DEFAULT_FOLDER: &str = "Other";

/// Maps file extensions to destination folder names.
#[derive(Debug, Clone)]
pub struct Classifier {
    folders: HashMap<String, String>,
}

impl Classifier {
    /// Creates a classifier with the built-in extension table.
    pub fn new() -> Self {
        let mut classifier = Self::empty();
        classifier.populate_standard_mappings();
        classifier
    }

    /// Creates a classifier without any mapping: everything resolves to
    /// [`DEFAULT_FOLDER`].
    pub fn empty() -> Self {
        Self {
            folders: HashMap::new(),
        }
    }

    fn populate_standard_mappings(&mut self) {
        const TABLE: &[(&str, &[&str])] = &[
            (
                "Images",
                &[
                    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tif", "tiff", "ico",
                    "heic", "heif", "raw", "psd",
                ],
            ),
            (
                "Videos",
                &["mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "m4v", "3gp", "mpeg"],
            ),
            (
                "Audio",
                &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma", "opus", "mid"],
            ),
            (
                "Documents",
                &["pdf", "txt", "doc", "docx", "odt", "rtf", "md", "tex", "epub"],
            ),
            (
                "Spreadsheets",
                &["csv", "tsv", "xls", "xlsx", "ods"],
            ),
            ("Presentations", &["ppt", "pptx", "odp", "key"]),
            (
                "Archives",
                &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "tgz", "zst"],
            ),
            (
                "Code",
                &[
                    "rs", "py", "js", "ts", "java", "c", "h", "cpp", "hpp", "go", "rb", "sh",
                    "html", "css", "json", "xml", "yaml", "yml", "toml", "sql",
                ],
            ),
            ("Fonts", &["ttf", "otf", "woff", "woff2"]),
            (
                "Executables",
                &["exe", "msi", "dmg", "pkg", "deb", "rpm", "appimage", "apk"],
            ),
        ];

        for (folder, extensions) in TABLE {
            for ext in *extensions {
                self.add_mapping(ext, folder);
            }
        }
    }

    /// Adds or replaces the folder for an extension.
    ///
    /// The extension is lowercased and gets a leading dot if it has none, so
    /// `"JPG"`, `"jpg"` and `".jpg"` all name the same key.
    pub fn add_mapping(&mut self, ext: &str, folder: &str) {
        self.folders.insert(normalize(ext), folder.to_string());
    }

    /// Returns the folder name for an extension, or [`DEFAULT_FOLDER`].
    ///
    /// A mapping whose folder happens to be `"Other"` is indistinguishable
    /// from a miss.
    pub fn resolve(&self, ext: &str) -> &str {
        self.folders
            .get(&ext.to_lowercase())
            .map(String::as_str)
            .unwrap_or(DEFAULT_FOLDER)
    }

    /// Classifies a path by its suffix.
    pub fn resolve_path(&self, path: &Path) -> &str {
        self.resolve(&extension_of(path))
    }

    /// Distinct folder names known to this classifier, sorted, fallback included.
    pub fn folders(&self) -> Vec<&str> {
        let mut names: BTreeSet<&str> = self.folders.values().map(String::as_str).collect();
        names.insert(DEFAULT_FOLDER);
        names.into_iter().collect()
    }

    /// All mappings as `(extension, folder)` pairs, sorted by extension.
    pub fn mappings(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .folders
            .iter()
            .map(|(ext, folder)| (ext.as_str(), folder.as_str()))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the suffix of a path the way the classifier expects it: `".ext"`,
/// or an empty string when the file has no extension.
///
/// ```
/// use filesorter::classifier::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("a/photo.JPG")), ".JPG");
/// assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("Makefile")), "");
/// assert_eq!(extension_of(Path::new(".bashrc")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn normalize(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
