/// The descriptive block shown for a file before asking what to do with it.
use crate::classifier::extension_of;
use std::fmt;
use std::io;
use std::path::Path;

const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Name, extension and size of a file, read from disk when created.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub name: String,
    pub extension: String,
    pub size_bytes: u64,
}

impl FileSummary {
    /// Reads the summary of `path` from the filesystem.
    pub fn read(path: &Path) -> io::Result<Self> {
        let metadata = path.metadata()?;
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            extension: extension_of(path),
            size_bytes: metadata.len(),
        })
    }

    /// Size in decimal megabytes, rounded to two decimals.
    pub fn size_mb(&self) -> f64 {
        (self.size_bytes as f64 / BYTES_PER_MEGABYTE * 100.0).round() / 100.0
    }

    /// The size as shown to the user. Whole values keep one decimal
    /// (`2.0`, `0.0`).
    pub fn size_text(&self) -> String {
        let mb = self.size_mb();
        if mb.fract() == 0.0 {
            format!("{:.1}", mb)
        } else {
            mb.to_string()
        }
    }

    /// The one-line description, without framing.
    pub fn line(&self) -> String {
        format!(
            "File: {} | File format: {} | File size: {} Megabytes",
            self.name,
            self.extension,
            self.size_text()
        )
    }
}

/// Renders the summary framed by separator lines as wide as the text.
impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line();
        let rule = "-".repeat(line.chars().count());
        write!(f, "\n{}\n{}\n{}", rule, line, rule)
    }
}
