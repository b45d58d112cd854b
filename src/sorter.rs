//! Sorting a single file.
//!
//! [`Sorter::sort`] is the decision-and-action routine: it validates the file,
//! resolves and creates its destination folder, then either moves it straight
//! away ([`Mode::Auto`]) or shows it to the user and carries out the chosen
//! action ([`Mode::Manual`]). Nothing here panics or returns `Err` for a bad
//! file: every failure is recorded through the [`EventSink`] and reflected in
//! the returned [`SortOutcome`], so a caller walking many files can carry on.

use crate::classifier::{Classifier, extension_of};
use crate::events::{EventSink, SortEvent};
use crate::file_mover::{FileMover, MoveOutcome};
use crate::file_summary::FileSummary;
use crate::menu::{CUSTOM_PATH_PROMPT, MENU, MenuChoice, Mode, Prompt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reasons a file could not be sorted.
#[derive(Debug)]
pub enum SortError {
    /// The path does not point to an existing regular file.
    InvalidFile(PathBuf),
    /// The destination already holds an entry with the file's name.
    NameCollision { file: PathBuf, destination: PathBuf },
    /// Moving the file failed for another reason.
    MoveFailure {
        file: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
    /// The custom destination typed by the user is not an existing directory.
    InvalidCustomPath(String),
    /// The menu answer was none of the offered options.
    InvalidMenuChoice(String),
    /// The classified destination folder could not be created.
    DirectoryCreation { path: PathBuf, source: io::Error },
    /// Deleting the file failed.
    DeleteFailure { file: PathBuf, source: io::Error },
    /// Talking to the user failed (closed input, broken output).
    Input(io::Error),
}

impl SortError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SortError::InvalidFile(_) => FailureKind::InvalidFile,
            SortError::NameCollision { .. } => FailureKind::NameCollision,
            SortError::MoveFailure { .. } => FailureKind::MoveFailure,
            SortError::InvalidCustomPath(_) => FailureKind::InvalidCustomPath,
            SortError::InvalidMenuChoice(_) => FailureKind::InvalidMenuChoice,
            SortError::DirectoryCreation { .. } => FailureKind::DirectoryCreation,
            SortError::DeleteFailure { .. } => FailureKind::DeleteFailure,
            SortError::Input(_) => FailureKind::Input,
        }
    }
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFile(path) => write!(f, "{} is not a valid file.", path.display()),
            Self::NameCollision { file, destination } => write!(
                f,
                "File {} already exists in {} folder",
                name_of(file),
                destination
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            Self::MoveFailure {
                file,
                destination,
                source,
            } => write!(
                f,
                "Error moving file {} to {}: {}",
                name_of(file),
                destination.display(),
                source
            ),
            Self::InvalidCustomPath(path) => {
                write!(f, "Path {} does not exist or is not a directory", path)
            }
            Self::InvalidMenuChoice(input) => write!(f, "Invalid Input: {}", input),
            Self::DirectoryCreation { path, source } => {
                write!(f, "Failed to create folder {}: {}", path.display(), source)
            }
            Self::DeleteFailure { file, source } => {
                write!(f, "Failed to delete {}: {}", file.display(), source)
            }
            Self::Input(source) => write!(f, "Could not read input: {}", source),
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MoveFailure { source, .. }
            | Self::DirectoryCreation { source, .. }
            | Self::DeleteFailure { source, .. }
            | Self::Input(source) => Some(source),
            _ => None,
        }
    }
}

/// The category of a [`SortError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidFile,
    NameCollision,
    MoveFailure,
    InvalidCustomPath,
    InvalidMenuChoice,
    DirectoryCreation,
    DeleteFailure,
    Input,
}

/// What happened to a file after [`Sorter::sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// The file was moved to this path.
    Moved(PathBuf),
    Deleted,
    Skipped,
    /// Nothing was changed; the full error went to the event sink.
    Failed(FailureKind),
}

/// Work the manual handler hands back to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delegation {
    AutoSort,
}

/// The result of handling one manual-mode answer.
#[derive(Debug)]
pub enum ManualDecision {
    /// The user asked for the automatic move; the dispatcher performs it.
    Delegate(Delegation),
    Deleted,
    Skipped,
    MovedTo(PathBuf),
    Rejected(SortError),
}

/// Sorts files one at a time into folders chosen by a [`Classifier`].
pub struct Sorter<'c, S> {
    classifier: &'c Classifier,
    sink: S,
    sniff_content: bool,
}

impl<'c, S: EventSink> Sorter<'c, S> {
    pub fn new(classifier: &'c Classifier, sink: S) -> Self {
        Self {
            classifier,
            sink,
            sniff_content: false,
        }
    }

    /// When enabled, files without an extension are classified by the type
    /// detected from their content.
    pub fn with_content_sniffing(mut self, enabled: bool) -> Self {
        self.sniff_content = enabled;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Name of the folder `file` belongs in.
    pub fn target_folder(&self, file: &Path) -> &'c str {
        let mut ext = extension_of(file).to_lowercase();
        if ext.is_empty() && self.sniff_content {
            ext = sniffed_extension(file).unwrap_or_default();
        }
        self.classifier.resolve(&ext)
    }

    /// Sorts `file` according to `mode`.
    ///
    /// `prompt` is only used in manual mode.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filesorter::classifier::Classifier;
    /// use filesorter::events::MemorySink;
    /// use filesorter::menu::{Console, Mode};
    /// use filesorter::sorter::Sorter;
    /// use std::path::Path;
    ///
    /// let classifier = Classifier::default();
    /// let mut sorter = Sorter::new(&classifier, MemorySink::new());
    /// let outcome = sorter.sort(Path::new("/home/me/Downloads/a.png"), Mode::Manual, &mut Console::stdio());
    /// println!("{:?}", outcome);
    /// ```
    pub fn sort<P: Prompt>(&mut self, file: &Path, mode: Mode, prompt: &mut P) -> SortOutcome {
        if !file.is_file() {
            return self.fail(SortError::InvalidFile(file.to_path_buf()));
        }

        let target = match self.prepare_target(file) {
            Ok(target) => target,
            Err(e) => return self.fail(e),
        };

        let decision = match mode {
            Mode::Auto => ManualDecision::Delegate(Delegation::AutoSort),
            Mode::Manual => self.decide(file, prompt),
        };

        match decision {
            ManualDecision::Delegate(Delegation::AutoSort) => self.move_to(file, &target),
            ManualDecision::Deleted => {
                self.sink.record(SortEvent::Deleted {
                    file: file.to_path_buf(),
                });
                SortOutcome::Deleted
            }
            ManualDecision::Skipped => {
                self.sink.record(SortEvent::Skipped {
                    file: file.to_path_buf(),
                });
                SortOutcome::Skipped
            }
            ManualDecision::MovedTo(destination) => {
                self.sink.record(SortEvent::Moved {
                    file: file.to_path_buf(),
                    destination: destination.clone(),
                });
                SortOutcome::Moved(destination)
            }
            ManualDecision::Rejected(error) => self.fail(error),
        }
    }

    /// Shorthand for an automatic sort, which never reads input.
    pub fn sort_auto(&mut self, file: &Path) -> SortOutcome {
        self.sort(file, Mode::Auto, &mut NoPrompt)
    }

    /// Computes `<parent>/<folder>` and creates it when missing.
    fn prepare_target(&mut self, file: &Path) -> Result<PathBuf, SortError> {
        let folder = self.target_folder(file);
        let target = file.parent().unwrap_or_else(|| Path::new("")).join(folder);

        match FileMover::ensure_dir(&target) {
            Ok(true) => {
                self.sink.record(SortEvent::FolderCreated {
                    path: target.clone(),
                });
                Ok(target)
            }
            Ok(false) => Ok(target),
            Err(source) => Err(SortError::DirectoryCreation {
                path: target,
                source,
            }),
        }
    }

    fn move_to(&mut self, file: &Path, dir: &Path) -> SortOutcome {
        match FileMover::move_into(file, dir) {
            MoveOutcome::Moved(destination) => {
                self.sink.record(SortEvent::Moved {
                    file: file.to_path_buf(),
                    destination: destination.clone(),
                });
                SortOutcome::Moved(destination)
            }
            MoveOutcome::NameCollision(destination) => self.fail(SortError::NameCollision {
                file: file.to_path_buf(),
                destination,
            }),
            MoveOutcome::Failed { destination, error } => self.fail(SortError::MoveFailure {
                file: file.to_path_buf(),
                destination,
                source: error,
            }),
        }
    }

    /// Shows the file, asks for an action and carries out everything except
    /// the automatic move, which is handed back as a delegation.
    fn decide<P: Prompt>(&self, file: &Path, prompt: &mut P) -> ManualDecision {
        let summary = match FileSummary::read(file) {
            Ok(summary) => summary,
            Err(_) => return ManualDecision::Rejected(SortError::InvalidFile(file.to_path_buf())),
        };

        let answer = prompt
            .show(&summary.to_string())
            .and_then(|()| prompt.ask(MENU));
        let answer = match answer {
            Ok(answer) => answer,
            Err(e) => return ManualDecision::Rejected(SortError::Input(e)),
        };

        match MenuChoice::parse(&answer) {
            MenuChoice::AutoSort => ManualDecision::Delegate(Delegation::AutoSort),
            MenuChoice::Delete => match fs::remove_file(file) {
                Ok(()) => ManualDecision::Deleted,
                Err(source) => ManualDecision::Rejected(SortError::DeleteFailure {
                    file: file.to_path_buf(),
                    source,
                }),
            },
            MenuChoice::Skip => ManualDecision::Skipped,
            MenuChoice::CustomPath => Self::move_to_custom_path(file, prompt),
            MenuChoice::Unrecognized(input) => {
                ManualDecision::Rejected(SortError::InvalidMenuChoice(input))
            }
        }
    }

    fn move_to_custom_path<P: Prompt>(file: &Path, prompt: &mut P) -> ManualDecision {
        let raw = match prompt.ask(CUSTOM_PATH_PROMPT) {
            Ok(raw) => raw,
            Err(e) => return ManualDecision::Rejected(SortError::Input(e)),
        };
        let dir = PathBuf::from(raw.trim());

        if raw.trim().is_empty() || !dir.is_dir() {
            return ManualDecision::Rejected(SortError::InvalidCustomPath(raw));
        }

        match FileMover::move_into(file, &dir) {
            MoveOutcome::Moved(destination) => ManualDecision::MovedTo(destination),
            MoveOutcome::NameCollision(destination) => {
                ManualDecision::Rejected(SortError::NameCollision {
                    file: file.to_path_buf(),
                    destination,
                })
            }
            MoveOutcome::Failed { destination, error } => {
                ManualDecision::Rejected(SortError::MoveFailure {
                    file: file.to_path_buf(),
                    destination,
                    source: error,
                })
            }
        }
    }

    fn fail(&mut self, error: SortError) -> SortOutcome {
        let kind = error.kind();
        self.sink.record(SortEvent::Failed(error));
        SortOutcome::Failed(kind)
    }
}

/// Prompt for code paths that never ask anything.
struct NoPrompt;

impl Prompt for NoPrompt {
    fn show(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn ask(&mut self, _question: &str) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "automatic sorting does not take input",
        ))
    }
}

/// Extension guessed from the file's leading bytes, as `".ext"`.
fn sniffed_extension(file: &Path) -> Option<String> {
    infer::get_from_path(file)
        .ok()
        .flatten()
        .map(|kind| format!(".{}", kind.extension()))
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Level, MemorySink};
    use crate::menu::Console;
    use std::io::Cursor;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    fn last_error(sink: &MemorySink) -> Option<FailureKind> {
        sink.errors().last().and_then(|e| match e {
            SortEvent::Failed(err) => Some(err.kind()),
            _ => None,
        })
    }

    #[test]
    fn test_auto_creates_folder_and_moves() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "photo.JPG", b"data");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort_auto(&file);

        let expected = temp_dir.path().join("Images").join("photo.JPG");
        assert_eq!(outcome, SortOutcome::Moved(expected.clone()));
        assert!(expected.exists());
        assert!(!file.exists());

        let sink = sorter.into_sink();
        assert!(matches!(
            sink.events[0].event,
            SortEvent::FolderCreated { .. }
        ));
        assert!(matches!(sink.events[1].event, SortEvent::Moved { .. }));
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_auto_unknown_extension_goes_to_other() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "data.weird", b"data");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        sorter.sort_auto(&file);
        assert!(temp_dir.path().join("Other").join("data.weird").exists());
    }

    #[test]
    fn test_folder_created_once_for_two_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let first = write_file(temp_dir.path(), "a.pdf", b"1");
        let second = write_file(temp_dir.path(), "b.txt", b"2");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        assert!(matches!(sorter.sort_auto(&first), SortOutcome::Moved(_)));
        assert!(matches!(sorter.sort_auto(&second), SortOutcome::Moved(_)));

        let created = sorter
            .sink()
            .iter()
            .filter(|e| matches!(e, SortEvent::FolderCreated { .. }))
            .count();
        assert_eq!(created, 1);
        assert!(temp_dir.path().join("Documents").join("a.pdf").exists());
        assert!(temp_dir.path().join("Documents").join("b.txt").exists());
    }

    #[test]
    fn test_auto_collision_leaves_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "song.mp3", b"new");
        fs::create_dir(temp_dir.path().join("Audio")).unwrap();
        write_file(&temp_dir.path().join("Audio"), "song.mp3", b"old");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort_auto(&file);

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::NameCollision));
        assert_eq!(fs::read(&file).unwrap(), b"new");
        assert_eq!(
            fs::read(temp_dir.path().join("Audio").join("song.mp3")).unwrap(),
            b"old"
        );
        assert_eq!(last_error(sorter.sink()), Some(FailureKind::NameCollision));
    }

    #[test]
    fn test_directory_is_not_a_valid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("folder.png");
        fs::create_dir(&dir).unwrap();
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort(&dir, Mode::Manual, &mut scripted("2\n"));

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::InvalidFile));
        assert!(dir.is_dir());
        assert!(!temp_dir.path().join("Images").exists());
        assert_eq!(sorter.sink().len(), 1);
    }

    #[test]
    fn test_missing_file_is_not_a_valid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort_auto(&temp_dir.path().join("ghost.txt"));
        assert_eq!(outcome, SortOutcome::Failed(FailureKind::InvalidFile));
        assert!(!temp_dir.path().join("Documents").exists());
    }

    #[test]
    fn test_blocked_target_folder_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "a.png", b"x");
        write_file(temp_dir.path(), "Images", b"a file, not a folder");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort_auto(&file);
        assert_eq!(outcome, SortOutcome::Failed(FailureKind::DirectoryCreation));
        assert!(file.exists());
    }

    #[test]
    fn test_manual_auto_sort_matches_auto_mode() {
        let manual_dir = TempDir::new().expect("Failed to create temp directory");
        let auto_dir = TempDir::new().expect("Failed to create temp directory");
        let manual_file = write_file(manual_dir.path(), "clip.mp4", b"v");
        let auto_file = write_file(auto_dir.path(), "clip.mp4", b"v");
        let classifier = Classifier::default();

        let mut manual = Sorter::new(&classifier, MemorySink::new());
        let manual_outcome = manual.sort(&manual_file, Mode::Manual, &mut scripted("1\n"));
        let mut auto = Sorter::new(&classifier, MemorySink::new());
        let auto_outcome = auto.sort_auto(&auto_file);

        assert_eq!(
            manual_outcome,
            SortOutcome::Moved(manual_dir.path().join("Videos").join("clip.mp4"))
        );
        assert_eq!(
            auto_outcome,
            SortOutcome::Moved(auto_dir.path().join("Videos").join("clip.mp4"))
        );
        assert!(!manual_file.exists());
        assert!(!auto_file.exists());
    }

    #[test]
    fn test_manual_delete() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "junk.zip", b"z");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted("2\n"));

        assert_eq!(outcome, SortOutcome::Deleted);
        assert!(!file.exists());
        assert!(!temp_dir.path().join("Archives").join("junk.zip").exists());
        assert!(
            sorter
                .sink()
                .iter()
                .any(|e| matches!(e, SortEvent::Deleted { .. }))
        );
    }

    #[test]
    fn test_manual_skip_leaves_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "keep.txt", b"k");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted("3\n"));

        assert_eq!(outcome, SortOutcome::Skipped);
        assert!(file.exists());
        let last = sorter.sink().iter().last().unwrap();
        assert!(matches!(last, SortEvent::Skipped { .. }));
        assert_eq!(last.level(), Level::Info);
    }

    #[test]
    fn test_manual_custom_path_moves_without_subfolder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "scan.pdf", b"p");
        let custom = temp_dir.path().join("Taxes");
        fs::create_dir(&custom).unwrap();
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let input = format!("4\n{}\n", custom.display());
        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted(&input));

        assert_eq!(outcome, SortOutcome::Moved(custom.join("scan.pdf")));
        assert!(custom.join("scan.pdf").exists());
        assert!(!custom.join("Documents").exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_manual_custom_path_not_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "scan.pdf", b"p");
        let not_dir = write_file(temp_dir.path(), "plain.file", b"f");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let input = format!("4\n{}\n", not_dir.display());
        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted(&input));

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::InvalidCustomPath));
        assert!(file.exists());
        assert!(not_dir.is_file());
        assert_eq!(
            last_error(sorter.sink()),
            Some(FailureKind::InvalidCustomPath)
        );
    }

    #[test]
    fn test_manual_custom_path_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "scan.pdf", b"p");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let input = format!("4\n{}\n", temp_dir.path().join("nowhere").display());
        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted(&input));

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::InvalidCustomPath));
        assert!(file.exists());
    }

    #[test]
    fn test_manual_custom_path_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "scan.pdf", b"new");
        let custom = temp_dir.path().join("Taxes");
        fs::create_dir(&custom).unwrap();
        write_file(&custom, "scan.pdf", b"old");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let input = format!("4\n{}\n", custom.display());
        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted(&input));

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::NameCollision));
        assert_eq!(fs::read(&file).unwrap(), b"new");
        assert_eq!(fs::read(custom.join("scan.pdf")).unwrap(), b"old");
    }

    #[test]
    fn test_manual_invalid_choice() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "a.txt", b"a");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted("7\n"));

        assert_eq!(outcome, SortOutcome::Failed(FailureKind::InvalidMenuChoice));
        assert!(file.exists());
        let message = sorter.sink().errors().last().unwrap().to_string();
        assert!(message.contains('7'));
    }

    #[test]
    fn test_manual_closed_input() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "a.txt", b"a");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        let outcome = sorter.sort(&file, Mode::Manual, &mut scripted(""));
        assert_eq!(outcome, SortOutcome::Failed(FailureKind::Input));
        assert!(file.exists());
    }

    #[test]
    fn test_manual_shows_summary_and_menu() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "a.txt", &vec![0u8; 1_500_000]);
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());
        let mut console = scripted("3\n");

        sorter.sort(&file, Mode::Manual, &mut console);

        let shown = String::from_utf8(console.into_output()).unwrap();
        assert!(shown.contains("File: a.txt | File format: .txt | File size: 1.5 Megabytes"));
        assert!(shown.contains("(2) Delete file"));
    }

    #[test]
    fn test_manual_mode_creates_target_folder_before_asking() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "a.csv", b"a,b");
        let classifier = Classifier::default();
        let mut sorter = Sorter::new(&classifier, MemorySink::new());

        sorter.sort(&file, Mode::Manual, &mut scripted("3\n"));
        assert!(temp_dir.path().join("Spreadsheets").is_dir());
    }

    #[test]
    fn test_content_sniffing_for_extensionless_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "IMG0001", PNG_HEADER);
        let classifier = Classifier::default();

        let plain = Sorter::new(&classifier, MemorySink::new());
        assert_eq!(plain.target_folder(&file), "Other");

        let sniffing = Sorter::new(&classifier, MemorySink::new()).with_content_sniffing(true);
        assert_eq!(sniffing.target_folder(&file), "Images");
    }

    #[test]
    fn test_content_sniffing_ignores_files_with_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_file(temp_dir.path(), "picture.dat", PNG_HEADER);
        let classifier = Classifier::default();

        let sniffing = Sorter::new(&classifier, MemorySink::new()).with_content_sniffing(true);
        assert_eq!(sniffing.target_folder(&file), "Other");
    }

    #[test]
    fn test_error_messages() {
        let err = SortError::InvalidMenuChoice("abc".to_string());
        assert_eq!(err.to_string(), "Invalid Input: abc");

        let err = SortError::NameCollision {
            file: PathBuf::from("/dl/a.mp3"),
            destination: PathBuf::from("/dl/Audio/a.mp3"),
        };
        assert_eq!(err.to_string(), "File a.mp3 already exists in /dl/Audio folder");
        assert_eq!(err.kind(), FailureKind::NameCollision);
    }
}
