//! What the sorter reports while it works.
//!
//! The sorter never prints. Every folder creation, move, deletion, skip and
//! failure is handed to an [`EventSink`] supplied by the caller, which decides
//! where the record goes: the console (see `output::ConsoleSink`) or memory
//! ([`MemorySink`]).

use crate::sorter::SortError;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;

/// Severity of a [`SortEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A single record emitted by the sorter.
#[derive(Debug)]
pub enum SortEvent {
    /// A destination folder did not exist and was created.
    FolderCreated { path: PathBuf },
    /// A file was moved.
    Moved { file: PathBuf, destination: PathBuf },
    /// A file was removed from disk.
    Deleted { file: PathBuf },
    /// The user chose to leave a file where it is.
    Skipped { file: PathBuf },
    /// Something went wrong; the file was left as it was.
    Failed(SortError),
}

impl SortEvent {
    pub fn level(&self) -> Level {
        match self {
            SortEvent::Failed(_) => Level::Error,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for SortEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortEvent::FolderCreated { path } => {
                write!(f, "Creating folder: {}", display_name(path))
            }
            SortEvent::Moved { file, destination } => write!(
                f,
                "Moved {} to {}",
                display_name(file),
                destination
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            SortEvent::Deleted { file } => write!(
                f,
                "Deleted {} from {}",
                display_name(file),
                parent_display(file)
            ),
            SortEvent::Skipped { file } => write!(
                f,
                "Skipped {} in {}",
                display_name(file),
                parent_display(file)
            ),
            SortEvent::Failed(error) => write!(f, "{}", error),
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn parent_display(path: &std::path::Path) -> String {
    path.parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Receives the sorter's events.
pub trait EventSink {
    fn record(&mut self, event: SortEvent);

    /// Called by the directory walker after each file has been handled.
    fn file_done(&mut self) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: SortEvent) {
        (**self).record(event)
    }

    fn file_done(&mut self) {
        (**self).file_done()
    }
}

/// An event together with the local time it was recorded.
#[derive(Debug)]
pub struct Recorded {
    pub at: DateTime<Local>,
    pub event: SortEvent,
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<Recorded>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortEvent> {
        self.events.iter().map(|r| &r.event)
    }

    pub fn errors(&self) -> impl Iterator<Item = &SortEvent> {
        self.iter().filter(|e| e.level() == Level::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: SortEvent) {
        self.events.push(Recorded {
            at: Local::now(),
            event,
        });
    }
}
