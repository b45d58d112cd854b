//! filesorter - sort the files of a directory into folders by file type
//!
//! This library provides the extension classifier, the per-file sorter with
//! its automatic and interactive modes, TOML configuration for folder mappings
//! and filters, and the directory walker behind the `filesorter` binary.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod events;
pub mod file_mover;
pub mod file_summary;
pub mod menu;
pub mod output;
pub mod sorter;

pub use classifier::{Classifier, DEFAULT_FOLDER};
pub use config::{CompiledFilters, ConfigError, SorterConfig};
pub use events::{EventSink, MemorySink, SortEvent};
pub use menu::{Console, MenuChoice, Mode, Prompt};
pub use sorter::{FailureKind, SortError, SortOutcome, Sorter};

pub use cli::{Args, run_cli};
