//! Command-line interface for filesorter.
//!
//! This module handles everything around the per-file sorter:
//! - Argument parsing
//! - Configuration loading
//! - Walking the target directory and filtering its files
//! - Calling the sorter once per file and tallying the results

use crate::classifier::Classifier;
use crate::config::{CompiledFilters, SorterConfig};
use crate::events::EventSink;
use crate::menu::{Console, Mode, Prompt};
use crate::output::{ConsoleSink, OutputFormatter, clear_console};
use crate::sorter::{SortOutcome, Sorter};
use chrono::{DateTime, Local};
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sort the files of a directory into folders by file type.
///
/// In auto mode every file is moved to the folder its extension maps to. In
/// manual mode each file is shown and you choose: auto sort, delete, skip, or
/// move it to a path of your choice.
#[derive(Parser, Debug, Clone)]
#[command(name = "filesorter")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory whose files should be sorted
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// How to sort each file
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Auto)]
    pub mode: Mode,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Clear the console before each file in manual mode
    #[arg(long = "clear", action = ArgAction::SetTrue)]
    pub clear: bool,

    /// Print the run summary as JSON instead of a table
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Print the extension to folder mapping and exit
    #[arg(long = "list-folders", action = ArgAction::SetTrue)]
    pub list_folders: bool,
}

/// Tally of one run over a directory. Printed, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub mode: Mode,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Destination folder name to number of files moved there.
    pub moved: BTreeMap<String, usize>,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failed_files: Vec<PathBuf>,
}

impl RunSummary {
    pub fn new(directory: PathBuf, mode: Mode) -> Self {
        Self {
            directory,
            mode,
            started_at: Local::now(),
            finished_at: None,
            moved: BTreeMap::new(),
            deleted: 0,
            skipped: 0,
            failed: 0,
            failed_files: Vec::new(),
        }
    }

    pub fn record(&mut self, file: &Path, outcome: &SortOutcome) {
        match outcome {
            SortOutcome::Moved(destination) => {
                let folder = destination
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                *self.moved.entry(folder).or_insert(0) += 1;
            }
            SortOutcome::Deleted => self.deleted += 1,
            SortOutcome::Skipped => self.skipped += 1,
            SortOutcome::Failed(_) => {
                self.failed += 1;
                self.failed_files.push(file.to_path_buf());
            }
        }
    }

    pub fn moved_total(&self) -> usize {
        self.moved.values().sum()
    }

    pub fn total(&self) -> usize {
        self.moved_total() + self.deleted + self.skipped + self.failed
    }

    fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }
}

/// Options for one pass over a directory.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    pub mode: Mode,
    /// Clear the console before each file (manual mode only).
    pub clear_console: bool,
}

/// Runs the CLI with parsed arguments.
///
/// # Errors
///
/// Only setup problems are errors: a bad directory or a bad configuration.
/// Files that cannot be sorted are reported and counted, and the run carries
/// on.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use filesorter::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["filesorter", "/home/me/Downloads", "--mode", "auto"]);
/// if let Err(e) = run_cli(&args) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(args: &Args) -> Result<(), String> {
    let config = SorterConfig::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let classifier = config
        .classifier()
        .map_err(|e| format!("Error in folder mapping: {}", e))?;

    if args.list_folders {
        print_mappings(&classifier);
        return Ok(());
    }

    if args.json && args.mode == Mode::Manual {
        return Err("--json cannot be combined with --mode manual".to_string());
    }

    if !args.directory.is_dir() {
        return Err(format!("{} is not a directory", args.directory.display()));
    }

    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;
    let files = collect_files(&args.directory, &filters)?;

    if !args.json {
        OutputFormatter::info(&format!(
            "Sorting contents of: {} ({} mode)",
            args.directory.display(),
            args.mode
        ));
        if files.is_empty() {
            OutputFormatter::plain("No files found to sort.");
            return Ok(());
        }
    }

    let sink = if args.json {
        ConsoleSink::errors_only()
    } else if args.mode == Mode::Auto {
        ConsoleSink::with_progress(OutputFormatter::create_progress_bar(files.len() as u64))
    } else {
        ConsoleSink::new()
    };
    let mut sorter = Sorter::new(&classifier, sink).with_content_sniffing(config.classify.sniff_content);
    let mut prompt = Console::stdio();
    let options = WalkOptions {
        mode: args.mode,
        clear_console: args.clear,
    };

    let summary = sort_files(&args.directory, &files, &mut sorter, &mut prompt, options);

    if let Some(pb) = sorter.sink().progress() {
        pb.finish_and_clear();
    }

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Error serializing summary: {}", e))?;
        println!("{}", json);
    } else {
        OutputFormatter::summary_table(&summary);
        OutputFormatter::completion(&summary);
    }

    Ok(())
}

/// Lists the regular files directly inside `dir` that pass `filters`,
/// sorted by path.
pub fn collect_files(dir: &Path, filters: &CompiledFilters) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Error reading directory {}: {}", dir.display(), e))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| filters.should_include(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Sorts `files` one after the other and returns the tally.
///
/// Files are handled strictly in sequence; each one is finished, prompt
/// included, before the next starts.
pub fn sort_files<S: EventSink, P: Prompt>(
    directory: &Path,
    files: &[PathBuf],
    sorter: &mut Sorter<'_, S>,
    prompt: &mut P,
    options: WalkOptions,
) -> RunSummary {
    let mut summary = RunSummary::new(directory.to_path_buf(), options.mode);

    for file in files {
        if options.clear_console && options.mode == Mode::Manual {
            clear_console().ok();
        }
        let outcome = sorter.sort(file, options.mode, prompt);
        summary.record(file, &outcome);
        sorter.sink_mut().file_done();
    }

    summary.finish();
    summary
}

/// Sorts every eligible file of `dir`. Convenience over [`collect_files`] and
/// [`sort_files`].
pub fn sort_directory<S: EventSink, P: Prompt>(
    dir: &Path,
    filters: &CompiledFilters,
    sorter: &mut Sorter<'_, S>,
    prompt: &mut P,
    options: WalkOptions,
) -> Result<RunSummary, String> {
    let files = collect_files(dir, filters)?;
    Ok(sort_files(dir, &files, sorter, prompt, options))
}

fn print_mappings(classifier: &Classifier) {
    let mut by_folder: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (ext, folder) in classifier.mappings() {
        by_folder.entry(folder).or_default().push(ext);
    }

    OutputFormatter::header("FOLDERS");
    for (folder, extensions) in &by_folder {
        println!("{:<14} {}", folder, extensions.join(" "));
    }
    OutputFormatter::plain(&format!(
        "{:<14} (everything else)",
        crate::classifier::DEFAULT_FOLDER
    ));
}
