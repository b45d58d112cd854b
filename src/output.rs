//! Console output.
//!
//! All terminal styling lives here: colored status lines, the progress bar,
//! the end-of-run summary table, and [`ConsoleSink`], which turns sorter
//! events into colored log lines.

use crate::cli::RunSummary;
use crate::events::{EventSink, Level, SortEvent};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// Styling for every line the CLI prints.
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn success_line(message: &str) -> String {
        format!("{} {}", "✓".green(), message)
    }

    pub fn error_line(message: &str) -> String {
        format!("{} {}", "✗".red(), message)
    }

    pub fn warning_line(message: &str) -> String {
        format!("{} {}", "⚠".yellow(), message)
    }

    pub fn info_line(message: &str) -> String {
        message.cyan().to_string()
    }

    /// Prints an error message in red to stderr.
    pub fn error(message: &str) {
        eprintln!("{}", Self::error_line(message));
    }

    pub fn info(message: &str) {
        println!("{}", Self::info_line(message));
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Progress bar for an automatic run over `total` files.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Prints how many files went where.
    ///
    /// ```no_run
    /// use filesorter::cli::RunSummary;
    /// use filesorter::output::OutputFormatter;
    ///
    /// let mut summary = RunSummary::new("/home/me/Downloads".into(), filesorter::Mode::Auto);
    /// summary.moved.insert("Images".to_string(), 3);
    /// OutputFormatter::summary_table(&summary);
    /// ```
    pub fn summary_table(summary: &RunSummary) {
        Self::header("SUMMARY");

        let mut rows: Vec<(String, usize)> = summary
            .moved
            .iter()
            .map(|(folder, count)| (format!("→ {}", folder), *count))
            .collect();
        rows.push(("Deleted".to_string(), summary.deleted));
        rows.push(("Skipped".to_string(), summary.skipped));
        rows.push(("Failed".to_string(), summary.failed));

        let width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(8);

        println!("{:<width$} | {}", "Outcome".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (name, count) in &rows {
            let count_text = if name == "Failed" && *count > 0 {
                count.to_string().red()
            } else {
                count.to_string().green()
            };
            println!(
                "{:<width$} | {} {}",
                name,
                count_text,
                files_word(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            summary.total().to_string().green().bold(),
            files_word(summary.total()),
            width = width
        );
    }

    /// The closing line of a run: a success line, or a warning when any
    /// file failed.
    pub fn completion_line(summary: &RunSummary) -> String {
        if summary.failed > 0 {
            Self::warning_line("Some files could not be sorted. Please review errors above.")
        } else {
            Self::success_line(&format!(
                "Handled {} {}",
                summary.total(),
                files_word(summary.total())
            ))
        }
    }

    pub fn completion(summary: &RunSummary) {
        println!("{}", Self::completion_line(summary));
    }
}

fn files_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

/// Clears the terminal and puts the cursor in the top-left corner.
pub fn clear_console() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1B[2J\x1B[1;1H")?;
    stdout.flush()
}

/// Writes sorter events to the terminal.
///
/// Errors go to stderr. With a progress bar attached, lines are printed above
/// the bar instead so it keeps redrawing cleanly.
#[derive(Default)]
pub struct ConsoleSink {
    progress: Option<ProgressBar>,
    errors_only: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
            errors_only: false,
        }
    }

    /// Sink that drops info events, for when stdout carries machine output.
    pub fn errors_only() -> Self {
        Self {
            progress: None,
            errors_only: true,
        }
    }

    pub fn progress(&self) -> Option<&ProgressBar> {
        self.progress.as_ref()
    }

    /// The styled line for an event.
    pub fn format(event: &SortEvent) -> String {
        let message = event.to_string();
        match event {
            SortEvent::FolderCreated { .. } => OutputFormatter::info_line(&message),
            SortEvent::Moved { .. } => OutputFormatter::success_line(&message),
            SortEvent::Deleted { .. } => OutputFormatter::warning_line(&message),
            SortEvent::Skipped { .. } => message,
            SortEvent::Failed(_) => OutputFormatter::error_line(&message),
        }
    }
}

impl EventSink for ConsoleSink {
    fn record(&mut self, event: SortEvent) {
        if self.errors_only && event.level() == Level::Info {
            return;
        }
        let line = Self::format(&event);
        match (&self.progress, event.level()) {
            (Some(pb), _) => pb.println(line),
            (None, Level::Info) => println!("{}", line),
            (None, Level::Error) => eprintln!("{}", line),
        }
    }

    fn file_done(&mut self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }
}
