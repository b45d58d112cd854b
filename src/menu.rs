//! Interactive input for manual sorting.
//!
//! [`MenuChoice`] is the parsed form of the single line a user types at the
//! action menu. [`Prompt`] abstracts where that line comes from, so the sorter
//! can be driven by a terminal ([`Console`]) or by scripted input in tests.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Menu shown for every file in manual mode.
pub const MENU: &str = "
    Choose an action for the file:
        (1) Auto Sort file based on file type
        (2) Delete file
        (3) Skip file
        (4) Add Custom Path

    Enter your choice:";

/// Prompt used to ask for the destination of a custom-path move.
pub const CUSTOM_PATH_PROMPT: &str = "Enter the custom path > ";

/// How a file should be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Move the file to the folder its extension maps to.
    Auto,
    /// Show the file and ask what to do with it.
    Manual,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "manual" => Ok(Mode::Manual),
            other => Err(format!("unknown mode '{}': expected auto or manual", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Auto => write!(f, "auto"),
            Mode::Manual => write!(f, "manual"),
        }
    }
}

/// One of the four menu actions, or whatever else was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AutoSort,
    Delete,
    Skip,
    CustomPath,
    Unrecognized(String),
}

impl MenuChoice {
    /// Parses a line of user input. Surrounding whitespace and the trailing
    /// newline are ignored; anything but `1`..`4` is kept verbatim in
    /// [`MenuChoice::Unrecognized`].
    ///
    /// ```
    /// use filesorter::menu::MenuChoice;
    ///
    /// assert_eq!(MenuChoice::parse("2\n"), MenuChoice::Delete);
    /// assert_eq!(MenuChoice::parse("x"), MenuChoice::Unrecognized("x".into()));
    /// ```
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::AutoSort,
            "2" => MenuChoice::Delete,
            "3" => MenuChoice::Skip,
            "4" => MenuChoice::CustomPath,
            other => MenuChoice::Unrecognized(other.to_string()),
        }
    }
}

/// Source of user decisions.
pub trait Prompt {
    /// Writes `text` for the user to read.
    fn show(&mut self, text: &str) -> io::Result<()>;

    /// Writes `question` and reads one line of input, without its line ending.
    ///
    /// End of input is reported as `UnexpectedEof`.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn show(&mut self, text: &str) -> io::Result<()> {
        (**self).show(text)
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        (**self).ask(question)
    }
}

/// A [`Prompt`] over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the writer, e.g. to inspect what was shown in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn show(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        // Blank line after the answer, for readability.
        writeln!(self.output)?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
