//! Plain-text line I/O used by the game loop.

use derive_more::{Display, Error};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::instrument;

/// Console I/O failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Console error: {} at {}:{}", message, file, line)]
pub struct ConsoleError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConsoleError {
    /// Creates a new console error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Line-oriented text input and output.
pub trait Console {
    /// Shows `prompt` and reads one line without its terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    /// Writes `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> Result<(), ConsoleError>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, text: &str) -> Result<(), ConsoleError> {
        (**self).write_line(text)
    }
}

/// Console over any reader/writer pair; [`StdConsole::stdio`] for the terminal.
#[derive(Debug)]
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    /// Wraps a reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    fn write_line(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

/// In-memory console: queued input lines and a captured transcript.
///
/// Prompts are recorded in the transcript with a `> ` marker so tests can
/// assert on turn numbering.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    /// Console that will answer prompts with `inputs`, then report end of input.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything written, prompts included, one entry per call.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Written lines only (prompts excluded).
    pub fn output(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter(|l| !l.starts_with("> "))
            .map(String::as_str)
            .collect()
    }

    /// Lines not yet consumed.
    pub fn pending(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        self.transcript.push(format!("> {}", prompt));
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.transcript.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_console_strips_line_endings() {
        let input = std::io::Cursor::new("1234\r\nquit\n");
        let mut console = StdConsole::new(input, Vec::new());
        assert_eq!(console.read_line("Input #1: ").unwrap().as_deref(), Some("1234"));
        assert_eq!(console.read_line("Input #2: ").unwrap().as_deref(), Some("quit"));
        assert_eq!(console.read_line("Input #3: ").unwrap(), None);
        let written = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(written, "Input #1: Input #2: Input #3: ");
    }

    #[test]
    fn test_std_console_keeps_inner_whitespace() {
        let input = std::io::Cursor::new("12 4\n");
        let mut console = StdConsole::new(input, Vec::new());
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("12 4"));
    }

    #[test]
    fn test_scripted_console_records_transcript() {
        let mut console = ScriptedConsole::new(["help"]);
        assert_eq!(console.read_line("Input #1: ").unwrap().as_deref(), Some("help"));
        console.write_line("hello").unwrap();
        assert_eq!(console.read_line("Input #1: ").unwrap(), None);
        assert_eq!(console.output(), vec!["hello"]);
        assert_eq!(console.transcript().len(), 3);
    }
}
