//! First-class player input.
//!
//! Every line the player types becomes exactly one [`PlayerInput`]: a valid
//! guess, a known command, or unrecognized text. Dispatch matches on this
//! enum exhaustively, so adding a command is a compile-time change.

use super::{Sequence, SequenceError};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Non-guess commands understood during a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Command {
    /// Show the rules for the current configuration.
    Rules,
    /// List the commands.
    Help,
    /// Reveal the next position of the secret.
    Hint,
    /// Restart the current match with a new secret.
    Reset,
    /// End the session without recording the current match.
    Quit,
    /// Show this match's guesses.
    History,
    /// Show a completed match. `None` when the argument was missing or not a
    /// number.
    Previous(Option<usize>),
}

impl Command {
    /// Parses a command word (case-insensitive, surrounding whitespace ignored).
    #[instrument(level = "trace")]
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        let mut words = lowered.split_whitespace();
        let head = words.next()?;
        let command = match head {
            "rules" => Command::Rules,
            "help" => Command::Help,
            "hint" => Command::Hint,
            "reset" => Command::Reset,
            "quit" => Command::Quit,
            "history" => Command::History,
            "previous" => {
                let ordinal = match (words.next(), words.next()) {
                    (Some(arg), None) => arg.parse::<usize>().ok(),
                    _ => None,
                };
                return Some(Command::Previous(ordinal));
            }
            _ => return None,
        };
        // Bare keywords take no arguments.
        if words.next().is_some() {
            return None;
        }
        Some(command)
    }

    /// Name as typed by the player.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Rules => "rules",
            Command::Help => "help",
            Command::Hint => "hint",
            Command::Reset => "reset",
            Command::Quit => "quit",
            Command::History => "history",
            Command::Previous(_) => "previous <number>",
        }
    }

    /// One-line description for the help table.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Rules => "Rules of the game.",
            Command::Help => "List of commands.",
            Command::Hint => "Reveals a number and its position in the secret code.",
            Command::Reset => "Resets the current game with a new secret code.",
            Command::Quit => "Quits the game.",
            Command::History => "Prints the current game's guesses and feedback.",
            Command::Previous(_) => "Prints the history of the n-th completed game.",
        }
    }

    /// Help table, one command per line.
    pub fn help_text() -> String {
        Command::iter()
            .map(|c| format!("{} - {}", c.name(), c.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One line of player input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A valid guess.
    Guess(Sequence),
    /// A recognized command.
    Command(Command),
    /// Neither; carries the reason it failed as a guess.
    Unrecognized(SequenceError),
}

impl PlayerInput {
    /// Classifies `raw`. Guess validation wins over command parsing.
    #[instrument(level = "trace")]
    pub fn parse(raw: &str, length: usize, range: u8) -> Self {
        match Sequence::parse(raw, length, range) {
            Ok(guess) => PlayerInput::Guess(guess),
            Err(reason) => match Command::parse(raw) {
                Some(command) => PlayerInput::Command(command),
                None => PlayerInput::Unrecognized(reason),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("rules"), Some(Command::Rules));
        assert_eq!(Command::parse("  HINT "), Some(Command::Hint));
        assert_eq!(Command::parse("Quit"), Some(Command::Quit));
        assert_eq!(Command::parse("history"), Some(Command::History));
        assert_eq!(Command::parse("hints"), None);
        assert_eq!(Command::parse("reset now"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_parse_previous_argument() {
        assert_eq!(Command::parse("previous 2"), Some(Command::Previous(Some(2))));
        assert_eq!(Command::parse("previous"), Some(Command::Previous(None)));
        assert_eq!(Command::parse("previous two"), Some(Command::Previous(None)));
        assert_eq!(Command::parse("previous 1 2"), Some(Command::Previous(None)));
        assert_eq!(Command::parse("previous -1"), Some(Command::Previous(None)));
    }

    #[test]
    fn test_guess_takes_priority() {
        assert!(matches!(PlayerInput::parse("0123", 4, 8), PlayerInput::Guess(_)));
        assert_eq!(
            PlayerInput::parse("help", 4, 8),
            PlayerInput::Command(Command::Help)
        );
        assert!(matches!(
            PlayerInput::parse("12", 4, 8),
            PlayerInput::Unrecognized(SequenceError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = Command::help_text();
        assert_eq!(help.lines().count(), 7);
        assert!(help.contains("previous <number> - "));
        assert!(help.starts_with("rules - "));
    }
}
