//! Guess submission loop.
//!
//! Prompts until the player enters a valid guess or quits. Anything else is
//! classified as a command (handled here by calling into the engine, the
//! secret source or the archive) or rejected with a re-prompt.

use crate::GameError;
use crate::console::Console;
use crate::games::mastermind::{Command, MatchArchive, MatchEngine, PlayerInput, Sequence};
use crate::source::{FALLBACK_NOTICE, SecretOrigin, SecretSource};
use tracing::{debug, info, instrument};

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A valid guess to score.
    Guess(Sequence),
    /// The player quit (or input ended).
    Quit,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Text(String),
    Quit,
}

/// Borrowed collaborators for one round of input collection.
pub struct Responder<'a, C: ?Sized, S: ?Sized> {
    console: &'a mut C,
    source: &'a mut S,
    archive: &'a MatchArchive,
}

impl<'a, C, S> Responder<'a, C, S>
where
    C: Console + ?Sized,
    S: SecretSource + ?Sized,
{
    /// Creates a responder over the session's collaborators.
    pub fn new(console: &'a mut C, source: &'a mut S, archive: &'a MatchArchive) -> Self {
        Self {
            console,
            source,
            archive,
        }
    }

    /// Prompts until a valid guess or a quit.
    ///
    /// # Errors
    ///
    /// Console failures and engine errors from command handling.
    #[instrument(skip_all, fields(turn = engine.turn()))]
    pub fn solicit(&mut self, engine: &mut MatchEngine) -> Result<Submission, GameError> {
        loop {
            let prompt = format!("Input #{}: ", engine.turn());
            let Some(raw) = self.console.read_line(&prompt)? else {
                info!("Input closed; treating as quit");
                return Ok(Submission::Quit);
            };

            let rules = *engine.rules();
            match PlayerInput::parse(&raw, rules.code_length(), rules.code_range()) {
                PlayerInput::Guess(guess) => {
                    debug!(%guess, "Guess accepted");
                    return Ok(Submission::Guess(guess));
                }
                PlayerInput::Command(command) => match self.dispatch(command, engine)? {
                    Reply::Text(text) => self.console.write_line(&text)?,
                    Reply::Quit => return Ok(Submission::Quit),
                },
                PlayerInput::Unrecognized(reason) => {
                    debug!(%reason, "Rejected input");
                    self.console.write_line(&rules.input_hint())?;
                }
            }
        }
    }

    #[instrument(skip(self, engine))]
    fn dispatch(&mut self, command: Command, engine: &mut MatchEngine) -> Result<Reply, GameError> {
        let text = match command {
            Command::Rules => engine.rules().describe(),
            Command::Help => Command::help_text(),
            Command::Hint => {
                let hint = engine.request_hint()?;
                engine.hint_text(hint)
            }
            Command::Reset => {
                let origin = engine.start(&mut *self.source);
                info!(%origin, "Match reset");
                let mut text = "Game reset. A new secret code has been generated.".to_string();
                if origin == SecretOrigin::Fallback {
                    text = format!("{}\n{}", FALLBACK_NOTICE, text);
                }
                text
            }
            Command::Quit => return Ok(Reply::Quit),
            Command::History => engine.history_text(),
            Command::Previous(ordinal) => self.archive.lookup(ordinal),
        };
        Ok(Reply::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::games::mastermind::{MatchRules, Role};
    use crate::source::FixedSource;

    fn seq(raw: &str) -> Sequence {
        Sequence::parse(raw, 4, 8).unwrap()
    }

    fn engine(secret: &str) -> MatchEngine {
        let mut engine = MatchEngine::new(MatchRules::default());
        engine.begin(seq(secret));
        engine
    }

    fn run(
        inputs: &[&str],
        engine: &mut MatchEngine,
        source: &mut FixedSource,
        archive: &MatchArchive,
    ) -> (Submission, ScriptedConsole) {
        let mut console = ScriptedConsole::new(inputs.iter().copied());
        let submission = Responder::new(&mut console, source, archive)
            .solicit(engine)
            .unwrap();
        (submission, console)
    }

    #[test]
    fn test_valid_guess_returned() {
        let mut engine = engine("1234");
        let (submission, console) = run(
            &["4321"],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        assert_eq!(submission, Submission::Guess(seq("4321")));
        assert_eq!(console.transcript(), ["> Input #1: "]);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut engine = engine("1234");
        let (submission, console) = run(
            &["123", "1239", "abcd", "0000"],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        assert_eq!(submission, Submission::Guess(seq("0000")));
        let hint = "Enter 4 numbers ranging from 0-7, or input 'help' to see other commands.";
        assert_eq!(console.output(), vec![hint, hint, hint]);
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let mut engine = engine("1234");
        let (submission, console) = run(
            &["QUIT", "1234"],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        assert_eq!(submission, Submission::Quit);
        assert_eq!(console.pending(), 1);

        let (submission, _) = run(
            &[],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        assert_eq!(submission, Submission::Quit);
    }

    #[test]
    fn test_rules_help_history() {
        let mut engine = engine("1234");
        engine.submit(seq("1243")).unwrap();
        let (_, console) = run(
            &["rules", "help", "history", "1111"],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        let output = console.output();
        assert_eq!(
            output[0],
            "Mastermind: match a secret code of 4 numbers ranging from 0-7 in 10 attempts."
        );
        assert!(output[1].contains("hint - "));
        assert_eq!(
            output[2],
            "Guess #1: 1243 - 4 correct numbers and 2 correct locations"
        );
        assert_eq!(console.transcript().last().unwrap(), "> Input #2: ");
    }

    #[test]
    fn test_hint_does_not_consume_turn() {
        let mut engine = engine("5123");
        let (_, console) = run(
            &["hint", "hint", "0000"],
            &mut engine,
            &mut FixedSource::default(),
            &MatchArchive::new(),
        );
        assert_eq!(
            console.output(),
            vec![
                "Hint: position 1 is 5. Code so far: 5___",
                "Hint: position 2 is 1. Code so far: 51__",
            ]
        );
        assert_eq!(engine.turn(), 1);
    }

    #[test]
    fn test_reset_draws_new_secret_in_place() {
        let mut engine = engine("1234");
        engine.submit(seq("0000")).unwrap();
        engine.request_hint().unwrap();
        let mut source = FixedSource::new([seq("7777")]);
        let (_, console) = run(&["reset", "7777"], &mut engine, &mut source, &MatchArchive::new());
        assert_eq!(console.output(), vec!["Game reset. A new secret code has been generated."]);
        assert_eq!(engine.secret().map(ToString::to_string).as_deref(), Some("7777"));
        assert_eq!(engine.turn(), 1);
        assert!(engine.history().is_empty());
        assert_eq!(engine.masked_secret(), "____");
        assert_eq!(console.transcript().last().unwrap(), "> Input #1: ");
    }

    #[test]
    fn test_previous_lookup() {
        let mut archive = MatchArchive::new();
        archive.archive(seq("1111"), Role::Maker, Vec::new());
        let mut engine = engine("1234");
        let (_, console) = run(
            &["previous 1", "previous 5", "previous", "1234"],
            &mut engine,
            &mut FixedSource::default(),
            &archive,
        );
        let output = console.output();
        assert!(output[0].starts_with("Game #1: Code Maker won."));
        assert_eq!(output[1], "Enter 'previous' followed by a game number from 1 to 1.");
        assert_eq!(output[2], "Enter 'previous' followed by a game number from 1 to 1.");
    }
}
