//! Session management: consecutive matches and their archive.

use crate::GameError;
use crate::config::{ConfigError, GameConfig};
use crate::console::Console;
use crate::games::mastermind::{
    MatchArchive, MatchEngine, MatchError, MatchRules, Role, StepOutcome,
};
use crate::responder::Responder;
use crate::source::{FALLBACK_NOTICE, SecretOrigin, SecretSource};
use tracing::{debug, info, instrument};

/// How a single match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEnd {
    /// Played to the end and archived.
    Completed {
        /// Archive ordinal.
        ordinal: usize,
        /// Who won.
        winner: Role,
    },
    /// The player quit; nothing archived.
    Quit,
}

/// Runs matches back to back and keeps their history for the process
/// lifetime.
#[derive(Debug)]
pub struct SessionManager<C, S> {
    rules: MatchRules,
    reveal_secret: bool,
    console: C,
    source: S,
    archive: MatchArchive,
}

impl<C: Console, S: SecretSource> SessionManager<C, S> {
    /// Creates a session with already validated rules.
    #[instrument(skip(console, source))]
    pub fn new(rules: MatchRules, console: C, source: S) -> Self {
        info!("Creating session manager");
        Self {
            rules,
            reveal_secret: false,
            console,
            source,
            archive: MatchArchive::new(),
        }
    }

    /// Creates a session from configuration.
    ///
    /// # Errors
    ///
    /// Invalid rules; this is the only thing that prevents play.
    #[instrument(skip_all)]
    pub fn from_config(config: &GameConfig, console: C, source: S) -> Result<Self, ConfigError> {
        let rules = config.validate()?;
        Ok(Self::new(rules, console, source).with_reveal_secret(*config.reveal_secret()))
    }

    /// Prints each secret when its match starts.
    pub fn with_reveal_secret(mut self, reveal: bool) -> Self {
        self.reveal_secret = reveal;
        self
    }

    /// Plays until the player declines another match or quits, then prints
    /// the summary.
    ///
    /// # Errors
    ///
    /// Console failures and engine contract violations.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<(), GameError> {
        self.console
            .write_line("Welcome to Mastermind! Type 'help' at any prompt to see commands.")?;
        self.console.write_line(&self.rules.describe())?;

        loop {
            match self.play_match()? {
                MatchEnd::Quit => {
                    self.console.write_line("Quitting game.")?;
                    break;
                }
                MatchEnd::Completed { ordinal, winner } => {
                    debug!(ordinal, %winner, "Match completed");
                    if !self.play_again()? {
                        break;
                    }
                }
            }
        }

        self.console.write_line("Session summary:")?;
        self.console.write_line(&self.archive.summary())?;
        info!(matches = self.archive.len(), "Session ended");
        Ok(())
    }

    /// Plays one match to a terminal state.
    ///
    /// # Errors
    ///
    /// Console failures and engine contract violations.
    #[instrument(skip(self), fields(ordinal = self.archive.len() + 1))]
    pub fn play_match(&mut self) -> Result<MatchEnd, GameError> {
        let mut engine = MatchEngine::new(self.rules);
        let origin = engine.start(&mut self.source);
        if origin == SecretOrigin::Fallback {
            self.console.write_line(FALLBACK_NOTICE)?;
        }
        if self.reveal_secret
            && let Some(secret) = engine.secret()
        {
            self.console.write_line(&format!("Secret code: {}", secret))?;
        }
        self.console.write_line(&format!(
            "Game #{} started. You have {} guesses.",
            self.archive.len() + 1,
            self.rules.max_attempts()
        ))?;

        loop {
            let outcome = {
                let mut responder =
                    Responder::new(&mut self.console, &mut self.source, &self.archive);
                engine.step(&mut responder)?
            };

            let report = match outcome {
                StepOutcome::Quit => return Ok(MatchEnd::Quit),
                StepOutcome::Scored(report) => report,
            };

            self.console.write_line(&report.feedback.to_string())?;
            self.console.write_line(&report.remaining_text())?;
            if !report.status.is_terminal() {
                continue;
            }

            if let Some(text) = engine.result_text() {
                self.console.write_line(&text)?;
            }
            let (secret, winner, turns) = engine.take_result().ok_or_else(|| {
                MatchError::InvariantViolation("terminal match has no result".to_string())
            })?;
            let ordinal = self.archive.archive(secret, winner, turns);
            return Ok(MatchEnd::Completed { ordinal, winner });
        }
    }

    /// Asks whether to continue; an answer whose first character is `y` or
    /// `Y` means yes.
    #[instrument(skip(self))]
    fn play_again(&mut self) -> Result<bool, GameError> {
        let answer = self.console.read_line("Play again? (y/n): ")?;
        let yes = answer
            .and_then(|a| a.chars().next())
            .is_some_and(|c| c.eq_ignore_ascii_case(&'y'));
        debug!(yes, "Play again answered");
        Ok(yes)
    }

    /// Completed matches so far.
    pub fn archive(&self) -> &MatchArchive {
        &self.archive
    }

    /// The console.
    pub fn console(&self) -> &C {
        &self.console
    }
}
