//! The turn state machine for one match.
//!
//! `NotStarted -> Active -> Finished(winner)`, with `Aborted` reachable from
//! `Active` when the player quits. All per-match state (turn counter, history,
//! hints) is owned here and mutated only through these methods.

use super::contracts::{Contract, SubmitContract};
use super::hint::{Hint, HintState};
use super::record::{TurnRecord, format_history};
use super::{Feedback, MatchStatus, Role, Sequence};
use crate::GameError;
use crate::console::Console;
use crate::responder::{Responder, Submission};
use crate::source::{SecretOrigin, SecretSource};
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

/// Largest usable digit bound: every position is one decimal digit.
pub const MAX_RANGE: u8 = 10;

/// Errors raised by the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MatchError {
    /// The rules cannot describe a playable match.
    #[display("Invalid rules: {}", _0)]
    InvalidRules(String),

    /// A guess or command arrived while no match is active.
    #[display("Match is not active ({})", _0)]
    NotActive(MatchStatus),

    /// The guess does not fit the configured length or range.
    #[display("Guess {} does not fit the rules", _0)]
    GuessMismatch(Sequence),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MatchError {}

/// Length, digit range and attempt budget of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    code_length: usize,
    code_range: u8,
    max_attempts: usize,
}

impl MatchRules {
    /// Validated rules.
    ///
    /// # Errors
    ///
    /// Length, range and attempts must all be at least 1, and the range may
    /// not exceed [`MAX_RANGE`].
    #[instrument]
    pub fn new(
        code_length: usize,
        code_range: u8,
        max_attempts: usize,
    ) -> Result<Self, MatchError> {
        if code_length == 0 {
            return Err(MatchError::InvalidRules(
                "code length must be a positive integer".to_string(),
            ));
        }
        if code_range == 0 || code_range > MAX_RANGE {
            return Err(MatchError::InvalidRules(format!(
                "code range must be between 1 and {}",
                MAX_RANGE
            )));
        }
        if max_attempts == 0 {
            return Err(MatchError::InvalidRules(
                "max attempts must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            code_length,
            code_range,
            max_attempts,
        })
    }

    /// Number of digits in a code.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Exclusive upper bound on digit values.
    pub fn code_range(&self) -> u8 {
        self.code_range
    }

    /// Guesses allowed per match.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Static rules text.
    pub fn describe(&self) -> String {
        format!(
            "Mastermind: match a secret code of {} numbers ranging from 0-{} in {} attempts.",
            self.code_length,
            self.code_range - 1,
            self.max_attempts
        )
    }

    /// Re-prompt shown after unrecognized input.
    pub fn input_hint(&self) -> String {
        format!(
            "Enter {} numbers ranging from 0-{}, or input 'help' to see other commands.",
            self.code_length,
            self.code_range - 1
        )
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            code_length: 4,
            code_range: 8,
            max_attempts: 10,
        }
    }
}

/// What one scored guess did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn the guess was made on.
    pub turn: usize,
    /// Score of the guess.
    pub feedback: Feedback,
    /// Guesses left after this one.
    pub remaining: usize,
    /// Match status after evaluation.
    pub status: MatchStatus,
}

impl TurnReport {
    /// `N guess(es) remaining.`
    pub fn remaining_text(&self) -> String {
        let noun = if self.remaining == 1 { "guess" } else { "guesses" };
        format!("{} {} remaining.", self.remaining, noun)
    }
}

/// Result of [`MatchEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A guess was scored.
    Scored(TurnReport),
    /// The player quit; the match is aborted.
    Quit,
}

/// Turn state machine for a single match.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    rules: MatchRules,
    pub(super) turn: usize,
    pub(super) secret: Option<Sequence>,
    pub(super) hints: Option<HintState>,
    pub(super) history: Vec<TurnRecord>,
    last_feedback: Option<Feedback>,
    status: MatchStatus,
}

impl MatchEngine {
    /// Creates an engine in `NotStarted`.
    #[instrument]
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            turn: 1,
            secret: None,
            hints: None,
            history: Vec::new(),
            last_feedback: None,
            status: MatchStatus::NotStarted,
        }
    }

    /// Draws a fresh secret from `source` and activates the match.
    ///
    /// Clears history, hints and winner and puts the turn counter back to 1.
    /// Used both for the first start and for `reset`.
    #[instrument(skip(self, source))]
    pub fn start<S: SecretSource + ?Sized>(&mut self, source: &mut S) -> SecretOrigin {
        let generated = source.generate(self.rules.code_length, self.rules.code_range);
        self.begin(generated.sequence);
        generated.origin
    }

    /// Activates the match with a known secret.
    #[instrument(skip(self, secret))]
    pub fn begin(&mut self, secret: Sequence) {
        debug!(secret = %secret, "Match secret chosen");
        self.hints = Some(HintState::new(&secret));
        self.secret = Some(secret);
        self.turn = 1;
        self.history.clear();
        self.last_feedback = None;
        self.status = MatchStatus::Active;
        info!(
            length = self.rules.code_length,
            range = self.rules.code_range,
            max_attempts = self.rules.max_attempts,
            "Match started"
        );
    }

    /// Runs one turn: solicit a guess, then score it.
    ///
    /// Commands typed in between are handled by the responder and do not
    /// consume a turn.
    ///
    /// # Errors
    ///
    /// Propagates console failures and contract violations.
    #[instrument(skip(self, responder), fields(turn = self.turn))]
    pub fn step<C, S>(
        &mut self,
        responder: &mut Responder<'_, C, S>,
    ) -> Result<StepOutcome, GameError>
    where
        C: Console + ?Sized,
        S: SecretSource + ?Sized,
    {
        match responder.solicit(self)? {
            Submission::Guess(guess) => Ok(StepOutcome::Scored(self.submit(guess)?)),
            Submission::Quit => {
                self.abort();
                Ok(StepOutcome::Quit)
            }
        }
    }

    /// Scores a guess against the secret and advances the turn.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotActive`] outside `Active` and
    /// [`MatchError::GuessMismatch`] for a guess built with other rules.
    #[instrument(skip(self, guess), fields(turn = self.turn, guess = %guess))]
    pub fn submit(&mut self, guess: Sequence) -> Result<TurnReport, MatchError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        SubmitContract::pre(self, &guess)?;

        let secret = self
            .secret
            .as_ref()
            .ok_or(MatchError::NotActive(self.status))?;
        let feedback = secret.compare(&guess);
        let turn = self.turn;

        self.history.push(TurnRecord::new(guess, feedback));
        self.last_feedback = Some(feedback);
        let remaining = self.rules.max_attempts.saturating_sub(turn);
        self.turn += 1;
        let status = self.evaluate();

        #[cfg(debug_assertions)]
        SubmitContract::post(&before, self)?;

        debug!(%feedback, remaining, %status, "Guess scored");
        Ok(TurnReport {
            turn,
            feedback,
            remaining,
            status,
        })
    }

    /// Applies the terminal conditions and returns the resulting status.
    ///
    /// A perfect last guess wins for the breaker even on the final turn;
    /// otherwise a turn counter past the budget wins for the maker.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn evaluate(&mut self) -> MatchStatus {
        if self.status != MatchStatus::Active {
            return self.status;
        }
        if self.last_feedback.is_some_and(|f| f.is_perfect()) {
            self.status = MatchStatus::Finished(Role::Breaker);
        } else if self.turn > self.rules.max_attempts {
            self.status = MatchStatus::Finished(Role::Maker);
        }
        if let Some(winner) = self.status.winner() {
            info!(%winner, turns = self.history.len(), "Match finished");
        }
        self.status
    }

    /// Marks the match abandoned. Nothing is recorded.
    #[instrument(skip(self))]
    pub fn abort(&mut self) {
        if self.status.is_terminal() {
            warn!(status = %self.status, "Abort requested on a finished match");
            return;
        }
        self.status = MatchStatus::Aborted;
        info!(turn = self.turn, "Match aborted by player");
    }

    /// Reveals the next hint.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotActive`] outside `Active`.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self) -> Result<Hint, MatchError> {
        if self.status != MatchStatus::Active {
            return Err(MatchError::NotActive(self.status));
        }
        self.hints
            .as_mut()
            .map(HintState::reveal_next)
            .ok_or(MatchError::NotActive(self.status))
    }

    /// Player-facing text for a hint result.
    pub fn hint_text(&self, hint: Hint) -> String {
        let masked = self.masked_secret();
        match hint {
            Hint::Revealed { position, digit } => format!(
                "Hint: position {} is {}. Code so far: {}",
                position + 1,
                digit,
                masked
            ),
            Hint::Exhausted => format!("All positions have been revealed: {}", masked),
        }
    }

    /// The secret with unrevealed positions masked.
    pub fn masked_secret(&self) -> String {
        self.hints.as_ref().map(HintState::masked).unwrap_or_default()
    }

    /// This match's guesses, formatted.
    pub fn history_text(&self) -> String {
        format_history(&self.history)
    }

    /// End-of-match announcement, if the match finished.
    pub fn result_text(&self) -> Option<String> {
        let winner = self.status.winner()?;
        let secret = self.secret.as_ref()?;
        Some(format!(
            "The secret code was {}. Congratulations, {} won this round!",
            secret, winner
        ))
    }

    /// Hands over the finished match for archiving.
    ///
    /// Returns `None` unless the match is `Finished`.
    #[instrument(skip(self))]
    pub fn take_result(&mut self) -> Option<(Sequence, Role, Vec<TurnRecord>)> {
        let winner = self.status.winner()?;
        let secret = self.secret.clone()?;
        Some((secret, winner, std::mem::take(&mut self.history)))
    }

    /// Rules in force.
    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// Current 1-based turn.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Guesses left before the budget runs out.
    pub fn remaining_attempts(&self) -> usize {
        (self.rules.max_attempts + 1).saturating_sub(self.turn)
    }

    /// Lifecycle status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Scored guesses so far.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// The secret, once started.
    pub fn secret(&self) -> Option<&Sequence> {
        self.secret.as_ref()
    }

    /// Hint state, once started.
    pub fn hints(&self) -> Option<&HintState> {
        self.hints.as_ref()
    }
}
