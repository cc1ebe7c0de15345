//! Contract-based validation for guess submission.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::engine::{MatchEngine, MatchError};
use super::invariants::{InvariantSet, MastermindInvariants};
use super::{MatchStatus, Sequence};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MatchError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MatchError>;
}

// ─────────────────────────────────────────────────────────────
//  Submission Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match must be accepting guesses.
pub struct MatchIsActive;

impl MatchIsActive {
    /// Fails unless the engine is `Active`.
    #[instrument(skip(engine))]
    pub fn check(engine: &MatchEngine) -> Result<(), MatchError> {
        match engine.status() {
            MatchStatus::Active => Ok(()),
            other => Err(MatchError::NotActive(other)),
        }
    }
}

/// Precondition: the guess was validated against these rules.
pub struct GuessFitsRules;

impl GuessFitsRules {
    /// Fails when the guess length or digit bound differs from the rules.
    #[instrument(skip(engine, guess))]
    pub fn check(guess: &Sequence, engine: &MatchEngine) -> Result<(), MatchError> {
        let rules = engine.rules();
        if guess.len() != rules.code_length() || guess.range() > rules.code_range() {
            warn!(
                guess_len = guess.len(),
                guess_range = guess.range(),
                "Guess built for different rules"
            );
            return Err(MatchError::GuessMismatch(guess.clone()));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Submit Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for scoring a guess.
///
/// Preconditions:
/// - Match is active
/// - Guess fits the rules
///
/// Postconditions:
/// - Exactly one turn was consumed
/// - All match invariants hold
pub struct SubmitContract;

impl Contract<MatchEngine, Sequence> for SubmitContract {
    fn pre(engine: &MatchEngine, guess: &Sequence) -> Result<(), MatchError> {
        MatchIsActive::check(engine)?;
        GuessFitsRules::check(guess, engine)
    }

    fn post(before: &MatchEngine, after: &MatchEngine) -> Result<(), MatchError> {
        if after.turn() != before.turn() + 1
            || after.history().len() != before.history().len() + 1
        {
            return Err(MatchError::InvariantViolation(
                "Postcondition failed: a submission must consume exactly one turn".to_string(),
            ));
        }
        MastermindInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MatchError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
