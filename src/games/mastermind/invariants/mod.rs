//! First-class invariants for a Mastermind match.
//!
//! Invariants are logical properties that must hold throughout a match.
//! They are testable independently and serve as documentation of the
//! engine's guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for a tuple of three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod feedback_bounded;
pub mod hint_prefix;
pub mod history_matches_turn;

pub use feedback_bounded::FeedbackBoundedInvariant;
pub use hint_prefix::HintPrefixInvariant;
pub use history_matches_turn::HistoryMatchesTurnInvariant;

/// All match invariants as a composable set.
pub type MastermindInvariants = (
    FeedbackBoundedInvariant,
    HistoryMatchesTurnInvariant,
    HintPrefixInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::mastermind::{MatchEngine, MatchRules, Sequence};

    fn active() -> MatchEngine {
        let mut engine = MatchEngine::new(MatchRules::default());
        engine.begin(Sequence::parse("1234", 4, 8).unwrap());
        engine
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_match() {
        assert!(MastermindInvariants::check_all(&active()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_guesses_and_hints() {
        let mut engine = active();
        engine.submit(Sequence::parse("1243", 4, 8).unwrap()).unwrap();
        engine.request_hint().unwrap();
        engine.submit(Sequence::parse("0000", 4, 8).unwrap()).unwrap();
        assert!(MastermindInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut engine = active();
        engine.turn = 5;
        let violations = MastermindInvariants::check_all(&engine).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            HistoryMatchesTurnInvariant::description()
        );
    }
}
