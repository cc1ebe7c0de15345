//! History/turn consistency: one recorded guess per consumed turn.

use super::super::MatchEngine;
use super::Invariant;

/// Invariant: the turn counter is always one past the number of guesses.
pub struct HistoryMatchesTurnInvariant;

impl Invariant<MatchEngine> for HistoryMatchesTurnInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        engine.history().len() + 1 == engine.turn()
    }

    fn description() -> &'static str {
        "Turn counter equals number of recorded guesses plus one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::mastermind::{MatchRules, Sequence};

    #[test]
    fn test_holds_before_and_after_guesses() {
        let mut engine = MatchEngine::new(MatchRules::default());
        assert!(HistoryMatchesTurnInvariant::holds(&engine));
        engine.begin(Sequence::parse("1234", 4, 8).unwrap());
        engine.submit(Sequence::parse("4321", 4, 8).unwrap()).unwrap();
        assert!(HistoryMatchesTurnInvariant::holds(&engine));
    }

    #[test]
    fn test_corrupted_history_violates() {
        let mut engine = MatchEngine::new(MatchRules::default());
        engine.begin(Sequence::parse("1234", 4, 8).unwrap());
        engine.submit(Sequence::parse("4321", 4, 8).unwrap()).unwrap();
        engine.history.clear();
        assert!(!HistoryMatchesTurnInvariant::holds(&engine));
    }
}
