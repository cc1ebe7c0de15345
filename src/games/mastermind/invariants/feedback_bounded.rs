//! Feedback bounds: `exact <= digit <= length` for every recorded turn.

use super::super::MatchEngine;
use super::Invariant;

/// Invariant: every recorded feedback is internally consistent and sized to
/// the configured code length.
pub struct FeedbackBoundedInvariant;

impl Invariant<MatchEngine> for FeedbackBoundedInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        let length = engine.rules().code_length();
        engine.history().iter().all(|turn| {
            let f = turn.feedback();
            f.length() == length
                && f.exact_matches() <= f.digit_matches()
                && f.digit_matches() <= length
        })
    }

    fn description() -> &'static str {
        "Every feedback satisfies exact <= digit <= length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::mastermind::{MatchRules, Sequence};

    #[test]
    fn test_holds_across_a_match() {
        let mut engine = MatchEngine::new(MatchRules::default());
        engine.begin(Sequence::parse("1122", 4, 8).unwrap());
        for guess in ["2211", "1111", "7654", "1122"] {
            engine.submit(Sequence::parse(guess, 4, 8).unwrap()).unwrap();
            assert!(FeedbackBoundedInvariant::holds(&engine));
        }
    }
}
