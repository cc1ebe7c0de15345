//! Hint disclosure: revealed positions form a prefix of the secret.

use super::super::MatchEngine;
use super::super::hint::MASK;
use super::Invariant;

/// Invariant: the masked display is the secret's leftmost `k` digits
/// followed only by placeholders.
///
/// This is what "left to right, never re-masked" looks like from outside.
pub struct HintPrefixInvariant;

impl Invariant<MatchEngine> for HintPrefixInvariant {
    fn holds(engine: &MatchEngine) -> bool {
        let (Some(secret), Some(hints)) = (engine.secret(), engine.hints()) else {
            return engine.secret().is_none() && engine.hints().is_none();
        };
        let masked: Vec<char> = hints.masked().chars().collect();
        let revealed = hints.revealed();
        let secret_chars: Vec<char> = secret.to_string().chars().collect();

        masked.len() == secret_chars.len()
            && masked[..revealed] == secret_chars[..revealed]
            && masked[revealed..].iter().all(|c| *c == MASK)
    }

    fn description() -> &'static str {
        "Revealed hint positions form a prefix of the secret"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::mastermind::{MatchRules, Sequence};
    use crate::games::mastermind::hint::HintState;

    fn active(secret: &str) -> MatchEngine {
        let mut engine = MatchEngine::new(MatchRules::default());
        engine.begin(Sequence::parse(secret, 4, 8).unwrap());
        engine
    }

    #[test]
    fn test_holds_while_revealing() {
        let mut engine = active("7310");
        for _ in 0..6 {
            engine.request_hint().unwrap();
            assert!(HintPrefixInvariant::holds(&engine));
        }
    }

    #[test]
    fn test_hints_for_other_secret_violate() {
        let mut engine = active("7310");
        let mut foreign = HintState::new(&Sequence::parse("0000", 4, 8).unwrap());
        foreign.reveal_next();
        engine.hints = Some(foreign);
        assert!(!HintPrefixInvariant::holds(&engine));
    }
}
