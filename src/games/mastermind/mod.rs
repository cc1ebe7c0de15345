//! Mastermind: guess a secret digit sequence from scored feedback.

mod action;
mod contracts;
mod engine;
mod feedback;
mod hint;
mod invariants;
mod phases;
mod record;
mod sequence;

pub use action::{Command, PlayerInput};
pub use contracts::{Contract, GuessFitsRules, MatchIsActive, SubmitContract};
pub use engine::{MAX_RANGE, MatchEngine, MatchError, MatchRules, StepOutcome, TurnReport};
pub use feedback::{Feedback, FeedbackError};
pub use hint::{Hint, HintState, MASK};
pub use invariants::{
    FeedbackBoundedInvariant, HintPrefixInvariant, HistoryMatchesTurnInvariant, Invariant,
    InvariantSet, InvariantViolation, MastermindInvariants,
};
pub use phases::{MatchStatus, Role};
pub use record::{MatchArchive, MatchRecord, TurnRecord, format_history};
pub use sequence::{Sequence, SequenceError};
