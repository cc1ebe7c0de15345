//! Strictly Mastermind library - a terminal code-breaking game
//!
//! The player (Code Breaker) guesses a secret numeric code picked by the
//! computer (Code Maker). Each guess is scored with two counts: how many
//! digits appear in the secret and how many sit in the right position.
//!
//! # Architecture
//!
//! - **Games**: rules, scoring and the per-match state machine (`MatchEngine`)
//! - **Source**: secret generation, random.org first with a local fallback
//! - **Responder**: the guess loop that handles commands between guesses
//! - **Session**: consecutive matches and the archive of finished ones
//!
//! # Example
//!
//! ```no_run
//! use strictly_mastermind::{GameConfig, SessionManager, StdConsole};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_offline(true);
//! let source = config.build_source()?;
//! let mut session = SessionManager::from_config(&config, StdConsole::stdio(), source)?;
//! session.run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod error;
mod games;
mod responder;
mod session;
mod source;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Console I/O
pub use console::{Console, ConsoleError, ScriptedConsole, StdConsole};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Guess loop
pub use responder::{Responder, Submission};

// Crate-level exports - Session management
pub use session::{MatchEnd, SessionManager};

// Crate-level exports - Secret generation
pub use source::{
    DEFAULT_PROVIDER_URL, FALLBACK_NOTICE, FallbackGenerator, FixedSource, GeneratedSecret,
    ProviderError, RandomOrgProvider, RandomProvider, RetryPolicy, SecretOrigin, SecretSource,
    SequenceSource, parse_integers,
};

// Crate-level exports - Game types (mastermind)
pub use games::mastermind::{
    Command, Contract, Feedback, FeedbackBoundedInvariant, FeedbackError, GuessFitsRules, Hint,
    HintPrefixInvariant, HintState, HistoryMatchesTurnInvariant, Invariant, InvariantSet,
    InvariantViolation, MASK, MAX_RANGE, MastermindInvariants, MatchArchive, MatchEngine,
    MatchError, MatchIsActive, MatchRecord, MatchRules, MatchStatus, PlayerInput, Role, Sequence,
    SequenceError, StepOutcome, SubmitContract, TurnRecord, TurnReport, format_history,
};
