//! Crate-level error type.

use crate::config::ConfigError;
use crate::console::ConsoleError;
use crate::games::mastermind::MatchError;
use derive_more::{Display, Error, From};

/// Anything that can stop a session.
///
/// Rejected guesses and unknown commands are not errors; they are handled
/// inside the guess loop and never reach this type.
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    /// Engine contract or rules failure.
    #[display("{}", _0)]
    Match(MatchError),

    /// Reading or writing the terminal failed.
    #[display("{}", _0)]
    Console(ConsoleError),

    /// The configuration is unusable.
    #[display("{}", _0)]
    Config(ConfigError),
}
