//! Roles and match phases.

use derive_more::Display;

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    /// Chose the secret; wins when the attempts run out.
    #[display("Code Maker")]
    Maker,
    /// Guesses; wins with a perfect guess.
    #[display("Code Breaker")]
    Breaker,
}

/// Where a match is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Constructed, no secret yet.
    NotStarted,
    /// Accepting guesses.
    Active,
    /// Over, with a winner.
    Finished(Role),
    /// Abandoned by the player; never recorded.
    Aborted,
}

impl MatchStatus {
    /// True for `Finished` and `Aborted`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished(_) | MatchStatus::Aborted)
    }

    /// The winner, if the match finished.
    pub fn winner(&self) -> Option<Role> {
        match self {
            MatchStatus::Finished(role) => Some(*role),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::NotStarted => write!(f, "Not started"),
            MatchStatus::Active => write!(f, "In progress"),
            MatchStatus::Finished(role) => write!(f, "{} wins", role),
            MatchStatus::Aborted => write!(f, "Abandoned"),
        }
    }
}
