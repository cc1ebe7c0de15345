//! Progressive disclosure of the secret, one position at a time.

use super::Sequence;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Placeholder shown for positions that have not been revealed.
pub const MASK: char = '_';

/// Result of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// A new position was disclosed.
    Revealed {
        /// Zero-based position.
        position: usize,
        /// Digit at that position.
        digit: u8,
    },
    /// Every position is already visible.
    Exhausted,
}

/// Hint bookkeeping for one match.
///
/// Undisclosed positions are kept in ascending order and popped from the
/// front, so disclosure is strictly left to right and a revealed position
/// never goes back to being masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintState {
    secret: Vec<u8>,
    undisclosed: VecDeque<usize>,
}

impl HintState {
    /// Fresh, fully masked state for `secret`.
    #[instrument(skip(secret), fields(length = secret.len()))]
    pub fn new(secret: &Sequence) -> Self {
        Self {
            secret: secret.digits().to_vec(),
            undisclosed: (0..secret.len()).collect(),
        }
    }

    /// Reveals the leftmost undisclosed position.
    #[instrument(skip(self))]
    pub fn reveal_next(&mut self) -> Hint {
        match self.undisclosed.pop_front() {
            Some(position) => {
                let digit = self.secret[position];
                debug!(position, remaining = self.undisclosed.len(), "Revealed hint");
                Hint::Revealed { position, digit }
            }
            None => Hint::Exhausted,
        }
    }

    /// Number of positions revealed so far.
    pub fn revealed(&self) -> usize {
        self.secret.len() - self.undisclosed.len()
    }

    /// True once every position is visible.
    pub fn is_exhausted(&self) -> bool {
        self.undisclosed.is_empty()
    }

    /// The secret with undisclosed positions replaced by [`MASK`].
    pub fn masked(&self) -> String {
        let revealed = self.revealed();
        self.secret
            .iter()
            .enumerate()
            .map(|(i, d)| if i < revealed { char::from(b'0' + d) } else { MASK })
            .collect()
    }
}
