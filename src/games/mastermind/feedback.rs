//! Scoring result of comparing a guess against the secret.

use derive_more::Display;
use tracing::instrument;

/// Counts that cannot describe a real comparison.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(
    "Invalid feedback: {} exact and {} digit matches for length {}",
    exact_matches,
    digit_matches,
    length
)]
pub struct FeedbackError {
    /// Requested digit-match count.
    pub digit_matches: usize,
    /// Requested exact-location count.
    pub exact_matches: usize,
    /// Sequence length.
    pub length: usize,
}

impl std::error::Error for FeedbackError {}

/// Result of one comparison.
///
/// Always satisfies `exact_matches <= digit_matches <= length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    digit_matches: usize,
    exact_matches: usize,
    length: usize,
}

impl Feedback {
    /// Creates feedback from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError`] unless `exact <= digit <= length`.
    #[instrument]
    pub fn new(
        digit_matches: usize,
        exact_matches: usize,
        length: usize,
    ) -> Result<Self, FeedbackError> {
        if exact_matches > digit_matches || digit_matches > length {
            return Err(FeedbackError {
                digit_matches,
                exact_matches,
                length,
            });
        }
        Ok(Self {
            digit_matches,
            exact_matches,
            length,
        })
    }

    /// Comparison output; the counts are correct by construction.
    pub(super) fn scored(digit_matches: usize, exact_matches: usize, length: usize) -> Self {
        debug_assert!(exact_matches <= digit_matches && digit_matches <= length);
        Self {
            digit_matches,
            exact_matches,
            length,
        }
    }

    /// Total multiset overlap ("correct numbers").
    pub fn digit_matches(&self) -> usize {
        self.digit_matches
    }

    /// Aligned positions ("correct locations").
    pub fn exact_matches(&self) -> usize {
        self.exact_matches
    }

    /// Length of the compared sequences.
    pub fn length(&self) -> usize {
        self.length
    }

    /// True when the guess reproduces the secret.
    pub fn is_perfect(&self) -> bool {
        self.exact_matches == self.length && self.digit_matches == self.length
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} correct number{} and {} correct location{}",
            self.digit_matches,
            plural(self.digit_matches),
            self.exact_matches,
            plural(self.exact_matches)
        )
    }
}

/// Noun suffix for a count.
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pluralizes_independently() {
        let cases = [
            ((1, 1, 4), "1 correct number and 1 correct location"),
            ((2, 1, 4), "2 correct numbers and 1 correct location"),
            ((0, 0, 4), "0 correct numbers and 0 correct locations"),
            ((1, 0, 4), "1 correct number and 0 correct locations"),
        ];
        for ((digits, exact, len), expected) in cases {
            assert_eq!(Feedback::new(digits, exact, len).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_is_perfect_requires_both_counts() {
        assert!(Feedback::new(4, 4, 4).unwrap().is_perfect());
        assert!(!Feedback::new(4, 3, 4).unwrap().is_perfect());
        assert!(!Feedback::new(3, 3, 4).unwrap().is_perfect());
    }

    #[test]
    fn test_new_rejects_impossible_counts() {
        assert!(Feedback::new(1, 2, 4).is_err());
        assert!(Feedback::new(5, 0, 4).is_err());
    }
}
