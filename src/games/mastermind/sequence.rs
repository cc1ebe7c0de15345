//! Digit sequences: the secret code and every guess made against it.

use super::feedback::Feedback;
use derive_more::Display;
use tracing::instrument;

/// Why a raw string was rejected as a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SequenceError {
    /// The input has the wrong number of characters.
    #[display("Expected {} digits, got {}", expected, actual)]
    WrongLength {
        /// Configured sequence length.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The input contains a character that is not an ASCII digit.
    #[display("'{}' is not a digit", _0)]
    NotADigit(char),

    /// A digit falls outside `[0, range)`.
    #[display("Digit {} is outside 0-{}", digit, range.saturating_sub(1))]
    OutOfRange {
        /// The offending digit.
        digit: u8,
        /// Exclusive upper bound.
        range: u8,
    },
}

impl std::error::Error for SequenceError {}

/// An immutable, validated sequence of decimal digits.
///
/// A `Sequence` can only be built through [`Sequence::parse`] or
/// [`Sequence::from_digits`], so every value in circulation already
/// satisfies the length, digit and range rules it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    digits: Vec<u8>,
    range: u8,
}

impl Sequence {
    /// Parses raw player input into a sequence.
    ///
    /// # Errors
    ///
    /// Rejects input whose character count differs from `length`, that
    /// contains anything other than ASCII digits, or that holds a digit
    /// `>= range`. Length is checked first, so `"12 4"` against length 3
    /// reports the length rather than the space.
    #[instrument(level = "trace")]
    pub fn parse(raw: &str, length: usize, range: u8) -> Result<Self, SequenceError> {
        let actual = raw.chars().count();
        if actual != length {
            return Err(SequenceError::WrongLength {
                expected: length,
                actual,
            });
        }

        let mut digits = Vec::with_capacity(length);
        for c in raw.chars() {
            let digit = c.to_digit(10).ok_or(SequenceError::NotADigit(c))? as u8;
            if digit >= range {
                return Err(SequenceError::OutOfRange { digit, range });
            }
            digits.push(digit);
        }

        Ok(Self { digits, range })
    }

    /// Builds a sequence from numeric digits, applying the same rules as
    /// [`Sequence::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] for any digit `>= range` or any
    /// value that is not a single decimal digit.
    #[instrument(level = "trace")]
    pub fn from_digits(digits: Vec<u8>, range: u8) -> Result<Self, SequenceError> {
        if let Some(&digit) = digits.iter().find(|&&d| d >= range || d > 9) {
            return Err(SequenceError::OutOfRange { digit, range });
        }
        Ok(Self { digits, range })
    }

    /// Wraps digits already known to be below `range`.
    pub(crate) fn from_trusted(digits: Vec<u8>, range: u8) -> Self {
        debug_assert!(digits.iter().all(|&d| d < range.max(1) && d <= 9));
        Self { digits, range }
    }

    /// Returns true iff `raw` is a valid sequence for the given rules.
    pub fn validate(raw: &str, length: usize, range: u8) -> bool {
        Self::parse(raw, length, range).is_ok()
    }

    /// Scores `guess` against `self` (the secret).
    ///
    /// The exact-location count is the number of aligned positions holding
    /// the same digit. The digit-match count is the multiset overlap: for
    /// every digit present in the guess, the smaller of its occurrence counts
    /// on each side. Exact matches are a subset of the overlap and are not
    /// subtracted from it.
    #[instrument(level = "trace", skip_all)]
    pub fn compare(&self, guess: &Sequence) -> Feedback {
        let exact = self
            .digits
            .iter()
            .zip(&guess.digits)
            .filter(|(a, b)| a == b)
            .count();

        let secret_freq = frequencies(&self.digits);
        let guess_freq = frequencies(&guess.digits);
        let overlap = guess_freq
            .iter()
            .zip(secret_freq.iter())
            .map(|(g, s)| (*g).min(*s))
            .sum();

        Feedback::scored(overlap, exact, self.len())
    }

    /// Returns the digits in order.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Returns the exclusive digit bound this sequence was validated against.
    pub fn range(&self) -> u8 {
        self.range
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True for the zero-length sequence.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

fn frequencies(digits: &[u8]) -> [usize; 10] {
    let mut freq = [0usize; 10];
    for &d in digits {
        freq[usize::from(d)] += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(raw: &str) -> Sequence {
        Sequence::parse(raw, raw.len(), 8).expect("valid test sequence")
    }

    #[test]
    fn test_validate_accepts_in_range_digits() {
        assert!(Sequence::validate("0123", 4, 8));
        assert!(Sequence::validate("7777", 4, 8));
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        assert!(!Sequence::validate("123", 4, 8));
        assert!(!Sequence::validate("", 4, 8));
        assert!(!Sequence::validate("12345", 4, 8));
    }

    #[test]
    fn test_validate_rejects_non_digits() {
        assert!(!Sequence::validate("1.23", 4, 8));
        assert!(!Sequence::validate("12 4", 4, 8));
        assert!(!Sequence::validate("abcd", 4, 8));
        assert!(!Sequence::validate("１２３４", 4, 8));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(!Sequence::validate("1239", 4, 8));
        assert_eq!(
            Sequence::parse("1238", 4, 8),
            Err(SequenceError::OutOfRange { digit: 8, range: 8 })
        );
    }

    #[test]
    fn test_empty_sequence_is_valid_for_zero_length() {
        let empty = Sequence::parse("", 0, 8).unwrap();
        assert!(empty.is_empty());
        assert!(empty.compare(&empty).is_perfect());
    }

    #[test]
    fn test_parse_reports_first_problem() {
        assert_eq!(
            Sequence::parse("12a", 4, 8),
            Err(SequenceError::WrongLength { expected: 4, actual: 3 })
        );
        assert_eq!(Sequence::parse("12a4", 4, 8), Err(SequenceError::NotADigit('a')));
    }

    #[test]
    fn test_compare_self_is_perfect() {
        for raw in ["0000", "1234", "7070", "1122"] {
            let s = seq(raw);
            let feedback = s.compare(&s);
            assert_eq!(feedback.exact_matches(), 4);
            assert_eq!(feedback.digit_matches(), 4);
        }
    }

    #[test]
    fn test_compare_duplicates_swapped() {
        let feedback = seq("1122").compare(&seq("2211"));
        assert_eq!(feedback.exact_matches(), 0);
        assert_eq!(feedback.digit_matches(), 4);
    }

    #[test]
    fn test_compare_duplicates_counted_once() {
        let feedback = seq("1234").compare(&seq("1111"));
        assert_eq!(feedback.exact_matches(), 1);
        assert_eq!(feedback.digit_matches(), 1);
    }

    #[test]
    fn test_digit_matches_symmetric() {
        let pairs = [("1234", "4321"), ("1122", "1200"), ("0070", "7007"), ("5566", "6655")];
        for (a, b) in pairs {
            let ab = seq(a).compare(&seq(b));
            let ba = seq(b).compare(&seq(a));
            assert_eq!(ab.digit_matches(), ba.digit_matches());
            assert_eq!(ab.exact_matches(), ba.exact_matches());
            assert!(ab.digit_matches() >= ab.exact_matches());
        }
    }

    #[test]
    fn test_display_renders_digits() {
        assert_eq!(seq("0705").to_string(), "0705");
    }

    #[test]
    fn test_from_digits_checks_range() {
        assert!(Sequence::from_digits(vec![0, 7, 3], 8).is_ok());
        assert!(Sequence::from_digits(vec![8], 8).is_err());
    }
}
