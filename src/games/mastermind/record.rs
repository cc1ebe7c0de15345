//! Turn history and the archive of completed matches.

use super::{Feedback, Role, Sequence};
use derive_getters::Getters;
use derive_new::new;
use tracing::{info, instrument};

/// One scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct TurnRecord {
    /// The guess as submitted.
    guess: Sequence,
    /// Its score against the secret.
    feedback: Feedback,
}

/// Formats a turn list as `Guess #n: <guess> - <feedback>` lines.
#[instrument(skip_all, fields(turns = turns.len()))]
pub fn format_history(turns: &[TurnRecord]) -> String {
    if turns.is_empty() {
        return "No guesses yet.".to_string();
    }
    turns
        .iter()
        .enumerate()
        .map(|(i, t)| format!("Guess #{}: {} - {}", i + 1, t.guess, t.feedback))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A completed match, frozen at the moment it ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchRecord {
    /// 1-based position in the session.
    ordinal: usize,
    /// The secret that was being guessed.
    secret: Sequence,
    /// Who won.
    winner: Role,
    /// Every scored guess, in order.
    turns: Vec<TurnRecord>,
}

impl MatchRecord {
    /// Winner line followed by the full history.
    pub fn describe(&self) -> String {
        format!(
            "Game #{}: {} won. The secret code was {}.\n{}",
            self.ordinal,
            self.winner,
            self.secret,
            format_history(&self.turns)
        )
    }
}

/// Completed matches keyed by 1-based ordinal.
///
/// Ordinals are dense: the n-th archived match is always ordinal n.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchArchive {
    records: Vec<MatchRecord>,
}

impl MatchArchive {
    /// Empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a finished match under the next ordinal and returns it.
    #[instrument(skip(self, secret, turns), fields(turns = turns.len()))]
    pub fn archive(&mut self, secret: Sequence, winner: Role, turns: Vec<TurnRecord>) -> usize {
        let ordinal = self.records.len() + 1;
        self.records.push(MatchRecord {
            ordinal,
            secret,
            winner,
            turns,
        });
        info!(ordinal, %winner, "Archived match");
        ordinal
    }

    /// Number of completed matches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True before the first match completes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a match by 1-based ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&MatchRecord> {
        ordinal.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Response to `previous <n>`; `None` means the argument was unusable.
    #[instrument(skip(self))]
    pub fn lookup(&self, ordinal: Option<usize>) -> String {
        if self.records.is_empty() {
            return "No games have been completed yet.".to_string();
        }
        match ordinal.and_then(|n| self.get(n)) {
            Some(record) => record.describe(),
            None => format!(
                "Enter 'previous' followed by a game number from 1 to {}.",
                self.records.len()
            ),
        }
    }

    /// One line per match: `Game #n: <winner>`.
    pub fn summary(&self) -> String {
        if self.records.is_empty() {
            return "No games completed.".to_string();
        }
        self.records
            .iter()
            .map(|r| format!("Game #{}: {}", r.ordinal, r.winner))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(raw: &str) -> Sequence {
        Sequence::parse(raw, 4, 8).unwrap()
    }

    fn turn(secret: &str, guess: &str) -> TurnRecord {
        let guess = seq(guess);
        TurnRecord::new(guess.clone(), seq(secret).compare(&guess))
    }

    #[test]
    fn test_format_history_lines() {
        let turns = vec![turn("1234", "1243"), turn("1234", "1234")];
        assert_eq!(
            format_history(&turns),
            "Guess #1: 1243 - 4 correct numbers and 2 correct locations\n\
             Guess #2: 1234 - 4 correct numbers and 4 correct locations"
        );
        assert_eq!(format_history(&[]), "No guesses yet.");
    }

    #[test]
    fn test_archive_assigns_dense_ordinals() {
        let mut archive = MatchArchive::new();
        assert_eq!(archive.archive(seq("1234"), Role::Breaker, vec![]), 1);
        assert_eq!(archive.archive(seq("0000"), Role::Maker, vec![]), 2);
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.get(2).map(|r| *r.winner()), Some(Role::Maker));
        assert!(archive.get(0).is_none());
        assert!(archive.get(3).is_none());
    }

    #[test]
    fn test_lookup_reports_valid_range() {
        let mut archive = MatchArchive::new();
        assert_eq!(archive.lookup(Some(1)), "No games have been completed yet.");

        archive.archive(seq("1234"), Role::Breaker, vec![turn("1234", "1234")]);
        assert_eq!(
            archive.lookup(Some(2)),
            "Enter 'previous' followed by a game number from 1 to 1."
        );
        assert_eq!(
            archive.lookup(None),
            "Enter 'previous' followed by a game number from 1 to 1."
        );
        let found = archive.lookup(Some(1));
        assert!(found.starts_with("Game #1: Code Breaker won."));
        assert!(found.contains("Guess #1: 1234"));
    }

    #[test]
    fn test_summary_in_order() {
        let mut archive = MatchArchive::new();
        archive.archive(seq("1234"), Role::Maker, vec![]);
        archive.archive(seq("4321"), Role::Breaker, vec![]);
        assert_eq!(archive.summary(), "Game #1: Code Maker\nGame #2: Code Breaker");
    }
}
