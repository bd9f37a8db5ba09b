//! High score leaderboard
//!
//! Lives only in process memory: survives restarts, never written to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached when the run ended
    pub level: u32,
    /// Session tick at which the run ended
    pub tick: u64,
}

/// High score leaderboard (sorted descending by score)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run; returns the 1-indexed rank if it made the board
    pub fn add_score(&mut self, score: u64, level: u32, tick: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, level, tick };

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score seen this process, 0 when nothing has been recorded
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1, 10), None);
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), 0);
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 1, 100), Some(1));
        assert_eq!(scores.add_score(200, 3, 200), Some(1));
        assert_eq!(scores.add_score(100, 2, 300), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![200, 100, 50]);
        assert_eq!(scores.top_score(), 200);
    }

    #[test]
    fn test_tie_ranks_behind_existing() {
        let mut scores = HighScores::new();
        scores.add_score(100, 2, 1);
        assert_eq!(scores.add_score(100, 2, 2), Some(2));
        assert_eq!(scores.entries[0].tick, 1);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 1, i);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 99), None);
        assert_eq!(scores.add_score(15, 1, 99), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }
}
