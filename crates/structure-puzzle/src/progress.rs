//! Per-level progress across finished sessions.
//!
//! The book lives in memory and serializes with [`serde`]. Where it is
//! stored is up to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::puzzle::StructureKind;

/// Best results for one level
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// Won at least once
    pub completed: bool,
    pub best_score: u32,
    /// Fastest time in seconds, ignoring zero-second results
    pub best_time_secs: Option<u64>,
    /// Fewest moves, ignoring zero-move results
    pub best_moves: Option<u32>,
    /// Finished sessions, won or lost
    pub attempts: u32,
}

impl LevelProgress {
    fn record(&mut self, won: bool, score: u32, time_secs: u64, moves: u32) {
        self.completed |= won;
        self.best_score = self.best_score.max(score);
        if time_secs > 0 {
            self.best_time_secs = Some(self.best_time_secs.map_or(time_secs, |t| t.min(time_secs)));
        }
        if moves > 0 {
            self.best_moves = Some(self.best_moves.map_or(moves, |m| m.min(moves)));
        }
        self.attempts += 1;
    }
}

/// Totals over every level in a [`ProgressBook`]
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_score: u64,
    pub total_time_secs: u64,
    pub levels_completed: usize,
    pub attempts: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBook {
    levels: BTreeMap<StructureKind, BTreeMap<u32, LevelProgress>>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the result of a finished session into the book
    pub fn record(
        &mut self,
        structure: StructureKind,
        level: u32,
        won: bool,
        score: u32,
        time_secs: u64,
        moves: u32,
    ) -> &LevelProgress {
        let entry = self
            .levels
            .entry(structure)
            .or_default()
            .entry(level)
            .or_default();
        entry.record(won, score, time_secs, moves);
        entry
    }

    pub fn get(&self, structure: StructureKind, level: u32) -> Option<&LevelProgress> {
        self.levels.get(&structure)?.get(&level)
    }

    pub fn is_completed(&self, structure: StructureKind, level: u32) -> bool {
        self.get(structure, level).is_some_and(|p| p.completed)
    }

    pub fn summary(&self) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for progress in self.levels.values().flat_map(BTreeMap::values) {
            summary.total_score += u64::from(progress.best_score);
            summary.total_time_secs += progress.best_time_secs.unwrap_or(0);
            summary.attempts += u64::from(progress.attempts);
            if progress.completed {
                summary.levels_completed += 1;
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bests_are_kept() {
        let mut book = ProgressBook::new();
        book.record(StructureKind::Stack, 1, true, 105, 10, 2);
        book.record(StructureKind::Stack, 1, true, 90, 8, 3);
        let progress = book.record(StructureKind::Stack, 1, false, 0, 40, 4).clone();

        assert!(progress.completed);
        assert_eq!(progress.best_score, 105);
        assert_eq!(progress.best_time_secs, Some(8));
        assert_eq!(progress.best_moves, Some(2));
        assert_eq!(progress.attempts, 3);
    }

    #[test]
    fn test_zero_results_do_not_count_as_bests() {
        let mut book = ProgressBook::new();
        book.record(StructureKind::Graph, 2, true, 140, 0, 0);
        let progress = book.get(StructureKind::Graph, 2).unwrap();
        assert_eq!(progress.best_time_secs, None);
        assert_eq!(progress.best_moves, None);
    }

    #[test]
    fn test_loss_does_not_complete() {
        let mut book = ProgressBook::new();
        book.record(StructureKind::Queue, 3, false, 0, 12, 5);
        assert!(!book.is_completed(StructureKind::Queue, 3));
        assert!(!book.is_completed(StructureKind::Queue, 4));
        assert!(!book.is_empty());
    }

    #[test]
    fn test_summary_counts_distinct_levels() {
        let mut book = ProgressBook::new();
        book.record(StructureKind::Stack, 1, true, 100, 10, 1);
        book.record(StructureKind::Stack, 1, true, 120, 5, 1);
        book.record(StructureKind::Tree, 4, true, 60, 20, 3);
        book.record(StructureKind::Tree, 5, false, 0, 30, 9);

        let summary = book.summary();
        assert_eq!(summary.levels_completed, 2);
        assert_eq!(summary.total_score, 180);
        assert_eq!(summary.total_time_secs, 55);
        assert_eq!(summary.attempts, 4);
    }

    #[test]
    fn test_book_serializes() {
        let mut book = ProgressBook::new();
        book.record(StructureKind::LinkedList, 9, true, 77, 14, 6);

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"linkedlist\""));
        assert!(json.contains("\"bestScore\":77"));

        let restored: ProgressBook = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, book);
    }
}
