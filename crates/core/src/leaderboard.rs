//! Leaderboard - top survival times
//!
//! Entries rank by total seconds survived, longest first. Storage is up to the
//! caller; this module only orders and trims.

use serde::{Deserialize, Serialize};

use crate::types::LEADERBOARD_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub name: String,
    pub formatted_time: String,
    pub total_seconds: u64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, total_seconds: u64) -> Self {
        Self {
            name: name.into(),
            formatted_time: format_time(total_seconds),
            total_seconds,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, re-sorting and trimming to capacity
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.entries.sort_by(|a, b| b.total_seconds.cmp(&a.total_seconds));
        board.entries.truncate(LEADERBOARD_CAPACITY);
        board
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Whether a run of `total_seconds` would make the board
    pub fn qualifies(&self, total_seconds: u64) -> bool {
        self.entries.len() < LEADERBOARD_CAPACITY
            || self
                .entries
                .last()
                .is_some_and(|last| total_seconds > last.total_seconds)
    }

    /// Insert an entry; returns its 0-based rank if it made the board.
    ///
    /// Ties rank below existing entries with the same time.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.total_seconds) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| entry.total_seconds > e.total_seconds)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(rank)
    }
}

/// `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(board: &Leaderboard) -> Vec<u64> {
        board.entries().iter().map(|e| e.total_seconds).collect()
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3599), "59:59");
        assert_eq!(format_time(3661), "1:01:01");
    }

    #[test]
    fn keeps_top_five_longest() {
        let mut board = Leaderboard::new();
        for secs in [30, 10, 50, 20, 40, 60, 5] {
            board.record(HighScoreEntry::new("p", secs));
        }
        assert_eq!(times(&board), vec![60, 50, 40, 30, 20]);
    }

    #[test]
    fn record_reports_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record(HighScoreEntry::new("a", 10)), Some(0));
        assert_eq!(board.record(HighScoreEntry::new("b", 20)), Some(0));
        assert_eq!(board.record(HighScoreEntry::new("c", 15)), Some(1));
    }

    #[test]
    fn tie_ranks_after_existing() {
        let mut board = Leaderboard::new();
        board.record(HighScoreEntry::new("first", 10));
        assert_eq!(board.record(HighScoreEntry::new("second", 10)), Some(1));
        assert_eq!(board.entries()[0].name, "first");
    }

    #[test]
    fn full_board_rejects_short_runs() {
        let mut board = Leaderboard::new();
        for secs in [10, 20, 30, 40, 50] {
            board.record(HighScoreEntry::new("p", secs));
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.record(HighScoreEntry::new("late", 10)), None);
        assert_eq!(board.record(HighScoreEntry::new("good", 11)), Some(4));
    }

    #[test]
    fn from_entries_sorts_and_trims() {
        let entries = [1, 9, 3, 7, 5, 8]
            .iter()
            .map(|&s| HighScoreEntry::new("p", s))
            .collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(times(&board), vec![9, 8, 7, 5, 3]);
    }

    #[test]
    fn entry_json_uses_camel_case() {
        let json = serde_json::to_string(&HighScoreEntry::new("ann", 61)).unwrap();
        assert_eq!(
            json,
            r#"{"name":"ann","formattedTime":"01:01","totalSeconds":61}"#
        );
    }
}
