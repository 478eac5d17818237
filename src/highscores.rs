//! JSON-file persistence for the leaderboard.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{HighScoreEntry, Leaderboard};

/// A leaderboard stored as a JSON array of entries at `path`.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored board. A missing file is an empty board.
    pub fn load(&self) -> Result<Leaderboard> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Leaderboard::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read scores {}", self.path.display()))
            }
        };
        let entries: Vec<HighScoreEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("parse scores {}", self.path.display()))?;
        Ok(Leaderboard::from_entries(entries))
    }

    pub fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create scores dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(board).context("serialize scores")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write scores {}", self.path.display()))?;
        Ok(())
    }

    /// Record an entry into `board` and persist it if it ranked.
    pub fn record(&self, board: &mut Leaderboard, entry: HighScoreEntry) -> Result<Option<usize>> {
        let rank = board.record(entry);
        if rank.is_some() {
            self.save(board)?;
        }
        Ok(rank)
    }
}
