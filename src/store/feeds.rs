use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{RankedPlayer, RawEntry, ResolvedData};

/// JSON feed directory shared with collector processes
///
/// Layout: `<data>/players.json` holds the ranked snapshot,
/// `<data>/entries/<source>.json` one file per collector, and
/// `<data>/resolved.json` is written back by the resolve command.
pub struct FeedStore {
    data_dir: PathBuf,
    entries_dir: PathBuf,
}

impl FeedStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let entries_dir = data_dir.join("entries");
        Self {
            data_dir,
            entries_dir,
        }
    }

    /// Load the ranked-player snapshot; a missing snapshot is fatal
    pub fn load_players(&self) -> Result<Vec<RankedPlayer>> {
        let path = self.players_path();
        let players: Vec<RankedPlayer> = self
            .read_json(&path)
            .with_context(|| format!("Failed to load ranked players from {}", path.display()))?;
        info!("Loaded {} ranked players from {}", players.len(), path.display());
        Ok(players)
    }

    /// Load and concatenate every collector feed, in file-name order
    pub fn load_entries(&self) -> Result<Vec<RawEntry>> {
        let mut entries = Vec::new();
        for path in self.entry_files()? {
            let batch = self.load_entry_file(&path)?;
            info!("Loaded {} entries from {}", batch.len(), path.display());
            entries.extend(batch);
        }
        Ok(entries)
    }

    /// Collector feed files, sorted so runs are reproducible
    pub fn entry_files(&self) -> Result<Vec<PathBuf>> {
        if !self.entries_dir.exists() {
            warn!("No entries directory at {}", self.entries_dir.display());
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.entries_dir)
            .with_context(|| format!("Failed to read {}", self.entries_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn load_entry_file(&self, path: &Path) -> Result<Vec<RawEntry>> {
        self.read_json(path)
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.json")
    }

    pub fn resolved_path(&self) -> PathBuf {
        self.data_dir.join("resolved.json")
    }

    /// Write the resolved output document as pretty JSON
    pub fn save_resolved(&self, data: &ResolvedData, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(data).context("Failed to serialize resolved data")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved resolved data to {}", path.display());
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data = serde_json::from_str(&json).with_context(|| {
            let head: String = json.chars().take(200).collect();
            format!("Failed to parse JSON from {:?}. First 200 chars: {}", path, head)
        })?;
        Ok(data)
    }
}
