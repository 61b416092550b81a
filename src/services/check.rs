use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use colored::Colorize;
use log::info;

use crate::store::FeedStore;

/// Structural validation of every feed file in a data directory
///
/// Prints one line per feed so collector failures are obvious before a
/// resolve run; exits non-zero when any feed fails to deserialize.
pub struct CheckService {
    store: FeedStore,
}

impl CheckService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            store: FeedStore::new(data_dir),
        }
    }

    pub fn run(&self) -> Result<()> {
        info!("=== Checking Feeds ===\n");

        let mut failures = 0;

        match self.store.load_players() {
            Ok(players) => {
                println!(
                    "{} players.json: {} ranked players",
                    "OK".green().bold(),
                    players.len()
                );
            }
            Err(e) => {
                failures += 1;
                println!("{} players.json: {e:#}", "FAIL".red().bold());
            }
        }

        let files = self.store.entry_files()?;
        if files.is_empty() {
            println!("{} no entry feeds found", "WARN".yellow().bold());
        }
        for path in &files {
            if self.check_entry_file(path).is_err() {
                failures += 1;
            }
        }

        if failures > 0 {
            bail!("{failures} feed(s) failed validation");
        }

        info!("\nAll feeds valid");
        Ok(())
    }

    fn check_entry_file(&self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.store.load_entry_file(path) {
            Ok(entries) => {
                let withdrawn = entries.iter().filter(|e| e.withdrawn).count();
                println!(
                    "{} {}: {} entries ({} withdrawn)",
                    "OK".green().bold(),
                    name,
                    entries.len(),
                    withdrawn
                );
                Ok(())
            }
            Err(e) => {
                println!("{} {}: {e:#}", "FAIL".red().bold(), name);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Gender, RankedPlayer, RawEntry, Section};
    use std::fs;
    use tempfile::TempDir;

    fn seed_players(dir: &TempDir) {
        let players = vec![RankedPlayer {
            name: "Carlos Alcaraz".to_string(),
            rank: 1,
            gender: Gender::M,
            country_code: "ESP".to_string(),
        }];
        fs::write(
            dir.path().join("players.json"),
            serde_json::to_string(&players).unwrap(),
        )
        .unwrap();
    }

    fn seed_entries(dir: &TempDir, file: &str) {
        let entries = vec![RawEntry {
            tournament: "Doha".to_string(),
            tier: "ATP 500".to_string(),
            week: "Feb 16".to_string(),
            section: Section::MainDraw,
            player_name: "Carlos Alcaraz".to_string(),
            player_rank: Some(1),
            player_country: "ESP".to_string(),
            withdrawn: false,
            reason: None,
            gender: Gender::M,
            source: "TickTockTennis".to_string(),
            withdrawal_type: None,
        }];
        fs::create_dir_all(dir.path().join("entries")).unwrap();
        fs::write(
            dir.path().join("entries").join(file),
            serde_json::to_string(&entries).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_valid_feeds_pass() {
        let dir = TempDir::new().unwrap();
        seed_players(&dir);
        seed_entries(&dir, "ticktock.json");

        let service = CheckService::new(dir.path().to_path_buf());
        assert!(service.run().is_ok());
    }

    #[test]
    fn test_missing_players_feed_fails() {
        let dir = TempDir::new().unwrap();
        seed_entries(&dir, "ticktock.json");

        let service = CheckService::new(dir.path().to_path_buf());
        assert!(service.run().is_err());
    }

    #[test]
    fn test_one_broken_feed_fails_the_check() {
        let dir = TempDir::new().unwrap();
        seed_players(&dir);
        seed_entries(&dir, "ticktock.json");
        fs::write(dir.path().join("entries/broken.json"), "[{").unwrap();

        let service = CheckService::new(dir.path().to_path_buf());
        let err = service.run().unwrap_err();
        assert!(err.to_string().contains("1 feed(s)"));
    }
}
