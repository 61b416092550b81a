use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::models::{Gender, RankedPlayer, RawEntry, ResolutionStats, ResolvedData};
use crate::reconcile::ResolutionReport;
use crate::resolver::Resolver;
use crate::store::FeedStore;

/// Per-run knobs for the resolve command
pub struct ResolveOptions {
    pub data_dir: PathBuf,
    pub output: Option<PathBuf>,
    pub gender: Option<Gender>,
    pub max_rank: u32,
}

pub struct ResolutionService {
    store: FeedStore,
    resolver: Resolver,
    options: ResolveOptions,
}

impl ResolutionService {
    pub fn new(config: AppConfig, options: ResolveOptions) -> Self {
        Self {
            store: FeedStore::new(&options.data_dir),
            resolver: Resolver::new(config),
            options,
        }
    }

    pub fn run(&self) -> Result<()> {
        info!("=== Starting Entry List Resolution ===\n");

        // Step 1: Load feeds
        info!("Step 1: Loading feeds...");
        let players = self.load_players()?;
        let entries = self.load_entries()?;
        info!(
            "  → {} ranked players, {} raw entries in scope\n",
            players.len(),
            entries.len()
        );

        // Step 2: Resolve entries
        info!("Step 2: Resolving entries...");
        let resolution = self.resolver.resolve(&players, &entries);
        self.log_report(&resolution.report);

        // Step 3: Write the output document
        info!("Step 3: Writing resolved data...");
        let data = ResolvedData {
            generated_at: Utc::now().to_rfc3339(),
            stats: ResolutionStats::compute(&resolution.players),
            players: resolution.players,
            weeks: resolution.weeks,
            missing_tournaments: resolution.missing_tournaments,
        };
        let path = self
            .options
            .output
            .clone()
            .unwrap_or_else(|| self.store.resolved_path());
        self.store.save_resolved(&data, &path)?;
        info!(
            "  → {}/{} players with entries, {} records across {} tournaments\n",
            data.stats.players_with_entries,
            data.stats.total_players,
            data.stats.total_entries,
            data.stats.unique_tournaments
        );

        info!("=== Resolution Complete ===");
        Ok(())
    }

    /// Ranked snapshot filtered to the run's scope, document order
    fn load_players(&self) -> Result<Vec<RankedPlayer>> {
        let mut players = self.store.load_players()?;
        players.retain(|p| p.rank <= self.options.max_rank);
        if let Some(gender) = self.options.gender {
            players.retain(|p| p.gender == gender);
        }
        // Document order: women first, then rank
        players.sort_by(|a, b| {
            a.gender
                .as_str()
                .cmp(b.gender.as_str())
                .then_with(|| a.rank.cmp(&b.rank))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(players)
    }

    fn load_entries(&self) -> Result<Vec<RawEntry>> {
        let mut entries = self.store.load_entries()?;
        if let Some(gender) = self.options.gender {
            entries.retain(|e| e.gender == gender);
        }
        Ok(entries)
    }

    fn log_report(&self, report: &ResolutionReport) {
        info!(
            "  → {} duplicates folded, {} withdrawals flipped",
            report.duplicates_folded(),
            report.withdrawals_flipped()
        );
        info!(
            "  → {} reasons adopted, {} reasons attached",
            report.reasons_adopted(),
            report.reasons_attached()
        );
        info!(
            "  → {} names expanded, {} expansions discarded",
            report.names_expanded(),
            report.expansions_discarded()
        );
        info!(
            "  → {} stale promotion withdrawals removed\n",
            report.promotions_stripped()
        );
    }
}
