use std::collections::{BTreeSet, HashMap, HashSet};

use log::info;

use crate::config::settings::AppConfig;
use crate::config::{AliasTable, CalendarTable};
use crate::domain::models::{MissingTournament, RankedPlayer, RawEntry, ResolvedPlayer};
use crate::matching;
use crate::normalize::{weeks, TournamentCanonicalizer};
use crate::reconcile::{self, ResolutionReport};

/// Outcome of one resolution run
pub struct Resolution {
    pub players: Vec<ResolvedPlayer>,
    pub weeks: Vec<String>,
    pub missing_tournaments: Vec<MissingTournament>,
    pub report: ResolutionReport,
}

/// End-to-end entity-resolution pipeline
///
/// Pure over its inputs: the same players and entries always resolve to the
/// same output, in player order. All I/O stays with the calling service.
pub struct Resolver {
    config: AppConfig,
    canonicalizer: TournamentCanonicalizer,
    calendar: CalendarTable,
}

impl Resolver {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            canonicalizer: TournamentCanonicalizer::new(AliasTable::builtin()),
            calendar: CalendarTable::builtin(),
        }
    }

    pub fn resolve(&self, players: &[RankedPlayer], entries: &[RawEntry]) -> Resolution {
        let mut report = ResolutionReport::default();
        let authoritative = self.config.resolver.authoritative_source;

        // 1. Canonical tournament names, calendar fills for blank tier/week
        let mut entries = self.enrich_entries(entries);
        info!("Canonicalized {} entries", entries.len());

        // 2. Merge close week labels across every source, calendar fills included
        let week_map = self.build_week_map(&entries);
        for entry in &mut entries {
            let normalized = weeks::normalize_week(&entry.week);
            entry.week = week_map.get(&normalized).cloned().unwrap_or(normalized);
        }

        // 3. Match ranked players to their entries
        let mut entry_map =
            matching::build_player_entry_map(players, &entries, &self.config.matching);

        // 4. Resolve abbreviated authoritative records
        reconcile::expand_abbreviations(players, &mut entry_map, &entries, authoritative, &mut report);

        // 5. Per player: fold duplicates, then strip stale promotion withdrawals
        let mut resolved = Vec::with_capacity(players.len());
        for player in players {
            let matched = entry_map.get(&player.key()).map_or(&[][..], Vec::as_slice);
            let records = reconcile::fold_entries(&player.name, matched, authoritative, &mut report);
            let records = reconcile::strip_promoted_withdrawals(&player.name, records, &mut report);
            resolved.push(ResolvedPlayer {
                rank: player.rank,
                name: player.name.clone(),
                gender: player.gender,
                country: player.country_code.clone(),
                entries: records,
            });
        }

        let weeks = self.collect_weeks(&resolved);
        let missing_tournaments = self.missing_tournaments(&resolved);

        Resolution {
            players: resolved,
            weeks,
            missing_tournaments,
            report,
        }
    }

    /// Week-merge map over the normalized labels of every entry
    fn build_week_map(&self, entries: &[RawEntry]) -> HashMap<String, String> {
        let labels: BTreeSet<String> = entries
            .iter()
            .map(|e| weeks::normalize_week(&e.week))
            .collect();
        weeks::merge_close_weeks(&labels, self.config.resolver.week_merge_window_days)
    }

    /// Canonical tournament names plus calendar fills for blank tier/week
    ///
    /// Must run before the week map is built: a filled week label takes part
    /// in close-week merging like any source-reported label.
    fn enrich_entries(&self, entries: &[RawEntry]) -> Vec<RawEntry> {
        entries
            .iter()
            .map(|entry| {
                let mut out = entry.clone();
                out.tournament = self.canonicalizer.canonicalize(&entry.tournament);
                if let Some(meta) = self.calendar.lookup(&out.tournament) {
                    if out.tier.trim().is_empty() {
                        out.tier = meta.tier.to_string();
                    }
                    if out.week.trim().is_empty() {
                        out.week = meta.dates.to_string();
                    }
                }
                out
            })
            .collect()
    }

    /// Distinct non-empty canonical week labels across resolved entries, ordered
    fn collect_weeks(&self, players: &[ResolvedPlayer]) -> Vec<String> {
        let labels: BTreeSet<&str> = players
            .iter()
            .flat_map(|p| p.entries.iter().map(|e| e.week.as_str()))
            .filter(|w| !w.is_empty())
            .collect();
        let mut ordered: Vec<String> = labels.into_iter().map(str::to_string).collect();
        ordered.sort_by_key(|w| weeks::week_sort_key(w));
        ordered
    }

    /// Calendar tournaments nothing resolved to, for calendar views
    fn missing_tournaments(&self, players: &[ResolvedPlayer]) -> Vec<MissingTournament> {
        let seen: HashSet<&str> = players
            .iter()
            .flat_map(|p| p.entries.iter().map(|e| e.tournament.as_str()))
            .collect();
        self.calendar
            .missing_from(&seen)
            .into_iter()
            .map(|meta| MissingTournament {
                name: meta.name.to_string(),
                city: meta.city.to_string(),
                country: meta.country.to_string(),
                surface: meta.surface.to_string(),
                dates: meta.dates.to_string(),
                tier: meta.tier.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Gender, Section};

    fn resolver() -> Resolver {
        Resolver::new(AppConfig::new())
    }

    fn alcaraz() -> RankedPlayer {
        RankedPlayer {
            name: "Carlos Alcaraz".to_string(),
            rank: 1,
            gender: Gender::M,
            country_code: "ESP".to_string(),
        }
    }

    fn entry(tournament: &str, week: &str, name: &str, source: &str) -> RawEntry {
        RawEntry {
            tournament: tournament.to_string(),
            tier: "ATP 500".to_string(),
            week: week.to_string(),
            section: Section::MainDraw,
            player_name: name.to_string(),
            player_rank: Some(1),
            player_country: "ESP".to_string(),
            withdrawn: false,
            reason: None,
            gender: Gender::M,
            source: source.to_string(),
            withdrawal_type: None,
        }
    }

    #[test]
    fn test_cross_source_spellings_resolve_to_one_record() {
        let players = [alcaraz()];
        let entries = [
            entry("ATP DOHA", "Feb 16", "Carlos Alcaraz", "A"),
            entry("Doha", "Feb 16-22", "Alcaraz, Carlos", "B"),
        ];

        let resolution = resolver().resolve(&players, &entries);

        assert_eq!(resolution.players.len(), 1);
        let records = &resolution.players[0].entries;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tournament, "Doha");
        assert_eq!(records[0].week, "Feb 16");
        assert_eq!(records[0].section, Section::MainDraw);
        assert!(!records[0].withdrawn);
    }

    #[test]
    fn test_calendar_fills_blank_tier_and_week() {
        let players = [alcaraz()];
        let mut sparse = entry("Qatar ExxonMobil Open", "", "Carlos Alcaraz", "A");
        sparse.tier = String::new();

        let resolution = resolver().resolve(&players, &[sparse]);

        let records = &resolution.players[0].entries;
        assert_eq!(records[0].tournament, "Doha");
        assert_eq!(records[0].tier, "ATP 500");
        assert_eq!(records[0].week, "Feb 16");
    }

    #[test]
    fn test_calendar_filled_week_joins_the_merge_window() {
        // The second entry's blank week is filled from the calendar (Feb 16),
        // which lies within the merge window of the first source's Feb 14.
        let players = [alcaraz()];
        let entries = [
            entry("Doha", "Feb 14", "Carlos Alcaraz", "A"),
            entry("Doha", "", "Alcaraz, Carlos", "B"),
        ];

        let resolution = resolver().resolve(&players, &entries);

        let records = &resolution.players[0].entries;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].week, "Feb 14");
        assert_eq!(resolution.weeks, vec!["Feb 14"]);
    }

    #[test]
    fn test_withdrawal_survives_the_whole_pipeline() {
        let players = [alcaraz()];
        let mut withdrawn = entry("Doha", "Feb 16-22", "Alcaraz, Carlos", "SpazioTennis");
        withdrawn.withdrawn = true;
        withdrawn.reason = Some("fatigue".to_string());
        let entries = [entry("ATP DOHA", "Feb 16", "Carlos Alcaraz", "TickTockTennis"), withdrawn];

        let resolution = resolver().resolve(&players, &entries);

        let records = &resolution.players[0].entries;
        assert_eq!(records.len(), 1);
        assert!(records[0].withdrawn);
        assert_eq!(records[0].reason.as_deref(), Some("fatigue"));
        assert_eq!(resolution.report.withdrawals_flipped(), 1);
    }

    #[test]
    fn test_abbreviated_withdrawal_reconciles_under_full_name() {
        let players = [RankedPlayer {
            name: "Aleksandar Vukic".to_string(),
            rank: 50,
            gender: Gender::M,
            country_code: "AUS".to_string(),
        }];
        let mut official = entry("Sydney", "Jan 6", "A. Vukic", "OfficialDraw");
        official.withdrawn = true;
        official.reason = Some("shoulder".to_string());
        let entries = [entry("Sydney", "Jan 6", "Aleksandar Vukic", "TickTockTennis"), official];

        let resolution = resolver().resolve(&players, &entries);

        let records = &resolution.players[0].entries;
        assert_eq!(records.len(), 1);
        assert!(records[0].withdrawn);
        assert_eq!(records[0].reason.as_deref(), Some("shoulder"));
        assert_eq!(records[0].source, "OfficialDraw");
        assert_eq!(resolution.report.names_expanded(), 1);
    }

    #[test]
    fn test_weeks_list_is_deduplicated_and_ordered() {
        let players = [alcaraz()];
        let entries = [
            entry("Acapulco", "Feb 23", "Carlos Alcaraz", "A"),
            entry("Doha", "Feb 16", "Carlos Alcaraz", "A"),
            entry("ATP DOHA", "Feb 16-22", "Carlos Alcaraz", "B"),
        ];

        let resolution = resolver().resolve(&players, &entries);

        assert_eq!(resolution.weeks, vec!["Feb 16", "Feb 23"]);
    }

    #[test]
    fn test_blank_week_never_reaches_the_weeks_list() {
        // A blank week for a tournament outside the calendar stays blank on
        // the record but is excluded from the weeks index.
        let players = [alcaraz()];
        let entries = [
            entry("Backyard Invitational", "", "Carlos Alcaraz", "A"),
            entry("Doha", "Feb 16", "Carlos Alcaraz", "A"),
        ];

        let resolution = resolver().resolve(&players, &entries);

        assert_eq!(resolution.weeks, vec!["Feb 16"]);
        assert_eq!(resolution.players[0].entries.len(), 2);
    }

    #[test]
    fn test_missing_tournaments_exclude_resolved_ones() {
        let players = [alcaraz()];
        let entries = [entry("Doha", "Feb 16", "Carlos Alcaraz", "A")];

        let resolution = resolver().resolve(&players, &entries);

        assert!(!resolution
            .missing_tournaments
            .iter()
            .any(|t| t.name == "Doha"));
        // Chronological: the season opener leads the missing list
        assert_eq!(resolution.missing_tournaments[0].name, "United Cup");
    }

    #[test]
    fn test_unmatched_player_resolves_to_empty_list() {
        let players = [alcaraz()];
        let entries = [entry("Doha", "Feb 16", "Novak Djokovic", "A")];

        let resolution = resolver().resolve(&players, &entries);

        assert!(resolution.players[0].entries.is_empty());
        assert!(resolution.weeks.is_empty());
    }
}
