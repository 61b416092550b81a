use std::collections::HashMap;

use crate::domain::models::{PlayerEntryRecord, RawEntry, Section};
use crate::normalize::weeks;
use crate::reconcile::report::{ResolutionEvent, ResolutionReport};

/// Merge lifecycle of one (tournament, section, week) slot
#[derive(Debug, Clone, Copy, PartialEq)]
enum MergeState {
    Active,
    Withdrawn,
    WithdrawnWithReason,
}

impl MergeState {
    fn seed(entry: &RawEntry) -> Self {
        if !entry.withdrawn {
            MergeState::Active
        } else if entry.reason_text().is_some() {
            MergeState::WithdrawnWithReason
        } else {
            MergeState::Withdrawn
        }
    }
}

/// Fold one player's entries into deduplicated records
///
/// Entries sharing (tournament, section, week) collapse into a single
/// record. The first entry seen wins the descriptive fields; later
/// duplicates can only flip an active record to withdrawn, supply a more
/// specific withdrawal reason, or (for the authoritative source) take over
/// source and withdrawal type. Output is ordered chronologically with
/// unparseable weeks last.
pub fn fold_entries(
    player: &str,
    entries: &[RawEntry],
    authoritative_source: &str,
    report: &mut ResolutionReport,
) -> Vec<PlayerEntryRecord> {
    let mut index: HashMap<(String, Section, String), usize> = HashMap::new();
    let mut slots: Vec<(PlayerEntryRecord, MergeState)> = Vec::new();

    for entry in entries {
        let key = (entry.tournament.clone(), entry.section, entry.week.clone());
        match index.get(&key) {
            None => {
                index.insert(key, slots.len());
                slots.push((PlayerEntryRecord::from_entry(entry), MergeState::seed(entry)));
            }
            Some(&slot) => {
                let (record, state) = &mut slots[slot];
                merge_duplicate(player, record, state, entry, authoritative_source, report);
            }
        }
    }

    let mut records: Vec<PlayerEntryRecord> = slots.into_iter().map(|(record, _)| record).collect();
    records.sort_by_key(|r| weeks::week_sort_key(&r.week));
    records
}

fn merge_duplicate(
    player: &str,
    record: &mut PlayerEntryRecord,
    state: &mut MergeState,
    entry: &RawEntry,
    authoritative_source: &str,
    report: &mut ResolutionReport,
) {
    if !entry.withdrawn {
        // First-seen wins; an active duplicate never un-withdraws a record
        report.record(ResolutionEvent::DuplicateFolded {
            player: player.to_string(),
            tournament: record.tournament.clone(),
        });
        return;
    }

    if *state == MergeState::Active {
        record.withdrawn = true;
        record.source = entry.source.clone();
        record.reason = entry.reason_text().map(str::to_string);
        record.withdrawal_type = entry.withdrawal_type.clone();
        *state = MergeState::seed(entry);
        report.record(ResolutionEvent::WithdrawalFlipped {
            player: player.to_string(),
            tournament: record.tournament.clone(),
            source: entry.source.clone(),
        });
        return;
    }

    // Both sides agree on withdrawn: the more specific reason wins, and the
    // authoritative source additionally takes over source and withdrawal type.
    let authoritative = entry.source == authoritative_source && entry.reason_text().is_some();
    let adopt_reason = more_specific(entry.reason_text(), record.reason.as_deref());

    if authoritative {
        record.source = entry.source.clone();
        record.withdrawal_type = entry.withdrawal_type.clone();
        if adopt_reason {
            record.reason = entry.reason_text().map(str::to_string);
        }
        *state = MergeState::WithdrawnWithReason;
    } else if adopt_reason {
        record.reason = entry.reason_text().map(str::to_string);
        if record.withdrawal_type.is_none() {
            record.withdrawal_type = entry.withdrawal_type.clone();
        }
        *state = MergeState::WithdrawnWithReason;
    }

    if adopt_reason {
        report.record(ResolutionEvent::ReasonAdopted {
            player: player.to_string(),
            tournament: record.tournament.clone(),
        });
    } else {
        report.record(ResolutionEvent::DuplicateFolded {
            player: player.to_string(),
            tournament: record.tournament.clone(),
        });
    }
}

/// Non-empty beats empty, longer beats shorter, ties keep the existing text
pub(crate) fn more_specific(incoming: Option<&str>, current: Option<&str>) -> bool {
    match (incoming, current) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(incoming), Some(current)) => incoming.len() > current.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tournament: &str, week: &str, source: &str, withdrawn: bool) -> RawEntry {
        RawEntry {
            tournament: tournament.to_string(),
            tier: "ATP 500".to_string(),
            week: week.to_string(),
            section: Section::MainDraw,
            player_name: "Carlos Alcaraz".to_string(),
            player_rank: Some(1),
            player_country: "ESP".to_string(),
            withdrawn,
            reason: None,
            gender: crate::domain::models::Gender::M,
            source: source.to_string(),
            withdrawal_type: None,
        }
    }

    fn fold(entries: &[RawEntry]) -> (Vec<PlayerEntryRecord>, ResolutionReport) {
        let mut report = ResolutionReport::default();
        let records = fold_entries("Carlos Alcaraz", entries, "OfficialDraw", &mut report);
        (records, report)
    }

    #[test]
    fn test_withdrawal_beats_active() {
        let entries = [
            entry("Doha", "Feb 16", "TickTockTennis", false),
            entry("Doha", "Feb 16", "SpazioTennis", true),
        ];
        let (records, report) = fold(&entries);

        assert_eq!(records.len(), 1);
        assert!(records[0].withdrawn);
        assert_eq!(records[0].source, "SpazioTennis");
        assert_eq!(report.withdrawals_flipped(), 1);
    }

    #[test]
    fn test_active_duplicate_never_unwithdraws() {
        let entries = [
            entry("Doha", "Feb 16", "SpazioTennis", true),
            entry("Doha", "Feb 16", "TickTockTennis", false),
        ];
        let (records, _) = fold(&entries);

        assert_eq!(records.len(), 1);
        assert!(records[0].withdrawn);
        assert_eq!(records[0].source, "SpazioTennis");
    }

    #[test]
    fn test_first_seen_wins_descriptive_fields() {
        let mut second = entry("Doha", "Feb 16", "SpazioTennis", false);
        second.tier = "ATP 1000".to_string();
        let entries = [entry("Doha", "Feb 16", "TickTockTennis", false), second];
        let (records, report) = fold(&entries);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tier, "ATP 500");
        assert_eq!(records[0].source, "TickTockTennis");
        assert_eq!(report.duplicates_folded(), 1);
    }

    #[test]
    fn test_authoritative_reason_overwrites() {
        let mut official = entry("Doha", "Feb 16", "OfficialDraw", true);
        official.reason = Some("left knee injury".to_string());
        official.withdrawal_type = Some("withdrawal".to_string());
        let entries = [entry("Doha", "Feb 16", "TickTockTennis", true), official];
        let (records, report) = fold(&entries);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, "OfficialDraw");
        assert_eq!(records[0].reason.as_deref(), Some("left knee injury"));
        assert_eq!(records[0].withdrawal_type.as_deref(), Some("withdrawal"));
        assert_eq!(report.reasons_adopted(), 1);
    }

    #[test]
    fn test_less_specific_reason_is_not_a_downgrade() {
        let mut first = entry("Doha", "Feb 16", "OfficialDraw", true);
        first.reason = Some("left knee injury".to_string());
        let mut second = entry("Doha", "Feb 16", "OfficialDraw", true);
        second.reason = Some("injury".to_string());
        let (records, _) = fold(&[first, second]);

        assert_eq!(records[0].reason.as_deref(), Some("left knee injury"));
    }

    #[test]
    fn test_any_source_can_enrich_a_reasonless_withdrawal() {
        let mut second = entry("Doha", "Feb 16", "SpazioTennis", true);
        second.reason = Some("knee".to_string());
        let entries = [entry("Doha", "Feb 16", "TickTockTennis", true), second];
        let (records, _) = fold(&entries);

        assert_eq!(records[0].reason.as_deref(), Some("knee"));
        // Only the authoritative source may take over the source field
        assert_eq!(records[0].source, "TickTockTennis");
    }

    #[test]
    fn test_sections_keep_separate_slots() {
        let mut qualifying = entry("Doha", "Feb 16", "TickTockTennis", false);
        qualifying.section = Section::Qualifying;
        let entries = [entry("Doha", "Feb 16", "TickTockTennis", false), qualifying];
        let (records, _) = fold(&entries);

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_output_is_chronological_with_unparseable_last() {
        let entries = [
            entry("Indian Wells", "TBD", "TickTockTennis", false),
            entry("Acapulco", "Feb 23", "TickTockTennis", false),
            entry("Doha", "Feb 16", "TickTockTennis", false),
        ];
        let (records, _) = fold(&entries);

        let order: Vec<&str> = records.iter().map(|r| r.tournament.as_str()).collect();
        assert_eq!(order, vec!["Doha", "Acapulco", "Indian Wells"]);
    }
}
