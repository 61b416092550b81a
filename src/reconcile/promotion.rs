use crate::domain::models::PlayerEntryRecord;
use crate::reconcile::report::{ResolutionEvent, ResolutionReport};

/// Remove withdrawn records contradicted by a higher-section active entry
///
/// Promotion from a lower section into a higher one is sometimes reported
/// by sources as a withdrawal from the lower section. Once a non-withdrawn
/// record exists for the same tournament and week in a strictly
/// higher-priority section, the lower withdrawal is a stale signal.
pub fn strip_promoted_withdrawals(
    player: &str,
    records: Vec<PlayerEntryRecord>,
    report: &mut ResolutionReport,
) -> Vec<PlayerEntryRecord> {
    let stale: Vec<bool> = records
        .iter()
        .map(|record| {
            record.withdrawn
                && records.iter().any(|other| {
                    !other.withdrawn
                        && other.tournament == record.tournament
                        && other.week == record.week
                        && other.section.priority() > record.section.priority()
                })
        })
        .collect();

    records
        .into_iter()
        .zip(stale)
        .filter_map(|(record, stale)| {
            if stale {
                report.record(ResolutionEvent::PromotionStripped {
                    player: player.to_string(),
                    tournament: record.tournament.clone(),
                    section: record.section.as_str().to_string(),
                });
                None
            } else {
                Some(record)
            }
        })
        .collect()
}
