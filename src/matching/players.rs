use std::collections::HashMap;

use log::debug;

use crate::config::settings::MatchingSettings;
use crate::domain::models::{Gender, RankedPlayer, RawEntry};
use crate::matching::similarity::token_sort_ratio;
use crate::normalize::names;

/// Match every ranked player against the entry pool
///
/// Exact path first: entries whose normalized name equals the player's
/// normalized name, minus cross-gender hits. Only when that finds nothing
/// does the fuzzy fallback scan the player's gender bucket, accepting
/// scores at or above the strict threshold unconditionally and borderline
/// scores only on a country tie-break. Unmatched players get an empty list.
pub fn build_player_entry_map(
    players: &[RankedPlayer],
    entries: &[RawEntry],
    settings: &MatchingSettings,
) -> HashMap<String, Vec<RawEntry>> {
    let normalized: Vec<String> = entries
        .iter()
        .map(|e| names::normalize(&e.player_name))
        .collect();

    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut by_gender: HashMap<Gender, Vec<usize>> = HashMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        by_name.entry(&normalized[idx]).or_default().push(idx);
        by_gender.entry(entry.gender).or_default().push(idx);
    }

    let mut map = HashMap::with_capacity(players.len());
    for (count, player) in players.iter().enumerate() {
        if (count + 1) % 100 == 0 || count + 1 == players.len() {
            debug!("  Matching player {}/{}", count + 1, players.len());
        }
        let matched = match_player(player, entries, &normalized, &by_name, &by_gender, settings);
        map.insert(player.key(), matched);
    }
    map
}

fn match_player(
    player: &RankedPlayer,
    entries: &[RawEntry],
    normalized: &[String],
    by_name: &HashMap<&str, Vec<usize>>,
    by_gender: &HashMap<Gender, Vec<usize>>,
    settings: &MatchingSettings,
) -> Vec<RawEntry> {
    let player_norm = names::normalize(&player.name);

    if let Some(indices) = by_name.get(player_norm.as_str()) {
        let exact: Vec<RawEntry> = indices
            .iter()
            .map(|&i| &entries[i])
            .filter(|e| e.gender == player.gender)
            .cloned()
            .collect();
        if !exact.is_empty() {
            return exact;
        }
    }

    let Some(bucket) = by_gender.get(&player.gender) else {
        return Vec::new();
    };

    let mut matched = Vec::new();
    for &i in bucket {
        let score = token_sort_ratio(&player_norm, &normalized[i]);
        if score >= settings.strict_threshold {
            matched.push(entries[i].clone());
        } else if score >= settings.fuzzy_threshold && country_matches(player, &entries[i]) {
            matched.push(entries[i].clone());
        }
    }
    matched
}

/// Borderline matches need a known country on both sides
fn country_matches(player: &RankedPlayer, entry: &RawEntry) -> bool {
    !player.country_code.is_empty()
        && !entry.player_country.is_empty()
        && player.country_code.eq_ignore_ascii_case(&entry.player_country)
}
