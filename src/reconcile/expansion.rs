use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{Gender, RankedPlayer, RawEntry};
use crate::normalize::names;
use crate::reconcile::fold::more_specific;
use crate::reconcile::report::{ResolutionEvent, ResolutionReport};

fn abbreviation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{1,3})\.\s*(.+)$").expect("valid abbreviated name pattern")
    })
}

/// Lookup parts of an "Initial. Surname" spelling
#[derive(Debug, Clone, PartialEq)]
pub struct AbbreviatedName {
    pub initial: char,
    pub remainder: String,
}

/// Split an abbreviated spelling into its initial and normalized remainder
pub fn parse_abbreviated(name: &str) -> Option<AbbreviatedName> {
    let captures = abbreviation_pattern().captures(name.trim())?;
    let initial = captures[1].chars().next()?.to_ascii_lowercase();
    let remainder = names::normalize(&captures[2]);
    Some(AbbreviatedName { initial, remainder })
}

/// Reverse lookup from abbreviated-name parts to a full raw spelling
///
/// Built from every non-authoritative entry in input order. Each full name
/// is indexed twice, under its complete remainder and under its last token,
/// so "J. del Potro" resolves through either "martin del potro" or "potro".
/// The first spelling seen for a key wins.
pub struct ExpansionIndex {
    full_names: HashMap<(char, String, Gender), String>,
}

impl ExpansionIndex {
    pub fn build(entries: &[RawEntry], authoritative_source: &str) -> Self {
        let mut full_names: HashMap<(char, String, Gender), String> = HashMap::new();
        for entry in entries {
            if entry.source == authoritative_source
                || parse_abbreviated(&entry.player_name).is_some()
            {
                continue;
            }
            let normalized = names::normalize(&entry.player_name);
            let mut tokens = normalized.split_whitespace();
            let Some(first) = tokens.next() else { continue };
            let Some(initial) = first.chars().next() else { continue };
            let rest: Vec<&str> = tokens.collect();
            let Some(&last) = rest.last() else { continue };
            full_names
                .entry((initial, rest.join(" "), entry.gender))
                .or_insert_with(|| entry.player_name.clone());
            full_names
                .entry((initial, last.to_string(), entry.gender))
                .or_insert_with(|| entry.player_name.clone());
        }
        Self { full_names }
    }

    /// Full remainder first, then its last token
    pub fn resolve(&self, abbrev: &AbbreviatedName, gender: Gender) -> Option<&str> {
        let full_key = (abbrev.initial, abbrev.remainder.clone(), gender);
        if let Some(full) = self.full_names.get(&full_key) {
            return Some(full);
        }
        let last = abbrev.remainder.split_whitespace().last()?;
        self.full_names
            .get(&(abbrev.initial, last.to_string(), gender))
            .map(String::as_str)
    }
}

/// Resolve abbreviated authoritative records into full-name entries
///
/// The authoritative withdrawal source reports "Initial. Surname" spellings
/// that fuzzy matching cannot place. Each such record first offers its
/// withdrawal reason to already-matched withdrawn entries it covers at the
/// same tournament, then resolves through the reverse lookup; a hit clones
/// the record under the full name into the owning ranked player's group,
/// a miss discards it. Both outcomes are reported.
pub fn expand_abbreviations(
    players: &[RankedPlayer],
    entry_map: &mut HashMap<String, Vec<RawEntry>>,
    entries: &[RawEntry],
    authoritative_source: &str,
    report: &mut ResolutionReport,
) {
    let index = ExpansionIndex::build(entries, authoritative_source);

    let mut owner_by_name: HashMap<(String, Gender), String> = HashMap::new();
    for player in players {
        owner_by_name
            .entry((names::normalize(&player.name), player.gender))
            .or_insert_with(|| player.key());
    }

    for entry in entries.iter().filter(|e| e.source == authoritative_source) {
        let Some(abbrev) = parse_abbreviated(&entry.player_name) else {
            continue;
        };

        if entry.withdrawn {
            attach_reason(players, entry_map, entry, &abbrev, report);
        }

        match index.resolve(&abbrev, entry.gender) {
            Some(full) => {
                report.record(ResolutionEvent::NameExpanded {
                    from: entry.player_name.clone(),
                    to: full.to_string(),
                });
                if let Some(key) = owner_by_name.get(&(names::normalize(full), entry.gender)) {
                    let mut expanded = entry.clone();
                    expanded.player_name = full.to_string();
                    entry_map.entry(key.clone()).or_default().push(expanded);
                }
            }
            None => {
                report.record(ResolutionEvent::ExpansionDiscarded {
                    name: entry.player_name.clone(),
                });
            }
        }
    }
}

/// Propagate an authoritative reason onto covered withdrawals
///
/// Runs before the lookup so the reason survives even when expansion fails.
/// Targets are already-matched withdrawn entries at the same canonical
/// tournament whose name the abbreviation covers; the more specific reason
/// wins, as in the fold.
fn attach_reason(
    players: &[RankedPlayer],
    entry_map: &mut HashMap<String, Vec<RawEntry>>,
    auth: &RawEntry,
    abbrev: &AbbreviatedName,
    report: &mut ResolutionReport,
) {
    let Some(reason) = auth.reason_text() else {
        return;
    };

    for player in players {
        let Some(matched) = entry_map.get_mut(&player.key()) else {
            continue;
        };
        for candidate in matched.iter_mut() {
            if !candidate.withdrawn
                || candidate.gender != auth.gender
                || candidate.tournament != auth.tournament
                || !covers(abbrev, &candidate.player_name)
            {
                continue;
            }
            if more_specific(Some(reason), candidate.reason_text()) {
                candidate.reason = Some(reason.to_string());
                if candidate.withdrawal_type.is_none() {
                    candidate.withdrawal_type = auth.withdrawal_type.clone();
                }
                report.record(ResolutionEvent::ReasonAttached {
                    player: player.name.clone(),
                    tournament: candidate.tournament.clone(),
                });
            }
        }
    }
}

/// Whether an abbreviated spelling plausibly names this full name
fn covers(abbrev: &AbbreviatedName, full_name: &str) -> bool {
    let normalized = names::normalize(full_name);
    let mut tokens = normalized.split_whitespace();
    let Some(first) = tokens.next() else {
        return false;
    };
    if first.chars().next() != Some(abbrev.initial) {
        return false;
    }
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        return false;
    }
    rest.join(" ") == abbrev.remainder
        || rest.last().copied() == abbrev.remainder.split_whitespace().last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Section;

    fn ranked(name: &str, gender: Gender) -> RankedPlayer {
        RankedPlayer {
            name: name.to_string(),
            rank: 50,
            gender,
            country_code: "AUS".to_string(),
        }
    }

    fn entry(name: &str, tournament: &str, source: &str, withdrawn: bool) -> RawEntry {
        RawEntry {
            tournament: tournament.to_string(),
            tier: "ATP 250".to_string(),
            week: "Jan 6".to_string(),
            section: Section::MainDraw,
            player_name: name.to_string(),
            player_rank: None,
            player_country: "AUS".to_string(),
            withdrawn,
            reason: None,
            gender: Gender::M,
            source: source.to_string(),
            withdrawal_type: None,
        }
    }

    #[test]
    fn test_parse_abbreviated_forms() {
        let parsed = parse_abbreviated("A. Vukic").unwrap();
        assert_eq!(parsed.initial, 'a');
        assert_eq!(parsed.remainder, "vukic");

        let parsed = parse_abbreviated("Bu. van de Zandschulp").unwrap();
        assert_eq!(parsed.initial, 'b');
        assert_eq!(parsed.remainder, "van de zandschulp");

        assert!(parse_abbreviated("Aleksandar Vukic").is_none());
    }

    #[test]
    fn test_expansion_joins_owning_player_group() {
        let players = [ranked("Aleksandar Vukic", Gender::M)];
        let full = entry("Aleksandar Vukic", "Sydney", "TickTockTennis", false);
        let mut abbreviated = entry("A. Vukic", "Sydney", "OfficialDraw", true);
        abbreviated.reason = Some("shoulder".to_string());
        let entries = vec![full.clone(), abbreviated];

        let mut map = HashMap::from([("Aleksandar Vukic|M".to_string(), vec![full])]);
        let mut report = ResolutionReport::default();
        expand_abbreviations(&players, &mut map, &entries, "OfficialDraw", &mut report);

        let group = &map["Aleksandar Vukic|M"];
        assert_eq!(group.len(), 2);
        assert_eq!(group[1].player_name, "Aleksandar Vukic");
        assert!(group[1].withdrawn);
        assert_eq!(group[1].reason.as_deref(), Some("shoulder"));
        assert_eq!(report.names_expanded(), 1);
    }

    #[test]
    fn test_last_token_fallback_resolves_particles() {
        let players = [ranked("Juan Martin del Potro", Gender::M)];
        let full = entry("Juan Martin del Potro", "Buenos Aires", "TickTockTennis", false);
        let abbreviated = entry("J. Potro", "Buenos Aires", "OfficialDraw", true);
        let entries = vec![full.clone(), abbreviated];

        let mut map = HashMap::from([("Juan Martin del Potro|M".to_string(), vec![full])]);
        let mut report = ResolutionReport::default();
        expand_abbreviations(&players, &mut map, &entries, "OfficialDraw", &mut report);

        assert_eq!(report.names_expanded(), 1);
        assert_eq!(map["Juan Martin del Potro|M"].len(), 2);
    }

    #[test]
    fn test_reason_attaches_when_expansion_fails() {
        // The only full spelling comes from the authoritative source itself,
        // so the reverse lookup stays empty and expansion misses.
        let players = [ranked("Aleksandar Vukic", Gender::M)];
        let full = entry("Aleksandar Vukic", "Sydney", "OfficialDraw", true);
        let mut abbreviated = entry("A. Vukic", "Sydney", "OfficialDraw", true);
        abbreviated.reason = Some("shoulder".to_string());
        let entries = vec![full.clone(), abbreviated];

        let mut map = HashMap::from([("Aleksandar Vukic|M".to_string(), vec![full])]);
        let mut report = ResolutionReport::default();
        expand_abbreviations(&players, &mut map, &entries, "OfficialDraw", &mut report);

        let group = &map["Aleksandar Vukic|M"];
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].reason.as_deref(), Some("shoulder"));
        assert_eq!(report.reasons_attached(), 1);
        assert_eq!(report.expansions_discarded(), 1);
    }

    #[test]
    fn test_reason_never_crosses_tournaments() {
        let players = [ranked("Aleksandar Vukic", Gender::M)];
        let full = entry("Aleksandar Vukic", "Brisbane", "OfficialDraw", true);
        let mut abbreviated = entry("A. Vukic", "Sydney", "OfficialDraw", true);
        abbreviated.reason = Some("shoulder".to_string());
        let entries = vec![full.clone(), abbreviated];

        let mut map = HashMap::from([("Aleksandar Vukic|M".to_string(), vec![full])]);
        let mut report = ResolutionReport::default();
        expand_abbreviations(&players, &mut map, &entries, "OfficialDraw", &mut report);

        assert!(map["Aleksandar Vukic|M"][0].reason.is_none());
        assert_eq!(report.reasons_attached(), 0);
    }

    #[test]
    fn test_unresolvable_record_is_discarded() {
        let players = [ranked("Aleksandar Vukic", Gender::M)];
        let abbreviated = entry("X. Nobody", "Sydney", "OfficialDraw", true);
        let entries = vec![abbreviated];

        let mut map: HashMap<String, Vec<RawEntry>> = HashMap::new();
        let mut report = ResolutionReport::default();
        expand_abbreviations(&players, &mut map, &entries, "OfficialDraw", &mut report);

        assert!(map.is_empty());
        assert_eq!(report.expansions_discarded(), 1);
        assert_eq!(report.names_expanded(), 0);
    }

    #[test]
    fn test_ambiguous_key_keeps_first_spelling_seen() {
        let first = entry("Aleksandar Vukic", "Sydney", "TickTockTennis", false);
        let second = entry("Aleks Vukic", "Sydney", "SpazioTennis", false);
        let entries = vec![first, second];

        let index = ExpansionIndex::build(&entries, "OfficialDraw");
        let abbrev = parse_abbreviated("A. Vukic").unwrap();
        assert_eq!(index.resolve(&abbrev, Gender::M), Some("Aleksandar Vukic"));
    }

    #[test]
    fn test_expansion_never_crosses_gender() {
        let mut full = entry("Ana Vukic", "Sydney", "TickTockTennis", false);
        full.gender = Gender::F;
        let entries = vec![full, entry("A. Vukic", "Sydney", "OfficialDraw", true)];

        let mut map: HashMap<String, Vec<RawEntry>> = HashMap::new();
        let mut report = ResolutionReport::default();
        expand_abbreviations(
            &[ranked("Ana Vukic", Gender::F)],
            &mut map,
            &entries,
            "OfficialDraw",
            &mut report,
        );

        assert_eq!(report.expansions_discarded(), 1);
    }
}
