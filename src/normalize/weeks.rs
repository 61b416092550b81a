use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

const MONTHS: &[(&str, u32)] = &[
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

fn month_number(abbr: &str) -> Option<u32> {
    MONTHS.iter().find(|(name, _)| *name == abbr).map(|&(_, n)| n)
}

fn month_name(number: u32) -> Option<&'static str> {
    MONTHS.iter().find(|&&(_, n)| n == number).map(|&(name, _)| name)
}

fn month_first_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})").expect("valid week pattern"))
}

fn day_first_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})\s+([A-Za-z]{3})").expect("valid week pattern"))
}

fn week_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Week\s+(\d+)").expect("valid week pattern"))
}

fn trailing_marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\s*[\u{2754}?])+\s*$").expect("valid marker pattern"))
}

/// Extract the start (month, day) from any week label format
///
/// Handles "Feb 16", "Feb 9-15", "Feb 23 - Mar 1" and day-first forms like
/// "09 Feb to 15 Feb 2026" or "2 Jan - 11 Jan". Unparseable labels yield
/// `None`, never an error.
pub fn extract_start_date(week: &str) -> Option<(u32, u32)> {
    let week = week.trim();
    if week.is_empty() {
        return None;
    }

    if let Some(caps) = month_first_pattern().captures(week) {
        if let (Some(month), Ok(day)) = (month_number(&caps[1]), caps[2].parse()) {
            return Some((month, day));
        }
    }

    if let Some(caps) = day_first_pattern().captures(week) {
        if let (Ok(day), Some(month)) = (caps[1].parse(), month_number(&caps[2])) {
            return Some((month, day));
        }
    }

    None
}

/// Normalize a week label to canonical "Mon D" form using its start date
///
/// Merges overlapping labels from different sources ("Feb 16" and
/// "Feb 16-22" both become "Feb 16"). Trailing uncertainty markers some
/// sources append are dropped first; labels without a parseable start date
/// pass through cleaned but otherwise untouched.
pub fn normalize_week(week: &str) -> String {
    let cleaned = trailing_marker_pattern().replace(week.trim(), "");
    let cleaned = cleaned.trim();

    match extract_start_date(cleaned) {
        Some((month, day)) => match month_name(month) {
            Some(name) => format!("{name} {day}"),
            None => cleaned.to_string(),
        },
        None => cleaned.to_string(),
    }
}

/// Build a mapping from each week label to a canonical one
///
/// Labels whose start-date keys (month * 100 + day) lie within
/// `window_days` of the earliest key in their group collapse to the
/// earliest label. Labels without a start date map to themselves.
pub fn merge_close_weeks(weeks: &BTreeSet<String>, window_days: u32) -> HashMap<String, String> {
    let mut dated: Vec<(u32, &str)> = Vec::new();
    let mut merge_map = HashMap::new();

    for week in weeks {
        match extract_start_date(week) {
            Some((month, day)) => dated.push((month * 100 + day, week)),
            None => {
                merge_map.insert(week.clone(), week.clone());
            }
        }
    }

    dated.sort_unstable();

    let mut groups: Vec<(u32, Vec<&str>)> = Vec::new();
    for (sort_key, label) in dated {
        match groups.last_mut() {
            // Anchored on the group's first key, not its latest member
            Some((first_key, members)) if sort_key - *first_key <= window_days => {
                members.push(label);
            }
            _ => groups.push((sort_key, vec![label])),
        }
    }

    for (_, members) in groups {
        let canonical = members[0];
        for label in members {
            merge_map.insert(label.to_string(), canonical.to_string());
        }
    }

    merge_map
}

/// Sort key ordering week labels chronologically
///
/// Parseable labels sort by start date, "Week N" fallback labels after
/// them, everything else last.
pub fn week_sort_key(week: &str) -> (u8, u32) {
    let week = week.trim();
    if week.is_empty() {
        return (2, 0);
    }

    if let Some((month, day)) = extract_start_date(week) {
        return (0, month * 100 + day);
    }

    if let Some(caps) = week_number_pattern().captures(week) {
        if let Ok(n) = caps[1].parse() {
            return (1, n);
        }
    }

    (2, 0)
}
