use regex::Regex;

use crate::config::aliases::AliasTable;
use crate::normalize::names::strip_accents;

const CONNECTOR_WORDS: &[&str] = &["DE", "DI", "DA", "DO", "DEL", "LA", "LE"];

/// Resolves every source spelling of a tournament to one canonical name
///
/// Handles the three source formats seen in the wild: ALL-CAPS city names
/// with a tour prefix ("ATP DOHA"), official names ("Qatar ExxonMobil Open")
/// and Challenger names with a level suffix ("Baton Rouge (CH 50)").
pub struct TournamentCanonicalizer {
    aliases: AliasTable,
    tour_prefix: Regex,
    level_suffix: Regex,
}

impl TournamentCanonicalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            tour_prefix: Regex::new(r"^(?:ATP|WTA)\s+").expect("valid tour prefix pattern"),
            level_suffix: Regex::new(r"(?i)^(.+?)\s*\(CH\s*\d+\)$")
                .expect("valid level suffix pattern"),
        }
    }

    /// Canonical name for a raw tournament spelling; idempotent
    pub fn canonicalize(&self, raw: &str) -> String {
        let stripped = strip_accents(raw.trim());
        if let Some(canonical) = self.aliases.resolve(&stripped.to_lowercase()) {
            return canonical.to_string();
        }

        let mut name = self.tour_prefix.replace(&stripped, "").into_owned();

        if name.chars().count() > 3 && name == name.to_uppercase() {
            name = title_case(&name);
        }

        if let Some(caps) = self.level_suffix.captures(&name) {
            name = caps[1].trim().to_string();
        }

        if let Some(canonical) = self.aliases.resolve(&name.to_lowercase()) {
            return canonical.to_string();
        }

        name
    }
}

/// Title-case an ALL-CAPS name, keeping connector words lowercase past the
/// first word ("OPEN DE TENIS" -> "Open de Tenis")
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && CONNECTOR_WORDS.contains(&word.to_uppercase().as_str()) {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
