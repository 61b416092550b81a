use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Tour marker carried by every ranking row and entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

/// Draw section an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Main Draw")]
    MainDraw,
    Qualifying,
    Alternates,
}

impl Section {
    /// Promotion order: alternates move up to qualifying, qualifying to the main draw
    pub fn priority(&self) -> u8 {
        match self {
            Section::Alternates => 0,
            Section::Qualifying => 1,
            Section::MainDraw => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::MainDraw => "Main Draw",
            Section::Qualifying => "Qualifying",
            Section::Alternates => "Alternates",
        }
    }
}

/// Ranked player snapshot taken at the start of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub name: String,
    pub rank: u32,
    pub gender: Gender,
    pub country_code: String,
}

impl RankedPlayer {
    /// Grouping key for matched entries
    pub fn key(&self) -> String {
        format!("{}|{}", self.name, self.gender.as_str())
    }
}

/// One tournament entry as reported by a single collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    pub tournament: String,
    pub tier: String,
    pub week: String,
    pub section: Section,
    pub player_name: String,
    pub player_rank: Option<u32>,
    pub player_country: String,
    pub withdrawn: bool,
    pub reason: Option<String>,
    pub gender: Gender,
    pub source: String,
    pub withdrawal_type: Option<String>,
}

impl RawEntry {
    /// Reason text with empty strings treated as absent
    pub fn reason_text(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Resolved, deduplicated entry attached to a ranked player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntryRecord {
    pub tournament: String,
    pub tier: String,
    pub section: Section,
    pub week: String,
    pub source: String,
    pub withdrawn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_type: Option<String>,
}

impl PlayerEntryRecord {
    /// Seed a record from the first entry seen for its slot
    pub fn from_entry(entry: &RawEntry) -> Self {
        Self {
            tournament: entry.tournament.clone(),
            tier: entry.tier.clone(),
            section: entry.section,
            week: entry.week.clone(),
            source: entry.source.clone(),
            withdrawn: entry.withdrawn,
            reason: entry.reason_text().map(str::to_string),
            withdrawal_type: entry.withdrawal_type.clone(),
        }
    }
}

// --- Resolved Output Document ---

/// Per-player block in the resolved output document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlayer {
    pub rank: u32,
    pub name: String,
    pub gender: Gender,
    pub country: String,
    pub entries: Vec<PlayerEntryRecord>,
}

/// Calendar tournament no collector reported anything for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTournament {
    pub name: String,
    pub city: String,
    pub country: String,
    pub surface: String,
    pub dates: String,
    pub tier: String,
}

/// Aggregate counters summarizing one resolved run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStats {
    pub total_players: usize,
    pub players_with_entries: usize,
    pub total_entries: usize,
    pub unique_tournaments: usize,
}

impl ResolutionStats {
    pub fn compute(players: &[ResolvedPlayer]) -> Self {
        let tournaments: HashSet<&str> = players
            .iter()
            .flat_map(|p| p.entries.iter().map(|e| e.tournament.as_str()))
            .collect();

        Self {
            total_players: players.len(),
            players_with_entries: players.iter().filter(|p| !p.entries.is_empty()).count(),
            total_entries: players.iter().map(|p| p.entries.len()).sum(),
            unique_tournaments: tournaments.len(),
        }
    }
}

/// Root of the resolved output document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedData {
    pub generated_at: String,
    pub players: Vec<ResolvedPlayer>,
    pub weeks: Vec<String>,
    pub missing_tournaments: Vec<MissingTournament>,
    pub stats: ResolutionStats,
}
