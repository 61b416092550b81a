pub struct MatchingSettings {
    pub fuzzy_threshold: f64,
    pub strict_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 85.0,
            strict_threshold: 95.0,
        }
    }
}

pub struct ResolverSettings {
    pub week_merge_window_days: u32,
    pub authoritative_source: &'static str,
    pub default_max_rank: u32,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            week_merge_window_days: 5,
            authoritative_source: "OfficialDraw",
            default_max_rank: 1500,
        }
    }
}

pub struct AppConfig {
    pub matching: MatchingSettings,
    pub resolver: ResolverSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            matching: MatchingSettings::default(),
            resolver: ResolverSettings::default(),
        }
    }
}
