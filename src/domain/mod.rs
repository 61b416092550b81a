pub mod models;

pub use models::{
    Gender, MissingTournament, PlayerEntryRecord, RankedPlayer, RawEntry, ResolutionStats,
    ResolvedData, ResolvedPlayer, Section,
};
