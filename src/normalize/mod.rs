pub mod names;
pub mod tournaments;
pub mod weeks;

pub use tournaments::TournamentCanonicalizer;
