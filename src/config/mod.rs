pub mod aliases;
pub mod calendar;
pub mod settings;

pub use aliases::AliasTable;
pub use calendar::{CalendarTable, TournamentMeta};
pub use settings::AppConfig;
