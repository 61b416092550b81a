pub mod players;
pub mod similarity;

pub use players::build_player_entry_map;
pub use similarity::token_sort_ratio;
