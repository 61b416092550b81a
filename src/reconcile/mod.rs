pub mod expansion;
pub mod fold;
pub mod promotion;
pub mod report;

pub use expansion::expand_abbreviations;
pub use fold::fold_entries;
pub use promotion::strip_promoted_withdrawals;
pub use report::{ResolutionEvent, ResolutionReport};
