pub mod check;
pub mod resolution;

pub use check::CheckService;
pub use resolution::{ResolutionService, ResolveOptions};
