pub mod pipeline;

pub use pipeline::{Resolution, Resolver};
