pub mod feeds;

pub use feeds::FeedStore;
