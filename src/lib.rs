//! Tunefeed recommendation core.
//!
//! Pure scoring engines plus the concurrent aggregator that assembles a
//! personalized home feed. Catalog and history access happens behind
//! the [`source::FeedSource`] trait; this crate ships only the JSON
//! fixture implementation used by the debug binary and tests.

pub mod config;
pub mod feed;
pub mod model;
pub mod scoring;
pub mod source;

// Re-export commonly used types for convenience
pub use config::{FeedConfig, FileConfig};
pub use feed::{FeedError, HomeFeedAggregator};
pub use model::{ArtistSection, HomeFeed, ListenContext, Song, TasteSignals};
pub use source::{FeedSource, JsonFeedSource};
